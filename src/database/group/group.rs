use crate::database::database::DBConn;
use crate::database::group::user_group::UserGroup;
use crate::database::schema::*;
use crate::database::utils::{get_last_inserted_id, is_error_duplicate_key};
use crate::utils::errors_catcher::{err_transaction, ErrorResponse, ErrorType};
use chrono::NaiveDateTime;
use diesel::prelude::*;
use diesel::{Identifiable, Queryable, Selectable};
use log::{debug, error, info};
use serde::Serialize;

const GROUPS_ADMIN_NAME_KEY: &str = "groups.admin_user_id, groups.name";

/// A named collection of users owned by its admin
#[derive(Queryable, Selectable, Identifiable, Debug, PartialEq, Clone, Serialize)]
#[diesel(primary_key(id))]
#[diesel(table_name = groups)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct Group {
    pub id: i32,
    pub admin_user_id: i32,
    pub name: String,
    pub description: String,
    pub profile_picture_path: String,
    pub creation_date: NaiveDateTime,
}

impl Group {
    /// Creates the group and seats its admin as first member.
    /// Both rows are written in the same transaction: if the membership can't be created,
    /// the group is rolled back too.
    pub fn create(
        conn: &mut DBConn,
        admin_user_id: i32,
        name: &str,
        description: &str,
        profile_picture_path: &str,
    ) -> Result<Group, ErrorResponse> {
        err_transaction(conn, |conn| {
            let group = Group::insert(conn, admin_user_id, name, description, profile_picture_path)?;
            info!("Group {} ({:?}) created by user {}", group.id, group.name, admin_user_id);

            // Already logged by UserGroup::insert. The group must not outlive a failed association
            UserGroup::insert(conn, admin_user_id, group.id).map_err(|e| ErrorResponse { rollback: true, ..e })?;
            info!("User {} seated as first member of group {}", admin_user_id, group.id);
            Ok(group)
        })
    }

    fn insert(conn: &mut DBConn, admin_user_id: i32, name: &str, description: &str, profile_picture_path: &str) -> Result<Group, ErrorResponse> {
        let mut group = Group {
            id: 0,
            admin_user_id,
            name: name.to_string(),
            description: description.to_string(),
            profile_picture_path: profile_picture_path.to_string(),
            creation_date: chrono::Utc::now().naive_utc(),
        };

        diesel::insert_into(groups::table)
            .values((
                groups::admin_user_id.eq(&group.admin_user_id),
                groups::name.eq(&group.name),
                groups::description.eq(&group.description),
                groups::profile_picture_path.eq(&group.profile_picture_path),
                groups::creation_date.eq(&group.creation_date),
            ))
            .execute(conn)
            .map_err(|e| {
                error!("Error creating group {:?} for user {}: {}", group.name, admin_user_id, e);
                if is_error_duplicate_key(&e, GROUPS_ADMIN_NAME_KEY) {
                    ErrorType::GroupAlreadyExists.res()
                } else {
                    ErrorType::DatabaseError("Failed to insert group".to_string(), e).res_rollback()
                }
            })?;

        group.id = get_last_inserted_id(conn)?;
        Ok(group)
    }

    /// Returns `true` when the admin has NO group with this name, `false` when one exists.
    /// The inverted meaning is relied upon by callers: keep it.
    pub fn does_group_exist(conn: &mut DBConn, admin_user_id: i32, group_name: &str) -> Result<bool, ErrorResponse> {
        let count = groups::table
            .filter(groups::admin_user_id.eq(admin_user_id))
            .filter(groups::name.eq(group_name))
            .count()
            .get_result::<i64>(conn)
            .map_err(|e| {
                error!("Error while checking groups of user {}: {}", admin_user_id, e);
                ErrorType::DatabaseError("Failed to count groups".to_string(), e).res_rollback()
            })?;
        Ok(count == 0)
    }

    /// Lists the groups the user is a member of, ordered by group id.
    /// No membership at all is reported as [`ErrorType::GroupNotFound`].
    pub fn get_user_groups(conn: &mut DBConn, user_id: i32) -> Result<Vec<Group>, ErrorResponse> {
        let groups = user_groups::table
            .inner_join(groups::table)
            .filter(user_groups::user_id.eq(user_id))
            .select(Group::as_select())
            .order(groups::id.asc())
            .load::<Group>(conn);

        match groups {
            Ok(groups) if groups.is_empty() => {
                debug!("No groups found for user {}", user_id);
                ErrorType::GroupNotFound.res_err()
            }
            Ok(groups) => Ok(groups),
            Err(diesel::result::Error::NotFound) => {
                debug!("No groups found for user {}", user_id);
                ErrorType::GroupNotFound.res_err()
            }
            Err(e) => {
                error!("Error retrieving joined groups for user {}: {}", user_id, e);
                ErrorType::DatabaseError("Failed to get user groups".to_string(), e).res_err_rollback()
            }
        }
    }

    pub fn from_id(conn: &mut DBConn, group_id: i32) -> Result<Group, ErrorResponse> {
        Group::from_id_opt(conn, group_id)?.ok_or_else(|| ErrorType::GroupNotFound.res())
    }
    pub fn from_id_opt(conn: &mut DBConn, group_id: i32) -> Result<Option<Group>, ErrorResponse> {
        groups::table
            .filter(groups::id.eq(group_id))
            .select(Group::as_select())
            .first::<Group>(conn)
            .optional()
            .map_err(|e| ErrorType::DatabaseError("Failed to get group from id".to_string(), e).res_rollback())
    }

    pub fn members(&self, conn: &mut DBConn) -> Result<Vec<UserGroup>, ErrorResponse> {
        UserGroup::from_group_id(conn, self.id)
    }
}
