use crate::database::database::DBConn;
use crate::database::group::group::Group;
use crate::database::schema::*;
use crate::database::utils::{is_error_duplicate_key, is_error_foreign_key};
use crate::utils::errors_catcher::{ErrorResponse, ErrorType};
use diesel::prelude::*;
use diesel::{Associations, Identifiable, Insertable, Queryable, Selectable};
use log::error;

const USER_GROUPS_PRIMARY_KEY: &str = "user_groups.user_id, user_groups.group_id";

/// Membership of a user in a group
#[derive(Queryable, Selectable, Identifiable, Associations, Insertable, Debug, PartialEq, Clone)]
#[diesel(primary_key(user_id, group_id))]
#[diesel(belongs_to(Group))]
#[diesel(table_name = user_groups)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct UserGroup {
    pub user_id: i32,
    pub group_id: i32,
}

impl UserGroup {
    pub fn insert(conn: &mut DBConn, user_id: i32, group_id: i32) -> Result<UserGroup, ErrorResponse> {
        let user_group = UserGroup { user_id, group_id };
        diesel::insert_into(user_groups::table)
            .values(&user_group)
            .execute(conn)
            .map_err(|e| {
                error!("Error adding user {} to group {}: {}", user_id, group_id, e);
                if is_error_duplicate_key(&e, USER_GROUPS_PRIMARY_KEY) {
                    ErrorType::UserAlreadyInGroup.res()
                } else if is_error_foreign_key(&e) {
                    ErrorType::GroupNotFound.res()
                } else {
                    ErrorType::DatabaseError("Failed to insert user group".to_string(), e).res_rollback()
                }
            })?;
        Ok(user_group)
    }

    pub fn is_member(conn: &mut DBConn, user_id: i32, group_id: i32) -> Result<bool, ErrorResponse> {
        diesel::select(diesel::dsl::exists(
            user_groups::table
                .filter(user_groups::user_id.eq(user_id))
                .filter(user_groups::group_id.eq(group_id)),
        ))
        .get_result::<bool>(conn)
        .map_err(|e| ErrorType::DatabaseError("Failed to check group membership".to_string(), e).res_rollback())
    }

    pub fn from_group_id(conn: &mut DBConn, group_id: i32) -> Result<Vec<UserGroup>, ErrorResponse> {
        user_groups::table
            .filter(user_groups::group_id.eq(group_id))
            .select(UserGroup::as_select())
            .order(user_groups::user_id.asc())
            .load::<UserGroup>(conn)
            .map_err(|e| ErrorType::DatabaseError("Failed to get group members".to_string(), e).res_rollback())
    }
}
