use crate::database::database::DBConn;
use crate::database::schema::last_insert_rowid;
use crate::utils::errors_catcher::{ErrorResponse, ErrorType};
use diesel::dsl::select;
use diesel::RunQueryDsl;

/// Check if the error is a unique violation on the given key
pub fn is_error_duplicate_key(error: &diesel::result::Error, key: &str) -> bool {
    use diesel::result::DatabaseErrorKind;
    use diesel::result::Error;

    if let Error::DatabaseError(kind, info) = error {
        if let DatabaseErrorKind::UniqueViolation = kind {
            // Format examples:
            // UNIQUE constraint failed: groups.admin_user_id, groups.name
            // UNIQUE constraint failed: user_groups.user_id, user_groups.group_id
            return info
                .message()
                .split_once(": ")
                .map(|(_, columns)| columns == key)
                .unwrap_or(false);
        }
    }
    false
}

pub fn is_error_foreign_key(error: &diesel::result::Error) -> bool {
    use diesel::result::DatabaseErrorKind;
    use diesel::result::Error;

    matches!(error, Error::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, _))
}

pub fn get_last_inserted_id(conn: &mut DBConn) -> Result<i32, ErrorResponse> {
    let id = select(last_insert_rowid())
        .get_result::<i64>(conn)
        .map_err(|e| ErrorType::DatabaseError("Failed to get last insert id".to_string(), e).res_rollback())?;
    i32::try_from(id).map_err(|_| ErrorType::InternalError(format!("Inserted id {} does not fit an i32", id)).res_rollback())
}
