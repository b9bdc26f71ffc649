use super::common::test_conn;
use crate::database::group::group::Group;
use crate::database::group::user_group::UserGroup;
use crate::utils::errors_catcher::{err_transaction, ErrorType, ErrorTypeKind};

#[test]
pub fn test_err_transaction_keeps_writes_without_rollback() {
    let mut conn = test_conn();
    let group = Group::create(&mut conn, 1, "G", "", "").unwrap();

    let res: Result<(), _> = err_transaction(&mut conn, |conn| {
        UserGroup::insert(conn, 2, group.id)?;
        ErrorType::GroupAlreadyExists.res_err()
    });
    assert_eq!(res.unwrap_err().kind(), ErrorTypeKind::GroupAlreadyExists);
    assert!(UserGroup::is_member(&mut conn, 2, group.id).unwrap());
}

#[test]
pub fn test_err_transaction_rollback() {
    let mut conn = test_conn();
    let group = Group::create(&mut conn, 1, "G", "", "").unwrap();

    let res: Result<(), _> = err_transaction(&mut conn, |conn| {
        UserGroup::insert(conn, 2, group.id)?;
        ErrorType::InternalError("abort".to_string()).res_err_rollback()
    });
    assert_eq!(res.unwrap_err().kind(), ErrorTypeKind::InternalError);
    assert!(!UserGroup::is_member(&mut conn, 2, group.id).unwrap());
}

#[test]
pub fn test_error_json() {
    let err = ErrorType::GroupNotFound.res_rollback();
    assert!(err.do_rollback());

    let json = serde_json::to_value(&err).unwrap();
    assert_eq!(json["error_type"], "GroupNotFound");
    assert_eq!(json["message"], "No group found");
    assert!(json.get("rollback").is_none());
}
