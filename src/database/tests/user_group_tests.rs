use super::common::test_conn;
use crate::database::group::group::Group;
use crate::database::group::user_group::UserGroup;
use crate::utils::errors_catcher::ErrorTypeKind;

#[test]
pub fn test_add_member() {
    let mut conn = test_conn();
    let group = Group::create(&mut conn, 1, "G", "", "").unwrap();

    assert!(!UserGroup::is_member(&mut conn, 2, group.id).unwrap());
    UserGroup::insert(&mut conn, 2, group.id).unwrap();
    assert!(UserGroup::is_member(&mut conn, 2, group.id).unwrap());

    let members: Vec<i32> = group.members(&mut conn).unwrap().into_iter().map(|m| m.user_id).collect();
    assert_eq!(members, vec![1, 2]);
    assert_eq!(Group::get_user_groups(&mut conn, 2).unwrap(), vec![group]);
}

#[test]
pub fn test_add_member_twice() {
    let mut conn = test_conn();
    let group = Group::create(&mut conn, 1, "G", "", "").unwrap();

    let err = UserGroup::insert(&mut conn, 1, group.id).unwrap_err();
    assert_eq!(err.kind(), ErrorTypeKind::UserAlreadyInGroup);
    assert!(!err.do_rollback());
}

#[test]
pub fn test_add_member_to_missing_group() {
    let mut conn = test_conn();

    let err = UserGroup::insert(&mut conn, 1, 42).unwrap_err();
    assert_eq!(err.kind(), ErrorTypeKind::GroupNotFound);
}
