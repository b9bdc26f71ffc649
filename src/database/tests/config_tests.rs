use crate::database::database::{get_connection_pool, get_database_url, get_env_u32};
use crate::utils::errors_catcher::ErrorTypeKind;
use std::env;

// Single test: the environment is shared by the whole test process
#[test]
pub fn test_env_configuration() {
    env::remove_var("DATABASE_URL");
    assert_eq!(get_database_url().unwrap_err().kind(), ErrorTypeKind::InternalError);
    assert_eq!(get_connection_pool().unwrap_err().kind(), ErrorTypeKind::InternalError);

    env::remove_var("TELEECHO_UNSET_SETTING");
    assert_eq!(get_env_u32("TELEECHO_UNSET_SETTING", 10).unwrap(), 10);

    env::set_var("DATABASE_URL", ":memory:");
    env::set_var("DATABASE_POOL_SIZE", "abc");
    assert_eq!(get_connection_pool().unwrap_err().kind(), ErrorTypeKind::InternalError);

    env::set_var("DATABASE_POOL_SIZE", "2");
    assert_eq!(get_connection_pool().unwrap().max_size(), 2);

    env::remove_var("DATABASE_POOL_SIZE");
    env::remove_var("DATABASE_URL");
}
