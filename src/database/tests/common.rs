use crate::database::database::{build_pool, ConnectionOptions, DBConn};

/// Connection to a fresh in-memory database with the migrations applied
pub fn test_conn() -> DBConn {
    let options = ConnectionOptions {
        run_migrations: true,
        ..Default::default()
    };
    // A single connection: each in-memory SQLite connection is its own database
    let pool = build_pool(":memory:", 1, options).unwrap();
    pool.get().unwrap()
}
