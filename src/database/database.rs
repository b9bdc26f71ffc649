use crate::utils::errors_catcher::{ErrorResponse, ErrorType};
use diesel::connection::SimpleConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, CustomizeConnection, Pool, PooledConnection};
use diesel::sqlite::SqliteConnection;
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use log::{debug, info};
use std::env;

pub type DBPool = Pool<ConnectionManager<SqliteConnection>>;
pub type DBConn = PooledConnection<ConnectionManager<SqliteConnection>>;

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

const DEFAULT_POOL_SIZE: u32 = 10;
const DEFAULT_BUSY_TIMEOUT_MS: u32 = 5000;

/// Settings applied to every new SQLite connection of the pool
#[derive(Debug, Clone)]
pub struct ConnectionOptions {
    pub enable_foreign_keys: bool,
    pub busy_timeout_ms: Option<u32>,
    /// Run the pending migrations on each new connection (in-memory databases)
    pub run_migrations: bool,
}

impl Default for ConnectionOptions {
    fn default() -> Self {
        ConnectionOptions {
            enable_foreign_keys: true,
            busy_timeout_ms: Some(DEFAULT_BUSY_TIMEOUT_MS),
            run_migrations: false,
        }
    }
}

impl CustomizeConnection<SqliteConnection, diesel::r2d2::Error> for ConnectionOptions {
    fn on_acquire(&self, conn: &mut SqliteConnection) -> Result<(), diesel::r2d2::Error> {
        let mut pragmas = String::new();
        if self.enable_foreign_keys {
            pragmas.push_str("PRAGMA foreign_keys = ON;");
        }
        if let Some(timeout) = self.busy_timeout_ms {
            pragmas.push_str(&format!("PRAGMA busy_timeout = {};", timeout));
        }
        if !pragmas.is_empty() {
            conn.batch_execute(&pragmas).map_err(diesel::r2d2::Error::QueryError)?;
        }
        if self.run_migrations {
            conn.run_pending_migrations(MIGRATIONS)
                .map_err(|e| diesel::r2d2::Error::QueryError(diesel::result::Error::QueryBuilderError(e)))?;
        }
        Ok(())
    }
}

pub fn get_connection() -> Result<SqliteConnection, ErrorResponse> {
    let url = get_database_url()?;
    SqliteConnection::establish(&url)
        .map_err(|e| ErrorType::InternalError(format!("Error connecting to {}: {}", url, e)).res())
}

pub fn get_connection_pool() -> Result<DBPool, ErrorResponse> {
    let url = get_database_url()?;
    let options = ConnectionOptions {
        busy_timeout_ms: Some(get_env_u32("DATABASE_BUSY_TIMEOUT_MS", DEFAULT_BUSY_TIMEOUT_MS)?),
        ..Default::default()
    };
    build_pool(&url, get_env_u32("DATABASE_POOL_SIZE", DEFAULT_POOL_SIZE)?, options)
}

pub fn build_pool(url: &str, max_size: u32, options: ConnectionOptions) -> Result<DBPool, ErrorResponse> {
    debug!("Building a pool of {} connections to {}", max_size, url);
    let manager = ConnectionManager::<SqliteConnection>::new(url);

    Pool::builder()
        .max_size(max_size)
        .test_on_check_out(true)
        .connection_customizer(Box::new(options))
        .build(manager)
        .map_err(|e| ErrorType::InternalError(format!("Could not build connection pool to database url {}: {}", url, e)).res())
}

/// Apply the embedded migrations that are not yet applied, returns the applied versions
pub fn run_migrations(conn: &mut SqliteConnection) -> Result<Vec<String>, ErrorResponse> {
    let versions = conn
        .run_pending_migrations(MIGRATIONS)
        .map_err(|e| ErrorType::InternalError(format!("Failed to run migrations: {}", e)).res())?
        .into_iter()
        .map(|version| version.to_string())
        .collect::<Vec<String>>();
    info!("Applied {} migration(s)", versions.len());
    Ok(versions)
}

pub fn get_database_url() -> Result<String, ErrorResponse> {
    env::var("DATABASE_URL").map_err(|_| ErrorType::InternalError("DATABASE_URL must be set".to_string()).res())
}

pub(crate) fn get_env_u32(key: &str, default: u32) -> Result<u32, ErrorResponse> {
    match env::var(key) {
        Ok(value) => value
            .parse::<u32>()
            .map_err(|_| ErrorType::InternalError(format!("{} must be a positive integer, got {:?}", key, value)).res()),
        Err(_) => Ok(default),
    }
}
