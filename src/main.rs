use dotenvy::dotenv;
use log::{error, info};
use std::process::ExitCode;
use teleecho_groups::database::database::{get_connection, get_connection_pool, run_migrations};
use teleecho_groups::ErrorResponse;

/// Entry point: prepares the groups database and checks the connection pool
fn main() -> ExitCode {
    dotenv().ok();
    env_logger::init();
    info!("Starting TeleEcho groups store...");

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{}", err);
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), ErrorResponse> {
    // Migrate SQL database
    let mut conn = get_connection()?;
    let res = run_migrations(&mut conn)?;
    info!("Migrations result: {:?}", res);

    let pool = get_connection_pool()?;
    info!("Connection pool ready with {} connection(s)", pool.state().connections);
    Ok(())
}
