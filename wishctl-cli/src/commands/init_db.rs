//! Database initialization command
//!
//! Creates the database directory and file ahead of the first `serve`, for
//! deployments that provision storage in a separate step.

use anyhow::{Context, Result};
use clap::Parser;

use wishctl_server::bootstrap::{init_location, InitOutcome};
use wishctl_server::config::DEFAULT_DATABASE_URL;
use wishctl_server::DatabaseLocation;

/// Arguments for the init-db command
#[derive(Parser, Debug)]
pub struct InitDbArgs {
    /// Database URL or path
    #[arg(long, env = "DATABASE_URL", default_value = DEFAULT_DATABASE_URL)]
    pub database_url: String,
}

pub fn run_init_db(args: InitDbArgs) -> Result<()> {
    let location = DatabaseLocation::parse(&args.database_url).context("Invalid database URL")?;

    let Some(report) = init_location(&location).context("Database initialization failed")? else {
        println!("In-memory database needs no initialization");
        return Ok(());
    };

    match report.outcome {
        InitOutcome::Created => println!("Created database file: {}", report.path.display()),
        InitOutcome::AlreadyExists => {
            println!("Database file already exists: {}", report.path.display())
        }
    }
    if !report.permissions_applied {
        println!("Warning: could not set permissions on {}", report.path.display());
    }
    println!("Database initialization completed successfully!");

    Ok(())
}
