//! One-off setup for the attendance database.
//!
//! ```bash
//! # Create tables and indexes (safe to repeat)
//! cargo run -p facecheck-attendance-bootstrap -- create-schema
//!
//! # Create tables, then insert a small demo data set
//! cargo run -p facecheck-attendance-bootstrap -- seed
//! ```
//!
//! Connection settings come from the same `DB_*` / `DATABASE_URL` variables
//! as the service.

use anyhow::{Context as _, Result};
use clap::{Parser, Subcommand};
use tracing::info;

use facecheck_attendance::config::AttendanceConfig;
use facecheck_attendance::infra::db::ConnectionManager;
use facecheck_core::config::Config;
use facecheck_core::tracing::init_tracing;

mod seed;

#[derive(Parser)]
#[command(about = "Prepare the attendance database")]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Create every table and index that does not exist yet
    CreateSchema,
    /// Create the schema and insert sample teachers, classes, students,
    /// embeddings, cameras and attendance
    Seed,
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let args = Args::parse();

    let config = AttendanceConfig::from_env();
    let conn = ConnectionManager::new(config.connect_options()?);
    let db = conn.connection().await.context("connect to database")?;

    facecheck_attendance_schema::create_schema(&db)
        .await
        .context("create schema")?;

    let outcome = match args.command {
        Command::CreateSchema => Ok(()),
        Command::Seed => seed::run(&conn).await,
    };

    conn.disconnect().await;
    outcome?;
    info!("bootstrap finished");
    Ok(())
}
