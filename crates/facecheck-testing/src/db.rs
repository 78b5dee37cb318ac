//! In-memory SQLite database for repository and router tests.

use sea_orm::{ConnectOptions, Database, DatabaseConnection};

use facecheck_attendance_schema::create_schema;

/// Open a fresh in-memory database with every attendance table created.
///
/// The pool holds exactly one connection: each SQLite in-memory connection
/// owns its own database, so a second connection would see empty tables.
///
/// Panics if the database cannot be opened.
pub async fn setup_test_db() -> DatabaseConnection {
    let mut options = ConnectOptions::new("sqlite::memory:");
    options
        .max_connections(1)
        .min_connections(1)
        .sqlx_logging(false);
    let db = Database::connect(options)
        .await
        .unwrap_or_else(|e| panic!("failed to open in-memory sqlite: {e}"));
    create_schema(&db)
        .await
        .unwrap_or_else(|e| panic!("failed to create schema: {e}"));
    db
}
