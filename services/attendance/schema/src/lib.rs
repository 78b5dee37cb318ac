//! Database entities for the attendance service.
//!
//! The tables are created straight from these entities by [`create_schema`];
//! there is no versioned migration history.

pub mod attendance;
pub mod cameras;
pub mod classes;
pub mod face_embeddings;
pub mod students;
pub mod teachers;

use sea_orm::sea_query::Index;
use sea_orm::{ConnectionTrait, DbErr, EntityTrait, Schema};

/// Composite index backing per-student date-range lookups.
pub const ATTENDANCE_STUDENT_DATE_INDEX: &str = "idx_attendance_student_date";

/// Create every table and index that does not exist yet.
///
/// Tables are created parents first so foreign keys resolve. Safe to run
/// against a database that already has the schema.
pub async fn create_schema<C: ConnectionTrait>(db: &C) -> Result<(), DbErr> {
    let backend = db.get_database_backend();
    let schema = Schema::new(backend);

    create_table(db, &schema, teachers::Entity).await?;
    create_table(db, &schema, classes::Entity).await?;
    create_table(db, &schema, students::Entity).await?;
    create_table(db, &schema, face_embeddings::Entity).await?;
    create_table(db, &schema, cameras::Entity).await?;
    create_table(db, &schema, attendance::Entity).await?;

    let index = Index::create()
        .if_not_exists()
        .name(ATTENDANCE_STUDENT_DATE_INDEX)
        .table(attendance::Entity)
        .col(attendance::Column::StudentId)
        .col(attendance::Column::Timestamp)
        .to_owned();
    db.execute(backend.build(&index)).await?;

    tracing::info!("database schema ready");
    Ok(())
}

async fn create_table<C, E>(db: &C, schema: &Schema, entity: E) -> Result<(), DbErr>
where
    C: ConnectionTrait,
    E: EntityTrait,
{
    let mut stmt = schema.create_table_from_entity(entity);
    stmt.if_not_exists();
    db.execute(db.get_database_backend().build(&stmt)).await?;
    tracing::debug!(table = entity.table_name(), "table ensured");
    Ok(())
}
