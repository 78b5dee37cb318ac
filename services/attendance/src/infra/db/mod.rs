//! sea-orm backed repositories.
//!
//! Reads are built with sea-query and run through
//! [`ConnectionManager::execute_query`] so the same code serves PostgreSQL and
//! SQLite. Writes go through [`ConnectionManager::execute_update`], except
//! inserts, which use the entity insert to get the generated key back on every
//! backend.

pub mod attendance;
pub mod cameras;
pub mod classes;
pub mod connection;
pub mod embeddings;
pub mod students;
pub mod teachers;

pub use attendance::DbAttendanceRepository;
pub use cameras::DbCameraRepository;
pub use classes::DbClassRepository;
pub use connection::{ConnectionManager, WriteOutcome};
pub use embeddings::DbFaceEmbeddingRepository;
pub use students::DbStudentRepository;
pub use teachers::DbTeacherRepository;

use sea_orm::{EntityTrait, UpdateMany, Value, sea_query::Expr};

use facecheck_domain::patch::Patch;

/// Add `column = value` to the update when the patch field is set.
pub(crate) fn set_patched<E, V>(
    query: UpdateMany<E>,
    column: E::Column,
    field: &Patch<V>,
) -> UpdateMany<E>
where
    E: EntityTrait,
    V: Clone + Into<Value>,
{
    match field {
        Patch::Set(value) => {
            let value: Value = value.clone().into();
            query.col_expr(column, Expr::value(value))
        }
        Patch::Unchanged => query,
    }
}
