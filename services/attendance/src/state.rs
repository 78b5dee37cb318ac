use crate::infra::db::{
    ConnectionManager, DbAttendanceRepository, DbCameraRepository, DbClassRepository,
    DbFaceEmbeddingRepository, DbStudentRepository, DbTeacherRepository,
};

/// Shared application state passed to every handler via axum `State`.
#[derive(Clone)]
pub struct AppState {
    pub conn: ConnectionManager,
}

impl AppState {
    pub fn new(conn: ConnectionManager) -> Self {
        Self { conn }
    }

    pub fn teacher_repo(&self) -> DbTeacherRepository {
        DbTeacherRepository {
            conn: self.conn.clone(),
        }
    }

    pub fn class_repo(&self) -> DbClassRepository {
        DbClassRepository {
            conn: self.conn.clone(),
        }
    }

    pub fn student_repo(&self) -> DbStudentRepository {
        DbStudentRepository {
            conn: self.conn.clone(),
        }
    }

    pub fn embedding_repo(&self) -> DbFaceEmbeddingRepository {
        DbFaceEmbeddingRepository {
            conn: self.conn.clone(),
        }
    }

    pub fn camera_repo(&self) -> DbCameraRepository {
        DbCameraRepository {
            conn: self.conn.clone(),
        }
    }

    pub fn attendance_repo(&self) -> DbAttendanceRepository {
        DbAttendanceRepository {
            conn: self.conn.clone(),
        }
    }
}
