use crate::domain::repository::TeacherRepository;
use crate::domain::types::{NewTeacher, Teacher, TeacherPatch};
use crate::error::AttendanceServiceError;

// ── GetTeacher ───────────────────────────────────────────────────────────────

pub struct GetTeacherUseCase<R: TeacherRepository> {
    pub repo: R,
}

impl<R: TeacherRepository> GetTeacherUseCase<R> {
    pub async fn execute(&self, id: i32) -> Result<Teacher, AttendanceServiceError> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or(AttendanceServiceError::TeacherNotFound)
    }
}

// ── GetTeacherByEmail ────────────────────────────────────────────────────────

pub struct GetTeacherByEmailUseCase<R: TeacherRepository> {
    pub repo: R,
}

impl<R: TeacherRepository> GetTeacherByEmailUseCase<R> {
    pub async fn execute(&self, email: &str) -> Result<Teacher, AttendanceServiceError> {
        self.repo
            .find_by_email(email)
            .await?
            .ok_or(AttendanceServiceError::TeacherNotFound)
    }
}

// ── CreateTeacher ────────────────────────────────────────────────────────────

pub struct CreateTeacherUseCase<R: TeacherRepository> {
    pub repo: R,
}

impl<R: TeacherRepository> CreateTeacherUseCase<R> {
    pub async fn execute(&self, input: NewTeacher) -> Result<i32, AttendanceServiceError> {
        let id = self.repo.create(&input).await?;
        tracing::info!(teacher_id = id, "teacher created");
        Ok(id)
    }
}

// ── UpdateTeacher ────────────────────────────────────────────────────────────

pub struct UpdateTeacherUseCase<R: TeacherRepository> {
    pub repo: R,
}

impl<R: TeacherRepository> UpdateTeacherUseCase<R> {
    pub async fn execute(
        &self,
        id: i32,
        patch: TeacherPatch,
    ) -> Result<(), AttendanceServiceError> {
        if patch.is_empty() {
            return Err(AttendanceServiceError::MissingData);
        }
        if !self.repo.update(id, &patch).await? {
            return Err(AttendanceServiceError::TeacherNotFound);
        }
        Ok(())
    }
}

// ── DeleteTeacher ────────────────────────────────────────────────────────────

pub struct DeleteTeacherUseCase<R: TeacherRepository> {
    pub repo: R,
}

impl<R: TeacherRepository> DeleteTeacherUseCase<R> {
    pub async fn execute(&self, id: i32) -> Result<(), AttendanceServiceError> {
        if !self.repo.delete(id).await? {
            return Err(AttendanceServiceError::TeacherNotFound);
        }
        Ok(())
    }
}
