use crate::domain::repository::StudentRepository;
use crate::domain::types::{NewStudent, Student, StudentPatch};
use crate::error::AttendanceServiceError;

// ── GetStudent ───────────────────────────────────────────────────────────────

pub struct GetStudentUseCase<R: StudentRepository> {
    pub repo: R,
}

impl<R: StudentRepository> GetStudentUseCase<R> {
    pub async fn execute(&self, id: i32) -> Result<Student, AttendanceServiceError> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or(AttendanceServiceError::StudentNotFound)
    }
}

// ── GetStudentByCode ─────────────────────────────────────────────────────────

pub struct GetStudentByCodeUseCase<R: StudentRepository> {
    pub repo: R,
}

impl<R: StudentRepository> GetStudentByCodeUseCase<R> {
    pub async fn execute(&self, code: &str) -> Result<Student, AttendanceServiceError> {
        self.repo
            .find_by_code(code)
            .await?
            .ok_or(AttendanceServiceError::StudentNotFound)
    }
}

// ── CreateStudent ────────────────────────────────────────────────────────────

pub struct CreateStudentUseCase<R: StudentRepository> {
    pub repo: R,
}

impl<R: StudentRepository> CreateStudentUseCase<R> {
    pub async fn execute(&self, input: NewStudent) -> Result<i32, AttendanceServiceError> {
        let id = self.repo.create(&input).await?;
        tracing::info!(student_id = id, "student created");
        Ok(id)
    }
}

// ── UpdateStudent ────────────────────────────────────────────────────────────

pub struct UpdateStudentUseCase<R: StudentRepository> {
    pub repo: R,
}

impl<R: StudentRepository> UpdateStudentUseCase<R> {
    pub async fn execute(
        &self,
        id: i32,
        patch: StudentPatch,
    ) -> Result<(), AttendanceServiceError> {
        if patch.is_empty() {
            return Err(AttendanceServiceError::MissingData);
        }
        if !self.repo.update(id, &patch).await? {
            return Err(AttendanceServiceError::StudentNotFound);
        }
        Ok(())
    }
}

// ── DeleteStudent ────────────────────────────────────────────────────────────

pub struct DeleteStudentUseCase<R: StudentRepository> {
    pub repo: R,
}

impl<R: StudentRepository> DeleteStudentUseCase<R> {
    pub async fn execute(&self, id: i32) -> Result<(), AttendanceServiceError> {
        if !self.repo.delete(id).await? {
            return Err(AttendanceServiceError::StudentNotFound);
        }
        Ok(())
    }
}
