use crate::domain::repository::ClassRepository;
use crate::domain::types::{Class, ClassPatch, ClassWithStudents, NewClass};
use crate::error::AttendanceServiceError;

// ── GetClass ─────────────────────────────────────────────────────────────────

pub struct GetClassUseCase<R: ClassRepository> {
    pub repo: R,
}

impl<R: ClassRepository> GetClassUseCase<R> {
    pub async fn execute(&self, id: i32) -> Result<Class, AttendanceServiceError> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or(AttendanceServiceError::ClassNotFound)
    }
}

// ── GetClassWithStudents ─────────────────────────────────────────────────────

pub struct GetClassWithStudentsUseCase<R: ClassRepository> {
    pub repo: R,
}

impl<R: ClassRepository> GetClassWithStudentsUseCase<R> {
    pub async fn execute(&self, id: i32) -> Result<ClassWithStudents, AttendanceServiceError> {
        self.repo
            .find_with_students(id)
            .await?
            .ok_or(AttendanceServiceError::ClassNotFound)
    }
}

// ── CreateClass ──────────────────────────────────────────────────────────────

pub struct CreateClassUseCase<R: ClassRepository> {
    pub repo: R,
}

impl<R: ClassRepository> CreateClassUseCase<R> {
    pub async fn execute(&self, input: NewClass) -> Result<i32, AttendanceServiceError> {
        let id = self.repo.create(&input).await?;
        tracing::info!(class_id = id, "class created");
        Ok(id)
    }
}

// ── UpdateClass ──────────────────────────────────────────────────────────────

pub struct UpdateClassUseCase<R: ClassRepository> {
    pub repo: R,
}

impl<R: ClassRepository> UpdateClassUseCase<R> {
    pub async fn execute(
        &self,
        id: i32,
        patch: ClassPatch,
    ) -> Result<(), AttendanceServiceError> {
        if patch.is_empty() {
            return Err(AttendanceServiceError::MissingData);
        }
        if !self.repo.update(id, &patch).await? {
            return Err(AttendanceServiceError::ClassNotFound);
        }
        Ok(())
    }
}

// ── DeleteClass ──────────────────────────────────────────────────────────────

pub struct DeleteClassUseCase<R: ClassRepository> {
    pub repo: R,
}

impl<R: ClassRepository> DeleteClassUseCase<R> {
    pub async fn execute(&self, id: i32) -> Result<(), AttendanceServiceError> {
        if !self.repo.delete(id).await? {
            return Err(AttendanceServiceError::ClassNotFound);
        }
        Ok(())
    }
}
