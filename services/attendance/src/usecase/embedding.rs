use crate::domain::repository::FaceEmbeddingRepository;
use crate::domain::types::{FaceEmbedding, FaceEmbeddingPatch, NewFaceEmbedding};
use crate::error::AttendanceServiceError;

// ── GetFaceEmbedding ─────────────────────────────────────────────────────────

pub struct GetFaceEmbeddingUseCase<R: FaceEmbeddingRepository> {
    pub repo: R,
}

impl<R: FaceEmbeddingRepository> GetFaceEmbeddingUseCase<R> {
    pub async fn execute(&self, id: i32) -> Result<FaceEmbedding, AttendanceServiceError> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or(AttendanceServiceError::EmbeddingNotFound)
    }
}

// ── GetLatestEmbedding ───────────────────────────────────────────────────────

pub struct GetLatestEmbeddingUseCase<R: FaceEmbeddingRepository> {
    pub repo: R,
}

impl<R: FaceEmbeddingRepository> GetLatestEmbeddingUseCase<R> {
    pub async fn execute(&self, student_id: i32) -> Result<FaceEmbedding, AttendanceServiceError> {
        self.repo
            .find_latest_by_student(student_id)
            .await?
            .ok_or(AttendanceServiceError::EmbeddingNotFound)
    }
}

// ── CreateFaceEmbedding ──────────────────────────────────────────────────────

pub struct CreateFaceEmbeddingUseCase<R: FaceEmbeddingRepository> {
    pub repo: R,
}

impl<R: FaceEmbeddingRepository> CreateFaceEmbeddingUseCase<R> {
    pub async fn execute(&self, input: NewFaceEmbedding) -> Result<i32, AttendanceServiceError> {
        let id = self.repo.create(&input).await?;
        tracing::info!(embedding_id = id, "embedding created");
        Ok(id)
    }
}

// ── UpdateFaceEmbedding ──────────────────────────────────────────────────────

pub struct UpdateFaceEmbeddingUseCase<R: FaceEmbeddingRepository> {
    pub repo: R,
}

impl<R: FaceEmbeddingRepository> UpdateFaceEmbeddingUseCase<R> {
    pub async fn execute(
        &self,
        id: i32,
        patch: FaceEmbeddingPatch,
    ) -> Result<(), AttendanceServiceError> {
        if patch.is_empty() {
            return Err(AttendanceServiceError::MissingData);
        }
        if !self.repo.update(id, &patch).await? {
            return Err(AttendanceServiceError::EmbeddingNotFound);
        }
        Ok(())
    }
}

// ── DeleteFaceEmbedding ──────────────────────────────────────────────────────

pub struct DeleteFaceEmbeddingUseCase<R: FaceEmbeddingRepository> {
    pub repo: R,
}

impl<R: FaceEmbeddingRepository> DeleteFaceEmbeddingUseCase<R> {
    pub async fn execute(&self, id: i32) -> Result<(), AttendanceServiceError> {
        if !self.repo.delete(id).await? {
            return Err(AttendanceServiceError::EmbeddingNotFound);
        }
        Ok(())
    }
}
