use crate::domain::repository::CameraRepository;
use crate::domain::types::{Camera, CameraPatch, CameraStatistics, NewCamera};
use crate::error::AttendanceServiceError;

// ── GetCamera ────────────────────────────────────────────────────────────────

pub struct GetCameraUseCase<R: CameraRepository> {
    pub repo: R,
}

impl<R: CameraRepository> GetCameraUseCase<R> {
    pub async fn execute(&self, id: i32) -> Result<Camera, AttendanceServiceError> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or(AttendanceServiceError::CameraNotFound)
    }
}

// ── GetCameraStatistics ──────────────────────────────────────────────────────

pub struct GetCameraStatisticsUseCase<R: CameraRepository> {
    pub repo: R,
}

impl<R: CameraRepository> GetCameraStatisticsUseCase<R> {
    pub async fn execute(&self, id: i32) -> Result<CameraStatistics, AttendanceServiceError> {
        self.repo
            .statistics(id)
            .await?
            .ok_or(AttendanceServiceError::CameraNotFound)
    }
}

// ── CreateCamera ─────────────────────────────────────────────────────────────

pub struct CreateCameraUseCase<R: CameraRepository> {
    pub repo: R,
}

impl<R: CameraRepository> CreateCameraUseCase<R> {
    pub async fn execute(&self, input: NewCamera) -> Result<i32, AttendanceServiceError> {
        let id = self.repo.create(&input).await?;
        tracing::info!(camera_id = id, "camera created");
        Ok(id)
    }
}

// ── UpdateCamera ─────────────────────────────────────────────────────────────

pub struct UpdateCameraUseCase<R: CameraRepository> {
    pub repo: R,
}

impl<R: CameraRepository> UpdateCameraUseCase<R> {
    pub async fn execute(
        &self,
        id: i32,
        patch: CameraPatch,
    ) -> Result<(), AttendanceServiceError> {
        if patch.is_empty() {
            return Err(AttendanceServiceError::MissingData);
        }
        if !self.repo.update(id, &patch).await? {
            return Err(AttendanceServiceError::CameraNotFound);
        }
        Ok(())
    }
}

// ── DeleteCamera ─────────────────────────────────────────────────────────────

pub struct DeleteCameraUseCase<R: CameraRepository> {
    pub repo: R,
}

impl<R: CameraRepository> DeleteCameraUseCase<R> {
    pub async fn execute(&self, id: i32) -> Result<(), AttendanceServiceError> {
        if !self.repo.delete(id).await? {
            return Err(AttendanceServiceError::CameraNotFound);
        }
        Ok(())
    }
}
