use axum::{Json, extract::State, http::StatusCode};
use serde::Deserialize;

use facecheck_core::extract::{Path, Query};

use crate::domain::repository::CameraRepository;
use crate::domain::types::{Camera, CameraPatch, CameraStatistics, NewCamera};
use crate::error::AttendanceServiceError;
use crate::handlers::CreatedResponse;
use crate::state::AppState;
use crate::usecase::camera::{
    CreateCameraUseCase, DeleteCameraUseCase, GetCameraStatisticsUseCase, GetCameraUseCase,
    UpdateCameraUseCase,
};

/// `?q=` wins over `?location=` when both are given.
#[derive(Deserialize, Default)]
pub struct CameraListQuery {
    pub q: Option<String>,
    pub location: Option<String>,
}

// ── GET /api/cameras ─────────────────────────────────────────────────────────

pub async fn get_cameras(
    State(state): State<AppState>,
    Query(query): Query<CameraListQuery>,
) -> Result<Json<Vec<Camera>>, AttendanceServiceError> {
    let repo = state.camera_repo();
    let cameras = match (query.q.as_deref(), query.location.as_deref()) {
        (Some(keyword), _) => repo.search(keyword).await?,
        (None, Some(location)) => repo.list_by_location(location).await?,
        (None, None) => repo.list().await?,
    };
    Ok(Json(cameras))
}

// ── GET /api/cameras/{id} ────────────────────────────────────────────────────

pub async fn get_camera(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<Camera>, AttendanceServiceError> {
    let uc = GetCameraUseCase {
        repo: state.camera_repo(),
    };
    Ok(Json(uc.execute(id).await?))
}

// ── GET /api/cameras/{id}/statistics ─────────────────────────────────────────

pub async fn get_camera_statistics(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<CameraStatistics>, AttendanceServiceError> {
    let uc = GetCameraStatisticsUseCase {
        repo: state.camera_repo(),
    };
    Ok(Json(uc.execute(id).await?))
}

// ── POST /api/cameras ────────────────────────────────────────────────────────

pub async fn create_camera(
    State(state): State<AppState>,
    Json(body): Json<NewCamera>,
) -> Result<(StatusCode, Json<CreatedResponse>), AttendanceServiceError> {
    let uc = CreateCameraUseCase {
        repo: state.camera_repo(),
    };
    let id = uc.execute(body).await?;
    Ok((StatusCode::CREATED, Json(CreatedResponse { id })))
}

// ── PATCH /api/cameras/{id} ──────────────────────────────────────────────────

pub async fn update_camera(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(body): Json<CameraPatch>,
) -> Result<StatusCode, AttendanceServiceError> {
    let uc = UpdateCameraUseCase {
        repo: state.camera_repo(),
    };
    uc.execute(id, body).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ── DELETE /api/cameras/{id} ─────────────────────────────────────────────────

pub async fn delete_camera(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<StatusCode, AttendanceServiceError> {
    let uc = DeleteCameraUseCase {
        repo: state.camera_repo(),
    };
    uc.execute(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
