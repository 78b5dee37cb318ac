use axum::{Json, extract::State, http::StatusCode};

use facecheck_core::extract::Path;

use crate::domain::repository::FaceEmbeddingRepository;
use crate::domain::types::{
    FaceEmbedding, FaceEmbeddingPatch, NewFaceEmbedding, RecognitionEmbedding,
};
use crate::error::AttendanceServiceError;
use crate::handlers::CreatedResponse;
use crate::state::AppState;
use crate::usecase::embedding::{
    CreateFaceEmbeddingUseCase, DeleteFaceEmbeddingUseCase, GetFaceEmbeddingUseCase,
    GetLatestEmbeddingUseCase, UpdateFaceEmbeddingUseCase,
};

// ── GET /api/embeddings ──────────────────────────────────────────────────────

pub async fn get_embeddings(
    State(state): State<AppState>,
) -> Result<Json<Vec<FaceEmbedding>>, AttendanceServiceError> {
    Ok(Json(state.embedding_repo().list().await?))
}

// ── GET /api/embeddings/{id} ─────────────────────────────────────────────────

pub async fn get_embedding(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<FaceEmbedding>, AttendanceServiceError> {
    let uc = GetFaceEmbeddingUseCase {
        repo: state.embedding_repo(),
    };
    Ok(Json(uc.execute(id).await?))
}

// ── GET /api/embeddings/student/{id} ─────────────────────────────────────────

pub async fn get_student_embeddings(
    State(state): State<AppState>,
    Path(student_id): Path<i32>,
) -> Result<Json<Vec<FaceEmbedding>>, AttendanceServiceError> {
    Ok(Json(state.embedding_repo().list_by_student(student_id).await?))
}

// ── GET /api/embeddings/student/{id}/latest ──────────────────────────────────

pub async fn get_latest_student_embedding(
    State(state): State<AppState>,
    Path(student_id): Path<i32>,
) -> Result<Json<FaceEmbedding>, AttendanceServiceError> {
    let uc = GetLatestEmbeddingUseCase {
        repo: state.embedding_repo(),
    };
    Ok(Json(uc.execute(student_id).await?))
}

// ── GET /api/embeddings/recognition ──────────────────────────────────────────

pub async fn get_recognition_embeddings(
    State(state): State<AppState>,
) -> Result<Json<Vec<RecognitionEmbedding>>, AttendanceServiceError> {
    Ok(Json(state.embedding_repo().list_for_recognition().await?))
}

// ── GET /api/embeddings/class/{id} ───────────────────────────────────────────

pub async fn get_class_embeddings(
    State(state): State<AppState>,
    Path(class_id): Path<i32>,
) -> Result<Json<Vec<FaceEmbedding>>, AttendanceServiceError> {
    Ok(Json(state.embedding_repo().list_by_class(class_id).await?))
}

// ── POST /api/embeddings ─────────────────────────────────────────────────────

pub async fn create_embedding(
    State(state): State<AppState>,
    Json(body): Json<NewFaceEmbedding>,
) -> Result<(StatusCode, Json<CreatedResponse>), AttendanceServiceError> {
    let uc = CreateFaceEmbeddingUseCase {
        repo: state.embedding_repo(),
    };
    let id = uc.execute(body).await?;
    Ok((StatusCode::CREATED, Json(CreatedResponse { id })))
}

// ── PATCH /api/embeddings/{id} ───────────────────────────────────────────────

pub async fn update_embedding(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(body): Json<FaceEmbeddingPatch>,
) -> Result<StatusCode, AttendanceServiceError> {
    let uc = UpdateFaceEmbeddingUseCase {
        repo: state.embedding_repo(),
    };
    uc.execute(id, body).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ── DELETE /api/embeddings/{id} ──────────────────────────────────────────────

pub async fn delete_embedding(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<StatusCode, AttendanceServiceError> {
    let uc = DeleteFaceEmbeddingUseCase {
        repo: state.embedding_repo(),
    };
    uc.execute(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
