use axum::{Json, extract::State, http::StatusCode};
use serde::Deserialize;

use facecheck_core::extract::{Path, Query};

use crate::domain::repository::TeacherRepository;
use crate::domain::types::{Class, NewTeacher, Teacher, TeacherPatch};
use crate::error::AttendanceServiceError;
use crate::handlers::CreatedResponse;
use crate::state::AppState;
use crate::usecase::teacher::{
    CreateTeacherUseCase, DeleteTeacherUseCase, GetTeacherByEmailUseCase, GetTeacherUseCase,
    UpdateTeacherUseCase,
};

#[derive(Deserialize, Default)]
pub struct TeacherListQuery {
    pub q: Option<String>,
}

// ── GET /api/teachers ────────────────────────────────────────────────────────

pub async fn get_teachers(
    State(state): State<AppState>,
    Query(query): Query<TeacherListQuery>,
) -> Result<Json<Vec<Teacher>>, AttendanceServiceError> {
    let repo = state.teacher_repo();
    let teachers = match query.q.as_deref() {
        Some(keyword) => repo.search(keyword).await?,
        None => repo.list().await?,
    };
    Ok(Json(teachers))
}

// ── GET /api/teachers/{id} ───────────────────────────────────────────────────

pub async fn get_teacher(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<Teacher>, AttendanceServiceError> {
    let uc = GetTeacherUseCase {
        repo: state.teacher_repo(),
    };
    Ok(Json(uc.execute(id).await?))
}

// ── GET /api/teachers/email/{email} ──────────────────────────────────────────

pub async fn get_teacher_by_email(
    State(state): State<AppState>,
    Path(email): Path<String>,
) -> Result<Json<Teacher>, AttendanceServiceError> {
    let uc = GetTeacherByEmailUseCase {
        repo: state.teacher_repo(),
    };
    Ok(Json(uc.execute(&email).await?))
}

// ── GET /api/teachers/{id}/classes ───────────────────────────────────────────

pub async fn get_teacher_classes(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<Vec<Class>>, AttendanceServiceError> {
    Ok(Json(state.teacher_repo().list_classes(id).await?))
}

// ── POST /api/teachers ───────────────────────────────────────────────────────

pub async fn create_teacher(
    State(state): State<AppState>,
    Json(body): Json<NewTeacher>,
) -> Result<(StatusCode, Json<CreatedResponse>), AttendanceServiceError> {
    let uc = CreateTeacherUseCase {
        repo: state.teacher_repo(),
    };
    let id = uc.execute(body).await?;
    Ok((StatusCode::CREATED, Json(CreatedResponse { id })))
}

// ── PATCH /api/teachers/{id} ─────────────────────────────────────────────────

pub async fn update_teacher(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(body): Json<TeacherPatch>,
) -> Result<StatusCode, AttendanceServiceError> {
    let uc = UpdateTeacherUseCase {
        repo: state.teacher_repo(),
    };
    uc.execute(id, body).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ── DELETE /api/teachers/{id} ────────────────────────────────────────────────

pub async fn delete_teacher(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<StatusCode, AttendanceServiceError> {
    let uc = DeleteTeacherUseCase {
        repo: state.teacher_repo(),
    };
    uc.execute(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
