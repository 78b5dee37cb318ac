use axum::{Json, extract::State, http::StatusCode};
use serde::Deserialize;

use facecheck_core::extract::{Path, Query};

use crate::domain::repository::{ClassRepository, StudentRepository};
use crate::domain::types::{
    Class, ClassPatch, ClassStudentCount, ClassWithStudents, NewClass, Student,
};
use crate::error::AttendanceServiceError;
use crate::handlers::CreatedResponse;
use crate::state::AppState;
use crate::usecase::class::{
    CreateClassUseCase, DeleteClassUseCase, GetClassUseCase, GetClassWithStudentsUseCase,
    UpdateClassUseCase,
};

#[derive(Deserialize, Default)]
pub struct ClassListQuery {
    pub q: Option<String>,
}

// ── GET /api/classes ─────────────────────────────────────────────────────────

pub async fn get_classes(
    State(state): State<AppState>,
    Query(query): Query<ClassListQuery>,
) -> Result<Json<Vec<Class>>, AttendanceServiceError> {
    let repo = state.class_repo();
    let classes = match query.q.as_deref() {
        Some(keyword) => repo.search(keyword).await?,
        None => repo.list().await?,
    };
    Ok(Json(classes))
}

// ── GET /api/classes/{id} ────────────────────────────────────────────────────

pub async fn get_class(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<Class>, AttendanceServiceError> {
    let uc = GetClassUseCase {
        repo: state.class_repo(),
    };
    Ok(Json(uc.execute(id).await?))
}

// ── GET /api/classes/{id}/students ───────────────────────────────────────────

pub async fn get_class_students(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<Vec<Student>>, AttendanceServiceError> {
    Ok(Json(state.class_repo().list_students(id).await?))
}

// ── GET /api/classes/{id}/full ───────────────────────────────────────────────

pub async fn get_class_full(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<ClassWithStudents>, AttendanceServiceError> {
    let uc = GetClassWithStudentsUseCase {
        repo: state.class_repo(),
    };
    Ok(Json(uc.execute(id).await?))
}

// ── GET /api/classes/teacher/{id} ────────────────────────────────────────────

pub async fn get_classes_by_teacher(
    State(state): State<AppState>,
    Path(teacher_id): Path<i32>,
) -> Result<Json<Vec<Class>>, AttendanceServiceError> {
    Ok(Json(state.class_repo().list_by_teacher(teacher_id).await?))
}

// ── GET /api/classes/student-counts ──────────────────────────────────────────

pub async fn get_student_counts(
    State(state): State<AppState>,
) -> Result<Json<Vec<ClassStudentCount>>, AttendanceServiceError> {
    Ok(Json(state.student_repo().count_by_class().await?))
}

// ── POST /api/classes ────────────────────────────────────────────────────────

pub async fn create_class(
    State(state): State<AppState>,
    Json(body): Json<NewClass>,
) -> Result<(StatusCode, Json<CreatedResponse>), AttendanceServiceError> {
    let uc = CreateClassUseCase {
        repo: state.class_repo(),
    };
    let id = uc.execute(body).await?;
    Ok((StatusCode::CREATED, Json(CreatedResponse { id })))
}

// ── PATCH /api/classes/{id} ──────────────────────────────────────────────────

pub async fn update_class(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(body): Json<ClassPatch>,
) -> Result<StatusCode, AttendanceServiceError> {
    let uc = UpdateClassUseCase {
        repo: state.class_repo(),
    };
    uc.execute(id, body).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ── DELETE /api/classes/{id} ─────────────────────────────────────────────────

pub async fn delete_class(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<StatusCode, AttendanceServiceError> {
    let uc = DeleteClassUseCase {
        repo: state.class_repo(),
    };
    uc.execute(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
