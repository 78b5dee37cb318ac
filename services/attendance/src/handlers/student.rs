use axum::{Json, extract::State, http::StatusCode};
use serde::Deserialize;

use facecheck_core::extract::{Path, Query};
use facecheck_domain::student::Gender;

use crate::domain::repository::StudentRepository;
use crate::domain::types::{NewStudent, Student, StudentPatch};
use crate::error::AttendanceServiceError;
use crate::handlers::CreatedResponse;
use crate::state::AppState;
use crate::usecase::student::{
    CreateStudentUseCase, DeleteStudentUseCase, GetStudentByCodeUseCase, GetStudentUseCase,
    UpdateStudentUseCase,
};

/// `?q=` wins over `?gender=` when both are given.
#[derive(Deserialize, Default)]
pub struct StudentListQuery {
    pub q: Option<String>,
    pub gender: Option<Gender>,
}

// ── GET /api/students ────────────────────────────────────────────────────────

pub async fn get_students(
    State(state): State<AppState>,
    Query(query): Query<StudentListQuery>,
) -> Result<Json<Vec<Student>>, AttendanceServiceError> {
    let repo = state.student_repo();
    let students = match (query.q.as_deref(), query.gender) {
        (Some(keyword), _) => repo.search(keyword).await?,
        (None, Some(gender)) => repo.list_by_gender(gender).await?,
        (None, None) => repo.list().await?,
    };
    Ok(Json(students))
}

// ── GET /api/students/{id} ───────────────────────────────────────────────────

pub async fn get_student(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<Student>, AttendanceServiceError> {
    let uc = GetStudentUseCase {
        repo: state.student_repo(),
    };
    Ok(Json(uc.execute(id).await?))
}

// ── GET /api/students/code/{code} ────────────────────────────────────────────

pub async fn get_student_by_code(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Result<Json<Student>, AttendanceServiceError> {
    let uc = GetStudentByCodeUseCase {
        repo: state.student_repo(),
    };
    Ok(Json(uc.execute(&code).await?))
}

// ── GET /api/students/class/{id} ─────────────────────────────────────────────

pub async fn get_students_by_class(
    State(state): State<AppState>,
    Path(class_id): Path<i32>,
) -> Result<Json<Vec<Student>>, AttendanceServiceError> {
    Ok(Json(state.student_repo().list_by_class(class_id).await?))
}

// ── POST /api/students ───────────────────────────────────────────────────────

pub async fn create_student(
    State(state): State<AppState>,
    Json(body): Json<NewStudent>,
) -> Result<(StatusCode, Json<CreatedResponse>), AttendanceServiceError> {
    let uc = CreateStudentUseCase {
        repo: state.student_repo(),
    };
    let id = uc.execute(body).await?;
    Ok((StatusCode::CREATED, Json(CreatedResponse { id })))
}

// ── PATCH /api/students/{id} ─────────────────────────────────────────────────

pub async fn update_student(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(body): Json<StudentPatch>,
) -> Result<StatusCode, AttendanceServiceError> {
    let uc = UpdateStudentUseCase {
        repo: state.student_repo(),
    };
    uc.execute(id, body).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ── DELETE /api/students/{id} ────────────────────────────────────────────────

pub async fn delete_student(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<StatusCode, AttendanceServiceError> {
    let uc = DeleteStudentUseCase {
        repo: state.student_repo(),
    };
    uc.execute(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
