use axum::{Json, extract::State, http::StatusCode};
use chrono::NaiveDate;
use serde::Deserialize;

use facecheck_core::extract::{Path, Query};
use facecheck_domain::attendance::{AttendanceStatus, AttendanceSummary, Session};

use crate::domain::repository::AttendanceRepository;
use crate::domain::types::{Attendance, AttendancePatch, NewAttendance};
use crate::error::AttendanceServiceError;
use crate::handlers::CreatedResponse;
use crate::state::AppState;
use crate::usecase::attendance::{
    CreateAttendanceUseCase, DeleteAttendanceUseCase, GetAttendanceUseCase,
    GetClassStatisticsUseCase, GetStudentSummaryUseCase, UpdateAttendanceUseCase,
};

/// Optional inclusive day range for the statistics routes.
#[derive(Deserialize, Default)]
pub struct DateRangeQuery {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

// ── GET /api/attendance ──────────────────────────────────────────────────────

pub async fn get_attendance_records(
    State(state): State<AppState>,
) -> Result<Json<Vec<Attendance>>, AttendanceServiceError> {
    Ok(Json(state.attendance_repo().list().await?))
}

// ── GET /api/attendance/{id} ─────────────────────────────────────────────────

pub async fn get_attendance(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<Attendance>, AttendanceServiceError> {
    let uc = GetAttendanceUseCase {
        repo: state.attendance_repo(),
    };
    Ok(Json(uc.execute(id).await?))
}

// ── GET /api/attendance/student/{id} ─────────────────────────────────────────

pub async fn get_student_attendance(
    State(state): State<AppState>,
    Path(student_id): Path<i32>,
) -> Result<Json<Vec<Attendance>>, AttendanceServiceError> {
    Ok(Json(state.attendance_repo().list_by_student(student_id).await?))
}

// ── GET /api/attendance/class/{id} ───────────────────────────────────────────

pub async fn get_class_attendance(
    State(state): State<AppState>,
    Path(class_id): Path<i32>,
) -> Result<Json<Vec<Attendance>>, AttendanceServiceError> {
    Ok(Json(state.attendance_repo().list_by_class(class_id).await?))
}

// ── GET /api/attendance/date/{date} ──────────────────────────────────────────

pub async fn get_attendance_by_date(
    State(state): State<AppState>,
    Path(date): Path<NaiveDate>,
) -> Result<Json<Vec<Attendance>>, AttendanceServiceError> {
    Ok(Json(state.attendance_repo().list_by_date(date).await?))
}

// ── GET /api/attendance/class/{id}/date/{date} ───────────────────────────────

pub async fn get_class_attendance_by_date(
    State(state): State<AppState>,
    Path((class_id, date)): Path<(i32, NaiveDate)>,
) -> Result<Json<Vec<Attendance>>, AttendanceServiceError> {
    let records = state
        .attendance_repo()
        .list_by_class_and_date(class_id, date)
        .await?;
    Ok(Json(records))
}

// ── GET /api/attendance/status/{status} ──────────────────────────────────────

pub async fn get_attendance_by_status(
    State(state): State<AppState>,
    Path(status): Path<AttendanceStatus>,
) -> Result<Json<Vec<Attendance>>, AttendanceServiceError> {
    Ok(Json(state.attendance_repo().list_by_status(status).await?))
}

// ── GET /api/attendance/session/{session} ────────────────────────────────────

pub async fn get_attendance_by_session(
    State(state): State<AppState>,
    Path(session): Path<Session>,
) -> Result<Json<Vec<Attendance>>, AttendanceServiceError> {
    Ok(Json(state.attendance_repo().list_by_session(session).await?))
}

// ── GET /api/attendance/statistics/class/{id} ────────────────────────────────

pub async fn get_class_statistics(
    State(state): State<AppState>,
    Path(class_id): Path<i32>,
    Query(range): Query<DateRangeQuery>,
) -> Result<Json<AttendanceSummary>, AttendanceServiceError> {
    let uc = GetClassStatisticsUseCase {
        repo: state.attendance_repo(),
    };
    let summary = uc.execute(class_id, range.start_date, range.end_date).await?;
    Ok(Json(summary))
}

// ── GET /api/attendance/summary/student/{id} ─────────────────────────────────

pub async fn get_student_summary(
    State(state): State<AppState>,
    Path(student_id): Path<i32>,
    Query(range): Query<DateRangeQuery>,
) -> Result<Json<AttendanceSummary>, AttendanceServiceError> {
    let uc = GetStudentSummaryUseCase {
        repo: state.attendance_repo(),
    };
    let summary = uc
        .execute(student_id, range.start_date, range.end_date)
        .await?;
    Ok(Json(summary))
}

// ── POST /api/attendance ─────────────────────────────────────────────────────

pub async fn create_attendance(
    State(state): State<AppState>,
    Json(body): Json<NewAttendance>,
) -> Result<(StatusCode, Json<CreatedResponse>), AttendanceServiceError> {
    let uc = CreateAttendanceUseCase {
        repo: state.attendance_repo(),
    };
    let id = uc.execute(body).await?;
    Ok((StatusCode::CREATED, Json(CreatedResponse { id })))
}

// ── PATCH /api/attendance/{id} ───────────────────────────────────────────────

pub async fn update_attendance(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(body): Json<AttendancePatch>,
) -> Result<StatusCode, AttendanceServiceError> {
    let uc = UpdateAttendanceUseCase {
        repo: state.attendance_repo(),
    };
    uc.execute(id, body).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ── DELETE /api/attendance/{id} ──────────────────────────────────────────────

pub async fn delete_attendance(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<StatusCode, AttendanceServiceError> {
    let uc = DeleteAttendanceUseCase {
        repo: state.attendance_repo(),
    };
    uc.execute(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
