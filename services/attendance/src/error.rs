use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use facecheck_core::error::error_response;
use facecheck_domain::date_range::InvalidDateRange;

/// Attendance service error variants.
#[derive(Debug, thiserror::Error)]
pub enum AttendanceServiceError {
    #[error("teacher not found")]
    TeacherNotFound,
    #[error("class not found")]
    ClassNotFound,
    #[error("student not found")]
    StudentNotFound,
    #[error("embedding not found")]
    EmbeddingNotFound,
    #[error("camera not found")]
    CameraNotFound,
    #[error("attendance record not found")]
    AttendanceNotFound,
    #[error("missing data")]
    MissingData,
    #[error(transparent)]
    InvalidDateRange(#[from] InvalidDateRange),
    #[error("{:#}", .0)]
    Internal(#[from] anyhow::Error),
}

impl AttendanceServiceError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::TeacherNotFound => "TEACHER_NOT_FOUND",
            Self::ClassNotFound => "CLASS_NOT_FOUND",
            Self::StudentNotFound => "STUDENT_NOT_FOUND",
            Self::EmbeddingNotFound => "EMBEDDING_NOT_FOUND",
            Self::CameraNotFound => "CAMERA_NOT_FOUND",
            Self::AttendanceNotFound => "ATTENDANCE_NOT_FOUND",
            Self::MissingData => "MISSING_DATA",
            Self::InvalidDateRange(_) => "INVALID_DATE_RANGE",
            Self::Internal(_) => "INTERNAL",
        }
    }
}

impl IntoResponse for AttendanceServiceError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::TeacherNotFound
            | Self::ClassNotFound
            | Self::StudentNotFound
            | Self::EmbeddingNotFound
            | Self::CameraNotFound
            | Self::AttendanceNotFound => StatusCode::NOT_FOUND,
            Self::MissingData | Self::InvalidDateRange(_) => StatusCode::BAD_REQUEST,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        error_response(status, self.kind(), self.to_string())
    }
}
