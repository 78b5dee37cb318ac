use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// Common application error variants.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{0}")]
    BadRequest(String),
    #[error("not found")]
    NotFound,
    #[error("{:#}", .0)]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::BadRequest(_) => "BAD_REQUEST",
            Self::NotFound => "NOT_FOUND",
            Self::Internal(_) => "INTERNAL",
        }
    }
}

/// Build the `{ "kind", "message" }` error envelope used by every service.
///
/// 500s are logged here; tower-http `TraceLayer` already records method, uri
/// and status for all requests, so 4xx are not logged again.
pub fn error_response(status: StatusCode, kind: &'static str, message: String) -> Response {
    if status.is_server_error() {
        tracing::error!(error = %message, kind, "internal error");
    }
    let body = serde_json::json!({
        "kind": kind,
        "message": message,
    });
    (status, axum::Json(body)).into_response()
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        error_response(status, self.kind(), self.to_string())
    }
}
