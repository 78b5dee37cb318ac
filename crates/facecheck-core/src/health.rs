use axum::http::StatusCode;
use serde::Serialize;

/// Handler for `GET /healthz`: process liveness only.
pub async fn healthz() -> StatusCode {
    StatusCode::OK
}

/// Observed state of the database handle at the time of a health probe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatabaseStatus {
    Connected,
    Disconnected,
    Error(String),
}

/// Body of a database-aware health probe.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HealthReport {
    pub status: &'static str,
    pub database: &'static str,
}

impl From<&DatabaseStatus> for HealthReport {
    fn from(db: &DatabaseStatus) -> Self {
        match db {
            DatabaseStatus::Connected => Self {
                status: "healthy",
                database: "connected",
            },
            DatabaseStatus::Disconnected => Self {
                status: "unhealthy",
                database: "disconnected",
            },
            DatabaseStatus::Error(_) => Self {
                status: "unhealthy",
                database: "error",
            },
        }
    }
}
