use axum::{Json, extract::State};
use serde::Serialize;

use facecheck_core::health::HealthReport;

use crate::state::AppState;

#[derive(Serialize)]
pub struct RootResponse {
    pub message: &'static str,
    pub status: &'static str,
}

// ── GET / ────────────────────────────────────────────────────────────────────

pub async fn root() -> Json<RootResponse> {
    Json(RootResponse {
        message: "Attendance System API",
        status: "running",
    })
}

// ── GET /api/health ──────────────────────────────────────────────────────────

/// Database-aware probe. Always 200; the body carries the verdict.
pub async fn health(State(state): State<AppState>) -> Json<HealthReport> {
    let status = state.conn.status().await;
    Json(HealthReport::from(&status))
}
