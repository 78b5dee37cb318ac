use anyhow::Context as _;
use tracing::info;

use facecheck_attendance::config::AttendanceConfig;
use facecheck_attendance::infra::db::ConnectionManager;
use facecheck_attendance::router::build_router;
use facecheck_attendance::state::AppState;
use facecheck_core::config::Config;
use facecheck_core::tracing::init_tracing;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let config = AttendanceConfig::from_env();

    let conn = ConnectionManager::new(config.connect_options()?);
    if !conn.connect().await {
        tracing::warn!("database unavailable at startup; will retry on first request");
    }

    let state = AppState::new(conn.clone());
    let router = build_router(state, &config.cors_allowed_origins);

    let http_addr = format!("0.0.0.0:{}", config.attendance_port);
    let listener = tokio::net::TcpListener::bind(&http_addr)
        .await
        .with_context(|| format!("bind {http_addr}"))?;

    info!("attendance service listening on {http_addr}");
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("http server")?;

    conn.disconnect().await;
    info!("attendance service stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %err, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                tracing::error!(error = %err, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    info!("shutdown signal received");
}
