use anyhow::{Context as _, anyhow};
use sea_orm::ConnectOptions;
use serde::Deserialize;
use url::Url;

use facecheck_core::config::Config;

/// Attendance service configuration loaded from environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct AttendanceConfig {
    /// Full connection URL. When set, the `DB_*` parts are ignored.
    #[serde(default)]
    pub database_url: Option<String>,
    #[serde(default = "default_db_host")]
    pub db_host: String,
    #[serde(default = "default_db_port")]
    pub db_port: u16,
    #[serde(default = "default_db_user")]
    pub db_user: String,
    #[serde(default)]
    pub db_password: String,
    #[serde(default = "default_db_name")]
    pub db_name: String,
    /// Pool size (default 1: every request shares one connection).
    #[serde(default = "default_db_max_connections")]
    pub db_max_connections: u32,
    /// TCP port for the HTTP server (default 8000). Env var: `ATTENDANCE_PORT`.
    #[serde(default = "default_attendance_port")]
    pub attendance_port: u16,
    /// Comma-separated browser origins allowed by CORS.
    #[serde(default = "default_cors_allowed_origins")]
    pub cors_allowed_origins: Vec<String>,
}

fn default_db_host() -> String {
    "localhost".to_owned()
}

fn default_db_port() -> u16 {
    5432
}

fn default_db_user() -> String {
    "postgres".to_owned()
}

fn default_db_name() -> String {
    "ai_attendance".to_owned()
}

fn default_db_max_connections() -> u32 {
    1
}

fn default_attendance_port() -> u16 {
    8000
}

fn default_cors_allowed_origins() -> Vec<String> {
    vec![
        "http://localhost:3000".to_owned(),
        "http://localhost:5173".to_owned(),
    ]
}

impl Config for AttendanceConfig {}

impl AttendanceConfig {
    /// Connection URL: `DATABASE_URL` verbatim, or one assembled from the
    /// `DB_*` parts with user and password percent-encoded.
    pub fn database_url(&self) -> anyhow::Result<String> {
        if let Some(url) = &self.database_url {
            return Ok(url.clone());
        }
        let mut url = Url::parse("postgres://localhost").context("postgres url template")?;
        url.set_host(Some(&self.db_host))
            .with_context(|| format!("invalid DB_HOST {:?}", self.db_host))?;
        url.set_port(Some(self.db_port))
            .map_err(|()| anyhow!("DB_PORT cannot be applied"))?;
        url.set_username(&self.db_user)
            .map_err(|()| anyhow!("DB_USER cannot be applied"))?;
        url.set_password(Some(&self.db_password))
            .map_err(|()| anyhow!("DB_PASSWORD cannot be applied"))?;
        url.set_path(&self.db_name);
        Ok(url.into())
    }

    pub fn connect_options(&self) -> anyhow::Result<ConnectOptions> {
        let mut options = ConnectOptions::new(self.database_url()?);
        options
            .max_connections(self.db_max_connections)
            .min_connections(0)
            .sqlx_logging(false);
        Ok(options)
    }
}
