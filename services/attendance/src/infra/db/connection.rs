//! Lazily established, reconnecting database handle shared by every repository.

use std::sync::Arc;

use sea_orm::{
    ConnectOptions, ConnectionTrait, Database, DatabaseConnection, DbBackend, DbErr,
    FromQueryResult, StatementBuilder,
};
use tokio::sync::RwLock;
use tracing::{error, info, warn};

use facecheck_core::health::DatabaseStatus;

/// Result of a write statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WriteOutcome {
    pub rows_affected: u64,
    /// Generated key of the last inserted row. Always `None` on PostgreSQL,
    /// which only reports keys through `RETURNING`.
    pub last_insert_id: Option<u64>,
}

/// Cloneable handle to one database connection (pool).
///
/// Built once in `main` and cloned into each repository. The connection is
/// opened on first use and reopened after [`disconnect`](Self::disconnect).
#[derive(Clone)]
pub struct ConnectionManager {
    inner: Arc<Inner>,
}

struct Inner {
    options: Option<ConnectOptions>,
    conn: RwLock<Option<DatabaseConnection>>,
}

impl ConnectionManager {
    pub fn new(options: ConnectOptions) -> Self {
        Self {
            inner: Arc::new(Inner {
                options: Some(options),
                conn: RwLock::new(None),
            }),
        }
    }

    /// Wrap an already open connection. Cannot reconnect once disconnected.
    pub fn from_connection(db: DatabaseConnection) -> Self {
        Self {
            inner: Arc::new(Inner {
                options: None,
                conn: RwLock::new(Some(db)),
            }),
        }
    }

    /// Open the connection if it is not open yet. Failures are logged, not returned.
    pub async fn connect(&self) -> bool {
        match self.connection().await {
            Ok(_) => true,
            Err(e) => {
                error!(error = %e, "database connection failed");
                false
            }
        }
    }

    /// Return the open connection, reconnecting on demand.
    pub async fn connection(&self) -> Result<DatabaseConnection, DbErr> {
        if let Some(db) = self.inner.conn.read().await.as_ref() {
            return Ok(db.clone());
        }

        let mut guard = self.inner.conn.write().await;
        if let Some(db) = guard.as_ref() {
            return Ok(db.clone());
        }
        let options = self
            .inner
            .options
            .clone()
            .ok_or_else(|| DbErr::Custom("database connection closed".to_owned()))?;
        let db = Database::connect(options).await?;
        info!(backend = ?db.get_database_backend(), "database connected");
        *guard = Some(db.clone());
        Ok(db)
    }

    /// Close the connection. No-op when already closed.
    pub async fn disconnect(&self) {
        let taken = self.inner.conn.write().await.take();
        if let Some(db) = taken {
            match db.close().await {
                Ok(()) => info!("database disconnected"),
                Err(e) => warn!(error = %e, "error while closing database connection"),
            }
        }
    }

    /// Probe the current connection without opening a new one.
    pub async fn status(&self) -> DatabaseStatus {
        let db = self.inner.conn.read().await.clone();
        match db {
            None => DatabaseStatus::Disconnected,
            Some(db) => match db.ping().await {
                Ok(()) => DatabaseStatus::Connected,
                Err(e) => {
                    warn!(error = %e, "database ping failed");
                    DatabaseStatus::Error(e.to_string())
                }
            },
        }
    }

    /// Run a read statement and map every row into `T`.
    pub async fn execute_query<T, S>(&self, statement: &S) -> Result<Vec<T>, DbErr>
    where
        T: FromQueryResult,
        S: StatementBuilder,
    {
        let db = self.connection().await?;
        let stmt = db.get_database_backend().build(statement);
        T::find_by_statement(stmt).all(&db).await
    }

    /// Run a write statement in its own implicit transaction.
    pub async fn execute_update<S>(&self, statement: &S) -> Result<WriteOutcome, DbErr>
    where
        S: StatementBuilder,
    {
        let db = self.connection().await?;
        let backend = db.get_database_backend();
        let result = db.execute(backend.build(statement)).await?;
        let last_insert_id = match backend {
            DbBackend::Postgres => None,
            DbBackend::MySql | DbBackend::Sqlite => Some(result.last_insert_id()),
        };
        Ok(WriteOutcome {
            rows_affected: result.rows_affected(),
            last_insert_id,
        })
    }
}
