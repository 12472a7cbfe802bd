//! Connection provider.
//!
//! Every schema request gets its own short-lived pool, sized so the column,
//! constraint and comment queries all hold a connection at once. The pool is
//! closed before the request's result is handed back, whether the pipeline
//! succeeded or not.

use crate::db::catalog::{CatalogProvider, PgCatalog};
use crate::error::{DocsError, DocsResult};
use crate::models::ConnectionConfig;
use sqlx::PgPool;
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use std::future::Future;
use std::time::Duration;
use tracing::{debug, info};

/// Connections per request: one per concurrently running data query.
///
/// The acquire timeout doubles as the connect timeout, so no data query may
/// ever queue behind another one for a connection.
pub const MAX_CONNECTIONS: u32 = 3;

#[derive(Debug, Clone, Copy)]
pub struct ConnectionProvider {
    connect_timeout: Duration,
}

impl ConnectionProvider {
    pub fn new(connect_timeout: Duration) -> Self {
        Self { connect_timeout }
    }

    pub fn connect_timeout(&self) -> Duration {
        self.connect_timeout
    }

    /// Open a pool for one request. The caller owns closing it.
    pub async fn open(&self, config: &ConnectionConfig) -> DocsResult<PgPool> {
        debug!(target_db = %config.target(), ssl = config.tls_required(), "Opening connection");
        self.connect(config.connect_options()).await
    }

    /// Open a pool from ready-made connect options.
    pub async fn connect(&self, options: PgConnectOptions) -> DocsResult<PgPool> {
        PgPoolOptions::new()
            .min_connections(0)
            .max_connections(MAX_CONNECTIONS)
            .acquire_timeout(self.connect_timeout)
            .connect_with(options)
            .await
            .map_err(|e| match e {
                sqlx::Error::Database(_) => DocsError::from(e),
                other => DocsError::connection(other.to_string(), connection_suggestion(&other)),
            })
    }
}

impl CatalogProvider for ConnectionProvider {
    type Catalog = PgCatalog;

    /// Run `f` against a catalog backed by a fresh pool, then close the pool.
    async fn with_catalog<F, Fut, T>(&self, config: &ConnectionConfig, f: F) -> DocsResult<T>
    where
        F: FnOnce(PgCatalog) -> Fut + Send,
        Fut: Future<Output = DocsResult<T>> + Send,
        T: Send,
    {
        let pool = self.open(config).await?;
        let result = f(PgCatalog::new(pool.clone())).await;
        pool.close().await;
        info!(target_db = %config.target(), ok = result.is_ok(), "Connection released");
        result
    }
}

fn connection_suggestion(err: &sqlx::Error) -> &'static str {
    match err {
        sqlx::Error::Io(_) => "Check that host and port are correct and the server is running",
        sqlx::Error::Tls(_) => "Verify the ssl flag matches the server's TLS configuration",
        sqlx::Error::PoolTimedOut => "The server did not answer in time; check network access",
        _ => "Check the connection parameters",
    }
}
