//! HTTP surface.
//!
//! One POST endpoint produces the documentation; an optional static directory
//! is served for every other path.

pub mod handler;

use crate::config::Config;
use crate::db::ConnectionProvider;
use crate::error::{DocsError, DocsResult};
use crate::output::OutputDir;
use axum::Router;
use axum::routing::post;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

/// State shared by all handlers. Holds no per-request data.
#[derive(Debug, Clone)]
pub struct AppState {
    pub provider: ConnectionProvider,
    pub output: OutputDir,
}

impl AppState {
    pub fn new(provider: ConnectionProvider, output: OutputDir) -> Self {
        Self { provider, output }
    }
}

/// Build the router.
pub fn router(state: Arc<AppState>, endpoint: &str, static_dir: Option<&Path>) -> Router {
    let mut app = Router::new().route(endpoint, post(handler::generate_docs));
    if let Some(dir) = static_dir {
        app = app.fallback_service(ServeDir::new(dir));
    }
    app.layer(TraceLayer::new_for_http()).with_state(state)
}

pub struct HttpServer {
    state: Arc<AppState>,
    host: String,
    port: u16,
    endpoint: String,
    static_dir: Option<PathBuf>,
}

impl HttpServer {
    pub fn new(config: &Config, state: AppState) -> Self {
        Self {
            state: Arc::new(state),
            host: config.http_host.clone(),
            port: config.http_port,
            endpoint: config.endpoint.clone(),
            static_dir: config.static_dir.clone(),
        }
    }

    /// Get the bind address.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Serve until SIGINT or SIGTERM.
    pub async fn run(&self) -> DocsResult<()> {
        let bind_addr = self.bind_addr();
        let app = router(
            self.state.clone(),
            &self.endpoint,
            self.static_dir.as_deref(),
        );

        let listener = TcpListener::bind(&bind_addr).await.map_err(|e| {
            DocsError::internal(format!("Failed to bind to {}: {}", bind_addr, e))
        })?;

        info!(
            addr = %bind_addr,
            endpoint = %self.endpoint,
            static_dir = ?self.static_dir,
            "Server is running"
        );

        axum::serve(listener, app)
            .with_graceful_shutdown(wait_for_signal())
            .await
            .map_err(|e| {
                error!(error = %e, "HTTP server error");
                DocsError::internal(format!("HTTP server error: {}", e))
            })?;

        info!("HTTP server stopped");
        Ok(())
    }
}

/// Wait for a shutdown signal (SIGINT or SIGTERM).
async fn wait_for_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!(error = %e, "Failed to listen for SIGINT");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received SIGINT"),
        _ = terminate => info!("Received SIGTERM"),
    }
}
