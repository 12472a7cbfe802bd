//! DB Docs - Main entry point.

use clap::Parser;
use db_docs::config::Config;
use db_docs::db::ConnectionProvider;
use db_docs::output::OutputDir;
use db_docs::server::{AppState, HttpServer};
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Initialize the tracing subscriber for logging.
fn init_tracing(config: &Config) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    let subscriber = tracing_subscriber::registry().with(filter);

    if config.json_logs {
        subscriber.with(fmt::layer().json()).init();
    } else {
        subscriber
            .with(fmt::layer().with_target(true).with_thread_ids(false))
            .init();
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::parse();
    config.validate()?;

    init_tracing(&config);

    info!("Starting DB Docs v{}", env!("CARGO_PKG_VERSION"));

    let output = OutputDir::init(&config.output_dir)?;
    let provider = ConnectionProvider::new(config.connect_timeout_duration());
    let server = HttpServer::new(&config, AppState::new(provider, output));

    if let Err(e) = server.run().await {
        error!(error = %e, "Server error");
        return Err(e.into());
    }

    info!("Server shutdown complete");
    Ok(())
}
