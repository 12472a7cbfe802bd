//! Configuration handling for the DB docs service.
//!
//! All settings come from CLI arguments, each with an environment variable
//! fallback. Database connection parameters are NOT configured here; they
//! arrive with every request.

use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_HTTP_HOST: &str = "127.0.0.1";
pub const DEFAULT_HTTP_PORT: u16 = 3000;
pub const DEFAULT_ENDPOINT: &str = "/db-docs";
pub const DEFAULT_OUTPUT_DIR: &str = "out";
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

/// Configuration for the DB docs service.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "db-docs",
    about = "Introspects PostgreSQL schemas and renders them as JSON or a Word document",
    version,
    author
)]
pub struct Config {
    /// HTTP host to bind to
    #[arg(long, default_value = DEFAULT_HTTP_HOST, env = "DB_DOCS_HTTP_HOST")]
    pub http_host: String,

    /// HTTP port to bind to
    #[arg(long, default_value_t = DEFAULT_HTTP_PORT, env = "DB_DOCS_HTTP_PORT")]
    pub http_port: u16,

    /// Path of the documentation endpoint
    #[arg(long, default_value = DEFAULT_ENDPOINT, env = "DB_DOCS_ENDPOINT")]
    pub endpoint: String,

    /// Directory for temporary document artifacts (created at startup)
    #[arg(long, default_value = DEFAULT_OUTPUT_DIR, env = "DB_DOCS_OUTPUT_DIR")]
    pub output_dir: PathBuf,

    /// Optional directory of static files served for unmatched routes
    #[arg(long, env = "DB_DOCS_STATIC_DIR")]
    pub static_dir: Option<PathBuf>,

    /// Connection acquire timeout in seconds
    #[arg(
        long,
        default_value_t = DEFAULT_CONNECT_TIMEOUT_SECS,
        env = "DB_DOCS_CONNECT_TIMEOUT"
    )]
    pub connect_timeout: u64,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info", env = "DB_DOCS_LOG_LEVEL")]
    pub log_level: String,

    /// Enable JSON logging format
    #[arg(long, env = "DB_DOCS_JSON_LOGS")]
    pub json_logs: bool,
}

impl Config {
    /// Create a default configuration (useful for testing).
    pub fn default_config() -> Self {
        Self {
            http_host: DEFAULT_HTTP_HOST.to_string(),
            http_port: DEFAULT_HTTP_PORT,
            endpoint: DEFAULT_ENDPOINT.to_string(),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            static_dir: None,
            connect_timeout: DEFAULT_CONNECT_TIMEOUT_SECS,
            log_level: "info".to_string(),
            json_logs: false,
        }
    }

    /// Check values clap cannot express on its own.
    pub fn validate(&self) -> Result<(), String> {
        if !self.endpoint.starts_with('/') {
            return Err(format!(
                "endpoint must start with '/', got '{}'",
                self.endpoint
            ));
        }
        if self.http_port == 0 {
            return Err("http_port must be greater than 0".to_string());
        }
        if self.connect_timeout == 0 {
            return Err("connect_timeout must be greater than 0".to_string());
        }
        Ok(())
    }

    /// Get the HTTP bind address.
    pub fn http_bind_addr(&self) -> String {
        format!("{}:{}", self.http_host, self.http_port)
    }

    /// Get the connection timeout as a Duration.
    pub fn connect_timeout_duration(&self) -> Duration {
        Duration::from_secs(self.connect_timeout)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::default_config()
    }
}
