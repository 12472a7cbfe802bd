//! Connection-related data models.
//!
//! A [`ConnectionConfig`] arrives with every request and lives only for that
//! request; it is never stored.

use serde::Deserialize;
use sqlx::postgres::{PgConnectOptions, PgSslMode};

/// Application name reported to the server in `pg_stat_activity`.
const APPLICATION_NAME: &str = "db-docs";

/// Connection parameters for one PostgreSQL database.
#[derive(Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConnectionConfig {
    pub host: String,
    /// A JSON number in `0..=65535`; numeric strings such as `"5432"` are rejected.
    pub port: u16,
    pub user: String,
    /// Contains sensitive data - never log
    pub password: String,
    pub database: String,
    /// `Some(true)` requires TLS; absent or `false` connects in plain text.
    #[serde(default)]
    pub ssl: Option<bool>,
}

impl ConnectionConfig {
    /// Create a new connection configuration without TLS.
    pub fn new(
        host: impl Into<String>,
        port: u16,
        user: impl Into<String>,
        password: impl Into<String>,
        database: impl Into<String>,
    ) -> Self {
        Self {
            host: host.into(),
            port,
            user: user.into(),
            password: password.into(),
            database: database.into(),
            ssl: None,
        }
    }

    /// Set the TLS flag.
    pub fn with_ssl(mut self, ssl: bool) -> Self {
        self.ssl = Some(ssl);
        self
    }

    /// Whether TLS is required for this connection.
    pub fn tls_required(&self) -> bool {
        self.ssl.unwrap_or(false)
    }

    /// Build driver connect options from these parameters.
    pub fn connect_options(&self) -> PgConnectOptions {
        let ssl_mode = if self.tls_required() {
            PgSslMode::Require
        } else {
            PgSslMode::Disable
        };

        PgConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .username(&self.user)
            .password(&self.password)
            .database(&self.database)
            .ssl_mode(ssl_mode)
            .application_name(APPLICATION_NAME)
    }

    /// Display-safe target description (no credentials).
    pub fn target(&self) -> String {
        format!("{}:{}/{}", self.host, self.port, self.database)
    }
}

impl std::fmt::Debug for ConnectionConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConnectionConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("user", &self.user)
            .field("password", &"****")
            .field("database", &self.database)
            .field("ssl", &self.ssl)
            .finish()
    }
}
