//! Error types for the DB docs service.
//!
//! All failures funnel into [`DocsError`]. The HTTP layer only distinguishes
//! validation failures (400) from everything else (500); the body is always a
//! single `message` string.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DocsError {
    #[error("Invalid input: {message}")]
    InvalidInput { message: String },

    #[error("Connection failed: {message}")]
    Connection { message: String, suggestion: String },

    #[error("Database error: {message}")]
    Database {
        message: String,
        /// e.g., "42P01" for undefined table
        sql_state: Option<String>,
        suggestion: String,
    },

    #[error("Render error: {message}")]
    Render { message: String },

    #[error("I/O error: {message} (path: {path})")]
    Io { message: String, path: String },

    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl DocsError {
    /// Create an invalid input error.
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }

    /// Create a connection error with a helpful suggestion.
    pub fn connection(message: impl Into<String>, suggestion: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
            suggestion: suggestion.into(),
        }
    }

    /// Create a database error with optional SQL state.
    pub fn database(
        message: impl Into<String>,
        sql_state: Option<String>,
        suggestion: impl Into<String>,
    ) -> Self {
        Self::Database {
            message: message.into(),
            sql_state,
            suggestion: suggestion.into(),
        }
    }

    /// Create a document rendering error.
    pub fn render(message: impl Into<String>) -> Self {
        Self::Render {
            message: message.into(),
        }
    }

    /// Create an I/O error tied to a filesystem path.
    pub fn io(err: &std::io::Error, path: impl AsRef<std::path::Path>) -> Self {
        Self::Io {
            message: err.to_string(),
            path: path.as_ref().display().to_string(),
        }
    }

    /// Create an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// The bare message reported to clients, without the variant prefix.
    pub fn message(&self) -> &str {
        match self {
            Self::InvalidInput { message }
            | Self::Connection { message, .. }
            | Self::Database { message, .. }
            | Self::Render { message }
            | Self::Io { message, .. }
            | Self::Internal { message } => message,
        }
    }

    /// Get the suggestion for this error, if available.
    pub fn suggestion(&self) -> Option<&str> {
        match self {
            Self::Connection { suggestion, .. } => Some(suggestion),
            Self::Database { suggestion, .. } => Some(suggestion),
            _ => None,
        }
    }

    /// HTTP status for this error: 400 for validation, 500 for the rest.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidInput { .. } => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Convert sqlx errors to DocsError.
impl From<sqlx::Error> for DocsError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::Configuration(msg) => DocsError::connection(
                msg.to_string(),
                "Check the connection parameters and credentials",
            ),
            sqlx::Error::Database(db_err) => {
                let code = db_err.code().map(|c| c.to_string());
                DocsError::database(
                    db_err.message(),
                    code,
                    "Check that the schema exists and the user may read its catalog",
                )
            }
            sqlx::Error::RowNotFound => DocsError::database(
                "No rows returned",
                None,
                "Verify the schema name is spelled correctly",
            ),
            sqlx::Error::PoolTimedOut => DocsError::connection(
                "Timed out while acquiring a database connection",
                "Check that the database server is reachable",
            ),
            sqlx::Error::PoolClosed => DocsError::connection(
                "Connection pool is closed",
                "Retry the request",
            ),
            sqlx::Error::Io(io_err) => DocsError::connection(
                io_err.to_string(),
                "Check network connectivity and database server status",
            ),
            sqlx::Error::Tls(tls_err) => DocsError::connection(
                tls_err.to_string(),
                "Verify the ssl flag matches the server's TLS configuration",
            ),
            sqlx::Error::Protocol(msg) => DocsError::connection(
                msg,
                "Check database server compatibility",
            ),
            sqlx::Error::ColumnNotFound(col) => {
                DocsError::internal(format!("Column not found in catalog row: {}", col))
            }
            sqlx::Error::ColumnDecode { index, source } => {
                DocsError::internal(format!("Failed to decode column {}: {}", index, source))
            }
            sqlx::Error::Decode(source) => DocsError::internal(format!("Decode error: {}", source)),
            sqlx::Error::WorkerCrashed => DocsError::internal("Database worker crashed"),
            _ => DocsError::internal(err.to_string()),
        }
    }
}

/// Result type alias for service operations.
pub type DocsResult<T> = Result<T, DocsError>;

impl IntoResponse for DocsError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(serde_json::json!({ "message": self.message() }));
        (status, body).into_response()
    }
}
