//! Metadata store error types.

use thiserror::Error;

/// Result type for metadata store operations.
pub type DbResult<T> = Result<T, DbError>;

/// Errors that can occur during metadata store operations.
#[derive(Debug, Error)]
pub enum DbError {
    #[error("Failed to configure database client: {0}")]
    ConfigError(String),

    #[error("Failed to connect to database: {0}")]
    ConnectFailed(String),

    #[error("Query failed: {0}")]
    QueryFailed(String),

    #[error("Failed to decode document: {0}")]
    DecodeFailed(String),
}

impl DbError {
    pub fn config_error(msg: impl Into<String>) -> Self {
        Self::ConfigError(msg.into())
    }

    pub fn query_failed(msg: impl Into<String>) -> Self {
        Self::QueryFailed(msg.into())
    }
}
