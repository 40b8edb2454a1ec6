//! Error types for the schedule store

use thiserror::Error;

/// Errors raised by the database client and the repositories built on it.
#[derive(Debug, Error)]
pub enum DbError {
    #[error("Database error: {0}")]
    SqlxError(#[from] sqlx::Error),

    #[error("Database configuration error: {0}")]
    ConfigError(String),

    #[error("Database URL error: {0}")]
    UrlError(String),

    #[error("Database pool error: {0}")]
    PoolError(String),

    #[error("Database query error: {0}")]
    QueryError(String),

    #[error("Database transaction error: {0}")]
    TransactionError(String),

    /// A stored value could not be turned back into a domain record.
    #[error("Database decode error: {0}")]
    DecodeError(String),
}

impl From<DbError> for rendezvous_common::RendezvousError {
    fn from(err: DbError) -> Self {
        rendezvous_common::database_error(err)
    }
}
