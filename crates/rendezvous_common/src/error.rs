// --- File: crates/rendezvous_common/src/error.rs ---
use std::fmt;
use thiserror::Error;

/// The error type surfaced at the edge of every Rendezvous crate.
///
/// Crate-local errors (store, scheduler) convert into this through `From`
/// so that handlers can return a single type.
#[derive(Error, Debug)]
pub enum RendezvousError {
    /// A request was rejected before any state was touched.
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// A referenced selection, party or meeting does not exist.
    #[error("Not found: {0}")]
    NotFoundError(String),

    /// The requested meeting collides with an existing booking.
    #[error("Conflict: {0}")]
    ConflictError(String),

    /// The backing store failed.
    #[error("Database error: {0}")]
    DatabaseError(String),

    /// Missing or invalid configuration.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Input could not be decoded.
    #[error("Failed to parse data: {0}")]
    ParseError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Maps an error onto the HTTP status returned to clients.
pub trait HttpStatusCode {
    fn status_code(&self) -> u16;
}

impl HttpStatusCode for RendezvousError {
    fn status_code(&self) -> u16 {
        match self {
            RendezvousError::ValidationError(_) => 400,
            RendezvousError::ParseError(_) => 400,
            RendezvousError::NotFoundError(_) => 404,
            RendezvousError::ConflictError(_) => 409,
            RendezvousError::DatabaseError(_) => 500,
            RendezvousError::ConfigError(_) => 500,
            RendezvousError::InternalError(_) => 500,
        }
    }
}

impl From<serde_json::Error> for RendezvousError {
    fn from(err: serde_json::Error) -> Self {
        RendezvousError::ParseError(err.to_string())
    }
}

impl From<chrono::ParseError> for RendezvousError {
    fn from(err: chrono::ParseError) -> Self {
        RendezvousError::ParseError(err.to_string())
    }
}

impl From<std::io::Error> for RendezvousError {
    fn from(err: std::io::Error) -> Self {
        RendezvousError::InternalError(err.to_string())
    }
}

pub fn config_error<T: fmt::Display>(message: T) -> RendezvousError {
    RendezvousError::ConfigError(message.to_string())
}

pub fn validation_error<T: fmt::Display>(message: T) -> RendezvousError {
    RendezvousError::ValidationError(message.to_string())
}

pub fn not_found<T: fmt::Display>(message: T) -> RendezvousError {
    RendezvousError::NotFoundError(message.to_string())
}

pub fn conflict<T: fmt::Display>(message: T) -> RendezvousError {
    RendezvousError::ConflictError(message.to_string())
}

pub fn database_error<T: fmt::Display>(message: T) -> RendezvousError {
    RendezvousError::DatabaseError(message.to_string())
}

pub fn internal_error<T: fmt::Display>(message: T) -> RendezvousError {
    RendezvousError::InternalError(message.to_string())
}
