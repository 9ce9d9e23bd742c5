//! Structured error types for pollfinder-core.
//!
//! The HTTP layer maps these onto status codes; the binary wraps them in
//! `anyhow` at startup.

use thiserror::Error;

use crate::models::ValidationError;

/// Failure reported by a [`PollStore`](crate::store::PollStore) backend.
///
/// Backends flatten their driver errors into a message so the domain does
/// not depend on any particular driver crate.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// Query, update or connection failure in the backend
    #[error("{message}")]
    Backend { message: String },

    /// A stored document could not be read as a poll record
    #[error("malformed poll record: {reason}")]
    Decode { reason: String },
}

impl StoreError {
    /// Create a backend error from any displayable driver error
    pub fn backend(err: impl std::fmt::Display) -> Self {
        Self::Backend {
            message: err.to_string(),
        }
    }

    /// Create a decode error
    pub fn decode(reason: impl Into<String>) -> Self {
        Self::Decode {
            reason: reason.into(),
        }
    }
}

/// Main error type for poll review operations
#[derive(Error, Debug)]
pub enum PollError {
    /// Missing or malformed request fields
    #[error(transparent)]
    InvalidArgument(#[from] ValidationError),

    /// No record carries the requested external id
    #[error("poll '{id}' not found")]
    NotFound { id: String },

    /// Underlying store I/O or query error
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Result type alias for poll review operations
pub type Result<T> = std::result::Result<T, PollError>;

impl PollError {
    /// Create a not-found error for the given external id
    pub fn not_found(id: impl Into<String>) -> Self {
        Self::NotFound { id: id.into() }
    }
}
