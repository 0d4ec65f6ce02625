//! Domain error model.

use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Deterministic failures only: parsing identifiers, codes and dates coming
/// from forms or the wire.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// An identifier was invalid (e.g. parse failure).
    #[error("invalid identifier: {0}")]
    InvalidId(String),

    /// A genre code outside the fixed enumeration.
    #[error("unknown genre code: {0}")]
    UnknownGenre(i64),

    /// A date string that is not `YYYY-MM-DD` (optionally followed by a time).
    #[error("invalid date: {0}")]
    InvalidDate(String),
}

impl DomainError {
    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }

    pub fn invalid_date(msg: impl Into<String>) -> Self {
        Self::InvalidDate(msg.into())
    }
}
