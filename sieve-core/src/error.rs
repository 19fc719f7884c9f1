//! Error types for Sieve.
//!
//! This module provides a structured error hierarchy using `thiserror`:
//!
//! - [`SieveError`] - Top-level error type for all Sieve operations
//! - [`MatchError`] - Errors raised by a terminal match call
//! - [`ValueError`] - Errors from typed extraction out of a [`Value`]
//!
//! Guards and handlers are never wrapped: a panicking predicate unwinds
//! through the engine untouched, and a handler's own error values are simply
//! part of its return type.
//!
//! [`Value`]: crate::Value

use crate::values::Kind;
use thiserror::Error;

/// A boxed error type for dynamic error handling.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Top-level error type for all Sieve operations.
#[derive(Error, Debug)]
pub enum SieveError {
    /// A terminal match call failed.
    #[error("match error: {0}")]
    Match(#[from] MatchError),

    /// A typed extraction failed.
    #[error("value error: {0}")]
    Value(#[from] ValueError),

    /// A custom error occurred.
    #[error(transparent)]
    Custom(BoxError),
}

/// Errors that can occur when a match session is evaluated.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MatchError {
    /// Every clause was evaluated, none matched, and no fallback was set.
    #[error("no clause matched {value} ({clauses} clauses evaluated)")]
    NoMatch {
        /// Rendering of the captured value.
        value: String,
        /// Number of clauses that were tried.
        clauses: usize,
    },
}

impl MatchError {
    /// Returns true if this is a [`MatchError::NoMatch`].
    pub fn is_no_match(&self) -> bool {
        matches!(self, MatchError::NoMatch { .. })
    }
}

/// Errors that can occur when decoding a [`Value`](crate::Value) into a Rust type.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValueError {
    /// The value had a different shape than the target type needs.
    #[error("expected {expected:?}, found {found:?}")]
    TypeMismatch {
        /// Kinds the target type accepts.
        expected: Kind,
        /// Kind of the value that was given.
        found: Kind,
    },

    /// A record did not contain the requested key.
    #[error("missing key: {0}")]
    MissingKey(String),

    /// A number did not fit the target integer type.
    #[error("number {0} is out of range for {1}")]
    OutOfRange(f64, &'static str),
}

// Convenience conversions
impl From<BoxError> for SieveError {
    fn from(err: BoxError) -> Self {
        SieveError::Custom(err)
    }
}
