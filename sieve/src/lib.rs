//! # sieve - Runtime Pattern Matching
//!
//! `sieve` tests a runtime [`Value`] against an ordered list of declarative
//! patterns and runs the handler of the first one that matches.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use sieve::prelude::*;
//!
//! let input = value!({
//!     "type" => "ok",
//!     "data" => value!({ "type" => "text", "content" => "hello" }),
//! });
//!
//! let content = match_value(input)
//!     .with(pattern!({ "type" => "error" }), |_| "failed".to_string())
//!     .with(
//!         pattern!({ "type" => "ok", "data" => pattern!({ "content" => select("content") }) }),
//!         |picked| picked["content"].to_string(),
//!     )
//!     .exhaustive()?;
//! ```
//!
//! ## Pieces
//!
//! - [`Value`] - the dynamically shaped datum being classified
//! - [`Pattern`] and its primitives [`__`], [`select`], [`when`], [`kind`],
//!   [`any_of`], [`not`]
//! - [`match_value`] / [`Match`] - the fluent, first-match-wins builder
//! - [`is_match`] / [`extract_bindings`] - the matcher on its own
//! - [`Dispatcher`] - a small synchronous event for composing with matches
//!
//! ## Features
//!
//! - `macros` - re-export `#[derive(IntoValue)]`
//! - `tracing` - emit `tracing` events for clause selection and dispatch

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

pub use sieve_core::{
    // Patterns
    __,
    // Errors
    BoxError,
    // Matcher
    Bindings,
    // Extraction
    FromValue,
    Guard,
    // Values
    Kind,
    MatchError,
    Pattern,
    Record,
    SieveError,
    Truthy,
    Value,
    ValueError,
    any_of,
    extract_bindings,
    is_match,
    kind,
    not,
    pattern,
    select,
    value,
    when,
};

// Match sessions and dispatch
pub use sieve_std::{Connection, Dispatcher, Match, match_value};

/// Testing utilities.
pub mod testing {
    pub use sieve_std::testing::{CountingHandler, RecordingHandler};
}

/// Prelude module - common imports for Sieve.
///
/// # Usage
///
/// ```rust,ignore
/// use sieve::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{
        __, FromValue, Kind, Match, MatchError, Pattern, Value, ValueError, any_of, kind,
        match_value, not, pattern, select, value, when,
    };
}

#[cfg(feature = "macros")]
pub use sieve_macros::IntoValue;
