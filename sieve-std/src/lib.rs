//! # sieve-std
//!
//! Standard implementations for the Sieve pattern-matching engine.
//!
//! This crate provides:
//! - **Match sessions**: [`match_value`] and the [`Match`] builder
//! - **Event dispatch**: [`Dispatcher`] and [`Connection`]
//! - **Testing utilities**: [`testing::CountingHandler`], [`testing::RecordingHandler`]
//!
//! With the `tracing` feature, clause selection and dispatcher activity are
//! reported through `tracing` events.

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

// Re-export core types
pub use sieve_core;

// Modules
pub mod dispatcher;
pub mod session;
pub mod testing;

pub use dispatcher::{Connection, Dispatcher};
pub use session::{Match, match_value};
