//! # sieve-core
//!
//! Core value model, patterns and matcher for the Sieve pattern-matching
//! engine.
//!
//! This crate has minimal dependencies and is designed to be imported by
//! code that only needs to describe or test shapes, without the fluent
//! match builder from `sieve-std`.
//!
//! # Building Blocks
//!
//! ## [`Value`]
//!
//! The dynamically shaped datum being classified: a primitive, an ordered
//! list, or a string-keyed record. Values are never mutated by matching.
//!
//! ## [`Pattern`]
//!
//! A closed set of shape descriptions: literals, partial records, positional
//! lists, the [`__`] wildcard, [`select`]ors, [`when`] guards, numeric sets
//! and ranges, typed wildcards, unions and negation.
//!
//! ## Matcher ([`is_match`], [`extract_bindings`])
//!
//! One recursive, depth-first function that decides match/no-match and
//! collects selector captures into [`Bindings`].
//!
//! ## Extraction ([`FromValue`])
//!
//! Decodes matched values into Rust types inside handlers.
//!
//! # Error Types
//!
//! - [`SieveError`] - Top-level error type
//! - [`MatchError`] - Terminal match failures
//! - [`ValueError`] - Extraction failures

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

mod error;
mod extract;
mod macros;
mod matcher;
mod patterns;
mod values;

// Re-exports
pub use error::{BoxError, MatchError, SieveError, ValueError};
pub use extract::FromValue;
pub use matcher::{Bindings, extract_bindings, is_match};
pub use patterns::{__, Guard, Pattern, Truthy, any_of, kind, not, select, when};
pub use values::{Kind, Record, Value};
