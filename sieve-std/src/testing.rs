//! Testing utilities for Sieve.
//!
//! This module provides helpers for asserting which clause of a match
//! session fired, and with what argument.
//!
//! # Features
//!
//! - [`CountingHandler`]: counts how many of its handlers were invoked
//! - [`RecordingHandler`]: records every value handed to its handlers

use sieve_core::Value;
use std::sync::{
    Arc, Mutex, PoisonError,
    atomic::{AtomicUsize, Ordering},
};

// ============================================================================
// Counting Handler
// ============================================================================

/// A handler factory that counts invocations.
///
/// # Example
///
/// ```rust,ignore
/// let counter = CountingHandler::new();
///
/// match_value(1)
///     .with(1, counter.handler("one"))
///     .with(__, counter.handler("other"))
///     .run()?;
///
/// assert_eq!(counter.count(), 1);
/// ```
#[derive(Clone, Default)]
pub struct CountingHandler {
    count: Arc<AtomicUsize>,
}

impl CountingHandler {
    /// Create a new counting handler.
    pub fn new() -> Self {
        Self::default()
    }

    /// A handler that bumps the counter and returns `output`.
    pub fn handler<R>(&self, output: R) -> impl FnOnce(Value) -> R + use<R> {
        let count = self.count.clone();
        move |_| {
            count.fetch_add(1, Ordering::SeqCst);
            output
        }
    }

    /// Get the current count.
    pub fn count(&self) -> usize {
        self.count.load(Ordering::SeqCst)
    }

    /// Reset the counter.
    pub fn reset(&self) {
        self.count.store(0, Ordering::SeqCst);
    }
}

// ============================================================================
// Recording Handler
// ============================================================================

/// A handler factory that records the values its handlers receive.
///
/// Each handler is tagged with a label so tests can tell clauses apart.
#[derive(Clone, Default)]
pub struct RecordingHandler {
    calls: Arc<Mutex<Vec<(&'static str, Value)>>>,
}

impl RecordingHandler {
    /// Create a new recording handler.
    pub fn new() -> Self {
        Self::default()
    }

    /// A handler that records `(label, argument)` and returns `label`.
    pub fn handler(&self, label: &'static str) -> impl FnOnce(Value) -> &'static str + use<> {
        let calls = self.calls.clone();
        move |value| {
            calls
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .push((label, value));
            label
        }
    }

    /// Get a clone of the recorded calls.
    pub fn calls(&self) -> Vec<(&'static str, Value)> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Labels of the recorded calls, in call order.
    pub fn labels(&self) -> Vec<&'static str> {
        self.calls().into_iter().map(|(label, _)| label).collect()
    }

    /// Get the number of recorded calls.
    pub fn count(&self) -> usize {
        self.calls.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    /// Clear all recorded calls.
    pub fn clear(&self) {
        self.calls.lock().unwrap_or_else(PoisonError::into_inner).clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::match_value;
    use sieve_core::__;

    #[test]
    fn test_counting_handler_counts_selected_clause_only() {
        let counter = CountingHandler::new();
        let result = match_value(1)
            .with(1, counter.handler("one"))
            .with(__, counter.handler("other"))
            .run();
        assert_eq!(result, Ok("one"));
        assert_eq!(counter.count(), 1);
        counter.reset();
        assert_eq!(counter.count(), 0);
    }

    #[test]
    fn test_recording_handler_captures_argument() {
        let recorder = RecordingHandler::new();
        match_value("hi")
            .with(1, recorder.handler("number"))
            .with(__, recorder.handler("any"))
            .run()
            .unwrap();
        assert_eq!(recorder.calls(), vec![("any", Value::from("hi"))]);
        recorder.clear();
        assert_eq!(recorder.count(), 0);
    }
}
