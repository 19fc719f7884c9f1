//! # Match Sessions
//!
//! [`match_value`] captures a value and returns a [`Match`] builder. Clauses
//! are appended in registration order; a terminal call ([`Match::run`] or
//! [`Match::exhaustive`]) evaluates them first-to-last and invokes the handler
//! of the first clause whose pattern and guard both succeed.
//!
//! ```rust,ignore
//! let result = match_value(13)
//!     .with(1, |_| "one")
//!     .number_set([2, 3, 5, 7, 11], |_| "prime")
//!     .number_range(13..=19, |_| "teen")
//!     .otherwise(|_| "boring")
//!     .run()?;
//! ```
//!
//! # Single Use
//!
//! Every chained call and every terminal call takes the session by value. A
//! consumed session no longer exists, so evaluating it twice is rejected by
//! the compiler rather than at runtime.
//!
//! # Handler Arguments
//!
//! Handlers receive the captured value unchanged, unless the matching pattern
//! captured [selectors](sieve_core::select): then they receive a record that
//! holds exactly the selections, keyed by selector name.

use sieve_core::{MatchError, Pattern, Truthy, Value, extract_bindings};
use std::{fmt, ops::RangeInclusive};

type BoxHandler<'a, R> = Box<dyn FnOnce(Value) -> R + 'a>;
type BoxPredicate<'a> = Box<dyn Fn(&Value) -> bool + 'a>;

struct Clause<'a, R> {
    pattern: Pattern,
    guard: Option<BoxPredicate<'a>>,
    handler: BoxHandler<'a, R>,
}

/// Start a match session over `value`.
pub fn match_value<'a, R>(value: impl Into<Value>) -> Match<'a, R> {
    Match::new(value)
}

/// A match session: one captured value and its ordered clauses.
///
/// `'a` bounds the handlers and predicates, which may borrow from the
/// caller's scope. `R` is the result type shared by every handler.
pub struct Match<'a, R> {
    value: Value,
    clauses: Vec<Clause<'a, R>>,
    fallback: Option<BoxHandler<'a, R>>,
}

impl<'a, R> Match<'a, R> {
    /// Create a session with no clauses.
    pub fn new(value: impl Into<Value>) -> Self {
        Self {
            value: value.into(),
            clauses: Vec::new(),
            fallback: None,
        }
    }

    /// The captured value.
    pub fn value(&self) -> &Value {
        &self.value
    }

    /// Number of registered clauses, not counting the fallback.
    pub fn len(&self) -> usize {
        self.clauses.len()
    }

    /// Returns true if no clause has been registered.
    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    /// Returns true if [`otherwise`](Self::otherwise) was called.
    pub fn has_fallback(&self) -> bool {
        self.fallback.is_some()
    }

    fn push(
        mut self,
        pattern: Pattern,
        guard: Option<BoxPredicate<'a>>,
        handler: BoxHandler<'a, R>,
    ) -> Self {
        self.clauses.push(Clause {
            pattern,
            guard,
            handler,
        });
        self
    }

    /// Add a clause that runs `handler` when the value matches `pattern`.
    pub fn with<P, H>(self, pattern: P, handler: H) -> Self
    where
        P: Into<Pattern>,
        H: FnOnce(Value) -> R + 'a,
    {
        self.push(pattern.into(), None, Box::new(handler))
    }

    /// Add a clause with an explicit guard.
    ///
    /// The guard sees the whole captured value and is only consulted after
    /// `pattern` matched.
    pub fn with_guard<P, G, T, H>(self, pattern: P, guard: G, handler: H) -> Self
    where
        P: Into<Pattern>,
        G: Fn(&Value) -> T + 'a,
        T: Truthy,
        H: FnOnce(Value) -> R + 'a,
    {
        let guard: BoxPredicate<'a> = Box::new(move |value| guard(value).is_truthy());
        self.push(pattern.into(), Some(guard), Box::new(handler))
    }

    /// Add a clause that matches when `predicate` is truthy for the captured
    /// value, regardless of its shape.
    pub fn when<G, T, H>(self, predicate: G, handler: H) -> Self
    where
        G: Fn(&Value) -> T + 'a,
        T: Truthy,
        H: FnOnce(Value) -> R + 'a,
    {
        self.with_guard(Pattern::Wildcard, predicate, handler)
    }

    /// Add a clause that matches a number equal to one of `members`.
    pub fn number_set<I, N, H>(self, members: I, handler: H) -> Self
    where
        I: IntoIterator<Item = N>,
        N: Into<f64>,
        H: FnOnce(Value) -> R + 'a,
    {
        self.with(Pattern::number_set(members), handler)
    }

    /// Add a clause that matches a number in the closed interval `range`.
    pub fn number_range<N, H>(self, range: RangeInclusive<N>, handler: H) -> Self
    where
        N: Into<f64>,
        H: FnOnce(Value) -> R + 'a,
    {
        let (lo, hi) = range.into_inner();
        self.with(Pattern::number_range(lo, hi), handler)
    }

    /// Set the catch-all handler.
    ///
    /// It runs only after every clause failed, including clauses registered
    /// after this call. Calling `otherwise` again replaces the handler.
    pub fn otherwise<H>(mut self, handler: H) -> Self
    where
        H: FnOnce(Value) -> R + 'a,
    {
        self.fallback = Some(Box::new(handler));
        self
    }

    /// Evaluate the session.
    ///
    /// Returns the selected handler's result, or [`MatchError::NoMatch`] when
    /// nothing matched and no fallback was set. Panics raised by guards or
    /// handlers are not caught.
    pub fn run(self) -> Result<R, MatchError> {
        self.evaluate()
    }

    /// Evaluate a session the caller asserts is exhaustive.
    ///
    /// Behaves exactly like [`run`](Self::run); a fall-through still returns
    /// [`MatchError::NoMatch`] and is additionally logged as a warning.
    pub fn exhaustive(self) -> Result<R, MatchError> {
        let result = self.evaluate();
        #[cfg(feature = "tracing")]
        if let Err(ref err) = result {
            tracing::warn!(error = %err, "exhaustive match fell through");
        }
        result
    }

    fn evaluate(self) -> Result<R, MatchError> {
        let Match {
            value,
            clauses,
            fallback,
        } = self;
        let clause_count = clauses.len();

        for (index, clause) in clauses.into_iter().enumerate() {
            let Some(bindings) = extract_bindings(&value, &clause.pattern) else {
                #[cfg(feature = "tracing")]
                tracing::trace!(clause = index, pattern = ?clause.pattern, "pattern rejected");
                continue;
            };
            if let Some(guard) = &clause.guard {
                if !guard(&value) {
                    #[cfg(feature = "tracing")]
                    tracing::trace!(clause = index, "guard rejected");
                    continue;
                }
            }

            #[cfg(feature = "tracing")]
            tracing::debug!(clause = index, captures = bindings.len(), "clause matched");
            #[cfg(not(feature = "tracing"))]
            let _ = index;

            let argument = if bindings.is_empty() {
                value
            } else {
                bindings.into_value()
            };
            return Ok((clause.handler)(argument));
        }

        match fallback {
            Some(handler) => {
                #[cfg(feature = "tracing")]
                tracing::debug!(clauses = clause_count, "fallback selected");
                Ok(handler(value))
            }
            None => Err(MatchError::NoMatch {
                value: value.to_string(),
                clauses: clause_count,
            }),
        }
    }
}

impl<R> fmt::Debug for Match<'_, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Match")
            .field("value", &self.value)
            .field(
                "clauses",
                &self.clauses.iter().map(|c| &c.pattern).collect::<Vec<_>>(),
            )
            .field("fallback", &self.fallback.is_some())
            .finish()
    }
}
