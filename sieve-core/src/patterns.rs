//! # Patterns
//!
//! A [`Pattern`] is a declarative description of a value's shape. Patterns
//! form a closed tree of variants and are interpreted by the
//! [matcher](crate::is_match).
//!
//! # Primitives
//!
//! - [`__`] - matches anything
//! - [`select`] - matches anything and captures the value under a name
//! - [`when`] - matches when a predicate is truthy
//! - [`kind`] - matches any value of the given [`Kind`]s
//! - [`any_of`] / [`not`] - union and negation
//!
//! Plain Rust values convert into literal patterns, so `5`, `"ok"` and
//! `Some(2)` can be passed wherever a pattern is expected. Record and list
//! values convert into record and list patterns, which are partial and
//! positional respectively; see [`pattern!`](crate::pattern!).

use crate::values::{Kind, Value};
use std::{collections::BTreeMap, fmt, sync::Arc};

/// A description of value shape.
#[derive(Clone)]
pub enum Pattern {
    /// Deep equality with a value.
    Literal(Value),
    /// Partial record: every declared key must exist and match, other keys
    /// are ignored.
    Record(BTreeMap<String, Pattern>),
    /// Positional list: lengths must be equal and every element must match.
    List(Vec<Pattern>),
    /// Matches any value.
    Wildcard,
    /// Matches any value and binds it to a name.
    Select(String),
    /// Matches when the predicate is truthy for the value.
    Guard(Guard),
    /// Matches a number equal to one of the members.
    NumberSet(Vec<f64>),
    /// Matches a number inside the closed interval `[lo, hi]`.
    NumberRange {
        /// Inclusive lower bound.
        lo: f64,
        /// Inclusive upper bound.
        hi: f64,
    },
    /// Matches any value whose kind is in the set.
    Kind(Kind),
    /// Matches when any alternative matches; the first one wins.
    AnyOf(Vec<Pattern>),
    /// Matches when the inner pattern does not.
    Not(Box<Pattern>),
}

/// The wildcard: matches every value of every shape.
pub const __: Pattern = Pattern::Wildcard;

/// A selector that captures the matched sub-value under `name`.
pub fn select(name: impl Into<String>) -> Pattern {
    Pattern::Select(name.into())
}

/// A guard pattern built from a predicate.
///
/// The predicate's result only has to be [`Truthy`]: `bool`, `Option<T>` and
/// [`Value`] all qualify.
pub fn when<F, T>(predicate: F) -> Pattern
where
    F: Fn(&Value) -> T + Send + Sync + 'static,
    T: Truthy,
{
    Pattern::Guard(Guard::new(predicate))
}

/// A typed wildcard.
pub fn kind(kinds: Kind) -> Pattern {
    Pattern::Kind(kinds)
}

/// A union of patterns.
pub fn any_of<I, P>(alternatives: I) -> Pattern
where
    I: IntoIterator<Item = P>,
    P: Into<Pattern>,
{
    Pattern::AnyOf(alternatives.into_iter().map(Into::into).collect())
}

/// The negation of a pattern.
pub fn not(pattern: impl Into<Pattern>) -> Pattern {
    Pattern::Not(Box::new(pattern.into()))
}

impl Pattern {
    /// Build a partial record pattern from key/pattern pairs.
    pub fn record<I, K, P>(fields: I) -> Self
    where
        I: IntoIterator<Item = (K, P)>,
        K: Into<String>,
        P: Into<Pattern>,
    {
        Pattern::Record(
            fields
                .into_iter()
                .map(|(k, p)| (k.into(), p.into()))
                .collect(),
        )
    }

    /// Build a positional list pattern.
    pub fn list<I, P>(items: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<Pattern>,
    {
        Pattern::List(items.into_iter().map(Into::into).collect())
    }

    /// Numeric set membership.
    pub fn number_set<I, N>(members: I) -> Self
    where
        I: IntoIterator<Item = N>,
        N: Into<f64>,
    {
        Pattern::NumberSet(members.into_iter().map(Into::into).collect())
    }

    /// Closed numeric interval. An inverted interval matches nothing.
    pub fn number_range(lo: impl Into<f64>, hi: impl Into<f64>) -> Self {
        Pattern::NumberRange {
            lo: lo.into(),
            hi: hi.into(),
        }
    }
}

impl fmt::Debug for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Pattern::Literal(v) => write!(f, "{}", v),
            Pattern::Record(fields) => f.debug_map().entries(fields.iter()).finish(),
            Pattern::List(items) => f.debug_list().entries(items.iter()).finish(),
            Pattern::Wildcard => f.write_str("__"),
            Pattern::Select(name) => write!(f, "select({:?})", name),
            Pattern::Guard(_) => f.write_str("when(..)"),
            Pattern::NumberSet(members) => write!(f, "number_set({:?})", members),
            Pattern::NumberRange { lo, hi } => write!(f, "number_range({}..={})", lo, hi),
            Pattern::Kind(kinds) => write!(f, "kind({:?})", kinds),
            Pattern::AnyOf(items) => write!(f, "any_of({:?})", items),
            Pattern::Not(inner) => write!(f, "not({:?})", inner),
        }
    }
}

// ============================================================================
// Guard
// ============================================================================

/// A shareable predicate over values.
#[derive(Clone)]
pub struct Guard {
    predicate: Arc<dyn Fn(&Value) -> bool + Send + Sync>,
}

impl Guard {
    /// Wrap a predicate whose result is [`Truthy`].
    pub fn new<F, T>(predicate: F) -> Self
    where
        F: Fn(&Value) -> T + Send + Sync + 'static,
        T: Truthy,
    {
        Self {
            predicate: Arc::new(move |value| predicate(value).is_truthy()),
        }
    }

    /// Evaluate the predicate.
    pub fn check(&self, value: &Value) -> bool {
        (self.predicate)(value)
    }
}

impl fmt::Debug for Guard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Guard(..)")
    }
}

/// Boolean-like results accepted from guard predicates.
#[diagnostic::on_unimplemented(
    message = "`{Self}` cannot be used as a guard result",
    label = "guard predicates must return something truthy-like",
    note = "`bool`, `Option<T>` and `Value` implement `Truthy`."
)]
pub trait Truthy {
    /// Whether this result counts as a match.
    fn is_truthy(&self) -> bool;
}

impl Truthy for bool {
    fn is_truthy(&self) -> bool {
        *self
    }
}

impl<T> Truthy for Option<T> {
    fn is_truthy(&self) -> bool {
        self.is_some()
    }
}

impl Truthy for Value {
    fn is_truthy(&self) -> bool {
        Value::is_truthy(self)
    }
}

// ============================================================================
// Conversions
// ============================================================================

/// Macro to implement literal-pattern conversions for plain values.
macro_rules! impl_literal_pattern {
    ($($T:ty),+) => {
        $(
            impl From<$T> for Pattern {
                fn from(v: $T) -> Self {
                    Pattern::Literal(Value::from(v))
                }
            }
        )+
    };
}

impl_literal_pattern!(
    bool, &str, String, (), f64, f32, i8, i16, i32, i64, isize, u8, u16, u32, u64,
    usize
);

/// Records become partial record patterns and lists become positional list
/// patterns, recursively; everything else is a literal.
impl From<Value> for Pattern {
    fn from(value: Value) -> Self {
        match value {
            Value::Record(fields) => Pattern::Record(
                fields
                    .into_iter()
                    .map(|(k, v)| (k, Pattern::from(v)))
                    .collect(),
            ),
            Value::List(items) => Pattern::List(items.into_iter().map(Pattern::from).collect()),
            other => Pattern::Literal(other),
        }
    }
}

impl From<&Value> for Pattern {
    fn from(value: &Value) -> Self {
        Pattern::from(value.clone())
    }
}

impl<T: Into<Value>> From<Option<T>> for Pattern {
    fn from(opt: Option<T>) -> Self {
        Pattern::from(opt.map_or(Value::Nil, Into::into))
    }
}

impl From<Kind> for Pattern {
    fn from(kinds: Kind) -> Self {
        Pattern::Kind(kinds)
    }
}

impl From<Guard> for Pattern {
    fn from(guard: Guard) -> Self {
        Pattern::Guard(guard)
    }
}
