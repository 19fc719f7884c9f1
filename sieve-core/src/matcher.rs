//! # Matcher
//!
//! Decides whether a [`Value`] satisfies a [`Pattern`] and, on success,
//! collects the sub-values captured by [selectors](crate::select).
//!
//! Matching is depth-first and deterministic. Missing record keys, length
//! mismatches and shape mismatches are ordinary no-matches, never errors.
//! Guard predicates run on the caller's thread; if one panics the panic
//! unwinds through the matcher unchanged.

use crate::{
    patterns::Pattern,
    values::{Record, Value},
};
use std::collections::BTreeMap;

/// Selector name to captured sub-value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Bindings {
    captured: BTreeMap<String, Value>,
}

impl Bindings {
    /// Create an empty set of bindings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a captured value.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.captured.get(name)
    }

    /// Number of captured names.
    pub fn len(&self) -> usize {
        self.captured.len()
    }

    /// Returns true if nothing was captured.
    pub fn is_empty(&self) -> bool {
        self.captured.is_empty()
    }

    /// Iterate over captures in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.captured.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// The record handed to handlers of selector-bearing patterns.
    pub fn into_value(self) -> Value {
        Value::Record(self.captured)
    }

    fn insert(&mut self, name: &str, value: &Value) {
        // A name selected twice keeps the later capture.
        self.captured.insert(name.to_owned(), value.clone());
    }

    fn restore(&mut self, snapshot: &BTreeMap<String, Value>) {
        self.captured.clone_from(snapshot);
    }
}

impl From<Bindings> for Value {
    fn from(bindings: Bindings) -> Self {
        bindings.into_value()
    }
}

impl From<Bindings> for Record {
    fn from(bindings: Bindings) -> Self {
        bindings.captured
    }
}

/// Returns true if `value` satisfies `pattern`.
pub fn is_match(value: &Value, pattern: &Pattern) -> bool {
    let mut scratch = Bindings::new();
    match_into(value, pattern, &mut scratch)
}

/// Match `value` against `pattern`, returning the selector captures on success.
///
/// A pattern without selectors yields empty bindings when it matches.
pub fn extract_bindings(value: &Value, pattern: &Pattern) -> Option<Bindings> {
    let mut bindings = Bindings::new();
    match_into(value, pattern, &mut bindings).then_some(bindings)
}

/// Recursive matching step. Captures are only left in `bindings` when the
/// overall result is `true` for branches that can fail after capturing.
pub(crate) fn match_into(value: &Value, pattern: &Pattern, bindings: &mut Bindings) -> bool {
    match pattern {
        Pattern::Wildcard => true,
        Pattern::Select(name) => {
            bindings.insert(name, value);
            true
        }
        Pattern::Guard(guard) => guard.check(value),
        Pattern::Literal(expected) => value == expected,
        Pattern::Kind(kinds) => kinds.contains(value.kind()),
        Pattern::NumberSet(members) => value
            .as_number()
            .is_some_and(|n| members.iter().any(|m| *m == n)),
        Pattern::NumberRange { lo, hi } => value
            .as_number()
            .is_some_and(|n| *lo <= n && n <= *hi),
        Pattern::Record(fields) => {
            let Value::Record(actual) = value else {
                return false;
            };
            all_or_restore(bindings, |bindings| {
                fields.iter().all(|(key, sub)| {
                    actual
                        .get(key)
                        .is_some_and(|sub_value| match_into(sub_value, sub, bindings))
                })
            })
        }
        Pattern::List(items) => {
            let Value::List(actual) = value else {
                return false;
            };
            if actual.len() != items.len() {
                return false;
            }
            all_or_restore(bindings, |bindings| {
                actual
                    .iter()
                    .zip(items)
                    .all(|(sub_value, sub)| match_into(sub_value, sub, bindings))
            })
        }
        Pattern::AnyOf(alternatives) => alternatives
            .iter()
            .any(|alt| all_or_restore(bindings, |bindings| match_into(value, alt, bindings))),
        Pattern::Not(inner) => !is_match(value, inner),
    }
}

/// Run a compound check; on failure, drop whatever it captured.
fn all_or_restore(bindings: &mut Bindings, check: impl FnOnce(&mut Bindings) -> bool) -> bool {
    let snapshot = bindings.captured.clone();
    let matched = check(bindings);
    if !matched {
        bindings.restore(&snapshot);
    }
    matched
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        patterns::{__, any_of, kind, not, select, when},
        values::Kind,
    };

    fn ok_text(content: &str) -> Value {
        Value::record([
            ("type", Value::from("ok")),
            (
                "data",
                Value::record([("type", "text"), ("content", content)]),
            ),
        ])
    }

    #[test]
    fn test_wildcard_matches_everything() {
        for value in [
            Value::Nil,
            Value::from(1),
            Value::from("s"),
            Value::from(vec![1, 2]),
            ok_text("hi"),
        ] {
            assert!(is_match(&value, &__));
        }
    }

    #[test]
    fn test_partial_record() {
        let value = Value::record([
            ("operator", Value::from("add")),
            ("left", Value::from(12)),
            ("right", Value::from(3)),
        ]);
        assert!(is_match(&value, &Pattern::record([("operator", "add")])));
        assert!(!is_match(&value, &Pattern::record([("operator", "sub")])));
        assert!(!is_match(&value, &Pattern::record([("missing", __)])));
    }

    #[test]
    fn test_nested_record() {
        let pattern = Pattern::record([
            ("type", Pattern::from("ok")),
            (
                "data",
                Pattern::record([("type", "text"), ("content", "hello")]),
            ),
        ]);
        assert!(is_match(&ok_text("hello"), &pattern));
        assert!(!is_match(&ok_text("bye"), &pattern));
    }

    #[test]
    fn test_list_length_must_match() {
        let value = Value::from(vec![1, 2, 3]);
        assert!(is_match(&value, &Pattern::list([1, 2, 3])));
        assert!(!is_match(&value, &Pattern::list([1, 2])));
        assert!(!is_match(&value, &Pattern::list([__, __, __, __])));
        assert!(is_match(&value, &Pattern::list([__, Pattern::from(2), __])));
    }

    #[test]
    fn test_shape_mismatch_is_no_match() {
        assert!(!is_match(&Value::from(vec![1]), &Pattern::record([("0", 1)])));
        assert!(!is_match(&Value::record([("a", 1)]), &Pattern::list([1])));
        assert!(!is_match(&Value::from("5"), &Pattern::number_set([5])));
    }

    #[test]
    fn test_record_value_as_pattern_is_partial() {
        let value = Value::record([("a", 1), ("b", 2)]);
        assert!(is_match(&value, &Pattern::from(Value::record([("a", 1)]))));
        assert!(is_match(&value, &Pattern::from(value.clone())));
        assert!(!is_match(&value, &Pattern::from(Value::record([("a", 2)]))));
        assert!(!is_match(&Value::record([("a", 1)]), &Pattern::from(value.clone())));

        let nested = Value::record([("outer", Value::record([("x", 1), ("y", 2)]))]);
        let partial = Value::record([("outer", Value::record([("x", 1)]))]);
        assert!(is_match(&nested, &Pattern::from(partial)));
    }

    #[test]
    fn test_guard_receives_nested_value() {
        let is_odd = when(|v: &Value| v.as_number().is_some_and(|n| n % 2.0 == 1.0));
        let pattern = Pattern::record([("x", is_odd)]);
        assert!(is_match(&Value::record([("x", 7)]), &pattern));
        assert!(!is_match(&Value::record([("x", 2)]), &pattern));
    }

    #[test]
    fn test_number_set_and_range() {
        let primes = Pattern::number_set([1, 3, 5, 7, 11]);
        assert!(is_match(&Value::from(5), &primes));
        assert!(!is_match(&Value::from(4), &primes));

        let teens = Pattern::number_range(13, 19);
        assert!(is_match(&Value::from(13), &teens));
        assert!(is_match(&Value::from(19), &teens));
        assert!(!is_match(&Value::from(12), &teens));
        assert!(!is_match(&Value::from(20), &teens));
        assert!(!is_match(&Value::from(15), &Pattern::number_range(19, 13)));
    }

    #[test]
    fn test_selector_extraction() {
        let pattern = Pattern::record([
            ("type", Pattern::from("ok")),
            ("data", Pattern::record([("content", select("content"))])),
        ]);
        let bindings = extract_bindings(&ok_text("hello"), &pattern).unwrap();
        assert_eq!(bindings.len(), 1);
        assert_eq!(bindings.get("content"), Some(&Value::from("hello")));
        assert_eq!(bindings.get("type"), None);
    }

    #[test]
    fn test_failed_branch_discards_captures() {
        let pattern = any_of([
            Pattern::list([select("a"), Pattern::from(0)]),
            Pattern::list([__, select("b")]),
        ]);
        let bindings = extract_bindings(&Value::from(vec![1, 2]), &pattern).unwrap();
        assert_eq!(bindings.get("a"), None);
        assert_eq!(bindings.get("b"), Some(&Value::from(2)));
    }

    #[test]
    fn test_no_match_yields_none() {
        let pattern = Pattern::record([("x", select("x")), ("y", Pattern::from(1))]);
        assert!(extract_bindings(&Value::record([("x", 5), ("y", 2)]), &pattern).is_none());
    }

    #[test]
    fn test_kind_and_not() {
        let strings = kind(Kind::STRING);
        assert!(is_match(&Value::from("a"), &strings));
        assert!(!is_match(&Value::from(1), &strings));
        assert!(is_match(&Value::from(1), &not(strings)));
        assert!(is_match(&Value::Nil, &kind(Kind::NIL | Kind::BOOL)));
    }
}
