//! Construction macros for records and lists.

/// Build a [`Pattern`](crate::Pattern) from record or list syntax.
///
/// Values are converted with `Pattern::from`, so literals, primitives such as
/// `__` or `select("x")`, and nested `pattern!` calls can be mixed freely.
///
/// ```rust,ignore
/// let p = pattern!({
///     "type" => "ok",
///     "data" => pattern!({ "content" => select("content") }),
/// });
/// let q = pattern!([1, __, 3]);
/// ```
#[macro_export]
macro_rules! pattern {
    ({}) => {
        $crate::Pattern::Record(::std::collections::BTreeMap::new())
    };
    ({ $($key:expr => $val:expr),+ $(,)? }) => {
        $crate::Pattern::record([$(($key, $crate::Pattern::from($val))),+])
    };
    ([]) => {
        $crate::Pattern::List(::std::vec::Vec::new())
    };
    ([ $($val:expr),+ $(,)? ]) => {
        $crate::Pattern::list([$($crate::Pattern::from($val)),+])
    };
}

/// Build a [`Value`](crate::Value) from record or list syntax.
///
/// ```rust,ignore
/// let v = value!({ "operator" => "add", "left" => 12, "right" => 3 });
/// let w = value!([1, "two", value!({ "three" => 3 })]);
/// ```
#[macro_export]
macro_rules! value {
    ({}) => {
        $crate::Value::Record(::std::collections::BTreeMap::new())
    };
    ({ $($key:expr => $val:expr),+ $(,)? }) => {
        $crate::Value::record([$(($key, $crate::Value::from($val))),+])
    };
    ([]) => {
        $crate::Value::List(::std::vec::Vec::new())
    };
    ([ $($val:expr),+ $(,)? ]) => {
        $crate::Value::List(::std::vec![$($crate::Value::from($val)),+])
    };
}

#[cfg(test)]
mod tests {
    use crate::{__, Pattern, Value, is_match, select};

    #[test]
    fn test_value_macro_shapes() {
        let v = value!({ "a" => 1, "b" => value!(["x", true]) });
        assert_eq!(v["a"], Value::from(1));
        assert_eq!(v["b"][0], Value::from("x"));
        assert_eq!(v["b"][1], Value::from(true));
        assert_eq!(value!({}), Value::Record(Default::default()));
        assert_eq!(value!([]), Value::List(Vec::new()));
    }

    #[test]
    fn test_pattern_macro_matches() {
        let p = pattern!({ "a" => 1, "b" => pattern!([__, select("second")]) });
        assert!(is_match(&value!({ "a" => 1, "b" => value!([0, 0]), "c" => 9 }), &p));
        assert!(!is_match(&value!({ "a" => 1 }), &p));
        assert!(is_match(&value!({ "anything" => 1 }), &pattern!({})));
        assert!(matches!(pattern!([]), Pattern::List(ref items) if items.is_empty()));
    }
}
