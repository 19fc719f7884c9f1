//! Runtime value model.
//!
//! A [`Value`] is any datum the engine can classify: a primitive, an ordered
//! list, or a string-keyed record. Values are immutable from the matcher's
//! point of view; equality is structural and deep.

use bitflags::bitflags;
use std::{
    collections::BTreeMap,
    fmt,
    ops::Index,
};

bitflags! {
    /// A set of value shapes.
    ///
    /// Used by typed wildcards ([`Pattern::Kind`](crate::Pattern::Kind)) and
    /// by extraction errors to describe what was expected.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Kind: u8 {
        /// The absent value.
        const NIL = 1 << 0;
        /// `true` or `false`.
        const BOOL = 1 << 1;
        /// Any number.
        const NUMBER = 1 << 2;
        /// A string.
        const STRING = 1 << 3;
        /// An ordered list.
        const LIST = 1 << 4;
        /// A keyed record.
        const RECORD = 1 << 5;
        /// Every primitive shape.
        const PRIMITIVE = Self::NIL.bits()
            | Self::BOOL.bits()
            | Self::NUMBER.bits()
            | Self::STRING.bits();
    }
}

/// String-keyed map used by record values.
pub type Record = BTreeMap<String, Value>;

/// A dynamically shaped runtime value.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    /// Absence of a value.
    #[default]
    Nil,
    /// A boolean.
    Bool(bool),
    /// A number. Integers are represented exactly up to 2^53.
    Number(f64),
    /// A string.
    Str(String),
    /// An ordered sequence.
    List(Vec<Value>),
    /// A mapping from key to value.
    Record(Record),
}

static NIL: Value = Value::Nil;

impl Value {
    /// Build a record from key/value pairs.
    pub fn record<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        Value::Record(
            entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    /// Build a list from anything convertible into values.
    pub fn list<I, V>(items: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        Value::List(items.into_iter().map(Into::into).collect())
    }

    /// The shape of this value.
    pub fn kind(&self) -> Kind {
        match self {
            Value::Nil => Kind::NIL,
            Value::Bool(_) => Kind::BOOL,
            Value::Number(_) => Kind::NUMBER,
            Value::Str(_) => Kind::STRING,
            Value::List(_) => Kind::LIST,
            Value::Record(_) => Kind::RECORD,
        }
    }

    /// `Nil` and `false` are falsy; everything else is truthy.
    pub fn is_truthy(&self) -> bool {
        !matches!(self, Value::Nil | Value::Bool(false))
    }

    /// Returns true for [`Value::Nil`].
    pub fn is_nil(&self) -> bool {
        matches!(self, Value::Nil)
    }

    /// The boolean, if this is one.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// The number, if this is one.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// The string slice, if this is a string.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    /// The elements, if this is a list.
    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }

    /// The fields, if this is a record.
    pub fn as_record(&self) -> Option<&Record> {
        match self {
            Value::Record(fields) => Some(fields),
            _ => None,
        }
    }

    /// Look up a key in a record. Returns `None` for absent keys and non-records.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.as_record().and_then(|fields| fields.get(key))
    }

    /// Look up a position in a list.
    pub fn at(&self, index: usize) -> Option<&Value> {
        self.as_list().and_then(|items| items.get(index))
    }
}

impl Index<&str> for Value {
    type Output = Value;

    /// Missing keys index to `Nil`.
    fn index(&self, key: &str) -> &Value {
        self.get(key).unwrap_or(&NIL)
    }
}

impl Index<usize> for Value {
    type Output = Value;

    fn index(&self, index: usize) -> &Value {
        self.at(index).unwrap_or(&NIL)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Nil => f.write_str("nil"),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Number(n) => write!(f, "{}", n),
            Value::Str(s) => write!(f, "{:?}", s),
            Value::List(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                f.write_str("]")
            }
            Value::Record(fields) => {
                f.write_str("{")?;
                for (i, (key, value)) in fields.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}: {}", key, value)?;
                }
                f.write_str("}")
            }
        }
    }
}

// Conversions

macro_rules! impl_from_number {
    ($($T:ty),+) => {
        $(
            impl From<$T> for Value {
                fn from(n: $T) -> Self {
                    Value::Number(n as f64)
                }
            }
        )+
    };
}

impl_from_number!(f64, f32, i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_owned())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl From<()> for Value {
    fn from(_: ()) -> Self {
        Value::Nil
    }
}

impl From<&Value> for Value {
    fn from(v: &Value) -> Self {
        v.clone()
    }
}

impl From<Record> for Value {
    fn from(fields: Record) -> Self {
        Value::Record(fields)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(opt: Option<T>) -> Self {
        opt.map_or(Value::Nil, Into::into)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Value::list(items)
    }
}

impl<T: Into<Value>, const N: usize> From<[T; N]> for Value {
    fn from(items: [T; N]) -> Self {
        Value::list(items)
    }
}

impl<V: Into<Value>> FromIterator<V> for Value {
    fn from_iter<I: IntoIterator<Item = V>>(iter: I) -> Self {
        Value::list(iter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truthiness() {
        assert!(!Value::Nil.is_truthy());
        assert!(!Value::Bool(false).is_truthy());
        assert!(Value::Bool(true).is_truthy());
        assert!(Value::from(0).is_truthy());
        assert!(Value::from("").is_truthy());
        assert!(Value::list(Vec::<Value>::new()).is_truthy());
    }

    #[test]
    fn test_index_missing_is_nil() {
        let value = Value::record([("a", 1)]);
        assert_eq!(value["a"], Value::Number(1.0));
        assert_eq!(value["b"], Value::Nil);
        assert_eq!(value["a"]["deeper"], Value::Nil);
        assert_eq!(Value::from(vec![1, 2])[5], Value::Nil);
    }

    #[test]
    fn test_deep_equality() {
        let a = Value::record([
            ("type", Value::from("ok")),
            ("data", Value::record([("content", "hello")])),
        ]);
        let b = Value::record([
            ("data", Value::record([("content", "hello")])),
            ("type", Value::from("ok")),
        ]);
        assert_eq!(a, b);
        assert_ne!(a, Value::record([("type", "ok")]));
    }

    #[test]
    fn test_option_conversion() {
        assert_eq!(Value::from(None::<i32>), Value::Nil);
        assert_eq!(Value::from(Some(3)), Value::Number(3.0));
    }

    #[test]
    fn test_display() {
        let value = Value::record([
            ("list", Value::from(vec![1, 2])),
            ("name", Value::from("x")),
            ("none", Value::Nil),
        ]);
        assert_eq!(value.to_string(), r#"{list: [1, 2], name: "x", none: nil}"#);
        assert_eq!(Value::from(1.5).to_string(), "1.5");
    }

    #[test]
    fn test_kind() {
        assert_eq!(Value::from(true).kind(), Kind::BOOL);
        assert!(Kind::PRIMITIVE.contains(Value::from("s").kind()));
        assert!(!Kind::PRIMITIVE.contains(Value::from(vec![1]).kind()));
    }
}
