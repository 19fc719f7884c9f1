//! # Typed Extraction
//!
//! Handlers receive a [`Value`]; [`FromValue`] decodes it (or a part of it)
//! into ordinary Rust types without manual shape checks.
//!
//! ```rust,ignore
//! let total = match_value(sum)
//!     .with(pattern!({ "operator" => "add" }), |v| {
//!         let (left, right): (f64, f64) = (v.decode_key("left")?, v.decode_key("right")?);
//!         Ok::<_, ValueError>(left + right)
//!     })
//!     .run()?;
//! ```

use crate::{
    error::ValueError,
    values::{Kind, Record, Value},
};

/// A trait for decoding a Rust type from a borrowed [`Value`].
#[diagnostic::on_unimplemented(
    message = "`{Self}` cannot be decoded from a `Value`",
    label = "missing `FromValue` implementation",
    note = "Implement `FromValue` for `{Self}` to decode it from matched values."
)]
pub trait FromValue: Sized {
    /// Attempt to decode `Self` from the given value.
    fn from_value(value: &Value) -> Result<Self, ValueError>;
}

impl Value {
    /// Decode this value into `T`.
    pub fn decode<T: FromValue>(&self) -> Result<T, ValueError> {
        T::from_value(self)
    }

    /// Decode the field `key` of a record into `T`.
    ///
    /// Fails with [`ValueError::MissingKey`] if the key is absent.
    pub fn decode_key<T: FromValue>(&self, key: &str) -> Result<T, ValueError> {
        let record = self.as_record().ok_or_else(|| mismatch(Kind::RECORD, self))?;
        let field = record
            .get(key)
            .ok_or_else(|| ValueError::MissingKey(key.to_owned()))?;
        T::from_value(field)
    }
}

fn mismatch(expected: Kind, found: &Value) -> ValueError {
    ValueError::TypeMismatch {
        expected,
        found: found.kind(),
    }
}

// Standard Extractors

impl FromValue for Value {
    fn from_value(value: &Value) -> Result<Self, ValueError> {
        Ok(value.clone())
    }
}

impl FromValue for bool {
    fn from_value(value: &Value) -> Result<Self, ValueError> {
        value.as_bool().ok_or_else(|| mismatch(Kind::BOOL, value))
    }
}

impl FromValue for f64 {
    fn from_value(value: &Value) -> Result<Self, ValueError> {
        value.as_number().ok_or_else(|| mismatch(Kind::NUMBER, value))
    }
}

impl FromValue for f32 {
    fn from_value(value: &Value) -> Result<Self, ValueError> {
        f64::from_value(value).map(|n| n as f32)
    }
}

/// Macro to implement FromValue for integer types.
///
/// Non-integral numbers and numbers outside the target range are rejected.
/// `MAX as f64 + 1.0` is the exclusive upper bound; for 64-bit types `MAX`
/// rounds up to a power of two, which is itself out of range.
macro_rules! impl_from_value_int {
    ($($T:ty),+) => {
        $(
            impl FromValue for $T {
                fn from_value(value: &Value) -> Result<Self, ValueError> {
                    let n = f64::from_value(value)?;
                    if n.fract() != 0.0 || n < <$T>::MIN as f64 || n >= <$T>::MAX as f64 + 1.0 {
                        return Err(ValueError::OutOfRange(n, stringify!($T)));
                    }
                    Ok(n as $T)
                }
            }
        )+
    };
}

impl_from_value_int!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

impl FromValue for String {
    fn from_value(value: &Value) -> Result<Self, ValueError> {
        value
            .as_str()
            .map(str::to_owned)
            .ok_or_else(|| mismatch(Kind::STRING, value))
    }
}

impl FromValue for Record {
    fn from_value(value: &Value) -> Result<Self, ValueError> {
        value
            .as_record()
            .cloned()
            .ok_or_else(|| mismatch(Kind::RECORD, value))
    }
}

// Blanket Implementations

impl<T: FromValue> FromValue for Option<T> {
    fn from_value(value: &Value) -> Result<Self, ValueError> {
        match value {
            Value::Nil => Ok(None),
            other => T::from_value(other).map(Some),
        }
    }
}

impl<T: FromValue> FromValue for Vec<T> {
    fn from_value(value: &Value) -> Result<Self, ValueError> {
        value
            .as_list()
            .ok_or_else(|| mismatch(Kind::LIST, value))?
            .iter()
            .map(T::from_value)
            .collect()
    }
}

// Tuple Extractors

/// Macro to implement FromValue for tuples decoded from equal-length lists.
macro_rules! impl_from_value_tuple {
    ($len:literal; $($T:ident => $idx:tt),+) => {
        impl<$($T: FromValue,)+> FromValue for ($($T,)+) {
            fn from_value(value: &Value) -> Result<Self, ValueError> {
                let items = value.as_list().ok_or_else(|| mismatch(Kind::LIST, value))?;
                if items.len() != $len {
                    return Err(mismatch(Kind::LIST, value));
                }
                Ok(($($T::from_value(&items[$idx])?,)+))
            }
        }
    };
}

impl_from_value_tuple!(1; T1 => 0);
impl_from_value_tuple!(2; T1 => 0, T2 => 1);
impl_from_value_tuple!(3; T1 => 0, T2 => 1, T3 => 2);
impl_from_value_tuple!(4; T1 => 0, T2 => 1, T3 => 2, T4 => 3);
