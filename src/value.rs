//! Value coercion
//!
//! `incr`/`decr` must work on any value type the store is instantiated with.
//! Instead of inspecting the type at compile time, every value reports how it
//! can be read as a number through [`StoreValue::numeric`]:
//!
//! | Variant       | Meaning                                   | ±1 result            |
//! |---------------|-------------------------------------------|----------------------|
//! | `Integer(n)`  | an integer type                           | same integer type    |
//! | `Text(s)`     | text that may hold a base-10 integer      | re-serialized text   |
//! | `Unsupported` | anything else (floats, booleans, blobs)   | `UnsupportedType`    |

use std::fmt;

use crate::error::{Result, StoreError};

/// Numeric view of a stored value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Numeric<'a> {
    Integer(i128),
    Text(&'a str),
    Unsupported,
}

/// A value that can live in the store.
///
/// `Display` renders the value inside command log lines.
pub trait StoreValue: Clone + fmt::Display {
    /// How this value reads as a number
    fn numeric(&self) -> Numeric<'_>;

    /// Build a value of the same representation holding `n`.
    ///
    /// Returns `None` when `n` does not fit or the type is not numeric.
    fn with_integer(&self, n: i128) -> Option<Self>;

    /// Name used in `UnsupportedType` errors
    fn type_name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}

impl StoreValue for String {
    fn numeric(&self) -> Numeric<'_> {
        Numeric::Text(self.as_str())
    }

    fn with_integer(&self, n: i128) -> Option<Self> {
        Some(n.to_string())
    }
}

macro_rules! impl_integer_value {
    ($($ty:ty),* $(,)?) => {
        $(
            impl StoreValue for $ty {
                fn numeric(&self) -> Numeric<'_> {
                    Numeric::Integer(i128::from(*self))
                }

                fn with_integer(&self, n: i128) -> Option<Self> {
                    <$ty>::try_from(n).ok()
                }
            }
        )*
    };
}

impl_integer_value!(i8, i16, i32, i64, u8, u16, u32, u64);

// `From<isize/usize> for i128` is not provided, go through the fixed-width types.
impl StoreValue for isize {
    fn numeric(&self) -> Numeric<'_> {
        Numeric::Integer(*self as i128)
    }

    fn with_integer(&self, n: i128) -> Option<Self> {
        isize::try_from(n).ok()
    }
}

impl StoreValue for usize {
    fn numeric(&self) -> Numeric<'_> {
        Numeric::Integer(*self as i128)
    }

    fn with_integer(&self, n: i128) -> Option<Self> {
        usize::try_from(n).ok()
    }
}

macro_rules! impl_unsupported_value {
    ($($ty:ty),* $(,)?) => {
        $(
            impl StoreValue for $ty {
                fn numeric(&self) -> Numeric<'_> {
                    Numeric::Unsupported
                }

                fn with_integer(&self, _n: i128) -> Option<Self> {
                    None
                }
            }
        )*
    };
}

impl_unsupported_value!(f32, f64, bool);

/// Add `delta` to `value` following the coercion rules.
///
/// `key` is only used to label errors.
pub fn offset<V: StoreValue>(key: &dyn fmt::Display, value: &V, delta: i64) -> Result<V> {
    match value.numeric() {
        Numeric::Integer(n) => n
            .checked_add(i128::from(delta))
            .and_then(|next| value.with_integer(next))
            .ok_or_else(|| StoreError::Overflow(key.to_string())),
        Numeric::Text(text) => {
            let n: i64 = text
                .trim()
                .parse()
                .map_err(|_| StoreError::NotAnInteger(text.to_string()))?;
            let next = n
                .checked_add(delta)
                .ok_or_else(|| StoreError::Overflow(key.to_string()))?;
            value
                .with_integer(i128::from(next))
                .ok_or_else(|| StoreError::Overflow(key.to_string()))
        }
        Numeric::Unsupported => Err(StoreError::UnsupportedType(value.type_name().to_string())),
    }
}
