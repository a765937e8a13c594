//! Converted value types.
//!
//! This module defines the [`Value`] enum, the result of a lazy value's
//! generic conversion.
use alloc::string::String;
use core::hash::{Hash, Hasher};

use chrono::{DateTime, Utc};

/// The typed result of [`LazyValue::to_value`](crate::LazyValue::to_value).
///
/// Integer tokens become [`Integer`] when the digit run fits 32 bits and
/// [`Long`] otherwise. String tokens become [`Date`] only when date detection
/// is on and one of the date parsers accepts the text.
///
/// # Examples
///
/// ```
/// use jsonlazy::{LazyValue, Value, ValueKind};
///
/// let mut node = LazyValue::new(false, ValueKind::Integer, 0..2, b"42").unwrap();
/// assert_eq!(node.to_value().unwrap(), &Value::Integer(42));
/// ```
///
/// [`Integer`]: Value::Integer
/// [`Long`]: Value::Long
/// [`Date`]: Value::Date
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug)]
pub enum Value {
    Null,
    Integer(i32),
    Long(i64),
    Double(f64),
    String(String),
    Date(DateTime<Utc>),
}

impl Default for Value {
    fn default() -> Self {
        Self::Null
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Self::Integer(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self::Long(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Double(v)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::String(v)
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(v: DateTime<Utc>) -> Self {
        Self::Date(v)
    }
}

impl Value {
    /// Returns `true` if the value is [`Null`].
    ///
    /// [`Null`]: Value::Null
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Returns the value as an `i64` if it is [`Integer`] or [`Long`].
    ///
    /// [`Integer`]: Value::Integer
    /// [`Long`]: Value::Long
    ///
    /// # Examples
    ///
    /// ```
    /// use jsonlazy::Value;
    ///
    /// assert_eq!(Value::Integer(-3).as_i64(), Some(-3));
    /// assert_eq!(Value::Long(1 << 40).as_i64(), Some(1 << 40));
    /// assert_eq!(Value::Null.as_i64(), None);
    /// ```
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match *self {
            Self::Integer(n) => Some(i64::from(n)),
            Self::Long(n) => Some(n),
            _ => None,
        }
    }

    /// Returns the value as an `f64` if it is [`Double`].
    ///
    /// [`Double`]: Value::Double
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match *self {
            Self::Double(n) => Some(n),
            _ => None,
        }
    }

    /// Returns the string slice if the value is [`String`].
    ///
    /// [`String`]: Value::String
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the timestamp if the value is [`Date`].
    ///
    /// [`Date`]: Value::Date
    #[must_use]
    pub fn as_date(&self) -> Option<&DateTime<Utc>> {
        match self {
            Self::Date(d) => Some(d),
            _ => None,
        }
    }
}

// Doubles compare by bit pattern, so a NaN equals itself and `0.0` differs
// from `-0.0`. `Hash` below agrees.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Integer(a), Value::Integer(b)) => a == b,
            (Value::Long(a), Value::Long(b)) => a == b,
            (Value::Double(a), Value::Double(b)) => a.to_bits() == b.to_bits(),
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Date(a), Value::Date(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for Value {}

impl Hash for Value {
    fn hash<H: Hasher>(&self, state: &mut H) {
        core::mem::discriminant(self).hash(state);
        match self {
            Value::Null => {}
            Value::Integer(n) => n.hash(state),
            Value::Long(n) => n.hash(state),
            Value::Double(n) => n.to_bits().hash(state),
            Value::String(s) => s.hash(state),
            Value::Date(d) => d.hash(state),
        }
    }
}

impl core::fmt::Display for Value {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Value::Null => f.write_str("null"),
            Value::Integer(n) => write!(f, "{n}"),
            Value::Long(n) => write!(f, "{n}"),
            Value::Double(n) => write!(f, "{n}"),
            Value::String(s) => write!(f, "{s:?}"),
            Value::Date(d) => write!(f, "{}", d.to_rfc3339_opts(chrono::SecondsFormat::Millis, true)),
        }
    }
}
