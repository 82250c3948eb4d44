//! Field value types and the ordering used by column sorting

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// A polymorphic field value that can hold different types
///
/// Records expose their named fields through this type so filtering and
/// sorting can work over any record without knowing its concrete layout.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum FieldValue {
    String(String),
    Integer(i64),
    Float(f64),
    Boolean(bool),
    DateTime(DateTime<Utc>),
    Null,
}

impl FieldValue {
    /// Get the value as a string if possible
    pub fn as_string(&self) -> Option<&str> {
        match self {
            FieldValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Get the value as an integer if possible
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            FieldValue::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// Get the value as a float, widening integers
    pub fn as_number(&self) -> Option<f64> {
        match self {
            FieldValue::Integer(i) => Some(*i as f64),
            FieldValue::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// Check if the value is null
    pub fn is_null(&self) -> bool {
        matches!(self, FieldValue::Null)
    }

    /// Rank used to order values of different kinds against each other
    fn kind_rank(&self) -> u8 {
        match self {
            FieldValue::Boolean(_) => 0,
            FieldValue::Integer(_) | FieldValue::Float(_) => 1,
            FieldValue::String(_) => 2,
            FieldValue::DateTime(_) => 3,
            FieldValue::Null => 4,
        }
    }

    /// Total order over field values.
    ///
    /// - strings: [`compare_text`]
    /// - integers and floats: numerically and exactly, also across kinds
    /// - booleans: `false < true`
    /// - date-times: chronologically
    /// - values of different kinds: by kind (boolean, number, string, date-time)
    /// - `Null` after everything else
    pub fn compare(&self, other: &FieldValue) -> Ordering {
        match (self, other) {
            (FieldValue::String(a), FieldValue::String(b)) => compare_text(a, b),
            (FieldValue::Integer(a), FieldValue::Integer(b)) => a.cmp(b),
            (FieldValue::Boolean(a), FieldValue::Boolean(b)) => a.cmp(b),
            (FieldValue::DateTime(a), FieldValue::DateTime(b)) => a.cmp(b),
            (FieldValue::Null, FieldValue::Null) => Ordering::Equal,
            (FieldValue::Float(a), FieldValue::Float(b)) => compare_floats(*a, *b),
            (FieldValue::Integer(i), FieldValue::Float(f)) => compare_integer_float(*i, *f),
            (FieldValue::Float(f), FieldValue::Integer(i)) => {
                compare_integer_float(*i, *f).reverse()
            }
            (a, b) => a.kind_rank().cmp(&b.kind_rank()),
        }
    }
}

/// Numeric order with `-0.0 == 0.0`; NaNs go to the ends by sign
fn compare_floats(a: f64, b: f64) -> Ordering {
    a.partial_cmp(&b).unwrap_or_else(|| a.total_cmp(&b))
}

/// 2^63, the smallest float above every `i64`
const I64_UPPER: f64 = 9_223_372_036_854_775_808.0;

/// Exact comparison of an integer against a float, no widening
fn compare_integer_float(i: i64, f: f64) -> Ordering {
    if f.is_nan() {
        return if f.is_sign_negative() {
            Ordering::Greater
        } else {
            Ordering::Less
        };
    }
    if f >= I64_UPPER {
        return Ordering::Less;
    }
    if f < -I64_UPPER {
        return Ordering::Greater;
    }

    // In [-2^63, 2^63) the truncated float converts to i64 exactly
    let whole = f.trunc() as i64;
    i.cmp(&whole).then_with(|| {
        let fraction = f.fract();
        if fraction > 0.0 {
            Ordering::Less
        } else if fraction < 0.0 {
            Ordering::Greater
        } else {
            Ordering::Equal
        }
    })
}

/// Renders the value the way filter option lists display it
impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::String(s) => write!(f, "{}", s),
            FieldValue::Integer(i) => write!(f, "{}", i),
            FieldValue::Float(x) => write!(f, "{}", x),
            FieldValue::Boolean(b) => write!(f, "{}", b),
            FieldValue::DateTime(dt) => write!(f, "{}", dt.to_rfc3339()),
            FieldValue::Null => write!(f, "null"),
        }
    }
}

/// Locale-style text comparison.
///
/// Compares case-insensitively first, then puts lowercase before uppercase at
/// the first differing letter, then falls back to code point order so that
/// distinct strings never compare equal.
pub fn compare_text(a: &str, b: &str) -> Ordering {
    let folded = a
        .chars()
        .flat_map(char::to_lowercase)
        .cmp(b.chars().flat_map(char::to_lowercase));

    folded
        .then_with(|| {
            a.chars()
                .map(char::is_uppercase)
                .cmp(b.chars().map(char::is_uppercase))
        })
        .then_with(|| a.cmp(b))
}

impl From<&String> for FieldValue {
    fn from(value: &String) -> Self {
        FieldValue::String(value.clone())
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::String(value.to_string())
    }
}

impl From<&i64> for FieldValue {
    fn from(value: &i64) -> Self {
        FieldValue::Integer(*value)
    }
}

impl From<&u32> for FieldValue {
    fn from(value: &u32) -> Self {
        FieldValue::Integer(i64::from(*value))
    }
}

impl From<&u64> for FieldValue {
    fn from(value: &u64) -> Self {
        i64::try_from(*value)
            .map(FieldValue::Integer)
            .unwrap_or(FieldValue::Float(*value as f64))
    }
}

impl From<&f64> for FieldValue {
    fn from(value: &f64) -> Self {
        FieldValue::Float(*value)
    }
}

impl From<&bool> for FieldValue {
    fn from(value: &bool) -> Self {
        FieldValue::Boolean(*value)
    }
}

impl From<&DateTime<Utc>> for FieldValue {
    fn from(value: &DateTime<Utc>) -> Self {
        FieldValue::DateTime(*value)
    }
}

macro_rules! impl_from_option {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<&Option<$ty>> for FieldValue {
                fn from(value: &Option<$ty>) -> Self {
                    value.as_ref().map(FieldValue::from).unwrap_or(FieldValue::Null)
                }
            }
        )*
    };
}

impl_from_option!(String, i64, u32, u64, f64, bool, DateTime<Utc>);
