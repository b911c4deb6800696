//! Runtime value types for field resolution.
//!
//! The [`Value`] enum is what a [`Record`](crate::Record) hands back for a
//! field path. Every pipeline stage works on these values, never on the
//! record's concrete type.

use std::borrow::Cow;
use std::cmp::Ordering;

use chrono::{DateTime, SecondsFormat, TimeZone, Utc};

/// Runtime value of a record field, borrowed from the source record.
///
/// # Example
///
/// ```
/// use crm_seeker::{Value, Number};
///
/// struct Lead {
///     name: String,
///     budget: u32,
/// }
///
/// fn accessor<'a>(lead: &'a Lead, field: &str) -> Value<'a> {
///     match field {
///         "name" => Value::String(&lead.name),
///         "budget" => Value::Number(Number::U64(lead.budget as u64)),
///         _ => Value::None,
///     }
/// }
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Value<'a> {
    /// String value (borrowed). Date strings stay strings until a stage parses them.
    String(&'a str),
    /// Numeric value.
    Number(Number),
    /// Already-parsed instant.
    Timestamp(Timestamp),
    /// Boolean value.
    Bool(bool),
    /// Field missing, null, a nested object/array, or unsupported.
    None,
}

impl<'a> Value<'a> {
    /// Returns `true` if this is a `None` value.
    pub fn is_none(&self) -> bool {
        matches!(self, Value::None)
    }

    /// Extracts the string value, if present.
    pub fn as_str(&self) -> Option<&'a str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Extracts the number value, if present.
    pub fn as_number(&self) -> Option<Number> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Extracts the timestamp value, if present.
    pub fn as_timestamp(&self) -> Option<Timestamp> {
        match self {
            Value::Timestamp(t) => Some(*t),
            _ => None,
        }
    }

    /// Extracts the boolean value, if present.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Interprets the value as a float: numbers directly, numeric strings parsed.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(n.to_f64()),
            Value::String(s) => s.trim().parse::<f64>().ok(),
            _ => None,
        }
    }

    /// String representation used by free-text search.
    ///
    /// Timestamps render as RFC 3339 in UTC with millisecond precision.
    /// `None` has no searchable text.
    pub fn search_text(&self) -> Option<Cow<'a, str>> {
        match self {
            Value::String(s) => Some(Cow::Borrowed(*s)),
            Value::Number(n) => Some(Cow::Owned(n.to_string())),
            Value::Bool(b) => Some(Cow::Borrowed(if *b { "true" } else { "false" })),
            Value::Timestamp(ts) => ts
                .to_utc()
                .map(|dt| Cow::Owned(dt.to_rfc3339_opts(SecondsFormat::Millis, true))),
            Value::None => None,
        }
    }
}

/// Numeric value preserving the source precision.
///
/// Comparisons between different numeric variants go through `f64`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
    /// Signed 64-bit integer.
    I64(i64),
    /// Unsigned 64-bit integer.
    U64(u64),
    /// 64-bit floating point.
    F64(f64),
}

impl Number {
    /// Converts the number to f64 for comparison.
    pub fn to_f64(self) -> f64 {
        match self {
            Number::I64(n) => n as f64,
            Number::U64(n) => n as f64,
            Number::F64(n) => n,
        }
    }

    /// Compares two numbers, handling mixed types.
    pub fn compare(self, other: Number) -> Option<Ordering> {
        match (self, other) {
            (Number::I64(a), Number::I64(b)) => Some(a.cmp(&b)),
            (Number::U64(a), Number::U64(b)) => Some(a.cmp(&b)),
            (Number::F64(a), Number::F64(b)) => a.partial_cmp(&b),
            _ => self.to_f64().partial_cmp(&other.to_f64()),
        }
    }
}

impl PartialOrd for Number {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.compare(*other)
    }
}

impl std::fmt::Display for Number {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Number::I64(n) => write!(f, "{}", n),
            Number::U64(n) => write!(f, "{}", n),
            Number::F64(n) => write!(f, "{}", n),
        }
    }
}

impl From<i32> for Number {
    fn from(n: i32) -> Self {
        Number::I64(n as i64)
    }
}

impl From<i64> for Number {
    fn from(n: i64) -> Self {
        Number::I64(n)
    }
}

impl From<u32> for Number {
    fn from(n: u32) -> Self {
        Number::U64(n as u64)
    }
}

impl From<u64> for Number {
    fn from(n: u64) -> Self {
        Number::U64(n)
    }
}

impl From<f64> for Number {
    fn from(n: f64) -> Self {
        Number::F64(n)
    }
}

/// Instant represented as milliseconds since the Unix epoch.
///
/// Timezone-free, so instants parsed from differently offset strings compare
/// correctly.
///
/// ```
/// use crm_seeker::Timestamp;
///
/// assert!(Timestamp(1000) < Timestamp(2000));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp(pub i64);

impl Timestamp {
    /// Creates a new timestamp from milliseconds since Unix epoch.
    pub fn from_millis(millis: i64) -> Self {
        Timestamp(millis)
    }

    /// Converts any chrono datetime into a timestamp.
    pub fn from_datetime<Tz: TimeZone>(dt: &DateTime<Tz>) -> Self {
        Timestamp(dt.timestamp_millis())
    }

    /// Returns the timestamp as milliseconds since Unix epoch.
    pub fn as_millis(self) -> i64 {
        self.0
    }

    /// Returns the instant as a UTC datetime, if it is in chrono's range.
    pub fn to_utc(self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_millis(self.0)
    }
}

impl From<i64> for Timestamp {
    fn from(millis: i64) -> Self {
        Timestamp(millis)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn value_type_checks() {
        assert!(Value::None.is_none());
        assert!(!Value::String("").is_none());
        assert_eq!(Value::String("test").as_str(), Some("test"));
        assert_eq!(Value::Timestamp(Timestamp(0)).as_timestamp(), Some(Timestamp(0)));
        assert_eq!(Value::Bool(true).as_bool(), Some(true));
    }

    #[test]
    fn as_f64_reads_numeric_strings() {
        assert_eq!(Value::String(" 42.5 ").as_f64(), Some(42.5));
        assert_eq!(Value::Number(Number::U64(7)).as_f64(), Some(7.0));
        assert_eq!(Value::String("Acme").as_f64(), None);
        assert_eq!(Value::None.as_f64(), None);
    }

    #[test]
    fn search_text_representations() {
        assert_eq!(Value::String("Acme").search_text().as_deref(), Some("Acme"));
        assert_eq!(
            Value::Number(Number::I64(1500)).search_text().as_deref(),
            Some("1500")
        );
        assert_eq!(Value::Bool(false).search_text().as_deref(), Some("false"));
        assert_eq!(
            Value::Timestamp(Timestamp(86_400_000)).search_text().as_deref(),
            Some("1970-01-02T00:00:00.000Z")
        );
        assert_eq!(Value::None.search_text(), None);
    }

    #[test]
    fn number_comparisons_mixed_types() {
        assert_eq!(
            Number::I64(5).compare(Number::U64(10)),
            Some(Ordering::Less)
        );
        assert_eq!(
            Number::I64(5).compare(Number::F64(5.0)),
            Some(Ordering::Equal)
        );
        assert_eq!(Number::F64(f64::NAN).compare(Number::F64(1.0)), None);
    }

    #[test]
    fn timestamp_conversions() {
        assert_eq!(Timestamp::from_millis(5000).as_millis(), 5000);

        let dt = DateTime::from_timestamp_millis(86_400_000).unwrap();
        assert_eq!(Timestamp::from_datetime(&dt), Timestamp(86_400_000));
        assert_eq!(Timestamp(86_400_000).to_utc(), Some(dt));
    }
}
