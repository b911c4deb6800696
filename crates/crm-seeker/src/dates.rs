//! Date parsing and local-day boundaries.
//!
//! Record dates arrive as ISO-8601 strings of varying precision. Strings that
//! carry an offset are absolute; naive strings and bare dates are read in the
//! caller's local offset. Day boundaries are computed in the same offset, so
//! whole-day windows are inclusive whatever the record's time of day.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime};

use crate::value::{Timestamp, Value};

const MILLIS_PER_DAY: i64 = 86_400_000;

/// Offset-carrying formats beyond strict RFC 3339.
const ZONED_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f%z", "%Y-%m-%d %H:%M:%S%.f%z"];

/// Naive date-time formats, read in local time.
const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// Parses an ISO-8601 string into an instant.
///
/// Returns `None` for anything unparseable; callers treat that as a
/// non-match.
///
/// ```
/// use chrono::FixedOffset;
/// use crm_seeker::{parse_instant, Timestamp};
///
/// let utc = FixedOffset::east_opt(0).unwrap();
/// assert_eq!(parse_instant("1970-01-02", &utc), Some(Timestamp(86_400_000)));
/// assert_eq!(parse_instant("not a date", &utc), None);
/// ```
pub fn parse_instant(raw: &str, zone: &FixedOffset) -> Option<Timestamp> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(Timestamp::from_datetime(&dt));
    }
    for fmt in ZONED_FORMATS {
        if let Ok(dt) = DateTime::parse_from_str(raw, fmt) {
            return Some(Timestamp::from_datetime(&dt));
        }
    }
    for fmt in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Some(local_to_instant(naive, zone));
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .map(|date| start_of_day(date, zone))
}

/// Resolves a field value to an instant.
///
/// Timestamps pass through, strings are parsed, everything else is `None`.
pub fn resolve_instant(value: &Value<'_>, zone: &FixedOffset) -> Option<Timestamp> {
    match value {
        Value::Timestamp(ts) => Some(*ts),
        Value::String(s) => parse_instant(s, zone),
        _ => None,
    }
}

/// 00:00:00.000 local time on `date`.
pub fn start_of_day(date: NaiveDate, zone: &FixedOffset) -> Timestamp {
    local_to_instant(date.and_time(NaiveTime::MIN), zone)
}

/// 23:59:59.999 local time on `date`.
pub fn end_of_day(date: NaiveDate, zone: &FixedOffset) -> Timestamp {
    // Fixed offsets have no DST transitions, so every local day is 24h long.
    Timestamp(start_of_day(date, zone).as_millis() + MILLIS_PER_DAY - 1)
}

fn local_to_instant(naive: NaiveDateTime, zone: &FixedOffset) -> Timestamp {
    let as_utc = naive.and_utc().timestamp_millis();
    Timestamp(as_utc - i64::from(zone.local_minus_utc()) * 1000)
}
