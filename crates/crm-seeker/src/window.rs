//! Date window filter.
//!
//! A record's interval is `[start, end]`, read from the schema's range
//! fields with the end falling back to the start. A window `[from, to]` of
//! whole local days matches every record whose interval overlaps it:
//!
//! ```text
//! (from unset || end >= start_of_day(from)) && (to unset || start <= end_of_day(to))
//! ```

use chrono::{FixedOffset, NaiveDate};

use crate::dates::{end_of_day, resolve_instant, start_of_day};
use crate::schema::Schema;
use crate::traits::Record;
use crate::value::Timestamp;

/// Resolved `[start, end]` interval of a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub start: Timestamp,
    pub end: Timestamp,
}

/// Reads the record's interval.
///
/// Returns `None` when the start is unparseable or when a present end value
/// fails to parse. An absent or null end falls back to the start.
pub fn record_span<R>(record: &R, schema: &Schema, zone: &FixedOffset) -> Option<Span>
where
    R: Record + ?Sized,
{
    let start = resolve_instant(&record.field_value(schema.start_field()), zone)?;
    let end_value = record.field_value(schema.end_field());
    let end = if end_value.is_none() {
        start
    } else {
        resolve_instant(&end_value, zone)?
    };
    Some(Span { start, end })
}

/// Reads the record's effective end instant on its own.
///
/// The parsed end when there is one, otherwise the parsed start. Unlike
/// [`record_span`] a missing start does not hide a readable end.
pub fn record_end<R>(record: &R, schema: &Schema, zone: &FixedOffset) -> Option<Timestamp>
where
    R: Record + ?Sized,
{
    resolve_instant(&record.field_value(schema.end_field()), zone)
        .or_else(|| resolve_instant(&record.field_value(schema.start_field()), zone))
}

/// Tests whether a record's interval overlaps the `[from, to]` day window.
///
/// With both bounds unset every record passes, including ones without
/// parseable dates. Otherwise records whose dates cannot be read are
/// excluded.
pub fn in_window<R>(
    record: &R,
    schema: &Schema,
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
    zone: &FixedOffset,
) -> bool
where
    R: Record + ?Sized,
{
    if from.is_none() && to.is_none() {
        return true;
    }
    match record_span(record, schema, zone) {
        Some(span) => span_overlaps(span, from, to, zone),
        None => {
            tracing::trace!(schema = schema.name(), "unreadable date range excluded from window");
            false
        }
    }
}

fn span_overlaps(
    span: Span,
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
    zone: &FixedOffset,
) -> bool {
    let after_from = from.map_or(true, |d| span.end >= start_of_day(d, zone));
    let before_to = to.map_or(true, |d| span.start <= end_of_day(d, zone));
    after_from && before_to
}
