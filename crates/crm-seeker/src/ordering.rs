//! Sort direction, sort specs, and the stable sorter.

use std::cmp::Ordering;

use chrono::FixedOffset;
use serde::{Deserialize, Serialize};

use crate::bucket::Bucket;
use crate::dates::{parse_instant, resolve_instant};
use crate::schema::Schema;
use crate::traits::Record;
use crate::value::Value;
use crate::window::record_end;

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dir {
    /// Ascending order (smallest first).
    #[default]
    Asc,
    /// Descending order (largest first).
    Desc,
}

impl Dir {
    /// Applies this direction to an ascending ordering.
    pub fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            Dir::Asc => ordering,
            Dir::Desc => ordering.reverse(),
        }
    }

    /// Returns the opposite direction.
    pub fn toggled(self) -> Dir {
        match self {
            Dir::Asc => Dir::Desc,
            Dir::Desc => Dir::Asc,
        }
    }

    /// Returns the display name of this direction.
    pub fn as_str(self) -> &'static str {
        match self {
            Dir::Asc => "asc",
            Dir::Desc => "desc",
        }
    }
}

impl std::fmt::Display for Dir {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A sort key and direction.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SortSpec {
    /// The field to sort by.
    pub field: String,
    /// The sort direction.
    #[serde(default)]
    pub dir: Dir,
}

impl SortSpec {
    /// Creates a new ascending sort on the given field.
    pub fn asc(field: impl Into<String>) -> Self {
        SortSpec {
            field: field.into(),
            dir: Dir::Asc,
        }
    }

    /// Creates a new descending sort on the given field.
    pub fn desc(field: impl Into<String>) -> Self {
        SortSpec {
            field: field.into(),
            dir: Dir::Desc,
        }
    }

    /// Creates a new sort with the given direction.
    pub fn new(field: impl Into<String>, dir: Dir) -> Self {
        SortSpec {
            field: field.into(),
            dir,
        }
    }

    /// Ascending on the schema's default sort field.
    pub fn default_for(schema: &Schema) -> Self {
        SortSpec::asc(schema.default_sort_field())
    }
}

/// Sort selection rule for ended/upcoming screens.
///
/// Ended items show the most recently ended first (descending by end);
/// upcoming items show the soonest first (ascending by start). Any other
/// bucket has no rule and the caller keeps its current sort.
pub fn temporal_sort_rule(schema: &Schema, bucket: &Bucket) -> Option<SortSpec> {
    match bucket {
        Bucket::Ended => Some(SortSpec::desc(schema.end_field())),
        Bucket::Upcoming => Some(SortSpec::asc(schema.start_field())),
        _ => None,
    }
}

/// Resolved, totally ordered sort key.
///
/// Kinds rank instants, then numbers, then text, then missing values, so
/// mixed collections still sort deterministically.
#[derive(Debug, Clone, PartialEq)]
pub enum SortKey {
    /// Parsed date or timestamp, in epoch milliseconds.
    Instant(i64),
    /// Number or numeric string.
    Number(f64),
    /// Text, with its transliterated lower-case fold.
    Text { folded: String, raw: String },
    /// Missing, null, or unreadable.
    Missing,
}

impl SortKey {
    fn rank(&self) -> u8 {
        match self {
            SortKey::Instant(_) => 0,
            SortKey::Number(_) => 1,
            SortKey::Text { .. } => 2,
            SortKey::Missing => 3,
        }
    }

    /// Builds a text key, folding diacritics and case.
    pub fn text(raw: &str) -> Self {
        SortKey::Text {
            folded: deunicode::deunicode(raw).to_lowercase(),
            raw: raw.to_string(),
        }
    }

    /// Ascending comparison.
    pub fn compare(&self, other: &SortKey) -> Ordering {
        match (self, other) {
            (SortKey::Instant(a), SortKey::Instant(b)) => a.cmp(b),
            (SortKey::Number(a), SortKey::Number(b)) => a.total_cmp(b),
            (
                SortKey::Text { folded: fa, raw: ra },
                SortKey::Text { folded: fb, raw: rb },
            ) => fa.cmp(fb).then_with(|| ra.cmp(rb)),
            _ => self.rank().cmp(&other.rank()),
        }
    }
}

/// Resolves the sort key for one record.
///
/// The end field resolves to the parsed end, or the parsed start where the
/// end is absent or unreadable. Other fields resolve directly:
/// date-like strings become instants and numeric strings become numbers.
pub fn sort_key<R>(record: &R, schema: &Schema, field: &str, zone: &FixedOffset) -> SortKey
where
    R: Record + ?Sized,
{
    if schema.is_range_field(field) {
        return range_key(record, schema, field, zone);
    }
    value_key(&record.field_value(field), zone)
}

fn range_key<R>(record: &R, schema: &Schema, field: &str, zone: &FixedOffset) -> SortKey
where
    R: Record + ?Sized,
{
    if field == schema.start_field() {
        return resolve_instant(&record.field_value(field), zone)
            .map_or(SortKey::Missing, |ts| SortKey::Instant(ts.as_millis()));
    }
    record_end(record, schema, zone)
        .map_or(SortKey::Missing, |end| SortKey::Instant(end.as_millis()))
}

fn value_key(value: &Value<'_>, zone: &FixedOffset) -> SortKey {
    match value {
        Value::Timestamp(ts) => SortKey::Instant(ts.as_millis()),
        Value::Number(n) if !n.to_f64().is_nan() => SortKey::Number(n.to_f64()),
        Value::Bool(b) => SortKey::Number(if *b { 1.0 } else { 0.0 }),
        Value::String(s) => {
            if let Some(ts) = parse_instant(s, zone) {
                SortKey::Instant(ts.as_millis())
            } else if let Some(n) = value.as_f64().filter(|n| !n.is_nan()) {
                SortKey::Number(n)
            } else if s.trim().is_empty() {
                SortKey::Missing
            } else {
                SortKey::text(s)
            }
        }
        _ => SortKey::Missing,
    }
}

/// Stable sort returning a new vector; the input is untouched.
///
/// Keys are resolved once per record. `Desc` reverses the ascending
/// comparison; ties keep their input order in both directions.
pub fn sort_records<'a, T>(
    records: &[&'a T],
    schema: &Schema,
    spec: &SortSpec,
    zone: &FixedOffset,
) -> Vec<&'a T>
where
    T: Record + ?Sized,
{
    let mut keyed: Vec<(SortKey, &'a T)> = records
        .iter()
        .map(|record| (sort_key(*record, schema, &spec.field, zone), *record))
        .collect();

    // slice::sort_by is a stable merge sort
    keyed.sort_by(|(a, _), (b, _)| spec.dir.apply(a.compare(b)));

    keyed.into_iter().map(|(_, record)| record).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value as Json};

    fn utc() -> FixedOffset {
        FixedOffset::east_opt(0).unwrap()
    }

    fn titles(sorted: &[&Json]) -> Vec<String> {
        sorted
            .iter()
            .map(|r| r["title"].as_str().unwrap_or_default().to_string())
            .collect()
    }

    #[test]
    fn dir_apply_and_toggle() {
        assert_eq!(Dir::Asc.apply(Ordering::Less), Ordering::Less);
        assert_eq!(Dir::Desc.apply(Ordering::Less), Ordering::Greater);
        assert_eq!(Dir::Desc.apply(Ordering::Equal), Ordering::Equal);
        assert_eq!(Dir::Asc.toggled(), Dir::Desc);
        assert_eq!(Dir::Desc.to_string(), "desc");
    }

    #[test]
    fn sort_spec_deserializes_lowercase_dir() {
        let spec: SortSpec = serde_json::from_str(r#"{"field":"end","dir":"desc"}"#).unwrap();
        assert_eq!(spec, SortSpec::desc("end"));

        let spec: SortSpec = serde_json::from_str(r#"{"field":"title"}"#).unwrap();
        assert_eq!(spec, SortSpec::asc("title"));
    }

    #[test]
    fn temporal_rule_picks_end_desc_and_start_asc() {
        let schema = Schema::new("task", "start").range_end("end");
        assert_eq!(
            temporal_sort_rule(&schema, &Bucket::Ended),
            Some(SortSpec::desc("end"))
        );
        assert_eq!(
            temporal_sort_rule(&schema, &Bucket::Upcoming),
            Some(SortSpec::asc("start"))
        );
        assert_eq!(temporal_sort_rule(&schema, &Bucket::Over), None);

        let no_end = Schema::new("reminder", "remind_at");
        assert_eq!(
            temporal_sort_rule(&no_end, &Bucket::Ended),
            Some(SortSpec::desc("remind_at"))
        );
    }

    #[test]
    fn text_sort_is_case_and_accent_insensitive() {
        let schema = Schema::new("lead", "created_at");
        let records = [
            json!({ "title": "zeta" }),
            json!({ "title": "Émile" }),
            json!({ "title": "alpha" }),
            json!({ "title": "Beta" }),
        ];
        let refs: Vec<&Json> = records.iter().collect();

        let sorted = sort_records(&refs, &schema, &SortSpec::asc("title"), &utc());
        assert_eq!(titles(&sorted), ["alpha", "Beta", "Émile", "zeta"]);
    }

    #[test]
    fn numeric_strings_sort_numerically() {
        let schema = Schema::new("revenue", "date");
        let records = [
            json!({ "title": "a", "amount": "900" }),
            json!({ "title": "b", "amount": 1200 }),
            json!({ "title": "c", "amount": "80.5" }),
        ];
        let refs: Vec<&Json> = records.iter().collect();

        let sorted = sort_records(&refs, &schema, &SortSpec::desc("amount"), &utc());
        assert_eq!(titles(&sorted), ["b", "a", "c"]);
    }

    #[test]
    fn end_sort_falls_back_to_start() {
        let schema = Schema::new("task", "start").range_end("end");
        let records = [
            json!({ "title": "a", "start": "2024-01-01", "end": null }),
            json!({ "title": "b", "start": "2023-12-01", "end": "2024-02-01" }),
            json!({ "title": "c", "start": "2024-01-15" }),
        ];
        let refs: Vec<&Json> = records.iter().collect();

        let sorted = sort_records(&refs, &schema, &SortSpec::desc("end"), &utc());
        assert_eq!(titles(&sorted), ["b", "c", "a"]);
    }

    #[test]
    fn end_sort_reads_end_without_start() {
        let schema = Schema::new("event", "start").range_end("end");
        let records = [
            json!({ "title": "early", "end": "2024-06-01" }),
            json!({ "title": "late", "end": "2024-06-03" }),
            json!({ "title": "none" }),
        ];
        let refs: Vec<&Json> = records.iter().collect();

        let sorted = sort_records(&refs, &schema, &SortSpec::asc("end"), &utc());
        assert_eq!(titles(&sorted), ["early", "late", "none"]);
    }

    #[test]
    fn missing_keys_sort_last_ascending() {
        let schema = Schema::new("task", "start");
        let records = [
            json!({ "title": "none" }),
            json!({ "title": "late", "start": "2024-03-01" }),
            json!({ "title": "bad", "start": "???" }),
            json!({ "title": "early", "start": "2024-01-01" }),
        ];
        let refs: Vec<&Json> = records.iter().collect();

        let sorted = sort_records(&refs, &schema, &SortSpec::asc("start"), &utc());
        assert_eq!(titles(&sorted), ["early", "late", "none", "bad"]);

        let sorted = sort_records(&refs, &schema, &SortSpec::desc("start"), &utc());
        assert_eq!(titles(&sorted), ["none", "bad", "late", "early"]);
    }

    #[test]
    fn ties_keep_input_order_in_both_directions() {
        let schema = Schema::new("task", "start");
        let records = [
            json!({ "title": "first", "priority": 1 }),
            json!({ "title": "second", "priority": 1 }),
            json!({ "title": "third", "priority": 1 }),
        ];
        let refs: Vec<&Json> = records.iter().collect();

        for dir in [Dir::Asc, Dir::Desc] {
            let sorted = sort_records(&refs, &schema, &SortSpec::new("priority", dir), &utc());
            assert_eq!(titles(&sorted), ["first", "second", "third"]);
        }
    }

    #[test]
    fn sort_key_kind_ranking() {
        assert_eq!(
            SortKey::Instant(5).compare(&SortKey::Number(1.0)),
            Ordering::Less
        );
        assert_eq!(
            SortKey::text("a").compare(&SortKey::Number(1.0)),
            Ordering::Greater
        );
        assert_eq!(SortKey::Missing.compare(&SortKey::text("z")), Ordering::Greater);
        assert_eq!(SortKey::Missing.compare(&SortKey::Missing), Ordering::Equal);
    }
}
