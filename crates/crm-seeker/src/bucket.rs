//! Status and threshold classification.
//!
//! A [`Bucket`] is the discrete class a record falls into for the status
//! selector: ended vs upcoming for dated items, over/partial/under for
//! quota rows, or a plain category for status-labelled records.

use chrono::FixedOffset;

use crate::schema::{Classifier, Schema};
use crate::traits::Record;
use crate::value::Timestamp;
use crate::window::record_end;

/// Achievement at or above this percentage is [`Bucket::Over`].
pub const OVER_THRESHOLD: f64 = 100.0;

/// Achievement at or above this percentage (and below
/// [`OVER_THRESHOLD`]) is [`Bucket::Partial`].
pub const PARTIAL_THRESHOLD: f64 = 50.0;

/// Discrete classification of a record.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Bucket {
    /// Range end (or start) is at or before now.
    Ended,
    /// Range end (or start) is after now.
    Upcoming,
    /// Achievement >= 100%.
    Over,
    /// 50% <= achievement < 100%.
    Partial,
    /// Achievement < 50%.
    Under,
    /// Categorical status, trimmed and lower-cased.
    Category(String),
}

impl Bucket {
    /// Creates a category bucket, folding case and whitespace.
    pub fn category(name: &str) -> Self {
        Bucket::Category(name.trim().to_lowercase())
    }

    /// Returns the display name of this bucket.
    pub fn as_str(&self) -> &str {
        match self {
            Bucket::Ended => "ended",
            Bucket::Upcoming => "upcoming",
            Bucket::Over => "over",
            Bucket::Partial => "partial",
            Bucket::Under => "under",
            Bucket::Category(name) => name,
        }
    }
}

impl std::fmt::Display for Bucket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The status selector's value: everything, or one bucket.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum BucketFilter {
    /// Classification filtering disabled.
    #[default]
    All,
    /// Only records classified into this bucket.
    Only(Bucket),
}

impl BucketFilter {
    /// Returns `true` if this is the pass-everything filter.
    pub fn is_all(&self) -> bool {
        matches!(self, BucketFilter::All)
    }

    /// Tests a record's classification against this filter.
    pub fn accepts(&self, bucket: Option<&Bucket>) -> bool {
        match self {
            BucketFilter::All => true,
            BucketFilter::Only(wanted) => bucket == Some(wanted),
        }
    }
}

impl From<Bucket> for BucketFilter {
    fn from(bucket: Bucket) -> Self {
        BucketFilter::Only(bucket)
    }
}

/// Maps an achievement percentage onto exactly one bucket.
///
/// Boundaries are closed at the lower end: 100 is `Over`, 50 is `Partial`.
/// NaN compares false everywhere and lands in `Under`.
///
/// ```
/// use crm_seeker::{achievement_bucket, Bucket};
///
/// assert_eq!(achievement_bucket(100.0), Bucket::Over);
/// assert_eq!(achievement_bucket(50.0), Bucket::Partial);
/// assert_eq!(achievement_bucket(49.99), Bucket::Under);
/// ```
pub fn achievement_bucket(percent: f64) -> Bucket {
    if percent >= OVER_THRESHOLD {
        Bucket::Over
    } else if percent >= PARTIAL_THRESHOLD {
        Bucket::Partial
    } else {
        Bucket::Under
    }
}

/// Ended if `end <= now`, upcoming otherwise.
pub fn temporal_bucket(end: Timestamp, now: Timestamp) -> Bucket {
    if end <= now {
        Bucket::Ended
    } else {
        Bucket::Upcoming
    }
}

/// Classifies a record under its schema's policy.
///
/// Returns `None` when the schema has no classifier or the record's status
/// data cannot be read; such records only pass [`BucketFilter::All`].
pub fn classify<R>(record: &R, schema: &Schema, now: Timestamp, zone: &FixedOffset) -> Option<Bucket>
where
    R: Record + ?Sized,
{
    match schema.classification() {
        Classifier::None => None,
        Classifier::Temporal => {
            record_end(record, schema, zone).map(|end| temporal_bucket(end, now))
        }
        Classifier::Achievement => record
            .field_value(schema.status()?)
            .as_f64()
            .filter(|p| !p.is_nan())
            .map(achievement_bucket),
        Classifier::Categorical => record
            .field_value(schema.status()?)
            .search_text()
            .map(|label| Bucket::category(&label))
            .filter(|bucket| !bucket.as_str().is_empty()),
    }
}
