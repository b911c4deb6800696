//! crm-seeker - schema-driven query engine for fetched CRM records.
//!
//! Every CRM screen (leads, calendar, tasks, reminders, revenue and target
//! reports) slices an already-fetched collection the same way: free-text
//! search, a date range, a status selector, a sort toggle and pagination.
//! This crate implements that once, parametrized by a [`Schema`] per entity
//! type:
//!
//! - [`matches_search`]: case-insensitive substring match, OR across fields
//! - [`in_window`]: inclusive whole-day window with overlap semantics
//! - [`classify`]: ended/upcoming, over/partial/under, or categorical buckets
//! - [`sort_records`]: stable sort with end-to-start fallback on range fields
//! - [`paginate`]: page slicing with filtered totals
//! - [`Query`] / [`query`]: the pipeline composing all of the above
//!
//! # Quick Start
//!
//! ```rust
//! use chrono::{DateTime, NaiveDate};
//! use crm_seeker::{Classifier, FilterSpec, PageSpec, Schema, SortSpec, query};
//! use serde_json::json;
//!
//! let schema = Schema::new("event", "start")
//!     .range_end("end")
//!     .search_fields(["title", "location"])
//!     .classifier(Classifier::Temporal);
//!
//! let events = vec![
//!     json!({ "title": "Kickoff", "location": "HQ", "start": "2024-05-10T08:00" }),
//!     json!({ "title": "Offsite", "location": "Lisbon", "start": "2024-05-20T09:00" }),
//! ];
//!
//! let day = NaiveDate::from_ymd_opt(2024, 5, 10).unwrap();
//! let filter = FilterSpec::new().date_from(day).date_to(day);
//! let now = DateTime::parse_from_rfc3339("2024-05-01T00:00:00Z").unwrap();
//!
//! let result = query(
//!     &events,
//!     &schema,
//!     &filter,
//!     &SortSpec::asc("start"),
//!     &PageSpec::first(10).unwrap(),
//!     &now,
//! );
//!
//! assert_eq!(result.total_count, 1);
//! assert_eq!(result.slice[0]["title"], "Kickoff");
//! ```
//!
//! # Pipeline Order
//!
//! ```text
//! owner scope -> search -> date window -> status bucket -> sort -> paginate
//! ```
//!
//! Each stage is total: malformed dates, missing nested paths and
//! out-of-range pages degrade to "no match" or "empty page", never to a
//! panic or an error.
//!
//! # Local Time
//!
//! `now` is a `DateTime<FixedOffset>`. Its instant drives the ended/upcoming
//! split; its offset defines local day boundaries and how naive date strings
//! are read.

mod bucket;
mod dates;
mod error;
mod ordering;
mod paginate;
mod query;
mod schema;
mod search;
mod traits;
mod value;
mod window;

// Re-export public API
pub use bucket::{
    achievement_bucket, classify, temporal_bucket, Bucket, BucketFilter, OVER_THRESHOLD,
    PARTIAL_THRESHOLD,
};
pub use dates::{end_of_day, parse_instant, resolve_instant, start_of_day};
pub use error::{Result, SeekerError};
pub use ordering::{sort_key, sort_records, temporal_sort_rule, Dir, SortKey, SortSpec};
pub use paginate::{page_count, paginate, Page, PageSpec};
pub use query::{query, FilterSpec, Query, QueryResult};
pub use schema::{Classifier, Schema};
pub use search::{matches_search, normalize_term};
pub use traits::Record;
pub use value::{Number, Timestamp, Value};
pub use window::{in_window, record_end, record_span, Span};
