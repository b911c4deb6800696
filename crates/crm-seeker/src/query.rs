//! Filter specs and the query pipeline.
//!
//! The pipeline runs its stages in a fixed order:
//!
//! ```text
//! owner scope -> search -> date window -> status bucket -> sort -> paginate
//! ```
//!
//! Sorting only sees the filtered subset and page totals count filtered
//! records. Every stage is a pure function of its inputs, so the pipeline
//! holds no state and can run on every render.

use chrono::{DateTime, FixedOffset, NaiveDate};

use crate::bucket::{classify, Bucket, BucketFilter};
use crate::ordering::{sort_records, Dir, SortSpec};
use crate::paginate::{paginate, Page, PageSpec};
use crate::schema::Schema;
use crate::search::{matches_normalized, normalize_term};
use crate::traits::Record;
use crate::value::Timestamp;
use crate::window::in_window;

/// Result of one pipeline run: the visible slice plus filtered totals.
pub type QueryResult<'a, T> = Page<&'a T>;

/// User-editable filter parameters for one pipeline run.
///
/// Rebuilt by the UI layer on every edit; the pipeline never mutates it.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FilterSpec {
    /// Free-text search term. Blank disables the search stage.
    pub search_term: String,
    /// First local day of the date window.
    pub date_from: Option<NaiveDate>,
    /// Last local day of the date window.
    pub date_to: Option<NaiveDate>,
    /// Status selector.
    pub bucket: BucketFilter,
    /// Opaque owner identity supplied by the caller's auth layer.
    pub owner_id: Option<String>,
}

impl FilterSpec {
    /// Creates a pass-everything filter.
    pub fn new() -> Self {
        FilterSpec::default()
    }

    /// Sets the search term.
    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.search_term = term.into();
        self
    }

    /// Sets the window start day.
    pub fn date_from(mut self, date: NaiveDate) -> Self {
        self.date_from = Some(date);
        self
    }

    /// Sets the window end day.
    pub fn date_to(mut self, date: NaiveDate) -> Self {
        self.date_to = Some(date);
        self
    }

    /// Restricts to one bucket.
    pub fn bucket(mut self, bucket: Bucket) -> Self {
        self.bucket = BucketFilter::Only(bucket);
        self
    }

    /// Restricts to records owned by `owner_id`.
    pub fn owner(mut self, owner_id: impl Into<String>) -> Self {
        self.owner_id = Some(owner_id.into());
        self
    }

    /// Returns `true` if no stage would drop any record.
    pub fn is_empty(&self) -> bool {
        self.search_term.trim().is_empty()
            && self.date_from.is_none()
            && self.date_to.is_none()
            && self.bucket.is_all()
            && self.owner_id.is_none()
    }
}

/// Builder over one schema for running the pipeline.
///
/// # Example
///
/// ```
/// use chrono::DateTime;
/// use crm_seeker::{Bucket, Classifier, PageSpec, Query, Schema};
/// use serde_json::json;
///
/// let schema = Schema::new("task", "start")
///     .range_end("end")
///     .search_fields(["title"])
///     .classifier(Classifier::Temporal);
///
/// let tasks = vec![
///     json!({ "title": "Alpha", "start": "2024-06-01", "end": "2024-06-01" }),
///     json!({ "title": "Beta", "start": "2024-06-03", "end": "2024-06-03" }),
/// ];
/// let now = DateTime::parse_from_rfc3339("2024-06-02T00:00:00Z").unwrap();
///
/// let result = Query::new(&schema)
///     .bucket(Bucket::Ended)
///     .order_desc("end")
///     .page(PageSpec::first(5).unwrap())
///     .run(&tasks, &now);
///
/// assert_eq!(result.total_count, 1);
/// assert_eq!(result.slice[0]["title"], "Alpha");
/// ```
#[derive(Debug, Clone)]
pub struct Query<'s> {
    schema: &'s Schema,
    filter: FilterSpec,
    sort: Option<SortSpec>,
    page: Option<PageSpec>,
}

impl<'s> Query<'s> {
    /// Creates a query over `schema` that matches everything.
    pub fn new(schema: &'s Schema) -> Self {
        Query {
            schema,
            filter: FilterSpec::default(),
            sort: None,
            page: None,
        }
    }

    // ========================================================================
    // Filter
    // ========================================================================

    /// Replaces the whole filter spec.
    pub fn filter(mut self, filter: FilterSpec) -> Self {
        self.filter = filter;
        self
    }

    /// Sets the search term.
    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.filter.search_term = term.into();
        self
    }

    /// Sets the window start day.
    pub fn date_from(mut self, date: NaiveDate) -> Self {
        self.filter.date_from = Some(date);
        self
    }

    /// Sets the window end day.
    pub fn date_to(mut self, date: NaiveDate) -> Self {
        self.filter.date_to = Some(date);
        self
    }

    /// Restricts to one bucket.
    pub fn bucket(mut self, bucket: Bucket) -> Self {
        self.filter.bucket = BucketFilter::Only(bucket);
        self
    }

    /// Restricts to one owner.
    pub fn owner(mut self, owner_id: impl Into<String>) -> Self {
        self.filter.owner_id = Some(owner_id.into());
        self
    }

    // ========================================================================
    // Ordering
    // ========================================================================

    /// Replaces the sort spec.
    pub fn sort(mut self, sort: SortSpec) -> Self {
        self.sort = Some(sort);
        self
    }

    /// Sorts by `field` in direction `dir`.
    pub fn order_by(self, field: &str, dir: Dir) -> Self {
        self.sort(SortSpec::new(field, dir))
    }

    /// Sorts ascending by `field`.
    pub fn order_asc(self, field: &str) -> Self {
        self.order_by(field, Dir::Asc)
    }

    /// Sorts descending by `field`.
    pub fn order_desc(self, field: &str) -> Self {
        self.order_by(field, Dir::Desc)
    }

    // ========================================================================
    // Paging
    // ========================================================================

    /// Sets the page to return. Without one, every match lands on page 1.
    pub fn page(mut self, page: PageSpec) -> Self {
        self.page = Some(page);
        self
    }

    // ========================================================================
    // Introspection
    // ========================================================================

    /// Returns the schema this query runs over.
    pub fn schema(&self) -> &'s Schema {
        self.schema
    }

    /// Returns the filter spec.
    pub fn filter_spec(&self) -> &FilterSpec {
        &self.filter
    }

    /// Returns the effective sort: the explicit one or the schema default.
    pub fn sort_spec(&self) -> SortSpec {
        self.sort
            .clone()
            .unwrap_or_else(|| SortSpec::default_for(self.schema))
    }

    // ========================================================================
    // Execution
    // ========================================================================

    /// Tests one record against every filter stage.
    pub fn matches<T>(&self, record: &T, now: &DateTime<FixedOffset>) -> bool
    where
        T: Record + ?Sized,
    {
        Stages::new(self.schema, &self.filter, now).accepts(record)
    }

    /// Filters and sorts without paginating.
    pub fn filter_records<'a, T>(&self, records: &'a [T], now: &DateTime<FixedOffset>) -> Vec<&'a T>
    where
        T: Record,
    {
        let stages = Stages::new(self.schema, &self.filter, now);
        let matched: Vec<&'a T> = records.iter().filter(|r| stages.accepts(*r)).collect();
        sort_records(&matched, self.schema, &self.sort_spec(), now.offset())
    }

    /// Counts matching records.
    pub fn count<T>(&self, records: &[T], now: &DateTime<FixedOffset>) -> usize
    where
        T: Record,
    {
        let stages = Stages::new(self.schema, &self.filter, now);
        records.iter().filter(|r| stages.accepts(*r)).count()
    }

    /// Runs the full pipeline.
    pub fn run<'a, T>(&self, records: &'a [T], now: &DateTime<FixedOffset>) -> QueryResult<'a, T>
    where
        T: Record,
    {
        let _span = tracing::debug_span!("query", schema = self.schema.name()).entered();

        let sorted = self.filter_records(records, now);
        let page = self.page.unwrap_or_else(|| PageSpec::whole(sorted.len()));
        let result = paginate(&sorted, &page);

        tracing::debug!(
            input = records.len(),
            matched = result.total_count,
            page = result.page_number,
            total_pages = result.total_pages,
            "query finished"
        );
        result
    }
}

/// Runs the pipeline with explicit specs.
///
/// `now` is both the reference instant for temporal buckets and the source
/// of the local offset used for day boundaries and naive date strings.
pub fn query<'a, T>(
    records: &'a [T],
    schema: &Schema,
    filter: &FilterSpec,
    sort: &SortSpec,
    page: &PageSpec,
    now: &DateTime<FixedOffset>,
) -> QueryResult<'a, T>
where
    T: Record,
{
    Query::new(schema)
        .filter(filter.clone())
        .sort(sort.clone())
        .page(*page)
        .run(records, now)
}

/// The filter stages with per-call values precomputed.
struct Stages<'q> {
    schema: &'q Schema,
    filter: &'q FilterSpec,
    needle: String,
    now: Timestamp,
    zone: FixedOffset,
}

impl<'q> Stages<'q> {
    fn new(schema: &'q Schema, filter: &'q FilterSpec, now: &DateTime<FixedOffset>) -> Self {
        if filter.owner_id.is_some() && schema.owner().is_none() {
            tracing::debug!(schema = schema.name(), "owner filter ignored: schema has no owner field");
        }
        Stages {
            schema,
            filter,
            needle: normalize_term(&filter.search_term),
            now: Timestamp::from_datetime(now),
            zone: *now.offset(),
        }
    }

    fn accepts<T>(&self, record: &T) -> bool
    where
        T: Record + ?Sized,
    {
        self.owned(record)
            && matches_normalized(record, self.schema.searchable(), &self.needle)
            && in_window(
                record,
                self.schema,
                self.filter.date_from,
                self.filter.date_to,
                &self.zone,
            )
            && self.in_bucket(record)
    }

    fn owned<T>(&self, record: &T) -> bool
    where
        T: Record + ?Sized,
    {
        let (Some(owner_id), Some(field)) = (self.filter.owner_id.as_deref(), self.schema.owner())
        else {
            return true;
        };
        record
            .field_value(field)
            .search_text()
            .is_some_and(|value| value.trim() == owner_id.trim())
    }

    fn in_bucket<T>(&self, record: &T) -> bool
    where
        T: Record + ?Sized,
    {
        if self.filter.bucket.is_all() {
            return true;
        }
        let bucket = classify(record, self.schema, self.now, &self.zone);
        self.filter.bucket.accepts(bucket.as_ref())
    }
}
