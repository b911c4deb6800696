//! Per-screen query state.
//!
//! A [`Screen`] is what one CRM list view holds between renders: the fetched
//! collection plus the user's current search, date window, status selector,
//! sort and page. Every input handler returns the screen to page 1, so a
//! narrowing filter never strands the user on a page that no longer exists.

use chrono::{DateTime, FixedOffset, NaiveDate};
use crm_seeker::{
    page_count, temporal_sort_rule, BucketFilter, Classifier, FilterSpec, PageSpec, Query,
    QueryResult, Record, Schema, SortSpec,
};
use serde::de::DeserializeOwned;

use crate::envelope::decode_records;
use crate::error::Result;

/// State of one list screen over records of type `T`.
#[derive(Debug, Clone)]
pub struct Screen<T> {
    name: String,
    schema: Schema,
    records: Vec<T>,
    filter: FilterSpec,
    sort: SortSpec,
    default_sort: SortSpec,
    page: PageSpec,
}

impl<T: Record> Screen<T> {
    /// Creates a screen on page 1, sorted by the schema's default field.
    pub fn new(name: impl Into<String>, schema: Schema, page_size: usize) -> Result<Self> {
        let page = PageSpec::first(page_size)?;
        let default_sort = SortSpec::default_for(&schema);
        Ok(Screen {
            name: name.into(),
            schema,
            records: Vec::new(),
            filter: FilterSpec::new(),
            sort: default_sort.clone(),
            default_sort,
            page,
        })
    }

    /// Replaces the sort used when no explicit sort has been chosen.
    pub fn with_default_sort(mut self, sort: SortSpec) -> Self {
        self.sort = sort.clone();
        self.default_sort = sort;
        self
    }

    /// Seeds the screen with records.
    pub fn with_records(mut self, records: Vec<T>) -> Self {
        self.records = records;
        self
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn records(&self) -> &[T] {
        &self.records
    }

    pub fn filter(&self) -> &FilterSpec {
        &self.filter
    }

    pub fn sort(&self) -> &SortSpec {
        &self.sort
    }

    pub fn page(&self) -> PageSpec {
        self.page
    }

    // ========================================================================
    // Filter inputs
    // ========================================================================

    /// Sets the search term.
    pub fn set_search(&mut self, term: impl Into<String>) {
        self.filter.search_term = term.into();
        self.page = self.page.reset();
    }

    /// Sets or clears the first day of the date window.
    pub fn set_date_from(&mut self, date: Option<NaiveDate>) {
        self.filter.date_from = date;
        self.page = self.page.reset();
    }

    /// Sets or clears the last day of the date window.
    pub fn set_date_to(&mut self, date: Option<NaiveDate>) {
        self.filter.date_to = date;
        self.page = self.page.reset();
    }

    /// Sets the status selector.
    ///
    /// On ended/upcoming screens this also picks the sort: most recently
    /// ended first, or soonest upcoming first. Going back to `All` restores
    /// the default sort.
    pub fn set_bucket(&mut self, bucket: impl Into<BucketFilter>) {
        let bucket = bucket.into();
        if self.schema.classification() == Classifier::Temporal {
            self.sort = match &bucket {
                BucketFilter::Only(b) => temporal_sort_rule(&self.schema, b)
                    .unwrap_or_else(|| self.default_sort.clone()),
                BucketFilter::All => self.default_sort.clone(),
            };
        }
        self.filter.bucket = bucket;
        self.page = self.page.reset();
    }

    /// Sets or clears the owner scope.
    pub fn set_owner(&mut self, owner_id: Option<String>) {
        self.filter.owner_id = owner_id;
        self.page = self.page.reset();
    }

    /// Clears every filter input.
    pub fn clear_filters(&mut self) {
        let owner = self.filter.owner_id.take();
        self.filter = FilterSpec {
            owner_id: owner,
            ..FilterSpec::new()
        };
        self.sort = self.default_sort.clone();
        self.page = self.page.reset();
    }

    // ========================================================================
    // Sorting
    // ========================================================================

    /// Sets the sort explicitly.
    pub fn set_sort(&mut self, sort: SortSpec) {
        self.sort = sort;
    }

    /// Column-header toggle: flips the direction on the current field, or
    /// sorts ascending by a new one.
    pub fn toggle_sort(&mut self, field: &str) {
        self.sort = if self.sort.field == field {
            SortSpec::new(field, self.sort.dir.toggled())
        } else {
            SortSpec::asc(field)
        };
    }

    // ========================================================================
    // Paging
    // ========================================================================

    /// Changes the page size and returns to page 1.
    pub fn set_page_size(&mut self, page_size: usize) -> Result<()> {
        self.page = PageSpec::first(page_size)?;
        Ok(())
    }

    /// Pages available under the current filter.
    pub fn total_pages(&self, now: &DateTime<FixedOffset>) -> usize {
        let matched = self.query().count(&self.records, now);
        page_count(matched, self.page.page_size())
    }

    /// Moves to `page`. Returns `false`, leaving the page unchanged, when
    /// `page` is outside `[1, total_pages]`.
    pub fn set_page(&mut self, page: usize, now: &DateTime<FixedOffset>) -> bool {
        let total_pages = self.total_pages(now);
        match self.page.go_to(page, total_pages) {
            Some(spec) => {
                self.page = spec;
                true
            }
            None => {
                tracing::debug!(
                    screen = %self.name,
                    requested = page,
                    total_pages,
                    "page change ignored"
                );
                false
            }
        }
    }

    /// Moves forward one page if there is one.
    pub fn next_page(&mut self, now: &DateTime<FixedOffset>) -> bool {
        let next = self.page.page_number().saturating_add(1);
        self.set_page(next, now)
    }

    /// Moves back one page if there is one.
    pub fn prev_page(&mut self, now: &DateTime<FixedOffset>) -> bool {
        let prev = self.page.page_number().saturating_sub(1);
        self.set_page(prev, now)
    }

    // ========================================================================
    // Records
    // ========================================================================

    /// Swaps in a freshly fetched collection, keeping the filters and
    /// clamping the page into the new range.
    pub fn replace_records(&mut self, records: Vec<T>, now: &DateTime<FixedOffset>) {
        self.records = records;
        let matched = self.query().count(&self.records, now);
        let clamped = self.page.clamped(matched);
        if clamped != self.page {
            tracing::debug!(
                screen = %self.name,
                from = self.page.page_number(),
                to = clamped.page_number(),
                "page clamped after refresh"
            );
        }
        self.page = clamped;
    }

    /// Runs the pipeline over the current state.
    pub fn view(&self, now: &DateTime<FixedOffset>) -> QueryResult<'_, T> {
        self.query().page(self.page).run(&self.records, now)
    }

    fn query(&self) -> Query<'_> {
        Query::new(&self.schema)
            .filter(self.filter.clone())
            .sort(self.sort.clone())
    }
}

impl<T: Record + DeserializeOwned> Screen<T> {
    /// Decodes a fetch response body and replaces the records with it.
    ///
    /// Returns the number of records decoded. On a decode error the
    /// current records are kept.
    pub fn refresh_from_json(&mut self, body: &str, now: &DateTime<FixedOffset>) -> Result<usize> {
        let records: Vec<T> = decode_records(body)?;
        let count = records.len();
        self.replace_records(records, now);
        Ok(count)
    }
}
