//! Page slicing and page-count bookkeeping.

use serde::Serialize;

use crate::error::{Result, SeekerError};

/// Page size and 1-based page number.
///
/// Both are validated on construction, so a `PageSpec` always has
/// `page_size > 0` and `page_number >= 1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PageSpec {
    page_size: usize,
    page_number: usize,
}

impl PageSpec {
    /// Creates a page spec, rejecting a zero size or page number.
    pub fn new(page_size: usize, page_number: usize) -> Result<Self> {
        if page_size == 0 {
            return Err(SeekerError::InvalidPageSize);
        }
        if page_number == 0 {
            return Err(SeekerError::InvalidPageNumber(page_number));
        }
        Ok(PageSpec {
            page_size,
            page_number,
        })
    }

    /// First page of the given size.
    pub fn first(page_size: usize) -> Result<Self> {
        PageSpec::new(page_size, 1)
    }

    /// A single page large enough to hold `len` items.
    pub(crate) fn whole(len: usize) -> Self {
        PageSpec {
            page_size: len.max(1),
            page_number: 1,
        }
    }

    /// Returns the page size.
    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Returns the 1-based page number.
    pub fn page_number(&self) -> usize {
        self.page_number
    }

    /// Same size, page 1.
    pub fn reset(self) -> Self {
        PageSpec {
            page_number: 1,
            ..self
        }
    }

    /// Moves to `page` if it lies in `[1, total_pages]`.
    ///
    /// Out-of-range requests return `None` so the caller can leave its
    /// state alone, the way disabled Prev/Next buttons do.
    pub fn go_to(self, page: usize, total_pages: usize) -> Option<Self> {
        (1..=total_pages).contains(&page).then_some(PageSpec {
            page_number: page,
            ..self
        })
    }

    /// Clamps the page number into `[1, page_count(total_count)]`.
    pub fn clamped(self, total_count: usize) -> Self {
        let last = page_count(total_count, self.page_size);
        PageSpec {
            page_number: self.page_number.clamp(1, last),
            ..self
        }
    }

    /// Index range of this page within a collection of `total_count` items.
    fn bounds(&self, total_count: usize) -> (usize, usize) {
        let start = (self.page_number - 1)
            .saturating_mul(self.page_size)
            .min(total_count);
        let end = start.saturating_add(self.page_size).min(total_count);
        (start, end)
    }
}

/// Number of pages needed for `total_count` items, never less than one.
///
/// ```
/// use crm_seeker::page_count;
///
/// assert_eq!(page_count(0, 10), 1);
/// assert_eq!(page_count(10, 10), 1);
/// assert_eq!(page_count(11, 10), 2);
/// ```
pub fn page_count(total_count: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 1;
    }
    total_count.div_ceil(page_size).max(1)
}

/// One page of results plus the totals pagination controls need.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<T> {
    /// Items on the requested page.
    pub slice: Vec<T>,
    /// Items across all pages.
    pub total_count: usize,
    /// `max(1, ceil(total_count / page_size))`.
    pub total_pages: usize,
    /// The page that was requested (not clamped).
    pub page_number: usize,
}

impl<T> Page<T> {
    /// Returns `true` if this page holds no items.
    pub fn is_empty(&self) -> bool {
        self.slice.is_empty()
    }

    /// Returns `true` if a previous page exists.
    pub fn has_prev(&self) -> bool {
        self.page_number > 1 && self.page_number <= self.total_pages
    }

    /// Returns `true` if a next page exists.
    pub fn has_next(&self) -> bool {
        self.page_number < self.total_pages
    }
}

/// Slices out one page. Out-of-range pages come back empty.
pub fn paginate<T: Clone>(records: &[T], spec: &PageSpec) -> Page<T> {
    let total_count = records.len();
    let (start, end) = spec.bounds(total_count);
    Page {
        slice: records[start..end].to_vec(),
        total_count,
        total_pages: page_count(total_count, spec.page_size),
        page_number: spec.page_number,
    }
}
