//! Page window arithmetic and page results.
//!
//! A [`PageWindow`] is the validated `(page, limit)` pair of a list request.
//! Both values are at least 1, so [`PageWindow::skip`] is never negative.
//!
//! # Example
//!
//! ```
//! use inkpress_core::pagination::{PageWindow, total_pages};
//!
//! let window = PageWindow::new(3, 10);
//! assert_eq!(window.skip(), 20);
//! assert_eq!(total_pages(25, 10), 3);
//! assert_eq!(total_pages(0, 10), 0);
//! ```

/// Default number of items per page.
pub const DEFAULT_LIMIT: i64 = 10;

/// Hard ceiling on items per page.
pub const MAX_LIMIT: i64 = 100;

/// Bounds applied when normalizing pagination input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryLimits {
    /// Page size used when `limit` is absent or unusable.
    pub default_limit: i64,
    /// Largest page size a client may request.
    pub max_limit: i64,
    /// Reject unusable input with `InvalidQuery` instead of normalizing it.
    pub strict: bool,
}

impl QueryLimits {
    /// Builds limits, keeping `max_limit >= 1` and `default_limit` within `[1, max_limit]`.
    pub fn new(default_limit: i64, max_limit: i64, strict: bool) -> Self {
        let max_limit = max_limit.max(1);
        Self {
            default_limit: default_limit.clamp(1, max_limit),
            max_limit,
            strict,
        }
    }
}

impl Default for QueryLimits {
    fn default() -> Self {
        Self::new(DEFAULT_LIMIT, MAX_LIMIT, false)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    page: i64,
    limit: i64,
}

impl PageWindow {
    /// Creates a window; `page` and `limit` below 1 are raised to 1.
    pub fn new(page: i64, limit: i64) -> Self {
        Self {
            page: page.max(1),
            limit: limit.max(1),
        }
    }

    pub fn page(&self) -> i64 {
        self.page
    }

    pub fn limit(&self) -> i64 {
        self.limit
    }

    /// Number of items to skip: `(page - 1) * limit`, saturating on overflow.
    pub fn skip(&self) -> i64 {
        (self.page - 1).saturating_mul(self.limit)
    }
}

/// `ceil(total / limit)`, or 0 when there is nothing to page through.
pub fn total_pages(total: i64, limit: i64) -> i64 {
    if total <= 0 || limit <= 0 {
        return 0;
    }
    (total - 1) / limit + 1
}

/// One page of a collection plus its position in the full result set.
#[derive(Debug, Clone, PartialEq)]
pub struct PageResult<T> {
    pub items: Vec<T>,
    pub total: i64,
    pub page: i64,
    pub limit: i64,
    pub total_pages: i64,
}

impl<T> PageResult<T> {
    pub fn new(items: Vec<T>, total: i64, window: PageWindow) -> Self {
        Self {
            items,
            total,
            page: window.page(),
            limit: window.limit(),
            total_pages: total_pages(total, window.limit()),
        }
    }

    pub fn count(&self) -> usize {
        self.items.len()
    }

    pub fn map<U, F>(self, f: F) -> PageResult<U>
    where
        F: FnMut(T) -> U,
    {
        PageResult {
            items: self.items.into_iter().map(f).collect(),
            total: self.total,
            page: self.page,
            limit: self.limit,
            total_pages: self.total_pages,
        }
    }
}
