//! Compiles raw list-request parameters into a [`QueryDescriptor`].
//!
//! Input is untrusted and loosely typed (`HashMap<String, String>` straight
//! from the query string). Each recognised field is handled on its own and
//! unknown fields are ignored:
//!
//! | Parameter  | Effect                                                       |
//! |------------|--------------------------------------------------------------|
//! | `category` | equality filter, skipped when empty                          |
//! | `author`   | equality filter, skipped when empty                          |
//! | `tag`      | membership filter on the post's tags, skipped when empty     |
//! | `sort`     | `[-]field`, `-` = descending; default `-createdAt`           |
//! | `page`     | positive integer, unusable input becomes 1                   |
//! | `limit`    | positive integer, unusable input becomes the default, capped |
//!
//! With [`QueryLimits::strict`] set, unusable `page`/`limit`, an over-ceiling
//! `limit` and an unknown sort field fail with `InvalidQuery` instead.

use std::collections::HashMap;
use std::fmt;

use crate::errors::AppError;
use crate::pagination::{PageWindow, QueryLimits};

/// Filters applied by both the bounded fetch and the count.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostFilters {
    /// Exact match on the post category.
    pub category: Option<String>,
    /// Exact match on the post author.
    pub author: Option<String>,
    /// The post's tag list must contain this value.
    pub tag: Option<String>,
}

impl PostFilters {
    pub fn is_empty(&self) -> bool {
        self.category.is_none() && self.author.is_none() && self.tag.is_none()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn as_sql(self) -> &'static str {
        match self {
            SortDirection::Ascending => "ASC",
            SortDirection::Descending => "DESC",
        }
    }
}

/// Fields a list may be sorted on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    CreatedAt,
    UpdatedAt,
    Title,
    Author,
    Category,
}

impl SortField {
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "createdAt" | "created_at" => Some(SortField::CreatedAt),
            "updatedAt" | "updated_at" => Some(SortField::UpdatedAt),
            "title" => Some(SortField::Title),
            "author" => Some(SortField::Author),
            "category" => Some(SortField::Category),
            _ => None,
        }
    }

    /// Column name in the `posts` table.
    pub fn column(self) -> &'static str {
        match self {
            SortField::CreatedAt => "created_at",
            SortField::UpdatedAt => "updated_at",
            SortField::Title => "title",
            SortField::Author => "author",
            SortField::Category => "category",
        }
    }

    /// Field name as exposed on the wire.
    pub fn api_name(self) -> &'static str {
        match self {
            SortField::CreatedAt => "createdAt",
            SortField::UpdatedAt => "updatedAt",
            SortField::Title => "title",
            SortField::Author => "author",
            SortField::Category => "category",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortSpec {
    pub field: SortField,
    pub direction: SortDirection,
}

impl Default for SortSpec {
    /// Newest first.
    fn default() -> Self {
        Self {
            field: SortField::CreatedAt,
            direction: SortDirection::Descending,
        }
    }
}

impl fmt::Display for SortSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.direction == SortDirection::Descending {
            f.write_str("-")?;
        }
        f.write_str(self.field.api_name())
    }
}

/// Validated, normalized intent of a list request. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryDescriptor {
    filters: PostFilters,
    sort: SortSpec,
    window: PageWindow,
}

impl QueryDescriptor {
    pub fn new(filters: PostFilters, sort: SortSpec, window: PageWindow) -> Self {
        Self {
            filters,
            sort,
            window,
        }
    }

    pub fn filters(&self) -> &PostFilters {
        &self.filters
    }

    pub fn sort(&self) -> SortSpec {
        self.sort
    }

    pub fn window(&self) -> PageWindow {
        self.window
    }

    pub fn page(&self) -> i64 {
        self.window.page()
    }

    pub fn limit(&self) -> i64 {
        self.window.limit()
    }

    pub fn skip(&self) -> i64 {
        self.window.skip()
    }
}

/// Builds a descriptor from raw query parameters.
pub fn compile(
    raw: &HashMap<String, String>,
    limits: &QueryLimits,
) -> Result<QueryDescriptor, AppError> {
    let filters = PostFilters {
        category: non_empty(raw, "category"),
        author: non_empty(raw, "author"),
        tag: non_empty(raw, "tag"),
    };

    let sort = compile_sort(non_empty(raw, "sort").as_deref(), limits)?;
    let page = compile_page(non_empty(raw, "page").as_deref(), limits)?;
    let limit = compile_limit(non_empty(raw, "limit").as_deref(), limits)?;

    Ok(QueryDescriptor::new(
        filters,
        sort,
        PageWindow::new(page, limit),
    ))
}

fn non_empty(raw: &HashMap<String, String>, key: &str) -> Option<String> {
    raw.get(key)
        .map(|value| value.trim())
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}

fn compile_sort(raw: Option<&str>, limits: &QueryLimits) -> Result<SortSpec, AppError> {
    let Some(raw) = raw else {
        return Ok(SortSpec::default());
    };

    let (direction, name) = match raw.strip_prefix('-') {
        Some(name) => (SortDirection::Descending, name),
        None => (SortDirection::Ascending, raw),
    };

    match SortField::parse(name) {
        Some(field) => Ok(SortSpec { field, direction }),
        None if limits.strict => Err(AppError::invalid_query(format!(
            "cannot sort by '{}'",
            name
        ))),
        None => {
            tracing::debug!(sort = %raw, "unknown sort field, using default order");
            Ok(SortSpec::default())
        }
    }
}

fn compile_page(raw: Option<&str>, limits: &QueryLimits) -> Result<i64, AppError> {
    match raw.map(str::parse::<i64>) {
        None => Ok(1),
        Some(Ok(page)) if page >= 1 => Ok(page),
        Some(_) if limits.strict => Err(AppError::invalid_query(
            "page must be a positive integer".to_string(),
        )),
        Some(_) => Ok(1),
    }
}

fn compile_limit(raw: Option<&str>, limits: &QueryLimits) -> Result<i64, AppError> {
    match raw.map(str::parse::<i64>) {
        None => Ok(limits.default_limit),
        Some(Ok(limit)) if limit > limits.max_limit => {
            if limits.strict {
                Err(AppError::invalid_query(format!(
                    "limit must not exceed {}",
                    limits.max_limit
                )))
            } else {
                Ok(limits.max_limit)
            }
        }
        Some(Ok(limit)) if limit >= 1 => Ok(limit),
        Some(_) if limits.strict => Err(AppError::invalid_query(
            "limit must be a positive integer".to_string(),
        )),
        Some(_) => Ok(limits.default_limit),
    }
}
