//! Pagination bounds for list endpoints.
//!
//! # Environment Variables
//!
//! - `QUERY_DEFAULT_LIMIT`: page size when `limit` is absent or unusable (default: 10)
//! - `QUERY_MAX_LIMIT`: hard ceiling on `limit` (default: 100)
//! - `QUERY_STRICT`: reject unusable `page`/`limit`/`sort` with 400 instead of
//!   normalizing them (default: false)

use inkpress_core::QueryLimits;
use inkpress_core::pagination::{DEFAULT_LIMIT, MAX_LIMIT};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QueryConfig {
    pub default_limit: i64,
    pub max_limit: i64,
    pub strict: bool,
}

impl QueryConfig {
    pub fn from_env() -> Self {
        Self {
            default_limit: crate::env_or("QUERY_DEFAULT_LIMIT", DEFAULT_LIMIT),
            max_limit: crate::env_or("QUERY_MAX_LIMIT", MAX_LIMIT),
            strict: crate::env_flag("QUERY_STRICT", false),
        }
    }

    /// Normalized bounds handed to the query compiler.
    pub fn limits(&self) -> QueryLimits {
        QueryLimits::new(self.default_limit, self.max_limit, self.strict)
    }
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            default_limit: DEFAULT_LIMIT,
            max_limit: MAX_LIMIT,
            strict: false,
        }
    }
}
