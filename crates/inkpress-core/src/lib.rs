//! # Inkpress Core
//!
//! Core types, errors, and request-shaping logic for the Inkpress API.
//!
//! - [`errors`]: Application error taxonomy with HTTP response conversion
//! - [`pagination`]: Page windows, page results, and total-page arithmetic
//! - [`query`]: Compiles raw list parameters into a bounded [`QueryDescriptor`]
//!
//! # Example
//!
//! ```ignore
//! use std::collections::HashMap;
//! use inkpress_core::{QueryLimits, compile_query};
//!
//! let raw: HashMap<String, String> = [("limit".into(), "500".into())].into();
//! let descriptor = compile_query(&raw, &QueryLimits::default())?;
//! assert_eq!(descriptor.limit(), 100);
//! ```

pub mod errors;
pub mod pagination;
pub mod query;

// Re-export commonly used types at crate root
pub use errors::{AppError, ErrorKind, StoreError};
pub use pagination::{PageResult, PageWindow, QueryLimits, total_pages};
pub use query::{
    PostFilters, QueryDescriptor, SortDirection, SortField, SortSpec, compile as compile_query,
};
