//! Feature modules.
//!
//! Each module follows the same layout:
//!
//! - `controller.rs`: HTTP handlers, one per route
//! - `service.rs`: Store orchestration and error mapping
//! - `router.rs`: Axum router configuration

pub mod categories;
pub mod posts;

use inkpress_core::AppError;
use uuid::Uuid;

/// Parses a path id. Anything that is not a UUID names no resource, so it
/// fails the same way a missing resource does.
pub(crate) fn parse_resource_id(raw: &str, not_found_message: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(raw).map_err(|_| AppError::not_found(not_found_message))
}
