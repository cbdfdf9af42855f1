//! # Inkpress Config
//!
//! Configuration types for the Inkpress API.
//!
//! Every struct here is read once from environment variables at startup and
//! handed to the application state. Nothing mutates it afterwards.
//!
//! - [`jwt`]: Credential signing and verification settings
//! - [`cors`]: CORS (Cross-Origin Resource Sharing) configuration
//! - [`query`]: Pagination bounds and strict-mode switch for list endpoints
//! - [`server`]: Bind address and store backend selection
//!
//! # Example
//!
//! ```ignore
//! use inkpress_config::{JwtConfig, CorsConfig, QueryConfig, ServerConfig};
//!
//! let jwt_config = JwtConfig::from_env();
//! let query_config = QueryConfig::from_env();
//! ```

pub mod cors;
pub mod jwt;
pub mod query;
pub mod server;

// Re-export commonly used types at crate root
pub use cors::CorsConfig;
pub use jwt::JwtConfig;
pub use query::QueryConfig;
pub use server::{ServerConfig, StoreBackend};

/// Reads an environment variable and parses it, falling back to `default`.
pub(crate) fn env_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|s| s.trim().parse().ok())
        .unwrap_or(default)
}

/// Reads a boolean flag; accepts `true`/`1`/`yes` (case-insensitive).
pub(crate) fn env_flag(key: &str, default: bool) -> bool {
    match std::env::var(key) {
        Ok(value) => matches!(value.trim().to_lowercase().as_str(), "true" | "1" | "yes"),
        Err(_) => default,
    }
}
