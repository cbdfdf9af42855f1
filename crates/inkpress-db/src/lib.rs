//! # Inkpress DB
//!
//! Collection stores for the Inkpress API.
//!
//! Handlers only ever see the [`PostStore`] and [`CategoryStore`] traits.
//! Two implementations exist: [`PgPostStore`]/[`PgCategoryStore`] backed by
//! PostgreSQL through SQLx, and [`MemoryPostStore`]/[`MemoryCategoryStore`]
//! for tests and database-free local runs.
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use inkpress_db::{PgPostStore, PostStore, init_db_pool, run_migrations};
//!
//! let pool = init_db_pool(&database_url).await?;
//! run_migrations(&pool).await?;
//! let posts: Arc<dyn PostStore> = Arc::new(PgPostStore::new(pool));
//! ```

pub mod memory;
pub mod postgres;
pub mod store;

pub use memory::{MemoryCategoryStore, MemoryPostStore};
pub use postgres::{PgCategoryStore, PgPostStore};
pub use store::{CategoryStore, PostStore};

// Re-export PgPool for convenience
pub use sqlx::PgPool;

use sqlx::postgres::PgPoolOptions;

const MAX_CONNECTIONS: u32 = 10;

/// Opens a PostgreSQL connection pool.
///
/// The pool is cheaply cloneable; create it once at startup and hand it to
/// the stores.
pub async fn init_db_pool(database_url: &str) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(MAX_CONNECTIONS)
        .connect(database_url)
        .await
}

/// Applies the embedded migrations under `migrations/`.
pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}
