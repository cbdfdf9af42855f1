use std::sync::Arc;

use anyhow::Context;
use inkpress_config::{CorsConfig, JwtConfig, QueryConfig, ServerConfig, StoreBackend};
use inkpress_db::{
    CategoryStore, MemoryCategoryStore, MemoryPostStore, PgCategoryStore, PgPostStore, PostStore,
    init_db_pool, run_migrations,
};
use tracing::info;

/// Shared by every request. Cloning is cheap: stores sit behind `Arc`.
#[derive(Clone)]
pub struct AppState {
    pub posts: Arc<dyn PostStore>,
    pub categories: Arc<dyn CategoryStore>,
    pub jwt_config: JwtConfig,
    pub query_config: QueryConfig,
    pub cors_config: CorsConfig,
}

impl AppState {
    pub fn new(
        posts: Arc<dyn PostStore>,
        categories: Arc<dyn CategoryStore>,
        jwt_config: JwtConfig,
    ) -> Self {
        Self {
            posts,
            categories,
            jwt_config,
            query_config: QueryConfig::default(),
            cors_config: CorsConfig::default(),
        }
    }

    pub fn with_query_config(mut self, query_config: QueryConfig) -> Self {
        self.query_config = query_config;
        self
    }

    pub fn with_cors_config(mut self, cors_config: CorsConfig) -> Self {
        self.cors_config = cors_config;
        self
    }
}

/// Builds the state from the environment, connecting to the configured store.
pub async fn init_app_state(server_config: &ServerConfig) -> anyhow::Result<AppState> {
    let (posts, categories): (Arc<dyn PostStore>, Arc<dyn CategoryStore>) =
        match server_config.store_backend {
            StoreBackend::Postgres => {
                let database_url =
                    std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;
                let pool = init_db_pool(&database_url)
                    .await
                    .context("Failed to connect to database")?;
                run_migrations(&pool)
                    .await
                    .context("Failed to apply migrations")?;
                info!("Connected to PostgreSQL store");

                (
                    Arc::new(PgPostStore::new(pool.clone())),
                    Arc::new(PgCategoryStore::new(pool)),
                )
            }
            StoreBackend::Memory => {
                info!("Using in-memory store; data is lost on shutdown");
                (
                    Arc::new(MemoryPostStore::new()),
                    Arc::new(MemoryCategoryStore::new()),
                )
            }
        };

    Ok(AppState::new(posts, categories, JwtConfig::from_env())
        .with_query_config(QueryConfig::from_env())
        .with_cors_config(CorsConfig::from_env()))
}
