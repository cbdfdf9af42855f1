//! Database seeding.
//!
//! Generation runs on the rayon pool; inserts go through the Postgres stores
//! in batches.

pub mod categories;
pub mod posts;

use inkpress_db::PgPool;
use std::time::Instant;

pub use categories::{DEFAULT_CATEGORIES, generate_categories, seed_categories};
pub use posts::{generate_posts, seed_posts};

#[derive(Clone, Debug)]
pub struct SeedConfig {
    pub posts: usize,
    pub categories: usize,
}

impl SeedConfig {
    pub fn new(posts: usize) -> Self {
        Self {
            posts,
            categories: DEFAULT_CATEGORIES.len(),
        }
    }

    pub fn with_categories(mut self, categories: usize) -> Self {
        self.categories = categories;
        self
    }
}

/// Seeds categories, then posts spread across them.
pub async fn seed_all(db: &PgPool, config: SeedConfig) -> anyhow::Result<()> {
    let start_time = Instant::now();
    println!("🌱 Seeding database...");

    let category_names = seed_categories(db, config.categories).await?;
    seed_posts(db, config.posts, &category_names).await?;

    println!("✅ Seeding finished in {:?}", start_time.elapsed());
    Ok(())
}

/// Removes every post and category.
pub async fn clear_seed(db: &PgPool) -> anyhow::Result<()> {
    let mut tx = db.begin().await?;
    let posts = sqlx::query("DELETE FROM posts").execute(&mut *tx).await?;
    let categories = sqlx::query("DELETE FROM categories")
        .execute(&mut *tx)
        .await?;
    tx.commit().await?;

    println!(
        "   ✓ Removed {} posts and {} categories",
        posts.rows_affected(),
        categories.rows_affected()
    );
    Ok(())
}
