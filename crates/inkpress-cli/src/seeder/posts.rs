//! Post seeding.
//!
//! Provides functions for generating and inserting fake posts.

use fake::Fake;
use fake::faker::boolean::en::Boolean;
use fake::faker::lorem::en::{Paragraphs, Sentence, Words};
use fake::faker::name::en::Name;
use inkpress_db::{PgPool, PgPostStore};
use inkpress_models::NewPost;
use rayon::prelude::*;
use std::time::Instant;

const BATCH_SIZE: usize = 500;
const FALLBACK_CATEGORY: &str = "General";

/// Generates `count` posts spread round-robin over `categories`.
pub fn generate_posts(count: usize, categories: &[String]) -> Vec<NewPost> {
    (0..count)
        .into_par_iter()
        .map(|i| {
            let category = if categories.is_empty() {
                FALLBACK_CATEGORY.to_string()
            } else {
                categories[i % categories.len()].clone()
            };
            generate_post(category)
        })
        .collect()
}

fn generate_post(category: String) -> NewPost {
    let title: String = Sentence(3..8).fake();
    let paragraphs: Vec<String> = Paragraphs(2..6).fake();
    let excerpt: String = Sentence(8..16).fake();
    let tags: Vec<String> = Words(1..4).fake();
    let author: String = Name().fake();

    let mut tags = tags;
    tags.sort();
    tags.dedup();

    NewPost {
        title: title.trim_end_matches('.').chars().take(100).collect(),
        content: paragraphs.join("\n\n"),
        excerpt: Some(excerpt.chars().take(200).collect()),
        featured_image: None,
        author,
        category,
        tags,
        is_published: Boolean(80).fake(),
    }
}

/// Generates and inserts posts in batches.
pub async fn seed_posts(db: &PgPool, count: usize, categories: &[String]) -> anyhow::Result<u64> {
    let start_time = Instant::now();
    println!("📝 Seeding {} posts...", count);

    let posts = generate_posts(count, categories);
    let store = PgPostStore::new(db.clone());

    let mut inserted = 0;
    for chunk in posts.chunks(BATCH_SIZE) {
        inserted += store.insert_batch(chunk).await?;
    }

    println!("   ✓ Inserted {} posts in {:?}", inserted, start_time.elapsed());
    Ok(inserted)
}
