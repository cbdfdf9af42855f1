//! Category seeding.

use fake::Fake;
use fake::faker::lorem::en::{Sentence, Word};
use inkpress_core::StoreError;
use inkpress_db::{CategoryStore, PgCategoryStore, PgPool};
use inkpress_models::{NewCategory, slugify};
use std::time::Instant;

pub const DEFAULT_CATEGORIES: [&str; 8] = [
    "React",
    "Rust",
    "Web Development",
    "DevOps",
    "Databases",
    "Design",
    "Career",
    "Tutorials",
];

/// Builds `count` categories: the defaults first, then generated names.
pub fn generate_categories(count: usize) -> Vec<NewCategory> {
    (0..count)
        .map(|i| {
            let name = match DEFAULT_CATEGORIES.get(i) {
                Some(name) => name.to_string(),
                None => {
                    let word: String = Word().fake();
                    format!("{} {}", capitalize(&word), i + 1)
                }
            };
            let description: String = Sentence(4..10).fake();

            NewCategory {
                slug: slugify(&name),
                name,
                description: Some(description.chars().take(200).collect()),
            }
        })
        .collect()
}

/// Inserts categories, skipping ones that already exist.
///
/// Returns the names of every requested category, existing or new.
pub async fn seed_categories(db: &PgPool, count: usize) -> anyhow::Result<Vec<String>> {
    let start_time = Instant::now();
    println!("📂 Seeding {} categories...", count);

    let store = PgCategoryStore::new(db.clone());
    let mut names = Vec::with_capacity(count);
    let mut inserted = 0;

    for category in generate_categories(count) {
        let name = category.name.clone();
        match store.insert(category).await {
            Ok(_) => inserted += 1,
            Err(StoreError::Conflict(_)) => {}
            Err(e) => return Err(e.into()),
        }
        names.push(name);
    }

    println!(
        "   ✓ Inserted {} categories ({} already present) in {:?}",
        inserted,
        count - inserted,
        start_time.elapsed()
    );

    Ok(names)
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
