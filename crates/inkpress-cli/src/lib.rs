//! # Inkpress CLI
//!
//! Administrative utilities for Inkpress development and operations.
//!
//! - [`seeder`]: Fake categories and posts for local databases
//! - [`token`]: Access token issuance for manual API testing
//!
//! ## Usage
//!
//! ```ignore
//! use inkpress_cli::seeder::{seed_all, SeedConfig};
//!
//! let config = SeedConfig::new(200); // 200 posts, default categories
//! seed_all(&pool, config).await?;
//! ```

pub mod seeder;
pub mod token;
