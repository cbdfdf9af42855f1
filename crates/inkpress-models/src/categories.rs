//! Category domain models and DTOs.

use chrono::{DateTime, Utc};
use inkpress_core::AppError;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateCategoryDto {
    #[validate(length(min = 1, max = 50, message = "Name cannot be more than 50 characters"))]
    pub name: String,
    #[validate(length(max = 200, message = "Description cannot be more than 200 characters"))]
    pub description: Option<String>,
}

impl CreateCategoryDto {
    /// Trims the name and derives the slug.
    ///
    /// Fails when nothing is left of the name after trimming, or when the
    /// name contains no character that survives slug derivation.
    pub fn into_new_category(self) -> Result<NewCategory, AppError> {
        let name = self.name.trim().to_string();
        if name.is_empty() {
            return Err(AppError::bad_request("Please add a category name".to_string()));
        }

        let slug = slugify(&name);
        if slug.is_empty() {
            return Err(AppError::bad_request(format!(
                "Category name '{}' does not produce a usable slug",
                name
            )));
        }

        Ok(NewCategory {
            name,
            slug,
            description: self.description,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCategory {
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
}

/// Derives a URL slug from a category name.
///
/// Lowercases, drops everything outside `[a-z0-9_ ]`, then turns each run of
/// spaces into a single `-`.
///
/// ```
/// use inkpress_models::slugify;
///
/// assert_eq!(slugify("Web  Development!"), "web-development");
/// assert_eq!(slugify("C++ & Rust"), "c-rust");
/// ```
pub fn slugify(name: &str) -> String {
    let kept: String = name
        .to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_' || *c == ' ')
        .collect();

    let mut slug = String::with_capacity(kept.len());
    let mut in_spaces = false;
    for c in kept.chars() {
        if c == ' ' {
            if !in_spaces {
                slug.push('-');
            }
            in_spaces = true;
        } else {
            slug.push(c);
            in_spaces = false;
        }
    }
    slug
}
