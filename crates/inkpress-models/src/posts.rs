use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::{Validate, ValidationError};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    pub excerpt: Option<String>,
    pub featured_image: Option<String>,
    pub author: String,
    pub category: String,
    pub tags: Vec<String>,
    pub is_published: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Post {
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreatePostDto {
    #[validate(
        length(min = 1, max = 100, message = "Title must be between 1 and 100 characters"),
        custom(function = "not_blank", message = "Title cannot be blank")
    )]
    pub title: String,
    #[validate(
        length(min = 1, message = "Content is required"),
        custom(function = "not_blank", message = "Content cannot be blank")
    )]
    pub content: String,
    #[validate(length(max = 200, message = "Excerpt cannot exceed 200 characters"))]
    pub excerpt: Option<String>,
    pub featured_image: Option<String>,
    /// Defaults to the caller's subject id when omitted
    #[validate(
        length(min = 1, max = 100, message = "Author must be between 1 and 100 characters"),
        custom(function = "not_blank", message = "Author cannot be blank")
    )]
    pub author: Option<String>,
    #[validate(
        length(min = 1, max = 50, message = "Category must be between 1 and 50 characters"),
        custom(function = "not_blank", message = "Category cannot be blank")
    )]
    pub category: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub is_published: bool,
}

impl CreatePostDto {
    /// Resolves the author and normalizes tags for insertion.
    pub fn into_new_post(self, default_author: &str) -> NewPost {
        NewPost {
            title: self.title.trim().to_string(),
            content: self.content,
            excerpt: self.excerpt,
            featured_image: self.featured_image,
            author: self
                .author
                .map(|a| a.trim().to_string())
                .unwrap_or_else(|| default_author.to_string()),
            category: self.category.trim().to_string(),
            tags: normalize_tags(self.tags),
            is_published: self.is_published,
        }
    }
}

/// A post ready to be inserted; the store assigns id and timestamps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPost {
    pub title: String,
    pub content: String,
    pub excerpt: Option<String>,
    pub featured_image: Option<String>,
    pub author: String,
    pub category: String,
    pub tags: Vec<String>,
    pub is_published: bool,
}

#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePostDto {
    #[validate(
        length(min = 1, max = 100, message = "Title must be between 1 and 100 characters"),
        custom(function = "not_blank", message = "Title cannot be blank")
    )]
    pub title: Option<String>,
    #[validate(
        length(min = 1, message = "Content cannot be empty"),
        custom(function = "not_blank", message = "Content cannot be blank")
    )]
    pub content: Option<String>,
    #[validate(length(max = 200, message = "Excerpt cannot exceed 200 characters"))]
    pub excerpt: Option<String>,
    pub featured_image: Option<String>,
    #[validate(
        length(min = 1, max = 100, message = "Author must be between 1 and 100 characters"),
        custom(function = "not_blank", message = "Author cannot be blank")
    )]
    pub author: Option<String>,
    #[validate(
        length(min = 1, max = 50, message = "Category must be between 1 and 50 characters"),
        custom(function = "not_blank", message = "Category cannot be blank")
    )]
    pub category: Option<String>,
    pub tags: Option<Vec<String>>,
    pub is_published: Option<bool>,
}

/// Partial update: `None` leaves the stored value untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostPatch {
    pub title: Option<String>,
    pub content: Option<String>,
    pub excerpt: Option<String>,
    pub featured_image: Option<String>,
    pub author: Option<String>,
    pub category: Option<String>,
    pub tags: Option<Vec<String>>,
    pub is_published: Option<bool>,
}

impl PostPatch {
    /// Applies the patch in place. Timestamps are the caller's job.
    pub fn apply(&self, post: &mut Post) {
        if let Some(title) = &self.title {
            post.title = title.clone();
        }
        if let Some(content) = &self.content {
            post.content = content.clone();
        }
        if let Some(excerpt) = &self.excerpt {
            post.excerpt = Some(excerpt.clone());
        }
        if let Some(featured_image) = &self.featured_image {
            post.featured_image = Some(featured_image.clone());
        }
        if let Some(author) = &self.author {
            post.author = author.clone();
        }
        if let Some(category) = &self.category {
            post.category = category.clone();
        }
        if let Some(tags) = &self.tags {
            post.tags = tags.clone();
        }
        if let Some(is_published) = self.is_published {
            post.is_published = is_published;
        }
    }
}

impl From<UpdatePostDto> for PostPatch {
    fn from(dto: UpdatePostDto) -> Self {
        Self {
            title: dto.title.map(|t| t.trim().to_string()),
            content: dto.content,
            excerpt: dto.excerpt,
            featured_image: dto.featured_image,
            author: dto.author.map(|a| a.trim().to_string()),
            category: dto.category.map(|c| c.trim().to_string()),
            tags: dto.tags.map(normalize_tags),
            is_published: dto.is_published,
        }
    }
}

/// Rejects values that are empty once surrounding whitespace is removed.
fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}

/// Trims tags and drops empty or repeated ones, keeping first-seen order.
fn normalize_tags(tags: Vec<String>) -> Vec<String> {
    let mut normalized: Vec<String> = Vec::with_capacity(tags.len());
    for tag in tags {
        let tag = tag.trim();
        if !tag.is_empty() && !normalized.iter().any(|t| t == tag) {
            normalized.push(tag.to_string());
        }
    }
    normalized
}
