//! # Inkpress Models
//!
//! Domain models, request DTOs, and response envelopes for the Inkpress API.
//!
//! - [`posts`]: Blog posts, the paginated collection served by the API
//! - [`categories`]: Post categories with derived slugs
//! - [`responses`]: `{success, ...}` envelopes shared by every endpoint
//!
//! All wire formats use camelCase field names.

pub mod categories;
pub mod posts;
pub mod responses;

pub use categories::{Category, CreateCategoryDto, NewCategory, slugify};
pub use posts::{CreatePostDto, NewPost, Post, PostPatch, UpdatePostDto};
pub use responses::{
    CategoryListResponse, CategoryResponse, ErrorResponse, MessageResponse, PostListResponse,
    PostResponse,
};
