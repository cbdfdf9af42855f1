//! Response envelopes.
//!
//! Every body carries a `success` flag. Lists add paging counters, single
//! resources wrap the item in `data`, and deletes return a `message`.

use inkpress_core::PageResult;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::categories::Category;
use crate::posts::Post;

/// `{success, count, total, page, data, totalPages}`
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PostListResponse {
    pub success: bool,
    /// Items on this page
    pub count: usize,
    /// Items matching the filters across all pages
    pub total: i64,
    pub page: i64,
    pub data: Vec<Post>,
    pub total_pages: i64,
}

impl From<PageResult<Post>> for PostListResponse {
    fn from(result: PageResult<Post>) -> Self {
        Self {
            success: true,
            count: result.count(),
            total: result.total,
            page: result.page,
            total_pages: result.total_pages,
            data: result.items,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PostResponse {
    pub success: bool,
    pub data: Post,
}

impl From<Post> for PostResponse {
    fn from(post: Post) -> Self {
        Self {
            success: true,
            data: post,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CategoryListResponse {
    pub success: bool,
    pub count: usize,
    pub data: Vec<Category>,
}

impl From<Vec<Category>> for CategoryListResponse {
    fn from(categories: Vec<Category>) -> Self {
        Self {
            success: true,
            count: categories.len(),
            data: categories,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CategoryResponse {
    pub success: bool,
    pub data: Category,
}

impl From<Category> for CategoryResponse {
    fn from(category: Category) -> Self {
        Self {
            success: true,
            data: category,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    pub success: bool,
    pub message: String,
}

impl MessageResponse {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }
}

/// Shape of every error body. Documentation only; `AppError` renders it.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
}
