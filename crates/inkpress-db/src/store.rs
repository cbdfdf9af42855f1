use async_trait::async_trait;
use inkpress_core::{PostFilters, SortSpec, StoreError};
use inkpress_models::{Category, NewCategory, NewPost, Post, PostPatch};
use uuid::Uuid;

/// Persistence contract for posts.
///
/// `Send + Sync` so the store can live behind an `Arc<dyn PostStore>` in the
/// application state. Implementations synchronize themselves.
#[async_trait]
pub trait PostStore: Send + Sync {
    /// Bounded fetch: matching posts ordered by `sort`, then by id in the
    /// same direction.
    async fn find(
        &self,
        filters: &PostFilters,
        sort: SortSpec,
        skip: i64,
        limit: i64,
    ) -> Result<Vec<Post>, StoreError>;

    /// Number of posts matching `filters`, ignoring paging.
    async fn count(&self, filters: &PostFilters) -> Result<i64, StoreError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>, StoreError>;

    /// Stores a new post, assigning its id and timestamps.
    async fn insert(&self, post: NewPost) -> Result<Post, StoreError>;

    /// Applies `patch` and refreshes `updated_at`. `None` when no post has `id`.
    async fn update_by_id(&self, id: Uuid, patch: PostPatch) -> Result<Option<Post>, StoreError>;

    /// Returns whether a post was removed.
    async fn delete_by_id(&self, id: Uuid) -> Result<bool, StoreError>;
}

/// Persistence contract for categories.
#[async_trait]
pub trait CategoryStore: Send + Sync {
    /// All categories ordered by name.
    async fn list(&self) -> Result<Vec<Category>, StoreError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Category>, StoreError>;

    /// Fails with [`StoreError::Conflict`] when the name or slug is taken.
    async fn insert(&self, category: NewCategory) -> Result<Category, StoreError>;

    async fn delete_by_id(&self, id: Uuid) -> Result<bool, StoreError>;
}
