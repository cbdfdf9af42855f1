use inkpress_core::{AppError, PageResult, QueryDescriptor};
use inkpress_db::PostStore;
use inkpress_models::{CreatePostDto, Post, PostPatch, UpdatePostDto};
use tracing::instrument;
use uuid::Uuid;

use crate::metrics::{track_page_served, track_resource_write, track_store_failure};

pub const POST_NOT_FOUND: &str = "Blog post does not exist";
pub const POST_DELETED: &str = "Blog post deleted successfully";

pub struct PostService;

impl PostService {
    /// The pagination engine: one bounded fetch and one count, issued
    /// concurrently. The two reads are not a consistent snapshot; a write
    /// landing between them can make `total` disagree with `data` by one.
    #[instrument(skip(store))]
    pub async fn list_posts(
        store: &dyn PostStore,
        descriptor: &QueryDescriptor,
    ) -> Result<PageResult<Post>, AppError> {
        let filters = descriptor.filters();

        let (items, total) = tokio::try_join!(
            store.find(
                filters,
                descriptor.sort(),
                descriptor.skip(),
                descriptor.limit()
            ),
            store.count(filters),
        )
        .inspect_err(|_| track_store_failure("posts.list"))?;

        let page = PageResult::new(items, total, descriptor.window());
        track_page_served(page.count(), page.total_pages);

        Ok(page)
    }

    #[instrument(skip(store))]
    pub async fn get_post(store: &dyn PostStore, id: Uuid) -> Result<Post, AppError> {
        store
            .find_by_id(id)
            .await
            .inspect_err(|_| track_store_failure("posts.find_by_id"))?
            .ok_or_else(|| AppError::not_found(POST_NOT_FOUND))
    }

    /// `author` falls back to the caller's subject id.
    #[instrument(skip(store, dto))]
    pub async fn create_post(
        store: &dyn PostStore,
        dto: CreatePostDto,
        caller: &str,
    ) -> Result<Post, AppError> {
        let post = store
            .insert(dto.into_new_post(caller))
            .await
            .inspect_err(|_| track_store_failure("posts.insert"))?;

        track_resource_write("post", "create");
        Ok(post)
    }

    #[instrument(skip(store, dto))]
    pub async fn update_post(
        store: &dyn PostStore,
        id: Uuid,
        dto: UpdatePostDto,
    ) -> Result<Post, AppError> {
        let post = store
            .update_by_id(id, PostPatch::from(dto))
            .await
            .inspect_err(|_| track_store_failure("posts.update_by_id"))?
            .ok_or_else(|| AppError::not_found(POST_NOT_FOUND))?;

        track_resource_write("post", "update");
        Ok(post)
    }

    #[instrument(skip(store))]
    pub async fn delete_post(store: &dyn PostStore, id: Uuid) -> Result<(), AppError> {
        let deleted = store
            .delete_by_id(id)
            .await
            .inspect_err(|_| track_store_failure("posts.delete_by_id"))?;

        if !deleted {
            return Err(AppError::not_found(POST_NOT_FOUND));
        }

        track_resource_write("post", "delete");
        Ok(())
    }
}
