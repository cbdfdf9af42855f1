use inkpress_core::{AppError, StoreError};
use inkpress_db::CategoryStore;
use inkpress_models::{Category, CreateCategoryDto};
use tracing::instrument;
use uuid::Uuid;

use crate::metrics::{track_resource_write, track_store_failure};

pub const CATEGORY_NOT_FOUND: &str = "Category does not exist";
pub const CATEGORY_DELETED: &str = "Category deleted successfully";

pub struct CategoryService;

impl CategoryService {
    #[instrument(skip(store))]
    pub async fn list_categories(store: &dyn CategoryStore) -> Result<Vec<Category>, AppError> {
        Ok(store
            .list()
            .await
            .inspect_err(|_| track_store_failure("categories.list"))?)
    }

    #[instrument(skip(store))]
    pub async fn get_category(store: &dyn CategoryStore, id: Uuid) -> Result<Category, AppError> {
        store
            .find_by_id(id)
            .await
            .inspect_err(|_| track_store_failure("categories.find_by_id"))?
            .ok_or_else(|| AppError::not_found(CATEGORY_NOT_FOUND))
    }

    /// Duplicate names or slugs surface as 409 from the store and are not
    /// counted as store failures.
    #[instrument(skip(store))]
    pub async fn create_category(
        store: &dyn CategoryStore,
        dto: CreateCategoryDto,
    ) -> Result<Category, AppError> {
        let new_category = dto.into_new_category()?;
        let category = store.insert(new_category).await.inspect_err(|err| {
            if matches!(err, StoreError::Backend(_)) {
                track_store_failure("categories.insert");
            }
        })?;

        track_resource_write("category", "create");
        Ok(category)
    }

    #[instrument(skip(store))]
    pub async fn delete_category(store: &dyn CategoryStore, id: Uuid) -> Result<(), AppError> {
        let deleted = store
            .delete_by_id(id)
            .await
            .inspect_err(|_| track_store_failure("categories.delete_by_id"))?;

        if !deleted {
            return Err(AppError::not_found(CATEGORY_NOT_FOUND));
        }

        track_resource_write("category", "delete");
        Ok(())
    }
}
