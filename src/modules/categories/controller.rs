use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use inkpress_core::AppError;
use inkpress_models::{
    CategoryListResponse, CategoryResponse, CreateCategoryDto, ErrorResponse, MessageResponse,
};
use tracing::instrument;

use crate::middleware::role::RequireAdmin;
use crate::modules::categories::service::{CATEGORY_DELETED, CATEGORY_NOT_FOUND, CategoryService};
use crate::modules::parse_resource_id;
use crate::state::AppState;
use crate::validator::ValidatedJson;

#[utoipa::path(
    get,
    path = "/api/categories",
    responses(
        (status = 200, description = "All categories, by name", body = CategoryListResponse),
        (status = 500, description = "Store failure", body = ErrorResponse)
    ),
    tag = "Categories"
)]
#[instrument(skip(state))]
pub async fn get_categories(
    State(state): State<AppState>,
) -> Result<Json<CategoryListResponse>, AppError> {
    let categories = CategoryService::list_categories(state.categories.as_ref()).await?;
    Ok(Json(categories.into()))
}

#[utoipa::path(
    get,
    path = "/api/categories/{id}",
    params(("id" = String, Path, description = "Category ID")),
    responses(
        (status = 200, description = "Category found", body = CategoryResponse),
        (status = 404, description = "Category not found", body = ErrorResponse)
    ),
    tag = "Categories"
)]
#[instrument(skip(state))]
pub async fn get_category(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<CategoryResponse>, AppError> {
    let id = parse_resource_id(&id, CATEGORY_NOT_FOUND)?;
    let category = CategoryService::get_category(state.categories.as_ref(), id).await?;
    Ok(Json(category.into()))
}

#[utoipa::path(
    post,
    path = "/api/categories",
    request_body = CreateCategoryDto,
    responses(
        (status = 201, description = "Category created", body = CategoryResponse),
        (status = 400, description = "Invalid body", body = ErrorResponse),
        (status = 401, description = "Missing, malformed or invalid credential", body = ErrorResponse),
        (status = 403, description = "Caller is not an admin", body = ErrorResponse),
        (status = 409, description = "Name or slug already taken", body = ErrorResponse)
    ),
    tag = "Categories",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn create_category(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    ValidatedJson(dto): ValidatedJson<CreateCategoryDto>,
) -> Result<(StatusCode, Json<CategoryResponse>), AppError> {
    let category = CategoryService::create_category(state.categories.as_ref(), dto).await?;
    Ok((StatusCode::CREATED, Json(category.into())))
}

#[utoipa::path(
    delete,
    path = "/api/categories/{id}",
    params(("id" = String, Path, description = "Category ID")),
    responses(
        (status = 200, description = "Category deleted", body = MessageResponse),
        (status = 401, description = "Missing, malformed or invalid credential", body = ErrorResponse),
        (status = 403, description = "Caller is not an admin", body = ErrorResponse),
        (status = 404, description = "Category not found", body = ErrorResponse)
    ),
    tag = "Categories",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn delete_category(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, AppError> {
    let id = parse_resource_id(&id, CATEGORY_NOT_FOUND)?;
    CategoryService::delete_category(state.categories.as_ref(), id).await?;
    Ok(Json(MessageResponse::ok(CATEGORY_DELETED)))
}
