use std::collections::HashMap;

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use inkpress_core::{AppError, compile_query};
use inkpress_models::{
    CreatePostDto, MessageResponse, PostListResponse, PostResponse, UpdatePostDto,
};
use tracing::instrument;

use crate::middleware::auth::AuthUser;
use crate::middleware::role::RequireAdmin;
use crate::modules::parse_resource_id;
use crate::modules::posts::service::{POST_DELETED, POST_NOT_FOUND, PostService};
use crate::state::AppState;
use crate::validator::ValidatedJson;

#[utoipa::path(
    get,
    path = "/api/posts",
    params(
        ("category" = Option<String>, Query, description = "Only posts in this category"),
        ("author" = Option<String>, Query, description = "Only posts by this author"),
        ("tag" = Option<String>, Query, description = "Only posts carrying this tag"),
        ("sort" = Option<String>, Query, description = "`[-]field`; createdAt, updatedAt, title, author or category. Default `-createdAt`"),
        ("page" = Option<i64>, Query, description = "1-based page number. Default 1"),
        ("limit" = Option<i64>, Query, description = "Page size. Default 10, at most 100"),
    ),
    responses(
        (status = 200, description = "One page of posts", body = PostListResponse),
        (status = 400, description = "Unusable paging or sort parameters (strict mode only)", body = inkpress_models::ErrorResponse),
        (status = 500, description = "Store failure", body = inkpress_models::ErrorResponse)
    ),
    tag = "Posts"
)]
#[instrument(skip(state))]
pub async fn get_posts(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<PostListResponse>, AppError> {
    let descriptor = compile_query(&params, &state.query_config.limits())?;

    let page = PostService::list_posts(state.posts.as_ref(), &descriptor).await?;

    Ok(Json(page.into()))
}

#[utoipa::path(
    get,
    path = "/api/posts/{id}",
    params(("id" = String, Path, description = "Post ID")),
    responses(
        (status = 200, description = "Post found", body = PostResponse),
        (status = 404, description = "Post not found", body = inkpress_models::ErrorResponse)
    ),
    tag = "Posts"
)]
#[instrument(skip(state))]
pub async fn get_post(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<PostResponse>, AppError> {
    let id = parse_resource_id(&id, POST_NOT_FOUND)?;

    let post = PostService::get_post(state.posts.as_ref(), id).await?;

    Ok(Json(post.into()))
}

#[utoipa::path(
    post,
    path = "/api/posts",
    request_body = CreatePostDto,
    responses(
        (status = 201, description = "Post created", body = PostResponse),
        (status = 400, description = "Invalid body", body = inkpress_models::ErrorResponse),
        (status = 401, description = "Missing, malformed or invalid credential", body = inkpress_models::ErrorResponse)
    ),
    tag = "Posts",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn create_post(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidatedJson(dto): ValidatedJson<CreatePostDto>,
) -> Result<(StatusCode, Json<PostResponse>), AppError> {
    let post = PostService::create_post(state.posts.as_ref(), dto, auth_user.subject()).await?;

    Ok((StatusCode::CREATED, Json(post.into())))
}

#[utoipa::path(
    put,
    path = "/api/posts/{id}",
    params(("id" = String, Path, description = "Post ID")),
    request_body = UpdatePostDto,
    responses(
        (status = 200, description = "Post updated", body = PostResponse),
        (status = 400, description = "Invalid body", body = inkpress_models::ErrorResponse),
        (status = 401, description = "Missing, malformed or invalid credential", body = inkpress_models::ErrorResponse),
        (status = 404, description = "Post not found", body = inkpress_models::ErrorResponse)
    ),
    tag = "Posts",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn update_post(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    Path(id): Path<String>,
    ValidatedJson(dto): ValidatedJson<UpdatePostDto>,
) -> Result<Json<PostResponse>, AppError> {
    let id = parse_resource_id(&id, POST_NOT_FOUND)?;

    let post = PostService::update_post(state.posts.as_ref(), id, dto).await?;

    Ok(Json(post.into()))
}

#[utoipa::path(
    delete,
    path = "/api/posts/{id}",
    params(("id" = String, Path, description = "Post ID")),
    responses(
        (status = 200, description = "Post deleted", body = MessageResponse),
        (status = 401, description = "Missing, malformed or invalid credential", body = inkpress_models::ErrorResponse),
        (status = 403, description = "Caller is not an admin", body = inkpress_models::ErrorResponse),
        (status = 404, description = "Post not found", body = inkpress_models::ErrorResponse)
    ),
    tag = "Posts",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn delete_post(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, AppError> {
    let id = parse_resource_id(&id, POST_NOT_FOUND)?;

    PostService::delete_post(state.posts.as_ref(), id).await?;

    Ok(Json(MessageResponse::ok(POST_DELETED)))
}
