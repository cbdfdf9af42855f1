use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use inkpress_models::{
    Category, CategoryListResponse, CategoryResponse, CreateCategoryDto, CreatePostDto,
    ErrorResponse, MessageResponse, Post, PostListResponse, PostResponse, UpdatePostDto,
};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::posts::controller::get_posts,
        crate::modules::posts::controller::get_post,
        crate::modules::posts::controller::create_post,
        crate::modules::posts::controller::update_post,
        crate::modules::posts::controller::delete_post,
        crate::modules::categories::controller::get_categories,
        crate::modules::categories::controller::get_category,
        crate::modules::categories::controller::create_category,
        crate::modules::categories::controller::delete_category,
    ),
    components(
        schemas(
            Post,
            CreatePostDto,
            UpdatePostDto,
            PostListResponse,
            PostResponse,
            Category,
            CreateCategoryDto,
            CategoryListResponse,
            CategoryResponse,
            MessageResponse,
            ErrorResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Posts", description = "Blog posts: public reads, authenticated writes, admin deletes"),
        (name = "Categories", description = "Post categories: public reads, admin writes")
    ),
    info(
        title = "Inkpress API",
        version = "0.1.0",
        description = "Content API for blog posts and categories, built with Rust, Axum, and PostgreSQL.",
        license(
            name = "MIT"
        )
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            )
        }
    }
}
