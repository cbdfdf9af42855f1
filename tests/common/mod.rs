#![allow(dead_code)]

use std::sync::Arc;

use anyhow::anyhow;
use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use chrono::{DateTime, Duration, TimeZone, Utc};
use http_body_util::BodyExt;
use inkpress::router::init_router;
use inkpress::state::AppState;
use inkpress_auth::{create_access_token, roles};
use inkpress_config::{JwtConfig, QueryConfig};
use inkpress_core::{PostFilters, SortSpec, StoreError};
use inkpress_db::{MemoryCategoryStore, MemoryPostStore, PostStore};
use inkpress_models::{NewPost, Post, PostPatch};
use serde_json::Value;
use tower::ServiceExt;
use uuid::Uuid;

pub const TEST_SECRET: &str = "integration-test-secret-at-least-32-characters";

pub fn jwt_config() -> JwtConfig {
    JwtConfig {
        secret: TEST_SECRET.to_string(),
        access_token_expiry: 3600,
        leeway: 0,
    }
}

pub struct TestApp {
    pub router: Router,
    pub posts: Arc<MemoryPostStore>,
    pub categories: Arc<MemoryCategoryStore>,
}

impl TestApp {
    pub fn store_calls(&self) -> usize {
        self.posts.calls() + self.categories.calls()
    }

    pub async fn request(
        &self,
        method: &str,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        send(&self.router, method, uri, token, body).await
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.request("GET", uri, None, None).await
    }
}

pub fn setup_test_app() -> TestApp {
    setup_test_app_with(Vec::new(), QueryConfig::default())
}

pub fn setup_test_app_with_posts(posts: Vec<Post>) -> TestApp {
    setup_test_app_with(posts, QueryConfig::default())
}

pub fn setup_test_app_with(posts: Vec<Post>, query_config: QueryConfig) -> TestApp {
    let posts = Arc::new(MemoryPostStore::with_posts(posts));
    let categories = Arc::new(MemoryCategoryStore::new());

    let state = AppState::new(posts.clone(), categories.clone(), jwt_config())
        .with_query_config(query_config);

    TestApp {
        router: init_router(state),
        posts,
        categories,
    }
}

/// Router whose post store fails every call.
pub fn setup_failing_app() -> Router {
    let state = AppState::new(
        Arc::new(FailingPostStore),
        Arc::new(MemoryCategoryStore::new()),
        jwt_config(),
    );
    init_router(state)
}

pub fn token_for(subject: &str, role: &str) -> String {
    create_access_token(subject, role, &jwt_config()).unwrap()
}

pub fn admin_token() -> String {
    token_for("admin-1", roles::ADMIN)
}

pub fn user_token() -> String {
    token_for("user-1", roles::USER)
}

pub async fn send(
    router: &Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {}", token));
    }

    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_string(&body).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    send_request(router, request).await
}

pub async fn send_request(router: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or_else(|_| {
            Value::String(String::from_utf8_lossy(&bytes).into_owned())
        })
    };
    (status, body)
}

pub fn base_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap()
}

/// A post created `minutes` after [`base_time`].
pub fn sample_post(title: &str, category: &str, tags: &[&str], minutes: i64) -> Post {
    let created_at = base_time() + Duration::minutes(minutes);
    Post {
        id: Uuid::new_v4(),
        title: title.to_string(),
        content: format!("Content of {}", title),
        excerpt: None,
        featured_image: None,
        author: "ada".to_string(),
        category: category.to_string(),
        tags: tags.iter().map(|t| t.to_string()).collect(),
        is_published: true,
        created_at,
        updated_at: created_at,
    }
}

/// `count` posts in one category, oldest first.
pub fn numbered_posts(count: usize) -> Vec<Post> {
    (0..count)
        .map(|i| sample_post(&format!("Post {:03}", i), "General", &[], i as i64))
        .collect()
}

pub fn titles(body: &Value) -> Vec<String> {
    body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|post| post["title"].as_str().unwrap().to_string())
        .collect()
}

pub struct FailingPostStore;

fn backend_down() -> StoreError {
    StoreError::backend(anyhow!("connection refused: postgres://10.0.0.5:5432"))
}

#[async_trait]
impl PostStore for FailingPostStore {
    async fn find(
        &self,
        _filters: &PostFilters,
        _sort: SortSpec,
        _skip: i64,
        _limit: i64,
    ) -> Result<Vec<Post>, StoreError> {
        Err(backend_down())
    }

    async fn count(&self, _filters: &PostFilters) -> Result<i64, StoreError> {
        Err(backend_down())
    }

    async fn find_by_id(&self, _id: Uuid) -> Result<Option<Post>, StoreError> {
        Err(backend_down())
    }

    async fn insert(&self, _post: NewPost) -> Result<Post, StoreError> {
        Err(backend_down())
    }

    async fn update_by_id(&self, _id: Uuid, _patch: PostPatch) -> Result<Option<Post>, StoreError> {
        Err(backend_down())
    }

    async fn delete_by_id(&self, _id: Uuid) -> Result<bool, StoreError> {
        Err(backend_down())
    }
}
