mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use common::{
    TEST_SECRET, jwt_config, sample_post, send_request, setup_test_app,
    setup_test_app_with_posts, token_for, user_token,
};
use inkpress_auth::{create_token_with_expiry, roles};
use inkpress_config::JwtConfig;
use serde_json::{Value, json};

const MALFORMED: &str = "missing or malformed credential";
const INVALID: &str = "invalid or expired credential";

fn post_body() -> Value {
    json!({ "title": "Gated", "content": "Body", "category": "General" })
}

#[tokio::test]
async fn test_public_routes_need_no_token() {
    let app = setup_test_app_with_posts(vec![sample_post("Open", "General", &[], 1)]);

    let (status, _) = app.get("/api/posts").await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = app.get("/api/categories").await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_banner() {
    let app = setup_test_app();

    let (status, body) = app.get("/").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, Value::String("Inkpress API is running".to_string()));
}

#[tokio::test]
async fn test_missing_token() {
    let app = setup_test_app();

    let (status, body) = app
        .request("POST", "/api/posts", None, Some(post_body()))
        .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body, json!({ "success": false, "error": MALFORMED }));
    assert_eq!(app.store_calls(), 0);
}

#[tokio::test]
async fn test_non_bearer_scheme() {
    let app = setup_test_app();
    let token = user_token();

    for header in [
        format!("Basic {}", token),
        format!("bearer {}", token),
        "Bearer".to_string(),
        "Bearer ".to_string(),
    ] {
        let request = Request::builder()
            .method("POST")
            .uri("/api/posts")
            .header("authorization", header.clone())
            .header("content-type", "application/json")
            .body(Body::from(post_body().to_string()))
            .unwrap();

        let (status, body) = send_request(&app.router, request).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED, "header: {header}");
        assert_eq!(body["error"], MALFORMED, "header: {header}");
    }

    assert_eq!(app.store_calls(), 0);
}

#[tokio::test]
async fn test_garbage_token() {
    let app = setup_test_app();

    let (status, body) = app
        .request("POST", "/api/posts", Some("not.a.jwt"), Some(post_body()))
        .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], INVALID);
    assert_eq!(app.store_calls(), 0);
}

#[tokio::test]
async fn test_expired_token() {
    let app = setup_test_app();
    let token = create_token_with_expiry("user-1", roles::USER, -120, &jwt_config()).unwrap();

    let (status, body) = app
        .request("POST", "/api/posts", Some(&token), Some(post_body()))
        .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], INVALID);
    assert_eq!(app.store_calls(), 0);
}

#[tokio::test]
async fn test_wrong_secret() {
    let app = setup_test_app();
    let other = JwtConfig {
        secret: format!("{}-but-different", TEST_SECRET),
        ..jwt_config()
    };
    let token = create_token_with_expiry("admin-1", roles::ADMIN, 3600, &other).unwrap();

    let (status, body) = app
        .request("POST", "/api/posts", Some(&token), Some(post_body()))
        .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], INVALID);
    assert_eq!(app.store_calls(), 0);
}

#[tokio::test]
async fn test_tampered_payload() {
    let app = setup_test_app();
    let user = user_token();
    let admin = token_for("user-1", roles::ADMIN);

    // user header and signature around the admin payload
    let user_parts: Vec<&str> = user.split('.').collect();
    let admin_parts: Vec<&str> = admin.split('.').collect();
    let forged = format!("{}.{}.{}", user_parts[0], admin_parts[1], user_parts[2]);

    let (status, body) = app
        .request("DELETE", "/api/categories/00000000-0000-0000-0000-000000000000", Some(&forged), None)
        .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], INVALID);
    assert_eq!(app.store_calls(), 0);
}

#[tokio::test]
async fn test_empty_role_claim() {
    let app = setup_test_app();
    let token = token_for("user-1", "");

    let (status, body) = app
        .request("POST", "/api/posts", Some(&token), Some(post_body()))
        .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], INVALID);
}

#[tokio::test]
async fn test_admin_route_rejects_bad_credential_before_role() {
    let app = setup_test_app();

    let (status, body) = app
        .request(
            "POST",
            "/api/categories",
            None,
            Some(json!({ "name": "Rust" })),
        )
        .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], MALFORMED);
    assert_eq!(app.store_calls(), 0);
}

#[tokio::test]
async fn test_valid_token_reaches_handler() {
    let app = setup_test_app();

    let (status, body) = app
        .request("POST", "/api/posts", Some(&user_token()), Some(post_body()))
        .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["author"], "user-1");
    assert_eq!(app.posts.len().await, 1);
}

#[tokio::test]
async fn test_unknown_role_is_not_admin() {
    let app = setup_test_app();
    let token = token_for("editor-1", "editor");

    let (status, body) = app
        .request("POST", "/api/categories", Some(&token), Some(json!({ "name": "Rust" })))
        .await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"], "insufficient permissions");
    assert_eq!(app.store_calls(), 0);
}
