mod common;

use axum::http::StatusCode;
use common::{
    admin_token, numbered_posts, sample_post, setup_test_app, setup_test_app_with_posts, titles,
    token_for, user_token,
};
use inkpress_auth::roles;
use serde_json::json;
use uuid::Uuid;

fn tutorial_posts() -> Vec<inkpress_models::Post> {
    vec![
        sample_post("Hooks intro", "React", &["hooks", "beginner"], 1),
        sample_post("JSX basics", "React", &["jsx"], 2),
        sample_post("Ownership", "Rust", &["hooks"], 3),
        sample_post("Custom hooks", "React", &["hooks"], 4),
    ]
}

#[tokio::test]
async fn test_list_envelope_shape() {
    let app = setup_test_app_with_posts(tutorial_posts());

    let (status, body) = app.get("/api/posts").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["count"], 4);
    assert_eq!(body["total"], 4);
    assert_eq!(body["page"], 1);
    assert_eq!(body["totalPages"], 1);
    assert_eq!(body["data"].as_array().unwrap().len(), 4);
}

#[tokio::test]
async fn test_empty_collection_has_zero_pages() {
    let app = setup_test_app();

    let (status, body) = app.get("/api/posts").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 0);
    assert_eq!(body["totalPages"], 0);
    assert_eq!(body["count"], 0);
    assert_eq!(body["data"], json!([]));
}

#[tokio::test]
async fn test_pagination_totals() {
    let app = setup_test_app_with_posts(numbered_posts(25));

    let (_, body) = app.get("/api/posts?limit=10").await;
    assert_eq!(body["total"], 25);
    assert_eq!(body["totalPages"], 3);
    assert_eq!(body["count"], 10);

    let (_, body) = app.get("/api/posts?limit=10&page=3").await;
    assert_eq!(body["page"], 3);
    assert_eq!(body["count"], 5);

    let (status, body) = app.get("/api/posts?limit=10&page=4").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["page"], 4);
    assert_eq!(body["total"], 25);
    assert_eq!(body["data"], json!([]));
}

#[tokio::test]
async fn test_pages_do_not_overlap() {
    let app = setup_test_app_with_posts(numbered_posts(25));

    let mut seen = Vec::new();
    for page in 1..=3 {
        let (_, body) = app.get(&format!("/api/posts?limit=10&page={page}")).await;
        seen.extend(titles(&body));
    }

    seen.sort();
    seen.dedup();
    assert_eq!(seen.len(), 25);
}

#[tokio::test]
async fn test_limit_is_clamped_to_ceiling() {
    let app = setup_test_app_with_posts(numbered_posts(150));

    let (status, body) = app.get("/api/posts?limit=500").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 100);
    assert_eq!(body["totalPages"], 2);
}

#[tokio::test]
async fn test_unusable_paging_is_normalized() {
    let app = setup_test_app_with_posts(numbered_posts(15));

    let (_, body) = app.get("/api/posts?page=-5").await;
    assert_eq!(body["page"], 1);

    let (_, body) = app.get("/api/posts?page=abc&limit=zero").await;
    assert_eq!(body["page"], 1);
    assert_eq!(body["count"], 10);

    let (_, body) = app.get("/api/posts?limit=0").await;
    assert_eq!(body["count"], 10);
}

#[tokio::test]
async fn test_default_sort_is_newest_first() {
    let app = setup_test_app_with_posts(tutorial_posts());

    let (_, body) = app.get("/api/posts").await;

    assert_eq!(
        titles(&body),
        vec!["Custom hooks", "Ownership", "JSX basics", "Hooks intro"]
    );
}

#[tokio::test]
async fn test_explicit_sort() {
    let app = setup_test_app_with_posts(tutorial_posts());

    let (_, body) = app.get("/api/posts?sort=title").await;
    assert_eq!(
        titles(&body),
        vec!["Custom hooks", "Hooks intro", "JSX basics", "Ownership"]
    );

    let (_, body) = app.get("/api/posts?sort=createdAt").await;
    assert_eq!(titles(&body)[0], "Hooks intro");
}

#[tokio::test]
async fn test_unknown_sort_field_falls_back_to_default() {
    let app = setup_test_app_with_posts(tutorial_posts());

    let (status, body) = app.get("/api/posts?sort=password").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(titles(&body)[0], "Custom hooks");
}

#[tokio::test]
async fn test_filters_compose() {
    let app = setup_test_app_with_posts(tutorial_posts());

    let (_, body) = app.get("/api/posts?category=React&tag=hooks").await;

    assert_eq!(body["total"], 2);
    assert_eq!(titles(&body), vec!["Custom hooks", "Hooks intro"]);
}

#[tokio::test]
async fn test_empty_filter_values_are_ignored() {
    let app = setup_test_app_with_posts(tutorial_posts());

    let (_, body) = app.get("/api/posts?category=&tag=&author=").await;

    assert_eq!(body["total"], 4);
}

#[tokio::test]
async fn test_author_filter() {
    let mut posts = tutorial_posts();
    posts[0].author = "grace".to_string();
    let app = setup_test_app_with_posts(posts);

    let (_, body) = app.get("/api/posts?author=grace").await;

    assert_eq!(titles(&body), vec!["Hooks intro"]);
}

#[tokio::test]
async fn test_get_post_by_id() {
    let posts = tutorial_posts();
    let id = posts[2].id;
    let app = setup_test_app_with_posts(posts);

    let (status, body) = app.get(&format!("/api/posts/{id}")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["title"], "Ownership");
    assert_eq!(body["data"]["id"], id.to_string());
}

#[tokio::test]
async fn test_get_unknown_post_is_not_found() {
    let app = setup_test_app();

    let (status, body) = app.get(&format!("/api/posts/{}", Uuid::new_v4())).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "Blog post does not exist");
}

#[tokio::test]
async fn test_malformed_id_is_not_found() {
    let app = setup_test_app();

    let (status, body) = app.get("/api/posts/not-a-uuid").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Blog post does not exist");
    assert_eq!(app.store_calls(), 0);
}

#[tokio::test]
async fn test_create_then_fetch_round_trip() {
    let app = setup_test_app();
    let token = user_token();

    let (status, created) = app
        .request(
            "POST",
            "/api/posts",
            Some(&token),
            Some(json!({
                "title": "Understanding Suspense",
                "content": "Suspense lets components wait.",
                "excerpt": "A short tour",
                "featuredImage": "suspense.png",
                "category": "React",
                "tags": ["suspense", "react"],
                "isPublished": true
            })),
        )
        .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["success"], true);
    let id = created["data"]["id"].as_str().unwrap().to_string();

    let (status, fetched) = app.get(&format!("/api/posts/{id}")).await;
    assert_eq!(status, StatusCode::OK);

    let post = &fetched["data"];
    assert_eq!(post["title"], "Understanding Suspense");
    assert_eq!(post["content"], "Suspense lets components wait.");
    assert_eq!(post["excerpt"], "A short tour");
    assert_eq!(post["featuredImage"], "suspense.png");
    assert_eq!(post["category"], "React");
    assert_eq!(post["tags"], json!(["suspense", "react"]));
    assert_eq!(post["isPublished"], true);
    assert_eq!(post["author"], "user-1");
    assert_eq!(post["createdAt"], post["updatedAt"]);
}

#[tokio::test]
async fn test_create_keeps_explicit_author() {
    let app = setup_test_app();

    let (status, created) = app
        .request(
            "POST",
            "/api/posts",
            Some(&token_for("editor-3", roles::USER)),
            Some(json!({
                "title": "Guest post",
                "content": "Hello",
                "category": "General",
                "author": "Guest Writer"
            })),
        )
        .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["data"]["author"], "Guest Writer");
    assert_eq!(created["data"]["isPublished"], false);
}

#[tokio::test]
async fn test_create_rejects_invalid_body() {
    let app = setup_test_app();
    let token = user_token();

    let (status, body) = app
        .request(
            "POST",
            "/api/posts",
            Some(&token),
            Some(json!({ "title": "", "content": "x", "category": "React" })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);

    let (status, body) = app
        .request(
            "POST",
            "/api/posts",
            Some(&token),
            Some(json!({ "content": "x", "category": "React" })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "title is required");

    assert_eq!(app.store_calls(), 0);
}

#[tokio::test]
async fn test_update_applies_partial_patch() {
    let posts = tutorial_posts();
    let id = posts[0].id;
    let app = setup_test_app_with_posts(posts);

    let (status, body) = app
        .request(
            "PUT",
            &format!("/api/posts/{id}"),
            Some(&user_token()),
            Some(json!({ "title": "Hooks, revisited", "isPublished": false })),
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    let post = &body["data"];
    assert_eq!(post["title"], "Hooks, revisited");
    assert_eq!(post["isPublished"], false);
    assert_eq!(post["category"], "React");
    assert_eq!(post["tags"], json!(["hooks", "beginner"]));
    assert_ne!(post["updatedAt"], post["createdAt"]);
}

#[tokio::test]
async fn test_update_unknown_post_is_not_found() {
    let app = setup_test_app();

    let (status, _) = app
        .request(
            "PUT",
            &format!("/api/posts/{}", Uuid::new_v4()),
            Some(&user_token()),
            Some(json!({ "title": "Nope" })),
        )
        .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_as_admin() {
    let posts = tutorial_posts();
    let id = posts[1].id;
    let app = setup_test_app_with_posts(posts);
    let token = admin_token();

    let (status, body) = app
        .request("DELETE", &format!("/api/posts/{id}"), Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({ "success": true, "message": "Blog post deleted successfully" })
    );

    let (status, _) = app
        .request("DELETE", &format!("/api/posts/{id}"), Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, body) = app.get("/api/posts").await;
    assert_eq!(body["total"], 3);
}

#[tokio::test]
async fn test_delete_as_user_is_forbidden_without_store_call() {
    let posts = tutorial_posts();
    let id = posts[1].id;
    let app = setup_test_app_with_posts(posts);

    let (status, body) = app
        .request("DELETE", &format!("/api/posts/{id}"), Some(&user_token()), None)
        .await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"], "insufficient permissions");
    assert_eq!(app.store_calls(), 0);
    assert_eq!(app.posts.len().await, 4);
}

#[tokio::test]
async fn test_create_rejects_whitespace_only_title_and_category() {
    let app = setup_test_app();
    let token = user_token();

    for body in [
        json!({ "title": "   ", "content": "x", "category": "React" }),
        json!({ "title": "Hooks", "content": "x", "category": "  " }),
        json!({ "title": "Hooks", "content": "x", "category": "React", "author": " " }),
    ] {
        let (status, response) = app
            .request("POST", "/api/posts", Some(&token), Some(body.clone()))
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "body: {body}");
        assert_eq!(response["success"], false, "body: {body}");
    }

    assert_eq!(app.store_calls(), 0);
    assert!(app.posts.is_empty().await);
}

#[tokio::test]
async fn test_update_rejects_whitespace_only_title_and_category() {
    let posts = tutorial_posts();
    let id = posts[0].id;
    let app = setup_test_app_with_posts(posts);
    let uri = format!("/api/posts/{id}");

    for body in [json!({ "title": "  " }), json!({ "category": "\t" })] {
        let (status, _) = app
            .request("PUT", &uri, Some(&user_token()), Some(body.clone()))
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "body: {body}");
    }

    assert_eq!(app.store_calls(), 0);
    let (_, body) = app.get(&uri).await;
    assert_eq!(body["data"]["title"], "Hooks intro");
    assert_eq!(body["data"]["category"], "React");
}

#[tokio::test]
async fn test_create_with_long_subject_defaults_author() {
    let app = setup_test_app();
    let subject = format!("oauth2|{}", "9".repeat(150));

    let (status, created) = app
        .request(
            "POST",
            "/api/posts",
            Some(&token_for(&subject, roles::USER)),
            Some(json!({ "title": "Federated", "content": "Hello", "category": "General" })),
        )
        .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["data"]["author"], subject);
}
