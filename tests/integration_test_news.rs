mod common;

use axum::http::StatusCode;
use common::TestApp;
use serde_json::{json, Value};

async fn create_news(app: &TestApp, token: &str, body: Value) -> (StatusCode, Value) {
    app.request("POST", "/api/admin/news", Some(token), Some(body)).await
}

#[tokio::test]
async fn test_derived_slug_is_disambiguated() {
    let app = TestApp::new().await;
    let token = app.admin_token().await;

    let (status, first) = create_news(&app, &token, json!({
        "title": "Khai trương khu Onsen",
        "content": "..."
    })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(first["slug"], "khai-truong-khu-onsen");
    assert_eq!(first["status"], "DRAFT");

    let (_, second) = create_news(&app, &token, json!({"title": "Khai trương khu Onsen", "content": "..."})).await;
    assert_eq!(second["slug"], "khai-truong-khu-onsen-2");

    let (_, third) = create_news(&app, &token, json!({"title": "Khai Trương Khu Onsen!", "content": "..."})).await;
    assert_eq!(third["slug"], "khai-truong-khu-onsen-3");
}

#[tokio::test]
async fn test_explicit_duplicate_slug_conflicts() {
    let app = TestApp::new().await;
    let token = app.admin_token().await;

    let (status, _) = create_news(&app, &token, json!({"title": "Summer", "slug": "summer-offer", "content": "a"})).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = create_news(&app, &token, json!({"title": "Other", "slug": "summer-offer", "content": "b"})).await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_public_news_hides_drafts_and_suggests_slugs() {
    let app = TestApp::new().await;
    let token = app.admin_token().await;

    create_news(&app, &token, json!({"title": "Published One", "content": "x", "status": "PUBLISHED"})).await;
    let (_, draft) = create_news(&app, &token, json!({"title": "Secret Draft", "content": "y"})).await;
    assert!(draft["published_at"].is_null());

    let (status, list) = app.request("GET", "/api/news", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(list["total"], 1);
    assert_eq!(list["items"][0]["slug"], "published-one");

    let (status, body) = app.request("GET", "/api/news/secret-draft", None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["available_slugs"], json!(["published-one"]));

    let (status, body) = app.request("GET", "/api/news/secret-draft", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["title"], "Secret Draft");
}

#[tokio::test]
async fn test_published_at_is_stamped_once() {
    let app = TestApp::new().await;
    let token = app.admin_token().await;

    let (_, news) = create_news(&app, &token, json!({"title": "Tết 2026", "content": "z"})).await;
    let id = news["id"].as_str().unwrap();

    let (_, published) = app.request("PUT", &format!("/api/admin/news/{}", id), Some(&token), Some(json!({"status": "PUBLISHED"}))).await;
    let stamped = published["published_at"].clone();
    assert!(stamped.is_string());

    app.request("PUT", &format!("/api/admin/news/{}", id), Some(&token), Some(json!({"status": "DRAFT"}))).await;
    let (_, republished) = app.request("PUT", &format!("/api/admin/news/{}", id), Some(&token), Some(json!({"status": "PUBLISHED"}))).await;
    assert_eq!(republished["published_at"], stamped);
}

#[tokio::test]
async fn test_admin_news_listing_filters_by_status() {
    let app = TestApp::new().await;
    let token = app.admin_token().await;

    for i in 0..3 {
        create_news(&app, &token, json!({"title": format!("Draft {}", i), "content": "c"})).await;
    }
    create_news(&app, &token, json!({"title": "Live", "content": "c", "status": "PUBLISHED"})).await;

    let (_, all) = app.request("GET", "/api/admin/news", Some(&token), None).await;
    assert_eq!(all["total"], 4);

    let (_, drafts) = app.request("GET", "/api/admin/news?status=DRAFT&limit=2", Some(&token), None).await;
    assert_eq!(drafts["total"], 3);
    assert_eq!(drafts["items"].as_array().unwrap().len(), 2);
    assert_eq!(drafts["limit"], 2);
}

#[tokio::test]
async fn test_huge_page_number_does_not_crash_public_listing() {
    let app = TestApp::new().await;
    let token = app.admin_token().await;
    create_news(&app, &token, json!({"title": "Only", "content": "c", "status": "PUBLISHED"})).await;

    let (status, body) = app.request("GET", "/api/news?page=9223372036854775807", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 1);
    assert!(body["items"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_dev_bypass_admin_can_publish_news() {
    let app = TestApp::with_dev_bypass().await;

    let (status, body) = app.request("POST", "/api/admin/news", None, Some(json!({
        "title": "Hello",
        "content": "<p>x</p>",
        "status": "PUBLISHED"
    }))).await;
    assert_eq!(status, StatusCode::OK, "bypass news creation failed: {}", body);
    assert!(body["author_id"].is_null());

    let (status, _) = app.request("GET", "/api/news/hello", None, None).await;
    assert_eq!(status, StatusCode::OK);
}
