mod common;

use axum::http::StatusCode;
use common::TestApp;
use serde_json::{json, Value};

async fn submit_lead(app: &TestApp, name: &str, phone: &str) -> Value {
    let (status, body) = app.request("POST", "/api/customers", None, Some(json!({
        "name": name,
        "phone": phone,
        "email": "lead@example.com",
        "province_name": "Lâm Đồng"
    }))).await;
    assert_eq!(status, StatusCode::OK, "lead submission failed: {}", body);
    body
}

#[tokio::test]
async fn test_contact_form_creates_new_website_lead() {
    let app = TestApp::new().await;
    let lead = submit_lead(&app, "Lê Minh", "0987654321").await;

    assert_eq!(lead["status"], "NEW");
    assert_eq!(lead["source"], "WEBSITE");
    assert!(lead["assigned_to"].is_null());
}

#[tokio::test]
async fn test_status_update_persists_only_the_status() {
    let app = TestApp::new().await;
    let token = app.admin_token().await;
    let lead = submit_lead(&app, "Phạm Hoa", "0911222333").await;
    let id = lead["id"].as_str().unwrap();

    for status in ["CONTACTED", "LOST", "NEW", "CONVERTED"] {
        let (code, body) = app.request("PATCH", &format!("/api/admin/customers/{}/status", id), Some(&token), Some(json!({
            "status": status
        }))).await;
        assert_eq!(code, StatusCode::OK);
        assert_eq!(body["status"], status);
    }

    let (_, stored) = app.request("GET", &format!("/api/admin/customers/{}", id), Some(&token), None).await;
    assert_eq!(stored["status"], "CONVERTED");
    assert_eq!(stored["name"], "Phạm Hoa");
    assert_eq!(stored["phone"], "0911222333");
    assert_eq!(stored["province_name"], "Lâm Đồng");

    let (code, body) = app.request("PATCH", &format!("/api/admin/customers/{}/status", id), Some(&token), Some(json!({
        "status": "WON"
    }))).await;
    assert_eq!(code, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());

    let (_, unchanged) = app.request("GET", &format!("/api/admin/customers/{}", id), Some(&token), None).await;
    assert_eq!(unchanged["status"], "CONVERTED");

    let (code, _) = app.request("PATCH", "/api/admin/customers/unknown/status", Some(&token), Some(json!({
        "status": "LOST"
    }))).await;
    assert_eq!(code, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_assign_requires_existing_user() {
    let app = TestApp::new().await;
    let token = app.admin_token().await;
    let staff = app.create_user("sales@ikigaivilla.test", "STAFF").await;
    let lead = submit_lead(&app, "Võ Thảo", "0933444555").await;
    let id = lead["id"].as_str().unwrap();

    let (status, body) = app.request("PATCH", &format!("/api/admin/customers/{}/assign", id), Some(&token), Some(json!({
        "user_id": staff.id
    }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["assigned_to"], staff.id.as_str());

    let (status, _) = app.request("PATCH", &format!("/api/admin/customers/{}/assign", id), Some(&token), Some(json!({
        "user_id": "ghost"
    }))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = app.request("PATCH", &format!("/api/admin/customers/{}/assign", id), Some(&token), Some(json!({
        "user_id": null
    }))).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["assigned_to"].is_null());
}

#[tokio::test]
async fn test_listing_filters_search_and_paginates() {
    let app = TestApp::new().await;
    let token = app.admin_token().await;

    for i in 0..5 {
        submit_lead(&app, &format!("Guest {}", i), &format!("09000000{:02}", i)).await;
    }
    let special = submit_lead(&app, "Đặng Quang", "0977000111").await;
    app.request("PATCH", &format!("/api/admin/customers/{}/status", special["id"].as_str().unwrap()), Some(&token), Some(json!({
        "status": "CONTACTED"
    }))).await;

    let (status, page) = app.request("GET", "/api/admin/customers?page=1&limit=4", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(page["total"], 6);
    assert_eq!(page["items"].as_array().unwrap().len(), 4);

    let (_, page2) = app.request("GET", "/api/admin/customers?page=2&limit=4", Some(&token), None).await;
    assert_eq!(page2["items"].as_array().unwrap().len(), 2);

    let (_, contacted) = app.request("GET", "/api/admin/customers?status=CONTACTED", Some(&token), None).await;
    assert_eq!(contacted["total"], 1);

    let (_, by_phone) = app.request("GET", "/api/admin/customers?search=0977000", Some(&token), None).await;
    assert_eq!(by_phone["total"], 1);
    assert_eq!(by_phone["items"][0]["name"], "Đặng Quang");
}

#[tokio::test]
async fn test_stats_count_every_status() {
    let app = TestApp::new().await;
    let token = app.admin_token().await;
    submit_lead(&app, "One", "0900000001").await;
    let two = submit_lead(&app, "Two", "0900000002").await;
    app.request("PATCH", &format!("/api/admin/customers/{}/status", two["id"].as_str().unwrap()), Some(&token), Some(json!({
        "status": "LOST"
    }))).await;

    let (status, stats) = app.request("GET", "/api/admin/customers/stats", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(stats["total"], 2);
    assert_eq!(stats["by_status"]["NEW"], 1);
    assert_eq!(stats["by_status"]["LOST"], 1);
    assert_eq!(stats["by_status"]["ARCHIVED"], 0);
}

#[tokio::test]
async fn test_huge_page_number_returns_empty_page() {
    let app = TestApp::new().await;
    let token = app.admin_token().await;
    submit_lead(&app, "Paged", "0900000099").await;

    let (status, page) = app.request("GET", "/api/admin/customers?page=9223372036854775807", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(page["total"], 1);
    assert!(page["items"].as_array().unwrap().is_empty());

    let (status, body) = app.request("GET", "/api/admin/customers?page=abc", Some(&token), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
}
