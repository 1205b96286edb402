mod common;

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
};
use common::{TestApp, ADMIN_EMAIL, PASSWORD};
use serde_json::json;
use tower::ServiceExt;

#[tokio::test]
async fn test_admin_routes_require_authentication() {
    let app = TestApp::new().await;

    let (status, body) = app.request("GET", "/api/admin/bookings", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Unauthorized");

    let (status, _) = app.request("GET", "/api/admin/customers", Some("garbage.token.value"), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_staff_is_forbidden_from_admin_routes() {
    let app = TestApp::new().await;
    let token = app.staff_token().await;

    let (status, _) = app.request("GET", "/api/admin/rooms", Some(&token), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, me) = app.request("GET", "/api/auth/me", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(me["role"], "STAFF");
    assert!(me.get("password_hash").is_none());
}

#[tokio::test]
async fn test_wrong_password_is_rejected() {
    let app = TestApp::new().await;
    app.admin_token().await;

    let (status, _) = app.request("POST", "/api/auth/login", None, Some(json!({
        "email": ADMIN_EMAIL,
        "password": "wrong-password"
    }))).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = app.request("POST", "/api/auth/login", None, Some(json!({
        "email": "nobody@ikigaivilla.test",
        "password": PASSWORD
    }))).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_login_sets_http_only_cookie_usable_for_auth() {
    let app = TestApp::new().await;
    app.admin_token().await;

    let response = app.router.clone().oneshot(
        Request::builder().method("POST").uri("/api/auth/login")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json!({"email": ADMIN_EMAIL, "password": PASSWORD}).to_string())).unwrap()
    ).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let cookie = response.headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .map(|h| h.to_str().unwrap().to_string())
        .find(|c| c.starts_with("auth-token="))
        .expect("No auth-token cookie returned");
    assert!(cookie.contains("HttpOnly"));
    assert!(cookie.contains("SameSite=Lax"));

    let pair = cookie.split(';').next().unwrap().to_string();
    let response = app.router.clone().oneshot(
        Request::builder().method("GET").uri("/api/admin/settings")
            .header(header::COOKIE, pair)
            .body(Body::empty()).unwrap()
    ).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_logout_invalidates_session() {
    let app = TestApp::new().await;
    let token = app.admin_token().await;

    let (status, _) = app.request("GET", "/api/auth/me", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = app.request("POST", "/api/auth/logout", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = app.request("GET", "/api/auth/me", Some(&token), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_user_management() {
    let app = TestApp::new().await;
    let token = app.admin_token().await;

    let (status, created) = app.request("POST", "/api/admin/users", Some(&token), Some(json!({
        "email": "Reception@Ikigaivilla.test",
        "name": "Reception",
        "password": "another-long-password"
    }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(created["role"], "STAFF");
    assert_eq!(created["email"], "reception@ikigaivilla.test");

    let (status, _) = app.request("POST", "/api/admin/users", Some(&token), Some(json!({
        "email": "reception@ikigaivilla.test",
        "name": "Dup",
        "password": "another-long-password"
    }))).await;
    assert_eq!(status, StatusCode::CONFLICT);

    let staff_token = app.login("reception@ikigaivilla.test", "another-long-password").await;
    assert!(!staff_token.is_empty());

    let (_, me) = app.request("GET", "/api/auth/me", Some(&token), None).await;
    let my_id = me["id"].as_str().unwrap();
    let (status, _) = app.request("DELETE", &format!("/api/admin/users/{}", my_id), Some(&token), None).await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, _) = app.request("DELETE", &format!("/api/admin/users/{}", created["id"].as_str().unwrap()), Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);

    let (_, users) = app.request("GET", "/api/admin/users", Some(&token), None).await;
    assert_eq!(users.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_logout_is_idempotent_and_clears_cookie() {
    let app = TestApp::new().await;
    let token = app.admin_token().await;

    let (status, _) = app.request("POST", "/api/auth/logout", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);

    let response = app.router.clone().oneshot(
        Request::builder().method("POST").uri("/api/auth/logout")
            .header(header::COOKIE, format!("auth-token={}", token))
            .body(Body::empty()).unwrap()
    ).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let cleared = response.headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .map(|h| h.to_str().unwrap().to_string())
        .find(|c| c.starts_with("auth-token="))
        .expect("logout should expire the auth-token cookie");
    assert!(cleared.starts_with("auth-token=;"));

    let (status, _) = app.request("POST", "/api/auth/logout", None, None).await;
    assert_eq!(status, StatusCode::OK);
}
