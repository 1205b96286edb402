mod common;

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
};
use common::TestApp;
use serde_json::{json, Value};
use tower::ServiceExt;

fn booking_payload(room_id: &str, check_in: &str, check_out: &str) -> Value {
    json!({
        "room_id": room_id,
        "customer_name": "Nguyễn Văn An",
        "customer_email": "an@example.com",
        "customer_phone": "0901234567",
        "check_in_date": check_in,
        "check_out_date": check_out,
        "number_of_guests": 2
    })
}

#[tokio::test]
async fn test_overlapping_booking_is_rejected_and_adjacent_accepted() {
    let app = TestApp::new().await;
    let token = app.admin_token().await;
    let room = app.create_room(&token, "Phòng Đôi Hướng Biển", "2.500.000 VNĐ/đêm", 2).await;
    let room_id = room["id"].as_str().unwrap();

    let mut existing = booking_payload(room_id, "2025-06-01", "2025-06-05");
    existing["status"] = json!("CONFIRMED");
    let (status, _) = app.request("POST", "/api/admin/bookings", Some(&token), Some(existing)).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = app.request("POST", "/api/bookings", None, Some(booking_payload(room_id, "2025-06-04", "2025-06-07"))).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert!(body["error"].as_str().unwrap().contains("already booked"));

    let (status, body) = app.request("POST", "/api/bookings", None, Some(booking_payload(room_id, "2025-06-05", "2025-06-07"))).await;
    assert_eq!(status, StatusCode::OK, "adjacent stay should be accepted: {}", body);
    assert_eq!(body["status"], "PENDING");
}

#[tokio::test]
async fn test_enclosing_and_enclosed_stays_conflict() {
    let app = TestApp::new().await;
    let token = app.admin_token().await;
    let room = app.create_room(&token, "Villa", "5000000", 4).await;
    let room_id = room["id"].as_str().unwrap();

    let (status, _) = app.request("POST", "/api/bookings", None, Some(booking_payload(room_id, "2025-07-10", "2025-07-12"))).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = app.request("POST", "/api/bookings", None, Some(booking_payload(room_id, "2025-07-08", "2025-07-15"))).await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, _) = app.request("POST", "/api/bookings", None, Some(booking_payload(room_id, "2025-07-11", "2025-07-12"))).await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, _) = app.request("POST", "/api/bookings", None, Some(booking_payload(room_id, "2025-07-06", "2025-07-10"))).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_cancelled_booking_frees_the_dates() {
    let app = TestApp::new().await;
    let token = app.admin_token().await;
    let room = app.create_room(&token, "Bungalow", "1.200.000", 2).await;
    let room_id = room["id"].as_str().unwrap();

    let (_, first) = app.request("POST", "/api/bookings", None, Some(booking_payload(room_id, "2025-08-01", "2025-08-03"))).await;
    let booking_id = first["id"].as_str().unwrap();

    let (status, updated) = app.request("PUT", &format!("/api/admin/bookings/{}", booking_id), Some(&token), Some(json!({
        "status": "CANCELLED"
    }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["status"], "CANCELLED");

    let (status, _) = app.request("POST", "/api/bookings", None, Some(booking_payload(room_id, "2025-08-01", "2025-08-03"))).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_update_rechecks_overlap_excluding_itself() {
    let app = TestApp::new().await;
    let token = app.admin_token().await;
    let room = app.create_room(&token, "Garden Suite", "3000000", 3).await;
    let room_id = room["id"].as_str().unwrap();

    let (_, a) = app.request("POST", "/api/bookings", None, Some(booking_payload(room_id, "2025-09-01", "2025-09-04"))).await;
    let (_, _b) = app.request("POST", "/api/bookings", None, Some(booking_payload(room_id, "2025-09-10", "2025-09-12"))).await;
    let a_id = a["id"].as_str().unwrap();

    // Extending inside its own range is fine
    let (status, _) = app.request("PUT", &format!("/api/admin/bookings/{}", a_id), Some(&token), Some(json!({
        "check_out_date": "2025-09-06"
    }))).await;
    assert_eq!(status, StatusCode::OK);

    // Moving onto the other booking is not
    let (status, _) = app.request("PUT", &format!("/api/admin/bookings/{}", a_id), Some(&token), Some(json!({
        "check_in_date": "2025-09-09",
        "check_out_date": "2025-09-11"
    }))).await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (_, unchanged) = app.request("GET", &format!("/api/admin/bookings/{}", a_id), Some(&token), None).await;
    assert_eq!(unchanged["check_in_date"], "2025-09-01");
    assert_eq!(unchanged["check_out_date"], "2025-09-06");
}

#[tokio::test]
async fn test_booking_amounts_default_from_room_price() {
    let app = TestApp::new().await;
    let token = app.admin_token().await;
    let room = app.create_room(&token, "Deluxe", "2.500.000 VNĐ/đêm", 2).await;
    let room_id = room["id"].as_str().unwrap();

    let (status, body) = app.request("POST", "/api/bookings", None, Some(booking_payload(room_id, "2025-06-01", "2025-06-05"))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["room_price"], 2_500_000);
    assert_eq!(body["total_amount"], 10_000_000);

    let mut manual = booking_payload(room_id, "2025-06-10", "2025-06-12");
    manual["room_price"] = json!(2_000_000);
    let (status, body) = app.request("POST", "/api/admin/bookings", Some(&token), Some(manual)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total_amount"], 4_000_000);
}

#[tokio::test]
async fn test_invalid_stays_are_rejected() {
    let app = TestApp::new().await;
    let token = app.admin_token().await;
    let room = app.create_room(&token, "Twin", "1000000", 2).await;
    let room_id = room["id"].as_str().unwrap();

    let (status, _) = app.request("POST", "/api/bookings", None, Some(booking_payload(room_id, "2025-06-05", "2025-06-05"))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = app.request("POST", "/api/bookings", None, Some(booking_payload(room_id, "2025-06-05", "2025-06-01"))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let mut crowded = booking_payload(room_id, "2025-06-01", "2025-06-03");
    crowded["number_of_guests"] = json!(5);
    let (status, body) = app.request("POST", "/api/bookings", None, Some(crowded)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("at most 2"));

    let mut bad_email = booking_payload(room_id, "2025-06-01", "2025-06-03");
    bad_email["customer_email"] = json!("not-an-email");
    let (status, body) = app.request("POST", "/api/bookings", None, Some(bad_email)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["details"]["customer_email"].is_array());
}

#[tokio::test]
async fn test_public_booking_requires_active_room() {
    let app = TestApp::new().await;
    let token = app.admin_token().await;
    let room = app.create_room(&token, "Closed Room", "1000000", 2).await;
    let room_id = room["id"].as_str().unwrap();

    app.request("PUT", &format!("/api/admin/rooms/{}", room_id), Some(&token), Some(json!({"status": "INACTIVE"}))).await;

    let (status, _) = app.request("POST", "/api/bookings", None, Some(booking_payload(room_id, "2025-06-01", "2025-06-03"))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = app.request("POST", "/api/bookings", None, Some(booking_payload("missing-room", "2025-06-01", "2025-06-03"))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_availability_endpoint() {
    let app = TestApp::new().await;
    let token = app.admin_token().await;
    let room = app.create_room(&token, "Phòng Gia Đình", "4.000.000", 4).await;
    let room_id = room["id"].as_str().unwrap();
    assert_eq!(room["slug"], "phong-gia-dinh");

    app.request("POST", "/api/bookings", None, Some(booking_payload(room_id, "2025-06-01", "2025-06-05"))).await;

    let (status, body) = app.request("GET", "/api/rooms/phong-gia-dinh/availability?check_in=2025-06-04&check_out=2025-06-07", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["available"], false);
    assert_eq!(body["nights"], 3);

    let (_, body) = app.request("GET", "/api/rooms/phong-gia-dinh/availability?check_in=2025-06-05&check_out=2025-06-07", None, None).await;
    assert_eq!(body["available"], true);

    let (status, _) = app.request("GET", "/api/rooms/phong-gia-dinh/availability?check_in=2025-06-07&check_out=2025-06-05", None, None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_admin_booking_listing_filters() {
    let app = TestApp::new().await;
    let token = app.admin_token().await;
    let room_a = app.create_room(&token, "Room A", "1000000", 2).await;
    let room_b = app.create_room(&token, "Room B", "1000000", 2).await;
    let a = room_a["id"].as_str().unwrap();
    let b = room_b["id"].as_str().unwrap();

    app.request("POST", "/api/bookings", None, Some(booking_payload(a, "2025-06-01", "2025-06-02"))).await;
    app.request("POST", "/api/bookings", None, Some(booking_payload(b, "2025-06-01", "2025-06-02"))).await;

    let (status, all) = app.request("GET", "/api/admin/bookings", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(all.as_array().unwrap().len(), 2);

    let (_, only_a) = app.request("GET", &format!("/api/admin/bookings?room_id={}", a), Some(&token), None).await;
    assert_eq!(only_a.as_array().unwrap().len(), 1);

    let (_, confirmed) = app.request("GET", "/api/admin/bookings?status=CONFIRMED", Some(&token), None).await;
    assert!(confirmed.as_array().unwrap().is_empty());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_bookings_for_same_dates_store_exactly_one() {
    let app = TestApp::new().await;
    let token = app.admin_token().await;
    let room = app.create_room(&token, "Honeymoon Villa", "6.000.000", 2).await;
    let room_id = room["id"].as_str().unwrap().to_string();

    let mut handles = Vec::new();
    for _ in 0..10 {
        let router = app.router.clone();
        let payload = booking_payload(&room_id, "2025-12-20", "2025-12-24");
        handles.push(tokio::spawn(async move {
            router.oneshot(
                Request::builder().method("POST").uri("/api/bookings")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(payload.to_string())).unwrap()
            ).await.unwrap().status()
        }));
    }

    let mut statuses = Vec::new();
    for handle in handles {
        statuses.push(handle.await.unwrap());
    }

    assert_eq!(statuses.iter().filter(|s| **s == StatusCode::OK).count(), 1, "statuses: {:?}", statuses);

    let (_, stored) = app.request("GET", &format!("/api/admin/bookings?room_id={}", room_id), Some(&token), None).await;
    assert_eq!(stored.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_malformed_bodies_return_json_errors() {
    let app = TestApp::new().await;

    let response = app.router.clone().oneshot(
        Request::builder().method("POST").uri("/api/bookings")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{not json")).unwrap()
    ).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert!(body["error"].is_string());

    let (status, body) = app.request("POST", "/api/bookings", None, Some(json!({"room_id": "x"}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_invalid_availability_query_returns_json_error() {
    let app = TestApp::new().await;
    let token = app.admin_token().await;
    app.create_room(&token, "Query Room", "1000000", 2).await;

    let (status, body) = app.request("GET", "/api/rooms/query-room/availability?check_in=notadate&check_out=2025-06-02", None, None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());

    let (status, body) = app.request("GET", "/api/admin/bookings?status=BOGUS", Some(&token), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_price_range_uses_first_amount() {
    let app = TestApp::new().await;
    let token = app.admin_token().await;
    let room = app.create_room(&token, "Flexible Room", "1.500.000 - 2.000.000 VNĐ", 2).await;
    let room_id = room["id"].as_str().unwrap();

    let (status, body) = app.request("POST", "/api/bookings", None, Some(booking_payload(room_id, "2025-06-01", "2025-06-03"))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["room_price"], 1_500_000);
    assert_eq!(body["total_amount"], 3_000_000);
}
