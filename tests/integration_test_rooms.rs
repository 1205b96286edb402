mod common;

use axum::http::StatusCode;
use common::TestApp;
use serde_json::json;

#[tokio::test]
async fn test_room_with_bookings_cannot_be_deleted() {
    let app = TestApp::new().await;
    let token = app.admin_token().await;
    let room = app.create_room(&token, "Onsen Suite", "3.000.000", 2).await;
    let room_id = room["id"].as_str().unwrap();

    let (status, _) = app.request("POST", "/api/bookings", None, Some(json!({
        "room_id": room_id,
        "customer_name": "Trần Bình",
        "customer_email": "binh@example.com",
        "customer_phone": "0912345678",
        "check_in_date": "2025-10-01",
        "check_out_date": "2025-10-03",
        "number_of_guests": 1
    }))).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = app.request("DELETE", &format!("/api/admin/rooms/{}", room_id), Some(&token), None).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert!(body["error"].as_str().unwrap().contains("1 booking"));

    let (status, _) = app.request("GET", &format!("/api/admin/rooms/{}", room_id), Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_room_without_bookings_is_deleted() {
    let app = TestApp::new().await;
    let token = app.admin_token().await;
    let room = app.create_room(&token, "Spare Room", "900000", 2).await;
    let room_id = room["id"].as_str().unwrap();

    let (status, _) = app.request("DELETE", &format!("/api/admin/rooms/{}", room_id), Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = app.request("GET", &format!("/api/admin/rooms/{}", room_id), Some(&token), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_public_rooms_show_active_only_in_sort_order() {
    let app = TestApp::new().await;
    let token = app.admin_token().await;

    for (name, order) in [("Second", 2), ("First", 1), ("Hidden", 0)] {
        let (status, _) = app.request("POST", "/api/admin/rooms", Some(&token), Some(json!({
            "name": name,
            "price": "1000000",
            "sort_order": order,
            "status": if name == "Hidden" { "INACTIVE" } else { "ACTIVE" }
        }))).await;
        assert_eq!(status, StatusCode::OK);
    }

    let (status, body) = app.request("GET", "/api/rooms", None, None).await;
    assert_eq!(status, StatusCode::OK);
    let names: Vec<&str> = body.as_array().unwrap().iter().map(|r| r["name"].as_str().unwrap()).collect();
    assert_eq!(names, vec!["First", "Second"]);

    let (status, _) = app.request("GET", "/api/rooms/hidden", None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, all) = app.request("GET", "/api/admin/rooms", Some(&token), None).await;
    assert_eq!(all.as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn test_room_lists_are_returned_as_arrays() {
    let app = TestApp::new().await;
    let token = app.admin_token().await;
    app.create_room(&token, "Phòng Tiêu Chuẩn", "1.500.000", 2).await;

    let (status, room) = app.request("GET", "/api/rooms/phong-tieu-chuan", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(room["features"], json!(["Ban công", "Bồn tắm"]));
    assert_eq!(room["images"], json!(["/img/room-1.jpg"]));

    let room_id = room["id"].as_str().unwrap();
    let (_, updated) = app.request("PUT", &format!("/api/admin/rooms/{}", room_id), Some(&token), Some(json!({
        "features": ["Wifi"],
        "description": "Quiet garden view"
    }))).await;
    assert_eq!(updated["features"], json!(["Wifi"]));
    assert_eq!(updated["description"], "Quiet garden view");
    assert_eq!(updated["images"], json!(["/img/room-1.jpg"]));
}

#[tokio::test]
async fn test_duplicate_room_slug_conflicts() {
    let app = TestApp::new().await;
    let token = app.admin_token().await;
    app.create_room(&token, "Twin Room", "1000000", 2).await;

    let (status, _) = app.request("POST", "/api/admin/rooms", Some(&token), Some(json!({
        "name": "Another",
        "slug": "twin-room",
        "price": "1000000"
    }))).await;
    assert_eq!(status, StatusCode::CONFLICT);
}
