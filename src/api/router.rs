use axum::{
    body::Body,
    extract::Request,
    routing::{get, post, put, patch, delete},
    Router,
};
use std::sync::Arc;
use std::time::Duration;
use crate::state::AppState;
use crate::api::handlers::{health, auth, user, room, booking, customer, news, service_zone, banner, team_member, setting};
use tower_http::{
    trace::TraceLayer,
    classify::ServerErrorsFailureClass,
};
use tower_cookies::CookieManagerLayer;
use tracing::{info_span, Span, error, info};
use uuid::Uuid;

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health::health_check))

        // Auth
        .route("/api/auth/login", post(auth::login))
        .route("/api/auth/logout", post(auth::logout))
        .route("/api/auth/me", get(auth::me))

        // Public content
        .route("/api/rooms", get(room::list_rooms))
        .route("/api/rooms/{slug}", get(room::get_room_by_slug))
        .route("/api/rooms/{slug}/availability", get(room::check_availability))
        .route("/api/news", get(news::list_published_news))
        .route("/api/news/{slug}", get(news::get_news_by_slug))
        .route("/api/service-zones", get(service_zone::list_service_zones))
        .route("/api/service-zones/{slug}", get(service_zone::get_service_zone_by_slug))
        .route("/api/banners", get(banner::list_banners))
        .route("/api/team-members", get(team_member::list_team_members))
        .route("/api/settings", get(setting::public_settings))

        // Public writes
        .route("/api/bookings", post(booking::create_public_booking))
        .route("/api/customers", post(customer::create_public_customer))

        // Admin - Bookings
        .route("/api/admin/bookings", get(booking::list_bookings).post(booking::create_booking))
        .route("/api/admin/bookings/{booking_id}", get(booking::get_booking).put(booking::update_booking).delete(booking::delete_booking))

        // Admin - Rooms
        .route("/api/admin/rooms", get(room::admin_list_rooms).post(room::create_room))
        .route("/api/admin/rooms/{room_id}", get(room::admin_get_room).put(room::update_room).delete(room::delete_room))

        // Admin - Customers
        .route("/api/admin/customers", get(customer::list_customers))
        .route("/api/admin/customers/stats", get(customer::customer_stats))
        .route("/api/admin/customers/{customer_id}", get(customer::get_customer).put(customer::update_customer).delete(customer::delete_customer))
        .route("/api/admin/customers/{customer_id}/status", patch(customer::update_customer_status))
        .route("/api/admin/customers/{customer_id}/assign", patch(customer::assign_customer))

        // Admin - News
        .route("/api/admin/news", get(news::admin_list_news).post(news::create_news))
        .route("/api/admin/news/{news_id}", get(news::admin_get_news).put(news::update_news).delete(news::delete_news))

        // Admin - Site content
        .route("/api/admin/service-zones", get(service_zone::admin_list_service_zones).post(service_zone::create_service_zone))
        .route("/api/admin/service-zones/{zone_id}", put(service_zone::update_service_zone).delete(service_zone::delete_service_zone))
        .route("/api/admin/banners", get(banner::admin_list_banners).post(banner::create_banner))
        .route("/api/admin/banners/{banner_id}", put(banner::update_banner).delete(banner::delete_banner))
        .route("/api/admin/team-members", get(team_member::admin_list_team_members).post(team_member::create_team_member))
        .route("/api/admin/team-members/{member_id}", put(team_member::update_team_member).delete(team_member::delete_team_member))
        .route("/api/admin/settings", get(setting::list_settings).put(setting::upsert_settings))
        .route("/api/admin/settings/{key}", delete(setting::delete_setting))

        // Admin - Users
        .route("/api/admin/users", get(user::list_users).post(user::create_user))
        .route("/api/admin/users/{user_id}", delete(user::delete_user))

        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &Request<Body>| {
                    let request_id = Uuid::new_v4().to_string();
                    info_span!(
                        "http_request",
                        request_id = %request_id,
                        method = ?request.method(),
                        uri = ?request.uri(),
                        user_id = tracing::field::Empty,
                    )
                })
                .on_request(|request: &Request<Body>, _span: &Span| {
                    info!("started processing request: {} {}", request.method(), request.uri().path());
                })
                .on_response(|response: &axum::http::Response<Body>, latency: Duration, _span: &Span| {
                    info!(
                        status = response.status().as_u16(),
                        latency_ms = latency.as_millis(),
                        "finished processing request"
                    );
                })
                .on_failure(|error: ServerErrorsFailureClass, _latency: Duration, _span: &Span| {
                    error!("request failed: {:?}", error);
                })
        )
        .layer(CookieManagerLayer::new())
        .with_state(state)
}
