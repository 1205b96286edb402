use crate::domain::models::{
    booking::BookingStatus, customer::CustomerStatus, news::NewsStatus, room::ListingStatus,
};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

pub const DEFAULT_PAGE_SIZE: i64 = 20;
pub const MAX_PAGE_SIZE: i64 = 100;

#[derive(Deserialize, Default)]
pub struct PageQuery {
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

impl PageQuery {
    /// Returns `(page, limit, offset)` with page >= 1 and limit clamped to `1..=MAX_PAGE_SIZE`.
    pub fn window(&self) -> (i64, i64, i64) {
        let page = self.page.unwrap_or(1).max(1);
        let limit = self.limit.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, MAX_PAGE_SIZE);
        (page, limit, (page - 1).saturating_mul(limit))
    }
}

/// Maps an optional text field from an update body: absent keeps the current
/// value, an empty string clears it.
pub fn patch_optional(current: &mut Option<String>, incoming: Option<String>) {
    if let Some(value) = incoming {
        *current = if value.trim().is_empty() { None } else { Some(value) };
    }
}

// Auth & users

#[derive(Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1))]
    pub password: String,
}

#[derive(Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RoleInput {
    Admin,
    Staff,
}

#[derive(Deserialize, Validate)]
pub struct CreateUserRequest {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[validate(length(min = 8))]
    pub password: String,
    pub role: Option<RoleInput>,
}

// Rooms

#[derive(Deserialize, Validate)]
pub struct CreateRoomRequest {
    pub slug: Option<String>,
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    pub description: Option<String>,
    #[validate(length(min = 1, max = 100))]
    pub price: String,
    pub area: Option<String>,
    #[validate(range(min = 1, max = 50))]
    pub capacity: Option<i32>,
    pub bed_type: Option<String>,
    pub features: Option<Vec<String>>,
    pub images: Option<Vec<String>>,
    pub status: Option<ListingStatus>,
    pub sort_order: Option<i32>,
}

#[derive(Deserialize, Validate)]
pub struct UpdateRoomRequest {
    pub slug: Option<String>,
    #[validate(length(min = 1, max = 200))]
    pub name: Option<String>,
    pub description: Option<String>,
    #[validate(length(min = 1, max = 100))]
    pub price: Option<String>,
    pub area: Option<String>,
    #[validate(range(min = 1, max = 50))]
    pub capacity: Option<i32>,
    pub bed_type: Option<String>,
    pub features: Option<Vec<String>>,
    pub images: Option<Vec<String>>,
    pub status: Option<ListingStatus>,
    pub sort_order: Option<i32>,
}

#[derive(Deserialize)]
pub struct AvailabilityQuery {
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
}

// Bookings

#[derive(Deserialize, Validate)]
pub struct CreateBookingRequest {
    #[validate(length(min = 1))]
    pub room_id: String,
    #[validate(length(min = 1, max = 100))]
    pub customer_name: String,
    #[validate(email)]
    pub customer_email: String,
    #[validate(length(min = 8, max = 20))]
    pub customer_phone: String,
    pub check_in_date: NaiveDate,
    pub check_out_date: NaiveDate,
    #[validate(range(min = 1, max = 50))]
    pub number_of_guests: i32,
    #[validate(length(max = 2000))]
    pub special_requests: Option<String>,
}

/// Admin bookings may also set the status and override the computed amounts.
#[derive(Deserialize, Validate)]
pub struct AdminCreateBookingRequest {
    #[serde(flatten)]
    #[validate(nested)]
    pub booking: CreateBookingRequest,
    pub status: Option<BookingStatus>,
    #[validate(range(min = 0))]
    pub room_price: Option<i64>,
    #[validate(range(min = 0))]
    pub total_amount: Option<i64>,
}

#[derive(Deserialize, Validate)]
pub struct UpdateBookingRequest {
    pub room_id: Option<String>,
    #[validate(length(min = 1, max = 100))]
    pub customer_name: Option<String>,
    #[validate(email)]
    pub customer_email: Option<String>,
    #[validate(length(min = 8, max = 20))]
    pub customer_phone: Option<String>,
    pub check_in_date: Option<NaiveDate>,
    pub check_out_date: Option<NaiveDate>,
    #[validate(range(min = 1, max = 50))]
    pub number_of_guests: Option<i32>,
    #[validate(range(min = 0))]
    pub room_price: Option<i64>,
    #[validate(range(min = 0))]
    pub total_amount: Option<i64>,
    pub status: Option<BookingStatus>,
    pub special_requests: Option<String>,
}

#[derive(Deserialize)]
pub struct BookingListQuery {
    pub room_id: Option<String>,
    pub status: Option<BookingStatus>,
}

// Customers (leads)

#[derive(Deserialize, Validate)]
pub struct CreateCustomerRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[validate(length(min = 8, max = 20))]
    pub phone: String,
    #[validate(email)]
    pub email: Option<String>,
    pub province_code: Option<String>,
    pub province_name: Option<String>,
    pub ward_code: Option<String>,
    pub ward_name: Option<String>,
    #[validate(length(max = 50))]
    pub source: Option<String>,
    #[validate(length(max = 2000))]
    pub notes: Option<String>,
}

#[derive(Deserialize, Validate)]
pub struct UpdateCustomerRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: Option<String>,
    #[validate(length(min = 8, max = 20))]
    pub phone: Option<String>,
    pub email: Option<String>,
    pub province_code: Option<String>,
    pub province_name: Option<String>,
    pub ward_code: Option<String>,
    pub ward_name: Option<String>,
    #[validate(length(min = 1, max = 50))]
    pub source: Option<String>,
    pub status: Option<CustomerStatus>,
    pub notes: Option<String>,
    pub last_contact_date: Option<DateTime<Utc>>,
    pub next_follow_up_date: Option<DateTime<Utc>>,
}

#[derive(Deserialize, Validate)]
pub struct UpdateCustomerStatusRequest {
    pub status: CustomerStatus,
}

#[derive(Deserialize, Validate)]
pub struct AssignCustomerRequest {
    pub user_id: Option<String>,
}

#[derive(Deserialize)]
pub struct CustomerListQuery {
    pub status: Option<CustomerStatus>,
    pub assigned_to: Option<String>,
    pub search: Option<String>,
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

// News

#[derive(Deserialize, Validate)]
pub struct CreateNewsRequest {
    pub slug: Option<String>,
    #[validate(length(min = 1, max = 255))]
    pub title: String,
    #[validate(length(min = 1))]
    pub content: String,
    pub excerpt: Option<String>,
    pub featured_image: Option<String>,
    pub meta_title: Option<String>,
    pub meta_description: Option<String>,
    pub meta_keywords: Option<String>,
    pub status: Option<NewsStatus>,
}

#[derive(Deserialize, Validate)]
pub struct UpdateNewsRequest {
    pub slug: Option<String>,
    #[validate(length(min = 1, max = 255))]
    pub title: Option<String>,
    #[validate(length(min = 1))]
    pub content: Option<String>,
    pub excerpt: Option<String>,
    pub featured_image: Option<String>,
    pub meta_title: Option<String>,
    pub meta_description: Option<String>,
    pub meta_keywords: Option<String>,
    pub status: Option<NewsStatus>,
}

#[derive(Deserialize)]
pub struct NewsListQuery {
    pub status: Option<NewsStatus>,
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

// Service zones

#[derive(Deserialize, Validate)]
pub struct CreateServiceZoneRequest {
    pub slug: Option<String>,
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    pub description: Option<String>,
    pub features: Option<Vec<String>>,
    pub images: Option<Vec<String>>,
    pub sort_order: Option<i32>,
    pub status: Option<ListingStatus>,
}

#[derive(Deserialize, Validate)]
pub struct UpdateServiceZoneRequest {
    pub slug: Option<String>,
    #[validate(length(min = 1, max = 200))]
    pub name: Option<String>,
    pub description: Option<String>,
    pub features: Option<Vec<String>>,
    pub images: Option<Vec<String>>,
    pub sort_order: Option<i32>,
    pub status: Option<ListingStatus>,
}

// Banners

#[derive(Deserialize, Validate)]
pub struct CreateBannerRequest {
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    pub subtitle: Option<String>,
    #[validate(length(min = 1))]
    pub image_url: String,
    pub link_url: Option<String>,
    pub button_text: Option<String>,
    #[validate(length(min = 1, max = 50))]
    pub position: Option<String>,
    pub sort_order: Option<i32>,
    pub is_active: Option<bool>,
}

#[derive(Deserialize, Validate)]
pub struct UpdateBannerRequest {
    #[validate(length(min = 1, max = 200))]
    pub title: Option<String>,
    pub subtitle: Option<String>,
    #[validate(length(min = 1))]
    pub image_url: Option<String>,
    pub link_url: Option<String>,
    pub button_text: Option<String>,
    #[validate(length(min = 1, max = 50))]
    pub position: Option<String>,
    pub sort_order: Option<i32>,
    pub is_active: Option<bool>,
}

#[derive(Deserialize)]
pub struct BannerQuery {
    pub position: Option<String>,
}

// Team members

#[derive(Deserialize, Validate)]
pub struct CreateTeamMemberRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[validate(length(min = 1, max = 100))]
    pub position: String,
    pub bio: Option<String>,
    pub image_url: Option<String>,
    pub sort_order: Option<i32>,
    pub is_active: Option<bool>,
}

#[derive(Deserialize, Validate)]
pub struct UpdateTeamMemberRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: Option<String>,
    #[validate(length(min = 1, max = 100))]
    pub position: Option<String>,
    pub bio: Option<String>,
    pub image_url: Option<String>,
    pub sort_order: Option<i32>,
    pub is_active: Option<bool>,
}

// Settings

#[derive(Deserialize, Serialize, Validate)]
pub struct SettingInput {
    #[validate(length(min = 1, max = 100))]
    pub key: String,
    pub value: String,
    pub description: Option<String>,
}

#[derive(Deserialize, Validate)]
pub struct UpsertSettingsRequest {
    #[validate(length(min = 1), nested)]
    pub settings: Vec<SettingInput>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_window_defaults_and_clamps() {
        assert_eq!(PageQuery::default().window(), (1, DEFAULT_PAGE_SIZE, 0));
        assert_eq!(PageQuery { page: Some(3), limit: Some(10) }.window(), (3, 10, 20));
        assert_eq!(PageQuery { page: Some(-4), limit: Some(1000) }.window(), (1, MAX_PAGE_SIZE, 0));
    }

    #[test]
    fn test_page_window_huge_page_saturates() {
        let (page, limit, offset) = PageQuery { page: Some(i64::MAX), limit: Some(20) }.window();
        assert_eq!(page, i64::MAX);
        assert_eq!(limit, 20);
        assert_eq!(offset, i64::MAX);
    }
}
