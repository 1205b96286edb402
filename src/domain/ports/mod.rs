use crate::domain::models::{
    banner::Banner, booking::{Booking, BookingFilter}, customer::{Customer, CustomerFilter, CustomerStatus, StatusCount},
    news::{News, NewsFilter}, room::Room, service_zone::ServiceZone, session::Session, setting::SiteSetting,
    team_member::TeamMember, user::User,
};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::NaiveDate;

#[async_trait]
pub trait RoomRepository: Send + Sync {
    async fn create(&self, room: &Room) -> Result<Room, AppError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<Room>, AppError>;
    async fn find_by_slug(&self, slug: &str) -> Result<Option<Room>, AppError>;
    async fn list(&self, active_only: bool) -> Result<Vec<Room>, AppError>;
    async fn update(&self, room: &Room) -> Result<Room, AppError>;
    async fn delete(&self, id: &str) -> Result<(), AppError>;
}

#[async_trait]
pub trait BookingRepository: Send + Sync {
    /// Inserts the booking after re-checking availability while holding a
    /// write lock on the room row. Fails with `Conflict` on overlap.
    async fn create_if_available(&self, booking: &Booking) -> Result<Booking, AppError>;
    /// Same guarantee as `create_if_available`, ignoring the booking itself.
    async fn update_if_available(&self, booking: &Booking) -> Result<Booking, AppError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<Booking>, AppError>;
    async fn list(&self, filter: &BookingFilter) -> Result<Vec<Booking>, AppError>;
    async fn delete(&self, id: &str) -> Result<(), AppError>;
    async fn count_by_room(&self, room_id: &str) -> Result<i64, AppError>;
    async fn has_overlap(&self, room_id: &str, check_in: NaiveDate, check_out: NaiveDate, exclude_id: Option<&str>) -> Result<bool, AppError>;
}

#[async_trait]
pub trait CustomerRepository: Send + Sync {
    async fn create(&self, customer: &Customer) -> Result<Customer, AppError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<Customer>, AppError>;
    async fn list(&self, filter: &CustomerFilter) -> Result<(Vec<Customer>, i64), AppError>;
    async fn update(&self, customer: &Customer) -> Result<Customer, AppError>;
    async fn update_status(&self, id: &str, status: CustomerStatus) -> Result<Customer, AppError>;
    async fn assign(&self, id: &str, user_id: Option<&str>) -> Result<Customer, AppError>;
    async fn delete(&self, id: &str) -> Result<(), AppError>;
    async fn count_by_status(&self) -> Result<Vec<StatusCount>, AppError>;
}

#[async_trait]
pub trait NewsRepository: Send + Sync {
    async fn create(&self, news: &News) -> Result<News, AppError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<News>, AppError>;
    async fn find_by_slug(&self, slug: &str) -> Result<Option<News>, AppError>;
    async fn list(&self, filter: &NewsFilter) -> Result<(Vec<News>, i64), AppError>;
    /// Slugs equal to `base` or of the form `base-*`.
    async fn slugs_with_prefix(&self, base: &str) -> Result<Vec<String>, AppError>;
    async fn published_slugs(&self, limit: i64) -> Result<Vec<String>, AppError>;
    async fn update(&self, news: &News) -> Result<News, AppError>;
    async fn delete(&self, id: &str) -> Result<(), AppError>;
}

#[async_trait]
pub trait ServiceZoneRepository: Send + Sync {
    async fn create(&self, zone: &ServiceZone) -> Result<ServiceZone, AppError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<ServiceZone>, AppError>;
    async fn find_by_slug(&self, slug: &str) -> Result<Option<ServiceZone>, AppError>;
    async fn list(&self, active_only: bool) -> Result<Vec<ServiceZone>, AppError>;
    async fn update(&self, zone: &ServiceZone) -> Result<ServiceZone, AppError>;
    async fn delete(&self, id: &str) -> Result<(), AppError>;
}

#[async_trait]
pub trait BannerRepository: Send + Sync {
    async fn create(&self, banner: &Banner) -> Result<Banner, AppError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<Banner>, AppError>;
    async fn list(&self, active_only: bool, position: Option<&str>) -> Result<Vec<Banner>, AppError>;
    async fn update(&self, banner: &Banner) -> Result<Banner, AppError>;
    async fn delete(&self, id: &str) -> Result<(), AppError>;
}

#[async_trait]
pub trait TeamMemberRepository: Send + Sync {
    async fn create(&self, member: &TeamMember) -> Result<TeamMember, AppError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<TeamMember>, AppError>;
    async fn list(&self, active_only: bool) -> Result<Vec<TeamMember>, AppError>;
    async fn update(&self, member: &TeamMember) -> Result<TeamMember, AppError>;
    async fn delete(&self, id: &str) -> Result<(), AppError>;
}

#[async_trait]
pub trait SettingRepository: Send + Sync {
    async fn list(&self) -> Result<Vec<SiteSetting>, AppError>;
    async fn find(&self, key: &str) -> Result<Option<SiteSetting>, AppError>;
    async fn upsert(&self, setting: &SiteSetting) -> Result<SiteSetting, AppError>;
    async fn delete(&self, key: &str) -> Result<(), AppError>;
}

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn create(&self, user: &User) -> Result<User, AppError>;
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<User>, AppError>;
    async fn list(&self) -> Result<Vec<User>, AppError>;
    async fn delete(&self, id: &str) -> Result<(), AppError>;
}

#[async_trait]
pub trait SessionRepository: Send + Sync {
    async fn create(&self, session: &Session) -> Result<Session, AppError>;
    async fn find_by_token_hash(&self, token_hash: &str) -> Result<Option<Session>, AppError>;
    async fn delete_by_token_hash(&self, token_hash: &str) -> Result<(), AppError>;
}
