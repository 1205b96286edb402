pub mod sqlite_banner_repo;
pub mod sqlite_booking_repo;
pub mod sqlite_customer_repo;
pub mod sqlite_news_repo;
pub mod sqlite_room_repo;
pub mod sqlite_service_zone_repo;
pub mod sqlite_session_repo;
pub mod sqlite_setting_repo;
pub mod sqlite_team_member_repo;
pub mod sqlite_user_repo;

pub mod postgres_banner_repo;
pub mod postgres_booking_repo;
pub mod postgres_customer_repo;
pub mod postgres_news_repo;
pub mod postgres_room_repo;
pub mod postgres_service_zone_repo;
pub mod postgres_session_repo;
pub mod postgres_setting_repo;
pub mod postgres_team_member_repo;
pub mod postgres_user_repo;
