use std::sync::Arc;
use crate::domain::ports::{
    BannerRepository, BookingRepository, CustomerRepository, NewsRepository, RoomRepository,
    ServiceZoneRepository, SettingRepository, TeamMemberRepository, UserRepository,
};
use crate::domain::services::auth_service::AuthService;
use crate::config::Config;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub room_repo: Arc<dyn RoomRepository>,
    pub booking_repo: Arc<dyn BookingRepository>,
    pub customer_repo: Arc<dyn CustomerRepository>,
    pub news_repo: Arc<dyn NewsRepository>,
    pub service_zone_repo: Arc<dyn ServiceZoneRepository>,
    pub banner_repo: Arc<dyn BannerRepository>,
    pub team_member_repo: Arc<dyn TeamMemberRepository>,
    pub setting_repo: Arc<dyn SettingRepository>,
    pub user_repo: Arc<dyn UserRepository>,
    pub auth_service: Arc<AuthService>,
}
