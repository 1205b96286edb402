pub mod banner;
pub mod booking;
pub mod customer;
pub mod news;
pub mod room;
pub mod service_zone;
pub mod session;
pub mod setting;
pub mod team_member;
pub mod user;
