pub mod auth;
pub mod banner;
pub mod booking;
pub mod customer;
pub mod health;
pub mod news;
pub mod room;
pub mod service_zone;
pub mod setting;
pub mod team_member;
pub mod user;
