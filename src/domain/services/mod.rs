pub mod auth_service;
pub mod availability;
pub mod pricing;
pub mod serialized_list;
pub mod slug;
