use serde::Serialize;
use uuid::Uuid;
use chrono::{DateTime, Utc};
use sqlx::FromRow;
use crate::domain::models::room::ListingStatus;
use crate::domain::services::serialized_list::serialize_list;

#[derive(Debug, Serialize, FromRow, Clone)]
pub struct ServiceZone {
    pub id: String,
    pub slug: String,
    pub name: String,
    pub description: Option<String>,
    #[serde(serialize_with = "serialize_list")]
    pub features: String,
    #[serde(serialize_with = "serialize_list")]
    pub images: String,
    pub sort_order: i32,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

pub struct NewServiceZoneParams {
    pub slug: String,
    pub name: String,
    pub description: Option<String>,
    pub features: String,
    pub images: String,
    pub sort_order: i32,
    pub status: ListingStatus,
}

impl ServiceZone {
    pub fn new(params: NewServiceZoneParams) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            slug: params.slug,
            name: params.name,
            description: params.description,
            features: params.features,
            images: params.images,
            sort_order: params.sort_order,
            status: params.status.to_string(),
            created_at: now,
            updated_at: now,
        }
    }
}
