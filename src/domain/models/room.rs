use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{DateTime, Utc};
use sqlx::FromRow;
use std::fmt;
use std::str::FromStr;
use crate::domain::services::serialized_list::serialize_list;
use crate::error::AppError;

/// Visibility flag shared by rooms and service zones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ListingStatus {
    Active,
    Inactive,
}

impl ListingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ListingStatus::Active => "ACTIVE",
            ListingStatus::Inactive => "INACTIVE",
        }
    }
}

impl fmt::Display for ListingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ListingStatus {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ACTIVE" => Ok(ListingStatus::Active),
            "INACTIVE" => Ok(ListingStatus::Inactive),
            other => Err(AppError::Validation(format!("Unknown status: {}", other))),
        }
    }
}

#[derive(Debug, Serialize, FromRow, Clone)]
pub struct Room {
    pub id: String,
    pub slug: String,
    pub name: String,
    pub description: Option<String>,
    pub price: String,
    pub area: Option<String>,
    pub capacity: Option<i32>,
    pub bed_type: Option<String>,
    #[serde(serialize_with = "serialize_list")]
    pub features: String,
    #[serde(serialize_with = "serialize_list")]
    pub images: String,
    pub status: String,
    pub sort_order: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

pub struct NewRoomParams {
    pub slug: String,
    pub name: String,
    pub description: Option<String>,
    pub price: String,
    pub area: Option<String>,
    pub capacity: Option<i32>,
    pub bed_type: Option<String>,
    pub features: String,
    pub images: String,
    pub status: ListingStatus,
    pub sort_order: i32,
}

impl Room {
    pub fn new(params: NewRoomParams) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            slug: params.slug,
            name: params.name,
            description: params.description,
            price: params.price,
            area: params.area,
            capacity: params.capacity,
            bed_type: params.bed_type,
            features: params.features,
            images: params.images,
            status: params.status.to_string(),
            sort_order: params.sort_order,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn is_active(&self) -> bool {
        self.status == ListingStatus::Active.as_str()
    }
}
