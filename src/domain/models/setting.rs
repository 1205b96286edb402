use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use sqlx::FromRow;

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct SiteSetting {
    pub key: String,
    pub value: String,
    pub description: Option<String>,
    pub updated_at: DateTime<Utc>,
}

impl SiteSetting {
    pub fn new(key: String, value: String, description: Option<String>) -> Self {
        Self { key, value, description, updated_at: Utc::now() }
    }
}
