use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{DateTime, Utc};
use sqlx::FromRow;
use std::fmt;
use std::str::FromStr;
use crate::error::AppError;

pub const DEFAULT_LEAD_SOURCE: &str = "WEBSITE";

/// Lead status. Any value may follow any other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CustomerStatus {
    New,
    Contacted,
    Converted,
    Lost,
    Archived,
}

impl CustomerStatus {
    pub const ALL: [CustomerStatus; 5] = [
        CustomerStatus::New,
        CustomerStatus::Contacted,
        CustomerStatus::Converted,
        CustomerStatus::Lost,
        CustomerStatus::Archived,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CustomerStatus::New => "NEW",
            CustomerStatus::Contacted => "CONTACTED",
            CustomerStatus::Converted => "CONVERTED",
            CustomerStatus::Lost => "LOST",
            CustomerStatus::Archived => "ARCHIVED",
        }
    }
}

impl fmt::Display for CustomerStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CustomerStatus {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CustomerStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| AppError::Validation(format!("Unknown customer status: {}", s)))
    }
}

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Customer {
    pub id: String,
    pub name: String,
    pub phone: String,
    pub email: Option<String>,
    pub province_code: Option<String>,
    pub province_name: Option<String>,
    pub ward_code: Option<String>,
    pub ward_name: Option<String>,
    pub source: String,
    pub status: String,
    pub assigned_to: Option<String>,
    pub notes: Option<String>,
    pub last_contact_date: Option<DateTime<Utc>>,
    pub next_follow_up_date: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

pub struct NewCustomerParams {
    pub name: String,
    pub phone: String,
    pub email: Option<String>,
    pub province_code: Option<String>,
    pub province_name: Option<String>,
    pub ward_code: Option<String>,
    pub ward_name: Option<String>,
    pub source: Option<String>,
    pub notes: Option<String>,
}

impl Customer {
    pub fn new(params: NewCustomerParams) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            name: params.name,
            phone: params.phone,
            email: params.email,
            province_code: params.province_code,
            province_name: params.province_name,
            ward_code: params.ward_code,
            ward_name: params.ward_name,
            source: params.source.unwrap_or_else(|| DEFAULT_LEAD_SOURCE.to_string()),
            status: CustomerStatus::New.to_string(),
            assigned_to: None,
            notes: params.notes,
            last_contact_date: None,
            next_follow_up_date: None,
            created_at: now,
            updated_at: now,
        }
    }
}

#[derive(Debug, Default, Clone)]
pub struct CustomerFilter {
    pub status: Option<CustomerStatus>,
    pub assigned_to: Option<String>,
    pub search: Option<String>,
    pub limit: i64,
    pub offset: i64,
}

#[derive(Debug, Serialize, FromRow, Clone)]
pub struct StatusCount {
    pub status: String,
    pub count: i64,
}
