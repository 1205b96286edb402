use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{DateTime, Utc};
use sqlx::FromRow;
use std::fmt;
use std::str::FromStr;
use crate::error::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NewsStatus {
    Draft,
    Published,
}

impl NewsStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            NewsStatus::Draft => "DRAFT",
            NewsStatus::Published => "PUBLISHED",
        }
    }
}

impl fmt::Display for NewsStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NewsStatus {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "DRAFT" => Ok(NewsStatus::Draft),
            "PUBLISHED" => Ok(NewsStatus::Published),
            other => Err(AppError::Validation(format!("Unknown news status: {}", other))),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct News {
    pub id: String,
    pub slug: String,
    pub title: String,
    pub content: String,
    pub excerpt: Option<String>,
    pub featured_image: Option<String>,
    pub meta_title: Option<String>,
    pub meta_description: Option<String>,
    pub meta_keywords: Option<String>,
    pub status: String,
    pub published_at: Option<DateTime<Utc>>,
    pub author_id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

pub struct NewNewsParams {
    pub slug: String,
    pub title: String,
    pub content: String,
    pub excerpt: Option<String>,
    pub featured_image: Option<String>,
    pub meta_title: Option<String>,
    pub meta_description: Option<String>,
    pub meta_keywords: Option<String>,
    pub status: NewsStatus,
    pub author_id: Option<String>,
}

impl News {
    pub fn new(params: NewNewsParams) -> Self {
        let now = Utc::now();
        let mut news = Self {
            id: Uuid::new_v4().to_string(),
            slug: params.slug,
            title: params.title,
            content: params.content,
            excerpt: params.excerpt,
            featured_image: params.featured_image,
            meta_title: params.meta_title,
            meta_description: params.meta_description,
            meta_keywords: params.meta_keywords,
            status: NewsStatus::Draft.to_string(),
            published_at: None,
            author_id: params.author_id,
            created_at: now,
            updated_at: now,
        };
        news.set_status(params.status);
        news
    }

    /// `published_at` is stamped the first time an article goes live and kept afterwards.
    pub fn set_status(&mut self, status: NewsStatus) {
        if status == NewsStatus::Published && self.published_at.is_none() {
            self.published_at = Some(Utc::now());
        }
        self.status = status.to_string();
    }

    pub fn is_published(&self) -> bool {
        self.status == NewsStatus::Published.as_str()
    }
}

#[derive(Debug, Default, Clone)]
pub struct NewsFilter {
    pub status: Option<NewsStatus>,
    pub limit: i64,
    pub offset: i64,
}
