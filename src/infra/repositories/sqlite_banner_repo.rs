use crate::domain::{models::banner::Banner, ports::BannerRepository};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::SqlitePool;

pub struct SqliteBannerRepo {
    pool: SqlitePool,
}

impl SqliteBannerRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BannerRepository for SqliteBannerRepo {
    async fn create(&self, banner: &Banner) -> Result<Banner, AppError> {
        sqlx::query_as::<_, Banner>(
            "INSERT INTO banners (id, title, subtitle, image_url, link_url, button_text, position, sort_order, is_active, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
             RETURNING *"
        )
            .bind(&banner.id).bind(&banner.title).bind(&banner.subtitle).bind(&banner.image_url)
            .bind(&banner.link_url).bind(&banner.button_text).bind(&banner.position).bind(banner.sort_order)
            .bind(banner.is_active).bind(banner.created_at).bind(banner.updated_at)
            .fetch_one(&self.pool).await.map_err(AppError::Database)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Banner>, AppError> {
        sqlx::query_as::<_, Banner>("SELECT * FROM banners WHERE id = ?").bind(id).fetch_optional(&self.pool).await.map_err(AppError::Database)
    }

    async fn list(&self, active_only: bool, position: Option<&str>) -> Result<Vec<Banner>, AppError> {
        sqlx::query_as::<_, Banner>(
            "SELECT * FROM banners WHERE (? = 0 OR is_active = 1) AND (? IS NULL OR position = ?)
             ORDER BY sort_order ASC, created_at ASC"
        )
            .bind(active_only).bind(position).bind(position)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn update(&self, banner: &Banner) -> Result<Banner, AppError> {
        sqlx::query_as::<_, Banner>(
            "UPDATE banners SET title=?, subtitle=?, image_url=?, link_url=?, button_text=?, position=?, sort_order=?, is_active=?, updated_at=?
             WHERE id=?
             RETURNING *"
        )
            .bind(&banner.title).bind(&banner.subtitle).bind(&banner.image_url).bind(&banner.link_url)
            .bind(&banner.button_text).bind(&banner.position).bind(banner.sort_order).bind(banner.is_active)
            .bind(banner.updated_at)
            .bind(&banner.id)
            .fetch_optional(&self.pool).await.map_err(AppError::Database)?
            .ok_or(AppError::NotFound("Banner not found".into()))
    }

    async fn delete(&self, id: &str) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM banners WHERE id = ?").bind(id).execute(&self.pool).await.map_err(AppError::Database)?;
        if result.rows_affected() == 0 { return Err(AppError::NotFound("Banner not found".into())); }
        Ok(())
    }
}
