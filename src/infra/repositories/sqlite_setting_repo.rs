use crate::domain::{models::setting::SiteSetting, ports::SettingRepository};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::SqlitePool;

pub struct SqliteSettingRepo {
    pool: SqlitePool,
}

impl SqliteSettingRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SettingRepository for SqliteSettingRepo {
    async fn list(&self) -> Result<Vec<SiteSetting>, AppError> {
        sqlx::query_as::<_, SiteSetting>("SELECT * FROM site_settings ORDER BY key ASC").fetch_all(&self.pool).await.map_err(AppError::Database)
    }

    async fn find(&self, key: &str) -> Result<Option<SiteSetting>, AppError> {
        sqlx::query_as::<_, SiteSetting>("SELECT * FROM site_settings WHERE key = ?").bind(key).fetch_optional(&self.pool).await.map_err(AppError::Database)
    }

    async fn upsert(&self, setting: &SiteSetting) -> Result<SiteSetting, AppError> {
        sqlx::query_as::<_, SiteSetting>(
            "INSERT INTO site_settings (key, value, description, updated_at) VALUES (?, ?, ?, ?)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value, description = COALESCE(excluded.description, site_settings.description), updated_at = excluded.updated_at
             RETURNING *"
        )
            .bind(&setting.key).bind(&setting.value).bind(&setting.description).bind(setting.updated_at)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn delete(&self, key: &str) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM site_settings WHERE key = ?").bind(key).execute(&self.pool).await.map_err(AppError::Database)?;
        if result.rows_affected() == 0 { return Err(AppError::NotFound("Setting not found".into())); }
        Ok(())
    }
}
