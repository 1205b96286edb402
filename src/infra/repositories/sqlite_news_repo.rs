use crate::domain::{models::news::{News, NewsFilter}, ports::NewsRepository};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::SqlitePool;

pub struct SqliteNewsRepo {
    pool: SqlitePool,
}

impl SqliteNewsRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl NewsRepository for SqliteNewsRepo {
    async fn create(&self, news: &News) -> Result<News, AppError> {
        sqlx::query_as::<_, News>(
            "INSERT INTO news (id, slug, title, content, excerpt, featured_image, meta_title, meta_description, meta_keywords, status, published_at, author_id, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
             RETURNING *"
        )
            .bind(&news.id).bind(&news.slug).bind(&news.title).bind(&news.content)
            .bind(&news.excerpt).bind(&news.featured_image).bind(&news.meta_title).bind(&news.meta_description)
            .bind(&news.meta_keywords).bind(&news.status).bind(news.published_at).bind(&news.author_id)
            .bind(news.created_at).bind(news.updated_at)
            .fetch_one(&self.pool).await.map_err(AppError::Database)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<News>, AppError> {
        sqlx::query_as::<_, News>("SELECT * FROM news WHERE id = ?").bind(id).fetch_optional(&self.pool).await.map_err(AppError::Database)
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<News>, AppError> {
        sqlx::query_as::<_, News>("SELECT * FROM news WHERE slug = ?").bind(slug).fetch_optional(&self.pool).await.map_err(AppError::Database)
    }

    async fn list(&self, filter: &NewsFilter) -> Result<(Vec<News>, i64), AppError> {
        let status = filter.status.map(|s| s.as_str());

        let total = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM news WHERE (? IS NULL OR status = ?)")
            .bind(status).bind(status)
            .fetch_one(&self.pool).await.map_err(AppError::Database)?;

        let items = sqlx::query_as::<_, News>(
            "SELECT * FROM news WHERE (? IS NULL OR status = ?)
             ORDER BY COALESCE(published_at, created_at) DESC
             LIMIT ? OFFSET ?"
        )
            .bind(status).bind(status).bind(filter.limit).bind(filter.offset)
            .fetch_all(&self.pool).await.map_err(AppError::Database)?;

        Ok((items, total))
    }

    async fn slugs_with_prefix(&self, base: &str) -> Result<Vec<String>, AppError> {
        sqlx::query_scalar::<_, String>("SELECT slug FROM news WHERE slug = ? OR slug LIKE ?")
            .bind(base)
            .bind(format!("{}-%", base))
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn published_slugs(&self, limit: i64) -> Result<Vec<String>, AppError> {
        sqlx::query_scalar::<_, String>("SELECT slug FROM news WHERE status = 'PUBLISHED' ORDER BY published_at DESC LIMIT ?")
            .bind(limit)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn update(&self, news: &News) -> Result<News, AppError> {
        sqlx::query_as::<_, News>(
            "UPDATE news SET slug=?, title=?, content=?, excerpt=?, featured_image=?, meta_title=?, meta_description=?, meta_keywords=?, status=?, published_at=?, updated_at=?
             WHERE id=?
             RETURNING *"
        )
            .bind(&news.slug).bind(&news.title).bind(&news.content).bind(&news.excerpt)
            .bind(&news.featured_image).bind(&news.meta_title).bind(&news.meta_description).bind(&news.meta_keywords)
            .bind(&news.status).bind(news.published_at).bind(news.updated_at)
            .bind(&news.id)
            .fetch_optional(&self.pool).await.map_err(AppError::Database)?
            .ok_or(AppError::NotFound("News not found".into()))
    }

    async fn delete(&self, id: &str) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM news WHERE id = ?").bind(id).execute(&self.pool).await.map_err(AppError::Database)?;
        if result.rows_affected() == 0 { return Err(AppError::NotFound("News not found".into())); }
        Ok(())
    }
}
