use crate::domain::{models::news::{News, NewsFilter}, ports::NewsRepository};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::PgPool;

pub struct PostgresNewsRepo {
    pool: PgPool,
}

impl PostgresNewsRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl NewsRepository for PostgresNewsRepo {
    async fn create(&self, news: &News) -> Result<News, AppError> {
        sqlx::query_as::<_, News>(
            "INSERT INTO news (id, slug, title, content, excerpt, featured_image, meta_title, meta_description, meta_keywords, status, published_at, author_id, created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
             RETURNING *"
        )
            .bind(&news.id).bind(&news.slug).bind(&news.title).bind(&news.content)
            .bind(&news.excerpt).bind(&news.featured_image).bind(&news.meta_title).bind(&news.meta_description)
            .bind(&news.meta_keywords).bind(&news.status).bind(news.published_at).bind(&news.author_id)
            .bind(news.created_at).bind(news.updated_at)
            .fetch_one(&self.pool).await.map_err(AppError::Database)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<News>, AppError> {
        sqlx::query_as::<_, News>("SELECT * FROM news WHERE id = $1").bind(id).fetch_optional(&self.pool).await.map_err(AppError::Database)
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<News>, AppError> {
        sqlx::query_as::<_, News>("SELECT * FROM news WHERE slug = $1").bind(slug).fetch_optional(&self.pool).await.map_err(AppError::Database)
    }

    async fn list(&self, filter: &NewsFilter) -> Result<(Vec<News>, i64), AppError> {
        let status = filter.status.map(|s| s.as_str());

        let total = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM news WHERE ($1 IS NULL OR status = $2)")
            .bind(status).bind(status)
            .fetch_one(&self.pool).await.map_err(AppError::Database)?;

        let items = sqlx::query_as::<_, News>(
            "SELECT * FROM news WHERE ($1 IS NULL OR status = $2)
             ORDER BY COALESCE(published_at, created_at) DESC
             LIMIT $3 OFFSET $4"
        )
            .bind(status).bind(status).bind(filter.limit).bind(filter.offset)
            .fetch_all(&self.pool).await.map_err(AppError::Database)?;

        Ok((items, total))
    }

    async fn slugs_with_prefix(&self, base: &str) -> Result<Vec<String>, AppError> {
        sqlx::query_scalar::<_, String>("SELECT slug FROM news WHERE slug = $1 OR slug LIKE $2")
            .bind(base)
            .bind(format!("{}-%", base))
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn published_slugs(&self, limit: i64) -> Result<Vec<String>, AppError> {
        sqlx::query_scalar::<_, String>("SELECT slug FROM news WHERE status = 'PUBLISHED' ORDER BY published_at DESC LIMIT $1")
            .bind(limit)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn update(&self, news: &News) -> Result<News, AppError> {
        sqlx::query_as::<_, News>(
            "UPDATE news SET slug=$1, title=$2, content=$3, excerpt=$4, featured_image=$5, meta_title=$6, meta_description=$7, meta_keywords=$8, status=$9, published_at=$10, updated_at=$11
             WHERE id=$12
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
        let result = sqlx::query("DELETE FROM news WHERE id = $1").bind(id).execute(&self.pool).await.map_err(AppError::Database)?;
        if result.rows_affected() == 0 { return Err(AppError::NotFound("News not found".into())); }
        Ok(())
    }
}
