use crate::domain::{models::service_zone::ServiceZone, ports::ServiceZoneRepository};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::PgPool;

pub struct PostgresServiceZoneRepo {
    pool: PgPool,
}

impl PostgresServiceZoneRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ServiceZoneRepository for PostgresServiceZoneRepo {
    async fn create(&self, zone: &ServiceZone) -> Result<ServiceZone, AppError> {
        sqlx::query_as::<_, ServiceZone>(
            "INSERT INTO service_zones (id, slug, name, description, features, images, sort_order, status, created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
             RETURNING *"
        )
            .bind(&zone.id).bind(&zone.slug).bind(&zone.name).bind(&zone.description)
            .bind(&zone.features).bind(&zone.images).bind(zone.sort_order).bind(&zone.status)
            .bind(zone.created_at).bind(zone.updated_at)
            .fetch_one(&self.pool).await.map_err(AppError::Database)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<ServiceZone>, AppError> {
        sqlx::query_as::<_, ServiceZone>("SELECT * FROM service_zones WHERE id = $1").bind(id).fetch_optional(&self.pool).await.map_err(AppError::Database)
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<ServiceZone>, AppError> {
        sqlx::query_as::<_, ServiceZone>("SELECT * FROM service_zones WHERE slug = $1").bind(slug).fetch_optional(&self.pool).await.map_err(AppError::Database)
    }

    async fn list(&self, active_only: bool) -> Result<Vec<ServiceZone>, AppError> {
        sqlx::query_as::<_, ServiceZone>("SELECT * FROM service_zones WHERE (NOT $1 OR status = 'ACTIVE') ORDER BY sort_order ASC, name ASC")
            .bind(active_only)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn update(&self, zone: &ServiceZone) -> Result<ServiceZone, AppError> {
        sqlx::query_as::<_, ServiceZone>(
            "UPDATE service_zones SET slug=$1, name=$2, description=$3, features=$4, images=$5, sort_order=$6, status=$7, updated_at=$8
             WHERE id=$9
             RETURNING *"
        )
            .bind(&zone.slug).bind(&zone.name).bind(&zone.description).bind(&zone.features)
            .bind(&zone.images).bind(zone.sort_order).bind(&zone.status).bind(zone.updated_at)
            .bind(&zone.id)
            .fetch_optional(&self.pool).await.map_err(AppError::Database)?
            .ok_or(AppError::NotFound("Service zone not found".into()))
    }

    async fn delete(&self, id: &str) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM service_zones WHERE id = $1").bind(id).execute(&self.pool).await.map_err(AppError::Database)?;
        if result.rows_affected() == 0 { return Err(AppError::NotFound("Service zone not found".into())); }
        Ok(())
    }
}
