use crate::domain::{models::room::Room, ports::RoomRepository};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::PgPool;

pub struct PostgresRoomRepo {
    pool: PgPool,
}

impl PostgresRoomRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RoomRepository for PostgresRoomRepo {
    async fn create(&self, room: &Room) -> Result<Room, AppError> {
        sqlx::query_as::<_, Room>(
            "INSERT INTO rooms (id, slug, name, description, price, area, capacity, bed_type, features, images, status, sort_order, created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
             RETURNING *"
        )
            .bind(&room.id).bind(&room.slug).bind(&room.name).bind(&room.description)
            .bind(&room.price).bind(&room.area).bind(room.capacity).bind(&room.bed_type)
            .bind(&room.features).bind(&room.images).bind(&room.status).bind(room.sort_order)
            .bind(room.created_at).bind(room.updated_at)
            .fetch_one(&self.pool).await.map_err(AppError::Database)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Room>, AppError> {
        sqlx::query_as::<_, Room>("SELECT * FROM rooms WHERE id = $1").bind(id).fetch_optional(&self.pool).await.map_err(AppError::Database)
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<Room>, AppError> {
        sqlx::query_as::<_, Room>("SELECT * FROM rooms WHERE slug = $1").bind(slug).fetch_optional(&self.pool).await.map_err(AppError::Database)
    }

    async fn list(&self, active_only: bool) -> Result<Vec<Room>, AppError> {
        sqlx::query_as::<_, Room>(
            "SELECT * FROM rooms WHERE (NOT $1 OR status = 'ACTIVE') ORDER BY sort_order ASC, created_at ASC"
        )
            .bind(active_only)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn update(&self, room: &Room) -> Result<Room, AppError> {
        sqlx::query_as::<_, Room>(
            "UPDATE rooms SET slug=$1, name=$2, description=$3, price=$4, area=$5, capacity=$6, bed_type=$7, features=$8, images=$9, status=$10, sort_order=$11, updated_at=$12
             WHERE id=$13
             RETURNING *"
        )
            .bind(&room.slug).bind(&room.name).bind(&room.description).bind(&room.price)
            .bind(&room.area).bind(room.capacity).bind(&room.bed_type).bind(&room.features)
            .bind(&room.images).bind(&room.status).bind(room.sort_order).bind(room.updated_at)
            .bind(&room.id)
            .fetch_optional(&self.pool).await.map_err(AppError::Database)?
            .ok_or(AppError::NotFound("Room not found".into()))
    }

    async fn delete(&self, id: &str) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM rooms WHERE id = $1").bind(id).execute(&self.pool).await.map_err(AppError::Database)?;
        if result.rows_affected() == 0 { return Err(AppError::NotFound("Room not found".into())); }
        Ok(())
    }
}
