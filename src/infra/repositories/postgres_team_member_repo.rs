use crate::domain::{models::team_member::TeamMember, ports::TeamMemberRepository};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::PgPool;

pub struct PostgresTeamMemberRepo {
    pool: PgPool,
}

impl PostgresTeamMemberRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TeamMemberRepository for PostgresTeamMemberRepo {
    async fn create(&self, member: &TeamMember) -> Result<TeamMember, AppError> {
        sqlx::query_as::<_, TeamMember>(
            "INSERT INTO team_members (id, name, position, bio, image_url, sort_order, is_active, created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
             RETURNING *"
        )
            .bind(&member.id).bind(&member.name).bind(&member.position).bind(&member.bio)
            .bind(&member.image_url).bind(member.sort_order).bind(member.is_active)
            .bind(member.created_at).bind(member.updated_at)
            .fetch_one(&self.pool).await.map_err(AppError::Database)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<TeamMember>, AppError> {
        sqlx::query_as::<_, TeamMember>("SELECT * FROM team_members WHERE id = $1").bind(id).fetch_optional(&self.pool).await.map_err(AppError::Database)
    }

    async fn list(&self, active_only: bool) -> Result<Vec<TeamMember>, AppError> {
        sqlx::query_as::<_, TeamMember>("SELECT * FROM team_members WHERE (NOT $1 OR is_active) ORDER BY sort_order ASC, name ASC")
            .bind(active_only)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn update(&self, member: &TeamMember) -> Result<TeamMember, AppError> {
        sqlx::query_as::<_, TeamMember>(
            "UPDATE team_members SET name=$1, position=$2, bio=$3, image_url=$4, sort_order=$5, is_active=$6, updated_at=$7
             WHERE id=$8
             RETURNING *"
        )
            .bind(&member.name).bind(&member.position).bind(&member.bio).bind(&member.image_url)
            .bind(member.sort_order).bind(member.is_active).bind(member.updated_at)
            .bind(&member.id)
            .fetch_optional(&self.pool).await.map_err(AppError::Database)?
            .ok_or(AppError::NotFound("Team member not found".into()))
    }

    async fn delete(&self, id: &str) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM team_members WHERE id = $1").bind(id).execute(&self.pool).await.map_err(AppError::Database)?;
        if result.rows_affected() == 0 { return Err(AppError::NotFound("Team member not found".into())); }
        Ok(())
    }
}
