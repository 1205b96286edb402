use crate::domain::{models::booking::{Booking, BookingFilter}, ports::BookingRepository};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::{Executor, Postgres, PgPool};
use chrono::NaiveDate;

const OVERLAP_SQL: &str = "SELECT COUNT(*) FROM bookings
    WHERE room_id = $1 AND id != $2 AND status IN ('PENDING', 'CONFIRMED')
    AND ((check_in_date <= $3 AND check_out_date > $4)
      OR (check_in_date < $5 AND check_out_date >= $6)
      OR (check_in_date >= $7 AND check_out_date <= $8))";

// Row lock on the room: concurrent booking transactions for the same room
// wait here until the holder commits or rolls back.
const LOCK_ROOM_SQL: &str = "UPDATE rooms SET updated_at = updated_at WHERE id = $1";

pub struct PostgresBookingRepo {
    pool: PgPool,
}

impl PostgresBookingRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

async fn count_overlap<'e, E>(executor: E, room_id: &str, check_in: NaiveDate, check_out: NaiveDate, exclude_id: &str) -> Result<i64, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query_scalar::<_, i64>(OVERLAP_SQL)
        .bind(room_id).bind(exclude_id)
        .bind(check_in).bind(check_in)
        .bind(check_out).bind(check_out)
        .bind(check_in).bind(check_out)
        .fetch_one(executor)
        .await
}

fn holds_room(booking: &Booking) -> Result<bool, AppError> {
    Ok(booking.status()?.is_active())
}

#[async_trait]
impl BookingRepository for PostgresBookingRepo {
    async fn create_if_available(&self, booking: &Booking) -> Result<Booking, AppError> {
        let mut tx = self.pool.begin().await.map_err(AppError::Database)?;

        let locked = sqlx::query(LOCK_ROOM_SQL).bind(&booking.room_id).execute(&mut *tx).await.map_err(AppError::Database)?;
        if locked.rows_affected() == 0 { return Err(AppError::NotFound("Room not found".into())); }

        if holds_room(booking)? {
            let overlapping = count_overlap(&mut *tx, &booking.room_id, booking.check_in_date, booking.check_out_date, &booking.id).await.map_err(AppError::Database)?;
            if overlapping > 0 {
                return Err(AppError::Conflict("Room is already booked for the selected dates".into()));
            }
        }

        let created = sqlx::query_as::<_, Booking>(
            "INSERT INTO bookings (id, room_id, customer_name, customer_email, customer_phone, check_in_date, check_out_date, number_of_guests, room_price, total_amount, status, special_requests, created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
             RETURNING *"
        )
            .bind(&booking.id).bind(&booking.room_id).bind(&booking.customer_name).bind(&booking.customer_email)
            .bind(&booking.customer_phone).bind(booking.check_in_date).bind(booking.check_out_date).bind(booking.number_of_guests)
            .bind(booking.room_price).bind(booking.total_amount).bind(&booking.status).bind(&booking.special_requests)
            .bind(booking.created_at).bind(booking.updated_at)
            .fetch_one(&mut *tx).await.map_err(AppError::Database)?;

        tx.commit().await.map_err(AppError::Database)?;
        Ok(created)
    }

    async fn update_if_available(&self, booking: &Booking) -> Result<Booking, AppError> {
        let mut tx = self.pool.begin().await.map_err(AppError::Database)?;

        let locked = sqlx::query(LOCK_ROOM_SQL).bind(&booking.room_id).execute(&mut *tx).await.map_err(AppError::Database)?;
        if locked.rows_affected() == 0 { return Err(AppError::NotFound("Room not found".into())); }

        if holds_room(booking)? {
            let overlapping = count_overlap(&mut *tx, &booking.room_id, booking.check_in_date, booking.check_out_date, &booking.id).await.map_err(AppError::Database)?;
            if overlapping > 0 {
                return Err(AppError::Conflict("Room is already booked for the selected dates".into()));
            }
        }

        let updated = sqlx::query_as::<_, Booking>(
            "UPDATE bookings SET room_id=$1, customer_name=$2, customer_email=$3, customer_phone=$4, check_in_date=$5, check_out_date=$6, number_of_guests=$7, room_price=$8, total_amount=$9, status=$10, special_requests=$11, updated_at=$12
             WHERE id=$13
             RETURNING *"
        )
            .bind(&booking.room_id).bind(&booking.customer_name).bind(&booking.customer_email).bind(&booking.customer_phone)
            .bind(booking.check_in_date).bind(booking.check_out_date).bind(booking.number_of_guests).bind(booking.room_price)
            .bind(booking.total_amount).bind(&booking.status).bind(&booking.special_requests).bind(booking.updated_at)
            .bind(&booking.id)
            .fetch_optional(&mut *tx).await.map_err(AppError::Database)?
            .ok_or(AppError::NotFound("Booking not found".into()))?;

        tx.commit().await.map_err(AppError::Database)?;
        Ok(updated)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Booking>, AppError> {
        sqlx::query_as::<_, Booking>("SELECT * FROM bookings WHERE id = $1").bind(id).fetch_optional(&self.pool).await.map_err(AppError::Database)
    }

    async fn list(&self, filter: &BookingFilter) -> Result<Vec<Booking>, AppError> {
        sqlx::query_as::<_, Booking>(
            "SELECT * FROM bookings
             WHERE ($1 IS NULL OR room_id = $2) AND ($3 IS NULL OR status = $4)
             ORDER BY check_in_date DESC, created_at DESC"
        )
            .bind(&filter.room_id).bind(&filter.room_id)
            .bind(filter.status.map(|s| s.as_str())).bind(filter.status.map(|s| s.as_str()))
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn delete(&self, id: &str) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM bookings WHERE id = $1").bind(id).execute(&self.pool).await.map_err(AppError::Database)?;
        if result.rows_affected() == 0 { return Err(AppError::NotFound("Booking not found".into())); }
        Ok(())
    }

    async fn count_by_room(&self, room_id: &str) -> Result<i64, AppError> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM bookings WHERE room_id = $1")
            .bind(room_id)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn has_overlap(&self, room_id: &str, check_in: NaiveDate, check_out: NaiveDate, exclude_id: Option<&str>) -> Result<bool, AppError> {
        let count = count_overlap(&self.pool, room_id, check_in, check_out, exclude_id.unwrap_or_default()).await.map_err(AppError::Database)?;
        Ok(count > 0)
    }
}
