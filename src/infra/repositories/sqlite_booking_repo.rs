use crate::domain::{models::booking::{Booking, BookingFilter}, ports::BookingRepository};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::{Executor, Sqlite, SqlitePool};
use chrono::NaiveDate;

const OVERLAP_SQL: &str = "SELECT COUNT(*) FROM bookings
    WHERE room_id = ? AND id != ? AND status IN ('PENDING', 'CONFIRMED')
    AND ((check_in_date <= ? AND check_out_date > ?)
      OR (check_in_date < ? AND check_out_date >= ?)
      OR (check_in_date >= ? AND check_out_date <= ?))";

// Writing to the room row takes SQLite's write lock, so concurrent booking
// transactions for any room queue behind it until commit.
const LOCK_ROOM_SQL: &str = "UPDATE rooms SET updated_at = updated_at WHERE id = ?";

pub struct SqliteBookingRepo {
    pool: SqlitePool,
}

impl SqliteBookingRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

async fn count_overlap<'e, E>(executor: E, room_id: &str, check_in: NaiveDate, check_out: NaiveDate, exclude_id: &str) -> Result<i64, sqlx::Error>
where
    E: Executor<'e, Database = Sqlite>,
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
impl BookingRepository for SqliteBookingRepo {
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
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
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
            "UPDATE bookings SET room_id=?, customer_name=?, customer_email=?, customer_phone=?, check_in_date=?, check_out_date=?, number_of_guests=?, room_price=?, total_amount=?, status=?, special_requests=?, updated_at=?
             WHERE id=?
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
        sqlx::query_as::<_, Booking>("SELECT * FROM bookings WHERE id = ?").bind(id).fetch_optional(&self.pool).await.map_err(AppError::Database)
    }

    async fn list(&self, filter: &BookingFilter) -> Result<Vec<Booking>, AppError> {
        sqlx::query_as::<_, Booking>(
            "SELECT * FROM bookings
             WHERE (? IS NULL OR room_id = ?) AND (? IS NULL OR status = ?)
             ORDER BY check_in_date DESC, created_at DESC"
        )
            .bind(&filter.room_id).bind(&filter.room_id)
            .bind(filter.status.map(|s| s.as_str())).bind(filter.status.map(|s| s.as_str()))
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn delete(&self, id: &str) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM bookings WHERE id = ?").bind(id).execute(&self.pool).await.map_err(AppError::Database)?;
        if result.rows_affected() == 0 { return Err(AppError::NotFound("Booking not found".into())); }
        Ok(())
    }

    async fn count_by_room(&self, room_id: &str) -> Result<i64, AppError> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM bookings WHERE room_id = ?")
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
