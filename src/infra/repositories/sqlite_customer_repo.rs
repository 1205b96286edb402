use crate::domain::{
    models::customer::{Customer, CustomerFilter, CustomerStatus, StatusCount},
    ports::CustomerRepository,
};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::SqlitePool;
use chrono::Utc;

const FILTER_SQL: &str = "(? IS NULL OR status = ?)
    AND (? IS NULL OR assigned_to = ?)
    AND (? IS NULL OR name LIKE ? OR phone LIKE ? OR email LIKE ?)";

pub struct SqliteCustomerRepo {
    pool: SqlitePool,
}

impl SqliteCustomerRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CustomerRepository for SqliteCustomerRepo {
    async fn create(&self, customer: &Customer) -> Result<Customer, AppError> {
        sqlx::query_as::<_, Customer>(
            "INSERT INTO customers (id, name, phone, email, province_code, province_name, ward_code, ward_name, source, status, assigned_to, notes, last_contact_date, next_follow_up_date, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
             RETURNING *"
        )
            .bind(&customer.id).bind(&customer.name).bind(&customer.phone).bind(&customer.email)
            .bind(&customer.province_code).bind(&customer.province_name).bind(&customer.ward_code).bind(&customer.ward_name)
            .bind(&customer.source).bind(&customer.status).bind(&customer.assigned_to).bind(&customer.notes)
            .bind(customer.last_contact_date).bind(customer.next_follow_up_date).bind(customer.created_at).bind(customer.updated_at)
            .fetch_one(&self.pool).await.map_err(AppError::Database)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Customer>, AppError> {
        sqlx::query_as::<_, Customer>("SELECT * FROM customers WHERE id = ?").bind(id).fetch_optional(&self.pool).await.map_err(AppError::Database)
    }

    async fn list(&self, filter: &CustomerFilter) -> Result<(Vec<Customer>, i64), AppError> {
        let status = filter.status.map(|s| s.as_str());
        let pattern = filter.search.as_ref().map(|s| format!("%{}%", s));

        let total = sqlx::query_scalar::<_, i64>(&format!("SELECT COUNT(*) FROM customers WHERE {}", FILTER_SQL))
            .bind(status).bind(status)
            .bind(&filter.assigned_to).bind(&filter.assigned_to)
            .bind(&pattern).bind(&pattern).bind(&pattern).bind(&pattern)
            .fetch_one(&self.pool).await.map_err(AppError::Database)?;

        let customers = sqlx::query_as::<_, Customer>(&format!("SELECT * FROM customers WHERE {} ORDER BY created_at DESC LIMIT ? OFFSET ?", FILTER_SQL))
            .bind(status).bind(status)
            .bind(&filter.assigned_to).bind(&filter.assigned_to)
            .bind(&pattern).bind(&pattern).bind(&pattern).bind(&pattern)
            .bind(filter.limit).bind(filter.offset)
            .fetch_all(&self.pool).await.map_err(AppError::Database)?;

        Ok((customers, total))
    }

    async fn update(&self, customer: &Customer) -> Result<Customer, AppError> {
        sqlx::query_as::<_, Customer>(
            "UPDATE customers SET name=?, phone=?, email=?, province_code=?, province_name=?, ward_code=?, ward_name=?, source=?, status=?, assigned_to=?, notes=?, last_contact_date=?, next_follow_up_date=?, updated_at=?
             WHERE id=?
             RETURNING *"
        )
            .bind(&customer.name).bind(&customer.phone).bind(&customer.email).bind(&customer.province_code)
            .bind(&customer.province_name).bind(&customer.ward_code).bind(&customer.ward_name).bind(&customer.source)
            .bind(&customer.status).bind(&customer.assigned_to).bind(&customer.notes).bind(customer.last_contact_date)
            .bind(customer.next_follow_up_date).bind(customer.updated_at)
            .bind(&customer.id)
            .fetch_optional(&self.pool).await.map_err(AppError::Database)?
            .ok_or(AppError::NotFound("Customer not found".into()))
    }

    async fn update_status(&self, id: &str, status: CustomerStatus) -> Result<Customer, AppError> {
        sqlx::query_as::<_, Customer>("UPDATE customers SET status = ?, updated_at = ? WHERE id = ? RETURNING *")
            .bind(status.as_str()).bind(Utc::now()).bind(id)
            .fetch_optional(&self.pool).await.map_err(AppError::Database)?
            .ok_or(AppError::NotFound("Customer not found".into()))
    }

    async fn assign(&self, id: &str, user_id: Option<&str>) -> Result<Customer, AppError> {
        sqlx::query_as::<_, Customer>("UPDATE customers SET assigned_to = ?, updated_at = ? WHERE id = ? RETURNING *")
            .bind(user_id).bind(Utc::now()).bind(id)
            .fetch_optional(&self.pool).await.map_err(AppError::Database)?
            .ok_or(AppError::NotFound("Customer not found".into()))
    }

    async fn delete(&self, id: &str) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM customers WHERE id = ?").bind(id).execute(&self.pool).await.map_err(AppError::Database)?;
        if result.rows_affected() == 0 { return Err(AppError::NotFound("Customer not found".into())); }
        Ok(())
    }

    async fn count_by_status(&self) -> Result<Vec<StatusCount>, AppError> {
        sqlx::query_as::<_, StatusCount>("SELECT status, COUNT(*) AS count FROM customers GROUP BY status ORDER BY status")
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }
}
