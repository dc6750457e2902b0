use crate::domain::{models::hold::Hold, ports::HoldRepository};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::SqlitePool;

pub struct SqliteHoldRepo {
    pool: SqlitePool,
}

impl SqliteHoldRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl HoldRepository for SqliteHoldRepo {
    async fn create(&self, hold: &Hold) -> Result<Hold, AppError> {
        sqlx::query_as::<_, Hold>(
            "INSERT INTO holds (id, client_id, professional_id, service_id, offering_id, location_id, location_type, scheduled_for, duration_min, location_time_zone, expires_at, created_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
             RETURNING *"
        )
            .bind(&hold.id).bind(&hold.client_id).bind(&hold.professional_id).bind(&hold.service_id)
            .bind(&hold.offering_id).bind(&hold.location_id).bind(hold.location_type)
            .bind(hold.scheduled_for).bind(hold.duration_min).bind(&hold.location_time_zone)
            .bind(hold.expires_at).bind(hold.created_at)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn find_for_client(&self, id: &str, client_id: &str) -> Result<Option<Hold>, AppError> {
        sqlx::query_as::<_, Hold>("SELECT * FROM holds WHERE id = ? AND client_id = ?")
            .bind(id)
            .bind(client_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn delete_for_client(&self, id: &str, client_id: &str) -> Result<(), AppError> {
        sqlx::query("DELETE FROM holds WHERE id = ? AND client_id = ?")
            .bind(id)
            .bind(client_id)
            .execute(&self.pool)
            .await
            .map_err(AppError::Database)?;
        Ok(())
    }
}
