use crate::domain::{models::location::{Location, LocationType}, ports::LocationRepository};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::SqlitePool;

pub struct SqliteLocationRepo {
    pool: SqlitePool,
}

impl SqliteLocationRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LocationRepository for SqliteLocationRepo {
    async fn find_by_id(&self, professional_id: &str, id: &str) -> Result<Option<Location>, AppError> {
        sqlx::query_as::<_, Location>(
            "SELECT * FROM locations WHERE professional_id = ? AND id = ? AND active = 1"
        )
            .bind(professional_id)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn find_default(&self, professional_id: &str, location_type: LocationType) -> Result<Option<Location>, AppError> {
        sqlx::query_as::<_, Location>(
            "SELECT * FROM locations WHERE professional_id = ? AND location_type = ? AND active = 1
             ORDER BY created_at ASC LIMIT 1"
        )
            .bind(professional_id)
            .bind(location_type)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }
}
