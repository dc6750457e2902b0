use crate::domain::{models::offering::Offering, ports::OfferingRepository};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::SqlitePool;

pub struct SqliteOfferingRepo {
    pool: SqlitePool,
}

impl SqliteOfferingRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl OfferingRepository for SqliteOfferingRepo {
    async fn find_by_id(&self, id: &str) -> Result<Option<Offering>, AppError> {
        sqlx::query_as::<_, Offering>("SELECT * FROM offerings WHERE id = ? AND active = 1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn find_by_service(&self, professional_id: &str, service_id: &str) -> Result<Option<Offering>, AppError> {
        sqlx::query_as::<_, Offering>(
            "SELECT * FROM offerings WHERE professional_id = ? AND service_id = ? AND active = 1"
        )
            .bind(professional_id)
            .bind(service_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }
}
