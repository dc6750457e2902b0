use crate::domain::{
    models::discount::{LastMinuteBlock, LastMinuteSettings},
    ports::LastMinuteRepository,
};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

pub struct SqliteLastMinuteRepo {
    pool: SqlitePool,
}

impl SqliteLastMinuteRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LastMinuteRepository for SqliteLastMinuteRepo {
    async fn settings(&self, professional_id: &str) -> Result<Option<LastMinuteSettings>, AppError> {
        sqlx::query_as::<_, LastMinuteSettings>(
            "SELECT * FROM last_minute_settings WHERE professional_id = ?"
        )
            .bind(professional_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn service_floor(&self, professional_id: &str, service_id: &str) -> Result<Option<i64>, AppError> {
        sqlx::query_scalar::<_, i64>(
            "SELECT min_price FROM last_minute_service_floors WHERE professional_id = ? AND service_id = ?"
        )
            .bind(professional_id)
            .bind(service_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn blocks_covering(&self, professional_id: &str, at: DateTime<Utc>) -> Result<Vec<LastMinuteBlock>, AppError> {
        sqlx::query_as::<_, LastMinuteBlock>(
            "SELECT * FROM last_minute_blocks WHERE professional_id = ? AND start_time <= ? AND end_time > ?"
        )
            .bind(professional_id)
            .bind(at)
            .bind(at)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }
}
