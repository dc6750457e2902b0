use crate::domain::{models::location::CalendarBlock, ports::CalendarBlockRepository};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

pub struct SqliteCalendarBlockRepo {
    pool: SqlitePool,
}

impl SqliteCalendarBlockRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CalendarBlockRepository for SqliteCalendarBlockRepo {
    async fn list_overlapping(&self, professional_id: &str, start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Vec<CalendarBlock>, AppError> {
        sqlx::query_as::<_, CalendarBlock>(
            "SELECT * FROM calendar_blocks WHERE professional_id = ? AND start_time < ? AND end_time > ?"
        )
            .bind(professional_id)
            .bind(end)
            .bind(start)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }
}
