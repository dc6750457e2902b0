use crate::domain::{
    models::media::{AftercareSummary, MediaAsset},
    ports::MediaRepository,
};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::SqlitePool;

pub struct SqliteMediaRepo {
    pool: SqlitePool,
}

impl SqliteMediaRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MediaRepository for SqliteMediaRepo {
    async fn add(&self, asset: &MediaAsset) -> Result<MediaAsset, AppError> {
        sqlx::query_as::<_, MediaAsset>(
            "INSERT INTO booking_media (id, booking_id, kind, uploaded_by, url, created_at)
             VALUES (?, ?, ?, ?, ?, ?)
             RETURNING *"
        )
            .bind(&asset.id).bind(&asset.booking_id).bind(asset.kind)
            .bind(&asset.uploaded_by).bind(&asset.url).bind(asset.created_at)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn upsert_aftercare(&self, summary: &AftercareSummary) -> Result<AftercareSummary, AppError> {
        sqlx::query_as::<_, AftercareSummary>(
            "INSERT INTO aftercare_summaries (booking_id, instructions, products_json, created_at)
             VALUES (?, ?, ?, ?)
             ON CONFLICT(booking_id) DO UPDATE SET
                instructions = excluded.instructions,
                products_json = excluded.products_json
             RETURNING *"
        )
            .bind(&summary.booking_id).bind(&summary.instructions)
            .bind(&summary.products_json).bind(summary.created_at)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)
    }
}
