use crate::domain::{models::consultation::ConsultationApproval, ports::ConsultationRepository};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::SqlitePool;

pub struct SqliteConsultationRepo {
    pool: SqlitePool,
}

impl SqliteConsultationRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ConsultationRepository for SqliteConsultationRepo {
    async fn upsert(&self, approval: &ConsultationApproval) -> Result<ConsultationApproval, AppError> {
        sqlx::query_as::<_, ConsultationApproval>(
            "INSERT INTO consultation_approvals (id, booking_id, status, proposed_services_json, proposed_total, approved_at, rejected_at, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
             ON CONFLICT(booking_id) DO UPDATE SET
                status = excluded.status,
                proposed_services_json = excluded.proposed_services_json,
                proposed_total = excluded.proposed_total,
                approved_at = excluded.approved_at,
                rejected_at = excluded.rejected_at,
                updated_at = excluded.updated_at
             RETURNING *"
        )
            .bind(&approval.id).bind(&approval.booking_id).bind(approval.status)
            .bind(&approval.proposed_services_json).bind(approval.proposed_total)
            .bind(approval.approved_at).bind(approval.rejected_at)
            .bind(approval.created_at).bind(approval.updated_at)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)
    }
}
