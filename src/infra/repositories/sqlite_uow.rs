use crate::domain::models::{
    booking::Booking,
    consultation::ConsultationApproval,
    hold::Hold,
    media::MediaKind,
};
use crate::domain::ports::{TransactionManager, UnitOfWork};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{Row, Sqlite, SqlitePool, Transaction};

pub struct SqliteTransactionManager {
    pool: SqlitePool,
}

impl SqliteTransactionManager {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TransactionManager for SqliteTransactionManager {
    async fn begin(&self) -> Result<Box<dyn UnitOfWork>, AppError> {
        let tx = self.pool.begin().await.map_err(AppError::Database)?;
        Ok(Box::new(SqliteUnitOfWork { tx }))
    }
}

/// One open SQLite transaction. Dropped without `commit` it rolls back,
/// which is how every failed guard path aborts with zero writes.
pub struct SqliteUnitOfWork {
    tx: Transaction<'static, Sqlite>,
}

#[async_trait]
impl UnitOfWork for SqliteUnitOfWork {
    async fn booking_for_update(&mut self, id: &str) -> Result<Option<Booking>, AppError> {
        sqlx::query_as::<_, Booking>("SELECT * FROM bookings WHERE id = ?")
            .bind(id)
            .fetch_optional(&mut *self.tx)
            .await
            .map_err(AppError::Database)
    }

    async fn hold_for_update(&mut self, id: &str, client_id: &str) -> Result<Option<Hold>, AppError> {
        sqlx::query_as::<_, Hold>("SELECT * FROM holds WHERE id = ? AND client_id = ?")
            .bind(id)
            .bind(client_id)
            .fetch_optional(&mut *self.tx)
            .await
            .map_err(AppError::Database)
    }

    async fn approval_for_booking(&mut self, booking_id: &str) -> Result<Option<ConsultationApproval>, AppError> {
        sqlx::query_as::<_, ConsultationApproval>(
            "SELECT * FROM consultation_approvals WHERE booking_id = ?"
        )
            .bind(booking_id)
            .fetch_optional(&mut *self.tx)
            .await
            .map_err(AppError::Database)
    }

    async fn insert_booking(&mut self, booking: &Booking) -> Result<(), AppError> {
        sqlx::query(
            "INSERT INTO bookings (id, professional_id, client_id, service_id, offering_id, scheduled_for, total_duration_min, buffer_min, ends_at, location_id, location_type, address, location_time_zone, client_name, client_phone, subtotal, discount_pct, discount_amount, total_amount, status, session_step, started_at, finished_at, created_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)"
        )
            .bind(&booking.id).bind(&booking.professional_id).bind(&booking.client_id)
            .bind(&booking.service_id).bind(&booking.offering_id)
            .bind(booking.scheduled_for).bind(booking.total_duration_min).bind(booking.buffer_min)
            .bind(booking.ends_at).bind(&booking.location_id).bind(booking.location_type)
            .bind(&booking.address).bind(&booking.location_time_zone)
            .bind(&booking.client_name).bind(&booking.client_phone)
            .bind(booking.subtotal).bind(booking.discount_pct).bind(booking.discount_amount)
            .bind(booking.total_amount).bind(booking.status).bind(booking.session_step)
            .bind(booking.started_at).bind(booking.finished_at).bind(booking.created_at)
            .execute(&mut *self.tx)
            .await
            .map_err(AppError::Database)?;
        Ok(())
    }

    async fn update_booking(&mut self, booking: &Booking) -> Result<(), AppError> {
        let result = sqlx::query(
            "UPDATE bookings SET scheduled_for = ?, total_duration_min = ?, buffer_min = ?, ends_at = ?, location_id = ?, location_type = ?, address = ?, location_time_zone = ?, subtotal = ?, discount_pct = ?, discount_amount = ?, total_amount = ?, status = ?, session_step = ?, started_at = ?, finished_at = ?
             WHERE id = ?"
        )
            .bind(booking.scheduled_for).bind(booking.total_duration_min).bind(booking.buffer_min)
            .bind(booking.ends_at).bind(&booking.location_id).bind(booking.location_type)
            .bind(&booking.address).bind(&booking.location_time_zone)
            .bind(booking.subtotal).bind(booking.discount_pct).bind(booking.discount_amount)
            .bind(booking.total_amount).bind(booking.status).bind(booking.session_step)
            .bind(booking.started_at).bind(booking.finished_at)
            .bind(&booking.id)
            .execute(&mut *self.tx)
            .await
            .map_err(AppError::Database)?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Booking not found".into()));
        }
        Ok(())
    }

    async fn upsert_approval(&mut self, approval: &ConsultationApproval) -> Result<(), AppError> {
        sqlx::query(
            "INSERT INTO consultation_approvals (id, booking_id, status, proposed_services_json, proposed_total, approved_at, rejected_at, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
             ON CONFLICT(booking_id) DO UPDATE SET
                status = excluded.status,
                proposed_services_json = excluded.proposed_services_json,
                proposed_total = excluded.proposed_total,
                approved_at = excluded.approved_at,
                rejected_at = excluded.rejected_at,
                updated_at = excluded.updated_at"
        )
            .bind(&approval.id).bind(&approval.booking_id).bind(approval.status)
            .bind(&approval.proposed_services_json).bind(approval.proposed_total)
            .bind(approval.approved_at).bind(approval.rejected_at)
            .bind(approval.created_at).bind(approval.updated_at)
            .execute(&mut *self.tx)
            .await
            .map_err(AppError::Database)?;
        Ok(())
    }

    async fn delete_hold(&mut self, id: &str) -> Result<(), AppError> {
        sqlx::query("DELETE FROM holds WHERE id = ?")
            .bind(id)
            .execute(&mut *self.tx)
            .await
            .map_err(AppError::Database)?;
        Ok(())
    }

    async fn count_overlapping_bookings(
        &mut self,
        professional_id: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        exclude_booking: Option<&str>,
    ) -> Result<i64, AppError> {
        let row = sqlx::query(
            "SELECT COUNT(*) as count FROM bookings
             WHERE professional_id = ? AND scheduled_for < ? AND ends_at > ?
               AND status != 'CANCELLED' AND id != ?"
        )
            .bind(professional_id)
            .bind(end)
            .bind(start)
            .bind(exclude_booking.unwrap_or(""))
            .fetch_one(&mut *self.tx)
            .await
            .map_err(AppError::Database)?;
        Ok(row.get::<i64, _>("count"))
    }

    async fn media_count(&mut self, booking_id: &str, kind: MediaKind) -> Result<i64, AppError> {
        let row = sqlx::query("SELECT COUNT(*) as count FROM booking_media WHERE booking_id = ? AND kind = ?")
            .bind(booking_id)
            .bind(kind)
            .fetch_one(&mut *self.tx)
            .await
            .map_err(AppError::Database)?;
        Ok(row.get::<i64, _>("count"))
    }

    async fn has_aftercare(&mut self, booking_id: &str) -> Result<bool, AppError> {
        let row = sqlx::query("SELECT COUNT(*) as count FROM aftercare_summaries WHERE booking_id = ?")
            .bind(booking_id)
            .fetch_one(&mut *self.tx)
            .await
            .map_err(AppError::Database)?;
        Ok(row.get::<i64, _>("count") > 0)
    }

    async fn commit(self: Box<Self>) -> Result<(), AppError> {
        self.tx.commit().await.map_err(AppError::Database)
    }
}
