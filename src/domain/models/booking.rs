use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::domain::models::location::LocationType;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[sqlx(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BookingStatus {
    Pending,
    Accepted,
    Completed,
    Cancelled,
}

impl BookingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Pending => "PENDING",
            BookingStatus::Accepted => "ACCEPTED",
            BookingStatus::Completed => "COMPLETED",
            BookingStatus::Cancelled => "CANCELLED",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, BookingStatus::Completed | BookingStatus::Cancelled)
    }
}

/// The in-person workflow sub-state of an active booking, distinct from
/// the overall status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[sqlx(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SessionStep {
    None,
    Consultation,
    ConsultationPendingClient,
    BeforePhotos,
    ServiceInProgress,
    FinishReview,
    AfterPhotos,
    Done,
}

impl SessionStep {
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionStep::None => "NONE",
            SessionStep::Consultation => "CONSULTATION",
            SessionStep::ConsultationPendingClient => "CONSULTATION_PENDING_CLIENT",
            SessionStep::BeforePhotos => "BEFORE_PHOTOS",
            SessionStep::ServiceInProgress => "SERVICE_IN_PROGRESS",
            SessionStep::FinishReview => "FINISH_REVIEW",
            SessionStep::AfterPhotos => "AFTER_PHOTOS",
            SessionStep::Done => "DONE",
        }
    }
}

/// The canonical appointment record. Location and pricing fields are
/// snapshots taken when the appointment was agreed; later catalog edits by
/// the professional never reach back into them. Rows are never deleted --
/// cancellation is a status.
#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Booking {
    pub id: String,
    pub professional_id: String,
    pub client_id: String,
    pub service_id: String,
    pub offering_id: String,
    pub scheduled_for: DateTime<Utc>,
    pub total_duration_min: i64,
    pub buffer_min: i64,
    pub ends_at: DateTime<Utc>,
    pub location_id: String,
    pub location_type: LocationType,
    pub address: String,
    pub location_time_zone: String,
    pub client_name: String,
    pub client_phone: Option<String>,
    pub subtotal: i64,
    pub discount_pct: i64,
    pub discount_amount: i64,
    pub total_amount: i64,
    pub status: BookingStatus,
    pub session_step: SessionStep,
    pub started_at: Option<DateTime<Utc>>,
    pub finished_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

pub struct NewBookingParams {
    pub professional_id: String,
    pub client_id: String,
    pub service_id: String,
    pub offering_id: String,
    pub scheduled_for: DateTime<Utc>,
    pub total_duration_min: i64,
    pub buffer_min: i64,
    pub location_id: String,
    pub location_type: LocationType,
    pub address: String,
    pub location_time_zone: String,
    pub client_name: String,
    pub client_phone: Option<String>,
    pub subtotal: i64,
    pub discount_pct: i64,
    pub discount_amount: i64,
}

impl Booking {
    pub fn new(params: NewBookingParams) -> Self {
        let ends_at = params.scheduled_for
            + Duration::minutes(params.total_duration_min + params.buffer_min);

        Self {
            id: Uuid::new_v4().to_string(),
            professional_id: params.professional_id,
            client_id: params.client_id,
            service_id: params.service_id,
            offering_id: params.offering_id,
            scheduled_for: params.scheduled_for,
            total_duration_min: params.total_duration_min,
            buffer_min: params.buffer_min,
            ends_at,
            location_id: params.location_id,
            location_type: params.location_type,
            address: params.address,
            location_time_zone: params.location_time_zone,
            client_name: params.client_name,
            client_phone: params.client_phone,
            subtotal: params.subtotal,
            discount_pct: params.discount_pct,
            discount_amount: params.discount_amount,
            total_amount: params.subtotal - params.discount_amount,
            status: BookingStatus::Pending,
            session_step: SessionStep::None,
            started_at: None,
            finished_at: None,
            created_at: Utc::now(),
        }
    }

    /// Recompute the derived end instant after schedule or duration edits.
    pub fn sync_ends_at(&mut self) {
        self.ends_at =
            self.scheduled_for + Duration::minutes(self.total_duration_min + self.buffer_min);
    }
}
