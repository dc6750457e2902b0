use crate::domain::models::{
    actor::Actor,
    booking::Booking,
    consultation::ConsultationApproval,
    discount::{LastMinuteBlock, LastMinuteSettings},
    hold::Hold,
    job::Job,
    location::{CalendarBlock, Location, LocationType},
    media::{AftercareSummary, MediaAsset, MediaKind},
    offering::Offering,
    professional::Professional,
};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

#[async_trait]
pub trait ProfessionalRepository: Send + Sync {
    async fn find_by_id(&self, id: &str) -> Result<Option<Professional>, AppError>;
}

#[async_trait]
pub trait OfferingRepository: Send + Sync {
    async fn find_by_id(&self, id: &str) -> Result<Option<Offering>, AppError>;
    async fn find_by_service(&self, professional_id: &str, service_id: &str) -> Result<Option<Offering>, AppError>;
}

#[async_trait]
pub trait LocationRepository: Send + Sync {
    async fn find_by_id(&self, professional_id: &str, id: &str) -> Result<Option<Location>, AppError>;
    async fn find_default(&self, professional_id: &str, location_type: LocationType) -> Result<Option<Location>, AppError>;
}

#[async_trait]
pub trait CalendarBlockRepository: Send + Sync {
    async fn list_overlapping(&self, professional_id: &str, start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Vec<CalendarBlock>, AppError>;
}

#[async_trait]
pub trait BookingRepository: Send + Sync {
    async fn find_by_id(&self, id: &str) -> Result<Option<Booking>, AppError>;
    /// Non-cancelled bookings for a professional whose occupied interval
    /// intersects [start, end).
    async fn list_in_range(&self, professional_id: &str, start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Vec<Booking>, AppError>;
}

#[async_trait]
pub trait HoldRepository: Send + Sync {
    async fn create(&self, hold: &Hold) -> Result<Hold, AppError>;
    /// Ownership-scoped read: a hold that exists but belongs to someone
    /// else is indistinguishable from no hold at all.
    async fn find_for_client(&self, id: &str, client_id: &str) -> Result<Option<Hold>, AppError>;
    /// Idempotent: deleting an already-gone hold succeeds.
    async fn delete_for_client(&self, id: &str, client_id: &str) -> Result<(), AppError>;
}

#[async_trait]
pub trait ConsultationRepository: Send + Sync {
    async fn upsert(&self, approval: &ConsultationApproval) -> Result<ConsultationApproval, AppError>;
}

#[async_trait]
pub trait LastMinuteRepository: Send + Sync {
    async fn settings(&self, professional_id: &str) -> Result<Option<LastMinuteSettings>, AppError>;
    async fn service_floor(&self, professional_id: &str, service_id: &str) -> Result<Option<i64>, AppError>;
    async fn blocks_covering(&self, professional_id: &str, at: DateTime<Utc>) -> Result<Vec<LastMinuteBlock>, AppError>;
}

/// Registration only; the session-step guards count assets through the
/// `UnitOfWork` so the checks share the transition's transaction.
#[async_trait]
pub trait MediaRepository: Send + Sync {
    async fn add(&self, asset: &MediaAsset) -> Result<MediaAsset, AppError>;
    async fn upsert_aftercare(&self, summary: &AftercareSummary) -> Result<AftercareSummary, AppError>;
}

#[async_trait]
pub trait JobRepository: Send + Sync {
    async fn create(&self, job: &Job) -> Result<(), AppError>;
    async fn find_pending(&self, limit: i32) -> Result<Vec<Job>, AppError>;
    async fn update_status(&self, id: &str, status: &str, error_message: Option<String>) -> Result<(), AppError>;
    async fn cancel_jobs_for_booking(&self, booking_id: &str) -> Result<(), AppError>;
}

/// External notification delivery (SMS/push). Rendering and transport
/// live behind the remote service; callers hand over a template name and
/// a context object.
#[async_trait]
pub trait NotifyService: Send + Sync {
    async fn send(&self, phone: &str, template: &str, context: &serde_json::Value) -> Result<(), AppError>;
}

/// External identity resolution: bearer token in, `Actor` out. The only
/// place authentication touches this crate.
#[async_trait]
pub trait IdentityService: Send + Sync {
    async fn resolve(&self, token: &str) -> Result<Option<Actor>, AppError>;
}

/// One in-flight database transaction. Functions that must participate
/// in an atomic multi-row mutation take this by reference, so "am I
/// inside a transaction" is a fact of the signature. Dropping without
/// `commit` rolls everything back; guard checks run against rows read
/// through the same transaction, not against earlier snapshots.
#[async_trait]
pub trait UnitOfWork: Send {
    async fn booking_for_update(&mut self, id: &str) -> Result<Option<Booking>, AppError>;
    async fn hold_for_update(&mut self, id: &str, client_id: &str) -> Result<Option<Hold>, AppError>;
    async fn approval_for_booking(&mut self, booking_id: &str) -> Result<Option<ConsultationApproval>, AppError>;
    async fn insert_booking(&mut self, booking: &Booking) -> Result<(), AppError>;
    async fn update_booking(&mut self, booking: &Booking) -> Result<(), AppError>;
    async fn upsert_approval(&mut self, approval: &ConsultationApproval) -> Result<(), AppError>;
    async fn delete_hold(&mut self, id: &str) -> Result<(), AppError>;
    async fn count_overlapping_bookings(
        &mut self,
        professional_id: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        exclude_booking: Option<&str>,
    ) -> Result<i64, AppError>;
    async fn media_count(&mut self, booking_id: &str, kind: MediaKind) -> Result<i64, AppError>;
    async fn has_aftercare(&mut self, booking_id: &str) -> Result<bool, AppError>;
    async fn commit(self: Box<Self>) -> Result<(), AppError>;
}

#[async_trait]
pub trait TransactionManager: Send + Sync {
    async fn begin(&self) -> Result<Box<dyn UnitOfWork>, AppError>;
}
