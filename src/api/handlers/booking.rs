use axum::{extract::{Path, State}, response::IntoResponse, Json};
use chrono::{DateTime, Duration, Utc};
use std::sync::Arc;
use tracing::{info, warn};

use crate::api::dtos::requests::{CreateBookingRequest, RescheduleBookingRequest};
use crate::api::dtos::responses::BookingEnvelope;
use crate::api::extractors::auth::AuthActor;
use crate::domain::models::booking::{Booking, NewBookingParams};
use crate::domain::models::job::Job;
use crate::domain::services::{discount, timezone::resolve_zone_strict};
use crate::error::AppError;
use crate::state::AppState;

/// Enqueue the immediate notice plus a 24h reminder for a freshly
/// scheduled (or rescheduled) booking. Enqueue failures never fail the
/// booking -- they come back as warnings for the caller.
async fn schedule_notification_jobs(state: &AppState, booking: &Booking, notice: &str) -> Vec<String> {
    let mut warnings = Vec::new();

    let immediate = Job::new(notice, booking.id.clone(), Utc::now());
    if let Err(e) = state.job_repo.create(&immediate).await {
        warn!("Failed to enqueue {} for {}: {}", notice, booking.id, e);
        warnings.push(format!("{} notice could not be scheduled", notice));
    }

    let remind_at = booking.scheduled_for - Duration::hours(24);
    if remind_at > Utc::now() {
        let reminder = Job::new("REMINDER", booking.id.clone(), remind_at);
        if let Err(e) = state.job_repo.create(&reminder).await {
            warn!("Failed to enqueue reminder for {}: {}", booking.id, e);
            warnings.push("Reminder notice could not be scheduled".to_string());
        }
    }

    warnings
}

pub async fn create_booking(
    State(state): State<Arc<AppState>>,
    AuthActor(actor): AuthActor,
    Json(payload): Json<CreateBookingRequest>,
) -> Result<impl IntoResponse, AppError> {
    if !actor.is_client() {
        return Err(AppError::Forbidden("Only clients can create bookings".into()));
    }
    if payload.client_name.trim().is_empty() {
        return Err(AppError::Validation("client_name must not be empty".into()));
    }

    let hold = state.hold_repo.find_for_client(&payload.hold_id, &actor.id).await?
        .ok_or(AppError::NotFound("Hold not found".into()))?;

    if hold.is_expired(Utc::now()) {
        state.hold_repo.delete_for_client(&hold.id, &actor.id).await?;
        return Err(AppError::Conflict("Hold has expired".into()));
    }

    let offering = state.offering_repo.find_by_id(&hold.offering_id).await?
        .ok_or(AppError::Conflict("Offering is no longer available".into()))?;

    let location = state.location_repo.find_by_id(&hold.professional_id, &hold.location_id).await?
        .ok_or(AppError::Conflict("Location is no longer bookable".into()))?;

    let duration_min = offering.duration_for(hold.location_type);
    let buffer_min = offering.buffer_min.max(location.buffer_min);

    // The discount snapshot must be computed in the appointment's own
    // zone; guessing here would corrupt the agreed price.
    let tz = resolve_zone_strict([
        Some(hold.location_time_zone.as_str()),
        Some(location.timezone.as_str()),
    ])?;

    let settings = state.last_minute_repo.settings(&hold.professional_id).await?;
    let service_floor = state.last_minute_repo
        .service_floor(&hold.professional_id, &hold.service_id)
        .await?;
    let blocks = state.last_minute_repo
        .blocks_covering(&hold.professional_id, hold.scheduled_for)
        .await?;

    let quote = discount::compute(
        settings.as_ref(),
        service_floor,
        &blocks,
        hold.scheduled_for,
        offering.base_price,
        tz,
        Utc::now(),
    );

    let booking = Booking::new(NewBookingParams {
        professional_id: hold.professional_id.clone(),
        client_id: actor.id.clone(),
        service_id: hold.service_id.clone(),
        offering_id: offering.id.clone(),
        scheduled_for: hold.scheduled_for,
        total_duration_min: duration_min,
        buffer_min,
        location_id: location.id.clone(),
        location_type: hold.location_type,
        address: location.address.clone(),
        location_time_zone: hold.location_time_zone.clone(),
        client_name: payload.client_name,
        client_phone: payload.client_phone,
        subtotal: offering.base_price,
        discount_pct: quote.pct,
        discount_amount: quote.amount,
    });

    let mut uow = state.tx_manager.begin().await?;

    // Re-verify the hold inside the transaction; a parallel request from
    // the same client may have consumed it already.
    let live_hold = uow.hold_for_update(&hold.id, &actor.id).await?
        .ok_or(AppError::Conflict("Hold was already consumed".into()))?;
    if live_hold.is_expired(Utc::now()) {
        return Err(AppError::Conflict("Hold has expired".into()));
    }

    let overlaps = uow.count_overlapping_bookings(
        &booking.professional_id,
        booking.scheduled_for,
        booking.ends_at,
        None,
    ).await?;
    if overlaps > 0 {
        return Err(AppError::Conflict("Selected time slot is no longer available".into()));
    }

    // The partial unique index on live (professional_id, scheduled_for)
    // turns any race that slipped past the count into a 409.
    uow.insert_booking(&booking).await?;
    uow.delete_hold(&hold.id).await?;
    uow.commit().await?;

    info!("Booking confirmed: {} for professional {}", booking.id, booking.professional_id);

    let warnings = schedule_notification_jobs(&state, &booking, "CONFIRMATION").await;
    Ok(Json(BookingEnvelope { booking, warnings }))
}

pub async fn get_booking(
    State(state): State<Arc<AppState>>,
    AuthActor(actor): AuthActor,
    Path(booking_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let booking = state.booking_repo.find_by_id(&booking_id).await?
        .ok_or(AppError::NotFound("Booking not found".into()))?;

    if actor.id != booking.client_id && actor.id != booking.professional_id {
        return Err(AppError::NotFound("Booking not found".into()));
    }

    Ok(Json(booking))
}

pub async fn reschedule_booking(
    State(state): State<Arc<AppState>>,
    AuthActor(actor): AuthActor,
    Path(booking_id): Path<String>,
    Json(payload): Json<RescheduleBookingRequest>,
) -> Result<impl IntoResponse, AppError> {
    if !actor.is_client() {
        return Err(AppError::Forbidden("Only the client can reschedule a booking".into()));
    }

    let requested_start = DateTime::parse_from_rfc3339(&payload.scheduled_for)
        .map_err(|_| AppError::Validation("scheduled_for must be an RFC3339 instant".into()))?
        .with_timezone(&Utc);

    let mut uow = state.tx_manager.begin().await?;

    let mut booking = uow.booking_for_update(&booking_id).await?
        .ok_or(AppError::NotFound("Booking not found".into()))?;
    if booking.client_id != actor.id {
        return Err(AppError::NotFound("Booking not found".into()));
    }
    if booking.status.is_terminal() {
        return Err(AppError::Conflict("Booking is closed".into()));
    }
    if booking.started_at.is_some() || booking.finished_at.is_some() {
        return Err(AppError::Conflict("A session already underway cannot be moved".into()));
    }

    let hold = uow.hold_for_update(&payload.hold_id, &actor.id).await?
        .ok_or(AppError::NotFound("Hold not found".into()))?;

    if hold.is_expired(Utc::now()) {
        // Lazy expiry cleanup happens outside the aborted transaction.
        drop(uow);
        state.hold_repo.delete_for_client(&hold.id, &actor.id).await?;
        return Err(AppError::Conflict("Hold has expired".into()));
    }
    if hold.professional_id != booking.professional_id {
        return Err(AppError::Conflict("Hold is for a different professional".into()));
    }
    if hold.location_type != payload.location_type {
        return Err(AppError::Conflict("Hold is for a different location mode".into()));
    }
    if hold.scheduled_for != requested_start {
        return Err(AppError::Conflict("Hold does not match the requested time".into()));
    }
    if hold.offering_id != booking.offering_id {
        return Err(AppError::Conflict("Hold is for a different offering".into()));
    }

    let offering = state.offering_repo.find_by_id(&booking.offering_id).await?
        .ok_or(AppError::Conflict("Offering is no longer available".into()))?;
    let location = state.location_repo.find_by_id(&hold.professional_id, &hold.location_id).await?
        .ok_or(AppError::Conflict("Location is no longer bookable".into()))?;

    let duration_min = offering.duration_for(hold.location_type);

    let overlaps = uow.count_overlapping_bookings(
        &booking.professional_id,
        requested_start,
        requested_start + Duration::minutes(duration_min),
        Some(&booking.id),
    ).await?;
    if overlaps > 0 {
        return Err(AppError::Conflict("New slot is not available".into()));
    }

    booking.scheduled_for = requested_start;
    booking.total_duration_min = duration_min;
    booking.buffer_min = offering.buffer_min.max(location.buffer_min);
    booking.location_id = location.id.clone();
    booking.location_type = hold.location_type;
    booking.address = location.address.clone();
    booking.location_time_zone = hold.location_time_zone.clone();
    booking.sync_ends_at();

    uow.update_booking(&booking).await?;
    uow.delete_hold(&hold.id).await?;
    uow.commit().await?;

    info!("Rescheduled booking {} to {}", booking.id, booking.scheduled_for);

    let mut warnings = Vec::new();
    if let Err(e) = state.job_repo.cancel_jobs_for_booking(&booking.id).await {
        warn!("Failed to cancel stale jobs for {}: {}", booking.id, e);
        warnings.push("Stale reminders could not be cancelled".to_string());
    }
    warnings.extend(schedule_notification_jobs(&state, &booking, "RESCHEDULE").await);

    Ok(Json(BookingEnvelope { booking, warnings }))
}
