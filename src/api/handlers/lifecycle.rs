use axum::{extract::{Path, State}, response::IntoResponse, Json};
use chrono::Utc;
use std::sync::Arc;
use tracing::{info, warn};

use crate::api::dtos::requests::{SetSessionStepRequest, SetStatusRequest};
use crate::api::dtos::responses::BookingEnvelope;
use crate::api::extractors::auth::AuthActor;
use crate::domain::models::actor::Actor;
use crate::domain::models::booking::{Booking, BookingStatus, SessionStep};
use crate::domain::models::consultation::ApprovalStatus;
use crate::domain::models::job::Job;
use crate::domain::models::media::MediaKind;
use crate::domain::services::lifecycle::{
    status_transition_allowed, step_requires_approval, step_transition_allowed,
};
use crate::error::AppError;
use crate::state::AppState;

/// Visibility is fail-closed: a caller who is neither party learns
/// nothing beyond "not found".
fn require_visible(actor: &Actor, booking: &Booking) -> Result<(), AppError> {
    if actor.id != booking.client_id && actor.id != booking.professional_id {
        return Err(AppError::NotFound("Booking not found".into()));
    }
    Ok(())
}

fn require_owning_professional(actor: &Actor, booking: &Booking) -> Result<(), AppError> {
    require_visible(actor, booking)?;
    if !actor.is_professional() || actor.id != booking.professional_id {
        return Err(AppError::Forbidden("Only the professional can perform this action".into()));
    }
    Ok(())
}

/// Generic status setter. Completion and cancellation have their own
/// operations; the only transition this one performs is the
/// professional accepting a pending booking.
pub async fn set_status(
    State(state): State<Arc<AppState>>,
    AuthActor(actor): AuthActor,
    Path(booking_id): Path<String>,
    Json(payload): Json<SetStatusRequest>,
) -> Result<impl IntoResponse, AppError> {
    let mut uow = state.tx_manager.begin().await?;

    let mut booking = uow.booking_for_update(&booking_id).await?
        .ok_or(AppError::NotFound("Booking not found".into()))?;
    require_owning_professional(&actor, &booking)?;

    let next = payload.status;
    if next == booking.status {
        return Ok(Json(booking));
    }
    if !status_transition_allowed(booking.status, next) {
        return Err(AppError::Conflict(format!(
            "Cannot move booking from {} to {}",
            booking.status.as_str(),
            next.as_str()
        )));
    }
    if !(booking.status == BookingStatus::Pending && next == BookingStatus::Accepted) {
        return Err(AppError::Conflict(
            "Completion and cancellation go through their dedicated operations".into(),
        ));
    }

    booking.status = BookingStatus::Accepted;
    uow.update_booking(&booking).await?;
    uow.commit().await?;

    info!("Booking {} accepted by professional {}", booking.id, actor.id);
    Ok(Json(booking))
}

pub async fn cancel_booking(
    State(state): State<Arc<AppState>>,
    AuthActor(actor): AuthActor,
    Path(booking_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let mut uow = state.tx_manager.begin().await?;

    let mut booking = uow.booking_for_update(&booking_id).await?
        .ok_or(AppError::NotFound("Booking not found".into()))?;
    require_visible(&actor, &booking)?;

    if booking.status == BookingStatus::Cancelled {
        return Ok(Json(BookingEnvelope { booking, warnings: vec![] }));
    }
    if !status_transition_allowed(booking.status, BookingStatus::Cancelled) {
        return Err(AppError::Conflict("A completed booking cannot be cancelled".into()));
    }

    booking.status = BookingStatus::Cancelled;
    // A cancelled booking is never "finished".
    booking.finished_at = None;
    uow.update_booking(&booking).await?;
    uow.commit().await?;

    info!("Booking cancelled: {} by {}", booking.id, actor.id);

    let mut warnings = Vec::new();
    if let Err(e) = state.job_repo.cancel_jobs_for_booking(&booking.id).await {
        warn!("Failed to cancel pending jobs for {}: {}", booking.id, e);
        warnings.push("Pending reminders could not be cancelled".to_string());
    }
    let notice = Job::new("CANCELLATION", booking.id.clone(), Utc::now());
    if let Err(e) = state.job_repo.create(&notice).await {
        warn!("Failed to enqueue cancellation notice for {}: {}", booking.id, e);
        warnings.push("Cancellation notice could not be scheduled".to_string());
    }

    Ok(Json(BookingEnvelope { booking, warnings }))
}

pub async fn finish_booking(
    State(state): State<Arc<AppState>>,
    AuthActor(actor): AuthActor,
    Path(booking_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let mut uow = state.tx_manager.begin().await?;

    let mut booking = uow.booking_for_update(&booking_id).await?
        .ok_or(AppError::NotFound("Booking not found".into()))?;
    require_owning_professional(&actor, &booking)?;

    if booking.status == BookingStatus::Completed {
        return Ok(Json(booking));
    }
    if !status_transition_allowed(booking.status, BookingStatus::Completed) {
        return Err(AppError::Conflict(format!(
            "Cannot complete a {} booking",
            booking.status.as_str()
        )));
    }

    let now = Utc::now();
    booking.status = BookingStatus::Completed;
    booking.finished_at = Some(now);
    if booking.started_at.is_none() {
        booking.started_at = Some(now);
    }
    uow.update_booking(&booking).await?;
    uow.commit().await?;

    info!("Booking completed: {}", booking.id);
    Ok(Json(booking))
}

/// Advance (or rewind) the in-session workflow. All guards are evaluated
/// against rows re-read inside one transaction; guard violations leave
/// the booking on a known-good step and tell the caller which step that
/// is.
pub async fn set_session_step(
    State(state): State<Arc<AppState>>,
    AuthActor(actor): AuthActor,
    Path(booking_id): Path<String>,
    Json(payload): Json<SetSessionStepRequest>,
) -> Result<impl IntoResponse, AppError> {
    let requested = payload.step;
    let mut uow = state.tx_manager.begin().await?;

    let mut booking = uow.booking_for_update(&booking_id).await?
        .ok_or(AppError::NotFound("Booking not found".into()))?;
    require_owning_professional(&actor, &booking)?;

    if booking.status.is_terminal() {
        return Err(AppError::Conflict("Booking is closed".into()));
    }

    // A booking the client has not accepted yet can only sit in
    // consultation; any other request self-heals back to it instead of
    // leaving the row inconsistent.
    if booking.status == BookingStatus::Pending && requested != SessionStep::Consultation {
        booking.session_step = SessionStep::Consultation;
        uow.update_booking(&booking).await?;
        uow.commit().await?;
        return Err(AppError::StepConflict {
            message: "Booking is still pending; the session restarts at consultation".into(),
            forced_step: SessionStep::Consultation.as_str(),
            missing: vec![],
        });
    }

    if step_requires_approval(requested) {
        let approval = uow.approval_for_booking(&booking.id).await?;
        let approved = matches!(approval.map(|a| a.status), Some(ApprovalStatus::Approved));
        if !approved {
            booking.session_step = SessionStep::Consultation;
            uow.update_booking(&booking).await?;
            uow.commit().await?;
            return Err(AppError::StepConflict {
                message: "Client approval is required before this step".into(),
                forced_step: SessionStep::Consultation.as_str(),
                missing: vec!["consultation_approval".into()],
            });
        }
    }

    if !step_transition_allowed(booking.session_step, requested) {
        return Err(AppError::StepConflict {
            message: format!(
                "Cannot move session from {} to {}",
                booking.session_step.as_str(),
                requested.as_str()
            ),
            forced_step: booking.session_step.as_str(),
            missing: vec![],
        });
    }

    if requested == SessionStep::ServiceInProgress {
        if uow.media_count(&booking.id, MediaKind::Before).await? == 0 {
            return Err(AppError::StepConflict {
                message: "At least one before photo is required to start the service".into(),
                forced_step: booking.session_step.as_str(),
                missing: vec!["before_photo".into()],
            });
        }
        if booking.started_at.is_none() {
            booking.started_at = Some(Utc::now());
        }
    }

    if requested == SessionStep::Done {
        let mut missing = Vec::new();
        if uow.media_count(&booking.id, MediaKind::Before).await? == 0 {
            missing.push("before_photo".to_string());
        }
        if uow.media_count(&booking.id, MediaKind::After).await? == 0 {
            missing.push("after_photo".to_string());
        }
        if !uow.has_aftercare(&booking.id).await? {
            missing.push("aftercare_summary".to_string());
        }
        if !missing.is_empty() {
            booking.session_step = SessionStep::AfterPhotos;
            uow.update_booking(&booking).await?;
            uow.commit().await?;
            return Err(AppError::StepConflict {
                message: "Session cannot finish yet".into(),
                forced_step: SessionStep::AfterPhotos.as_str(),
                missing,
            });
        }
    }

    booking.session_step = requested;
    uow.update_booking(&booking).await?;
    uow.commit().await?;

    info!("Booking {} moved to session step {}", booking.id, requested.as_str());
    Ok(Json(booking))
}
