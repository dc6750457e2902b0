use axum::{extract::{Path, State}, response::IntoResponse, Json};
use chrono::Utc;
use std::sync::Arc;
use tracing::info;

use crate::api::dtos::requests::ProposeConsultationRequest;
use crate::api::dtos::responses::ApprovalEnvelope;
use crate::api::extractors::auth::AuthActor;
use crate::domain::models::booking::{BookingStatus, SessionStep};
use crate::domain::models::consultation::{ApprovalStatus, ConsultationApproval};
use crate::error::AppError;
use crate::state::AppState;

fn in_consultation(step: SessionStep) -> bool {
    matches!(step, SessionStep::Consultation | SessionStep::ConsultationPendingClient)
}

/// The professional puts services and a total in front of the client.
/// Re-proposing resets the approval to PENDING with fresh content; the
/// previous answer is void.
pub async fn propose_consultation(
    State(state): State<Arc<AppState>>,
    AuthActor(actor): AuthActor,
    Path(booking_id): Path<String>,
    Json(payload): Json<ProposeConsultationRequest>,
) -> Result<impl IntoResponse, AppError> {
    if payload.proposed_total <= 0 {
        return Err(AppError::Validation("proposed_total must be positive".into()));
    }

    let booking = state.booking_repo.find_by_id(&booking_id).await?
        .ok_or(AppError::NotFound("Booking not found".into()))?;
    if actor.id != booking.client_id && actor.id != booking.professional_id {
        return Err(AppError::NotFound("Booking not found".into()));
    }
    if !actor.is_professional() || actor.id != booking.professional_id {
        return Err(AppError::Forbidden("Only the professional can propose services".into()));
    }
    if booking.status.is_terminal() {
        return Err(AppError::Conflict("Booking is closed".into()));
    }
    if !in_consultation(booking.session_step) {
        return Err(AppError::Conflict("Proposals can only be made during consultation".into()));
    }

    let services_json = serde_json::to_string(&payload.proposed_services)
        .map_err(|_| AppError::Validation("proposed_services must be valid JSON".into()))?;

    let approval = ConsultationApproval::new(booking.id.clone(), services_json, payload.proposed_total);
    let saved = state.consultation_repo.upsert(&approval).await?;

    info!("Consultation proposed for booking {}: total {}", booking.id, saved.proposed_total);
    Ok(Json(saved))
}

/// The single point where proposed pricing becomes contracted pricing.
/// Approval, the booking's price snapshot, the step advance, and the
/// PENDING->ACCEPTED promotion commit together or not at all.
pub async fn approve_consultation(
    State(state): State<Arc<AppState>>,
    AuthActor(actor): AuthActor,
    Path(booking_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let mut uow = state.tx_manager.begin().await?;

    let mut booking = uow.booking_for_update(&booking_id).await?
        .ok_or(AppError::NotFound("Booking not found".into()))?;
    if actor.id != booking.client_id && actor.id != booking.professional_id {
        return Err(AppError::NotFound("Booking not found".into()));
    }
    if !actor.is_client() || actor.id != booking.client_id {
        return Err(AppError::Forbidden("Only the client can approve a consultation".into()));
    }
    if booking.status.is_terminal() {
        return Err(AppError::Conflict("Booking is closed".into()));
    }
    if !in_consultation(booking.session_step) {
        return Err(AppError::Conflict("No consultation is awaiting approval".into()));
    }

    let mut approval = uow.approval_for_booking(&booking.id).await?
        .ok_or(AppError::Conflict("No consultation proposal to approve".into()))?;
    if approval.status != ApprovalStatus::Pending {
        return Err(AppError::Conflict("Proposal has already been resolved".into()));
    }
    if approval.proposed_total <= 0 {
        return Err(AppError::Validation("Proposed total must be positive".into()));
    }

    let now = Utc::now();
    approval.status = ApprovalStatus::Approved;
    approval.approved_at = Some(now);
    approval.rejected_at = None;
    approval.updated_at = now;

    booking.subtotal = approval.proposed_total;
    booking.total_amount = booking.subtotal - booking.discount_amount;
    booking.session_step = SessionStep::BeforePhotos;
    if booking.status == BookingStatus::Pending {
        booking.status = BookingStatus::Accepted;
    }

    uow.upsert_approval(&approval).await?;
    uow.update_booking(&booking).await?;
    uow.commit().await?;

    info!(
        "Consultation approved for booking {}: contracted total {}",
        booking.id, booking.total_amount
    );
    Ok(Json(ApprovalEnvelope { approval, booking }))
}

/// Rejection restarts the negotiation; it is not a refusal of the whole
/// appointment.
pub async fn reject_consultation(
    State(state): State<Arc<AppState>>,
    AuthActor(actor): AuthActor,
    Path(booking_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let mut uow = state.tx_manager.begin().await?;

    let mut booking = uow.booking_for_update(&booking_id).await?
        .ok_or(AppError::NotFound("Booking not found".into()))?;
    if actor.id != booking.client_id && actor.id != booking.professional_id {
        return Err(AppError::NotFound("Booking not found".into()));
    }
    if !actor.is_client() || actor.id != booking.client_id {
        return Err(AppError::Forbidden("Only the client can reject a consultation".into()));
    }
    if booking.status.is_terminal() {
        return Err(AppError::Conflict("Booking is closed".into()));
    }

    let mut approval = uow.approval_for_booking(&booking.id).await?
        .ok_or(AppError::Conflict("No consultation proposal to reject".into()))?;
    if approval.status != ApprovalStatus::Pending {
        return Err(AppError::Conflict("Proposal has already been resolved".into()));
    }

    let now = Utc::now();
    approval.status = ApprovalStatus::Rejected;
    approval.rejected_at = Some(now);
    approval.approved_at = None;
    approval.updated_at = now;

    booking.session_step = SessionStep::Consultation;

    uow.upsert_approval(&approval).await?;
    uow.update_booking(&booking).await?;
    uow.commit().await?;

    info!("Consultation rejected for booking {}", booking.id);
    Ok(Json(ApprovalEnvelope { approval, booking }))
}
