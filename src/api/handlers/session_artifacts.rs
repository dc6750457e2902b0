use axum::{extract::{Path, State}, response::IntoResponse, Json};
use chrono::Utc;
use std::sync::Arc;
use tracing::info;

use crate::api::dtos::requests::{AddMediaRequest, AftercareRequest};
use crate::api::extractors::auth::AuthActor;
use crate::domain::models::booking::BookingStatus;
use crate::domain::models::media::{AftercareSummary, MediaAsset};
use crate::error::AppError;
use crate::state::AppState;

/// Register a before/after asset against a booking. Upload signing and
/// storage are someone else's problem; the session machine only needs to
/// know the asset exists.
pub async fn add_media(
    State(state): State<Arc<AppState>>,
    AuthActor(actor): AuthActor,
    Path(booking_id): Path<String>,
    Json(payload): Json<AddMediaRequest>,
) -> Result<impl IntoResponse, AppError> {
    if payload.url.trim().is_empty() {
        return Err(AppError::Validation("url must not be empty".into()));
    }

    let booking = state.booking_repo.find_by_id(&booking_id).await?
        .ok_or(AppError::NotFound("Booking not found".into()))?;
    if actor.id != booking.client_id && actor.id != booking.professional_id {
        return Err(AppError::NotFound("Booking not found".into()));
    }
    if !actor.is_professional() || actor.id != booking.professional_id {
        return Err(AppError::Forbidden("Only the professional can attach session media".into()));
    }
    if booking.status == BookingStatus::Cancelled {
        return Err(AppError::Conflict("Booking is cancelled".into()));
    }

    let asset = MediaAsset::new(booking.id.clone(), payload.kind, actor.id.clone(), payload.url);
    let saved = state.media_repo.add(&asset).await?;

    info!("Media {:?} attached to booking {}", saved.kind, booking.id);
    Ok(Json(saved))
}

pub async fn set_aftercare(
    State(state): State<Arc<AppState>>,
    AuthActor(actor): AuthActor,
    Path(booking_id): Path<String>,
    Json(payload): Json<AftercareRequest>,
) -> Result<impl IntoResponse, AppError> {
    if payload.instructions.trim().is_empty() {
        return Err(AppError::Validation("instructions must not be empty".into()));
    }

    let booking = state.booking_repo.find_by_id(&booking_id).await?
        .ok_or(AppError::NotFound("Booking not found".into()))?;
    if actor.id != booking.client_id && actor.id != booking.professional_id {
        return Err(AppError::NotFound("Booking not found".into()));
    }
    if !actor.is_professional() || actor.id != booking.professional_id {
        return Err(AppError::Forbidden("Only the professional can record aftercare".into()));
    }
    if booking.status == BookingStatus::Cancelled {
        return Err(AppError::Conflict("Booking is cancelled".into()));
    }

    let products_json = payload.products
        .map(|p| p.to_string())
        .unwrap_or_else(|| "[]".to_string());

    let summary = AftercareSummary {
        booking_id: booking.id.clone(),
        instructions: payload.instructions,
        products_json,
        created_at: Utc::now(),
    };
    let saved = state.media_repo.upsert_aftercare(&summary).await?;

    info!("Aftercare recorded for booking {}", booking.id);
    Ok(Json(saved))
}
