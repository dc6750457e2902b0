use axum::{extract::{Path, State}, response::IntoResponse, Json};
use chrono::Utc;
use std::sync::Arc;

use crate::api::dtos::responses::DiscountResponse;
use crate::api::extractors::auth::AuthActor;
use crate::domain::services::{discount, timezone::resolve_zone_strict};
use crate::error::AppError;
use crate::state::AppState;

/// Live evaluation of the current last-minute rules for a booking's
/// slot. The snapshot persisted on the booking at creation stays
/// authoritative for money already agreed; this endpoint never rewrites
/// it.
pub async fn compute_last_minute_discount(
    State(state): State<Arc<AppState>>,
    AuthActor(actor): AuthActor,
    Path(booking_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let booking = state.booking_repo.find_by_id(&booking_id).await?
        .ok_or(AppError::NotFound("Booking not found".into()))?;

    if actor.id != booking.client_id && actor.id != booking.professional_id {
        return Err(AppError::NotFound("Booking not found".into()));
    }

    // Strict: a discount evaluated in a guessed zone would misprice the
    // appointment.
    let tz = resolve_zone_strict([Some(booking.location_time_zone.as_str())])?;

    let settings = state.last_minute_repo.settings(&booking.professional_id).await?;
    let service_floor = state.last_minute_repo
        .service_floor(&booking.professional_id, &booking.service_id)
        .await?;
    let blocks = state.last_minute_repo
        .blocks_covering(&booking.professional_id, booking.scheduled_for)
        .await?;

    let quote = discount::compute(
        settings.as_ref(),
        service_floor,
        &blocks,
        booking.scheduled_for,
        booking.subtotal,
        tz,
        Utc::now(),
    );

    Ok(Json(DiscountResponse {
        base_price: booking.subtotal,
        discount_pct: quote.pct,
        discount_amount: quote.amount,
    }))
}
