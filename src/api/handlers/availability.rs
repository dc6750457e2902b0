use axum::{extract::{Path, Query, State}, response::IntoResponse, Json};
use chrono::NaiveDate;
use std::sync::Arc;
use tracing::info;

use crate::api::dtos::requests::AvailabilityQuery;
use crate::api::dtos::responses::AvailabilityResponse;
use crate::domain::services::availability::{
    day_slots, effective_lead, effective_step, local_day_window, SlotParams,
};
use crate::domain::services::timezone::resolve_zone;
use crate::error::AppError;
use crate::state::AppState;

/// Bookable start instants for one professional/location/day. Public:
/// clients browse availability before they have any identity attached to
/// a booking flow.
pub async fn get_day_availability(
    State(state): State<Arc<AppState>>,
    Path(professional_id): Path<String>,
    Query(query): Query<AvailabilityQuery>,
) -> Result<impl IntoResponse, AppError> {
    let professional = state.professional_repo.find_by_id(&professional_id).await?
        .ok_or(AppError::NotFound("Professional not found".into()))?;

    let date = NaiveDate::parse_from_str(&query.date, "%Y-%m-%d")
        .map_err(|_| AppError::Validation("date must be formatted YYYY-MM-DD".into()))?;

    let offering = state.offering_repo
        .find_by_service(&professional.id, &query.service_id)
        .await?
        .ok_or(AppError::NotFound("No offering for this service".into()))?;

    let location = match &query.location_id {
        Some(id) => state.location_repo.find_by_id(&professional.id, id).await?,
        None => state.location_repo.find_default(&professional.id, query.location_type).await?,
    };

    // No bookable location is an empty day, not an error.
    let Some(location) = location else {
        let tz = resolve_zone([Some(professional.timezone.as_str())]);
        return Ok(Json(AvailabilityResponse {
            time_zone: tz.name().to_string(),
            location_id: None,
            step_min: 0,
            lead_time_min: 0,
            slots: Vec::new(),
        }));
    };

    if location.location_type != query.location_type {
        return Err(AppError::Validation("Location does not offer the requested mode".into()));
    }

    let tz = resolve_zone([
        Some(location.timezone.as_str()),
        Some(professional.timezone.as_str()),
    ]);

    let (day_start, day_end) = local_day_window(tz, date)
        .ok_or(AppError::Validation("Date is not representable in the location time zone".into()))?;

    let bookings = state.booking_repo
        .list_in_range(&professional.id, day_start, day_end)
        .await?;

    let blocks: Vec<_> = state.calendar_block_repo
        .list_overlapping(&professional.id, day_start, day_end)
        .await?
        .into_iter()
        .filter(|b| b.location_id.as_deref().is_none_or(|id| id == location.id))
        .collect();

    let step_min = effective_step(&location, query.step_min);
    let lead_time_min = effective_lead(&location, query.lead_time_min);
    let duration_min = offering.duration_for(location.location_type);
    let buffer_min = offering.buffer_min.max(location.buffer_min);

    let params = SlotParams {
        date,
        duration_min,
        buffer_min,
        step_min,
        lead_time_min,
        now: chrono::Utc::now(),
    };

    let slots = day_slots(&location, tz, &params, &bookings, &blocks);

    info!(
        "Availability for {} at {} on {}: {} slots",
        professional.id, location.id, date, slots.len()
    );

    Ok(Json(AvailabilityResponse {
        time_zone: tz.name().to_string(),
        location_id: Some(location.id),
        step_min,
        lead_time_min,
        slots: slots.iter().map(|s| s.to_rfc3339()).collect(),
    }))
}
