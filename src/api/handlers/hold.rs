use axum::{extract::{Path, State}, response::IntoResponse, Json};
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tracing::info;

use crate::api::dtos::requests::CreateHoldRequest;
use crate::api::extractors::auth::AuthActor;
use crate::domain::models::hold::{Hold, NewHoldParams};
use crate::domain::services::timezone::resolve_zone;
use crate::error::AppError;
use crate::state::AppState;

pub async fn create_hold(
    State(state): State<Arc<AppState>>,
    AuthActor(actor): AuthActor,
    Json(payload): Json<CreateHoldRequest>,
) -> Result<impl IntoResponse, AppError> {
    if !actor.is_client() {
        return Err(AppError::Forbidden("Only clients can reserve slots".into()));
    }

    let scheduled_for = DateTime::parse_from_rfc3339(&payload.scheduled_for)
        .map_err(|_| AppError::Validation("scheduled_for must be an RFC3339 instant".into()))?
        .with_timezone(&Utc);

    if scheduled_for <= Utc::now() {
        return Err(AppError::Validation("scheduled_for must be in the future".into()));
    }

    let offering = state.offering_repo.find_by_id(&payload.offering_id).await?
        .ok_or(AppError::NotFound("Offering not found".into()))?;

    let professional = state.professional_repo.find_by_id(&offering.professional_id).await?
        .ok_or(AppError::NotFound("Professional not found".into()))?;

    let location = match &payload.location_id {
        Some(id) => state.location_repo.find_by_id(&professional.id, id).await?,
        None => state.location_repo.find_default(&professional.id, payload.location_type).await?,
    }
    .ok_or(AppError::NotFound("No bookable location for the requested mode".into()))?;

    if location.location_type != payload.location_type {
        return Err(AppError::Validation("Location does not offer the requested mode".into()));
    }

    // Single-active-hold-per-flow: the caller's previous hold dies first.
    if let Some(previous) = &payload.replaces_hold_id {
        state.hold_repo.delete_for_client(previous, &actor.id).await?;
    }

    let tz = resolve_zone([
        Some(location.timezone.as_str()),
        Some(professional.timezone.as_str()),
    ]);

    let hold = Hold::new(NewHoldParams {
        client_id: actor.id.clone(),
        professional_id: professional.id.clone(),
        service_id: offering.service_id.clone(),
        offering_id: offering.id.clone(),
        location_id: location.id.clone(),
        location_type: location.location_type,
        scheduled_for,
        duration_min: offering.duration_for(location.location_type),
        location_time_zone: tz.name().to_string(),
        ttl_min: state.config.hold_ttl_min,
    });

    let created = state.hold_repo.create(&hold).await?;
    info!("Hold created: {} for client {} at {}", created.id, actor.id, created.scheduled_for);
    Ok(Json(created))
}

pub async fn get_hold(
    State(state): State<Arc<AppState>>,
    AuthActor(actor): AuthActor,
    Path(hold_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let hold = state.hold_repo.find_for_client(&hold_id, &actor.id).await?
        .ok_or(AppError::NotFound("Hold not found".into()))?;

    if hold.is_expired(Utc::now()) {
        state.hold_repo.delete_for_client(&hold_id, &actor.id).await?;
        return Err(AppError::NotFound("Hold not found".into()));
    }

    Ok(Json(hold))
}

pub async fn delete_hold(
    State(state): State<Arc<AppState>>,
    AuthActor(actor): AuthActor,
    Path(hold_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    state.hold_repo.delete_for_client(&hold_id, &actor.id).await?;
    info!("Hold released: {} by client {}", hold_id, actor.id);
    Ok(Json(serde_json::json!({ "status": "released" })))
}
