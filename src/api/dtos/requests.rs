use serde::Deserialize;

use crate::domain::models::booking::{BookingStatus, SessionStep};
use crate::domain::models::location::LocationType;
use crate::domain::models::media::MediaKind;

#[derive(Deserialize)]
pub struct AvailabilityQuery {
    pub service_id: String,
    pub date: String,
    pub location_type: LocationType,
    pub location_id: Option<String>,
    pub step_min: Option<i64>,
    pub lead_time_min: Option<i64>,
}

#[derive(Deserialize)]
pub struct CreateHoldRequest {
    pub offering_id: String,
    pub scheduled_for: String,
    pub location_type: LocationType,
    pub location_id: Option<String>,
    pub replaces_hold_id: Option<String>,
}

#[derive(Deserialize)]
pub struct CreateBookingRequest {
    pub hold_id: String,
    pub client_name: String,
    pub client_phone: Option<String>,
}

#[derive(Deserialize)]
pub struct RescheduleBookingRequest {
    pub hold_id: String,
    pub scheduled_for: String,
    pub location_type: LocationType,
}

#[derive(Deserialize)]
pub struct SetStatusRequest {
    pub status: BookingStatus,
}

#[derive(Deserialize)]
pub struct SetSessionStepRequest {
    pub step: SessionStep,
}

#[derive(Deserialize)]
pub struct ProposeConsultationRequest {
    pub proposed_services: serde_json::Value,
    pub proposed_total: i64,
}

#[derive(Deserialize)]
pub struct AddMediaRequest {
    pub kind: MediaKind,
    pub url: String,
}

#[derive(Deserialize)]
pub struct AftercareRequest {
    pub instructions: String,
    pub products: Option<serde_json::Value>,
}
