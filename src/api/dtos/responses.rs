use serde::Serialize;

use crate::domain::models::booking::Booking;
use crate::domain::models::consultation::ConsultationApproval;

#[derive(Serialize)]
pub struct AvailabilityResponse {
    pub time_zone: String,
    pub location_id: Option<String>,
    pub step_min: i64,
    pub lead_time_min: i64,
    pub slots: Vec<String>,
}

/// Primary result plus the non-critical side effects that failed. A
/// warning never fails the operation -- it tells the caller which
/// notifications may not arrive.
#[derive(Serialize)]
pub struct BookingEnvelope {
    pub booking: Booking,
    pub warnings: Vec<String>,
}

#[derive(Serialize)]
pub struct ApprovalEnvelope {
    pub approval: ConsultationApproval,
    pub booking: Booking,
}

#[derive(Serialize)]
pub struct DiscountResponse {
    pub base_price: i64,
    pub discount_pct: i64,
    pub discount_amount: i64,
}
