use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::domain::models::location::LocationType;

/// A client's short-lived claim on one (professional, location, start)
/// tuple, pinning the slot through checkout. Past `expires_at` a hold is
/// dead weight: every reader treats it as absent and deletes it on touch.
#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Hold {
    pub id: String,
    pub client_id: String,
    pub professional_id: String,
    pub service_id: String,
    pub offering_id: String,
    pub location_id: String,
    pub location_type: LocationType,
    pub scheduled_for: DateTime<Utc>,
    pub duration_min: i64,
    pub location_time_zone: String,
    pub expires_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

pub struct NewHoldParams {
    pub client_id: String,
    pub professional_id: String,
    pub service_id: String,
    pub offering_id: String,
    pub location_id: String,
    pub location_type: LocationType,
    pub scheduled_for: DateTime<Utc>,
    pub duration_min: i64,
    pub location_time_zone: String,
    pub ttl_min: i64,
}

impl Hold {
    pub fn new(params: NewHoldParams) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            client_id: params.client_id,
            professional_id: params.professional_id,
            service_id: params.service_id,
            offering_id: params.offering_id,
            location_id: params.location_id,
            location_type: params.location_type,
            scheduled_for: params.scheduled_for,
            duration_min: params.duration_min,
            location_time_zone: params.location_time_zone,
            expires_at: now + Duration::minutes(params.ttl_min),
            created_at: now,
        }
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at <= now
    }
}
