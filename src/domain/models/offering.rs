use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::domain::models::location::LocationType;

/// A professional's priced variant of a catalog service. Duration depends
/// on where the service is performed: in the salon or at the client's
/// address.
#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Offering {
    pub id: String,
    pub professional_id: String,
    pub service_id: String,
    pub name: String,
    pub base_price: i64,
    pub salon_duration_min: i64,
    pub mobile_duration_min: i64,
    pub buffer_min: i64,
    pub active: bool,
    pub created_at: DateTime<Utc>,
}

impl Offering {
    pub fn duration_for(&self, location_type: LocationType) -> i64 {
        match location_type {
            LocationType::Salon => self.salon_duration_min,
            LocationType::Mobile => self.mobile_duration_min,
        }
    }
}
