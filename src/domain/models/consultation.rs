use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[sqlx(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ApprovalStatus {
    Pending,
    Approved,
    Rejected,
}

/// The client's binding acceptance of a professional's proposed services
/// and price. One row per booking; re-proposal resets it to PENDING with
/// both timestamps cleared.
#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct ConsultationApproval {
    pub id: String,
    pub booking_id: String,
    pub status: ApprovalStatus,
    pub proposed_services_json: String,
    pub proposed_total: i64,
    pub approved_at: Option<DateTime<Utc>>,
    pub rejected_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ConsultationApproval {
    pub fn new(booking_id: String, proposed_services_json: String, proposed_total: i64) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            booking_id,
            status: ApprovalStatus::Pending,
            proposed_services_json,
            proposed_total,
            approved_at: None,
            rejected_at: None,
            created_at: now,
            updated_at: now,
        }
    }
}
