use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[sqlx(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MediaKind {
    Before,
    After,
}

/// A media asset attached to a booking's session. Storage and signing
/// live elsewhere; the engine only cares that the asset exists, because
/// existence gates session-step transitions.
#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct MediaAsset {
    pub id: String,
    pub booking_id: String,
    pub kind: MediaKind,
    pub uploaded_by: String,
    pub url: String,
    pub created_at: DateTime<Utc>,
}

impl MediaAsset {
    pub fn new(booking_id: String, kind: MediaKind, uploaded_by: String, url: String) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            booking_id,
            kind,
            uploaded_by,
            url,
            created_at: Utc::now(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct AftercareSummary {
    pub booking_id: String,
    pub instructions: String,
    pub products_json: String,
    pub created_at: DateTime<Utc>,
}
