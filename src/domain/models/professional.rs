use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Professional {
    pub id: String,
    pub display_name: String,
    pub timezone: String,
    pub phone: Option<String>,
    pub created_at: DateTime<Utc>,
}
