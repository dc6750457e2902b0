use chrono::{DateTime, Utc, Weekday};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Per-professional last-minute discount configuration. Percentages are
/// clamped to 0-50 at evaluation time regardless of what was persisted;
/// `min_price_floor` of 0 means no global floor.
#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct LastMinuteSettings {
    pub professional_id: String,
    pub enabled: bool,
    pub same_day_pct: i64,
    pub within_24h_pct: i64,
    pub min_price_floor: i64,
    pub disabled_weekdays_json: String,
}

impl LastMinuteSettings {
    pub fn weekday_disabled(&self, weekday: Weekday) -> bool {
        let disabled: Vec<String> =
            serde_json::from_str(&self.disabled_weekdays_json).unwrap_or_default();
        disabled.iter().any(|d| d == weekday_key(weekday))
    }
}

pub fn weekday_key(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "MONDAY",
        Weekday::Tue => "TUESDAY",
        Weekday::Wed => "WEDNESDAY",
        Weekday::Thu => "THURSDAY",
        Weekday::Fri => "FRIDAY",
        Weekday::Sat => "SATURDAY",
        Weekday::Sun => "SUNDAY",
    }
}

/// An explicit time range the professional has excluded from discounting.
#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct LastMinuteBlock {
    pub id: String,
    pub professional_id: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
}
