use chrono::{DateTime, Utc, Weekday};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[sqlx(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LocationType {
    Salon,
    Mobile,
}

impl LocationType {
    pub fn as_str(&self) -> &'static str {
        match self {
            LocationType::Salon => "SALON",
            LocationType::Mobile => "MOBILE",
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct TimeWindow {
    pub start: String,
    pub end: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
#[serde(default)]
pub struct WeekdayHours {
    pub monday: Option<Vec<TimeWindow>>,
    pub tuesday: Option<Vec<TimeWindow>>,
    pub wednesday: Option<Vec<TimeWindow>>,
    pub thursday: Option<Vec<TimeWindow>>,
    pub friday: Option<Vec<TimeWindow>>,
    pub saturday: Option<Vec<TimeWindow>>,
    pub sunday: Option<Vec<TimeWindow>>,
}

impl WeekdayHours {
    pub fn windows_for(&self, weekday: Weekday) -> Option<&Vec<TimeWindow>> {
        match weekday {
            Weekday::Mon => self.monday.as_ref(),
            Weekday::Tue => self.tuesday.as_ref(),
            Weekday::Wed => self.wednesday.as_ref(),
            Weekday::Thu => self.thursday.as_ref(),
            Weekday::Fri => self.friday.as_ref(),
            Weekday::Sat => self.saturday.as_ref(),
            Weekday::Sun => self.sunday.as_ref(),
        }
    }
}

/// A bookable place owned by a professional, carrying its own working
/// hours and scheduling safety margins. `timezone` is the wall-clock
/// authority for every temporal decision about this location.
#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Location {
    pub id: String,
    pub professional_id: String,
    pub location_type: LocationType,
    pub name: String,
    pub address: String,
    pub timezone: String,
    pub hours_json: String,
    pub step_min: i64,
    pub buffer_min: i64,
    pub min_notice_min: i64,
    pub max_days_ahead: i64,
    pub active: bool,
    pub created_at: DateTime<Utc>,
}

impl Location {
    pub fn hours(&self) -> WeekdayHours {
        serde_json::from_str(&self.hours_json).unwrap_or_default()
    }
}

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct CalendarBlock {
    pub id: String,
    pub professional_id: String,
    pub location_id: Option<String>,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub reason: Option<String>,
    pub created_at: DateTime<Utc>,
}
