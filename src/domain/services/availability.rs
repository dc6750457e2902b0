use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveTime, TimeZone, Timelike, Utc};
use chrono_tz::Tz;

use crate::domain::models::booking::Booking;
use crate::domain::models::location::{CalendarBlock, Location};

pub const MIN_STEP_MIN: i64 = 5;
pub const MAX_STEP_MIN: i64 = 60;
pub const MIN_LEAD_MIN: i64 = 0;
pub const MAX_LEAD_MIN: i64 = 240;

pub struct SlotParams {
    pub date: NaiveDate,
    pub duration_min: i64,
    pub buffer_min: i64,
    pub step_min: i64,
    pub lead_time_min: i64,
    pub now: DateTime<Utc>,
}

/// Caller-supplied step overrides are clamped so a client can neither ask
/// for sub-5-minute granularity nor flatten the grid past an hour.
pub fn effective_step(location: &Location, override_step: Option<i64>) -> i64 {
    override_step
        .unwrap_or(location.step_min)
        .clamp(MIN_STEP_MIN, MAX_STEP_MIN)
}

/// Lead-time overrides are clamped to 0-240 minutes and can only tighten
/// the schedule: the location's configured notice is the floor.
pub fn effective_lead(location: &Location, override_lead: Option<i64>) -> i64 {
    let requested = override_lead
        .map(|l| l.clamp(MIN_LEAD_MIN, MAX_LEAD_MIN))
        .unwrap_or(location.min_notice_min);
    requested.max(location.min_notice_min)
}

/// The day window in the location's zone: local midnight to the next
/// local midnight. A DST transition that skips midnight resolves to the
/// earliest valid local instant.
pub fn local_day_window(tz: Tz, date: NaiveDate) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
    let start = tz.from_local_datetime(&date.and_time(NaiveTime::MIN)).earliest()?;
    let end = tz
        .from_local_datetime(&(date + Duration::days(1)).and_time(NaiveTime::MIN))
        .earliest()?;
    Some((start.with_timezone(&Utc), end.with_timezone(&Utc)))
}

/// Enumerate bookable start instants for one professional/location/day.
///
/// Candidates march across the weekday's configured windows at
/// `step_min` granularity; a candidate survives when its
/// [start, start + duration + buffer) interval clears every non-cancelled
/// booking and calendar block (strict half-open comparison) and starts no
/// earlier than `now + lead_time_min`.
pub fn day_slots(
    location: &Location,
    tz: Tz,
    params: &SlotParams,
    bookings: &[Booking],
    blocks: &[CalendarBlock],
) -> Vec<DateTime<Utc>> {
    if params.duration_min <= 0 || params.step_min <= 0 {
        return Vec::new();
    }

    let today_local = params.now.with_timezone(&tz).date_naive();
    if params.date > today_local + Duration::days(location.max_days_ahead) {
        return Vec::new();
    }

    let hours = location.hours();
    let Some(windows) = hours.windows_for(params.date.weekday()) else {
        return Vec::new();
    };

    let cutoff = params.now + Duration::minutes(params.lead_time_min);
    let mut slots = Vec::new();

    for window in windows {
        let (Ok(win_start), Ok(win_end)) = (
            NaiveTime::parse_from_str(&window.start, "%H:%M"),
            NaiveTime::parse_from_str(&window.end, "%H:%M"),
        ) else {
            continue;
        };

        let win_start_idx = (win_start.hour() * 60 + win_start.minute()) as i64;
        let mut win_end_idx = (win_end.hour() * 60 + win_end.minute()) as i64;
        // "23:59" is shorthand for end of day
        if win_end_idx == 1439 {
            win_end_idx = 1440;
        }

        let mut cursor = win_start_idx;
        while cursor + params.duration_min <= win_end_idx {
            let hour = (cursor / 60) as u32;
            let minute = (cursor % 60) as u32;

            if let Some(time) = NaiveTime::from_hms_opt(hour, minute, 0)
                && let Some(local) = tz.from_local_datetime(&params.date.and_time(time)).earliest()
            {
                let slot_start = local.with_timezone(&Utc);
                let slot_end =
                    slot_start + Duration::minutes(params.duration_min + params.buffer_min);

                let busy = bookings
                    .iter()
                    .any(|b| b.scheduled_for < slot_end && slot_start < b.ends_at)
                    || blocks
                        .iter()
                        .any(|blk| blk.start_time < slot_end && slot_start < blk.end_time);

                if !busy && slot_start >= cutoff {
                    slots.push(slot_start);
                }
            }
            cursor += params.step_min;
        }
    }

    slots.sort();
    slots.dedup();
    slots
}
