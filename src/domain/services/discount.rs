use chrono::{DateTime, Datelike, Duration, Utc};
use chrono_tz::Tz;

use crate::domain::models::discount::{LastMinuteBlock, LastMinuteSettings};

pub const MAX_PCT: i64 = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quote {
    pub pct: i64,
    pub amount: i64,
}

impl Quote {
    pub const ZERO: Quote = Quote { pct: 0, amount: 0 };
}

/// Last-minute discount for a slot, evaluated in the professional's local
/// time. "Same day" means the same wall-calendar day as `now` in `tz` --
/// never the server's UTC day -- and takes precedence over the rolling
/// 24-hour window. Floors clamp the amount down rather than rejecting
/// the booking; the result rounds half-up to whole cents.
pub fn compute(
    settings: Option<&LastMinuteSettings>,
    service_floor: Option<i64>,
    blocks: &[LastMinuteBlock],
    scheduled_for: DateTime<Utc>,
    base_price: i64,
    tz: Tz,
    now: DateTime<Utc>,
) -> Quote {
    let Some(settings) = settings else {
        return Quote::ZERO;
    };
    if !settings.enabled || base_price <= 0 || scheduled_for <= now {
        return Quote::ZERO;
    }

    let local_slot = scheduled_for.with_timezone(&tz);
    if settings.weekday_disabled(local_slot.weekday()) {
        return Quote::ZERO;
    }
    if blocks
        .iter()
        .any(|b| b.start_time <= scheduled_for && scheduled_for < b.end_time)
    {
        return Quote::ZERO;
    }

    let local_now = now.with_timezone(&tz);
    let pct = if local_slot.date_naive() == local_now.date_naive() {
        settings.same_day_pct
    } else if scheduled_for - now <= Duration::hours(24) {
        settings.within_24h_pct
    } else {
        0
    };

    let pct = pct.clamp(0, MAX_PCT);
    if pct == 0 {
        return Quote::ZERO;
    }

    let mut amount = (base_price * pct + 50) / 100;

    let floor = service_floor.unwrap_or(settings.min_price_floor);
    if floor > 0 && base_price - amount < floor {
        amount = (base_price - floor).max(0);
    }

    if amount == 0 {
        return Quote::ZERO;
    }
    Quote { pct, amount }
}
