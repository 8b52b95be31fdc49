use chrono::{DateTime, Datelike, Duration, FixedOffset, NaiveDate, TimeZone, Utc, Weekday};

use crate::error::{MetricsError, Result};

/// The server reports epoch milliseconds; all dates are interpreted and
/// rendered at this fixed offset.
pub const UTC_OFFSET_HOURS: i32 = 9;

const ONE_DAY_SECONDS: i64 = 24 * 60 * 60;

pub fn local_offset() -> FixedOffset {
    FixedOffset::east_opt(UTC_OFFSET_HOURS * 3600).expect("static offset is in range")
}

/// Convert an epoch-milliseconds value into a timestamp at the local offset.
pub fn from_epoch_ms(ms: i64) -> Result<DateTime<FixedOffset>> {
    Utc.timestamp_millis_opt(ms)
        .single()
        .map(|dt| dt.with_timezone(&local_offset()))
        .ok_or(MetricsError::Timestamp(ms))
}

pub fn now_local() -> DateTime<FixedOffset> {
    Utc::now().with_timezone(&local_offset())
}

pub fn today_local() -> NaiveDate {
    now_local().date_naive()
}

/// A timestamp counts as inside a window when its local calendar date is on
/// or after the window's start date.
pub fn on_or_after(ts: &DateTime<FixedOffset>, date: NaiveDate) -> bool {
    ts.date_naive() >= date
}

/// Monday of the week containing `today` (today itself if it is a Monday).
pub fn most_recent_monday(today: NaiveDate) -> NaiveDate {
    today - Duration::days(i64::from(today.weekday().num_days_from_monday()))
}

fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// Elapsed seconds between creation and merge, minus one day for every
/// Saturday or Sunday in the inclusive calendar-day range. When either
/// endpoint itself falls on a weekend no adjustment is applied, so weekend
/// work stays visible in the numbers.
pub fn time_to_merge_secs(
    created_at: &DateTime<FixedOffset>,
    updated_at: &DateTime<FixedOffset>,
) -> i64 {
    let mut seconds = updated_at.timestamp() - created_at.timestamp();

    let start = created_at.date_naive();
    let end = updated_at.date_naive();
    if is_weekend(start) || is_weekend(end) {
        return seconds;
    }

    for day in start.iter_days() {
        if day > end {
            break;
        }
        if is_weekend(day) {
            seconds -= ONE_DAY_SECONDS;
        }
    }

    seconds
}
