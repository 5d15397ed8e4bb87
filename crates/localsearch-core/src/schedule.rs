//! Backend load hint. The demo backend is shared and slows down during
//! Beijing business hours.

use chrono::{DateTime, NaiveTime, TimeDelta, Timelike, Utc};

const BEIJING_OFFSET_SECS: i64 = 8 * 3600;

/// 10:30, inclusive
const PEAK_START: u32 = 10 * 60 + 30;
/// 21:00, inclusive
const PEAK_END: u32 = 21 * 60;

/// Wall clock time in Beijing (UTC+8, no DST)
pub fn beijing_time(now: DateTime<Utc>) -> NaiveTime {
    (now + TimeDelta::seconds(BEIJING_OFFSET_SECS)).time()
}

pub fn is_peak_hour(now: DateTime<Utc>) -> bool {
    let local = beijing_time(now);
    let minutes = local.hour() * 60 + local.minute();
    (PEAK_START..=PEAK_END).contains(&minutes)
}

/// Progress line shown while a search is in flight
pub fn progress_message(now: DateTime<Utc>) -> &'static str {
    if is_peak_hour(now) {
        "Peak hours (10:30-21:00 Beijing time): the backend is busy, this may take longer..."
    } else {
        "Searching..."
    }
}
