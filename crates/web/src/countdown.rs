//! Time left until Valentine's Day.

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::Serialize;

/// Whole units left until the target, each below its next unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Countdown {
    pub days: i64,
    pub hours: i64,
    pub minutes: i64,
    pub seconds: i64,
}

/// Feb 14 00:00 UTC of `year`.
fn valentines(year: i32) -> Option<DateTime<Utc>> {
    NaiveDate::from_ymd_opt(year, 2, 14)
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// The next Feb 14 at or after `now`.
pub fn next_valentines(now: DateTime<Utc>) -> Option<DateTime<Utc>> {
    let this_year = valentines(now.year())?;
    if this_year < now {
        valentines(now.year() + 1)
    } else {
        Some(this_year)
    }
}

/// Countdown from `now` to the next Feb 14.
pub fn countdown_at(now: DateTime<Utc>) -> Option<Countdown> {
    let left = (next_valentines(now)? - now).num_seconds();
    Some(Countdown {
        days: left / 86_400,
        hours: left / 3_600 % 24,
        minutes: left / 60 % 60,
        seconds: left % 60,
    })
}

/// Countdown from the current time.
pub fn countdown() -> Option<Countdown> {
    countdown_at(Utc::now())
}
