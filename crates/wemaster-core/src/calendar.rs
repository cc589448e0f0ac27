//! # Business-Day Calendar
//!
//! Weekday arithmetic over UTC calendar dates. A business day is Monday
//! through Friday; no holiday calendar is applied.
//!
//! Counting is date-based, not duration-based: the time of day of either
//! instant does not matter, only which calendar dates they fall on.

use chrono::{Datelike, Days, NaiveDate, Weekday};

use crate::temporal::Timestamp;

/// Whether `date` is a weekday (Monday through Friday).
pub fn is_business_day(date: NaiveDate) -> bool {
    !matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// Business days elapsed from `earlier` to `later`.
///
/// Walks from the anchor date toward `later`'s date, counting each
/// weekday the walk leaves: the weekdays in `[earlier.date(), later.date())`.
/// A Saturday completion therefore starts counting on Monday, and a
/// weekday completion counts its own date as day one.
///
/// When `later` precedes `earlier` the walk runs backwards and counts the
/// weekdays in `(later.date(), earlier.date()]`, negated. The two
/// directions are not mirror images once a weekend is involved.
pub fn business_days_between(later: &Timestamp, earlier: &Timestamp) -> i64 {
    let (to, from) = (later.date(), earlier.date());
    if to < from {
        let shift = i64::from(is_business_day(from)) - i64::from(is_business_day(to));
        -(weekdays_from(to, from) + shift)
    } else {
        weekdays_from(from, to)
    }
}

/// Advance `from` by `days` business days, keeping the time of day.
///
/// Weekend dates are skipped. Adding zero returns `from` unchanged even
/// when it falls on a weekend. Saturates at the end of the calendar.
pub fn add_business_days(from: &Timestamp, days: u32) -> Timestamp {
    let mut cursor = *from.as_datetime();
    let mut remaining = days;
    while remaining > 0 {
        cursor = match cursor.checked_add_days(Days::new(1)) {
            Some(next) => next,
            None => break,
        };
        if is_business_day(cursor.date_naive()) {
            remaining -= 1;
        }
    }
    Timestamp::from_utc(cursor)
}

/// Weekdays in `[from, to)`. Requires `from <= to`.
fn weekdays_from(from: NaiveDate, to: NaiveDate) -> i64 {
    let span = to.signed_duration_since(from).num_days();
    let weeks = span / 7;
    let mut count = weeks * 5;

    // Any seven consecutive dates hold exactly five weekdays, so only the
    // trailing partial week needs to be walked.
    let skipped = u64::try_from(weeks * 7).unwrap_or(0);
    let mut day = from.checked_add_days(Days::new(skipped)).unwrap_or(to);
    while day < to {
        if is_business_day(day) {
            count += 1;
        }
        day = match day.succ_opt() {
            Some(next) => next,
            None => break,
        };
    }
    count
}
