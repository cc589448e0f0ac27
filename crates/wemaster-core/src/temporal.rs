//! # Temporal Types — UTC-Only Timestamps
//!
//! Defines `Timestamp`, a UTC-only instant truncated to seconds precision.
//! Lesson windows (`startTime`, `endTime`) and lifecycle marks
//! (`completedTime`, `lastAppealTime`, ...) are all stored as `Timestamp`.
//!
//! ## Arithmetic
//!
//! Differences are reported in whole units truncated toward zero, so a
//! lesson starting in 10m59s is "10 minutes away" and one that started
//! 10m59s ago is "-10 minutes away". Additions saturate at the bounds of
//! the representable range instead of panicking, which keeps every
//! lifecycle function total.

use chrono::{DateTime, NaiveDate, NaiveTime, TimeDelta, Timelike, Utc};
use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// A UTC-only timestamp, truncated to seconds precision.
///
/// # Construction
///
/// - [`Timestamp::now()`] — current UTC time, truncated.
/// - [`Timestamp::from_utc()`] — from a `DateTime<Utc>`, truncating sub-seconds.
/// - [`Timestamp::parse()`] — from an RFC 3339 string with `Z` suffix.
/// - [`Timestamp::parse_lenient()`] — from an RFC 3339 string with any offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// Create a timestamp from the current UTC time, truncated to seconds.
    pub fn now() -> Self {
        Self(truncate_to_seconds(Utc::now()))
    }

    /// Create a timestamp from a `chrono::DateTime<Utc>`, truncating sub-seconds.
    pub fn from_utc(dt: DateTime<Utc>) -> Self {
        Self(truncate_to_seconds(dt))
    }

    /// Parse a timestamp from an RFC 3339 string.
    ///
    /// Only the `Z` suffix is accepted. Explicit offsets, including
    /// `+00:00`, are rejected so stored records stay in a single form.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidTimestamp`] if the string is not valid
    /// RFC 3339 or uses a non-`Z` offset.
    pub fn parse(s: &str) -> Result<Self, CoreError> {
        if !s.ends_with('Z') {
            return Err(CoreError::InvalidTimestamp(format!(
                "timestamp must use Z suffix (UTC only), got: {s:?}"
            )));
        }
        Self::parse_lenient(s)
    }

    /// Parse a timestamp from an RFC 3339 string, accepting any offset and
    /// converting to UTC.
    ///
    /// Intended for operator input on the command line.
    pub fn parse_lenient(s: &str) -> Result<Self, CoreError> {
        let dt = DateTime::parse_from_rfc3339(s)
            .map_err(|e| CoreError::InvalidTimestamp(format!("{s:?}: {e}")))?;
        Ok(Self(truncate_to_seconds(dt.with_timezone(&Utc))))
    }

    /// Create a timestamp from a Unix epoch timestamp (seconds).
    pub fn from_epoch_secs(secs: i64) -> Result<Self, CoreError> {
        DateTime::from_timestamp(secs, 0)
            .map(Self)
            .ok_or_else(|| CoreError::OutOfRange(format!("unix timestamp {secs}")))
    }

    /// Access the inner `DateTime<Utc>`.
    pub fn as_datetime(&self) -> &DateTime<Utc> {
        &self.0
    }

    /// Returns the Unix epoch timestamp in seconds.
    pub fn epoch_secs(&self) -> i64 {
        self.0.timestamp()
    }

    /// The UTC calendar date of this instant.
    pub fn date(&self) -> NaiveDate {
        self.0.date_naive()
    }

    /// Midnight UTC at the start of this instant's calendar date.
    pub fn start_of_day(&self) -> Self {
        Self(self.date().and_time(NaiveTime::MIN).and_utc())
    }

    /// Whole minutes from `earlier` to `self`, truncated toward zero.
    ///
    /// Negative when `earlier` is actually later than `self`.
    pub fn whole_minutes_since(&self, earlier: &Timestamp) -> i64 {
        self.0.signed_duration_since(earlier.0).num_minutes()
    }

    /// Whole hours from `earlier` to `self`, truncated toward zero.
    pub fn whole_hours_since(&self, earlier: &Timestamp) -> i64 {
        self.0.signed_duration_since(earlier.0).num_hours()
    }

    /// Exact seconds from `earlier` to `self`.
    pub fn seconds_since(&self, earlier: &Timestamp) -> i64 {
        self.0.signed_duration_since(earlier.0).num_seconds()
    }

    /// Add a signed number of seconds, saturating at the representable range.
    pub fn saturating_add_seconds(&self, seconds: i64) -> Self {
        self.saturating_add(TimeDelta::try_seconds(seconds), seconds < 0)
    }

    /// Add a signed number of minutes, saturating at the representable range.
    pub fn saturating_add_minutes(&self, minutes: i64) -> Self {
        self.saturating_add(TimeDelta::try_minutes(minutes), minutes < 0)
    }

    /// Add a signed number of hours, saturating at the representable range.
    pub fn saturating_add_hours(&self, hours: i64) -> Self {
        self.saturating_add(TimeDelta::try_hours(hours), hours < 0)
    }

    /// Render as ISO8601 with Z suffix (e.g., `2024-01-10T10:00:00Z`).
    pub fn to_iso8601(&self) -> String {
        self.0.format("%Y-%m-%dT%H:%M:%SZ").to_string()
    }

    fn saturating_add(&self, delta: Option<TimeDelta>, negative: bool) -> Self {
        let bound = if negative {
            DateTime::<Utc>::MIN_UTC
        } else {
            DateTime::<Utc>::MAX_UTC
        };
        let shifted = delta
            .and_then(|d| self.0.checked_add_signed(d))
            .unwrap_or(bound);
        Self(truncate_to_seconds(shifted))
    }
}

impl std::fmt::Display for Timestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_iso8601())
    }
}

impl std::str::FromStr for Timestamp {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_lenient(s)
    }
}

impl From<DateTime<Utc>> for Timestamp {
    fn from(dt: DateTime<Utc>) -> Self {
        Self::from_utc(dt)
    }
}

/// Truncate a `DateTime<Utc>` to seconds precision (discard nanoseconds).
fn truncate_to_seconds(dt: DateTime<Utc>) -> DateTime<Utc> {
    dt.with_nanosecond(0).unwrap_or(dt)
}
