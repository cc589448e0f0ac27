//! # Lesson Status Engine
//!
//! Pure, timestamp-driven derivation over a [`LessonTimeConfig`]. Every
//! function takes the current instant explicitly and returns a value; none
//! reads the clock, mutates its input, or fails on well-formed input. The
//! engine holds only an immutable [`LessonPolicy`], so one instance can be
//! shared across threads without synchronization.
//!
//! ## Status derivation
//!
//! First match wins:
//!
//! 1. `completedTime` set → `COMPLETED`
//! 2. `lastAppealTime` set → `CANCELED`
//! 3. minutes to start and minutes past end both within the join
//!    window → `IN_PROCESS`
//! 4. start within `(0, horizon]` minutes → `UPCOMING`
//! 5. otherwise → `SCHEDULED`
//!
//! Rule 3 has no lower bound on minutes to start, so a lesson already
//! under way derives as `IN_PROCESS` until the join window past its end. A
//! lesson that ended longer ago and was never completed falls through to
//! `SCHEDULED`.

use serde::{Deserialize, Serialize};

use wemaster_core::{add_business_days, business_days_between, is_business_day, Timestamp};

use crate::error::LessonError;
use crate::policy::LessonPolicy;
use crate::status::{ButtonStatus, LessonStatus};
use crate::time_config::LessonTimeConfig;

/// Feedback and appeal windows that apply to a completed lesson.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeLimit {
    /// Feedback window in business days.
    pub feedback_days: u32,
    /// Appeal window in hours.
    pub appeal_hours: u32,
}

/// Everything a client needs to render a lesson's status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LessonStatusView {
    /// Lifecycle status.
    pub status: LessonStatus,
    /// Action offered to the viewer.
    pub button_status: ButtonStatus,
    /// Whether the button accepts clicks.
    pub is_clickable: bool,
    /// The time config the view was derived from.
    pub time_config: LessonTimeConfig,
    /// Windows of a time-limited status.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_limit: Option<TimeLimit>,
    /// First instant at which feedback is no longer accepted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feedback_deadline: Option<Timestamp>,
    /// First instant at which an appeal can no longer be filed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub appeal_deadline: Option<Timestamp>,
}

/// Stateless status derivation under a fixed policy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LessonStatusEngine {
    policy: LessonPolicy,
}

impl LessonStatusEngine {
    /// Build an engine after validating `policy`.
    pub fn new(policy: LessonPolicy) -> Result<Self, LessonError> {
        policy.validate()?;
        Ok(Self { policy })
    }

    /// The policy in force.
    pub fn policy(&self) -> &LessonPolicy {
        &self.policy
    }

    /// Derive the lifecycle status at `now`.
    pub fn derive_status(&self, now: &Timestamp, config: &LessonTimeConfig) -> LessonStatus {
        if config.completed_time.is_some() {
            return LessonStatus::Completed;
        }
        if config.last_appeal_time.is_some() {
            return LessonStatus::Canceled;
        }

        let minutes_to_start = config.start_time.whole_minutes_since(now);
        let minutes_past_end = now.whole_minutes_since(&config.end_time);
        let join_window = i64::from(self.policy.join_window_minutes);

        if minutes_to_start <= join_window && minutes_past_end <= join_window {
            return LessonStatus::InProcess;
        }
        if minutes_to_start > 0
            && minutes_to_start <= i64::from(self.policy.upcoming_horizon_minutes)
        {
            return LessonStatus::Upcoming;
        }
        LessonStatus::Scheduled
    }

    /// Derive the viewer's button for `status` at `now`.
    ///
    /// Only `COMPLETED` consults the time config: feedback expiry first,
    /// then the appeal window, then an appeal already on file.
    pub fn derive_button_status(
        &self,
        now: &Timestamp,
        status: LessonStatus,
        config: &LessonTimeConfig,
    ) -> ButtonStatus {
        let profile = status.profile();
        if !profile.time_limited {
            return profile.button_status;
        }

        if let Some(completed) = &config.completed_time {
            let elapsed = business_days_between(now, completed);
            if elapsed > i64::from(self.policy.feedback_business_days) {
                return ButtonStatus::Invalid;
            }
        }

        match (&config.last_appeal_time, &config.completed_time) {
            (Some(_), _) => ButtonStatus::AppealInfo,
            (None, Some(completed))
                if now.whole_hours_since(completed) <= i64::from(self.policy.appeal_hours) =>
            {
                ButtonStatus::Appeal
            }
            (None, _) => profile.button_status,
        }
    }

    /// Whether the button for `status` accepts clicks.
    pub fn is_clickable(&self, status: LessonStatus) -> bool {
        crate::status::is_clickable(status)
    }

    /// Whether `from -> to` is in the transition table.
    pub fn is_valid_transition(&self, from: LessonStatus, to: LessonStatus) -> bool {
        crate::status::is_valid_transition(from, to)
    }

    /// The time config after moving to `to` at `now`.
    ///
    /// Does not check the transition. A reschedule keeps the exact slot
    /// length and starts at `reschedule_start`, or at `now` plus the
    /// policy's reschedule offset when none is given. Canceling writes
    /// `lastAppealTime`.
    pub fn compute_transition_time_config(
        &self,
        now: &Timestamp,
        _from: LessonStatus,
        to: LessonStatus,
        current: &LessonTimeConfig,
        reschedule_start: Option<Timestamp>,
    ) -> LessonTimeConfig {
        match to {
            LessonStatus::Completed => current.with_completed_time(*now),
            LessonStatus::Canceled => current.with_appeal_time(*now),
            LessonStatus::Rescheduled => {
                let duration = current.duration_secs();
                let start_time = reschedule_start.unwrap_or_else(|| {
                    now.saturating_add_minutes(i64::from(self.policy.reschedule_offset_minutes))
                });
                LessonTimeConfig {
                    start_time,
                    end_time: start_time.saturating_add_seconds(duration),
                    ..*current
                }
            }
            _ => *current,
        }
    }

    /// First instant at which feedback is no longer accepted.
    ///
    /// The window holds `feedback_business_days + 1` weekdays, starting
    /// with the completion date when that is a weekday. Feedback closes at
    /// midnight UTC after the last of them. `None` until the lesson is
    /// completed.
    pub fn feedback_deadline(&self, config: &LessonTimeConfig) -> Option<Timestamp> {
        config.completed_time.map(|completed| {
            let mut last_day = self.policy.feedback_business_days;
            if !is_business_day(completed.date()) {
                last_day = last_day.saturating_add(1);
            }
            add_business_days(&completed, last_day)
                .start_of_day()
                .saturating_add_hours(24)
        })
    }

    /// First instant at which an appeal can no longer be filed.
    ///
    /// Whole hours truncate, so a 24-hour window stays open until 25 hours
    /// after completion. `None` until completed, and once an appeal is on
    /// file.
    pub fn appeal_deadline(&self, config: &LessonTimeConfig) -> Option<Timestamp> {
        if config.last_appeal_time.is_some() {
            return None;
        }
        config.completed_time.map(|completed| {
            completed.saturating_add_hours(i64::from(self.policy.appeal_hours) + 1)
        })
    }

    /// Derive the full view for the time-driven status at `now`.
    pub fn status_view(&self, now: &Timestamp, config: &LessonTimeConfig) -> LessonStatusView {
        self.view_for(now, self.derive_status(now, config), config)
    }

    /// Build the view for an already-decided `status`.
    pub fn view_for(
        &self,
        now: &Timestamp,
        status: LessonStatus,
        config: &LessonTimeConfig,
    ) -> LessonStatusView {
        let time_limit = status.profile().time_limited.then_some(TimeLimit {
            feedback_days: self.policy.feedback_business_days,
            appeal_hours: self.policy.appeal_hours,
        });
        LessonStatusView {
            status,
            button_status: self.derive_button_status(now, status, config),
            is_clickable: self.is_clickable(status),
            time_config: *config,
            time_limit,
            feedback_deadline: self.feedback_deadline(config),
            appeal_deadline: self.appeal_deadline(config),
        }
    }
}
