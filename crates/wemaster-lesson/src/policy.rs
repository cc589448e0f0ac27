//! # Lesson Policy
//!
//! Thresholds used by the status engine. The defaults are the production
//! values; a deployment may override any subset from a config file.

use serde::{Deserialize, Serialize};

use crate::error::LessonError;

/// Minutes before start / after end during which a lesson is joinable.
pub const DEFAULT_JOIN_WINDOW_MINUTES: u32 = 15;
/// Minutes before start from which a lesson counts as upcoming.
pub const DEFAULT_UPCOMING_HORIZON_MINUTES: u32 = 24 * 60;
/// Business days after completion during which feedback is accepted.
pub const DEFAULT_FEEDBACK_BUSINESS_DAYS: u32 = 7;
/// Hours after completion during which an appeal may be filed.
pub const DEFAULT_APPEAL_HOURS: u32 = 24;
/// Start offset applied to a reschedule that names no new start.
pub const DEFAULT_RESCHEDULE_OFFSET_MINUTES: u32 = 30;

/// Tunable thresholds of the lesson lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LessonPolicy {
    /// Join window on either side of the slot, in minutes.
    pub join_window_minutes: u32,
    /// Upper bound of the upcoming window, in minutes before start.
    pub upcoming_horizon_minutes: u32,
    /// Feedback window after completion, in business days.
    pub feedback_business_days: u32,
    /// Appeal window after completion, in whole hours.
    pub appeal_hours: u32,
    /// Fallback reschedule offset from "now", in minutes.
    pub reschedule_offset_minutes: u32,
}

impl Default for LessonPolicy {
    fn default() -> Self {
        Self {
            join_window_minutes: DEFAULT_JOIN_WINDOW_MINUTES,
            upcoming_horizon_minutes: DEFAULT_UPCOMING_HORIZON_MINUTES,
            feedback_business_days: DEFAULT_FEEDBACK_BUSINESS_DAYS,
            appeal_hours: DEFAULT_APPEAL_HOURS,
            reschedule_offset_minutes: DEFAULT_RESCHEDULE_OFFSET_MINUTES,
        }
    }
}

impl LessonPolicy {
    /// Reject thresholds that would make a window empty or unreachable.
    pub fn validate(&self) -> Result<(), LessonError> {
        if self.feedback_business_days == 0 {
            return Err(LessonError::InvalidPolicy(
                "feedback_business_days must be at least 1".to_string(),
            ));
        }
        if self.appeal_hours == 0 {
            return Err(LessonError::InvalidPolicy(
                "appeal_hours must be at least 1".to_string(),
            ));
        }
        if self.join_window_minutes > self.upcoming_horizon_minutes {
            return Err(LessonError::InvalidPolicy(format!(
                "join_window_minutes ({}) exceeds upcoming_horizon_minutes ({})",
                self.join_window_minutes, self.upcoming_horizon_minutes
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(LessonPolicy::default().validate().is_ok());
    }

    #[test]
    fn test_default_values() {
        let p = LessonPolicy::default();
        assert_eq!(p.join_window_minutes, 15);
        assert_eq!(p.upcoming_horizon_minutes, 1440);
        assert_eq!(p.feedback_business_days, 7);
        assert_eq!(p.appeal_hours, 24);
        assert_eq!(p.reschedule_offset_minutes, 30);
    }

    #[test]
    fn test_partial_override_keeps_defaults() {
        let p: LessonPolicy = serde_json::from_str(r#"{"appeal_hours": 48}"#).unwrap();
        assert_eq!(p.appeal_hours, 48);
        assert_eq!(p.feedback_business_days, DEFAULT_FEEDBACK_BUSINESS_DAYS);
        assert_eq!(p.join_window_minutes, DEFAULT_JOIN_WINDOW_MINUTES);
    }

    #[test]
    fn test_zero_windows_rejected() {
        let p = LessonPolicy {
            feedback_business_days: 0,
            ..LessonPolicy::default()
        };
        assert!(matches!(p.validate(), Err(LessonError::InvalidPolicy(_))));

        let p = LessonPolicy {
            appeal_hours: 0,
            ..LessonPolicy::default()
        };
        assert!(p.validate().is_err());
    }

    #[test]
    fn test_join_window_beyond_horizon_rejected() {
        let p = LessonPolicy {
            join_window_minutes: 120,
            upcoming_horizon_minutes: 60,
            ..LessonPolicy::default()
        };
        let err = p.validate().unwrap_err();
        assert!(err.to_string().contains("exceeds"));
    }
}
