//! # Lesson Time Config
//!
//! The timestamps a course/session record persists for one lesson. All
//! status derivation reads from this struct and nothing else.

use serde::{Deserialize, Serialize};

use wemaster_core::Timestamp;

use crate::error::LessonError;

/// Scheduled window and lifecycle marks of a lesson.
///
/// `last_appeal_time` is also written when a lesson is canceled, and its
/// presence alone makes an uncompleted lesson derive as canceled. An
/// appeal filed on a completed lesson and a cancellation are therefore
/// indistinguishable in this struct.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LessonTimeConfig {
    /// Scheduled start.
    pub start_time: Timestamp,
    /// Scheduled end.
    pub end_time: Timestamp,
    /// Set once the lesson is marked complete.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_time: Option<Timestamp>,
    /// Set when feedback is submitted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_feedback_time: Option<Timestamp>,
    /// Set when an appeal or a cancellation is recorded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_appeal_time: Option<Timestamp>,
}

impl LessonTimeConfig {
    /// A freshly booked slot with no lifecycle marks.
    pub fn new(start_time: Timestamp, end_time: Timestamp) -> Self {
        Self {
            start_time,
            end_time,
            completed_time: None,
            last_feedback_time: None,
            last_appeal_time: None,
        }
    }

    /// Copy with `completed_time` set.
    pub fn with_completed_time(self, at: Timestamp) -> Self {
        Self {
            completed_time: Some(at),
            ..self
        }
    }

    /// Copy with `last_feedback_time` set.
    pub fn with_feedback_time(self, at: Timestamp) -> Self {
        Self {
            last_feedback_time: Some(at),
            ..self
        }
    }

    /// Copy with `last_appeal_time` set.
    pub fn with_appeal_time(self, at: Timestamp) -> Self {
        Self {
            last_appeal_time: Some(at),
            ..self
        }
    }

    /// Scheduled length in seconds.
    pub fn duration_secs(&self) -> i64 {
        self.end_time.seconds_since(&self.start_time)
    }

    /// Structural well-formedness check for callers.
    ///
    /// The engine never calls this; it assumes well-formed input.
    pub fn validate(&self) -> Result<(), LessonError> {
        if self.end_time < self.start_time {
            return Err(LessonError::MalformedTimeConfig(format!(
                "endTime {} precedes startTime {}",
                self.end_time, self.start_time
            )));
        }
        Ok(())
    }
}
