//! # Lesson Record
//!
//! The caller side of the engine: a persisted lesson with its stored
//! status and transition history. Every transition is checked against the
//! transition table before any field changes, so a rejected request leaves
//! the record exactly as it was.

use serde::{Deserialize, Serialize};

use wemaster_core::{LessonId, Timestamp};

use crate::engine::{LessonStatusEngine, LessonStatusView};
use crate::error::LessonError;
use crate::status::{ButtonStatus, LessonStatus};
use crate::time_config::LessonTimeConfig;

/// Lowest accepted feedback rating.
pub const MIN_RATING: u8 = 1;
/// Highest accepted feedback rating.
pub const MAX_RATING: u8 = 5;

/// An actor's request to move a lesson to another status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionRequest {
    /// Requested status.
    pub to: LessonStatus,
    /// Free-text reason recorded in the log.
    pub reason: Option<String>,
    /// New start time; only meaningful when `to` is `RESCHEDULED`.
    pub reschedule_start: Option<Timestamp>,
}

impl TransitionRequest {
    /// A request with no reason and no new start.
    pub fn to(status: LessonStatus) -> Self {
        Self {
            to: status,
            reason: None,
            reschedule_start: None,
        }
    }

    /// Attach a reason.
    pub fn with_reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = Some(reason.into());
        self
    }

    /// Attach the new start of a reschedule.
    pub fn with_reschedule_start(mut self, start: Timestamp) -> Self {
        self.reschedule_start = Some(start);
        self
    }
}

/// Record of an applied transition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LessonTransitionRecord {
    /// Status before the transition.
    pub from_state: LessonStatus,
    /// Status after the transition.
    pub to_state: LessonStatus,
    /// When the transition was applied.
    pub timestamp: Timestamp,
    /// Reason given by the actor.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

/// The viewer's rating of a completed lesson.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LessonFeedback {
    /// Rating from 1 to 5.
    pub rating: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    pub created_at: Timestamp,
}

/// An appeal filed against a completed lesson.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LessonAppeal {
    pub reason: String,
    pub created_at: Timestamp,
}

/// A lesson as the booking service persists it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LessonRecord {
    /// Lesson identifier.
    pub id: LessonId,
    /// Stored lifecycle status.
    pub status: LessonStatus,
    /// Scheduled window and lifecycle marks.
    pub time_config: LessonTimeConfig,
    /// When the record was created.
    pub created_at: Timestamp,
    /// When the record last changed.
    pub updated_at: Timestamp,
    /// Ordered log of applied transitions.
    #[serde(default)]
    pub transitions: Vec<LessonTransitionRecord>,
    /// Latest feedback, once submitted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feedback: Option<LessonFeedback>,
    /// The appeal on file, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub appeal: Option<LessonAppeal>,
}

impl LessonRecord {
    /// A new booking awaiting tutor confirmation.
    pub fn new(
        id: LessonId,
        time_config: LessonTimeConfig,
        now: Timestamp,
    ) -> Result<Self, LessonError> {
        Self::with_status(id, LessonStatus::Pending, time_config, now)
    }

    /// A booking that is already confirmed.
    pub fn scheduled(
        id: LessonId,
        time_config: LessonTimeConfig,
        now: Timestamp,
    ) -> Result<Self, LessonError> {
        Self::with_status(id, LessonStatus::Scheduled, time_config, now)
    }

    fn with_status(
        id: LessonId,
        status: LessonStatus,
        time_config: LessonTimeConfig,
        now: Timestamp,
    ) -> Result<Self, LessonError> {
        time_config.validate()?;
        Ok(Self {
            id,
            status,
            time_config,
            created_at: now,
            updated_at: now,
            transitions: Vec::new(),
            feedback: None,
            appeal: None,
        })
    }

    /// Whether the stored status is terminal.
    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }

    /// The status a viewer should see at `now`.
    ///
    /// Pending, rescheduling and terminal records keep their stored status.
    /// Everything else follows the clock forward only: a derived status
    /// that is not ahead of the stored one in the lifecycle is ignored. A
    /// rescheduled record therefore stays rescheduled until its new slot
    /// comes within the upcoming horizon, and a lesson that overruns its
    /// join window stays in process until someone completes it.
    pub fn effective_status(&self, engine: &LessonStatusEngine, now: &Timestamp) -> LessonStatus {
        match self.status {
            LessonStatus::Pending | LessonStatus::Rescheduling => self.status,
            s if s.is_terminal() => s,
            stored => {
                let derived = engine.derive_status(now, &self.time_config);
                if clock_rank(derived) > clock_rank(stored) {
                    derived
                } else {
                    stored
                }
            }
        }
    }

    /// Store the effective status if it moved with the clock.
    ///
    /// Returns the new status when it changed.
    pub fn refresh(&mut self, engine: &LessonStatusEngine, now: Timestamp) -> Option<LessonStatus> {
        let effective = self.effective_status(engine, &now);
        if effective == self.status {
            return None;
        }
        tracing::debug!(
            lesson = %self.id,
            from = %self.status,
            to = %effective,
            "lesson status advanced by clock"
        );
        self.status = effective;
        self.updated_at = now;
        Some(effective)
    }

    /// Validate and apply an actor-driven transition.
    pub fn try_transition(
        &mut self,
        engine: &LessonStatusEngine,
        now: Timestamp,
        request: TransitionRequest,
    ) -> Result<(), LessonError> {
        if let Err(err) = self.check_transition(engine, &request) {
            tracing::warn!(lesson = %self.id, error = %err, "lesson transition rejected");
            return Err(err);
        }

        let from = self.status;
        self.time_config = engine.compute_transition_time_config(
            &now,
            from,
            request.to,
            &self.time_config,
            request.reschedule_start,
        );
        self.transitions.push(LessonTransitionRecord {
            from_state: from,
            to_state: request.to,
            timestamp: now,
            reason: request.reason,
        });
        self.status = request.to;
        self.updated_at = now;

        tracing::debug!(lesson = %self.id, %from, to = %self.status, "lesson transition applied");
        Ok(())
    }

    /// Record feedback on a completed lesson.
    ///
    /// Accepted while the lesson offers `LEAVE_FEEDBACK` or `APPEAL`. A
    /// later submission replaces the earlier one and moves
    /// `lastFeedbackTime`.
    pub fn submit_feedback(
        &mut self,
        engine: &LessonStatusEngine,
        now: Timestamp,
        rating: u8,
        comment: Option<String>,
    ) -> Result<(), LessonError> {
        let button = self.offered_button(engine, &now);
        let check = if !matches!(button, ButtonStatus::LeaveFeedback | ButtonStatus::Appeal) {
            Err(LessonError::ActionUnavailable {
                action: "leave feedback",
                button,
            })
        } else if !(MIN_RATING..=MAX_RATING).contains(&rating) {
            Err(LessonError::InvalidRequest(format!(
                "rating must be between {MIN_RATING} and {MAX_RATING}, got {rating}"
            )))
        } else {
            Ok(())
        };
        if let Err(err) = check {
            tracing::warn!(lesson = %self.id, error = %err, "lesson feedback rejected");
            return Err(err);
        }

        self.time_config = self.time_config.with_feedback_time(now);
        self.feedback = Some(LessonFeedback {
            rating,
            comment,
            created_at: now,
        });
        self.updated_at = now;

        tracing::debug!(lesson = %self.id, rating, "lesson feedback recorded");
        Ok(())
    }

    /// File an appeal against a completed lesson.
    ///
    /// Only accepted while the lesson offers `APPEAL`. Writes
    /// `lastAppealTime`, after which the lesson offers `APPEAL_INFO`.
    pub fn file_appeal(
        &mut self,
        engine: &LessonStatusEngine,
        now: Timestamp,
        reason: impl Into<String>,
    ) -> Result<(), LessonError> {
        let reason = reason.into();
        let button = self.offered_button(engine, &now);
        let check = if button != ButtonStatus::Appeal {
            Err(LessonError::ActionUnavailable {
                action: "file an appeal",
                button,
            })
        } else if reason.trim().is_empty() {
            Err(LessonError::InvalidRequest(
                "an appeal needs a reason".to_string(),
            ))
        } else {
            Ok(())
        };
        if let Err(err) = check {
            tracing::warn!(lesson = %self.id, error = %err, "lesson appeal rejected");
            return Err(err);
        }

        self.time_config = self.time_config.with_appeal_time(now);
        self.appeal = Some(LessonAppeal {
            reason,
            created_at: now,
        });
        self.updated_at = now;

        tracing::debug!(lesson = %self.id, "lesson appeal filed");
        Ok(())
    }

    /// The client view at `now`, built around the effective status.
    pub fn view(&self, engine: &LessonStatusEngine, now: &Timestamp) -> LessonStatusView {
        engine.view_for(now, self.effective_status(engine, now), &self.time_config)
    }

    fn offered_button(&self, engine: &LessonStatusEngine, now: &Timestamp) -> ButtonStatus {
        engine.derive_button_status(now, self.effective_status(engine, now), &self.time_config)
    }

    fn check_transition(
        &self,
        engine: &LessonStatusEngine,
        request: &TransitionRequest,
    ) -> Result<(), LessonError> {
        if self.status.is_terminal() {
            return Err(LessonError::TerminalState { state: self.status });
        }
        if !engine.is_valid_transition(self.status, request.to) {
            return Err(LessonError::InvalidTransition {
                from: self.status,
                to: request.to,
            });
        }
        if request.reschedule_start.is_some() && request.to != LessonStatus::Rescheduled {
            return Err(LessonError::InvalidRequest(format!(
                "a new start time only applies to {}, not {}",
                LessonStatus::Rescheduled,
                request.to
            )));
        }
        Ok(())
    }
}

/// Position along the time-driven path. Scheduled and rescheduled share
/// the first step; the clock can only move a record to a higher one.
fn clock_rank(status: LessonStatus) -> u8 {
    match status {
        LessonStatus::Pending
        | LessonStatus::Rescheduling
        | LessonStatus::Scheduled
        | LessonStatus::Rescheduled => 0,
        LessonStatus::Upcoming => 1,
        LessonStatus::InProcess => 2,
        LessonStatus::Completed | LessonStatus::Canceled => 3,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ts(s: &str) -> Timestamp {
        Timestamp::parse(s).unwrap()
    }

    fn engine() -> LessonStatusEngine {
        LessonStatusEngine::default()
    }

    fn slot() -> LessonTimeConfig {
        LessonTimeConfig::new(ts("2024-01-10T10:00:00Z"), ts("2024-01-10T11:00:00Z"))
    }

    fn booked_at() -> Timestamp {
        ts("2024-01-01T09:00:00Z")
    }

    fn make_pending() -> LessonRecord {
        LessonRecord::new(LessonId::new(), slot(), booked_at()).unwrap()
    }

    fn make_scheduled() -> LessonRecord {
        LessonRecord::scheduled(LessonId::new(), slot(), booked_at()).unwrap()
    }

    // ── Construction ─────────────────────────────────────────────────

    #[test]
    fn test_new_is_pending() {
        let lesson = make_pending();
        assert_eq!(lesson.status, LessonStatus::Pending);
        assert!(lesson.transitions.is_empty());
        assert!(!lesson.is_terminal());
    }

    #[test]
    fn test_new_rejects_inverted_window() {
        let cfg = LessonTimeConfig::new(ts("2024-01-10T11:00:00Z"), ts("2024-01-10T10:00:00Z"));
        let result = LessonRecord::new(LessonId::new(), cfg, booked_at());
        assert!(matches!(result, Err(LessonError::MalformedTimeConfig(_))));
    }

    // ── Happy path ───────────────────────────────────────────────────

    #[test]
    fn test_full_lifecycle_pending_through_completed() {
        let e = engine();
        let mut lesson = make_pending();
        lesson
            .try_transition(&e, ts("2024-01-02T09:00:00Z"), TransitionRequest::to(LessonStatus::Scheduled))
            .unwrap();
        lesson
            .try_transition(&e, ts("2024-01-09T12:00:00Z"), TransitionRequest::to(LessonStatus::Upcoming))
            .unwrap();
        lesson
            .try_transition(&e, ts("2024-01-10T09:50:00Z"), TransitionRequest::to(LessonStatus::InProcess))
            .unwrap();
        let done = ts("2024-01-10T11:01:00Z");
        lesson
            .try_transition(&e, done, TransitionRequest::to(LessonStatus::Completed))
            .unwrap();

        assert!(lesson.is_terminal());
        assert_eq!(lesson.transitions.len(), 4);
        assert_eq!(lesson.time_config.completed_time, Some(done));
        assert_eq!(lesson.updated_at, done);
    }

    #[test]
    fn test_cancel_records_reason_and_mark() {
        let mut lesson = make_scheduled();
        let now = ts("2024-01-05T09:00:00Z");
        lesson
            .try_transition(
                &engine(),
                now,
                TransitionRequest::to(LessonStatus::Canceled).with_reason("student ill"),
            )
            .unwrap();
        assert_eq!(lesson.status, LessonStatus::Canceled);
        assert_eq!(lesson.time_config.last_appeal_time, Some(now));
        let log = &lesson.transitions[0];
        assert_eq!(log.from_state, LessonStatus::Scheduled);
        assert_eq!(log.to_state, LessonStatus::Canceled);
        assert_eq!(log.reason.as_deref(), Some("student ill"));
    }

    #[test]
    fn test_reschedule_to_requested_slot() {
        let mut lesson = make_scheduled();
        let new_start = ts("2024-01-12T15:00:00Z");
        lesson
            .try_transition(
                &engine(),
                ts("2024-01-05T09:00:00Z"),
                TransitionRequest::to(LessonStatus::Rescheduled).with_reschedule_start(new_start),
            )
            .unwrap();
        assert_eq!(lesson.status, LessonStatus::Rescheduled);
        assert_eq!(lesson.time_config.start_time, new_start);
        assert_eq!(lesson.time_config.end_time, ts("2024-01-12T16:00:00Z"));
    }

    // ── Rejections ───────────────────────────────────────────────────

    #[test]
    fn test_invalid_transition_leaves_record_untouched() {
        let mut lesson = make_pending();
        let before = lesson.clone();
        let err = lesson
            .try_transition(&engine(), ts("2024-01-02T09:00:00Z"), TransitionRequest::to(LessonStatus::Completed))
            .unwrap_err();
        assert_eq!(
            err,
            LessonError::InvalidTransition {
                from: LessonStatus::Pending,
                to: LessonStatus::Completed
            }
        );
        assert_eq!(lesson, before);
    }

    #[test]
    fn test_terminal_state_rejected() {
        let mut lesson = make_scheduled();
        let e = engine();
        lesson
            .try_transition(&e, ts("2024-01-05T09:00:00Z"), TransitionRequest::to(LessonStatus::Canceled))
            .unwrap();
        let err = lesson
            .try_transition(&e, ts("2024-01-05T10:00:00Z"), TransitionRequest::to(LessonStatus::Scheduled))
            .unwrap_err();
        assert_eq!(
            err,
            LessonError::TerminalState {
                state: LessonStatus::Canceled
            }
        );
        assert_eq!(lesson.transitions.len(), 1);
    }

    #[test]
    fn test_reschedule_start_on_other_target_rejected() {
        let mut lesson = make_scheduled();
        let err = lesson
            .try_transition(
                &engine(),
                ts("2024-01-05T09:00:00Z"),
                TransitionRequest::to(LessonStatus::Canceled)
                    .with_reschedule_start(ts("2024-01-12T15:00:00Z")),
            )
            .unwrap_err();
        assert!(matches!(err, LessonError::InvalidRequest(_)));
        assert_eq!(lesson.status, LessonStatus::Scheduled);
    }

    #[test]
    fn test_error_messages_name_states() {
        let err = LessonError::InvalidTransition {
            from: LessonStatus::InProcess,
            to: LessonStatus::Canceled,
        };
        assert_eq!(err.to_string(), "invalid status transition: IN_PROCESS -> CANCELED");
    }

    // ── Clock-driven status ──────────────────────────────────────────

    #[test]
    fn test_refresh_follows_the_clock() {
        let e = engine();
        let mut lesson = make_scheduled();
        assert_eq!(lesson.refresh(&e, ts("2024-01-05T09:00:00Z")), None);
        assert_eq!(
            lesson.refresh(&e, ts("2024-01-09T12:00:00Z")),
            Some(LessonStatus::Upcoming)
        );
        assert_eq!(
            lesson.refresh(&e, ts("2024-01-10T09:50:00Z")),
            Some(LessonStatus::InProcess)
        );
        assert!(lesson.transitions.is_empty());
    }

    #[test]
    fn test_refresh_leaves_pending_alone() {
        let mut lesson = make_pending();
        assert_eq!(lesson.refresh(&engine(), ts("2024-01-10T10:05:00Z")), None);
        assert_eq!(lesson.status, LessonStatus::Pending);
    }

    #[test]
    fn test_rescheduled_stays_until_upcoming() {
        let e = engine();
        let mut lesson = make_scheduled();
        lesson
            .try_transition(
                &e,
                ts("2024-01-05T09:00:00Z"),
                TransitionRequest::to(LessonStatus::Rescheduled)
                    .with_reschedule_start(ts("2024-01-20T10:00:00Z")),
            )
            .unwrap();
        assert_eq!(lesson.refresh(&e, ts("2024-01-06T09:00:00Z")), None);
        assert_eq!(
            lesson.refresh(&e, ts("2024-01-19T12:00:00Z")),
            Some(LessonStatus::Upcoming)
        );
    }

    #[test]
    fn test_refresh_never_moves_back_to_scheduled() {
        let e = engine();
        let mut lesson = make_scheduled();
        assert_eq!(
            lesson.refresh(&e, ts("2024-01-10T10:05:00Z")),
            Some(LessonStatus::InProcess)
        );
        // Past the join window the clock alone would say SCHEDULED again.
        assert_eq!(lesson.refresh(&e, ts("2024-01-10T11:20:00Z")), None);
        assert_eq!(lesson.status, LessonStatus::InProcess);
        assert_eq!(
            lesson.effective_status(&e, &ts("2024-01-12T09:00:00Z")),
            LessonStatus::InProcess
        );

        lesson
            .try_transition(&e, ts("2024-01-10T11:20:00Z"), TransitionRequest::to(LessonStatus::Completed))
            .unwrap();
        assert_eq!(lesson.status, LessonStatus::Completed);
    }

    #[test]
    fn test_upcoming_is_not_demoted_after_the_slot_passes() {
        let e = engine();
        let mut lesson = make_scheduled();
        lesson.refresh(&e, ts("2024-01-09T12:00:00Z"));
        assert_eq!(lesson.status, LessonStatus::Upcoming);
        // Never refreshed during the slot; the clock jumps an hour past it.
        assert_eq!(
            lesson.refresh(&e, ts("2024-01-10T12:00:00Z")),
            None
        );
        assert_eq!(lesson.status, LessonStatus::Upcoming);
    }

    #[test]
    fn test_view_of_completed_lesson() {
        let e = engine();
        let mut lesson = make_scheduled();
        lesson.status = LessonStatus::InProcess;
        lesson
            .try_transition(&e, ts("2024-01-10T11:00:00Z"), TransitionRequest::to(LessonStatus::Completed))
            .unwrap();
        let view = lesson.view(&e, &ts("2024-01-10T20:00:00Z"));
        assert_eq!(view.status, LessonStatus::Completed);
        assert_eq!(view.button_status, ButtonStatus::Appeal);
    }

    // ── Feedback and appeals ─────────────────────────────────────────

    fn make_completed() -> LessonRecord {
        let mut lesson = make_scheduled();
        lesson.status = LessonStatus::InProcess;
        lesson
            .try_transition(&engine(), ts("2024-01-10T11:00:00Z"), TransitionRequest::to(LessonStatus::Completed))
            .unwrap();
        lesson
    }

    #[test]
    fn test_feedback_within_appeal_window() {
        let mut lesson = make_completed();
        let now = ts("2024-01-10T12:00:00Z");
        lesson
            .submit_feedback(&engine(), now, 5, Some("great lesson".to_string()))
            .unwrap();
        assert_eq!(lesson.time_config.last_feedback_time, Some(now));
        let feedback = lesson.feedback.as_ref().unwrap();
        assert_eq!(feedback.rating, 5);
        assert_eq!(feedback.comment.as_deref(), Some("great lesson"));
        assert_eq!(lesson.updated_at, now);
    }

    #[test]
    fn test_later_feedback_replaces_earlier() {
        let e = engine();
        let mut lesson = make_completed();
        lesson.submit_feedback(&e, ts("2024-01-10T12:00:00Z"), 3, None).unwrap();
        let later = ts("2024-01-12T09:00:00Z");
        lesson.submit_feedback(&e, later, 4, None).unwrap();
        assert_eq!(lesson.feedback.as_ref().map(|f| f.rating), Some(4));
        assert_eq!(lesson.time_config.last_feedback_time, Some(later));
    }

    #[test]
    fn test_feedback_rejected_after_window_closes() {
        let mut lesson = make_completed();
        let before = lesson.clone();
        let err = lesson
            .submit_feedback(&engine(), ts("2024-01-22T09:00:00Z"), 4, None)
            .unwrap_err();
        assert_eq!(
            err,
            LessonError::ActionUnavailable {
                action: "leave feedback",
                button: ButtonStatus::Invalid
            }
        );
        assert_eq!(lesson, before);
    }

    #[test]
    fn test_feedback_rejected_before_completion() {
        let mut lesson = make_scheduled();
        let err = lesson
            .submit_feedback(&engine(), ts("2024-01-05T09:00:00Z"), 4, None)
            .unwrap_err();
        assert!(matches!(
            err,
            LessonError::ActionUnavailable {
                button: ButtonStatus::ManageLesson,
                ..
            }
        ));
        assert_eq!(lesson.time_config.last_feedback_time, None);
    }

    #[test]
    fn test_feedback_rating_out_of_range() {
        let mut lesson = make_completed();
        let e = engine();
        for rating in [0, 6] {
            let err = lesson
                .submit_feedback(&e, ts("2024-01-10T12:00:00Z"), rating, None)
                .unwrap_err();
            assert!(matches!(err, LessonError::InvalidRequest(_)));
        }
        assert!(lesson.feedback.is_none());
    }

    #[test]
    fn test_appeal_within_window_shows_info() {
        let e = engine();
        let mut lesson = make_completed();
        let now = ts("2024-01-10T20:00:00Z");
        lesson.file_appeal(&e, now, "tutor left early").unwrap();
        assert_eq!(lesson.time_config.last_appeal_time, Some(now));
        assert_eq!(lesson.appeal.as_ref().map(|a| a.reason.as_str()), Some("tutor left early"));

        let view = lesson.view(&e, &ts("2024-01-10T21:00:00Z"));
        assert_eq!(view.status, LessonStatus::Completed);
        assert_eq!(view.button_status, ButtonStatus::AppealInfo);
        assert_eq!(view.appeal_deadline, None);
    }

    #[test]
    fn test_second_appeal_rejected() {
        let e = engine();
        let mut lesson = make_completed();
        lesson.file_appeal(&e, ts("2024-01-10T20:00:00Z"), "tutor left early").unwrap();
        let err = lesson
            .file_appeal(&e, ts("2024-01-10T21:00:00Z"), "again")
            .unwrap_err();
        assert_eq!(
            err,
            LessonError::ActionUnavailable {
                action: "file an appeal",
                button: ButtonStatus::AppealInfo
            }
        );
    }

    #[test]
    fn test_appeal_rejected_after_window() {
        let mut lesson = make_completed();
        let err = lesson
            .file_appeal(&engine(), ts("2024-01-11T12:00:00Z"), "too late")
            .unwrap_err();
        assert!(matches!(
            err,
            LessonError::ActionUnavailable {
                button: ButtonStatus::LeaveFeedback,
                ..
            }
        ));
        assert!(lesson.appeal.is_none());
    }

    #[test]
    fn test_appeal_needs_reason() {
        let mut lesson = make_completed();
        let err = lesson
            .file_appeal(&engine(), ts("2024-01-10T20:00:00Z"), "   ")
            .unwrap_err();
        assert!(matches!(err, LessonError::InvalidRequest(_)));
        assert_eq!(lesson.time_config.last_appeal_time, None);
    }

    #[test]
    fn test_record_serialization_roundtrip() {
        let mut lesson = make_scheduled();
        lesson
            .try_transition(
                &engine(),
                ts("2024-01-05T09:00:00Z"),
                TransitionRequest::to(LessonStatus::Canceled).with_reason("tutor unavailable"),
            )
            .unwrap();
        let json = serde_json::to_string(&lesson).unwrap();
        let parsed: LessonRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, lesson);
    }
}
