//! # Lesson Errors
//!
//! The engine's derivation functions are total and never fail. These
//! errors belong to the caller-side steps around it: well-formedness
//! checks, policy validation, status parsing, and applying a transition
//! to a [`LessonRecord`](crate::LessonRecord).

use thiserror::Error;

use crate::status::{ButtonStatus, LessonStatus};

/// Errors raised around the lesson lifecycle.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LessonError {
    /// The pair is not in the transition table.
    #[error("invalid status transition: {from} -> {to}")]
    InvalidTransition {
        /// Current status.
        from: LessonStatus,
        /// Requested status.
        to: LessonStatus,
    },

    /// The lesson is completed or canceled and accepts no transitions.
    #[error("lesson is in terminal state {state}")]
    TerminalState {
        /// The terminal status.
        state: LessonStatus,
    },

    /// The time config is structurally malformed.
    #[error("malformed lesson time config: {0}")]
    MalformedTimeConfig(String),

    /// A status string did not name any lesson status.
    #[error("unknown lesson status: {0:?}")]
    UnknownStatus(String),

    /// A lesson policy carries unusable thresholds.
    #[error("invalid lesson policy: {0}")]
    InvalidPolicy(String),

    /// A transition, feedback or appeal request is malformed.
    #[error("invalid lesson request: {0}")]
    InvalidRequest(String),

    /// The lesson does not currently offer the requested action.
    #[error("cannot {action} while the lesson offers {button}")]
    ActionUnavailable {
        /// What was attempted.
        action: &'static str,
        /// The button the lesson offers instead.
        button: ButtonStatus,
    },
}
