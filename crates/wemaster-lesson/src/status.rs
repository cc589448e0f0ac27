//! # Lesson and Button Statuses
//!
//! ## Lifecycle
//!
//! ```text
//! Pending ──▶ Scheduled ──▶ Upcoming ──▶ InProcess ──▶ Completed (terminal)
//!    │            │  ▲          │
//!    │            │  │          │
//!    │            ▼  │          │
//!    │       Rescheduled        │
//!    │            │             │
//!    └────────────┴─────────────┴──▶ Canceled (terminal)
//! ```
//!
//! `Rescheduled ──▶ Upcoming` closes the loop back into the time-driven
//! path. `Rescheduling` is a recognized status with no outgoing edges.
//!
//! Both the per-status profile (default button, clickability) and the
//! transition graph are static tables rather than branches, so each can be
//! audited and tested on its own.

use serde::{Deserialize, Serialize};

use crate::error::LessonError;

// ─── Lesson Status ───────────────────────────────────────────────────

/// The lifecycle status of a booked lesson. Mutually exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LessonStatus {
    /// Waiting for the tutor to confirm the booking.
    Pending,
    /// Confirmed and more than a day away.
    Scheduled,
    /// Starts within the next 24 hours.
    Upcoming,
    /// Inside the join window around the lesson slot.
    InProcess,
    /// A reschedule has been requested but not settled.
    Rescheduling,
    /// Moved to a new slot.
    Rescheduled,
    /// Marked complete (terminal).
    Completed,
    /// Canceled (terminal).
    Canceled,
}

impl LessonStatus {
    /// Every status, in declaration order.
    pub const ALL: [LessonStatus; 8] = [
        Self::Pending,
        Self::Scheduled,
        Self::Upcoming,
        Self::InProcess,
        Self::Rescheduling,
        Self::Rescheduled,
        Self::Completed,
        Self::Canceled,
    ];

    /// Canonical display name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Scheduled => "SCHEDULED",
            Self::Upcoming => "UPCOMING",
            Self::InProcess => "IN_PROCESS",
            Self::Rescheduling => "RESCHEDULING",
            Self::Rescheduled => "RESCHEDULED",
            Self::Completed => "COMPLETED",
            Self::Canceled => "CANCELED",
        }
    }

    /// Wire name as persisted in course records.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Scheduled => "scheduled",
            Self::Upcoming => "upcoming",
            Self::InProcess => "in_process",
            Self::Rescheduling => "rescheduling",
            Self::Rescheduled => "rescheduled",
            Self::Completed => "completed",
            Self::Canceled => "canceled",
        }
    }

    /// Whether this status accepts no further transitions.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Canceled)
    }

    /// The static profile row for this status.
    pub fn profile(&self) -> &'static StatusProfile {
        &STATUS_PROFILES[*self as usize]
    }

    /// Statuses reachable in one step, per [`TRANSITION_TABLE`].
    pub fn valid_transitions(&self) -> &'static [LessonStatus] {
        TRANSITION_TABLE
            .iter()
            .find(|(from, _)| from == self)
            .map(|(_, targets)| *targets)
            .unwrap_or(&[])
    }

    /// Whether `to` is reachable from `self` in one step.
    pub fn can_transition_to(&self, to: LessonStatus) -> bool {
        self.valid_transitions().contains(&to)
    }
}

impl std::fmt::Display for LessonStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.name())
    }
}

impl std::str::FromStr for LessonStatus {
    type Err = LessonError;

    /// Accepts the wire form (`in_process`), the display form
    /// (`IN_PROCESS`) and kebab case (`in-process`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('-', "_");
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == normalized)
            .ok_or_else(|| LessonError::UnknownStatus(s.to_string()))
    }
}

// ─── Button Status ───────────────────────────────────────────────────

/// The action currently offered to the viewer of a lesson.
///
/// Derived from the lifecycle status and, for completed lessons, from the
/// feedback and appeal windows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ButtonStatus {
    /// Nothing to do yet.
    Waiting,
    /// Enter the classroom.
    JoinClass,
    /// Confirm or decline a pending booking.
    Manage,
    /// Reschedule or cancel a confirmed lesson.
    ManageLesson,
    /// No action available.
    Invalid,
    /// Rate the completed lesson.
    LeaveFeedback,
    /// File an appeal against the completed lesson.
    Appeal,
    /// View the appeal already on file.
    AppealInfo,
}

impl ButtonStatus {
    /// Canonical display name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Waiting => "WAITING",
            Self::JoinClass => "JOIN_CLASS",
            Self::Manage => "MANAGE",
            Self::ManageLesson => "MANAGE_LESSON",
            Self::Invalid => "INVALID",
            Self::LeaveFeedback => "LEAVE_FEEDBACK",
            Self::Appeal => "APPEAL",
            Self::AppealInfo => "APPEAL_INFO",
        }
    }
}

impl std::fmt::Display for ButtonStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.name())
    }
}

// ─── Status Profiles ─────────────────────────────────────────────────

/// Static per-status presentation data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusProfile {
    /// The status this row describes.
    pub status: LessonStatus,
    /// Button shown when no time-limited override applies.
    pub button_status: ButtonStatus,
    /// Whether the button accepts clicks.
    pub is_clickable: bool,
    /// Whether feedback and appeal windows refine the button.
    pub time_limited: bool,
}

const fn profile(
    status: LessonStatus,
    button_status: ButtonStatus,
    is_clickable: bool,
    time_limited: bool,
) -> StatusProfile {
    StatusProfile {
        status,
        button_status,
        is_clickable,
        time_limited,
    }
}

/// Profile rows, indexed by `LessonStatus` discriminant.
static STATUS_PROFILES: [StatusProfile; 8] = [
    profile(LessonStatus::Pending, ButtonStatus::Manage, true, false),
    profile(LessonStatus::Scheduled, ButtonStatus::ManageLesson, true, false),
    profile(LessonStatus::Upcoming, ButtonStatus::Waiting, false, false),
    profile(LessonStatus::InProcess, ButtonStatus::JoinClass, true, false),
    profile(LessonStatus::Rescheduling, ButtonStatus::ManageLesson, true, false),
    profile(LessonStatus::Rescheduled, ButtonStatus::ManageLesson, true, false),
    profile(LessonStatus::Completed, ButtonStatus::LeaveFeedback, true, true),
    profile(LessonStatus::Canceled, ButtonStatus::Invalid, false, false),
];

// ─── Transition Table ────────────────────────────────────────────────

/// The fixed directed graph of allowed status changes.
///
/// A status missing from the left column has no outgoing edges.
pub static TRANSITION_TABLE: &[(LessonStatus, &[LessonStatus])] = &[
    (
        LessonStatus::Scheduled,
        &[
            LessonStatus::Rescheduled,
            LessonStatus::Canceled,
            LessonStatus::Upcoming,
        ],
    ),
    (
        LessonStatus::Rescheduled,
        &[LessonStatus::Canceled, LessonStatus::Upcoming],
    ),
    (
        LessonStatus::Upcoming,
        &[LessonStatus::InProcess, LessonStatus::Canceled],
    ),
    (LessonStatus::InProcess, &[LessonStatus::Completed]),
    (LessonStatus::Completed, &[]),
    (LessonStatus::Canceled, &[]),
    (
        LessonStatus::Pending,
        &[LessonStatus::Scheduled, LessonStatus::Canceled],
    ),
];

/// Whether `from -> to` is an edge of [`TRANSITION_TABLE`].
///
/// Validation only. Callers apply the change themselves once this passes.
pub fn is_valid_transition(from: LessonStatus, to: LessonStatus) -> bool {
    from.can_transition_to(to)
}

/// Whether the button for `status` accepts clicks.
pub fn is_clickable(status: LessonStatus) -> bool {
    status.profile().is_clickable
}
