//! # wemaster-lesson — Lesson Lifecycle Engine
//!
//! Derives a booked lesson's status from its timestamps, decides which
//! action the viewer is offered, validates status transitions against a
//! fixed table, and computes the timestamps a validated transition writes.
//!
//! ## Layers
//!
//! - **Statuses** (`status.rs`): `LessonStatus`, `ButtonStatus`, the static
//!   per-status profile table, and the transition table.
//!
//! - **Engine** (`engine.rs`): `LessonStatusEngine`, pure functions of an
//!   explicit "now" and a `LessonTimeConfig` under a `LessonPolicy`.
//!
//! - **Record** (`record.rs`): `LessonRecord`, the persisted lesson. It
//!   applies a transition only after the table accepts it and keeps a
//!   transition log. Feedback and appeals on a completed lesson are
//!   accepted only while the matching button is offered.
//!
//! ## Known quirks kept for compatibility
//!
//! - Canceling writes `lastAppealTime`, and any `lastAppealTime` on an
//!   uncompleted lesson derives `CANCELED`.
//! - A reschedule without an explicit new start begins 30 minutes after
//!   "now" (the `reschedule_offset_minutes` policy value).

pub mod engine;
pub mod error;
pub mod policy;
pub mod record;
pub mod status;
pub mod time_config;

pub use engine::{LessonStatusEngine, LessonStatusView, TimeLimit};
pub use error::LessonError;
pub use policy::LessonPolicy;
pub use record::{
    LessonAppeal, LessonFeedback, LessonRecord, LessonTransitionRecord, TransitionRequest,
    MAX_RATING, MIN_RATING,
};
pub use status::{
    is_clickable, is_valid_transition, ButtonStatus, LessonStatus, StatusProfile,
    TRANSITION_TABLE,
};
pub use time_config::LessonTimeConfig;
