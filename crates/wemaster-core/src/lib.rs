//! # wemaster-core — Foundational Types for the Lesson Lifecycle
//!
//! Defines the primitives every other `wemaster-*` crate builds on. It
//! depends on nothing internal.
//!
//! ## Key Design Principles
//!
//! 1. **UTC-only timestamps.** The `Timestamp` type is UTC with seconds
//!    precision. Course and session records persist instants, never local
//!    wall-clock times.
//!
//! 2. **Calendar arithmetic in one place.** Whole-minute and whole-hour
//!    differences truncate toward zero; business days skip Saturday and
//!    Sunday. Lesson windows and deadlines are computed only through
//!    [`calendar`].
//!
//! 3. **Newtype identifiers.** `LessonId` is a distinct type, not a bare
//!    string or UUID.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `wemaster-*` crates.
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod calendar;
pub mod error;
pub mod identity;
pub mod temporal;

pub use calendar::{add_business_days, business_days_between, is_business_day};
pub use error::{CoreError, ValidationError};
pub use identity::LessonId;
pub use temporal::Timestamp;
