//! # wemaster-cli — Lesson Lifecycle Command-Line Interface
//!
//! Operates on lesson records stored as JSON files, one `<id>.json` per
//! lesson, in a local state directory.
//!
//! ## Subcommands
//!
//! - `lesson` — create, inspect, transition, refresh and list lessons;
//!   print the transition table; evaluate an ad-hoc time config
//! - `policy` — print the effective lesson policy
//!
//! ## Crate Policy
//!
//! - Argument parsing is separated from business logic.
//! - Handlers delegate to `wemaster-lesson`; no lifecycle rules live here.

pub mod config;
pub mod lesson;
pub mod policy;
pub mod store;
