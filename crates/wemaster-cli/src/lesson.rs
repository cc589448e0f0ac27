//! # Lesson Subcommand
//!
//! Lesson lifecycle commands over the local record store.
//!
//! ## Subcommands
//!
//! - `create` — Book a lesson (PENDING, or SCHEDULED with `--scheduled`).
//! - `status` — Show the status view of a lesson.
//! - `transition` — Validate and apply a status transition.
//! - `refresh` — Store the status the clock has moved a lesson to.
//! - `feedback` — Rate a completed lesson.
//! - `appeal` — File an appeal against a completed lesson.
//! - `list` — List all lessons with their current status.
//! - `table` — Print the transition table.
//! - `evaluate` — Evaluate a time config without storing anything.

use anyhow::{Context, Result};
use clap::{Args, Subcommand};

use wemaster_core::{LessonId, Timestamp};
use wemaster_lesson::{
    LessonRecord, LessonStatus, LessonStatusView, LessonTimeConfig, TransitionRequest,
};

use crate::config::CliContext;
use crate::store;

/// Arguments for the `wemaster lesson` subcommand.
#[derive(Args, Debug)]
pub struct LessonArgs {
    #[command(subcommand)]
    pub command: LessonCommand,
}

/// Lesson subcommands.
#[derive(Subcommand, Debug)]
pub enum LessonCommand {
    /// Book a new lesson.
    Create {
        /// Scheduled start (RFC 3339).
        #[arg(long)]
        start: Timestamp,
        /// Scheduled end (RFC 3339).
        #[arg(long)]
        end: Timestamp,
        /// Book as already confirmed (SCHEDULED) instead of PENDING.
        #[arg(long)]
        scheduled: bool,
    },

    /// Show the current status view of a lesson.
    Status {
        /// Lesson identifier.
        #[arg(long)]
        id: LessonId,
        /// Print as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Validate and apply a status transition.
    Transition {
        /// Lesson identifier.
        #[arg(long)]
        id: LessonId,
        /// Target status (e.g. `canceled`, `IN_PROCESS`).
        #[arg(long)]
        to: LessonStatus,
        /// Reason recorded in the transition log.
        #[arg(long)]
        reason: Option<String>,
        /// New start time for a reschedule (RFC 3339).
        #[arg(long)]
        reschedule_start: Option<Timestamp>,
    },

    /// Store the status the clock has moved a lesson to.
    Refresh {
        /// Lesson identifier.
        #[arg(long)]
        id: LessonId,
    },

    /// Rate a completed lesson.
    Feedback {
        /// Lesson identifier.
        #[arg(long)]
        id: LessonId,
        /// Rating from 1 to 5.
        #[arg(long)]
        rating: u8,
        /// Optional comment.
        #[arg(long)]
        comment: Option<String>,
    },

    /// File an appeal against a completed lesson.
    Appeal {
        /// Lesson identifier.
        #[arg(long)]
        id: LessonId,
        /// Why the lesson is being appealed.
        #[arg(long)]
        reason: String,
    },

    /// List all lessons.
    List,

    /// Print the transition table.
    Table,

    /// Evaluate a time config without storing anything.
    Evaluate {
        /// Scheduled start (RFC 3339).
        #[arg(long)]
        start: Timestamp,
        /// Scheduled end (RFC 3339).
        #[arg(long)]
        end: Timestamp,
        /// Completion time.
        #[arg(long)]
        completed: Option<Timestamp>,
        /// Last feedback time.
        #[arg(long)]
        feedback: Option<Timestamp>,
        /// Last appeal (or cancellation) time.
        #[arg(long)]
        appeal: Option<Timestamp>,
        /// Print as JSON.
        #[arg(long)]
        json: bool,
    },
}

/// Execute the lesson subcommand.
pub fn run_lesson(args: &LessonArgs, ctx: &CliContext) -> Result<u8> {
    match &args.command {
        LessonCommand::Create {
            start,
            end,
            scheduled,
        } => cmd_create(ctx, *start, *end, *scheduled).map(|_| 0),

        LessonCommand::Status { id, json } => cmd_status(ctx, id, *json),

        LessonCommand::Transition {
            id,
            to,
            reason,
            reschedule_start,
        } => {
            let mut request = TransitionRequest::to(*to);
            request.reason = reason.clone();
            request.reschedule_start = *reschedule_start;
            cmd_transition(ctx, id, request)
        }

        LessonCommand::Refresh { id } => cmd_refresh(ctx, id),

        LessonCommand::Feedback {
            id,
            rating,
            comment,
        } => cmd_feedback(ctx, id, *rating, comment.clone()),

        LessonCommand::Appeal { id, reason } => cmd_appeal(ctx, id, reason),

        LessonCommand::List => cmd_list(ctx),

        LessonCommand::Table => cmd_table(),

        LessonCommand::Evaluate {
            start,
            end,
            completed,
            feedback,
            appeal,
            json,
        } => {
            let config = LessonTimeConfig {
                start_time: *start,
                end_time: *end,
                completed_time: *completed,
                last_feedback_time: *feedback,
                last_appeal_time: *appeal,
            };
            cmd_evaluate(ctx, &config, *json)
        }
    }
}

/// Create a lesson record and print its id.
fn cmd_create(ctx: &CliContext, start: Timestamp, end: Timestamp, scheduled: bool) -> Result<LessonId> {
    let config = LessonTimeConfig::new(start, end);
    let id = LessonId::new();
    let record = if scheduled {
        LessonRecord::scheduled(id, config, ctx.now)
    } else {
        LessonRecord::new(id, config, ctx.now)
    }
    .context("cannot book lesson")?;

    store::save(&ctx.state_dir, &record)?;
    tracing::info!(lesson = %id, status = %record.status, "lesson created");

    println!("OK: created lesson {id} in {} state", record.status);
    Ok(id)
}

/// Show the status view of a stored lesson.
fn cmd_status(ctx: &CliContext, id: &LessonId, json: bool) -> Result<u8> {
    let record = store::load(&ctx.state_dir, id)?;
    let view = record.view(&ctx.engine, &ctx.now);

    if json {
        println!("{}", serde_json::to_string_pretty(&view)?);
        return Ok(0);
    }

    println!("Lesson: {id}");
    print_view(&view);
    println!("  Stored status: {}", record.status);
    if let Some(feedback) = &record.feedback {
        match &feedback.comment {
            Some(comment) => println!("  Feedback: {}/5 ({comment})", feedback.rating),
            None => println!("  Feedback: {}/5", feedback.rating),
        }
    }
    if let Some(appeal) = &record.appeal {
        println!("  Appeal: {} (filed {})", appeal.reason, appeal.created_at);
    }
    println!("  Transitions: {}", record.transitions.len());
    for (i, t) in record.transitions.iter().enumerate() {
        match &t.reason {
            Some(reason) => println!(
                "    [{i}] {} → {} at {} ({reason})",
                t.from_state, t.to_state, t.timestamp
            ),
            None => println!("    [{i}] {} → {} at {}", t.from_state, t.to_state, t.timestamp),
        }
    }
    Ok(0)
}

/// Apply a transition after bringing the stored status up to the clock.
fn cmd_transition(ctx: &CliContext, id: &LessonId, request: TransitionRequest) -> Result<u8> {
    let mut record = store::load(&ctx.state_dir, id)?;
    record.refresh(&ctx.engine, ctx.now);

    let from = record.status;
    let to = request.to;
    record
        .try_transition(&ctx.engine, ctx.now, request)
        .with_context(|| {
            format!(
                "lesson {id} rejected {from} → {to} (valid targets: {})",
                format_targets(from)
            )
        })?;

    store::save(&ctx.state_dir, &record)?;
    tracing::info!(lesson = %id, %from, %to, "lesson transitioned");

    println!("OK: lesson {id} transitioned {from} → {to}");
    Ok(0)
}

/// Persist the clock-driven status of a lesson.
fn cmd_refresh(ctx: &CliContext, id: &LessonId) -> Result<u8> {
    let mut record = store::load(&ctx.state_dir, id)?;
    let before = record.status;
    match record.refresh(&ctx.engine, ctx.now) {
        Some(after) => {
            store::save(&ctx.state_dir, &record)?;
            println!("OK: lesson {id} advanced {before} → {after}");
        }
        None => println!("OK: lesson {id} unchanged ({before})"),
    }
    Ok(0)
}

/// Record feedback on a completed lesson.
fn cmd_feedback(ctx: &CliContext, id: &LessonId, rating: u8, comment: Option<String>) -> Result<u8> {
    let mut record = store::load(&ctx.state_dir, id)?;
    record
        .submit_feedback(&ctx.engine, ctx.now, rating, comment)
        .with_context(|| format!("lesson {id} rejected feedback"))?;

    store::save(&ctx.state_dir, &record)?;
    tracing::info!(lesson = %id, rating, "lesson feedback recorded");

    println!("OK: recorded {rating}/5 feedback for lesson {id}");
    Ok(0)
}

/// File an appeal against a completed lesson.
fn cmd_appeal(ctx: &CliContext, id: &LessonId, reason: &str) -> Result<u8> {
    let mut record = store::load(&ctx.state_dir, id)?;
    record
        .file_appeal(&ctx.engine, ctx.now, reason)
        .with_context(|| format!("lesson {id} rejected appeal"))?;

    store::save(&ctx.state_dir, &record)?;
    tracing::info!(lesson = %id, "lesson appeal filed");

    println!("OK: appeal filed for lesson {id}");
    Ok(0)
}

/// List stored lessons with their current status.
fn cmd_list(ctx: &CliContext) -> Result<u8> {
    let records = store::load_all(&ctx.state_dir)?;
    if records.is_empty() {
        println!("No lessons found.");
        return Ok(0);
    }

    println!("Lessons ({}):", records.len());
    for record in &records {
        let view = record.view(&ctx.engine, &ctx.now);
        println!(
            "  {}: {} [{}] starts {}",
            record.id, view.status, view.button_status, record.time_config.start_time
        );
    }
    Ok(0)
}

/// Print the transition table.
fn cmd_table() -> Result<u8> {
    println!("Lesson status transitions:");
    for status in LessonStatus::ALL {
        let marker = if status.is_terminal() { " (terminal)" } else { "" };
        println!("  {status:<12} -> {{{}}}{marker}", format_targets(status));
    }
    Ok(0)
}

/// Evaluate a time config at the context instant.
fn cmd_evaluate(ctx: &CliContext, config: &LessonTimeConfig, json: bool) -> Result<u8> {
    config.validate()?;
    let view = ctx.engine.status_view(&ctx.now, config);
    if json {
        println!("{}", serde_json::to_string_pretty(&view)?);
    } else {
        println!("Evaluated at {}", ctx.now);
        print_view(&view);
    }
    Ok(0)
}

fn print_view(view: &LessonStatusView) {
    println!("  Status: {}", view.status);
    println!("  Button: {}", view.button_status);
    println!("  Clickable: {}", view.is_clickable);
    println!(
        "  Window: {} – {}",
        view.time_config.start_time, view.time_config.end_time
    );
    if let Some(done) = view.time_config.completed_time {
        println!("  Completed: {done}");
    }
    if let Some(deadline) = view.feedback_deadline {
        println!("  Feedback closes: {deadline}");
    }
    if let Some(deadline) = view.appeal_deadline {
        println!("  Appeal closes: {deadline}");
    }
}

fn format_targets(status: LessonStatus) -> String {
    status
        .valid_transitions()
        .iter()
        .map(LessonStatus::name)
        .collect::<Vec<_>>()
        .join(", ")
}
