//! # wemaster CLI entry point
//!
//! Parses command-line arguments, resolves the runtime context, and
//! dispatches to subcommand handlers.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use wemaster_cli::config::CliContext;
use wemaster_cli::lesson::{run_lesson, LessonArgs};
use wemaster_cli::policy::{run_policy, PolicyArgs};
use wemaster_core::Timestamp;

/// WeMaster lesson lifecycle toolchain.
///
/// Derives lesson status and viewer actions from lesson timestamps, and
/// validates and applies status transitions on locally stored lessons.
#[derive(Parser, Debug)]
#[command(name = "wemaster", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Path to a YAML lesson policy file.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Directory holding lesson records.
    #[arg(long, global = true)]
    state_dir: Option<PathBuf>,

    /// Evaluate as of this instant (RFC 3339) instead of the wall clock.
    #[arg(long, global = true)]
    now: Option<Timestamp>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Lesson lifecycle operations (create, status, transition, etc.).
    Lesson(LessonArgs),

    /// Print the effective lesson policy.
    Policy(PolicyArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!("wemaster CLI v{} starting", env!("CARGO_PKG_VERSION"));

    let result = CliContext::resolve(cli.config.as_deref(), cli.state_dir, cli.now).and_then(
        |ctx| match &cli.command {
            Commands::Lesson(args) => run_lesson(args, &ctx),
            Commands::Policy(args) => run_policy(args, &ctx),
        },
    );

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(1)
        }
    }
}
