//! # Policy Subcommand
//!
//! Prints the lesson policy in force after `--config` is applied.

use anyhow::Result;
use clap::Args;

use crate::config::CliContext;

/// Arguments for the `wemaster policy` subcommand.
#[derive(Args, Debug)]
pub struct PolicyArgs {
    /// Print as JSON instead of YAML.
    #[arg(long)]
    pub json: bool,
}

/// Execute the policy subcommand.
pub fn run_policy(args: &PolicyArgs, ctx: &CliContext) -> Result<u8> {
    println!("{}", render_policy(args, ctx)?);
    Ok(0)
}

fn render_policy(args: &PolicyArgs, ctx: &CliContext) -> Result<String> {
    let policy = ctx.engine.policy();
    let rendered = if args.json {
        serde_json::to_string_pretty(policy)?
    } else {
        serde_yaml::to_string(policy)?
    };
    Ok(rendered.trim_end().to_string())
}
