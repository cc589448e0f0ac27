//! # Runtime Configuration
//!
//! Resolves the global flags into the context every handler receives: the
//! status engine built from the policy file, the lesson state directory,
//! and the instant treated as "now".

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use wemaster_core::Timestamp;
use wemaster_lesson::{LessonPolicy, LessonStatusEngine};

/// State directory used when `--state-dir` is not given.
pub const DEFAULT_STATE_DIR: &str = ".wemaster/lessons";

/// Everything a subcommand handler needs.
#[derive(Debug, Clone)]
pub struct CliContext {
    /// Status engine under the effective policy.
    pub engine: LessonStatusEngine,
    /// Directory holding `<id>.json` lesson records.
    pub state_dir: PathBuf,
    /// The instant handlers evaluate against.
    pub now: Timestamp,
}

impl CliContext {
    /// Build the context from the global flags.
    pub fn resolve(
        config: Option<&Path>,
        state_dir: Option<PathBuf>,
        now: Option<Timestamp>,
    ) -> Result<Self> {
        let policy = load_policy(config)?;
        let engine = LessonStatusEngine::new(policy).context("policy rejected")?;
        let state_dir = state_dir.unwrap_or_else(|| PathBuf::from(DEFAULT_STATE_DIR));
        let now = now.unwrap_or_else(Timestamp::now);

        tracing::debug!(
            state_dir = %state_dir.display(),
            %now,
            ?policy,
            "resolved cli context"
        );

        Ok(Self {
            engine,
            state_dir,
            now,
        })
    }
}

/// Load a YAML lesson policy, or the default policy when no path is given.
///
/// Fields missing from the file keep their defaults.
pub fn load_policy(path: Option<&Path>) -> Result<LessonPolicy> {
    let Some(path) = path else {
        return Ok(LessonPolicy::default());
    };
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read policy file {}", path.display()))?;
    let policy: LessonPolicy = serde_yaml::from_str(&content)
        .with_context(|| format!("failed to parse policy file {}", path.display()))?;
    policy
        .validate()
        .with_context(|| format!("invalid policy file {}", path.display()))?;
    Ok(policy)
}
