//! # Lesson Record Store
//!
//! JSON files in a flat directory, one per lesson, named by lesson id.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};

use wemaster_core::LessonId;
use wemaster_lesson::LessonRecord;

fn record_path(state_dir: &Path, id: &LessonId) -> PathBuf {
    state_dir.join(format!("{id}.json"))
}

/// Read one lesson record.
pub fn load(state_dir: &Path, id: &LessonId) -> Result<LessonRecord> {
    let path = record_path(state_dir, id);
    if !path.exists() {
        bail!("lesson not found: {id}");
    }
    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let record = serde_json::from_str(&content)
        .with_context(|| format!("failed to parse {}", path.display()))?;
    Ok(record)
}

/// Write one lesson record, creating the state directory if needed.
pub fn save(state_dir: &Path, record: &LessonRecord) -> Result<()> {
    std::fs::create_dir_all(state_dir).context("failed to create lesson state directory")?;
    let path = record_path(state_dir, &record.id);
    let json = serde_json::to_string_pretty(record)?;
    std::fs::write(&path, json).with_context(|| format!("failed to write {}", path.display()))?;
    Ok(())
}

/// Every readable record in the directory, ordered by start time.
///
/// Files that do not parse as lesson records are skipped with a warning.
pub fn load_all(state_dir: &Path) -> Result<Vec<LessonRecord>> {
    if !state_dir.is_dir() {
        return Ok(Vec::new());
    }

    let mut records = Vec::new();
    for entry in std::fs::read_dir(state_dir)?.flatten() {
        let path = entry.path();
        if path.extension().and_then(|e| e.to_str()) != Some("json") {
            continue;
        }
        let parsed = std::fs::read_to_string(&path)
            .map_err(anyhow::Error::from)
            .and_then(|content| Ok(serde_json::from_str::<LessonRecord>(&content)?));
        match parsed {
            Ok(record) => records.push(record),
            Err(e) => tracing::warn!(path = %path.display(), error = %e, "skipping unreadable lesson record"),
        }
    }

    records.sort_by(|a, b| {
        a.time_config
            .start_time
            .cmp(&b.time_config.start_time)
            .then(a.id.cmp(&b.id))
    });
    Ok(records)
}
