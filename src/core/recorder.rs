//! Per-invocation load records.
//!
//! Every recorded load writes a new `skills_<unix-millis>.log` file with
//! three timestamped lines: the plan, the loaded skills and the budget.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::debug;

use crate::error::{Result, SkillsError};
use crate::utils::fs::ensure_dir;

pub const LOG_PREFIX: &str = "skills_";
pub const LOG_EXTENSION: &str = "log";

/// What a single load produced, as written to the log directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoadRecord {
    pub timestamp: DateTime<Utc>,
    pub plan_path: String,
    pub loaded_ids: Vec<String>,
    pub total_lines: usize,
    pub max_total_lines: usize,
}

impl LoadRecord {
    pub fn new(
        plan_path: impl Into<String>,
        loaded_ids: Vec<String>,
        total_lines: usize,
        max_total_lines: usize,
    ) -> Self {
        Self {
            timestamp: Utc::now(),
            plan_path: plan_path.into(),
            loaded_ids,
            total_lines,
            max_total_lines,
        }
    }

    pub fn file_name(&self) -> String {
        format!(
            "{LOG_PREFIX}{}.{LOG_EXTENSION}",
            self.timestamp.timestamp_millis()
        )
    }

    /// Log file body, newline terminated.
    pub fn render(&self) -> String {
        let stamp = self.timestamp.to_rfc3339();
        let skills = if self.loaded_ids.is_empty() {
            "none".to_string()
        } else {
            self.loaded_ids.join(", ")
        };
        format!(
            "[{stamp}] Plan: {plan}\n\
             [{stamp}] Skills loaded: {skills} ({lines} lines)\n\
             [{stamp}] Total: {lines} lines / {max} max\n",
            plan = self.plan_path,
            lines = self.total_lines,
            max = self.max_total_lines,
        )
    }

    /// Write the record into `log_dir`, creating the directory if needed.
    pub fn write_to(&self, log_dir: &Path) -> Result<PathBuf> {
        let path = log_dir.join(self.file_name());
        let failure = |err: &dyn std::fmt::Display| SkillsError::LogWriteFailure {
            path: path.clone(),
            reason: err.to_string(),
        };

        ensure_dir(log_dir).map_err(|err| failure(&err))?;
        std::fs::write(&path, self.render()).map_err(|err| failure(&err))?;

        debug!(path = %path.display(), "recorded skills load");
        Ok(path)
    }
}

/// Record one load in `log_dir` and return the file written.
///
/// Callers treat failure as a warning; the load itself already succeeded.
pub fn record_load(
    log_dir: &Path,
    plan_path: &str,
    loaded_ids: &[String],
    total_lines: usize,
    max_total_lines: usize,
) -> Result<PathBuf> {
    LoadRecord::new(plan_path, loaded_ids.to_vec(), total_lines, max_total_lines).write_to(log_dir)
}
