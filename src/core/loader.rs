//! Budgeted loading of selected skills.
//!
//! Candidates are read strictly in order. The first candidate that would
//! break the count or line budget ends the pass: it and everything after it
//! are reported as skipped, even if a later, smaller skill would still fit.
//! Skills are never truncated.

use serde::Serialize;
use tracing::{debug, warn};

use crate::registry::{Limits, Registry, SkillStorage};
use crate::utils::fs::count_lines;

/// A skill document ready for injection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedSkill {
    pub id: String,
    pub content: String,
    pub lines: usize,
    /// Declared size from the registry, informational only.
    pub max_lines: Option<usize>,
}

impl LoadedSkill {
    pub fn exceeds_declared(&self) -> bool {
        self.max_lines.is_some_and(|max| self.lines > max)
    }
}

/// What happened to one candidate identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum LoadOutcome {
    Loaded { lines: usize },
    SkippedNotFound,
    SkippedFileMissing { path: String },
    SkippedUnreadable { reason: String },
    SkippedLimitCount { limit: usize },
    /// `lines` is known only for the candidate that tripped the limit.
    SkippedLimitSize { lines: Option<usize>, limit: usize },
}

impl LoadOutcome {
    pub const fn is_loaded(&self) -> bool {
        matches!(self, Self::Loaded { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoadStep {
    pub id: String,
    #[serde(flatten)]
    pub outcome: LoadOutcome,
}

/// Result of one budgeted pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadReport {
    pub skills: Vec<LoadedSkill>,
    pub steps: Vec<LoadStep>,
    pub total_lines: usize,
}

impl LoadReport {
    pub fn loaded_ids(&self) -> Vec<String> {
        self.skills.iter().map(|skill| skill.id.clone()).collect()
    }

    pub fn skipped(&self) -> impl Iterator<Item = &LoadStep> {
        self.steps.iter().filter(|step| !step.outcome.is_loaded())
    }

    fn push_step(&mut self, id: &str, outcome: LoadOutcome) {
        self.steps.push(LoadStep {
            id: id.to_string(),
            outcome,
        });
    }

    fn skip_all(&mut self, ids: &[String], outcome: &LoadOutcome) {
        for id in ids {
            self.push_step(id, outcome.clone());
        }
    }
}

/// Load `ids` in order within the registry's limits.
pub fn load<S>(ids: &[String], registry: &Registry, storage: &S) -> LoadReport
where
    S: SkillStorage + ?Sized,
{
    let Limits {
        max_skills_per_plan,
        max_total_lines,
    } = registry.limits;
    let mut report = LoadReport::default();

    for (position, id) in ids.iter().enumerate() {
        if report.skills.len() >= max_skills_per_plan {
            warn!("Max skills reached ({max_skills_per_plan}), skipping: {id}");
            report.skip_all(
                &ids[position..],
                &LoadOutcome::SkippedLimitCount {
                    limit: max_skills_per_plan,
                },
            );
            break;
        }

        let Some(descriptor) = registry.get(id) else {
            warn!("Skill not found in registry: {id}");
            report.push_step(id, LoadOutcome::SkippedNotFound);
            continue;
        };

        let content = match storage.read(&descriptor.path) {
            Ok(Some(content)) => content,
            Ok(None) => {
                let path = storage.describe(&descriptor.path);
                warn!("Skill file not found: {path}");
                report.push_step(id, LoadOutcome::SkippedFileMissing { path });
                continue;
            }
            Err(err) => {
                warn!("Skill file unreadable for {id}: {err}");
                report.push_step(
                    id,
                    LoadOutcome::SkippedUnreadable {
                        reason: err.to_string(),
                    },
                );
                continue;
            }
        };

        let lines = count_lines(&content);
        if report.total_lines + lines > max_total_lines {
            warn!("Line limit reached ({max_total_lines}), skipping: {id}");
            report.push_step(
                id,
                LoadOutcome::SkippedLimitSize {
                    lines: Some(lines),
                    limit: max_total_lines,
                },
            );
            report.skip_all(
                &ids[position + 1..],
                &LoadOutcome::SkippedLimitSize {
                    lines: None,
                    limit: max_total_lines,
                },
            );
            break;
        }

        let skill = LoadedSkill {
            id: id.clone(),
            content,
            lines,
            max_lines: descriptor.max_lines,
        };
        if skill.exceeds_declared() {
            debug!(
                skill = %id,
                lines,
                declared = ?descriptor.max_lines,
                "skill is longer than its declared max_lines"
            );
        }

        report.total_lines += lines;
        report.push_step(id, LoadOutcome::Loaded { lines });
        report.skills.push(skill);
    }

    report
}
