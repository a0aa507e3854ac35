//! Plan-to-block pipeline: header, selection, budgeted load, block.

use serde::Serialize;
use tracing::{debug, info};

use crate::registry::{Limits, RegistryStore, SkillsSearch, load_registry};

use super::block::format_block;
use super::loader::{LoadReport, LoadStep, load};
use super::plan_header::{self, PlanDescriptor};
use super::selection::{Selection, SelectionBasis, select};

/// Caller-supplied knobs for one load.
#[derive(Debug, Clone, Default)]
pub struct LoadOptions {
    /// Text matched against inference rules when the plan names no skills.
    /// An empty string is treated as absent.
    pub infer_text: Option<String>,
}

impl LoadOptions {
    pub fn with_infer_text(text: impl Into<String>) -> Self {
        Self {
            infer_text: Some(text.into()),
        }
    }

    fn inference_text<'a>(&'a self, plan_text: &'a str) -> &'a str {
        match self.infer_text.as_deref() {
            Some(text) if !text.is_empty() => text,
            _ => plan_text,
        }
    }
}

/// Everything a single load produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineResult {
    pub descriptor: PlanDescriptor,
    pub selection: Selection,
    pub report: LoadReport,
    pub block: String,
    /// Budget the load ran under.
    pub limits: Limits,
}

impl PipelineResult {
    /// Result used when no registry can be found: nothing selected, nothing loaded.
    pub fn empty() -> Self {
        Self {
            descriptor: PlanDescriptor::default(),
            selection: Selection {
                ids: Vec::new(),
                basis: SelectionBasis::Inferred,
                defaults_applied: false,
            },
            report: LoadReport::default(),
            block: String::new(),
            limits: Limits::default(),
        }
    }

    pub fn loaded_ids(&self) -> Vec<String> {
        self.report.loaded_ids()
    }

    pub const fn total_lines(&self) -> usize {
        self.report.total_lines
    }

    pub fn summary(&self) -> LoadSummary<'_> {
        LoadSummary {
            skills: self.loaded_ids(),
            total_lines: self.report.total_lines,
            max_total_lines: self.limits.max_total_lines,
            selection: &self.selection,
            steps: &self.report.steps,
        }
    }
}

/// Serializable view of a pipeline result for machine output.
#[derive(Debug, Serialize)]
pub struct LoadSummary<'a> {
    pub skills: Vec<String>,
    pub total_lines: usize,
    pub max_total_lines: usize,
    pub selection: &'a Selection,
    pub steps: &'a [LoadStep],
}

/// Run the full pipeline against an opened registry.
pub fn select_and_load(plan_text: &str, options: &LoadOptions, store: &RegistryStore) -> PipelineResult {
    let descriptor = plan_header::parse(plan_text);
    debug!(
        explicit = descriptor.explicit_skills.len(),
        mode = ?descriptor.mode,
        "parsed plan header"
    );

    let selection = select(&descriptor, options.inference_text(plan_text), store.registry());
    debug!(candidates = ?selection.ids, basis = ?selection.basis, "selected skills");

    let report = load(&selection.ids, store.registry(), store);
    let block = format_block(&report.skills);

    info!(
        loaded = report.skills.len(),
        total_lines = report.total_lines,
        "skills loaded"
    );

    PipelineResult {
        descriptor,
        selection,
        report,
        block,
        limits: store.registry().limits,
    }
}

/// Resolve the registry through `search`, then run the pipeline.
///
/// A missing or unreadable registry yields [`PipelineResult::empty`].
pub fn resolve_and_load(plan_text: &str, options: &LoadOptions, search: &SkillsSearch) -> PipelineResult {
    load_registry(search).map_or_else(PipelineResult::empty, |store| {
        select_and_load(plan_text, options, &store)
    })
}
