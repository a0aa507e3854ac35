//! Merge explicit, inferred and default skills into one candidate list.

use std::collections::HashSet;

use serde::Serialize;

use crate::registry::Registry;

use super::inference;
use super::plan_header::{PlanDescriptor, SkillsMode};

/// Where the non-default part of a selection came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionBasis {
    /// The plan header listed skills; inference did not run.
    Explicit,
    /// Skills were inferred from text.
    Inferred,
}

/// Ordered, duplicate-free candidate identifiers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Selection {
    pub ids: Vec<String>,
    pub basis: SelectionBasis,
    pub defaults_applied: bool,
}

/// Select candidate skills for a plan.
///
/// Explicit header skills take precedence; otherwise `inference_text` is
/// matched against the registry rules. Unless the plan is in minimal mode,
/// `defaults.always_load` comes first, in declared order. The first
/// occurrence of each identifier wins.
pub fn select(descriptor: &PlanDescriptor, inference_text: &str, registry: &Registry) -> Selection {
    let (base, basis) = if descriptor.has_explicit_skills() {
        (descriptor.explicit_skills.clone(), SelectionBasis::Explicit)
    } else {
        (
            inference::infer(inference_text, registry),
            SelectionBasis::Inferred,
        )
    };

    let defaults_applied = descriptor.mode != SkillsMode::Minimal;
    let defaults: &[String] = if defaults_applied {
        registry.defaults.always_load.as_slice()
    } else {
        &[]
    };

    let mut seen = HashSet::new();
    let ids = defaults
        .iter()
        .chain(base.iter())
        .filter(|id| seen.insert(id.as_str()))
        .cloned()
        .collect();

    Selection {
        ids,
        basis,
        defaults_applied,
    }
}
