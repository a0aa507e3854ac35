//! Keyword inference of skills from free-form text.

use std::collections::HashSet;

use serde::Serialize;

use crate::registry::Registry;

/// A rule that fired, with the first pattern that matched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InferenceMatch {
    pub skill: String,
    pub rule_index: usize,
    pub pattern: String,
}

/// Every rule that fires against `text`, in registry rule order.
///
/// Matching is a case-insensitive substring test; a rule stops at its first
/// matching pattern. Blank patterns never match.
pub fn matches(text: &str, registry: &Registry) -> Vec<InferenceMatch> {
    let haystack = text.to_lowercase();

    registry
        .inference
        .rules
        .iter()
        .enumerate()
        .filter_map(|(rule_index, rule)| {
            rule.patterns
                .iter()
                .filter(|pattern| !pattern.trim().is_empty())
                .find(|pattern| haystack.contains(&pattern.to_lowercase()))
                .map(|pattern| InferenceMatch {
                    skill: rule.skill.clone(),
                    rule_index,
                    pattern: pattern.clone(),
                })
        })
        .collect()
}

/// Skill identifiers inferred from `text`, deduplicated, in rule order.
pub fn infer(text: &str, registry: &Registry) -> Vec<String> {
    distinct_skills(&matches(text, registry))
}

/// Skills named by `found`, first occurrence wins.
pub fn distinct_skills(found: &[InferenceMatch]) -> Vec<String> {
    let mut seen = HashSet::new();
    found
        .iter()
        .filter(|m| seen.insert(m.skill.as_str()))
        .map(|m| m.skill.clone())
        .collect()
}
