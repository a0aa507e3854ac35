use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Default cap on skills loaded for one plan.
pub const DEFAULT_MAX_SKILLS_PER_PLAN: usize = 5;
/// Default cap on cumulative skill lines loaded for one plan.
pub const DEFAULT_MAX_TOTAL_LINES: usize = 1000;

/// The skills catalog read from `registry.json`.
///
/// Treated as immutable once loaded; every pipeline function takes it by
/// reference.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Registry {
    #[serde(default)]
    pub skills: BTreeMap<String, SkillDescriptor>,
    #[serde(default)]
    pub inference: InferenceConfig,
    #[serde(default)]
    pub defaults: DefaultsConfig,
    #[serde(default)]
    pub limits: Limits,
}

impl Registry {
    pub fn get(&self, id: &str) -> Option<&SkillDescriptor> {
        self.skills.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.skills.contains_key(id)
    }

    /// References from defaults or inference rules that name no registered skill.
    ///
    /// Dangling references are soft failures: the loader skips them with a
    /// warning when they come up.
    pub fn dangling_references(&self) -> Vec<DanglingReference> {
        let defaults = self
            .defaults
            .always_load
            .iter()
            .filter(|id| !self.contains(id))
            .map(|id| DanglingReference {
                skill_id: id.clone(),
                source: ReferenceSource::Defaults,
            });

        let rules = self
            .inference
            .rules
            .iter()
            .enumerate()
            .filter(|(_, rule)| !self.contains(&rule.skill))
            .map(|(index, rule)| DanglingReference {
                skill_id: rule.skill.clone(),
                source: ReferenceSource::InferenceRule { index },
            });

        defaults.chain(rules).collect()
    }
}

/// One loadable skill entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillDescriptor {
    /// Path of the skill document, relative to the registry directory.
    pub path: String,
    /// Declared size; advisory only, never enforced when reading.
    #[serde(default, deserialize_with = "lenient_max_lines")]
    pub max_lines: Option<usize>,
    #[serde(default, deserialize_with = "lenient_tags")]
    pub tags: Vec<String>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient_description"
    )]
    pub description: Option<String>,
}

// The advisory fields below never reject a registry: values of the wrong
// shape read as absent.

fn lenient_max_lines<'de, D>(deserializer: D) -> Result<Option<usize>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw = Value::deserialize(deserializer)?;
    Ok(match raw {
        Value::Number(n) => n.as_u64().and_then(|n| usize::try_from(n).ok()),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    })
}

fn lenient_tags<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw = Value::deserialize(deserializer)?;
    Ok(match raw {
        Value::Array(items) => items
            .into_iter()
            .filter_map(|item| match item {
                Value::String(tag) => Some(tag),
                _ => None,
            })
            .collect(),
        Value::String(tag) if !tag.trim().is_empty() => vec![tag],
        _ => Vec::new(),
    })
}

fn lenient_description<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw = Value::deserialize(deserializer)?;
    Ok(match raw {
        Value::String(text) => Some(text),
        _ => None,
    })
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InferenceConfig {
    #[serde(default)]
    pub rules: Vec<InferenceRule>,
}

/// Keyword rule: fires when any pattern occurs in the text, case-insensitively.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InferenceRule {
    pub skill: String,
    #[serde(default)]
    pub patterns: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DefaultsConfig {
    #[serde(default)]
    pub always_load: Vec<String>,
}

/// Per-plan budget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Limits {
    #[serde(default = "default_max_skills")]
    pub max_skills_per_plan: usize,
    #[serde(default = "default_max_lines")]
    pub max_total_lines: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_skills_per_plan: DEFAULT_MAX_SKILLS_PER_PLAN,
            max_total_lines: DEFAULT_MAX_TOTAL_LINES,
        }
    }
}

const fn default_max_skills() -> usize {
    DEFAULT_MAX_SKILLS_PER_PLAN
}

const fn default_max_lines() -> usize {
    DEFAULT_MAX_TOTAL_LINES
}

/// A registry reference to an unknown skill identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DanglingReference {
    pub skill_id: String,
    pub source: ReferenceSource,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ReferenceSource {
    Defaults,
    InferenceRule { index: usize },
}

impl std::fmt::Display for ReferenceSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Defaults => write!(f, "defaults.always_load"),
            Self::InferenceRule { index } => write!(f, "inference.rules[{index}]"),
        }
    }
}
