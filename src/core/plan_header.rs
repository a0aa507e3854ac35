//! Plan header parsing.
//!
//! A plan may open with a `---` delimited header declaring the skills it
//! wants:
//!
//! ```text
//! ---
//! phase: 02-auth
//! skills:
//!   - api-design
//!   - testing
//! skills_mode: minimal
//! ---
//! ```
//!
//! Parsing never fails. A missing, unterminated or unreadable header yields
//! an empty [`PlanDescriptor`].

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;
use serde_yaml::Value;

/// Line that opens and closes the header block.
pub const HEADER_MARKER: &str = "---";

static SKILLS_KEY_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*skills:\s*$").unwrap());

static LIST_ITEM_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s+-\s+(.+?)\s*$").unwrap());

static MODE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*skills_mode:\s*(\w+)").unwrap());

/// How defaults combine with the plan's own skills.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkillsMode {
    /// Registry defaults are prepended.
    #[default]
    Standard,
    /// Only the explicit or inferred skills are used.
    Minimal,
}

impl SkillsMode {
    fn from_value(value: &str) -> Self {
        if value.trim() == "minimal" {
            Self::Minimal
        } else {
            Self::Standard
        }
    }
}

/// Skill declarations extracted from a plan header.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PlanDescriptor {
    pub explicit_skills: Vec<String>,
    pub mode: SkillsMode,
}

impl PlanDescriptor {
    pub fn has_explicit_skills(&self) -> bool {
        !self.explicit_skills.is_empty()
    }
}

/// Parse the plan header, degrading to an empty descriptor on any problem.
pub fn parse(plan_text: &str) -> PlanDescriptor {
    let Some(header) = extract_header(plan_text) else {
        return PlanDescriptor::default();
    };

    parse_yaml(&header).unwrap_or_else(|| {
        tracing::debug!("plan header is not valid YAML, scanning lines");
        scan_lines(&header)
    })
}

/// Body of the leading header block, without its marker lines.
fn extract_header(plan_text: &str) -> Option<String> {
    let text = plan_text.strip_prefix('\u{feff}').unwrap_or(plan_text);
    let mut lines = text.lines();
    if lines.next()?.trim_end() != HEADER_MARKER {
        return None;
    }

    let mut body = Vec::new();
    for line in lines {
        if line.trim_end() == HEADER_MARKER {
            return Some(body.join("\n"));
        }
        body.push(line);
    }
    None
}

fn parse_yaml(header: &str) -> Option<PlanDescriptor> {
    let value: Value = serde_yaml::from_str(header).ok()?;
    let Value::Mapping(map) = value else {
        return Some(PlanDescriptor::default());
    };

    let explicit_skills = match map.get("skills") {
        Some(Value::Sequence(items)) => items.iter().filter_map(scalar_identifier).collect(),
        _ => Vec::new(),
    };
    let mode = map
        .get("skills_mode")
        .and_then(Value::as_str)
        .map(SkillsMode::from_value)
        .unwrap_or_default();

    Some(PlanDescriptor {
        explicit_skills,
        mode,
    })
}

fn scalar_identifier(value: &Value) -> Option<String> {
    let id = match value {
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        _ => return None,
    };
    (!id.is_empty()).then_some(id)
}

/// Line-oriented recovery for headers YAML rejects.
fn scan_lines(header: &str) -> PlanDescriptor {
    let mut descriptor = PlanDescriptor::default();
    let mut lines = header.lines().peekable();

    while let Some(line) = lines.next() {
        if descriptor.explicit_skills.is_empty() && SKILLS_KEY_REGEX.is_match(line) {
            while let Some(item) = lines
                .peek()
                .copied()
                .and_then(|next| LIST_ITEM_REGEX.captures(next))
            {
                descriptor.explicit_skills.push(item[1].to_string());
                lines.next();
            }
            continue;
        }
        if let Some(caps) = MODE_REGEX.captures(line) {
            descriptor.mode = SkillsMode::from_value(&caps[1]);
        }
    }

    descriptor
}
