//! Injection block rendering.

use std::fmt::Write as _;

use super::loader::LoadedSkill;

pub const BLOCK_OPEN: &str = "<skills>";
pub const BLOCK_CLOSE: &str = "</skills>";

/// Render loaded skills as a single `<skills>` block.
///
/// No skills renders as an empty string, without the wrapper.
pub fn format_block(skills: &[LoadedSkill]) -> String {
    if skills.is_empty() {
        return String::new();
    }

    let total_lines: usize = skills.iter().map(|skill| skill.lines).sum();
    let mut block = String::new();
    block.push_str(BLOCK_OPEN);
    block.push('\n');
    let _ = writeln!(
        block,
        "<!-- {} skill(s) loaded, {total_lines} total lines -->\n",
        skills.len()
    );

    for skill in skills {
        let _ = writeln!(block, "<!-- Skill: {} ({} lines) -->", skill.id, skill.lines);
        block.push_str(&skill.content);
        block.push_str("\n\n");
    }

    block.push_str(BLOCK_CLOSE);
    block
}
