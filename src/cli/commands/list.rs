//! rrr-skills list - List skills in the registry

use clap::Args;
use colored::Colorize;
use serde::Serialize;

use crate::app::AppContext;
use crate::cli::output::{emit_json, robot_ok};
use crate::error::Result;
use crate::registry::{Limits, RegistryStore, SkillDescriptor};

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Only show skills carrying this tag (repeatable)
    #[arg(long, short)]
    pub tags: Vec<String>,
}

#[derive(Serialize)]
struct ListedSkill<'a> {
    id: &'a str,
    #[serde(flatten)]
    descriptor: &'a SkillDescriptor,
}

#[derive(Serialize)]
struct ListOutput<'a> {
    registry: Option<String>,
    count: usize,
    skills: Vec<ListedSkill<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    limits: Option<Limits>,
    defaults: &'a [String],
}

pub fn run(ctx: &AppContext, args: &ListArgs) -> Result<()> {
    let store = ctx.open_registry();

    if ctx.robot_mode {
        let output = match &store {
            Some(store) => {
                let skills = filtered(store, &args.tags);
                ListOutput {
                    registry: Some(store.base_dir().display().to_string()),
                    count: skills.len(),
                    skills,
                    limits: Some(store.registry().limits),
                    defaults: &store.registry().defaults.always_load,
                }
            }
            None => ListOutput {
                registry: None,
                count: 0,
                skills: Vec::new(),
                limits: None,
                defaults: &[],
            },
        };
        return emit_json(&robot_ok(output));
    }

    let Some(store) = store else {
        println!("{}", "No skills registry found".dimmed());
        println!();
        println!("Install skills into .claude/skills or pass --skills-dir");
        return Ok(());
    };

    list_human(&store, &args.tags);
    Ok(())
}

fn filtered<'a>(store: &'a RegistryStore, tags: &[String]) -> Vec<ListedSkill<'a>> {
    store
        .registry()
        .skills
        .iter()
        .filter(|(_, skill)| tags.is_empty() || tags.iter().any(|t| skill.tags.contains(t)))
        .map(|(id, descriptor)| ListedSkill { id, descriptor })
        .collect()
}

fn list_human(store: &RegistryStore, tags: &[String]) {
    let skills = filtered(store, tags);
    let registry = store.registry();

    if skills.is_empty() {
        println!("{}", "No skills found".dimmed());
    } else {
        println!("{}\n", "Available skills:".bold());
    }

    for skill in &skills {
        let descriptor = skill.descriptor;
        println!("  {}", skill.id.cyan().bold());
        if let Some(description) = &descriptor.description {
            println!("    {description}");
        }
        let tags = if descriptor.tags.is_empty() {
            "-".to_string()
        } else {
            descriptor.tags.join(", ")
        };
        println!("    {} {tags}", "Tags:".dimmed());
        let max_lines = descriptor
            .max_lines
            .map_or_else(|| "-".to_string(), |n| n.to_string());
        println!("    {} {max_lines}", "Max lines:".dimmed());
        println!("    {} {}", "Path:".dimmed(), descriptor.path);
        println!();
    }

    let defaults = if registry.defaults.always_load.is_empty() {
        "none".to_string()
    } else {
        registry.defaults.always_load.join(", ")
    };
    println!(
        "{} {} skills, {} lines per plan",
        "Limits:".bold(),
        registry.limits.max_skills_per_plan,
        registry.limits.max_total_lines
    );
    println!("{} {defaults}", "Defaults:".bold());
    println!("{} {}", "Registry:".dimmed(), store.base_dir().display());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::fixtures::SkillsFixture;

    #[test]
    fn tag_filter_matches_any_tag() {
        let mut fixture = SkillsFixture::new();
        fixture.add_skill_with_lines("api-design", 3);
        fixture.add_skill_with_lines("testing", 3);
        let mut registry = fixture.registry().clone();
        registry.skills.get_mut("api-design").unwrap().tags = vec!["backend".into()];
        registry.skills.get_mut("testing").unwrap().tags = vec!["quality".into()];
        let store = RegistryStore::from_parts(fixture.skills_dir().to_path_buf(), registry);

        let ids: Vec<&str> = filtered(&store, &["quality".to_string()])
            .iter()
            .map(|s| s.id)
            .collect();
        assert_eq!(ids, vec!["testing"]);
        assert_eq!(filtered(&store, &[]).len(), 2);
    }
}
