//! rrr-skills check - Validate the skills registry

use std::path::PathBuf;

use clap::Args;
use colored::Colorize;
use serde::Serialize;

use crate::app::AppContext;
use crate::cli::output::{emit_json, robot_ok};
use crate::error::{Result, SkillsError, StructuredError};
use crate::registry::{RegistryStore, SkillStorage};
use crate::utils::fs::count_lines;

#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Also report skills longer than their declared max_lines
    #[arg(long)]
    pub sizes: bool,
}

/// One problem found in the registry.
#[derive(Debug, Serialize)]
pub struct CheckIssue {
    pub skill_id: String,
    /// Where the reference lives, e.g. `inference.rules[2]` or `skills`.
    pub location: String,
    pub error: StructuredError,
}

/// Declared size that the document on disk exceeds.
#[derive(Debug, Serialize)]
pub struct SizeNote {
    pub skill_id: String,
    pub lines: usize,
    pub max_lines: usize,
}

#[derive(Debug, Default, Serialize)]
pub struct CheckReport {
    pub registry: Option<PathBuf>,
    pub skills: usize,
    pub issues: Vec<CheckIssue>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub oversized: Vec<SizeNote>,
}

impl CheckReport {
    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }
}

/// Collect dangling references and missing or unreadable skill files.
pub fn check_registry(store: &RegistryStore, sizes: bool) -> CheckReport {
    let registry = store.registry();
    let mut report = CheckReport {
        registry: Some(store.base_dir().to_path_buf()),
        skills: registry.skills.len(),
        ..CheckReport::default()
    };

    for dangling in registry.dangling_references() {
        report.issues.push(CheckIssue {
            location: dangling.source.to_string(),
            error: SkillsError::SkillNotFound(dangling.skill_id.clone()).to_structured(),
            skill_id: dangling.skill_id,
        });
    }

    for (id, descriptor) in &registry.skills {
        match store.read(&descriptor.path) {
            Ok(Some(content)) => {
                let lines = count_lines(&content);
                if let Some(max_lines) = descriptor.max_lines.filter(|max| sizes && lines > *max) {
                    report.oversized.push(SizeNote {
                        skill_id: id.clone(),
                        lines,
                        max_lines,
                    });
                }
            }
            Ok(None) => report.issues.push(CheckIssue {
                skill_id: id.clone(),
                location: "skills".to_string(),
                error: SkillsError::SkillFileMissing(store.skill_path(descriptor)).to_structured(),
            }),
            Err(err) => report.issues.push(CheckIssue {
                skill_id: id.clone(),
                location: "skills".to_string(),
                error: err.to_structured(),
            }),
        }
    }

    report
}

pub fn run(ctx: &AppContext, args: &CheckArgs) -> Result<()> {
    let report = ctx
        .open_registry()
        .map(|store| check_registry(&store, args.sizes))
        .unwrap_or_default();

    if ctx.robot_mode {
        return emit_json(&robot_ok(&report));
    }

    let Some(registry) = &report.registry else {
        println!("{}", "No skills registry found. Searched:".yellow());
        for dir in ctx.search.candidates() {
            println!("  {}", dir.display());
        }
        return Ok(());
    };

    println!("{} {}", "Registry:".bold(), registry.display());
    for issue in &report.issues {
        println!(
            "  {} {} {} {}",
            "✗".red(),
            issue.error.code.code_string().red(),
            issue.error.message,
            format!("({})", issue.location).dimmed()
        );
    }
    for note in &report.oversized {
        println!(
            "  {} {} is {} lines, declared max {}",
            "!".yellow(),
            note.skill_id,
            note.lines,
            note.max_lines
        );
    }

    if report.is_clean() {
        println!("{} {} skills, no problems found", "✓".green(), report.skills);
    } else {
        println!(
            "{} {} problem(s) in {} skills",
            "✗".red(),
            report.issues.len(),
            report.skills
        );
    }

    Ok(())
}
