//! rrr-skills infer - Infer skills from free-form text

use clap::Args;
use colored::Colorize;
use serde::Serialize;

use crate::app::AppContext;
use crate::cli::output::{emit_json, robot_ok};
use crate::core::inference::{self, InferenceMatch};
use crate::error::Result;

#[derive(Args, Debug)]
pub struct InferArgs {
    /// Text to match against the registry's inference rules
    #[arg(required = true, num_args = 1.., value_name = "TEXT")]
    pub text: Vec<String>,
}

impl InferArgs {
    pub fn joined(&self) -> String {
        self.text.join(" ")
    }
}

#[derive(Serialize)]
struct InferOutput {
    text: String,
    skills: Vec<String>,
    matches: Vec<InferenceMatch>,
}

pub fn run(ctx: &AppContext, args: &InferArgs) -> Result<()> {
    let text = args.joined();
    let matches = ctx
        .open_registry()
        .map(|store| inference::matches(&text, store.registry()))
        .unwrap_or_default();

    let skills = inference::distinct_skills(&matches);

    if ctx.robot_mode {
        return emit_json(&robot_ok(InferOutput {
            text,
            skills,
            matches,
        }));
    }

    let listed = if skills.is_empty() {
        "none".dimmed().to_string()
    } else {
        skills.join(", ").green().to_string()
    };
    println!("{} {listed}", "Inferred skills:".bold());

    if ctx.verbosity > 0 {
        for m in &matches {
            println!(
                "  {} {} {}",
                m.skill.cyan(),
                "matched".dimmed(),
                format!("\"{}\" (rule {})", m.pattern, m.rule_index).dimmed()
            );
        }
    }

    Ok(())
}
