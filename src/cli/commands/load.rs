//! rrr-skills load - Select and load the skills for a plan

use std::path::{Path, PathBuf};

use clap::Args;
use colored::Colorize;
use serde::Serialize;
use tracing::{debug, warn};

use crate::app::AppContext;
use crate::cli::output::{emit_json, robot_ok};
use crate::core::pipeline::{LoadOptions, LoadSummary, PipelineResult, select_and_load};
use crate::core::recorder::record_load;
use crate::error::Result;
use crate::utils::fs::read_optional;

/// Banner printed before the injection block with `--output`.
pub const BLOCK_BANNER: &str = "--- Skills Block ---";

#[derive(Args, Debug)]
pub struct LoadArgs {
    /// Plan file to load skills for
    pub plan: PathBuf,

    /// Print the injection block after the summary
    #[arg(long)]
    pub output: bool,

    /// Infer skills from this text instead of the plan body
    #[arg(long, value_name = "TEXT")]
    pub infer_from: Option<String>,

    /// Do not write a load record to the log directory
    #[arg(long)]
    pub no_log: bool,
}

#[derive(Serialize)]
struct LoadOutput<'a> {
    plan: String,
    #[serde(flatten)]
    summary: LoadSummary<'a>,
    block: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    log_file: Option<String>,
}

pub fn run(ctx: &AppContext, args: &LoadArgs) -> Result<()> {
    let plan_text = read_plan(&ctx.resolve_path(&args.plan));
    let options = LoadOptions {
        infer_text: args.infer_from.clone(),
    };

    let result = ctx
        .open_registry()
        .map_or_else(PipelineResult::empty, |store| {
            select_and_load(&plan_text, &options, &store)
        });

    let plan_label = args.plan.display().to_string();
    let mut warnings = Vec::new();
    let log_file = if args.no_log || !ctx.config.log.enabled {
        debug!("load record disabled");
        None
    } else {
        match record_load(
            &ctx.log_dir(),
            &plan_label,
            &result.loaded_ids(),
            result.total_lines(),
            result.limits.max_total_lines,
        ) {
            Ok(path) => Some(path.display().to_string()),
            Err(err) => {
                warn!(error = %err, "Could not record skills load");
                warnings.push(err.to_string());
                None
            }
        }
    };

    if ctx.robot_mode {
        let output = LoadOutput {
            plan: plan_label,
            summary: result.summary(),
            block: &result.block,
            log_file,
        };
        emit_json(&robot_ok(output).with_warnings(warnings))
    } else {
        print_human(&result, args.output);
        Ok(())
    }
}

/// Plan text, or empty when the file is absent or unreadable.
fn read_plan(path: &Path) -> String {
    match read_optional(path) {
        Ok(Some(text)) => text,
        Ok(None) => {
            warn!(plan = %path.display(), "Plan file not found, continuing with empty plan");
            String::new()
        }
        Err(err) => {
            warn!(plan = %path.display(), error = %err, "Plan file unreadable, continuing with empty plan");
            String::new()
        }
    }
}

fn print_human(result: &PipelineResult, show_block: bool) {
    let loaded = result.loaded_ids();
    let skills = if loaded.is_empty() {
        "none".dimmed().to_string()
    } else {
        loaded.join(", ").green().to_string()
    };

    println!("{} {skills}", "Skills loaded:".bold());
    println!("{} {}", "Total lines:".bold(), result.total_lines());

    if show_block {
        println!("\n{BLOCK_BANNER}\n");
        println!("{}", result.block);
    }
}
