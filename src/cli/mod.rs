//! CLI module - Command-line interface definitions and handlers
//!
//! Uses clap v4 with derive macros for argument parsing.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub use output::OutputFormat;

pub mod commands;
pub mod output;

/// RRR skills loader - select, budget and inject skill documents for a plan
#[derive(Parser, Debug)]
#[command(name = "rrr-skills")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable machine-readable JSON output.
    #[arg(long, short = 'm', global = true, alias = "machine")]
    pub robot: bool,

    /// Output format (human, json, plain)
    #[arg(long, short = 'O', global = true, value_enum)]
    pub output_format: Option<OutputFormat>,

    /// Force plain output (no colors)
    #[arg(long, global = true)]
    pub plain: bool,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all logging except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Config file path (default: ~/.config/rrr/config.toml, then .rrr/config.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Skills directory containing registry.json, searched before the standard locations
    #[arg(long, global = true, value_name = "DIR")]
    pub skills_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Get the effective output format.
    ///
    /// Priority order:
    /// 1. `--plain` → Plain format
    /// 2. `--output-format` → Explicit format
    /// 3. `--robot` / `-m` → JSON format
    /// 4. Default → Human format
    #[must_use]
    pub fn output_format(&self) -> OutputFormat {
        if self.plain {
            return OutputFormat::Plain;
        }

        if let Some(fmt) = self.output_format {
            return fmt;
        }

        if self.robot {
            return OutputFormat::Json;
        }

        OutputFormat::Human
    }
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Select and load the skills for a plan file
    Load(commands::load::LoadArgs),

    /// Infer skills from free-form text
    Infer(commands::infer::InferArgs),

    /// List skills in the registry
    List(commands::list::ListArgs),

    /// Check the registry for dangling references and missing files
    Check(commands::check::CheckArgs),
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn robot_flag_selects_json() {
        let cli = Cli::try_parse_from(["rrr-skills", "-m", "list"]).unwrap();
        assert_eq!(cli.output_format(), OutputFormat::Json);

        let cli = Cli::try_parse_from(["rrr-skills", "list", "--robot"]).unwrap();
        assert_eq!(cli.output_format(), OutputFormat::Json);
    }

    #[test]
    fn plain_wins_over_robot() {
        let cli = Cli::try_parse_from(["rrr-skills", "--plain", "--robot", "list"]).unwrap();
        assert_eq!(cli.output_format(), OutputFormat::Plain);
    }

    #[test]
    fn load_requires_plan_path() {
        assert!(Cli::try_parse_from(["rrr-skills", "load"]).is_err());
    }

    #[test]
    fn load_flags_parse() {
        let cli = Cli::try_parse_from([
            "rrr-skills",
            "load",
            "PLAN.md",
            "--output",
            "--infer-from",
            "add tests",
            "--no-log",
        ])
        .unwrap();
        let Commands::Load(args) = cli.command else {
            panic!("expected load command");
        };
        assert_eq!(args.plan, PathBuf::from("PLAN.md"));
        assert!(args.output);
        assert!(args.no_log);
        assert_eq!(args.infer_from.as_deref(), Some("add tests"));
    }

    #[test]
    fn infer_joins_words() {
        let cli = Cli::try_parse_from(["rrr-skills", "infer", "write", "unit", "tests"]).unwrap();
        let Commands::Infer(args) = cli.command else {
            panic!("expected infer command");
        };
        assert_eq!(args.joined(), "write unit tests");
    }
}
