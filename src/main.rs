//! rrr-skills - RRR skills loader CLI
//!
//! Selects the skill documents a plan needs, packs them into a budget and
//! prints the injection block.

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use rrr_skills::Result;
use rrr_skills::app::AppContext;
use rrr_skills::cli::output::robot_error_structured;
use rrr_skills::cli::{Cli, commands};

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(&cli);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            // Pipeline problems never get here; they are skip outcomes or warnings.
            if cli.output_format().is_machine_readable() {
                let response = robot_error_structured(&e);
                println!("{}", serde_json::to_string(&response).unwrap_or_default());
            } else {
                eprintln!("Error: {}", e.to_structured());
            }
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<()> {
    let ctx = AppContext::from_cli(cli)?;
    commands::run(&ctx, &cli.command)
}

/// Diagnostics go to stderr so stdout stays clean for the summary, the
/// injection block or the JSON envelope.
fn init_tracing(cli: &Cli) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(cli.quiet, cli.verbose)));

    let registry = tracing_subscriber::registry().with(env_filter);
    if cli.output_format().is_machine_readable() {
        registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        // Skip warnings are the common case; keep them to one short line each.
        registry
            .with(fmt::layer().compact().with_target(false).with_writer(std::io::stderr))
            .init();
    }
}

const fn default_filter(quiet: bool, verbose: u8) -> &'static str {
    if quiet {
        return "error";
    }
    match verbose {
        0 => "warn,rrr_skills=info",
        1 => "info,rrr_skills=debug",
        2 => "debug,rrr_skills=trace",
        _ => "trace",
    }
}
