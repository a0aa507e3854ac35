//! Command implementations

use crate::app::AppContext;
use crate::cli::Commands;
use crate::error::Result;

pub mod check;
pub mod infer;
pub mod list;
pub mod load;

/// Dispatch a command to its handler
pub fn run(ctx: &AppContext, command: &Commands) -> Result<()> {
    match command {
        Commands::Load(args) => load::run(ctx, args),
        Commands::Infer(args) => infer::run(ctx, args),
        Commands::List(args) => list::run(ctx, args),
        Commands::Check(args) => check::run(ctx, args),
    }
}
