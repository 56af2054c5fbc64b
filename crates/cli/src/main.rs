//! Entry point for the command-line interface.
//! Delegates to dedicated modules for argument handling, tracing logic,
//! and output formatting.

use clap::Parser;
use cli::args::{Cli, Commands};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    cli::init_tracing(cli.verbose, cli.quiet);
    match &cli.command {
        Commands::Trace(args) => cli::trace::run(args),
        Commands::Paths(args) => cli::paths::run(args),
    }
}
