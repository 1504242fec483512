use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod core;
mod matching;
mod refactoring;
mod utils;

fn main() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();

    // Initialize logging based on verbosity flag
    let filter = if cli.verbose {
        EnvFilter::new("refactor_reconcile=debug,info")
    } else {
        EnvFilter::new("refactor_reconcile=warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .init();

    match cli.command {
        cli::Commands::Diff(args) => {
            cli::diff::run(args, cli.format, cli.verbose)?;
        }
        cli::Commands::Trivial(args) => {
            cli::trivial::run(args, cli.format, cli.verbose)?;
        }
    }

    Ok(())
}
