use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

mod angles;
mod cli;
mod config;
mod error;
mod output;
mod prompt;
mod provider;
mod runner;
mod session;

#[cfg(test)]
mod testing;

use angles::Phase;
use cli::{Cli, Commands};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize tracing - only show warnings unless --verbose
    let filter = if cli.global.verbose {
        EnvFilter::new("brainstorm=debug")
    } else {
        EnvFilter::new("brainstorm=warn")
    };

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Explore(args) => {
            cli::phase::execute(Phase::Explore, args.into(), &cli.global).await
        }
        Commands::Validate(args) => {
            cli::phase::execute(Phase::Validate, args.into(), &cli.global).await
        }
        Commands::Assess(args) => {
            cli::phase::execute(Phase::Assess, args.into(), &cli.global).await
        }
        Commands::Pipeline(args) => cli::pipeline::execute(args, &cli.global).await,
        Commands::Angles(args) => cli::angles::execute(args, &cli.global),
        Commands::Schema => cli::schema::execute(),
    }
}
