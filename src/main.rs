use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

mod cli;
mod config;
mod editor;
mod error;
mod explorer;
mod interests;
mod output;
mod parser;
mod pipeline;
mod planner;
mod provider;
mod runner;
mod scout;

use cli::{Cli, Commands};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize tracing - only show logs with --verbose
    let filter = if cli.verbose {
        EnvFilter::new("wayfinder=debug")
    } else {
        EnvFilter::new("wayfinder=warn")
    };

    fmt().with_env_filter(filter).with_target(false).init();

    match cli.command {
        Commands::Run(args) => cli::run::execute(args).await,
        Commands::Edit(args) => cli::edit::execute(args).await,
        Commands::Interests => cli::interests::execute(),
        Commands::Schema => cli::schema::execute(),
    }
}
