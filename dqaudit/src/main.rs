// dqaudit/src/main.rs

mod cli;
mod commands;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // RUST_LOG=debug dqaudit run ... to see the details
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            project_dir,
            fail_on_sla,
        } => commands::run::execute(project_dir, fail_on_sla).await,
        Commands::History { project_dir, limit } => commands::history::execute(project_dir, limit),
        Commands::Validate { project_dir } => commands::validate::execute(project_dir),
    }
}
