use crate::errors::AppResult;
use clap::{Parser, Subcommand};

pub mod commands;

/// Solana program fixture provisioning
#[derive(Parser)]
#[command(name = "program-fixtures")]
#[command(about = "Solana program artifact cache and fixture materialiser")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// List known programs and their groupings
    List(commands::list::ListCommand),
    /// Download program artifacts into the local cache
    Fetch(commands::fetch::FetchCommand),
    /// Copy a program group into a directory
    Materialize(commands::materialize::MaterializeCommand),
}

pub async fn run() -> AppResult<()> {
    // Uses RUST_LOG environment variable (defaults to "info" if not set)
    // stdout carries command output
    let _ = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .try_init();

    let cli = Cli::parse();

    match cli.command {
        Commands::List(command) => command.run(),
        Commands::Fetch(command) => command.run().await,
        Commands::Materialize(command) => command.run().await,
    }
}
