mod cli;
mod commands;

use anyhow::Result;
use clap::Parser;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = cli::Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level)),
        )
        .init();

    match cli.command {
        cli::Commands::Export(args) => commands::export::handle(args).await,
        cli::Commands::Anonymize(args) => commands::anonymize::handle(args),
        cli::Commands::CheckEnv => commands::check_env::handle().await,
        cli::Commands::Audit { directory, json } => commands::audit::handle(&directory, json),
    }
}
