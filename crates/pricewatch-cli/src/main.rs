mod check;
mod records;
mod render;

use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "pricewatch")]
#[command(about = "Check Mercado Libre listings for price, stock and delivery")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Check one listing and print its product record
    Check {
        url: String,
        /// Save a report of this check to the history file
        #[arg(long)]
        save: bool,
        /// Print the raw record as JSON instead of a summary
        #[arg(long)]
        json: bool,
    },
    /// Show logged check outcomes, oldest first
    Logs {
        /// Only show the most recent N entries
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Manage saved reports
    History {
        #[command(subcommand)]
        command: HistoryCommands,
    },
}

#[derive(Debug, Subcommand)]
enum HistoryCommands {
    /// List saved reports, newest first
    List,
    /// Remove the report saved at the given RFC 3339 timestamp
    Remove { timestamp: DateTime<Utc> },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = pricewatch_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Check { url, save, json } => {
            check::run_check(&config, &url, check::CheckOptions { save, json }).await
        }
        Commands::Logs { limit } => records::run_logs(&config, limit).await,
        Commands::History { command } => match command {
            HistoryCommands::List => records::run_history_list(&config).await,
            HistoryCommands::Remove { timestamp } => {
                records::run_history_remove(&config, timestamp).await
            }
        },
    }
}
