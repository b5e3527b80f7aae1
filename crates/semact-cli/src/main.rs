//! Semact CLI - natural-language actions over a JSON dataset file.

mod commands;
mod data;

use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "semact")]
#[command(author, version, about = "Semact - natural-language CRUD over record collections", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Dataset file: a JSON object of collection name -> array of records
    #[arg(short, long, global = true, default_value = "dataset.json")]
    data: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Rank candidate actions for a query
    Propose {
        /// Free-text query
        query: String,

        /// Maximum intent matches to fan out from
        #[arg(short, long, default_value = "6")]
        top: usize,

        /// Print candidates as JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Propose, execute the best candidate, and write the dataset back
    Apply {
        /// Free-text query
        query: String,

        /// Show the winning candidate without executing it
        #[arg(long)]
        dry_run: bool,
    },

    /// Show index statistics for the dataset
    Stats,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Propose { query, top, json } => {
            commands::propose::run(&cli.data, &query, top, json).await
        }
        Commands::Apply { query, dry_run } => {
            commands::apply::run(&cli.data, &query, dry_run).await
        }
        Commands::Stats => commands::stats::run(&cli.data).await,
    }
}
