#![deny(
    clippy::expect_used,
    clippy::panic,
    clippy::todo,
    clippy::unimplemented,
    clippy::unwrap_used
)]
#![allow(clippy::print_stdout, clippy::print_stderr)]

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use serde::Serialize;
use sunlight_lobbying::{
    config::Config,
    lobbying::{FilingFilter, HttpFetcher, LobbyingClient, SearchOptions, Threshold},
};
use tracing_subscriber::EnvFilter;

/// Query the Sunlight lobbying-disclosure API.
#[derive(Debug, Parser)]
#[command(name = "lobbying", version)]
struct Cli {
    /// YAML configuration file
    #[arg(long, default_value = "lobbying.yaml")]
    config: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Fetch a single filing by id
    Filing {
        id: String,
    },
    /// Search filings by client and/or registrant name
    Filings {
        #[arg(long)]
        client_name: Option<String>,
        #[arg(long)]
        registrant_name: Option<String>,
        #[arg(long)]
        year: Option<String>,
    },
    /// Fuzzy-search lobbyists by name
    Search {
        name: String,
        #[arg(long)]
        year: Option<String>,
        /// Minimum score a match must exceed
        #[arg(long, default_value_t = Threshold::DEFAULT)]
        threshold: Threshold,
    },
}

fn print_json(value: &impl Serialize) -> anyhow::Result<ExitCode> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(ExitCode::SUCCESS)
}

fn nothing_found() -> ExitCode {
    eprintln!("No matching records");
    ExitCode::FAILURE
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    // Load and validate configuration first (fail-fast)
    let config = Config::load_from(&cli.config).map_err(|e| anyhow::anyhow!("{e}"))?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_new(&config.logging.level)?)
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!(base_url = %config.api.base_url, "lobbying client configured");

    let client = LobbyingClient::new(HttpFetcher::from_config(&config.api)?);

    match cli.command {
        Command::Filing { id } => match client.get_filing(&id).await {
            Some(filing) => print_json(&filing),
            None => Ok(nothing_found()),
        },
        Command::Filings {
            client_name,
            registrant_name,
            year,
        } => {
            let filter = FilingFilter {
                client_name,
                registrant_name,
                year,
            };
            if !filter.has_name() {
                anyhow::bail!("--client-name or --registrant-name is required");
            }
            match client.filings_where(&filter).await {
                Some(filings) => print_json(&filings),
                None => Ok(nothing_found()),
            }
        }
        Command::Search {
            name,
            year,
            threshold,
        } => {
            let options = SearchOptions { year, threshold };
            match client.search_lobbyists_by_name(&name, &options).await {
                Some(lobbyists) => print_json(&lobbyists),
                None => Ok(nothing_found()),
            }
        }
    }
}
