//! CLI administration tool for tinyurl.
//!
//! Talks to the configured record store directly, without the HTTP server.
//!
//! # Usage
//!
//! ```bash
//! # Shorten a URL
//! cargo run --bin admin -- shorten https://example.com/very/long/path
//!
//! # Show a record and its click count (does not count a click)
//! cargo run --bin admin -- stats 2aZk9Q
//!
//! # Check store connectivity
//! cargo run --bin admin -- store check
//! ```
//!
//! # Environment Variables
//!
//! Same as the server: `STORE_BACKEND`, `DATABASE_URL`, `REDIS_URL`,
//! `TABLE_NAME`, `DOMAIN`, `MAX_SHORTEN_ATTEMPTS`. See [`tinyurl::config`].

use tinyurl::AppError;
use tinyurl::config::{self, Config, StoreBackend};
use tinyurl::infrastructure::persistence::connect_store;
use tinyurl::state::AppState;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;

/// CLI tool for managing tinyurl records.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a short URL
    Shorten {
        /// Long URL to shorten (http or https)
        url: String,
    },

    /// Show a record without counting a click
    Stats {
        /// Short identifier
        short_id: String,
    },

    /// Record store operations
    Store {
        #[command(subcommand)]
        action: StoreAction,
    },
}

#[derive(Subcommand)]
enum StoreAction {
    /// Check store connection
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let config = config::load_from_env().context("Invalid configuration")?;
    if config.store_backend == StoreBackend::Memory {
        println!(
            "{}",
            "Warning: STORE_BACKEND=memory, changes are discarded on exit".yellow()
        );
        println!();
    }

    let store = connect_store(&config).await?;
    let state = AppState::from_config(store, &config);

    match cli.command {
        Commands::Shorten { url } => handle_shorten(&state, &url).await?,
        Commands::Stats { short_id } => handle_stats(&state, &short_id).await?,
        Commands::Store { action } => handle_store_action(action, &state, &config).await?,
    }

    Ok(())
}

async fn handle_shorten(state: &AppState, url: &str) -> Result<()> {
    println!("{}", "Create short URL".bright_blue().bold());
    println!();

    let short = state
        .shorten_service
        .shorten(Some(url))
        .await
        .map_err(describe)?;

    println!("  Short URL: {}", short.short_url.bright_green().bold());
    println!("  Short ID:  {}", short.short_id.bright_white());
    println!();

    Ok(())
}

/// Prints a record and its click count.
async fn handle_stats(state: &AppState, short_id: &str) -> Result<()> {
    println!("{}", "Record statistics".bright_blue().bold());
    println!();

    let record = state
        .redirect_service
        .peek(short_id)
        .await
        .map_err(describe)?;

    println!("  Short ID:   {}", record.short_id.bright_white());
    println!("  Target URL: {}", record.long_url);
    println!(
        "  Created at: {}",
        record.created_at.format("%Y-%m-%d %H:%M:%S UTC")
    );
    println!(
        "  Clicks:     {}",
        record.click_count.to_string().bright_green().bold()
    );
    println!();

    Ok(())
}

async fn handle_store_action(action: StoreAction, state: &AppState, config: &Config) -> Result<()> {
    match action {
        StoreAction::Check => {
            println!(
                "{}",
                format!("Checking {} record store...", config.store_backend).bright_blue()
            );

            if state.store.health_check().await {
                println!("{}", "Record store connection OK".green().bold());
            } else {
                anyhow::bail!("Record store health check failed");
            }
        }
    }

    Ok(())
}

/// Keeps the internal detail for the operator, unlike the HTTP response.
fn describe(error: AppError) -> anyhow::Error {
    anyhow::anyhow!("{} ({})", error, error.kind())
}
