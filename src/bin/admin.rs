//! CLI administration tool for urlzip.
//!
//! Works directly against the configured record store, without going through the
//! HTTP API.
//!
//! # Usage
//!
//! ```bash
//! # Shorten a URL, optionally with a custom alias
//! cargo run --bin urlzip-admin -- shorten https://example.com/docs --alias docs
//!
//! # Show a record with its click count and expiry
//! cargo run --bin urlzip-admin -- inspect docs
//!
//! # Write the QR code PNG for a short link
//! cargo run --bin urlzip-admin -- qr docs --output docs.png
//!
//! # Check the store connection
//! cargo run --bin urlzip-admin -- db check
//!
//! # Delete expired rows (PostgreSQL only)
//! cargo run --bin urlzip-admin -- db purge
//! ```
//!
//! # Environment Variables
//!
//! Same as the server (see [`urlzip::config`]). The in-memory store lives only as
//! long as one process, so a PostgreSQL or Redis connection is required.

use urlzip::config::{self, Config, StoreBackend};
use urlzip::infrastructure::persistence::RedisRecordStore;
use urlzip::infrastructure::rendering::QrPngRenderer;
use urlzip::prelude::*;
use urlzip::server::connect_postgres;

use anyhow::{Context, Result};
use chrono::DateTime;
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::Confirm;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// CLI tool for managing urlzip.
#[derive(Parser)]
#[command(name = "urlzip-admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Top-level commands.
#[derive(Subcommand)]
enum Commands {
    /// Create a short link
    Shorten {
        /// URL to shorten
        url: String,

        /// Custom short code instead of a random one
        #[arg(short, long)]
        alias: Option<String>,
    },

    /// Show a short link record
    Inspect {
        /// Short code to look up
        code: String,
    },

    /// Write the QR code PNG of a short link
    Qr {
        /// Short code to render
        code: String,

        /// Destination file
        #[arg(short, long)]
        output: PathBuf,

        /// Overwrite the destination without asking
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// Store operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

/// Store operation subcommands.
#[derive(Subcommand)]
enum DbAction {
    /// Check store connection
    Check,

    /// Delete expired records (PostgreSQL only)
    Purge {
        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = config::load_from_env()?;

    match cli.command {
        Commands::Shorten { url, alias } => {
            let store = open_store(&config).await?;
            handle_shorten(store, &config, &url, alias.as_deref()).await?
        }
        Commands::Inspect { code } => {
            let store = open_store(&config).await?;
            handle_inspect(store, &code).await?
        }
        Commands::Qr { code, output, yes } => {
            let store = open_store(&config).await?;
            handle_qr(store, &config, &code, &output, yes).await?
        }
        Commands::Db { action } => handle_db_action(action, &config).await?,
    }

    Ok(())
}

/// Connects to the configured persistent store.
async fn open_store(config: &Config) -> Result<Arc<dyn RecordStore>> {
    match config.store_backend {
        StoreBackend::Postgres => Ok(Arc::new(connect_postgres(config).await?)),
        StoreBackend::Redis => {
            let url = config
                .redis_url
                .as_deref()
                .context("REDIS_URL must be set")?;

            let store = RedisRecordStore::connect(url, &config.table_name)
                .await
                .context("Failed to connect to Redis")?;

            Ok(Arc::new(store))
        }
        StoreBackend::Memory => anyhow::bail!(
            "The in-memory store is not shared between processes; set DATABASE_URL or REDIS_URL"
        ),
    }
}

/// Creates a short link through the same service the HTTP API uses.
async fn handle_shorten(
    store: Arc<dyn RecordStore>,
    config: &Config,
    url: &str,
    alias: Option<&str>,
) -> Result<()> {
    println!("{}", "🔗 Shorten URL".bright_blue().bold());
    println!();

    let service = ShortenService::new(store, config.service_settings());

    let record = service
        .shorten(url, alias)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to shorten URL: {}", e))?;

    println!("{}", "✅ Short link created".green().bold());
    println!();
    println!("  Code:      {}", record.short_code.cyan());
    println!("  Short URL: {}", record.short_url.bright_yellow().bold());
    println!("  Target:    {}", record.original_url.bright_white());
    println!();

    Ok(())
}

/// Prints a record, including its click count and expiry.
///
/// # Output Format
///
/// ```text
/// 🔍 Short link
///
///   Code:      docs
///   Short URL: https://s.example.com/docs
///   Target:    https://example.com/docs
///   Created:   2025-01-15 10:30:00 UTC
///   Expires:   2026-01-15 10:30:00 UTC
///   Clicks:    42
/// ```
async fn handle_inspect(store: Arc<dyn RecordStore>, code: &str) -> Result<()> {
    println!("{}", "🔍 Short link".bright_blue().bold());
    println!();

    let record = store
        .get_record(code)
        .await
        .map_err(|e| anyhow::anyhow!("Store error: {}", e))?;

    let Some(record) = record else {
        println!("{}", format!("  No live record for '{}'", code).yellow());
        return Ok(());
    };

    let expires = DateTime::from_timestamp(record.expires_at, 0)
        .map(|t| t.format("%Y-%m-%d %H:%M:%S UTC").to_string())
        .unwrap_or_else(|| record.expires_at.to_string());

    println!("  Code:      {}", record.short_code.cyan());
    println!("  Short URL: {}", record.short_url.bright_yellow());
    println!("  Target:    {}", record.original_url.bright_white());
    println!(
        "  Created:   {}",
        record
            .created_at
            .format("%Y-%m-%d %H:%M:%S UTC")
            .to_string()
            .bright_black()
    );
    println!("  Expires:   {}", expires.bright_black());
    println!(
        "  Clicks:    {}",
        record.clicks.to_string().bright_green().bold()
    );
    println!();

    Ok(())
}

/// Renders the QR code for `code` and writes it to `output`.
async fn handle_qr(
    store: Arc<dyn RecordStore>,
    config: &Config,
    code: &str,
    output: &Path,
    skip_confirm: bool,
) -> Result<()> {
    println!("{}", "🖼️  QR code".bright_blue().bold());
    println!();

    if output.exists() && !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt(format!("{} exists. Overwrite?", output.display()))
            .default(false)
            .interact()?;

        if !confirmed {
            println!("{}", "❌ Cancelled".red());
            return Ok(());
        }
    }

    let service = CodeImageService::new(
        store,
        Arc::new(QrPngRenderer::new()),
        config.service_settings(),
    );

    let image = service
        .render_image(code)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to render QR code: {}", e))?;

    std::fs::write(output, &image.bytes)
        .with_context(|| format!("Failed to write {}", output.display()))?;

    println!(
        "{}",
        format!("✅ Wrote {} bytes to {}", image.bytes.len(), output.display())
            .green()
            .bold()
    );
    println!();

    Ok(())
}

/// Handles store diagnostic commands.
async fn handle_db_action(action: DbAction, config: &Config) -> Result<()> {
    match action {
        DbAction::Check => {
            println!(
                "{}",
                format!("🔍 Checking {} store...", config.store_backend).bright_blue()
            );

            let store = open_store(config).await?;

            if !store.health_check().await {
                anyhow::bail!("Store health check failed");
            }

            println!("{}", "✅ Store connection OK".green().bold());
        }
        DbAction::Purge { yes } => {
            if config.store_backend != StoreBackend::Postgres {
                println!(
                    "{}",
                    format!(
                        "⚠️  The {} store expires records itself; nothing to purge",
                        config.store_backend
                    )
                    .yellow()
                );
                return Ok(());
            }

            println!("{}", "🧹 Purge expired records".bright_blue().bold());
            println!();
            println!("  Table: {}", config.table_name.cyan());
            println!();

            if !yes {
                let confirmed = Confirm::new()
                    .with_prompt("Delete all expired records?")
                    .default(false)
                    .interact()?;

                if !confirmed {
                    println!("{}", "❌ Cancelled".red());
                    return Ok(());
                }
            }

            let store = connect_postgres(config).await?;
            let purged = store
                .purge_expired()
                .await
                .map_err(|e| anyhow::anyhow!("Failed to purge records: {}", e))?;

            println!(
                "{}",
                format!("✅ Purged {} expired records", purged).green().bold()
            );
        }
    }

    Ok(())
}
