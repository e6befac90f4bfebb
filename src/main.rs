//! # mevzuat-sync CLI (`mvz`)
//!
//! The `mvz` binary is the primary interface for mevzuat-sync. It provides
//! commands for database initialization, ingesting recent legislation from
//! the remote API, inspecting stored documents, and starting the HTTP API.
//!
//! ## Usage
//!
//! ```bash
//! mvz --config ./config/mvz.toml <command>
//! ```
//!
//! ## Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `mvz init` | Create the SQLite database and seed the category table |
//! | `mvz sync` | Fetch, classify, and store recently published legislation |
//! | `mvz get <number>` | Show a stored document and its articles |
//! | `mvz categories` | List categories with document counts |
//! | `mvz serve api` | Start the HTTP API server |
//!
//! ## Examples
//!
//! ```bash
//! # Initialize the database
//! mvz init --config ./config/mvz.toml
//!
//! # Ingest the last two weeks, at most 50 documents
//! mvz sync --days 14 --limit 50 --config ./config/mvz.toml
//!
//! # See what a sync would insert without writing
//! mvz sync --dry-run --config ./config/mvz.toml
//!
//! # Start the HTTP API
//! mvz serve api --config ./config/mvz.toml
//! ```

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use mevzuat_sync::{categories, client, config, get, ingest, migrate, server};

/// mevzuat-sync CLI: a legislation ingestion pipeline and HTTP API wrapper
/// for mevzuat.gov.tr.
///
/// All commands accept a `--config` flag pointing to a TOML configuration
/// file.
#[derive(Parser)]
#[command(
    name = "mvz",
    about = "mevzuat-sync: Turkish legislation ingestion pipeline and HTTP API wrapper",
    version,
    long_about = "mevzuat-sync pulls recently published legislation from mevzuat.gov.tr, \
    classifies it into fixed legal categories, normalizes the records, and stores documents \
    and their articles in SQLite, deduplicated by document number."
)]
struct Cli {
    /// Path to configuration file (TOML).
    #[arg(long, global = true, default_value = "./config/mvz.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

/// Top-level CLI commands.
#[derive(Subcommand)]
enum Commands {
    /// Initialize the database schema.
    ///
    /// Creates the SQLite database file, the categories/documents/articles
    /// tables, and seeds the fixed category set. This command is idempotent;
    /// running it multiple times is safe.
    Init,

    /// Fetch, classify, and store recently published legislation.
    ///
    /// Searches the remote API over a trailing date window, skips documents
    /// already stored (by document number), fetches detail and article data
    /// for the rest, and writes them to the database. Prints a per-run
    /// summary of inserted/skipped/failed candidates.
    Sync {
        /// Size of the trailing date window, in days.
        #[arg(long, default_value_t = 7)]
        days: i64,

        /// Report candidate and new-document counts without writing.
        #[arg(long)]
        dry_run: bool,

        /// Maximum number of candidates to process.
        #[arg(long)]
        limit: Option<usize>,
    },

    /// Show a stored document and its articles.
    Get {
        /// Official document number (the natural key).
        number: String,
    },

    /// List categories with per-category document counts.
    Categories,

    /// Start the HTTP API server.
    ///
    /// Exposes the remote search/detail/article operations as a JSON API
    /// on the configured bind address.
    Serve {
        #[command(subcommand)]
        service: ServeService,
    },
}

/// Server subcommands.
#[derive(Subcommand)]
enum ServeService {
    /// Start the JSON HTTP API.
    Api,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let cfg = config::load_config(&cli.config)?;

    match cli.command {
        Commands::Init => {
            migrate::run_migrations(&cfg).await?;
            println!("Database initialized successfully.");
        }
        Commands::Sync {
            days,
            dry_run,
            limit,
        } => {
            let client = client::MevzuatClient::new(&cfg.remote)?;
            ingest::run_sync(&cfg, &client, days, dry_run, limit).await?;
        }
        Commands::Get { number } => {
            get::run_get(&cfg, &number).await?;
        }
        Commands::Categories => {
            categories::run_categories(&cfg).await?;
        }
        Commands::Serve { service } => match service {
            ServeService::Api => {
                server::run_server(&cfg).await?;
            }
        },
    }

    Ok(())
}
