//! Command-line interface for remix-lineage.
//!
//! Provides commands for printing a content item's remix chain, its
//! "remix of" breadcrumb, the merged record snapshot, and the resolved
//! configuration.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use crate::config::{self, RecordSource};
use crate::lineage::{LineageError, LineageService};
use crate::sources::{ContentProvider, HttpProvider, RecordStore, StaticCatalog};

pub mod render;

/// remix-lineage - Reconstruct remix chains from content records
#[derive(Parser, Debug)]
#[command(name = "remix-lineage")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the full remix chain containing a content item
    Tree {
        /// Content ID
        content_id: String,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the "remix of" path from the root down to a content item
    Breadcrumb {
        /// Content ID
        content_id: String,
    },

    /// List every record in the merged snapshot
    Records {
        /// Maximum number of records to show
        #[arg(short, long, default_value = "50")]
        limit: usize,
    },

    /// Show resolved configuration (debug)
    Config,
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(self) -> Result<()> {
        match self.command {
            Commands::Tree { content_id, json } => show_tree(&content_id, json).await,
            Commands::Breadcrumb { content_id } => show_breadcrumb(&content_id).await,
            Commands::Records { limit } => list_records(limit).await,
            Commands::Config => show_config(),
        }
    }
}

/// Build a lineage service from the resolved configuration
async fn open_service() -> Result<LineageService<Box<dyn ContentProvider>>> {
    let config = config::config()?;

    let provider: Box<dyn ContentProvider> = match &config.source {
        RecordSource::File(path) => Box::new(RecordStore::new(path)),
        RecordSource::Http { url, timeout } => Box::new(HttpProvider::new(url, *timeout)?),
    };

    let catalog = StaticCatalog::load(&config.catalog)
        .await
        .context("Failed to load static catalog")?;

    Ok(LineageService::new(provider, catalog))
}

/// Turn a failed query into the user-facing error, keeping the fetch cause
fn query_failed(err: LineageError) -> anyhow::Error {
    tracing::debug!(error = ?err, "Lineage query failed");
    let message = err.user_message();
    match err {
        LineageError::FetchFailure(cause) => cause.context(message),
        LineageError::NotFound { .. } => anyhow::anyhow!(message),
    }
}

/// Print the lineage tree of a content item
async fn show_tree(content_id: &str, json: bool) -> Result<()> {
    let service = open_service().await?;
    let report = service.trace(content_id).await.map_err(query_failed)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    print!("{}", render::render_tree(&report.tree));

    if !report.diagnostics.is_empty() {
        eprintln!();
        for diagnostic in &report.diagnostics {
            eprintln!("warning: {}", diagnostic);
        }
    }

    Ok(())
}

/// Print the root-to-item breadcrumb
async fn show_breadcrumb(content_id: &str) -> Result<()> {
    let service = open_service().await?;
    let tree = service.get_lineage(content_id).await.map_err(query_failed)?;

    let path = tree
        .path_to(content_id)
        .context("Queried item missing from its own lineage")?;
    println!("{}", render::render_breadcrumb(&path));

    Ok(())
}

/// List the merged snapshot
async fn list_records(limit: usize) -> Result<()> {
    let service = open_service().await?;
    let nodes = service.snapshot().await.map_err(query_failed)?;

    if nodes.is_empty() {
        println!("No records found");
        return Ok(());
    }

    println!(
        "{:<20} {:<30} {:<10} {:<8} {:<20}",
        "ID", "TITLE", "KIND", "ORIGIN", "REMIX OF"
    );
    println!("{}", "-".repeat(92));

    for node in nodes.iter().take(limit) {
        let title = if node.title.chars().count() > 28 {
            format!("{}...", node.title.chars().take(25).collect::<String>())
        } else {
            node.title.clone()
        };
        println!(
            "{:<20} {:<30} {:<10} {:<8} {:<20}",
            node.id,
            title,
            node.kind.as_str(),
            node.origin.to_string(),
            node.parent().unwrap_or("-")
        );
    }

    if nodes.len() > limit {
        println!("... and {} more", nodes.len() - limit);
    }

    Ok(())
}

/// Show resolved configuration
fn show_config() -> Result<()> {
    let config = config::config()?;

    println!("remix-lineage configuration");
    println!("===========================");
    match &config.config_file {
        Some(path) => println!("Config file: {}", path.display()),
        None => println!("Config file: (none, using defaults)"),
    }
    println!("Home:        {}", config.home.display());
    match &config.source {
        RecordSource::File(path) => println!("Records:     {}", path.display()),
        RecordSource::Http { url, timeout } => {
            println!("Records:     {} (timeout {}s)", url, timeout.as_secs())
        }
    }
    println!("Catalog:     {}", config.catalog.display());

    Ok(())
}
