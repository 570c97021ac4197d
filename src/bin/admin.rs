//! CLI administration tool for shortlink.
//!
//! Manages links, shows statistics and checks the database without going
//! through the HTTP API.
//!
//! # Usage
//!
//! ```bash
//! # List active links (add --all to include deleted ones)
//! cargo run --bin admin -- links list
//!
//! # Create a link with a generated or custom code
//! cargo run --bin admin -- links create https://example.com/docs --code Docs01
//!
//! # Soft-delete a link
//! cargo run --bin admin -- links delete Docs01
//!
//! # View statistics
//! cargo run --bin admin -- stats
//!
//! # Check database connection
//! cargo run --bin admin -- db check
//! ```
//!
//! # Environment Variables
//!
//! - `DATABASE_URL` (required): PostgreSQL connection string

use shortlink::domain::repositories::LinkRepository;
use shortlink::infrastructure::persistence::PgLinkRepository;
use shortlink::prelude::{AppError, Link, LinkService};

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::Confirm;
use sqlx::PgPool;
use std::sync::Arc;

/// CLI tool for managing shortlink.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage short links
    Links {
        #[command(subcommand)]
        action: LinkAction,
    },

    /// Show statistics
    Stats,

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

#[derive(Subcommand)]
enum LinkAction {
    /// List links, newest first
    List {
        /// Include soft-deleted links
        #[arg(short, long)]
        all: bool,
    },

    /// Create a short link
    Create {
        /// Absolute target URL
        url: String,

        /// Custom code (6-8 letters or digits), generated if omitted
        #[arg(short, long)]
        code: Option<String>,
    },

    /// Soft-delete a short link
    Delete {
        code: String,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },
}

#[derive(Subcommand)]
enum DbAction {
    /// Check database connection
    Check,
}

/// Row for `links list --all`, which reads deleted links the service never returns.
#[derive(sqlx::FromRow)]
struct LinkListRow {
    code: String,
    target_url: String,
    total_clicks: i64,
    created_at: DateTime<Utc>,
    deleted_at: Option<DateTime<Utc>>,
}

impl From<Link> for LinkListRow {
    fn from(link: Link) -> Self {
        Self {
            code: link.code,
            target_url: link.target_url,
            total_clicks: link.total_clicks,
            created_at: link.created_at,
            deleted_at: link.deleted_at,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;

    let pool = PgPool::connect(&database_url)
        .await
        .context("Failed to connect to database")?;

    let repo: Arc<dyn LinkRepository> = Arc::new(PgLinkRepository::new(Arc::new(pool.clone())));
    let service = LinkService::new(repo);

    match cli.command {
        Commands::Links { action } => handle_link_action(action, &service, &pool).await?,
        Commands::Stats => handle_stats(&service).await?,
        Commands::Db { action } => handle_db_action(action, &service).await?,
    }

    Ok(())
}

async fn handle_link_action(action: LinkAction, service: &LinkService, pool: &PgPool) -> Result<()> {
    match action {
        LinkAction::List { all } => list_links(service, pool, all).await,
        LinkAction::Create { url, code } => create_link(service, url, code).await,
        LinkAction::Delete { code, yes } => delete_link(service, code, yes).await,
    }
}

/// Lists links in a table.
///
/// # Output Format
///
/// ```text
///   Code      Clicks   Created            Status   Target
///   Docs01    12       2025-01-15 10:30   ACTIVE   https://example.com/docs
///   abc123    0        2025-01-14 09:12   DELETED  https://example.org
/// ```
async fn list_links(service: &LinkService, pool: &PgPool, include_deleted: bool) -> Result<()> {
    println!("{}", "Links".bright_blue().bold());
    println!();

    let rows: Vec<LinkListRow> = if include_deleted {
        sqlx::query_as::<_, LinkListRow>(
            r#"
            SELECT code, target_url, total_clicks, created_at, deleted_at
            FROM links
            ORDER BY created_at DESC, id DESC
            "#,
        )
        .fetch_all(pool)
        .await?
    } else {
        service
            .list_links(None)
            .await
            .map_err(describe)?
            .into_iter()
            .map(LinkListRow::from)
            .collect()
    };

    if rows.is_empty() {
        println!("{}", "  No links found".yellow());
        return Ok(());
    }

    println!(
        "  {:<9} {:<8} {:<18} {:<8} {}",
        "Code".bright_white().bold(),
        "Clicks".bright_white().bold(),
        "Created".bright_white().bold(),
        "Status".bright_white().bold(),
        "Target".bright_white().bold()
    );

    for row in &rows {
        let status = if row.deleted_at.is_some() {
            "DELETED".red()
        } else {
            "ACTIVE".green()
        };

        println!(
            "  {:<9} {:<8} {:<18} {:<8} {}",
            row.code.cyan(),
            row.total_clicks,
            row.created_at
                .format("%Y-%m-%d %H:%M")
                .to_string()
                .bright_black(),
            status,
            row.target_url
        );
    }

    println!();
    println!("  Total: {}", rows.len().to_string().bright_white().bold());

    Ok(())
}

async fn create_link(service: &LinkService, url: String, code: Option<String>) -> Result<()> {
    let link = service
        .create_link(Some(url), code)
        .await
        .map_err(describe)?;

    println!("{}", "Link created".green().bold());
    println!("  Code:   {}", link.code.bright_yellow().bold());
    println!("  Target: {}", link.target_url);

    Ok(())
}

/// Soft-deletes a link after confirmation (default: No).
async fn delete_link(service: &LinkService, code: String, skip_confirm: bool) -> Result<()> {
    let link = service.get_link(&code).await.map_err(describe)?;

    println!("  Code:   {}", link.code.cyan());
    println!("  Target: {}", link.target_url);
    println!("  Clicks: {}", link.total_clicks);
    println!();

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt("Delete this link?")
            .default(false)
            .interact()?;

        if !confirmed {
            println!("{}", "Cancelled".red());
            return Ok(());
        }
    }

    service.delete_link(&code).await.map_err(describe)?;

    println!("{}", "Link deleted".green().bold());

    Ok(())
}

async fn handle_stats(service: &LinkService) -> Result<()> {
    println!("{}", "Statistics".bright_blue().bold());
    println!();

    let totals = service.totals().await.map_err(describe)?;

    println!(
        "  Active links:  {}",
        totals.active.to_string().bright_green().bold()
    );
    println!(
        "  Deleted links: {}",
        totals.deleted.to_string().bright_black()
    );
    println!(
        "  Clicks:        {}",
        totals.clicks.to_string().bright_green().bold()
    );
    println!();

    Ok(())
}

async fn handle_db_action(action: DbAction, service: &LinkService) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "Checking database connection...".bright_blue());

            service.health_check().await.map_err(describe)?;

            println!("{}", "Database connection OK".green().bold());
        }
    }

    Ok(())
}

/// Turns a service error into a CLI error, keeping its details visible.
fn describe(err: AppError) -> anyhow::Error {
    match err {
        AppError::Validation { message, details }
        | AppError::NotFound { message, details }
        | AppError::Conflict { message, details }
        | AppError::Internal { message, details } => anyhow::anyhow!("{message}: {details}"),
    }
}
