//! CLI administration tool for the publications service.
//!
//! Provides commands for managing authors, inspecting publications,
//! viewing statistics, and performing database operations without
//! requiring HTTP API access.
//!
//! # Usage
//!
//! ```bash
//! # Register an author
//! cargo run --bin admin -- author create --login jdoe
//!
//! # List authors with their publication counts
//! cargo run --bin admin -- author list
//!
//! # Show one author
//! cargo run --bin admin -- author show jdoe
//!
//! # List every publication with its rubrics
//! cargo run --bin admin -- publication list
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

use publications::application::services::{AuthorService, PublicationService, RubricService};
use publications::domain::entities::NewAuthor;
use publications::infrastructure::persistence::{
    PgAuthorRepository, PgPublicationRepository, PgRubricRepository,
};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::{Confirm, Input};
use sqlx::PgPool;
use std::sync::Arc;

/// CLI tool for managing the publications service.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Top-level command groups.
#[derive(Subcommand)]
enum Commands {
    /// Manage authors
    Author {
        #[command(subcommand)]
        action: AuthorAction,
    },

    /// Inspect publications
    Publication {
        #[command(subcommand)]
        action: PublicationAction,
    },

    /// Show statistics
    Stats,

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

/// Author management subcommands.
#[derive(Subcommand)]
enum AuthorAction {
    /// Register a new author
    Create {
        /// Unique login (no whitespace, at most 50 characters)
        #[arg(short, long)]
        login: Option<String>,

        #[arg(long)]
        first_name: Option<String>,

        #[arg(long)]
        last_name: Option<String>,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// List all authors
    List,

    /// Show one author by login
    Show {
        login: String,
    },
}

/// Publication subcommands.
#[derive(Subcommand)]
enum PublicationAction {
    /// List all publications with their rubrics
    List,
}

/// Database operation subcommands.
#[derive(Subcommand)]
enum DbAction {
    /// Check database connection
    Check,

    /// Show database info
    Info,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;

    let pool = PgPool::connect(&database_url)
        .await
        .context("Failed to connect to database")?;

    match cli.command {
        Commands::Author { action } => handle_author_action(action, &pool).await?,
        Commands::Publication { action } => handle_publication_action(action, &pool).await?,
        Commands::Stats => handle_stats(&pool).await?,
        Commands::Db { action } => handle_db_action(action, &pool).await?,
    }

    Ok(())
}

/// Dispatches author management commands.
async fn handle_author_action(action: AuthorAction, pool: &PgPool) -> Result<()> {
    let repo = Arc::new(PgAuthorRepository::new(Arc::new(pool.clone())));
    let service = AuthorService::new(repo);

    match action {
        AuthorAction::Create {
            login,
            first_name,
            last_name,
            yes,
        } => {
            create_author(&service, login, first_name, last_name, yes).await?;
        }
        AuthorAction::List => {
            list_authors(&service).await?;
        }
        AuthorAction::Show { login } => {
            show_author(&service, &login).await?;
        }
    }

    Ok(())
}

/// Registers an author, prompting for anything not given on the command line.
async fn create_author(
    service: &AuthorService<PgAuthorRepository>,
    login: Option<String>,
    first_name: Option<String>,
    last_name: Option<String>,
    skip_confirm: bool,
) -> Result<()> {
    println!("{}", "👤 Register Author".bright_blue().bold());
    println!();

    let login = match login {
        Some(l) => l,
        None => Input::new().with_prompt("Login").interact_text()?,
    };

    let first_name = match first_name {
        Some(n) => Some(n),
        None if skip_confirm => None,
        None => optional_input("First name")?,
    };

    let last_name = match last_name {
        Some(n) => Some(n),
        None if skip_confirm => None,
        None => optional_input("Last name")?,
    };

    println!();
    println!("{}", "Author details:".bright_white().bold());
    println!("  Login:      {}", login.cyan());
    println!(
        "  First name: {}",
        first_name.as_deref().unwrap_or("-").bright_white()
    );
    println!(
        "  Last name:  {}",
        last_name.as_deref().unwrap_or("-").bright_white()
    );
    println!();

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt("Register this author?")
            .default(true)
            .interact()?;

        if !confirmed {
            println!("{}", "❌ Cancelled".red());
            return Ok(());
        }
    }

    let author = service
        .create(NewAuthor {
            login,
            first_name,
            last_name,
        })
        .await
        .map_err(|e| anyhow::anyhow!("Failed to register author: {}", e))?;

    println!();
    println!("{}", "✅ Author registered successfully!".green().bold());
    println!();
    println!("{}", "Reference it in publication bodies as:".bright_white());
    println!(
        "  {}",
        format!("\"author\": {{ \"id\": {} }}", author.id).bright_yellow()
    );
    println!();

    Ok(())
}

/// Prompts for a value that may be left empty.
fn optional_input(prompt: &str) -> Result<Option<String>> {
    let value: String = Input::new()
        .with_prompt(prompt)
        .allow_empty(true)
        .interact_text()?;

    let value = value.trim();
    Ok((!value.is_empty()).then(|| value.to_string()))
}

/// Lists all authors with their publication counts.
///
/// # Output Format
///
/// ```text
/// 📋 Authors
///
///   ID  Login                Name                           Publications  Created
///   ─────────────────────────────────────────────────────────────────────────────────
///   1   jdoe                 John Doe                       12            2026-01-15 10:30
/// ```
async fn list_authors(service: &AuthorService<PgAuthorRepository>) -> Result<()> {
    println!("{}", "📋 Authors".bright_blue().bold());
    println!();

    let authors = service
        .list()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to list authors: {}", e))?;

    if authors.is_empty() {
        println!("{}", "  No authors found".yellow());
        println!();
        println!(
            "  Create one with: {} admin author create",
            "cargo run --bin".bright_cyan()
        );
        return Ok(());
    }

    println!(
        "  {:<3} {:<20} {:<30} {:<13} {}",
        "ID".bright_white().bold(),
        "Login".bright_white().bold(),
        "Name".bright_white().bold(),
        "Publications".bright_white().bold(),
        "Created".bright_white().bold()
    );
    println!("  {}", "─".repeat(85).bright_black());

    for summary in &authors {
        println!(
            "  {:<3} {:<20} {:<30} {:<13} {}",
            summary.author.id.to_string().bright_black(),
            summary.author.login.cyan(),
            summary.author.display_name(),
            summary.publications.to_string().bright_green(),
            summary
                .created_at
                .format("%Y-%m-%d %H:%M")
                .to_string()
                .bright_black()
        );
    }

    println!();
    println!(
        "  Total: {}",
        authors.len().to_string().bright_white().bold()
    );
    println!();

    Ok(())
}

/// Prints one author's details.
async fn show_author(service: &AuthorService<PgAuthorRepository>, login: &str) -> Result<()> {
    let author = service
        .get(login)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to load author: {}", e))?;

    println!("{}", "👤 Author".bright_blue().bold());
    println!();
    println!("  ID:    {}", author.id.to_string().bright_black());
    println!("  Login: {}", author.login.cyan());
    println!("  Name:  {}", author.display_name());
    println!();
    println!("{}", "Reference it in publication bodies as:".bright_white());
    println!(
        "  {}",
        format!("\"author\": {{ \"id\": {} }}", author.id).bright_yellow()
    );
    println!();

    Ok(())
}

/// Dispatches publication commands.
async fn handle_publication_action(action: PublicationAction, pool: &PgPool) -> Result<()> {
    let pool = Arc::new(pool.clone());
    let service = PublicationService::new(
        Arc::new(PgPublicationRepository::new(pool.clone())),
        Arc::new(PgAuthorRepository::new(pool)),
    );

    match action {
        PublicationAction::List => {
            println!("{}", "📰 Publications".bright_blue().bold());
            println!();

            let publications = service
                .list_all_with_rubrics()
                .await
                .map_err(|e| anyhow::anyhow!("Failed to list publications: {}", e))?;

            if publications.is_empty() {
                println!("{}", "  No publications found".yellow());
                println!();
                return Ok(());
            }

            for publication in &publications {
                let rubrics = publication
                    .rubrics
                    .iter()
                    .map(|r| r.name.as_str())
                    .collect::<Vec<_>>()
                    .join(", ");

                println!(
                    "  {} {} {}",
                    format!("#{}", publication.id.unwrap_or_default()).bright_black(),
                    publication.title.cyan().bold(),
                    format!("by {}", publication.author.login).bright_white()
                );
                println!(
                    "      {}  {}",
                    publication
                        .publication_date
                        .format("%Y-%m-%d %H:%M")
                        .to_string()
                        .bright_black(),
                    if rubrics.is_empty() {
                        "no rubrics".bright_black()
                    } else {
                        rubrics.green()
                    }
                );
            }

            println!();
            println!(
                "  Total: {}",
                publications.len().to_string().bright_white().bold()
            );
            println!();
        }
    }

    Ok(())
}

/// Displays entity counts.
async fn handle_stats(pool: &PgPool) -> Result<()> {
    println!("{}", "📊 Statistics".bright_blue().bold());
    println!();

    let pool = Arc::new(pool.clone());
    let publications = PublicationService::new(
        Arc::new(PgPublicationRepository::new(pool.clone())),
        Arc::new(PgAuthorRepository::new(pool.clone())),
    );
    let rubrics = RubricService::new(Arc::new(PgRubricRepository::new(pool.clone())));
    let authors = AuthorService::new(Arc::new(PgAuthorRepository::new(pool)));

    let publications_count = publications
        .count()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to count publications: {}", e))?;
    let rubrics_count = rubrics
        .count()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to count rubrics: {}", e))?;
    let authors_count = authors
        .list()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to list authors: {}", e))?
        .len();

    println!(
        "  Publications:   {}",
        publications_count.to_string().bright_green().bold()
    );
    println!(
        "  Rubrics:        {}",
        rubrics_count.to_string().bright_green().bold()
    );
    println!(
        "  Authors:        {}",
        authors_count.to_string().bright_green().bold()
    );
    println!();

    Ok(())
}

/// Handles database diagnostic commands.
async fn handle_db_action(action: DbAction, pool: &PgPool) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "🔍 Checking database connection...".bright_blue());

            sqlx::query("SELECT 1").fetch_one(pool).await?;

            println!("{}", "✅ Database connection OK".green().bold());
        }
        DbAction::Info => {
            println!("{}", "ℹ️  Database Information".bright_blue().bold());
            println!();

            let version: String = sqlx::query_scalar("SELECT version()")
                .fetch_one(pool)
                .await?;

            let migrations: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM _sqlx_migrations")
                .fetch_one(pool)
                .await
                .unwrap_or(0);

            println!("  PostgreSQL: {}", version.bright_white());
            println!(
                "  Migrations: {}",
                migrations.to_string().bright_white()
            );
            println!();
        }
    }

    Ok(())
}
