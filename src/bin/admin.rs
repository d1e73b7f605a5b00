//! CLI administration tool for wiki-intro.
//!
//! Manages users and their preferred languages, inspects cached
//! introductions, and checks the database without going through the HTTP API.
//!
//! # Usage
//!
//! ```bash
//! # Create a user with a preferred language
//! cargo run --bin admin -- user create --name alice --language fr
//!
//! # List all users
//! cargo run --bin admin -- user list
//!
//! # Change a user's preferred language
//! cargo run --bin admin -- user set-language alice de
//!
//! # Revoke a user's credential
//! cargo run --bin admin -- user revoke alice
//!
//! # Inspect or purge a cached introduction
//! cargo run --bin admin -- cache show en Cat
//! cargo run --bin admin -- cache purge en Cat
//!
//! # Check database connection
//! cargo run --bin admin -- db check
//! ```
//!
//! # Environment Variables
//!
//! Same as the server (see [`wiki_intro::config`]); `REDIS_URL` is only
//! needed for the `cache` commands.

use wiki_intro::application::services::user_service::hash_credential;
use wiki_intro::config::{self, Config};
use wiki_intro::domain::cache_key::CacheKey;
use wiki_intro::domain::entities::{CacheEntry, UserProfile};
use wiki_intro::domain::language::is_valid_language;
use wiki_intro::domain::repositories::UserRepository;
use wiki_intro::infrastructure::cache::{CacheStore, RedisCache};
use wiki_intro::infrastructure::persistence::PgUserRepository;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::{Confirm, Input};
use sqlx::PgPool;
use std::sync::Arc;

/// CLI tool for managing wiki-intro.
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
    /// Manage users
    User {
        #[command(subcommand)]
        action: UserAction,
    },

    /// Inspect cached introductions
    Cache {
        #[command(subcommand)]
        action: CacheAction,
    },

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

/// User management subcommands.
#[derive(Subcommand)]
enum UserAction {
    /// Create a new user and issue a credential
    Create {
        /// User name (unique)
        #[arg(short, long)]
        name: Option<String>,

        /// Preferred Wikipedia language (e.g. "en", "fr")
        #[arg(short, long)]
        language: Option<String>,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// List all users
    List,

    /// Change a user's preferred language
    SetLanguage {
        /// User name or ID
        name_or_id: String,

        /// New preferred language
        language: String,
    },

    /// Revoke a user's credential
    Revoke {
        /// User name or ID
        name_or_id: String,
    },
}

/// Cache subcommands.
#[derive(Subcommand)]
enum CacheAction {
    /// Show the cached introduction of an article
    Show { language: String, article: String },

    /// Remove the cached introduction of an article
    Purge { language: String, article: String },
}

/// Database operation subcommands.
#[derive(Subcommand)]
enum DbAction {
    /// Check database connection
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = config::load_from_env()?;

    match cli.command {
        Commands::User { action } => handle_user_action(action, &config).await?,
        Commands::Cache { action } => handle_cache_action(action, &config).await?,
        Commands::Db { action } => handle_db_action(action, &config).await?,
    }

    Ok(())
}

async fn connect_db(config: &Config) -> Result<PgPool> {
    PgPool::connect(&config.database_url)
        .await
        .context("Failed to connect to database")
}

/// Dispatches user management commands.
async fn handle_user_action(action: UserAction, config: &Config) -> Result<()> {
    let pool = connect_db(config).await?;
    let repo = PgUserRepository::new(Arc::new(pool));

    match action {
        UserAction::Create {
            name,
            language,
            yes,
        } => create_user(&repo, config, name, language, yes).await,
        UserAction::List => list_users(&repo).await,
        UserAction::SetLanguage {
            name_or_id,
            language,
        } => set_language(&repo, &name_or_id, &language).await,
        UserAction::Revoke { name_or_id } => revoke_user(&repo, &name_or_id).await,
    }
}

/// Creates a new user with interactive prompts.
///
/// # Flow
///
/// 1. Prompt for name and preferred language (or use provided)
/// 2. Generate a random credential
/// 3. Confirm creation (unless `--yes` flag)
/// 4. Store the HMAC of the credential
/// 5. Display the credential once
async fn create_user(
    repo: &PgUserRepository,
    config: &Config,
    name: Option<String>,
    language: Option<String>,
    skip_confirm: bool,
) -> Result<()> {
    println!("{}", "👤 Create User".bright_blue().bold());
    println!();

    let name = match name {
        Some(n) => n,
        None => Input::new().with_prompt("User name").interact_text()?,
    };

    let language = match language {
        Some(l) => l,
        None => Input::new()
            .with_prompt("Preferred language")
            .with_initial_text(config.default_language.clone())
            .interact_text()?,
    };
    let language = parse_language(&language)?;

    let credential = generate_credential();

    println!("{}", "User details:".bright_white().bold());
    println!("  Name:     {}", name.cyan());
    println!("  Language: {}", language.cyan());
    println!();

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt("Create this user?")
            .default(true)
            .interact()?;

        if !confirmed {
            println!("{}", "❌ Cancelled".red());
            return Ok(());
        }
    }

    let token_hash = hash_credential(&config.token_signing_secret, &credential);

    let user = repo
        .create_user(&name, &token_hash, &language)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to create user: {}", e))?;

    println!();
    println!("{}", "✅ User created successfully!".green().bold());
    println!("  ID:         {}", user.id.to_string().bright_black());
    println!("  Credential: {}", credential.bright_yellow().bold());
    println!();
    println!(
        "{}",
        "⚠️  IMPORTANT: Save this credential now! You won't be able to see it again."
            .red()
            .bold()
    );
    println!();
    println!("{}", "Example:".bright_white());
    println!(
        "  curl -H \"Authorization: Bearer {}\" http://localhost:3000/introduction/Cat",
        credential.bright_yellow()
    );
    println!();

    Ok(())
}

/// Lists all users with status indicators.
async fn list_users(repo: &PgUserRepository) -> Result<()> {
    println!("{}", "📋 Users".bright_blue().bold());
    println!();

    let users = repo
        .list_users()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to list users: {}", e))?;

    if users.is_empty() {
        println!("{}", "  No users found".yellow());
        println!();
        println!(
            "  Create one with: {} admin user create",
            "cargo run --bin".bright_cyan()
        );
        return Ok(());
    }

    println!(
        "  {:<4} {:<24} {:<8} {:<18} {:<18} {:<10}",
        "ID".bright_white().bold(),
        "Name".bright_white().bold(),
        "Lang".bright_white().bold(),
        "Created".bright_white().bold(),
        "Last seen".bright_white().bold(),
        "Status".bright_white().bold()
    );
    println!("  {}", "─".repeat(86).bright_black());

    for user in &users {
        let status = if user.is_active() {
            "ACTIVE".green()
        } else {
            "REVOKED".red()
        };

        println!(
            "  {:<4} {:<24} {:<8} {:<18} {:<18} {}",
            user.id.to_string().bright_black(),
            user.name.cyan(),
            user.preferred_language,
            format_time(Some(user.created_at)).bright_black(),
            format_time(user.last_seen_at).bright_black(),
            status
        );
    }

    println!();
    println!("  Total: {}", users.len().to_string().bright_white().bold());
    println!();

    Ok(())
}

fn format_time(time: Option<DateTime<Utc>>) -> String {
    time.map(|t| t.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| "never".to_string())
}

/// Normalizes and checks a preferred language before it is stored.
fn parse_language(raw: &str) -> Result<String> {
    let language = raw.trim().to_string();
    anyhow::ensure!(
        is_valid_language(&language),
        "Invalid language code '{}': expected something like 'en', 'fr' or 'zh-yue'",
        raw
    );
    Ok(language)
}

/// Looks a user up by numeric ID, or by exact name otherwise.
async fn find_user(repo: &PgUserRepository, name_or_id: &str) -> Result<UserProfile> {
    let user = match name_or_id.parse::<i64>() {
        Ok(id) => repo.find_by_id(id).await,
        Err(_) => repo.find_by_name(name_or_id).await,
    }
    .map_err(|e| anyhow::anyhow!("Database error: {}", e))?;

    user.context("User not found")
}

async fn set_language(repo: &PgUserRepository, name_or_id: &str, language: &str) -> Result<()> {
    let language = parse_language(language)?;
    let user = find_user(repo, name_or_id).await?;

    repo.update_preferred_language(user.id, &language)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to update user: {}", e))?;

    println!(
        "{} {} → {}",
        "✅ Preferred language updated:".green().bold(),
        user.preferred_language.bright_black(),
        language.cyan()
    );

    Ok(())
}

/// Revokes a user's credential with confirmation prompt.
async fn revoke_user(repo: &PgUserRepository, name_or_id: &str) -> Result<()> {
    println!("{}", "🔒 Revoke User".bright_blue().bold());
    println!();

    let user = find_user(repo, name_or_id).await?;

    if !user.is_active() {
        println!("{}", "⚠️  This user is already revoked".yellow());
        return Ok(());
    }

    println!("  User: {}", user.name.cyan());
    println!("  ID:   {}", user.id.to_string().bright_black());
    println!();

    let confirmed = Confirm::new()
        .with_prompt("Revoke this user?")
        .default(false)
        .interact()?;

    if !confirmed {
        println!("{}", "❌ Cancelled".red());
        return Ok(());
    }

    repo.revoke_user(user.id)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to revoke user: {}", e))?;

    println!();
    println!("{}", "✅ User revoked successfully!".green().bold());
    println!();

    Ok(())
}

/// Dispatches cache inspection commands against Redis.
async fn handle_cache_action(action: CacheAction, config: &Config) -> Result<()> {
    let redis_url = config
        .redis_url
        .as_deref()
        .context("REDIS_URL must be set for cache commands")?;
    let cache = RedisCache::connect(redis_url, config.cache_ttl_seconds).await?;

    match action {
        CacheAction::Show { language, article } => {
            let key = CacheKey::new(&language, &article);

            match cache.get(key.as_str()).await? {
                Some(raw) => {
                    let entry = CacheEntry::from_json(&raw)
                        .with_context(|| format!("Malformed cache entry under {}", key))?;
                    let scraped = DateTime::<Utc>::from_timestamp_millis(entry.scrape_date)
                        .map(|t| t.to_rfc3339())
                        .unwrap_or_else(|| entry.scrape_date.to_string());

                    println!("{} {}", "🔑".bright_blue(), key.to_string().cyan());
                    println!("  Scraped: {}", scraped.bright_black());
                    println!();
                    println!("{}", entry.introduction);
                }
                None => println!("{} {}", "⚠️  Not cached:".yellow(), key),
            }
        }
        CacheAction::Purge { language, article } => {
            let key = CacheKey::new(&language, &article);
            cache.invalidate(key.as_str()).await?;
            println!("{} {}", "✅ Purged".green().bold(), key);
        }
    }

    Ok(())
}

/// Handles database diagnostic commands.
async fn handle_db_action(action: DbAction, config: &Config) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "🔍 Checking database connection...".bright_blue());

            let pool = connect_db(config).await?;
            let repo = PgUserRepository::new(Arc::new(pool));
            repo.ping()
                .await
                .map_err(|e| anyhow::anyhow!("Database check failed: {}", e))?;

            println!("{}", "✅ Database connection OK".green().bold());
        }
    }

    Ok(())
}

/// Generates a cryptographically random credential.
///
/// # Format
///
/// - Length: 48 characters
/// - Character set: A-Z, a-z, 0-9
fn generate_credential() -> String {
    use rand::Rng;
    const CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";
    const CREDENTIAL_LEN: usize = 48;

    let mut rng = rand::rng();

    (0..CREDENTIAL_LEN)
        .map(|_| {
            let idx = rng.random_range(0..CHARSET.len());
            CHARSET[idx] as char
        })
        .collect()
}
