//! CLI command definitions and dispatch.

pub mod category;
pub mod migrate;
pub mod serve;
pub mod user;
pub mod version;

use clap::{Parser, Subcommand};

use tradepost_core::config::AppConfig;
use tradepost_core::error::AppError;

use crate::output::OutputFormat;

/// TradePost: B2B marketplace administration
#[derive(Debug, Parser)]
#[command(name = "tradepost", version, about, long_about = None)]
pub struct Cli {
    /// Base configuration file (without extension)
    #[arg(short, long, default_value = "config/default")]
    pub config: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Start the TradePost server
    Serve(serve::ServeArgs),
    /// Database migration management
    Migrate(migrate::MigrateArgs),
    /// User and role management
    User(user::UserArgs),
    /// Listing categories
    Category(category::CategoryArgs),
    /// Ask a running server for its version
    Version(version::VersionArgs),
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(&self) -> Result<(), AppError> {
        match &self.command {
            Commands::Serve(args) => serve::execute(args, &self.config).await,
            Commands::Migrate(args) => migrate::execute(args, &self.config, self.format).await,
            Commands::User(args) => user::execute(args, &self.config, self.format).await,
            Commands::Category(args) => category::execute(args, &self.config, self.format).await,
            Commands::Version(args) => version::execute(args).await,
        }
    }
}

/// Helper: load configuration, layering `config/{TRADEPOST_ENV}` and env vars
pub fn load_config(config_path: &str) -> Result<AppConfig, AppError> {
    let env = std::env::var("TRADEPOST_ENV").unwrap_or_else(|_| "development".to_string());
    AppConfig::load_from(config_path, &env)
}

/// Helper: create database pool from config
pub async fn create_db_pool(config: &AppConfig) -> Result<sqlx::PgPool, AppError> {
    let pool = tradepost_database::DatabasePool::connect(&config.database).await?;
    Ok(pool.into_pool())
}
