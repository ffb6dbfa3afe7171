//! Category listing.

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use tradepost_core::error::AppError;
use tradepost_database::repositories::CatalogRepository;

use crate::output::{self, OutputFormat};

/// Arguments for category commands
#[derive(Debug, Args)]
pub struct CategoryArgs {
    #[command(subcommand)]
    pub command: CategoryCommand,
}

/// Category subcommands
#[derive(Debug, Subcommand)]
pub enum CategoryCommand {
    /// List categories
    List,
}

#[derive(Debug, Serialize, Tabled)]
struct CategoryRow {
    id: String,
    name: String,
    description: String,
}

/// Execute category commands
pub async fn execute(
    args: &CategoryArgs,
    config_path: &str,
    format: OutputFormat,
) -> Result<(), AppError> {
    let config = super::load_config(config_path)?;
    let pool = super::create_db_pool(&config).await?;
    let catalog = CatalogRepository::new(pool);

    match &args.command {
        CategoryCommand::List => {
            let rows: Vec<CategoryRow> = catalog
                .list_categories()
                .await?
                .into_iter()
                .map(|c| CategoryRow {
                    id: c.id.to_string(),
                    name: c.name,
                    description: c.description.unwrap_or_default(),
                })
                .collect();
            output::print_list(&rows, format);
        }
    }

    Ok(())
}
