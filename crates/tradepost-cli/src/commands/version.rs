//! Probe a running server's version endpoint.

use clap::Args;

use tradepost_client::{ApiClient, DEFAULT_BASE_URL};
use tradepost_core::error::AppError;

use crate::output;

/// Arguments for the version command
#[derive(Debug, Args)]
pub struct VersionArgs {
    /// API base URL
    #[arg(long, default_value = DEFAULT_BASE_URL)]
    pub base_url: String,
}

/// Execute the version command
pub async fn execute(args: &VersionArgs) -> Result<(), AppError> {
    let client = ApiClient::new(&args.base_url)?;
    let version = client.version().await?;

    output::print_kv("Server", client.base_url());
    output::print_kv("Server version", &version);
    output::print_kv("CLI version", env!("CARGO_PKG_VERSION"));
    Ok(())
}
