mod commands;
mod output;

use std::process::ExitCode;

use clap::Parser;
use inv_admin::{AdminConfig, AdminError, PageSession, tracing::init_tracing};
use inv_client::HttpInventoryApi;

use crate::commands::Command;

#[derive(Parser)]
#[command(name = "inv-console", about = "Inventory admin panel for the terminal")]
pub struct Cli {
    /// Backend origin, overrides INV_API_BASE_URL
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    // Load configuration from environment variables
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let mut config = AdminConfig::from_env()?;
    if let Some(base_url) = cli.base_url {
        config.api_base_url = base_url;
    }
    let _guard = init_tracing(&config.env, config.log_dir.as_deref());
    tracing::debug!(base_url = %config.api_base_url, "Configuration loaded");

    let api = HttpInventoryApi::new(config.client_config())?;
    let session = PageSession::with_success_ttl(api, config.success_message_ttl());

    match commands::run(cli.command, session, &config).await {
        Ok(()) => Ok(ExitCode::SUCCESS),
        Err(AdminError::AuthRequired { login_url }) => {
            eprintln!("Sign in required: {login_url}");
            Ok(ExitCode::FAILURE)
        }
        // The page banner has already been printed
        Err(e) => {
            tracing::debug!("Command failed: {e:?}");
            Ok(ExitCode::FAILURE)
        }
    }
}
