use anyhow::{Context, Result};
use clap::Parser;
use jobly_client::cli::{handle_command, JoblyCli};
use jobly_client::core::ConfigManager;
use std::fs::OpenOptions;
use std::sync::Mutex;
use tracing::info;

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = JoblyCli::parse();
    let config = ConfigManager::load()?.with_base_url(cli.base_url.clone());

    // Logs go to a file, stdout is for pages
    let file = OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(&config.log_file)
        .with_context(|| format!("Failed to open log file {}", config.log_file.display()))?;

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("jobly_client=debug,jobly=debug"))
        .context("Invalid log directive")?;

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .json()
                .with_writer(Mutex::new(file))
                .with_current_span(false)
                .with_span_list(false),
        )
        .with(filter)
        .init();

    info!("API base URL: {}", config.base_url);
    info!("Local storage: {}", config.storage_path.display());

    let mut app = jobly_client::connect(&config).await?;
    let output = handle_command(&mut app, cli.command).await?;
    println!("{}", output);

    Ok(())
}
