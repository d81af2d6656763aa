use anyhow::Result;
use clap::Parser;
use hh_triage::cli::{handle_command, Cli};
use hh_triage::ConfigManager;

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("hh_triage=info,rocket=warn")),
        )
        .init();

    let cli = Cli::parse();

    let config = ConfigManager::load()?;
    config.ensure_directories().await?;

    handle_command(cli, &config).await
}
