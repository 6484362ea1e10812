use clap::Parser;
use tracing_subscriber::EnvFilter;

use merchant_api::cli::{self, Cli};
use merchant_api::config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so DATABASE_URL, APP_SECRET, etc. are picked up
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = config::config().clone();
    tracing::info!("Starting Merchant API in {:?} mode", config.environment);

    if config.security.jwt_secret.is_empty() {
        anyhow::bail!("APP_SECRET must be set outside development");
    }

    cli::run(Cli::parse(), config).await
}
