use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use axum::http::HeaderValue;
use clap::{Parser, Subcommand};
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::info;

use crate::app::{app, AppState};
use crate::config::{AppConfig, StoreBackend};
use crate::database::{DatabaseManager, Repositories};

#[derive(Parser)]
#[command(name = "merchant-api")]
#[command(about = "Merchant API - users, merchants, outlets and products over HTTP")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Run the HTTP server (default)")]
    Serve {
        #[arg(long, env = "APP_PORT", help = "Port to listen on")]
        port: Option<u16>,

        #[arg(long, env = "STORE_BACKEND", help = "Storage backend: postgres or memory")]
        store: Option<StoreBackend>,
    },

    #[command(about = "Create missing tables and exit")]
    Migrate,
}

pub async fn run(cli: Cli, mut config: AppConfig) -> anyhow::Result<()> {
    match cli.command.unwrap_or(Commands::Serve { port: None, store: None }) {
        Commands::Serve { port, store } => {
            if let Some(port) = port {
                config.api.port = port;
            }
            if let Some(store) = store {
                config.database.backend = store;
            }
            serve(config).await
        }
        Commands::Migrate => {
            let pool = DatabaseManager::connect(&config.database).await?;
            DatabaseManager::migrate(&pool).await?;
            Ok(())
        }
    }
}

async fn serve(config: AppConfig) -> anyhow::Result<()> {
    let repos = match config.database.backend {
        StoreBackend::Postgres => {
            let pool = DatabaseManager::connect(&config.database)
                .await
                .context("failed to connect to database")?;
            DatabaseManager::migrate(&pool).await?;
            Repositories::postgres(pool)
        }
        StoreBackend::Memory => {
            info!("Using in-memory store; data is lost on exit");
            Repositories::memory()
        }
    };

    let config = Arc::new(config);
    let mut router = app(AppState::new(repos, config.clone()));

    if config.security.enable_cors {
        router = router.layer(cors_layer(&config.security.cors_origins));
    }
    if config.api.enable_request_logging {
        router = router.layer(TraceLayer::new_for_http());
    }

    let bind_addr = SocketAddr::from(([0, 0, 0, 0], config.api.port));
    let listener = tokio::net::TcpListener::bind(bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;

    info!("Merchant API listening on http://{}", bind_addr);
    axum::serve(listener, router).await?;
    Ok(())
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    if origins.iter().any(|o| o == "*") {
        return CorsLayer::permissive();
    }
    let origins: Vec<HeaderValue> = origins.iter().filter_map(|o| o.parse().ok()).collect();
    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(Any)
        .allow_headers(Any)
}
