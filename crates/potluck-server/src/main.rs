mod config;
mod http;
mod slack;

use clap::Parser;
use config::Config;
use http::AppState;
use potluck_core::RecipeStore;
use slack::SlackClient;
use std::sync::Arc;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let config = Config::parse();
    config.validate()?;

    info!("Starting potluck server v{}", env!("CARGO_PKG_VERSION"));
    info!("HTTP: {}", config.http_addr);
    info!("Data: {:?}", config.data_dir);

    info!("Opening recipe store...");
    let store = Arc::new(RecipeStore::open(config.db_path())?);
    info!("Recipe store loaded: {} recipes", store.count()?);

    let state = AppState {
        store,
        slack: SlackClient::new(&config.slack_api_base, &config.bot_token),
        signing_secret: config.signing_secret.clone(),
        max_recipe_id: config.max_recipe_id,
    };

    let app = http::create_router(state);
    let listener = tokio::net::TcpListener::bind(config.http_addr).await?;
    info!("Potluck server ready on {}", config.http_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to install Ctrl+C handler");
    info!("Shutdown signal received, terminating...");
}
