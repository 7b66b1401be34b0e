use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::info;

use card_pricer::config::Config;
use card_pricer::scrapers::PriceChartingScraper;
use card_pricer::server::{self, AppState};
use card_pricer::storage::{CardStore, SqliteStorage};
use card_pricer::utils;

#[tokio::main]
async fn main() -> Result<()> {
    card_pricer::init_tracing()?;

    info!("Starting Card Pricer");

    let config = Arc::new(Config::load()?);

    let storage = Arc::new(SqliteStorage::open(&config.database.path, &config.database.table)?);
    storage.ensure_schema().await?;

    let client = utils::http::create_client(&config)?;
    let scraper = Arc::new(PriceChartingScraper::new(config.clone(), client));

    let state = Arc::new(AppState {
        source: scraper,
        store: storage,
    });
    let app = server::router(state);

    let listener = tokio::net::TcpListener::bind(&config.bind_address)
        .await
        .with_context(|| format!("Failed to bind {}", config.bind_address))?;
    info!("Listening on http://{}", config.bind_address);

    axum::serve(listener, app).await.context("Server error")?;
    Ok(())
}
