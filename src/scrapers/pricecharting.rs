use async_trait::async_trait;
use reqwest::Client;
use scraper::Html;
use std::sync::Arc;
use tracing::{error, info};

use crate::config::Config;
use crate::error::Result;
use crate::models::{CardIdentifier, CardRecord, Grade, LookupUrl, PriceTable};
use crate::parsers::parse_price_table;
use crate::scrapers::{build_lookup_url, PriceSource};
use crate::utils::http::fetch_page;

pub struct PriceChartingScraper {
    config: Arc<Config>,
    client: Client,
}

impl PriceChartingScraper {
    pub fn new(config: Arc<Config>, client: Client) -> Self {
        Self { config, client }
    }

    pub fn lookup_url(&self, identifier: &CardIdentifier) -> LookupUrl {
        build_lookup_url(&self.config.pricing_base_url, identifier)
    }

    async fn fetch_prices(&self, url: &LookupUrl) -> Result<PriceTable> {
        let html = fetch_page(&self.client, url.as_str()).await?;

        // Html is not Send; keep it out of any await point.
        let document = Html::parse_document(&html);
        parse_price_table(&document)
    }
}

#[async_trait]
impl PriceSource for PriceChartingScraper {
    async fn extract(&self, identifier: CardIdentifier) -> Result<CardRecord> {
        let url = self.lookup_url(&identifier);
        info!("Extracting {} from {}", identifier, url);

        match self.fetch_prices(&url).await {
            Ok(prices) => {
                info!(
                    "Found {}/{} listed prices for {}",
                    prices.listed_count(),
                    Grade::ALL.len(),
                    identifier
                );
                Ok(CardRecord::assemble(identifier, url, prices))
            }
            Err(e) => {
                // Fetch failures are already reported by fetch_page.
                if e.is_layout_drift() {
                    error!(
                        "Could not parse prices for {} ({}), page layout may have changed: {}",
                        identifier, url, e
                    );
                }
                Err(e)
            }
        }
    }
}
