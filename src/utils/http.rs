use reqwest::{Client, ClientBuilder, StatusCode};
use tracing::{error, warn};

use crate::config::Config;
use crate::error::{ExtractionError, Result};

pub fn create_client(config: &Config) -> anyhow::Result<Client> {
    let client = ClientBuilder::new()
        .user_agent(&config.user_agent)
        .timeout(config.request_timeout())
        .pool_max_idle_per_host(6)
        .build()?;

    Ok(client)
}

/// GET a page and return its body. One attempt, no retries.
pub async fn fetch_page(client: &Client, url: &str) -> Result<String> {
    let response = client.get(url).send().await.map_err(|source| {
        error!("Request failed for {}: {}", url, source);
        ExtractionError::Transport {
            url: url.to_string(),
            source,
        }
    })?;

    let status = response.status();
    if status == StatusCode::NOT_FOUND {
        warn!("Page not found (404): {}. Check the edition, card name and card number", url);
        return Err(ExtractionError::NotFound { url: url.to_string() });
    }
    if !status.is_success() {
        warn!("HTTP error {}: {}", status, url);
        return Err(ExtractionError::Http {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }

    response.text().await.map_err(|source| {
        error!("Failed to read body from {}: {}", url, source);
        ExtractionError::Transport {
            url: url.to_string(),
            source,
        }
    })
}
