use async_trait::async_trait;

use crate::error::Result;
use crate::models::{CardIdentifier, CardRecord};

mod lookup;
mod pricecharting;

pub use lookup::build_lookup_url;
pub use pricecharting::PriceChartingScraper;

/// Something that can turn a card identifier into a priced record.
#[async_trait]
pub trait PriceSource: Send + Sync {
    async fn extract(&self, identifier: CardIdentifier) -> Result<CardRecord>;
}
