use std::sync::Arc;

use crate::scrapers::PriceSource;
use crate::storage::CardStore;

/// Shared by every handler through axum's `State` extractor.
pub struct AppState {
    pub source: Arc<dyn PriceSource>,
    pub store: Arc<dyn CardStore>,
}
