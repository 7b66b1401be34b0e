use thiserror::Error;

/// Hard failures of a single extraction. Any of these means no record is produced.
#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("connection error fetching {url}: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("page not found (404) for {url}, check the edition, card name and card number")]
    NotFound { url: String },

    #[error("HTTP error {status} fetching {url}")]
    Http { url: String, status: u16 },

    #[error("price table (id=\"price_data\") not found in page")]
    TableNotFound,

    #[error("price table has no data row")]
    NoDataRow,
}

impl ExtractionError {
    /// True when the pricing page layout no longer matches what the parser expects.
    pub fn is_layout_drift(&self) -> bool {
        matches!(self, ExtractionError::TableNotFound | ExtractionError::NoDataRow)
    }
}

pub type Result<T> = std::result::Result<T, ExtractionError>;
