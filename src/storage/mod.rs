use async_trait::async_trait;
use anyhow::Result;
use crate::models::CardRecord;

mod json;
mod sqlite;
pub use json::{export_file_name, save_to_json};
pub use sqlite::{SqliteStorage, FLATTEN_VERSION};

#[async_trait]
pub trait CardStore: Send + Sync {
    async fn ensure_schema(&self) -> Result<()>;
    /// Store one record and return its row id.
    async fn insert_card(&self, record: &CardRecord) -> Result<i64>;
}
