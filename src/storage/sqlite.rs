use async_trait::async_trait;
use anyhow::{anyhow, bail, Context, Result};
use rusqlite::types::Value;
use rusqlite::{params_from_iter, Connection};
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::info;

use crate::config::is_plain_identifier;
use crate::models::{CardRecord, Grade};
use crate::storage::CardStore;

/// Version of the record-to-columns mapping written with every row.
///
/// v1: one text column per grade (NULL when not available), plus the whole
/// table as JSON in `prices_json`.
pub const FLATTEN_VERSION: i64 = 1;

pub struct SqliteStorage {
    conn: Arc<Mutex<Connection>>,
    table: String,
}

impl SqliteStorage {
    pub fn open(db_path: impl AsRef<Path>, table: &str) -> Result<Self> {
        let conn = Connection::open(db_path.as_ref())
            .with_context(|| format!("Failed to open SQLite database {}", db_path.as_ref().display()))?;
        Self::with_connection(conn, table)
    }

    pub fn in_memory(table: &str) -> Result<Self> {
        let conn = Connection::open_in_memory().context("Failed to open in-memory SQLite database")?;
        Self::with_connection(conn, table)
    }

    fn with_connection(conn: Connection, table: &str) -> Result<Self> {
        if !is_plain_identifier(table) {
            bail!("Invalid table name: {:?}", table);
        }

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
            table: table.to_string(),
        })
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| anyhow!("SQLite connection mutex poisoned"))
    }

    fn price_columns() -> Vec<String> {
        Grade::ALL
            .iter()
            .map(|grade| format!("price_{}", grade.column_suffix()))
            .collect()
    }
}

/// Column values for one record, in the same order as the insert statement.
fn flatten(record: &CardRecord) -> Result<Vec<Value>> {
    let mut values = vec![
        Value::Text(record.edition.clone()),
        Value::Text(record.card_name.clone()),
        Value::Text(record.card_number.clone()),
        Value::Text(record.url.as_str().to_string()),
    ];

    for (_, quote) in record.prices.iter() {
        values.push(match quote.as_listed() {
            Some(price) => Value::Text(price.to_string()),
            None => Value::Null,
        });
    }

    let prices_json = serde_json::to_string(&record.prices).context("Failed to encode prices")?;
    values.push(Value::Text(prices_json));
    values.push(Value::Integer(FLATTEN_VERSION));

    Ok(values)
}

#[async_trait]
impl CardStore for SqliteStorage {
    async fn ensure_schema(&self) -> Result<()> {
        let conn = self.lock()?;

        let price_columns = Self::price_columns()
            .iter()
            .map(|column| format!("{} TEXT,", column))
            .collect::<Vec<_>>()
            .join("\n                ");

        conn.execute(
            &format!(
                "CREATE TABLE IF NOT EXISTS {table} (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                edition TEXT NOT NULL,
                card_name TEXT NOT NULL,
                card_number TEXT NOT NULL,
                source_url TEXT NOT NULL,
                {price_columns}
                prices_json TEXT NOT NULL,
                flatten_version INTEGER NOT NULL,
                inserted_at DATETIME DEFAULT CURRENT_TIMESTAMP
            )",
                table = self.table,
                price_columns = price_columns,
            ),
            [],
        )?;

        conn.execute(
            &format!(
                "CREATE INDEX IF NOT EXISTS idx_{table}_card ON {table}(edition, card_name, card_number)",
                table = self.table
            ),
            [],
        )?;

        info!("Table {} is ready", self.table);
        Ok(())
    }

    async fn insert_card(&self, record: &CardRecord) -> Result<i64> {
        let values = flatten(record)?;

        let mut columns = vec![
            "edition".to_string(),
            "card_name".to_string(),
            "card_number".to_string(),
            "source_url".to_string(),
        ];
        columns.extend(Self::price_columns());
        columns.push("prices_json".to_string());
        columns.push("flatten_version".to_string());

        let placeholders = (1..=columns.len())
            .map(|i| format!("?{}", i))
            .collect::<Vec<_>>()
            .join(", ");

        let sql = format!(
            "INSERT INTO {} ({}) VALUES ({})",
            self.table,
            columns.join(", "),
            placeholders
        );

        let conn = self.lock()?;
        conn.execute(&sql, params_from_iter(values))
            .with_context(|| format!("Failed to insert {} into {}", record.url, self.table))?;
        let id = conn.last_insert_rowid();

        info!("Inserted {} #{} as row {}", record.card_name, record.card_number, id);
        Ok(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{LookupUrl, PriceQuote, PriceTable, Unavailable};
    use pretty_assertions::assert_eq;

    fn record(name: &str) -> CardRecord {
        CardRecord {
            edition: "Pokemon Ultra Prism".to_string(),
            card_name: name.to_string(),
            card_number: "41".to_string(),
            url: LookupUrl("https://example.com/game/pokemon-ultra-prism/frost-rotom-41".to_string()),
            prices: PriceTable::from_fn(|grade| match grade {
                Grade::Ungraded => PriceQuote::Listed("$0.45".to_string()),
                Grade::Psa10 => PriceQuote::Listed("$40.00".to_string()),
                _ => PriceQuote::NotAvailable(Unavailable::CellMissing),
            }),
        }
    }

    #[tokio::test]
    async fn inserts_flattened_row() {
        let storage = SqliteStorage::in_memory("cards").unwrap();
        storage.ensure_schema().await.unwrap();

        let id = storage.insert_card(&record("Frost Rotom")).await.unwrap();
        assert_eq!(id, 1);

        let conn = storage.lock().unwrap();
        let row: (String, String, Option<String>, Option<String>, Option<String>, String, i64) = conn
            .query_row(
                "SELECT card_name, source_url, price_ungraded, price_grade_7, price_psa_10, prices_json, flatten_version FROM cards WHERE id = ?1",
                [id],
                |row| {
                    Ok((
                        row.get(0)?,
                        row.get(1)?,
                        row.get(2)?,
                        row.get(3)?,
                        row.get(4)?,
                        row.get(5)?,
                        row.get(6)?,
                    ))
                },
            )
            .unwrap();

        assert_eq!(row.0, "Frost Rotom");
        assert_eq!(row.1, "https://example.com/game/pokemon-ultra-prism/frost-rotom-41");
        assert_eq!(row.2.as_deref(), Some("$0.45"));
        assert_eq!(row.3, None);
        assert_eq!(row.4.as_deref(), Some("$40.00"));
        assert!(row.5.contains(r#""Grade 7":"N/A""#));
        assert_eq!(row.6, FLATTEN_VERSION);
    }

    #[tokio::test]
    async fn quotes_and_backslashes_are_stored_verbatim() {
        let storage = SqliteStorage::in_memory("cards").unwrap();
        storage.ensure_schema().await.unwrap();

        let name = r#"Farfetch'd \'); DROP TABLE cards; --"#;
        let id = storage.insert_card(&record(name)).await.unwrap();

        let conn = storage.lock().unwrap();
        let stored: String = conn
            .query_row("SELECT card_name FROM cards WHERE id = ?1", [id], |row| row.get(0))
            .unwrap();
        assert_eq!(stored, name);
    }

    #[tokio::test]
    async fn ensure_schema_is_idempotent() {
        let storage = SqliteStorage::in_memory("card_prices").unwrap();
        storage.ensure_schema().await.unwrap();
        storage.ensure_schema().await.unwrap();

        storage.insert_card(&record("Frost Rotom")).await.unwrap();
        let id = storage.insert_card(&record("Frost Rotom")).await.unwrap();
        assert_eq!(id, 2);
    }

    #[test]
    fn rejects_unsafe_table_name() {
        assert!(SqliteStorage::in_memory("cards; DROP TABLE x").is_err());
    }

    #[test]
    fn opens_database_file() {
        let dir = tempfile::tempdir().unwrap();
        let storage = SqliteStorage::open(dir.path().join("cards.db"), "cards");
        assert!(storage.is_ok());
    }
}
