use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use url::Url;

pub const DEFAULT_PRICING_BASE_URL: &str = "https://www.pricecharting.com/game";
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/108.0.0.0 Safari/537.36";

const CONFIG_FILE: &str = "card_pricer";
const ENV_PREFIX: &str = "CARD_PRICER";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub pricing_base_url: String,
    pub user_agent: String,
    pub request_timeout_seconds: u64,
    pub bind_address: String,
    pub export_dir: PathBuf,
    pub database: DatabaseConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub path: PathBuf,
    pub table: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            pricing_base_url: DEFAULT_PRICING_BASE_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            request_timeout_seconds: 25,
            bind_address: "0.0.0.0:5000".to_string(),
            export_dir: PathBuf::from("."),
            database: DatabaseConfig {
                path: PathBuf::from("card_pricer.db"),
                table: "cards".to_string(),
            },
        }
    }
}

impl Config {
    /// Defaults, then `card_pricer.toml` if present, then `CARD_PRICER__*` env vars.
    pub fn load() -> Result<Self> {
        let defaults = Config::default();

        let settings = config::Config::builder()
            .set_default("pricing_base_url", defaults.pricing_base_url)?
            .set_default("user_agent", defaults.user_agent)?
            .set_default("request_timeout_seconds", defaults.request_timeout_seconds as i64)?
            .set_default("bind_address", defaults.bind_address)?
            .set_default("export_dir", defaults.export_dir.to_string_lossy().into_owned())?
            .set_default("database.path", defaults.database.path.to_string_lossy().into_owned())?
            .set_default("database.table", defaults.database.table)?
            .add_source(config::File::with_name(CONFIG_FILE).required(false))
            .add_source(config::Environment::with_prefix(ENV_PREFIX).separator("__"))
            .build()
            .context("Failed to build configuration")?;

        let config: Config = settings
            .try_deserialize()
            .context("Failed to deserialize configuration")?;

        config.validated()
    }

    fn validated(mut self) -> Result<Self> {
        self.pricing_base_url = self.pricing_base_url.trim_end_matches('/').to_string();
        Url::parse(&self.pricing_base_url)
            .with_context(|| format!("Invalid pricing_base_url: {}", self.pricing_base_url))?;

        if !is_plain_identifier(&self.database.table) {
            bail!("Invalid database table name: {:?}", self.database.table);
        }

        if self.request_timeout_seconds == 0 {
            bail!("request_timeout_seconds must be greater than zero");
        }

        Ok(self)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_seconds)
    }
}

// Table names are spliced into SQL text, so only plain identifiers are accepted.
pub(crate) fn is_plain_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
