pub mod config;
pub mod error;
pub mod models;
pub mod parsers;
pub mod scrapers;
pub mod server;
pub mod storage;
pub mod utils;

pub use error::ExtractionError;

/// Install the fmt subscriber used by both binaries.
pub fn init_tracing() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("card_pricer=info".parse()?),
        )
        .init();
    Ok(())
}
