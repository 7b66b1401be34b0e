use anyhow::{bail, Result};
use std::path::PathBuf;
use std::sync::Arc;

use card_pricer::config::Config;
use card_pricer::models::CardIdentifier;
use card_pricer::scrapers::{PriceChartingScraper, PriceSource};
use card_pricer::storage::{export_file_name, save_to_json};
use card_pricer::utils::http::create_client;

const USAGE: &str = "usage: extract_card <edition> <card name> <card number> [output.json]";

#[tokio::main]
async fn main() -> Result<()> {
    card_pricer::init_tracing()?;

    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.len() < 3 || args.len() > 4 {
        bail!(USAGE);
    }

    let identifier = CardIdentifier::new(args[0].as_str(), args[1].as_str(), args[2].as_str());
    let config = Arc::new(Config::load()?);

    let output = match args.get(3) {
        Some(path) => PathBuf::from(path),
        None => config.export_dir.join(export_file_name(&identifier)),
    };

    let client = create_client(&config)?;
    let scraper = PriceChartingScraper::new(config.clone(), client);

    println!("Extracting data for {}", identifier);
    let record = match scraper.extract(identifier.clone()).await {
        Ok(record) => record,
        Err(e) => bail!("Could not extract data for {}: {}", identifier, e),
    };

    println!("{}", serde_json::to_string_pretty(&record)?);
    save_to_json(&record, &output)?;
    println!("Saved to {}", output.display());

    Ok(())
}
