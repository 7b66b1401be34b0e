use anyhow::{Context, Result};
use serde::Serialize;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::info;

use crate::models::CardIdentifier;
use crate::parsers::normalize_segment;

/// `<card-name>_<number>_data.json`, with the name normalized like a URL segment.
pub fn export_file_name(identifier: &CardIdentifier) -> String {
    format!(
        "{}_{}_data.json",
        normalize_segment(&identifier.card_name),
        identifier.card_number
    )
}

/// Write `data` as UTF-8 JSON indented by four spaces. Non-ASCII text is
/// written as-is.
pub fn save_to_json<T: Serialize>(data: &T, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let file = File::create(path).with_context(|| format!("Failed to create {}", path.display()))?;
    let mut writer = BufWriter::new(file);

    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut writer, formatter);
    data.serialize(&mut serializer)
        .with_context(|| format!("Failed to encode JSON for {}", path.display()))?;

    writer.write_all(b"\n")?;
    writer.flush()?;

    info!("Saved data to {}", path.display());
    Ok(())
}
