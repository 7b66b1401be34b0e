use serde::{Deserialize, Serialize};
use std::fmt;

use super::PriceTable;
use crate::parsers::title_case;

/// Card number as shown on the card. Kept as text, never normalized.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CardNumber(pub String);

impl fmt::Display for CardNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CardNumber {
    fn from(value: &str) -> Self {
        CardNumber(value.to_string())
    }
}

impl From<String> for CardNumber {
    fn from(value: String) -> Self {
        CardNumber(value)
    }
}

macro_rules! card_number_from_int {
    ($($t:ty),*) => {
        $(impl From<$t> for CardNumber {
            fn from(value: $t) -> Self {
                CardNumber(value.to_string())
            }
        })*
    };
}

card_number_from_int!(u16, u32, u64, i32, i64);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardIdentifier {
    pub edition_name: String,
    pub card_name: String,
    pub card_number: CardNumber,
}

impl CardIdentifier {
    pub fn new(
        edition_name: impl Into<String>,
        card_name: impl Into<String>,
        card_number: impl Into<CardNumber>,
    ) -> Self {
        Self {
            edition_name: edition_name.into(),
            card_name: card_name.into(),
            card_number: card_number.into(),
        }
    }
}

impl fmt::Display for CardIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} #{} ({})", self.card_name, self.card_number, self.edition_name)
    }
}

/// Canonical pricing page address for one card.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct LookupUrl(pub String);

impl LookupUrl {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LookupUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Result of one successful extraction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CardRecord {
    pub edition: String,
    pub card_name: String,
    pub card_number: String,
    pub url: LookupUrl,
    pub prices: PriceTable,
}

impl CardRecord {
    pub fn assemble(identifier: CardIdentifier, url: LookupUrl, prices: PriceTable) -> Self {
        Self {
            edition: identifier.edition_name,
            card_name: title_case(&identifier.card_name),
            card_number: identifier.card_number.0,
            url,
            prices,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{PriceQuote, Unavailable};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn empty_table() -> PriceTable {
        PriceTable::from_fn(|_| PriceQuote::NotAvailable(Unavailable::NoListing))
    }

    #[test]
    fn numeric_card_number_becomes_text() {
        let id = CardIdentifier::new("Pokemon Ultra Prism", "Frost Rotom", 41);
        assert_eq!(id.card_number, CardNumber("41".to_string()));
    }

    #[test]
    fn assemble_title_cases_only_the_card_name() {
        let id = CardIdentifier::new("pokemon ultra prism", "frost rotom", "041");
        let url = LookupUrl("https://example.com/game/pokemon-ultra-prism/frost-rotom-041".to_string());

        let record = CardRecord::assemble(id, url.clone(), empty_table());

        assert_eq!(record.card_name, "Frost Rotom");
        assert_eq!(record.edition, "pokemon ultra prism");
        assert_eq!(record.card_number, "041");
        assert_eq!(record.url, url);
    }

    #[test]
    fn record_serializes_to_flat_json() {
        let id = CardIdentifier::new("Pokemon Base Set", "Charizard", "4");
        let url = LookupUrl("https://example.com/game/pokemon-base-set/charizard-4".to_string());
        let record = CardRecord::assemble(id, url, empty_table());

        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(
            value,
            json!({
                "edition": "Pokemon Base Set",
                "card_name": "Charizard",
                "card_number": "4",
                "url": "https://example.com/game/pokemon-base-set/charizard-4",
                "prices": {
                    "Ungraded": "N/A",
                    "Grade 7": "N/A",
                    "Grade 8": "N/A",
                    "Grade 9": "N/A",
                    "Grade 9.5": "N/A",
                    "PSA 10": "N/A"
                }
            })
        );
    }
}
