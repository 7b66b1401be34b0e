use crate::models::{CardIdentifier, LookupUrl};
use crate::parsers::normalize_segment;

/// `<base>/<edition>/<card-name>-<number>`, with edition and name lowercased
/// and spaces hyphenated. The number is used as given.
pub fn build_lookup_url(base_url: &str, identifier: &CardIdentifier) -> LookupUrl {
    LookupUrl(format!(
        "{}/{}/{}-{}",
        base_url.trim_end_matches('/'),
        normalize_segment(&identifier.edition_name),
        normalize_segment(&identifier.card_name),
        identifier.card_number
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_PRICING_BASE_URL;

    #[test]
    fn builds_canonical_path() {
        let id = CardIdentifier::new("Pokemon Ultra Prism", "Frost Rotom", 41);
        let url = build_lookup_url(DEFAULT_PRICING_BASE_URL, &id);
        assert_eq!(
            url.as_str(),
            "https://www.pricecharting.com/game/pokemon-ultra-prism/frost-rotom-41"
        );
    }

    #[test]
    fn only_case_and_spaces_change() {
        let id = CardIdentifier::new("XY Evolutions", "M Venusaur EX", "79");
        let url = build_lookup_url(DEFAULT_PRICING_BASE_URL, &id);
        assert!(url.as_str().ends_with("/xy-evolutions/m-venusaur-ex-79"));
    }

    #[test]
    fn card_number_is_not_normalized() {
        let id = CardIdentifier::new("Promo", "Pikachu", "SWSH 020");
        let url = build_lookup_url("https://example.com/game/", &id);
        assert_eq!(url.as_str(), "https://example.com/game/promo/pikachu-SWSH 020");
    }

    #[test]
    fn same_identifier_same_url() {
        let id = CardIdentifier::new("Pokemon Base Set", "Charizard", "4");
        assert_eq!(
            build_lookup_url(DEFAULT_PRICING_BASE_URL, &id),
            build_lookup_url(DEFAULT_PRICING_BASE_URL, &id.clone())
        );
    }
}
