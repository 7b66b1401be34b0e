/// Lowercase and turn every space into a hyphen. Nothing else is escaped
/// or stripped, so punctuation passes through to the URL untouched.
pub fn normalize_segment(text: &str) -> String {
    text.to_lowercase().replace(' ', "-")
}

/// Upper-case the first letter of each word and lower-case the rest.
/// Any non-alphabetic character starts a new word.
pub fn title_case(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut previous_is_letter = false;

    for c in text.chars() {
        if c.is_alphabetic() {
            if previous_is_letter {
                result.extend(c.to_lowercase());
            } else {
                result.extend(c.to_uppercase());
            }
            previous_is_letter = true;
        } else {
            result.push(c);
            previous_is_letter = false;
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_only_touches_case_and_spaces() {
        assert_eq!(normalize_segment("Pokemon Ultra Prism"), "pokemon-ultra-prism");
        assert_eq!(normalize_segment("M Venusaur EX"), "m-venusaur-ex");
        assert_eq!(normalize_segment("Mr. Mime"), "mr.-mime");
        assert_eq!(normalize_segment("Pokémon  Jungle"), "pokémon--jungle");
    }

    #[test]
    fn title_case_capitalizes_words() {
        assert_eq!(title_case("frost rotom"), "Frost Rotom");
        assert_eq!(title_case("M VENUSAUR EX"), "M Venusaur Ex");
        assert_eq!(title_case("mr. mime"), "Mr. Mime");
        assert_eq!(title_case("ho-oh"), "Ho-Oh");
        assert_eq!(title_case(""), "");
    }
}
