//! Locale-aware number formatting for the detail view.

use num_format::{Locale, ToFormattedString};

/// Map a user-provided locale tag to a `num_format::Locale`.
///
/// Supported tags (case-insensitive): `en`, `us`, `en_US`, `de`, `de_DE`, `german`,
/// `fr`, `es`, `it`, `pt`, `nl`. Defaults to English.
pub fn map_locale(tag: &str) -> &'static Locale {
    match tag.to_lowercase().replace('-', "_").as_str() {
        "de" | "de_de" | "german" => &Locale::de,
        "fr" | "fr_fr" => &Locale::fr,
        "es" | "es_es" => &Locale::es,
        "it" | "it_it" => &Locale::it,
        "pt" | "pt_pt" | "pt_br" => &Locale::pt,
        "nl" | "nl_nl" => &Locale::nl,
        _ => &Locale::en, // default
    }
}

/// `1000000` -> `1,000,000` (en) or `1.000.000` (de).
pub fn format_population(n: u64, locale_tag: &str) -> String {
    n.to_formatted_string(map_locale(locale_tag))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_thousands_in_english() {
        assert_eq!(format_population(1_000_000, "en"), "1,000,000");
        assert_eq!(format_population(999, "en"), "999");
        assert_eq!(format_population(0, "en"), "0");
    }

    #[test]
    fn german_uses_dots() {
        assert_eq!(format_population(67_391_582, "de-DE"), "67.391.582");
    }

    #[test]
    fn unknown_tag_falls_back_to_english() {
        assert_eq!(format_population(1_234_567, "xx"), "1,234,567");
    }
}
