//! Quantity normalization: "100 grammi", "100gr" -> "100 g";
//! "2 vasetti" -> "2 vasetto"; "q.b." stays "q.b.".

use regex::Regex;
use std::sync::LazyLock;

static NUMBER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d+(?:\.\d+)?").expect("number pattern is valid"));

/// Map the non-numeric part of a quantity onto a standard unit.
fn standard_unit(unit_part: &str) -> Option<&'static str> {
    let has = |needle: &str| unit_part.contains(needle);
    let first_word = unit_part.split_whitespace().next().unwrap_or("");

    if has("q.b") || has("qb") {
        return Some("q.b.");
    }
    // Whole words only: "yogurt greco" is not grams
    let is_gram = |w: &str| matches!(w, "g" | "g." | "gr" | "gr." | "grs") || w.starts_with("gramm");
    if unit_part.split_whitespace().any(is_gram) {
        return Some("g");
    }
    if has("ml") {
        return Some("ml");
    }
    if matches!(first_word, "l" | "l." | "lt" | "lt.") || first_word.starts_with("litr") {
        return Some("l");
    }

    const UNITS: [(&str, &str); 8] = [
        ("vasett", "vasetto"),
        ("cucchiain", "cucchiaino"),
        ("cucchia", "cucchiaio"),
        ("tazz", "tazza"),
        ("bicchier", "bicchiere"),
        ("fett", "fette"),
        ("ciotol", "ciotola"),
        ("pizzic", "pizzico"),
    ];
    UNITS.iter().find(|(stem, _)| has(stem)).map(|(_, unit)| *unit)
}

/// Normalize a free-text quantity into "<number> <unit>".
///
/// A missing number defaults to 1. A bare number stays bare. Unknown units
/// become "pz".
pub fn normalize_quantity(raw: &str) -> String {
    let raw = raw.trim().to_lowercase().replace(',', ".");
    if raw.is_empty() {
        return String::new();
    }

    let number = NUMBER_RE
        .find(&raw)
        .map(|m| m.as_str().to_string())
        .unwrap_or_else(|| "1".to_string());
    let unit_part = NUMBER_RE.replace_all(&raw, "");
    let unit_part = unit_part.trim();

    match standard_unit(unit_part) {
        Some("q.b.") => "q.b.".to_string(),
        Some(unit) => format!("{number} {unit}"),
        None if unit_part.is_empty() => number,
        None => format!("{number} pz"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grams() {
        assert_eq!(normalize_quantity("100 grammi"), "100 g");
        assert_eq!(normalize_quantity("100gr"), "100 g");
        assert_eq!(normalize_quantity("80 g"), "80 g");
        assert_eq!(normalize_quantity("12,5 gr"), "12.5 g");
        assert_eq!(normalize_quantity("30 g. circa"), "30 g");
    }

    #[test]
    fn test_gr_inside_food_names() {
        assert_eq!(normalize_quantity("1 vasetto di yogurt greco"), "1 vasetto");
        assert_eq!(normalize_quantity("fetta di pane integrale"), "1 fette");
        assert_eq!(normalize_quantity("2 fette di grana"), "2 fette");
    }

    #[test]
    fn test_volumes() {
        assert_eq!(normalize_quantity("200 ml"), "200 ml");
        assert_eq!(normalize_quantity("1,5 l"), "1.5 l");
        assert_eq!(normalize_quantity("2 litri"), "2 l");
    }

    #[test]
    fn test_household_units() {
        assert_eq!(normalize_quantity("2 vasetti"), "2 vasetto");
        assert_eq!(normalize_quantity("1 vasetto"), "1 vasetto");
        assert_eq!(normalize_quantity("2 cucchiaini"), "2 cucchiaino");
        assert_eq!(normalize_quantity("1 cucchiaio"), "1 cucchiaio");
        assert_eq!(normalize_quantity("3 fette"), "3 fette");
        assert_eq!(normalize_quantity("1 ciotola"), "1 ciotola");
        assert_eq!(normalize_quantity("tazza"), "1 tazza");
    }

    #[test]
    fn test_special_cases() {
        assert_eq!(normalize_quantity(""), "");
        assert_eq!(normalize_quantity("   "), "");
        assert_eq!(normalize_quantity("q.b."), "q.b.");
        assert_eq!(normalize_quantity("QB"), "q.b.");
        assert_eq!(normalize_quantity("1"), "1");
        assert_eq!(normalize_quantity("1 mela"), "1 pz");
    }
}
