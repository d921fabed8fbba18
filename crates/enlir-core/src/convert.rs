//! Scalar conversions for worksheet cells
//!
//! Worksheet cells are free text maintained by hand, so every converter is
//! total: anything unparseable becomes the type's zero value.

use chrono::NaiveDate;

fn numeric_text(text: &str) -> String {
    text.trim()
        .chars()
        .filter(|c| *c != ',' && *c != '_')
        .collect()
}

/// Integer value of a cell; blank or non-numeric cells become 0
pub fn to_int(text: &str) -> i64 {
    let cleaned = numeric_text(text);
    if cleaned.is_empty() {
        return 0;
    }
    cleaned
        .parse::<i64>()
        .or_else(|_| cleaned.parse::<f64>().map(|v| v.trunc() as i64))
        .unwrap_or(0)
}

/// Floating-point value of a cell; blank or non-numeric cells become 0.0
pub fn to_double(text: &str) -> f64 {
    let cleaned = numeric_text(text);
    cleaned.parse::<f64>().ok().filter(|v| v.is_finite()).unwrap_or(0.0)
}

/// Truthiness of a check/flag cell
pub fn to_bool(text: &str) -> bool {
    let trimmed = text.trim();
    trimmed == "✓"
        || ["y", "yes", "true", "1"]
            .iter()
            .any(|t| trimmed.eq_ignore_ascii_case(t))
}

/// Calendar date in `YYYY-MM-DD` or `MM/DD/YYYY` form
pub fn to_date(text: &str) -> Option<NaiveDate> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(trimmed, "%m/%d/%Y"))
        .ok()
}

/// Split a comma-separated cell into trimmed, non-empty items
pub fn to_list(text: &str) -> Vec<String> {
    text.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty() && *s != "-")
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_int() {
        assert_eq!(to_int("42"), 42);
        assert_eq!(to_int(" 1,200 "), 1200);
        assert_eq!(to_int("2.9"), 2);
        assert_eq!(to_int(""), 0);
        assert_eq!(to_int("-"), 0);
        assert_eq!(to_int("n/a"), 0);
    }

    #[test]
    fn test_to_double() {
        assert_eq!(to_double("1.65"), 1.65);
        assert_eq!(to_double(" 3 "), 3.0);
        assert_eq!(to_double("?"), 0.0);
        assert_eq!(to_double("NaN"), 0.0);
    }

    #[test]
    fn test_to_bool() {
        assert!(to_bool("Y"));
        assert!(to_bool("yes"));
        assert!(to_bool("TRUE"));
        assert!(to_bool("✓"));
        assert!(to_bool("1"));
        assert!(!to_bool("N"));
        assert!(!to_bool(""));
    }

    #[test]
    fn test_to_date() {
        let expected = NaiveDate::from_ymd_opt(2019, 3, 14);
        assert_eq!(to_date("2019-03-14"), expected);
        assert_eq!(to_date("03/14/2019"), expected);
        assert_eq!(to_date("soon"), None);
        assert_eq!(to_date(""), None);
    }

    #[test]
    fn test_to_list() {
        assert_eq!(to_list("Cloud, Tifa,,"), vec!["Cloud", "Tifa"]);
        assert!(to_list("-").is_empty());
    }
}
