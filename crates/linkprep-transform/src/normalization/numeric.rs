//! Month and year of birth validation.

use chrono::{Datelike, Local};

use super::text::normalize_text;

/// Earliest plausible year of birth.
pub const DEFAULT_MIN_YEAR: i32 = 1900;

/// Inclusive range of accepted birth years.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YearRange {
    pub min: i32,
    pub max: i32,
}

impl Default for YearRange {
    /// 1900 through the current calendar year.
    fn default() -> Self {
        Self {
            min: DEFAULT_MIN_YEAR,
            max: Local::now().year(),
        }
    }
}

impl YearRange {
    pub fn new(min: i32, max: i32) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, year: i32) -> bool {
        (self.min..=self.max).contains(&year)
    }
}

/// Parses a normalized value as a non-negative integer.
///
/// Returns None for empty values, anything with a separator or letter, and
/// values that carried a leading minus sign before normalization.
pub fn parse_i64(raw: &str) -> Option<i64> {
    if raw.trim_start().starts_with('-') {
        return None;
    }
    let normalized = normalize_text(raw);
    if normalized.is_empty() || !normalized.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    normalized.parse::<i64>().ok()
}

/// Validates a month of birth. Leading zeros are dropped ("02" → "2").
pub fn clean_month(raw: &str) -> Option<String> {
    parse_i64(raw)
        .filter(|month| (1..=12).contains(month))
        .map(|month| month.to_string())
}

/// Validates a year of birth against `range`.
pub fn clean_year(raw: &str, range: &YearRange) -> Option<String> {
    parse_i64(raw)
        .and_then(|year| i32::try_from(year).ok())
        .filter(|year| (1000..=9999).contains(year) && range.contains(*year))
        .map(|year| year.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_months() {
        for (raw, clean) in [
            ("12", "12"),
            ("012", "12"),
            (" 12", "12"),
            (" 1 ", "1"),
            ("010 ", "10"),
            ("\t010 ", "10"),
            ("02", "2"),
        ] {
            assert_eq!(clean_month(raw).as_deref(), Some(clean), "month {raw:?}");
        }
    }

    #[test]
    fn invalid_months() {
        for raw in ["0", "", "13", "a13", "94", "z", "!", "-5", "1 2", "1.5"] {
            assert_eq!(clean_month(raw), None, "month {raw:?}");
        }
    }

    #[test]
    fn years_respect_range() {
        let range = YearRange::new(1902, 2009);
        assert_eq!(clean_year("1985", &range).as_deref(), Some("1985"));
        assert_eq!(clean_year(" 01985 ", &range).as_deref(), Some("1985"));
        assert_eq!(clean_year("1902", &range).as_deref(), Some("1902"));
        assert_eq!(clean_year("1901", &range), None);
        assert_eq!(clean_year("2010", &range), None);
        assert_eq!(clean_year("85", &range), None);
        assert_eq!(clean_year("unknown", &range), None);
    }

    #[test]
    fn default_range_ends_this_year() {
        let range = YearRange::default();
        assert_eq!(range.min, 1900);
        assert!(range.contains(Local::now().year()));
        assert!(!range.contains(Local::now().year() + 1));
    }

    #[test]
    fn huge_numbers_do_not_overflow() {
        assert_eq!(clean_year("99999999999999999999999", &YearRange::default()), None);
        assert_eq!(clean_month("99999999999999999999999"), None);
    }
}
