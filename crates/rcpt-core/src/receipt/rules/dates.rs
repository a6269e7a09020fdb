//! Purchase date extraction.
//!
//! Two pattern families are tried in a fixed order: day-first
//! (`DD.MM.YYYY`, `DD-MM-YYYY`, `DD/MM/YYYY`) and, only when that finds
//! nothing, ISO-style (`YYYY-MM-DD`). Matches are normalized to `YYYY-MM-DD`.

use chrono::NaiveDate;
use regex::Captures;

use super::patterns::{DATE_DAY_FIRST, DATE_ISO};
use super::{ExtractionMatch, FieldExtractor};

/// Date field extractor.
pub struct DateExtractor {
    validate: bool,
}

impl DateExtractor {
    /// Create an extractor that passes pattern matches through unchecked.
    pub fn new() -> Self {
        Self { validate: false }
    }

    /// Set whether matches must also be real calendar dates.
    pub fn with_validation(mut self, validate: bool) -> Self {
        self.validate = validate;
        self
    }

    fn day_first(&self, text: &str) -> Vec<ExtractionMatch<String>> {
        DATE_DAY_FIRST
            .captures_iter(text)
            .filter_map(|caps| self.accept(&caps, canonical_date(&caps[3], &caps[2], &caps[1])))
            .collect()
    }

    fn iso(&self, text: &str) -> Vec<ExtractionMatch<String>> {
        DATE_ISO
            .captures_iter(text)
            .filter_map(|caps| self.accept(&caps, canonical_date(&caps[1], &caps[2], &caps[3])))
            .collect()
    }

    fn accept(&self, caps: &Captures<'_>, date: String) -> Option<ExtractionMatch<String>> {
        if self.validate && parse_canonical(&date).is_none() {
            return None;
        }

        let full_match = caps.get(0)?;
        Some(
            ExtractionMatch::new(date, full_match.as_str())
                .with_position(full_match.start(), full_match.end()),
        )
    }
}

impl Default for DateExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for DateExtractor {
    type Output = ExtractionMatch<String>;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        self.day_first(text)
            .into_iter()
            .next()
            .or_else(|| self.iso(text).into_iter().next())
    }

    /// Every match, day-first family before the ISO family.
    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        let mut results = self.day_first(text);
        for found in self.iso(text) {
            // Skip if already found
            if results.iter().any(|r| r.value == found.value) {
                continue;
            }
            results.push(found);
        }
        results
    }
}

/// Extract the purchase date as `YYYY-MM-DD`, or an empty string.
pub fn extract_purchase_date(text: &str) -> String {
    DateExtractor::new()
        .extract(text)
        .map(|m| m.value)
        .unwrap_or_default()
}

/// Parse a canonical `YYYY-MM-DD` string into a calendar date.
///
/// Returns `None` for empty strings and for pass-through values such as
/// `2019-13-45` that match the shape but name no real day.
pub fn parse_canonical(date: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(date, "%Y-%m-%d").ok()
}

fn canonical_date(year: &str, month: &str, day: &str) -> String {
    format!("{}-{:0>2}-{:0>2}", year, month, day)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_day_first() {
        assert_eq!(extract_purchase_date("Bill Date: 28/10/2019"), "2019-10-28");
        assert_eq!(extract_purchase_date("28.10.2019"), "2019-10-28");
        assert_eq!(extract_purchase_date("5-3-2021"), "2021-03-05");
        assert_eq!(extract_purchase_date("Date 28 / 10 / 2019 10:42"), "2019-10-28");
    }

    #[test]
    fn test_extract_iso() {
        assert_eq!(extract_purchase_date("2021-05-03\nshop"), "2021-05-03");
        assert_eq!(extract_purchase_date("2021/5/3"), "2021-05-03");
    }

    #[test]
    fn test_day_first_takes_precedence() {
        // The ISO date comes first in the text, the day-first family still wins.
        let text = "Printed 2022-01-15\nInvoice date 03.02.2021";
        assert_eq!(extract_purchase_date(text), "2021-02-03");
    }

    #[test]
    fn test_first_match_wins() {
        assert_eq!(
            extract_purchase_date("Order 01/02/2020 Delivered 05/02/2020"),
            "2020-02-01"
        );
    }

    #[test]
    fn test_no_date() {
        assert_eq!(extract_purchase_date(""), "");
        assert_eq!(extract_purchase_date("Total: 45000"), "");
        assert_eq!(extract_purchase_date("28/10/19"), "");
    }

    #[test]
    fn test_implausible_dates_pass_through() {
        assert_eq!(extract_purchase_date("45/13/2020"), "2020-13-45");
    }

    #[test]
    fn test_validation_skips_impossible_dates() {
        let extractor = DateExtractor::new().with_validation(true);

        let found = extractor.extract("ref 45/13/2020 date 12/01/2020").unwrap();
        assert_eq!(found.value, "2020-01-12");
        assert_eq!(found.source, "12/01/2020");

        assert!(extractor.extract("99/99/2020").is_none());
    }

    #[test]
    fn test_extract_all_orders_families() {
        let extractor = DateExtractor::new();
        let all = extractor.extract_all("2020-01-12 then 12/01/2020 then 2021-06-30");
        let values: Vec<&str> = all.iter().map(|m| m.value.as_str()).collect();

        assert_eq!(values, vec!["2020-01-12", "2021-06-30"]);
        assert_eq!(all[0].source, "12/01/2020");
    }

    #[test]
    fn test_parse_canonical() {
        assert_eq!(parse_canonical("2019-10-28"), NaiveDate::from_ymd_opt(2019, 10, 28));
        assert_eq!(parse_canonical("2020-13-45"), None);
        assert_eq!(parse_canonical(""), None);
    }
}
