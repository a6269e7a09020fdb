//! Common regex patterns for receipt extraction.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Day-first dates: 28.10.2019, 28-10-2019, 28 / 10 / 2019
    // Word boundaries are ASCII, so "Date:é28/10/2019" still matches.
    pub static ref DATE_DAY_FIRST: Regex = Regex::new(
        r"(?-u:\b)([0-9]{1,2})\s*[./\-]\s*([0-9]{1,2})\s*[./\-]\s*([0-9]{4})(?-u:\b)"
    ).unwrap();

    // ISO-style dates: 2021-05-03, 2021/5/3
    pub static ref DATE_ISO: Regex = Regex::new(
        r"(?-u:\b)([0-9]{4})\s*[./\-]\s*([0-9]{1,2})\s*[./\-]\s*([0-9]{1,2})(?-u:\b)"
    ).unwrap();

    // Serial number prefix on item lines: "1. ", "2 "
    pub static ref LEADING_ORDINAL: Regex = Regex::new(
        r"^[0-9]+[.\s]+"
    ).unwrap();

    // Trailing prices and quantities: " 12.00 500.00", " 1,299", ",12.00".
    // Digits glued to a letter ("S10") are part of the name.
    pub static ref TRAILING_FIGURES: Regex = Regex::new(
        r"(?:(?:^|\s+)[0-9.,]+|[.,][0-9.,]+)+\s*$"
    ).unwrap();
}
