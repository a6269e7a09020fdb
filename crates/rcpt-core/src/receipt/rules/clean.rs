//! Clean a candidate product line before it becomes the product name.

use super::patterns::{LEADING_ORDINAL, TRAILING_FIGURES};

/// Strip serial numbers, trailing prices/quantities and edge punctuation.
///
/// May return an empty string when the line held nothing but figures or
/// symbols; callers treat that as no candidate.
pub fn clean_line(line: &str) -> String {
    let without_ordinal = LEADING_ORDINAL.replace(line, "");
    let without_figures = TRAILING_FIGURES.replace(&without_ordinal, "");

    without_figures
        .trim_matches(|c: char| !c.is_alphanumeric())
        .to_string()
}
