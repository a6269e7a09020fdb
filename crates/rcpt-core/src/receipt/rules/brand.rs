//! Merchant brand classification.

use super::keywords::{KeywordTables, UNKNOWN_BRAND};
use super::{ExtractionMatch, FieldExtractor};

/// Brand extractor backed by an ordered keyword table.
pub struct BrandExtractor<'a> {
    tables: &'a KeywordTables,
}

impl<'a> BrandExtractor<'a> {
    pub fn new(tables: &'a KeywordTables) -> Self {
        Self { tables }
    }

    /// Canonical name of the first table entry found in already-lowercased text.
    ///
    /// Priority follows the table, not the position in the text.
    pub fn classify_lower(&self, lower: &str) -> Option<&'a str> {
        self.tables
            .brands
            .iter()
            .find(|brand| lower.contains(brand.keyword.as_str()))
            .map(|brand| brand.name.as_str())
    }
}

impl FieldExtractor for BrandExtractor<'_> {
    type Output = ExtractionMatch<String>;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        self.extract_all(text).into_iter().next()
    }

    /// Matches carry no position: offsets in the lowercased copy need not
    /// line up with the source text.
    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        let lower = text.to_lowercase();

        self.tables
            .brands
            .iter()
            .filter(|brand| lower.contains(brand.keyword.as_str()))
            .map(|brand| ExtractionMatch::new(brand.name.clone(), brand.keyword.as_str()))
            .collect()
    }
}

/// Classify the merchant using the built-in table, `"Unknown"` when nothing matches.
pub fn classify_brand(text: &str) -> String {
    let tables = KeywordTables::default();
    BrandExtractor::new(&tables)
        .classify_lower(&text.to_lowercase())
        .unwrap_or(UNKNOWN_BRAND)
        .to_string()
}
