//! Rule-based field extractors for receipt text.

pub mod brand;
pub mod clean;
pub mod dates;
pub mod keywords;
pub mod lines;
pub mod patterns;
pub mod product;

pub use brand::{classify_brand, BrandExtractor};
pub use clean::clean_line;
pub use dates::{extract_purchase_date, parse_canonical, DateExtractor};
pub use keywords::{
    BrandKeyword, KeywordTables, MAX_PRODUCT_NAME_CHARS, UNKNOWN_BRAND, UNKNOWN_PRODUCT,
};
pub use lines::NormalizedText;
pub use product::{ProductMatch, ProductResolver, ProductStrategy};

/// Trait for field extractors.
pub trait FieldExtractor {
    /// The type of value this extractor produces.
    type Output;

    /// Extract the field from text.
    fn extract(&self, text: &str) -> Option<Self::Output>;

    /// Extract all occurrences of the field.
    fn extract_all(&self, text: &str) -> Vec<Self::Output>;
}

/// An extracted value with the text it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionMatch<T> {
    /// Extracted value.
    pub value: T,
    /// Byte range in the source text, when the extractor can tell.
    pub position: Option<(usize, usize)>,
    /// Source text that was matched.
    pub source: String,
}

impl<T> ExtractionMatch<T> {
    pub fn new(value: T, source: impl Into<String>) -> Self {
        Self {
            value,
            position: None,
            source: source.into(),
        }
    }

    pub fn with_position(mut self, start: usize, end: usize) -> Self {
        self.position = Some((start, end));
        self
    }
}
