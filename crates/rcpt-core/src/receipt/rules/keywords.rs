//! Ordered keyword tables driving brand and product detection.
//!
//! Order is significant everywhere: the brand table and the product keyword
//! list are scanned front to back and the first hit wins.

use serde::{Deserialize, Serialize};

use crate::error::ExtractionError;

/// Brand returned when no merchant keyword is found.
pub const UNKNOWN_BRAND: &str = "Unknown";

/// Product name returned when every strategy comes up empty.
pub const UNKNOWN_PRODUCT: &str = "Unknown Product";

/// Longest product name handed to the caller, in characters.
pub const MAX_PRODUCT_NAME_CHARS: usize = 100;

/// Merchant keywords and their canonical names, highest priority first.
pub const BRAND_KEYWORDS: &[(&str, &str)] = &[
    ("amazon", "Amazon"),
    ("flipkart", "Flipkart"),
    ("croma", "Croma"),
    ("reliance", "Reliance Digital"),
    ("varasiddhi", "Varasiddhi Silk Exports"),
    ("myntra", "Myntra"),
    ("ajio", "Ajio"),
    ("apple", "Apple Store"),
    ("samsung", "Samsung Store"),
];

pub const PRODUCT_KEYWORDS: &[&str] = &[
    "iphone", "macbook", "galaxy", "pixel", "laptop", "watch", "tv", "monitor", "headphone",
    "earbuds", "camera", "playstation", "xbox", "nintendo", "saree", "silk", "shirt", "pant",
    "jeans", "top",
];

/// Substrings marking address, tax and shipping boilerplate.
pub const ADDRESS_BLOCKLIST: &[&str] = &[
    "road", "street", "block", "floor", "nagar", "city", "state", "india", "pvt", "ltd",
    "invoice", "gst", "shipping", "billing", "cross", "layout", "bangalore", "mumbai", "delhi",
    "sold by", "ship to", "bill to",
];

pub const HEADER_KEYWORDS: &[&str] = &["description", "item", "product", "particulars"];

pub const COLUMN_KEYWORDS: &[&str] = &["qty", "price", "amount", "rate", "total"];

/// Words that mark totals and footer lines rather than items.
pub const SUMMARY_KEYWORDS: &[&str] = &["total", "amount", "thank", "visit"];

/// A merchant keyword and the brand it maps to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrandKeyword {
    /// Lowercase substring searched for in the receipt text.
    pub keyword: String,
    /// Canonical brand name reported on a match.
    pub name: String,
}

impl BrandKeyword {
    pub fn new(keyword: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            keyword: keyword.into(),
            name: name.into(),
        }
    }
}

/// All keyword data used by the extractors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeywordTables {
    /// Brand table, highest priority first.
    pub brands: Vec<BrandKeyword>,

    /// Product keywords, highest priority first.
    pub products: Vec<String>,

    /// Lines containing any of these are never product names.
    pub address_blocklist: Vec<String>,

    /// Words identifying an item table header row.
    pub header_keywords: Vec<String>,

    /// Column titles that must share the row with a header word.
    pub column_keywords: Vec<String>,

    /// Words disqualifying a line from the longest-line fallback.
    pub summary_keywords: Vec<String>,
}

impl Default for KeywordTables {
    fn default() -> Self {
        Self {
            brands: BRAND_KEYWORDS
                .iter()
                .map(|(keyword, name)| BrandKeyword::new(*keyword, *name))
                .collect(),
            products: owned(PRODUCT_KEYWORDS),
            address_blocklist: owned(ADDRESS_BLOCKLIST),
            header_keywords: owned(HEADER_KEYWORDS),
            column_keywords: owned(COLUMN_KEYWORDS),
            summary_keywords: owned(SUMMARY_KEYWORDS),
        }
    }
}

impl KeywordTables {
    /// Lowercase every keyword so table lookups can run against lowercased text.
    pub fn normalized(mut self) -> Self {
        for brand in &mut self.brands {
            brand.keyword = brand.keyword.trim().to_lowercase();
            brand.name = brand.name.trim().to_string();
        }
        for list in [
            &mut self.products,
            &mut self.address_blocklist,
            &mut self.header_keywords,
            &mut self.column_keywords,
            &mut self.summary_keywords,
        ] {
            for keyword in list.iter_mut() {
                *keyword = keyword.trim().to_lowercase();
            }
        }
        self
    }

    /// Reject blank entries: an empty keyword is a substring of every text.
    pub fn validate(&self) -> Result<(), ExtractionError> {
        for brand in &self.brands {
            if brand.keyword.trim().is_empty() {
                return Err(invalid("brands", format!("blank keyword for '{}'", brand.name)));
            }
            if brand.name.trim().is_empty() {
                return Err(invalid("brands", format!("blank name for '{}'", brand.keyword)));
            }
        }

        let lists = [
            ("products", &self.products),
            ("address_blocklist", &self.address_blocklist),
            ("header_keywords", &self.header_keywords),
            ("column_keywords", &self.column_keywords),
            ("summary_keywords", &self.summary_keywords),
        ];
        for (table, list) in lists {
            if let Some(pos) = list.iter().position(|k| k.trim().is_empty()) {
                return Err(invalid(table, format!("blank keyword at position {pos}")));
            }
        }

        Ok(())
    }

    /// Whether a lowercased line contains blocklisted boilerplate.
    pub fn is_blocklisted(&self, lower_line: &str) -> bool {
        contains_any(lower_line, &self.address_blocklist)
    }

    /// Whether a lowercased line looks like an item table header row.
    pub fn is_item_header(&self, lower_line: &str) -> bool {
        contains_any(lower_line, &self.header_keywords)
            && contains_any(lower_line, &self.column_keywords)
    }

    /// Whether a lowercased line looks like a total or footer line.
    pub fn is_summary_line(&self, lower_line: &str) -> bool {
        contains_any(lower_line, &self.summary_keywords)
    }
}

fn contains_any(haystack: &str, needles: &[String]) -> bool {
    needles.iter().any(|needle| haystack.contains(needle.as_str()))
}

fn owned(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

fn invalid(table: &str, reason: String) -> ExtractionError {
    ExtractionError::InvalidKeywords {
        table: table.to_string(),
        reason,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_brand_order() {
        let tables = KeywordTables::default();
        let keywords: Vec<&str> = tables.brands.iter().map(|b| b.keyword.as_str()).collect();

        assert_eq!(keywords.first(), Some(&"amazon"));
        assert_eq!(keywords.last(), Some(&"samsung"));
        assert_eq!(keywords.len(), BRAND_KEYWORDS.len());
    }

    #[test]
    fn test_blocklist() {
        let tables = KeywordTables::default();

        assert!(tables.is_blocklisted("123 mg road, bangalore"));
        assert!(tables.is_blocklisted("ship to: john"));
        assert!(!tables.is_blocklisted("sony wh-1000xm4 headphones"));
    }

    #[test]
    fn test_item_header_needs_both_words() {
        let tables = KeywordTables::default();

        assert!(tables.is_item_header("description qty price"));
        assert!(tables.is_item_header("particulars amount"));
        assert!(!tables.is_item_header("description"));
        assert!(!tables.is_item_header("qty price"));
    }

    #[test]
    fn test_normalized_lowercases() {
        let tables = KeywordTables {
            brands: vec![BrandKeyword::new("  DMart ", " DMart ")],
            products: vec!["Kettle".to_string()],
            ..KeywordTables::default()
        }
        .normalized();

        assert_eq!(tables.brands[0], BrandKeyword::new("dmart", "DMart"));
        assert_eq!(tables.products, vec!["kettle".to_string()]);
    }

    #[test]
    fn test_validate_rejects_blank_keyword() {
        let mut tables = KeywordTables::default();
        assert!(tables.validate().is_ok());

        tables.products.push("  ".to_string());
        let err = tables.validate().unwrap_err();
        assert!(matches!(
            err,
            ExtractionError::InvalidKeywords { ref table, .. } if table == "products"
        ));

        let tables = KeywordTables {
            brands: vec![BrandKeyword::new("", "Nobody")],
            ..KeywordTables::default()
        };
        assert!(tables.validate().is_err());
    }

    #[test]
    fn test_tables_deserialize_with_defaults() {
        let tables: KeywordTables =
            serde_json::from_str(r#"{"products": ["kettle", "toaster"]}"#).unwrap();

        assert_eq!(tables.products, vec!["kettle", "toaster"]);
        assert_eq!(tables.brands, KeywordTables::default().brands);
    }
}
