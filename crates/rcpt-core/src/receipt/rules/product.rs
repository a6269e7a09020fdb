//! Product name inference.
//!
//! Receipts rarely label the purchased item, so the name is picked by a chain
//! of heuristics tried in a fixed order. The first strategy yielding a
//! non-empty cleaned line wins; later strategies never override it.

use std::cmp::Reverse;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use super::clean::clean_line;
use super::keywords::{KeywordTables, MAX_PRODUCT_NAME_CHARS, UNKNOWN_PRODUCT};
use super::lines::NormalizedText;

/// Lines shorter than this (in characters) are too short for the longest-line fallback.
const MIN_FALLBACK_LINE_CHARS: usize = 16;

/// Lines after an item header must be at least this long.
const MIN_HEADER_ROW_CHARS: usize = 6;

/// One heuristic for locating the product line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProductStrategy {
    /// The row right below an item table header ("Description Qty Price").
    HeaderLookahead,
    /// The first line mentioning a known product keyword.
    KeywordScan,
    /// The longest line that does not look like an address or a total.
    LongestLine,
}

impl ProductStrategy {
    /// Strategies in the order they are attempted.
    pub const ORDER: [ProductStrategy; 3] = [
        ProductStrategy::HeaderLookahead,
        ProductStrategy::KeywordScan,
        ProductStrategy::LongestLine,
    ];

    /// Run this strategy, returning a cleaned, non-empty candidate.
    pub fn attempt(self, text: &NormalizedText<'_>, tables: &KeywordTables) -> Option<String> {
        match self {
            ProductStrategy::HeaderLookahead => header_lookahead(text, tables),
            ProductStrategy::KeywordScan => keyword_scan(text, tables),
            ProductStrategy::LongestLine => longest_line(text, tables),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ProductStrategy::HeaderLookahead => "header_lookahead",
            ProductStrategy::KeywordScan => "keyword_scan",
            ProductStrategy::LongestLine => "longest_line",
        }
    }
}

impl std::fmt::Display for ProductStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Resolved product name and the strategy that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductMatch {
    /// Cleaned name, at most 100 characters, never empty.
    pub name: String,
    /// `None` when the fallback name was used.
    pub strategy: Option<ProductStrategy>,
}

/// Runs the product strategies against one receipt.
pub struct ProductResolver<'a> {
    tables: &'a KeywordTables,
}

impl<'a> ProductResolver<'a> {
    pub fn new(tables: &'a KeywordTables) -> Self {
        Self { tables }
    }

    pub fn resolve(&self, text: &NormalizedText<'_>) -> ProductMatch {
        let found = ProductStrategy::ORDER.iter().find_map(|strategy| {
            let candidate = strategy.attempt(text, self.tables);
            trace!("Product strategy {} -> {:?}", strategy, candidate);
            candidate.map(|name| (*strategy, name))
        });

        match found {
            Some((strategy, name)) => {
                debug!("Product name '{}' found by {}", name, strategy);
                ProductMatch {
                    name: truncate_chars(&name, MAX_PRODUCT_NAME_CHARS),
                    strategy: Some(strategy),
                }
            }
            None => {
                debug!("No product line found in {} lines", text.lines.len());
                ProductMatch {
                    name: UNKNOWN_PRODUCT.to_string(),
                    strategy: None,
                }
            }
        }
    }
}

/// Strategy A: take the row following an item table header.
///
/// A header whose next row is unusable does not stop the scan; a later
/// header may still be followed by the item.
fn header_lookahead(text: &NormalizedText<'_>, tables: &KeywordTables) -> Option<String> {
    text.lines
        .windows(2)
        .filter(|pair| tables.is_item_header(&pair[0].to_lowercase()))
        .find_map(|pair| {
            let row = pair[1];
            let lower = row.to_lowercase();

            if row.chars().count() < MIN_HEADER_ROW_CHARS
                || lower.contains("total")
                || tables.is_blocklisted(&lower)
            {
                return None;
            }

            non_empty(clean_line(row))
        })
}

/// Strategy B: the first clean line mentioning a known product keyword.
fn keyword_scan(text: &NormalizedText<'_>, tables: &KeywordTables) -> Option<String> {
    tables
        .products
        .iter()
        .filter(|keyword| text.lower.contains(keyword.as_str()))
        .find_map(|keyword| {
            text.lines
                .iter()
                .find(|line| {
                    let lower = line.to_lowercase();
                    lower.contains(keyword.as_str()) && !tables.is_blocklisted(&lower)
                })
                .and_then(|line| non_empty(clean_line(line)))
        })
}

/// Strategy C: the longest line that is neither boilerplate nor a total.
///
/// Ties go to the line nearest the top of the receipt.
fn longest_line(text: &NormalizedText<'_>, tables: &KeywordTables) -> Option<String> {
    let mut candidates: Vec<&str> = text
        .lines
        .iter()
        .copied()
        .filter(|line| {
            let lower = line.to_lowercase();
            !tables.is_blocklisted(&lower)
                && !tables.is_summary_line(&lower)
                && line.chars().count() >= MIN_FALLBACK_LINE_CHARS
                && line.chars().any(char::is_alphabetic)
        })
        .collect();

    // sort_by_key is stable, so equal lengths keep their original order.
    candidates.sort_by_key(|line| Reverse(line.chars().count()));

    candidates
        .into_iter()
        .find_map(|line| non_empty(clean_line(line)))
}

fn non_empty(cleaned: String) -> Option<String> {
    (!cleaned.is_empty()).then_some(cleaned)
}

fn truncate_chars(s: &str, max: usize) -> String {
    s.chars().take(max).collect()
}
