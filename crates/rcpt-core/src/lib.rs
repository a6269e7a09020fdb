//! Core library for receipt OCR field extraction.
//!
//! This crate turns the free-form text an OCR engine produces for a purchase
//! receipt into the fields needed to register a product and its warranty:
//! - merchant brand (ordered keyword table, first match wins)
//! - purchase date (day-first or ISO, normalized to `YYYY-MM-DD`)
//! - product name (header lookahead, keyword scan, longest line)
//!
//! Extraction is a pure function of the text and never fails; each field has
//! a fallback value.

pub mod error;
pub mod models;
pub mod receipt;

pub use error::{ExtractionError, RcptError, Result};
pub use models::config::RcptConfig;
pub use models::receipt::{EditableFields, ExtractionResult, ScanResponse};
pub use receipt::rules::{KeywordTables, ProductStrategy};
pub use receipt::{extract_receipt_data, HeuristicReceiptParser, ParseReport, ReceiptParser};
