//! WASM bindings for receipt field extraction.
//!
//! Lets the review form run extraction in the browser on text produced by a
//! client-side OCR engine.

use wasm_bindgen::prelude::*;

use rcpt_core::receipt::rules;
use rcpt_core::{
    HeuristicReceiptParser, KeywordTables, ProductStrategy, ReceiptParser, ScanResponse,
};

/// Initialize panic hook for better error messages in console.
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Version information.
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

/// Extract receipt fields from OCR text.
///
/// Returns the confirmation payload `{ message, editable: { product_name,
/// purchase_date, brand }, raw_text }`.
#[wasm_bindgen]
pub fn extract_receipt_from_text(text: &str) -> Result<JsValue, JsValue> {
    to_js(&ScanResponse::from(rcpt_core::extract_receipt_data(text)))
}

/// Purchase date as `YYYY-MM-DD`, or an empty string.
#[wasm_bindgen]
pub fn extract_purchase_date(text: &str) -> String {
    rules::extract_purchase_date(text)
}

/// Canonical merchant name, or `"Unknown"`.
#[wasm_bindgen]
pub fn classify_brand(text: &str) -> String {
    rules::classify_brand(text)
}

/// Receipt extractor class for browser use.
#[wasm_bindgen]
pub struct ReceiptExtractor {
    parser: HeuristicReceiptParser,
}

#[wasm_bindgen]
impl ReceiptExtractor {
    /// Create an extractor with the built-in keyword tables.
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self {
            parser: HeuristicReceiptParser::new(),
        }
    }

    /// Configure calendar validation of purchase dates.
    #[wasm_bindgen]
    pub fn set_validate_dates(&mut self, validate: bool) {
        self.parser = self.parser.clone().with_date_validation(validate);
    }

    /// Replace the keyword tables with a JS object shaped like the config file's
    /// `extraction.keywords` section. Missing tables keep their defaults.
    #[wasm_bindgen]
    pub fn set_keywords(&mut self, keywords: JsValue) -> Result<(), JsValue> {
        let tables: KeywordTables = serde_wasm_bindgen::from_value(keywords)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        tables
            .validate()
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        self.parser = self.parser.clone().with_tables(tables);
        Ok(())
    }

    /// Extract the confirmation payload from text.
    #[wasm_bindgen]
    pub fn extract(&self, text: &str) -> Result<JsValue, JsValue> {
        to_js(&ScanResponse::from(self.parser.extract(text)))
    }

    /// Extract with diagnostics for the review step.
    #[wasm_bindgen]
    pub fn extract_with_report(&self, text: &str) -> Result<JsValue, JsValue> {
        let report = self.parser.parse(text);

        #[derive(serde::Serialize)]
        struct ReportJs {
            response: ScanResponse,
            product_strategy: Option<ProductStrategy>,
            brand_candidates: Vec<String>,
            warnings: Vec<String>,
            processing_time_ms: u64,
        }

        let output = ReportJs {
            response: ScanResponse::from(report.result),
            product_strategy: report.product_strategy,
            brand_candidates: report.brand_candidates,
            warnings: report.warnings,
            processing_time_ms: report.processing_time_ms,
        };

        to_js(&output)
    }
}

impl Default for ReceiptExtractor {
    fn default() -> Self {
        Self::new()
    }
}

/// Lines recognized by a browser-side OCR engine, top to bottom.
#[wasm_bindgen]
pub struct OcrLines {
    lines: Vec<String>,
}

#[wasm_bindgen]
impl OcrLines {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self { lines: Vec::new() }
    }

    /// Append one recognized line.
    #[wasm_bindgen]
    pub fn add_line(&mut self, text: &str) {
        self.lines.push(text.to_string());
    }

    /// Full text, one recognized line per row.
    #[wasm_bindgen]
    pub fn get_text(&self) -> String {
        self.lines.join("\n")
    }

    /// Extract the confirmation payload from the collected lines.
    #[wasm_bindgen]
    pub fn extract_receipt(&self) -> Result<JsValue, JsValue> {
        extract_receipt_from_text(&self.get_text())
    }
}

impl Default for OcrLines {
    fn default() -> Self {
        Self::new()
    }
}

fn to_js<T: serde::Serialize>(value: &T) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(value).map_err(|e| JsValue::from_str(&e.to_string()))
}
