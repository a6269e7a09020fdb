//! Receipt data models handed to the product/warranty workflow.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::receipt::rules::{parse_canonical, UNKNOWN_BRAND, UNKNOWN_PRODUCT};

/// Message shown above the editable fields in the review form.
pub const CONFIRM_MESSAGE: &str = "Confirm extracted data";

/// Fields extracted from one receipt.
///
/// Every field is always populated: missing values fall back to
/// `"Unknown Product"`, `""` and `"Unknown"` respectively.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionResult {
    /// Purchased product, at most 100 characters.
    pub product_name: String,

    /// Purchase date as `YYYY-MM-DD`, or empty when none was found.
    pub purchase_date: String,

    /// Canonical merchant name, or `"Unknown"`.
    pub brand: String,

    /// The OCR text the fields were extracted from.
    pub raw_text: String,
}

impl ExtractionResult {
    /// Result with every field at its fallback value.
    pub fn fallback(raw_text: impl Into<String>) -> Self {
        Self {
            product_name: UNKNOWN_PRODUCT.to_string(),
            purchase_date: String::new(),
            brand: UNKNOWN_BRAND.to_string(),
            raw_text: raw_text.into(),
        }
    }

    /// Purchase date as a calendar date, if present and plausible.
    pub fn parsed_purchase_date(&self) -> Option<NaiveDate> {
        parse_canonical(&self.purchase_date)
    }

    pub fn has_known_brand(&self) -> bool {
        self.brand != UNKNOWN_BRAND
    }

    pub fn has_known_product(&self) -> bool {
        self.product_name != UNKNOWN_PRODUCT
    }

    /// Names of fields that fell back and need a human look.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if !self.has_known_product() {
            missing.push("product_name");
        }
        if self.purchase_date.is_empty() {
            missing.push("purchase_date");
        }
        if !self.has_known_brand() {
            missing.push("brand");
        }
        missing
    }
}

/// The fields a user may correct before the product record is created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditableFields {
    pub product_name: String,
    pub purchase_date: String,
    pub brand: String,
}

/// Confirmation payload returned by a receipt scan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanResponse {
    pub message: String,
    pub editable: EditableFields,
    pub raw_text: String,
}

impl From<ExtractionResult> for ScanResponse {
    fn from(result: ExtractionResult) -> Self {
        Self {
            message: CONFIRM_MESSAGE.to_string(),
            editable: EditableFields {
                product_name: result.product_name,
                purchase_date: result.purchase_date,
                brand: result.brand,
            },
            raw_text: result.raw_text,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fallback() {
        let result = ExtractionResult::fallback("");

        assert_eq!(result.product_name, "Unknown Product");
        assert_eq!(result.brand, "Unknown");
        assert_eq!(result.purchase_date, "");
        assert_eq!(result.missing_fields(), vec!["product_name", "purchase_date", "brand"]);
        assert_eq!(result.parsed_purchase_date(), None);
    }

    #[test]
    fn test_scan_response_shape() {
        let result = ExtractionResult {
            product_name: "Samsung Galaxy S10".to_string(),
            purchase_date: "2019-10-28".to_string(),
            brand: "Croma".to_string(),
            raw_text: "Croma Retail".to_string(),
        };
        assert_eq!(result.parsed_purchase_date(), NaiveDate::from_ymd_opt(2019, 10, 28));
        assert!(result.missing_fields().is_empty());

        let json = serde_json::to_value(ScanResponse::from(result)).unwrap();

        assert_eq!(json["message"], "Confirm extracted data");
        assert_eq!(json["editable"]["product_name"], "Samsung Galaxy S10");
        assert_eq!(json["editable"]["purchase_date"], "2019-10-28");
        assert_eq!(json["editable"]["brand"], "Croma");
        assert_eq!(json["raw_text"], "Croma Retail");
    }
}
