//! Receipt field extraction module.

mod parser;
pub mod rules;

pub use parser::{extract_receipt_data, HeuristicReceiptParser, ParseReport, ReceiptParser};
