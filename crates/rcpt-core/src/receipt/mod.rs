//! Receipt field extraction module.

mod parser;
pub mod rules;

pub use parser::{parse_receipt_text, RuleReceiptParser};

use crate::models::receipt::ReceiptParseResult;

/// Trait for receipt parsers.
///
/// Parsing never fails: fields that cannot be recovered are left absent.
pub trait ReceiptParser {
    /// Parse recognized receipt text.
    fn parse(&self, raw_text: &str) -> ReceiptParseResult;
}
