//! Core library for Bulgarian retail receipt text extraction.
//!
//! This crate provides:
//! - Line normalization of noisy OCR output
//! - Store name, date, line item and total extraction using ordered pattern cascades
//! - Item zone detection separating the receipt header and footer from purchases
//! - Receipt data models and JSON configuration

pub mod error;
pub mod models;
pub mod receipt;

pub use error::{ConfigError, RcptError, Result};
pub use models::config::{ExtractionConfig, OutputConfig, RcptConfig};
pub use models::receipt::{ExtractedItem, ReceiptParseResult};
pub use receipt::rules::{parse_amount, ItemZone, NormalizedLines};
pub use receipt::{parse_receipt_text, ReceiptParser, RuleReceiptParser};
