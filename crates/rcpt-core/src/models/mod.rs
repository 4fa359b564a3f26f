//! Data models for extracted receipts and configuration.

pub mod config;
pub mod receipt;

pub use config::{ExtractionConfig, OutputConfig, RcptConfig};
pub use receipt::{ExtractedItem, ReceiptParseResult};
