//! WASM bindings for receipt OCR text extraction.
//!
//! This crate provides WebAssembly bindings for use in browsers and Node.js.

use js_sys::Array;
use rust_decimal::prelude::ToPrimitive;
use serde::Serialize;
use wasm_bindgen::prelude::*;

use rcpt_core::{
    ExtractionConfig, ReceiptParseResult, ReceiptParser, RcptConfig, RuleReceiptParser,
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

/// Extract store, date, items and total from recognized receipt text.
#[wasm_bindgen(js_name = parseReceiptText)]
pub fn parse_receipt_text(text: &str) -> Result<JsValue, JsValue> {
    to_js(&rcpt_core::parse_receipt_text(text))
}

/// Parse an amount such as "23,54" into a number.
#[wasm_bindgen(js_name = parseAmount)]
pub fn parse_amount(text: &str) -> Option<f64> {
    rcpt_core::parse_amount(text).and_then(|d| d.to_f64())
}

/// Interpret a receipt date ("17.05.2024", "2024-05-17", ...) as an ISO date.
#[wasm_bindgen(js_name = normalizeDate)]
pub fn normalize_date(date: &str) -> Option<String> {
    let result = ReceiptParseResult {
        date: Some(date.to_string()),
        ..ReceiptParseResult::empty("")
    };
    result.parsed_date().map(|d| d.to_string())
}

/// Receipt extractor class for browser use.
#[wasm_bindgen]
pub struct ReceiptExtractor {
    parser: RuleReceiptParser,
}

#[wasm_bindgen]
impl ReceiptExtractor {
    /// Create an extractor, optionally from a JSON configuration.
    ///
    /// Accepts either a full configuration or only its `extraction` section.
    #[wasm_bindgen(constructor)]
    pub fn new(config_json: Option<String>) -> Result<ReceiptExtractor, JsValue> {
        let config = match config_json {
            Some(json) => extraction_config(&json)?,
            None => ExtractionConfig::default(),
        };

        Ok(Self {
            parser: RuleReceiptParser::new().with_config(config),
        })
    }

    /// Extract a receipt from text.
    #[wasm_bindgen]
    pub fn parse(&self, text: &str) -> Result<JsValue, JsValue> {
        to_js(&self.parser.parse(text))
    }

    /// Extract a receipt together with its review warnings.
    #[wasm_bindgen(js_name = parseWithWarnings)]
    pub fn parse_with_warnings(&self, text: &str) -> Result<JsValue, JsValue> {
        #[derive(Serialize)]
        struct ParseOutput {
            receipt: ReceiptParseResult,
            warnings: Vec<String>,
        }

        let receipt = self.parser.parse(text);
        let warnings = receipt.validate();

        to_js(&ParseOutput { receipt, warnings })
    }

    /// Review warnings for a text, as an array of strings.
    #[wasm_bindgen]
    pub fn warnings(&self, text: &str) -> Array {
        self.parser
            .parse(text)
            .validate()
            .into_iter()
            .map(JsValue::from)
            .collect()
    }
}

fn extraction_config(json: &str) -> Result<ExtractionConfig, JsValue> {
    let value: serde_json::Value = serde_json::from_str(json).map_err(to_js_error)?;

    let config = if value.get("extraction").is_some() {
        serde_json::from_value::<RcptConfig>(value)
            .map_err(to_js_error)?
            .extraction
    } else {
        serde_json::from_value::<ExtractionConfig>(value).map_err(to_js_error)?
    };

    config.validate().map_err(to_js_error)?;
    Ok(config)
}

fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(value).map_err(to_js_error)
}

fn to_js_error(e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}
