//! Configuration structures for receipt extraction.

use std::path::Path;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};

/// Main configuration for rcpt.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RcptConfig {
    /// Receipt extraction configuration.
    pub extraction: ExtractionConfig,

    /// Output formatting configuration.
    pub output: OutputConfig,
}

/// Scan windows and plausibility bounds used by the extractors.
///
/// The bounds are tuned for Bulgarian lev receipts; other currencies will
/// usually want different ceilings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// How many leading lines may contain the merchant name.
    pub store_name_scan_lines: usize,

    /// How many leading lines may contain the transaction date.
    pub date_scan_lines: usize,

    /// How many leading lines are checked for header vocabulary before the item zone.
    pub header_scan_lines: usize,

    /// How many trailing lines the bottom-up total search looks at.
    pub total_fallback_lines: usize,

    /// Smallest accepted price for a `<name> <price>` item line (inclusive).
    pub min_item_price: Decimal,

    /// Largest accepted price for a `<name> <price>` item line (inclusive).
    pub max_item_price: Decimal,

    /// Totals must be strictly below this value.
    pub max_total: Decimal,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            store_name_scan_lines: 10,
            date_scan_lines: 15,
            header_scan_lines: 15,
            total_fallback_lines: 15,
            min_item_price: Decimal::new(10, 2),
            max_item_price: Decimal::new(1000, 0),
            max_total: Decimal::new(10000, 0),
        }
    }
}

impl ExtractionConfig {
    /// Check that windows are non-empty and bounds are ordered.
    pub fn validate(&self) -> std::result::Result<(), ConfigError> {
        let windows = [
            ("store_name_scan_lines", self.store_name_scan_lines),
            ("date_scan_lines", self.date_scan_lines),
            ("header_scan_lines", self.header_scan_lines),
            ("total_fallback_lines", self.total_fallback_lines),
        ];
        if let Some((name, _)) = windows.iter().find(|(_, lines)| *lines == 0) {
            return Err(ConfigError::EmptyWindow(name));
        }

        for (field, value) in [
            ("min_item_price", self.min_item_price),
            ("max_item_price", self.max_item_price),
            ("max_total", self.max_total),
        ] {
            if value <= Decimal::ZERO {
                return Err(ConfigError::NonPositiveBound {
                    field,
                    value: value.to_string(),
                });
            }
        }

        if self.min_item_price >= self.max_item_price {
            return Err(ConfigError::InvertedBounds {
                lower: "min_item_price",
                lower_value: self.min_item_price.to_string(),
                upper: "max_item_price",
                upper_value: self.max_item_price.to_string(),
            });
        }

        Ok(())
    }
}

/// Output formatting configuration (used by front ends, not by the extractors).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Label printed after amounts in human-readable output.
    pub currency_label: String,

    /// Pretty-print JSON output.
    pub pretty_json: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            currency_label: "лв".to_string(),
            pretty_json: false,
        }
    }
}

impl RcptConfig {
    /// Load configuration from a JSON file and validate it.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        config.extraction.validate()?;
        Ok(config)
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::str::FromStr;

    #[test]
    fn test_default_bounds() {
        let config = ExtractionConfig::default();
        assert_eq!(config.min_item_price, Decimal::from_str("0.10").unwrap());
        assert_eq!(config.max_item_price, Decimal::from(1000));
        assert_eq!(config.max_total, Decimal::from(10000));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: RcptConfig =
            serde_json::from_str(r#"{"extraction": {"max_total": "500"}}"#).unwrap();

        assert_eq!(config.extraction.max_total, Decimal::from(500));
        assert_eq!(config.extraction.store_name_scan_lines, 10);
        assert_eq!(config.output.currency_label, "лв");
    }

    #[test]
    fn test_inverted_item_bounds_rejected() {
        let config = ExtractionConfig {
            min_item_price: Decimal::from(50),
            max_item_price: Decimal::from(5),
            ..Default::default()
        };

        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvertedBounds { lower: "min_item_price", .. })
        ));
    }

    #[test]
    fn test_zero_window_rejected() {
        let config = ExtractionConfig {
            date_scan_lines: 0,
            ..Default::default()
        };

        assert_eq!(
            config.validate(),
            Err(ConfigError::EmptyWindow("date_scan_lines"))
        );
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");

        let mut config = RcptConfig::default();
        config.output.pretty_json = true;
        config.save(&path).unwrap();

        let loaded = RcptConfig::from_file(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_load_rejects_invalid_bounds() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"extraction": {"max_total": "-1"}}"#).unwrap();

        let err = RcptConfig::from_file(&path).unwrap_err();
        assert!(matches!(err, crate::RcptError::Config(_)));
    }
}
