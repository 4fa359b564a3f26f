//! Rule-based receipt parser.

use std::time::Instant;

use rust_decimal::Decimal;
use tracing::{debug, info};

use crate::models::config::ExtractionConfig;
use crate::models::receipt::ReceiptParseResult;

use super::rules::{
    DateExtractor, ItemLineParser, ItemZoneDetector, LineExtractor, NormalizedLines,
    StoreNameExtractor, TotalExtractor,
};
use super::ReceiptParser;

/// Receipt parser built from ordered pattern cascades and line heuristics.
///
/// Store name, date, items and total are extracted independently from the
/// same normalized lines; one failing does not affect the others.
#[derive(Debug, Clone, Default)]
pub struct RuleReceiptParser {
    config: ExtractionConfig,
}

impl RuleReceiptParser {
    /// Create a parser with default scan windows and bounds.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the whole extraction configuration.
    pub fn with_config(mut self, config: ExtractionConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the inclusive price range for `name price` item lines.
    pub fn with_item_price_bounds(mut self, min: Decimal, max: Decimal) -> Self {
        self.config.min_item_price = min;
        self.config.max_item_price = max;
        self
    }

    /// Set the exclusive upper bound for the total.
    pub fn with_max_total(mut self, max_total: Decimal) -> Self {
        self.config.max_total = max_total;
        self
    }

    pub fn config(&self) -> &ExtractionConfig {
        &self.config
    }
}

impl ReceiptParser for RuleReceiptParser {
    fn parse(&self, raw_text: &str) -> ReceiptParseResult {
        let start = Instant::now();
        let lines = NormalizedLines::from_raw(raw_text);

        info!("Parsing receipt from {} lines of text", lines.len());

        let store_name = StoreNameExtractor::from_config(&self.config).extract(&lines);
        let date = DateExtractor::from_config(&self.config).extract(&lines);

        let zone = ItemZoneDetector::from_config(&self.config).detect(&lines);
        let items = ItemLineParser::from_config(&self.config).parse_items(&lines, zone);

        let total = TotalExtractor::from_config(&self.config).extract(&lines);

        let result = ReceiptParseResult {
            store_name,
            date,
            total,
            items,
            raw_text: raw_text.to_string(),
        };

        debug!(
            "Receipt parsed in {} ms: store={:?} date={:?} total={:?}",
            start.elapsed().as_millis(),
            result.store_name,
            result.date,
            result.total
        );
        info!(
            "Extracted {} items, complete: {}",
            result.items.len(),
            result.is_complete()
        );

        result
    }
}

/// Parse receipt text with the default configuration.
pub fn parse_receipt_text(raw_text: &str) -> ReceiptParseResult {
    RuleReceiptParser::new().parse(raw_text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::receipt::ExtractedItem;
    use pretty_assertions::assert_eq;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    const SAMPLE: &str = "\
ФАНТАСТИКО ГРУП ООД
ЕИК 131071587
Касиер: Мария
17.05.2024 14:32
Хляб Добруджа 1.20
Мляко Верея 2 х 1.25 = 2.50
Сирене 8.90 лв
Банани 3.15
ОБЩО ЗА ПЛАЩАНЕ: 15.75
В брой 20.00
РЕСТО 4.25
ФИСКАЛЕН БОН";

    #[test]
    fn test_parse_full_receipt() {
        let result = parse_receipt_text(SAMPLE);

        assert_eq!(result.store_name.as_deref(), Some("ФАНТАСТИКО ГРУП"));
        assert_eq!(result.date.as_deref(), Some("17.05.2024"));
        assert_eq!(result.total, Some(dec("15.75")));
        assert_eq!(
            result.items,
            vec![
                ExtractedItem::priced("Хляб Добруджа", dec("1.20")),
                ExtractedItem::priced("Мляко Верея", dec("2.50"))
                    .with_quantity(dec("2"))
                    .with_unit_price(dec("1.25")),
                ExtractedItem::priced("Сирене", dec("8.90")),
                ExtractedItem::priced("Банани", dec("3.15")),
            ]
        );
        assert_eq!(result.raw_text, SAMPLE);
        assert!(result.validate().is_empty());
    }

    #[test]
    fn test_parse_empty_text() {
        assert_eq!(parse_receipt_text(""), ReceiptParseResult::empty(""));
        assert_eq!(parse_receipt_text(" \n\r\n\t"), ReceiptParseResult::empty(" \n\r\n\t"));
    }

    #[test]
    fn test_parse_garbage_does_not_panic() {
        let inputs = [
            "@@@###\n$$$",
            "0000000000000000000000000",
            "= = = = =",
            "ОБЩО\nОБЩО\nОБЩО",
            "\u{0}\u{1}\u{fffd}",
            "1.1.1.1.1.1.1.1",
            "x х X Х = = 1.00",
        ];
        for input in inputs {
            let result = parse_receipt_text(input);
            assert_eq!(result.raw_text, input);
        }
    }

    #[test]
    fn test_parse_is_idempotent() {
        assert_eq!(parse_receipt_text(SAMPLE), parse_receipt_text(SAMPLE));
    }

    #[test]
    fn test_line_endings_do_not_matter() {
        let crlf = SAMPLE.replace('\n', "\r\n");
        let mut from_crlf = parse_receipt_text(&crlf);
        from_crlf.raw_text = SAMPLE.to_string();
        assert_eq!(from_crlf, parse_receipt_text(SAMPLE));
    }

    #[test]
    fn test_missing_fields_stay_absent() {
        let result = parse_receipt_text("Хляб 1.20\nМляко 2.50");
        assert_eq!(result.store_name, None);
        assert_eq!(result.date, None);
        assert_eq!(result.items.len(), 2);
        assert_eq!(result.total, Some(dec("2.50")));
    }

    #[test]
    fn test_with_max_total() {
        let parser = RuleReceiptParser::new().with_max_total(dec("1"));
        assert_eq!(parser.parse(SAMPLE).total, None);
    }

    #[test]
    fn test_with_item_price_bounds() {
        let parser = RuleReceiptParser::new().with_item_price_bounds(dec("2.00"), dec("5.00"));
        let names: Vec<String> = parser.parse(SAMPLE).items.into_iter().map(|i| i.name).collect();
        assert_eq!(names, vec!["Мляко Верея".to_string(), "Банани".to_string()]);
    }

    #[test]
    fn test_concurrent_parsing() {
        let parser = &RuleReceiptParser::new();
        let expected = parser.parse(SAMPLE);

        std::thread::scope(|s| {
            let handles: Vec<_> = (0..4)
                .map(|_| s.spawn(move || parser.parse(SAMPLE)))
                .collect();
            for handle in handles {
                assert_eq!(handle.join().unwrap(), expected);
            }
        });
    }
}
