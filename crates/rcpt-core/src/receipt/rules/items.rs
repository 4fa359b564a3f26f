//! Line item extraction.

use regex::{Captures, Regex};
use rust_decimal::Decimal;
use tracing::{debug, trace};

use super::amounts::parse_amount;
use super::patterns::{
    ITEM_CODE_NAME_PRICE, ITEM_NAME_PRICE, ITEM_QTY_NAME_PRICE, ITEM_QTY_TIMES_PRICE, LETTER_RUN,
    PRICE,
};
use super::vocabulary::ITEM_HEADER;
use super::{ItemZone, NormalizedLines};
use crate::models::config::ExtractionConfig;
use crate::models::receipt::ExtractedItem;

type Build = fn(&ItemLineParser, &Captures<'_>) -> Option<ExtractedItem>;

/// Parses purchased items out of the lines of an [`ItemZone`].
///
/// Every line goes through a fixed cascade of shapes. The first shape whose
/// pattern matches decides the line: if its checks fail, the line is dropped.
pub struct ItemLineParser {
    min_item_price: Decimal,
    max_item_price: Decimal,
}

impl ItemLineParser {
    const MIN_LINE_LEN: usize = 3;
    const MIN_NAME_LEN: usize = 3;

    fn shapes() -> [(&'static str, &'static Regex, Build); 4] {
        [
            ("qty x price = total", &*ITEM_QTY_TIMES_PRICE, Self::qty_times_price),
            ("name price", &*ITEM_NAME_PRICE, Self::name_price),
            ("qty name price", &*ITEM_QTY_NAME_PRICE, Self::qty_name_price),
            ("code name price", &*ITEM_CODE_NAME_PRICE, Self::code_name_price),
        ]
    }

    pub fn new() -> Self {
        Self::from_config(&ExtractionConfig::default())
    }

    pub fn from_config(config: &ExtractionConfig) -> Self {
        Self {
            min_item_price: config.min_item_price,
            max_item_price: config.max_item_price,
        }
    }

    /// Parse one line, or `None` if no shape accepts it.
    pub fn parse_line(&self, line: &str) -> Option<ExtractedItem> {
        let line = line.trim();
        if line.chars().count() < Self::MIN_LINE_LEN {
            return None;
        }
        if ITEM_HEADER.matches(line) {
            trace!("Skipping {} line '{}'", ITEM_HEADER.name(), line);
            return None;
        }

        for (name, pattern, build) in Self::shapes() {
            let Some(caps) = pattern.captures(line) else {
                continue;
            };

            let item = build(self, &caps);
            match item {
                Some(_) => trace!("Item shape '{}' accepted '{}'", name, line),
                None => trace!("Item shape '{}' rejected '{}'", name, line),
            }
            return item;
        }

        trace!("No item shape matched '{}'", line);
        None
    }

    /// Parse every line inside `zone`, keeping receipt order.
    pub fn parse_items(&self, lines: &NormalizedLines, zone: ItemZone) -> Vec<ExtractedItem> {
        let items: Vec<ExtractedItem> = lines
            .get(zone.range())
            .unwrap_or_default()
            .iter()
            .filter_map(|line| self.parse_line(line))
            .collect();

        debug!("Parsed {} items from {} zone lines", items.len(), zone.len());
        items
    }

    fn qty_times_price(&self, caps: &Captures<'_>) -> Option<ExtractedItem> {
        let name = non_empty(&caps[1])?;
        let quantity = positive(parse_amount(&caps[2])?)?;
        let unit_price = parse_amount(&caps[3])?;
        let total_price = parse_amount(&caps[4])?;

        Some(
            ExtractedItem::priced(name, total_price)
                .with_quantity(quantity)
                .with_unit_price(unit_price),
        )
    }

    fn name_price(&self, caps: &Captures<'_>) -> Option<ExtractedItem> {
        let name = caps[1].trim();
        let price = parse_amount(&caps[2])?;

        if name.chars().count() < Self::MIN_NAME_LEN {
            return None;
        }
        if price < self.min_item_price || price > self.max_item_price {
            trace!("Item price {} out of bounds in '{}'", price, &caps[0]);
            return None;
        }

        Some(ExtractedItem::priced(name, price))
    }

    // Every line these two match also matches `name_price`, so they only
    // decide a line when called directly.
    fn qty_name_price(&self, caps: &Captures<'_>) -> Option<ExtractedItem> {
        let quantity = positive(parse_amount(&caps[1])?)?;
        let name = non_empty(&caps[2])?;
        let total_price = parse_amount(&caps[3])?;

        Some(ExtractedItem::priced(name, total_price).with_quantity(quantity))
    }

    fn code_name_price(&self, caps: &Captures<'_>) -> Option<ExtractedItem> {
        let name = non_empty(&caps[1])?;
        let total_price = parse_amount(&caps[2])?;

        Some(ExtractedItem::priced(name, total_price))
    }
}

impl Default for ItemLineParser {
    fn default() -> Self {
        Self::new()
    }
}

/// A line that carries a price and a word of at least three letters.
pub fn looks_like_product_line(line: &str) -> bool {
    PRICE.is_match(line) && LETTER_RUN.is_match(line)
}

fn non_empty(s: &str) -> Option<&str> {
    let s = s.trim();
    (!s.is_empty()).then_some(s)
}

fn positive(value: Decimal) -> Option<Decimal> {
    (value > Decimal::ZERO).then_some(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn item(line: &str) -> Option<ExtractedItem> {
        ItemLineParser::new().parse_line(line)
    }

    #[test]
    fn test_quantity_times_unit_price() {
        assert_eq!(
            item("Хляб 2 х 1.50 = 3.00"),
            Some(
                ExtractedItem::priced("Хляб", dec("3.00"))
                    .with_quantity(dec("2"))
                    .with_unit_price(dec("1.50"))
            )
        );
    }

    #[test]
    fn test_fractional_quantity_latin_x() {
        let parsed = item("Домати 1,25 X 3.20 = 4.00").unwrap();
        assert_eq!(parsed.name, "Домати");
        assert_eq!(parsed.quantity, Some(dec("1.25")));
        assert_eq!(parsed.unit_price, Some(dec("3.20")));
        assert_eq!(parsed.total_price, dec("4.00"));
    }

    #[test]
    fn test_name_and_price() {
        assert_eq!(
            item("Мляко Верея 2.50"),
            Some(ExtractedItem::priced("Мляко Верея", dec("2.50")))
        );
    }

    #[test]
    fn test_name_price_with_currency() {
        assert_eq!(
            item("Сирене 8.90 ЛВ"),
            Some(ExtractedItem::priced("Сирене", dec("8.90")))
        );
        assert_eq!(
            item("Банан 1,99 лв"),
            Some(ExtractedItem::priced("Банан", dec("1.99")))
        );
    }

    #[test]
    fn test_price_below_floor_dropped() {
        assert_eq!(item("Дъвка 0.05"), None);
    }

    #[test]
    fn test_price_bounds_inclusive() {
        assert_eq!(item("Бонбон 0.10").map(|i| i.total_price), Some(dec("0.10")));
        assert_eq!(item("Печка 1000.00").map(|i| i.total_price), Some(dec("1000.00")));
    }

    #[test]
    fn test_leading_number_does_not_bypass_price_bounds() {
        assert_eq!(item("1 Дъвка 0.05"), None);
        assert_eq!(item("2024 17 15000.00"), None);
        assert_eq!(item("48213 Климатик 1450.00"), None);
    }

    #[test]
    fn test_leading_number_kept_in_name() {
        assert_eq!(
            item("3 Кифла 0.90"),
            Some(ExtractedItem::priced("3 Кифла", dec("0.90")))
        );
    }

    #[test]
    fn test_quantity_and_code_shapes() {
        let parser = ItemLineParser::new();

        let caps = ITEM_QTY_NAME_PRICE.captures("2 Хляб 3.00").unwrap();
        assert_eq!(
            parser.qty_name_price(&caps),
            Some(ExtractedItem::priced("Хляб", dec("3.00")).with_quantity(dec("2")))
        );

        let caps = ITEM_QTY_NAME_PRICE.captures("0 Хляб 3.00").unwrap();
        assert_eq!(parser.qty_name_price(&caps), None);

        let caps = ITEM_CODE_NAME_PRICE.captures("48213 Климатик 1450.00").unwrap();
        assert_eq!(
            parser.code_name_price(&caps),
            Some(ExtractedItem::priced("Климатик", dec("1450.00")))
        );
    }

    #[test]
    fn test_contact_word_inside_product_name_skips_line() {
        // Vocabulary words match anywhere in the upper-cased line
        assert_eq!(item("2 Телевизор 1299.00"), None);
        assert_eq!(item("Телешко месо 12.50"), None);
        assert!(item("Свинско месо 12.50").is_some());
    }

    #[test]
    fn test_short_and_header_lines_skipped() {
        assert_eq!(item("ab"), None);
        assert_eq!(item("Тел 12.50"), None);
        assert_eq!(item("Касиер 1 3.00"), None);
    }

    #[test]
    fn test_unparseable_line_dropped() {
        assert_eq!(item("Благодарим Ви!"), None);
    }

    #[test]
    fn test_looks_like_product_line() {
        assert!(looks_like_product_line("Хляб 1.20"));
        assert!(!looks_like_product_line("МАГАЗИН"));
        assert!(!looks_like_product_line("12.30"));
        assert!(!looks_like_product_line("AB 1.20"));
    }

    #[test]
    fn test_parse_items_in_zone() {
        let lines = NormalizedLines::from_raw("Каса 1\nХляб 1.20\nМляко 2.50\nОБЩО 3.70");
        let items = ItemLineParser::new().parse_items(&lines, ItemZone { start: 1, end: 3 });
        assert_eq!(
            items,
            vec![
                ExtractedItem::priced("Хляб", dec("1.20")),
                ExtractedItem::priced("Мляко", dec("2.50")),
            ]
        );
    }

    #[test]
    fn test_custom_price_ceiling() {
        let config = ExtractionConfig {
            max_item_price: dec("5.00"),
            ..Default::default()
        };
        let parser = ItemLineParser::from_config(&config);
        assert_eq!(parser.parse_line("Сирене 8.90"), None);
        assert!(parser.parse_line("Хляб 1.20").is_some());
    }
}
