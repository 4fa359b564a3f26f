//! Output formatting shared by the process and batch commands.

use rust_decimal::Decimal;

use rcpt_core::{OutputConfig, ReceiptParseResult};

const UNKNOWN_STORE: &str = "Unknown store";
const UNKNOWN_DATE: &str = "Unknown date";
const UNKNOWN_TOTAL: &str = "not found";

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// CSV output, one row per item
    Csv,
    /// Plain text summary
    Text,
}

impl OutputFormat {
    /// File extension used for batch output files.
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Csv => "csv",
            OutputFormat::Text => "txt",
        }
    }
}

pub fn format_receipt(
    receipt: &ReceiptParseResult,
    format: OutputFormat,
    config: &OutputConfig,
) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json if config.pretty_json => Ok(serde_json::to_string_pretty(receipt)?),
        OutputFormat::Json => Ok(serde_json::to_string(receipt)?),
        OutputFormat::Csv => format_csv(receipt),
        OutputFormat::Text => Ok(format_text(receipt, &config.currency_label)),
    }
}

fn format_csv(receipt: &ReceiptParseResult) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record([
        "store_name",
        "date",
        "total",
        "item_name",
        "quantity",
        "unit_price",
        "total_price",
    ])?;

    let store = receipt.store_name.clone().unwrap_or_default();
    let date = receipt.date.clone().unwrap_or_default();
    let total = opt_decimal(receipt.total);

    if receipt.items.is_empty() {
        wtr.write_record([store.as_str(), date.as_str(), total.as_str(), "", "", "", ""])?;
    }

    for item in &receipt.items {
        wtr.write_record([
            &store,
            &date,
            &total,
            &item.name,
            &opt_decimal(item.quantity),
            &opt_decimal(item.unit_price),
            &item.total_price.to_string(),
        ])?;
    }

    let data = String::from_utf8(wtr.into_inner()?)?;
    Ok(data)
}

fn format_text(receipt: &ReceiptParseResult, currency: &str) -> String {
    let mut output = String::new();

    output.push_str(&format!(
        "Store: {}\n",
        receipt.store_name.as_deref().unwrap_or(UNKNOWN_STORE)
    ));
    output.push_str(&format!(
        "Date:  {}\n",
        receipt.date.as_deref().unwrap_or(UNKNOWN_DATE)
    ));
    output.push('\n');

    output.push_str(&format!("Items ({}):\n", receipt.items.len()));
    for (i, item) in receipt.items.iter().enumerate() {
        output.push_str(&format!("  {}. {}", i + 1, item.name));
        match (item.quantity, item.unit_price) {
            (Some(qty), Some(unit)) => output.push_str(&format!(
                " ({} x {} = {})\n",
                qty,
                money(unit, currency),
                money(item.total_price, currency)
            )),
            (Some(qty), None) => output.push_str(&format!(
                " x{}  {}\n",
                qty,
                money(item.total_price, currency)
            )),
            _ => output.push_str(&format!("  {}\n", money(item.total_price, currency))),
        }
    }
    output.push('\n');

    let total = receipt
        .total
        .map(|t| money(t, currency))
        .unwrap_or_else(|| UNKNOWN_TOTAL.to_string());
    output.push_str(&format!("Total: {}\n", total));

    output
}

fn money(amount: Decimal, currency: &str) -> String {
    format!("{:.2} {}", amount, currency)
}

fn opt_decimal(value: Option<Decimal>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rcpt_core::ExtractedItem;

    fn sample() -> ReceiptParseResult {
        ReceiptParseResult {
            store_name: Some("БИЛЛА".to_string()),
            date: None,
            total: Some(Decimal::new(370, 2)),
            items: vec![
                ExtractedItem::priced("Хляб", Decimal::new(120, 2)),
                ExtractedItem::priced("Мляко", Decimal::new(250, 2))
                    .with_quantity(Decimal::from(2))
                    .with_unit_price(Decimal::new(125, 2)),
            ],
            raw_text: String::new(),
        }
    }

    #[test]
    fn test_text_uses_placeholders_and_currency() {
        let text = format_text(&sample(), "лв");
        assert!(text.contains("Store: БИЛЛА"));
        assert!(text.contains("Date:  Unknown date"));
        assert!(text.contains("1. Хляб  1.20 лв"));
        assert!(text.contains("2. Мляко (2 x 1.25 лв = 2.50 лв)"));
        assert!(text.contains("Total: 3.70 лв"));
    }

    #[test]
    fn test_text_missing_total() {
        let receipt = ReceiptParseResult::empty("");
        let text = format_text(&receipt, "BGN");
        assert!(text.contains("Store: Unknown store"));
        assert!(text.contains("Items (0):"));
        assert!(text.contains("Total: not found"));
    }

    #[test]
    fn test_csv_one_row_per_item() {
        let csv = format_csv(&sample()).unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[1], "БИЛЛА,,3.70,Хляб,,,1.20");
        assert_eq!(lines[2], "БИЛЛА,,3.70,Мляко,2,1.25,2.50");
    }

    #[test]
    fn test_csv_without_items_keeps_header_fields() {
        let csv = format_csv(&ReceiptParseResult::empty("")).unwrap();
        assert_eq!(csv.lines().count(), 2);
    }

    #[test]
    fn test_json_respects_pretty_flag() {
        let config = OutputConfig {
            pretty_json: true,
            ..Default::default()
        };
        let json = format_receipt(&sample(), OutputFormat::Json, &config).unwrap();
        assert!(json.contains('\n'));

        let compact = format_receipt(&sample(), OutputFormat::Json, &OutputConfig::default()).unwrap();
        assert!(!compact.contains('\n'));
    }
}
