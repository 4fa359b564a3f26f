//! Receipt data models produced by the extraction engine.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A purchased line item.
///
/// `quantity` and `unit_price` are only set when the receipt line spelled
/// them out. `None` means unknown; it does not mean one piece or zero cost.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedItem {
    /// Product name as printed (trimmed, never empty).
    pub name: String,

    /// Quantity, if the line encoded one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantity: Option<Decimal>,

    /// Price per unit, if the line encoded one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit_price: Option<Decimal>,

    /// Price paid for the line.
    pub total_price: Decimal,
}

impl ExtractedItem {
    /// Item with only a name and a line total.
    pub fn priced(name: impl Into<String>, total_price: Decimal) -> Self {
        Self {
            name: name.into(),
            quantity: None,
            unit_price: None,
            total_price,
        }
    }

    pub fn with_quantity(mut self, quantity: Decimal) -> Self {
        self.quantity = Some(quantity);
        self
    }

    pub fn with_unit_price(mut self, unit_price: Decimal) -> Self {
        self.unit_price = Some(unit_price);
        self
    }
}

/// Structured data recovered from one block of receipt text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReceiptParseResult {
    /// Merchant name with legal-entity forms stripped.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub store_name: Option<String>,

    /// Date exactly as printed on the receipt; not validated.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,

    /// Transaction total.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total: Option<Decimal>,

    /// Purchased items in receipt order.
    #[serde(default)]
    pub items: Vec<ExtractedItem>,

    /// The text the result was extracted from.
    pub raw_text: String,
}

impl ReceiptParseResult {
    /// Result with no extracted fields.
    pub fn empty(raw_text: impl Into<String>) -> Self {
        Self {
            store_name: None,
            date: None,
            total: None,
            items: Vec::new(),
            raw_text: raw_text.into(),
        }
    }

    /// Sum of all item line totals.
    pub fn items_total(&self) -> Decimal {
        self.items.iter().map(|i| i.total_price).sum()
    }

    /// Store name and total are both known, which is the minimum needed to
    /// record the receipt as an expense.
    pub fn is_complete(&self) -> bool {
        self.store_name.is_some() && self.total.is_some()
    }

    /// Interpret `date` as a calendar date.
    ///
    /// Accepts the day-first and year-first shapes the date extractor
    /// produces. Impossible dates such as `31/02/2024` give `None`.
    pub fn parsed_date(&self) -> Option<NaiveDate> {
        self.date.as_deref().and_then(parse_receipt_date)
    }

    /// Collect review warnings. The result itself is never changed.
    pub fn validate(&self) -> Vec<String> {
        let mut issues = Vec::new();

        if self.store_name.is_none() {
            issues.push("Missing store name".to_string());
        }

        match &self.date {
            None => issues.push("Missing date".to_string()),
            Some(date) if self.parsed_date().is_none() => {
                issues.push(format!("Date '{}' is not a valid calendar date", date));
            }
            Some(_) => {}
        }

        if self.items.is_empty() {
            issues.push("No line items".to_string());
        }

        match self.total {
            None => issues.push("Missing total".to_string()),
            Some(total) if !self.items.is_empty() => {
                let calculated = self.items_total();
                if (calculated - total).abs() > Decimal::new(1, 2) {
                    issues.push(format!(
                        "Line item total ({}) differs from receipt total ({})",
                        calculated, total
                    ));
                }
            }
            Some(_) => {}
        }

        issues
    }
}

fn parse_receipt_date(s: &str) -> Option<NaiveDate> {
    let parts: Vec<&str> = s.split(['.', '/', '-']).collect();
    if parts.len() != 3 {
        return None;
    }

    let (year, month, day) = if parts[0].len() == 4 {
        (parts[0], parts[1], parts[2])
    } else {
        (parts[2], parts[1], parts[0])
    };

    let year = parse_year(year)?;
    let month: u32 = month.parse().ok()?;
    let day: u32 = day.parse().ok()?;

    NaiveDate::from_ymd_opt(year, month, day)
}

fn parse_year(s: &str) -> Option<i32> {
    let year: i32 = s.parse().ok()?;
    if s.len() <= 2 {
        // 00-50 is this century, 51-99 the last one
        if year <= 50 {
            Some(2000 + year)
        } else {
            Some(1900 + year)
        }
    } else {
        Some(year)
    }
}
