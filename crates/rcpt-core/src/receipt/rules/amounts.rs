//! Total amount extraction.

use rust_decimal::Decimal;
use std::str::FromStr;
use tracing::{debug, trace};

use super::patterns::TOTAL_PATTERNS;
use super::vocabulary::PAYMENT;
use super::{first_accepted, LineExtractor, NormalizedLines};
use crate::models::config::ExtractionConfig;

/// Finds the transaction total.
///
/// Lines carrying an amount-due keyword are tried first, top to bottom.
/// Only if none of them yields a plausible amount are the last
/// `fallback_lines` lines tried, bottom to top. The fallback window is
/// bounded on purpose: the middle of a receipt is mostly item prices.
pub struct TotalExtractor {
    max_total: Decimal,
    fallback_lines: usize,
}

impl TotalExtractor {
    pub fn new() -> Self {
        Self::from_config(&ExtractionConfig::default())
    }

    pub fn from_config(config: &ExtractionConfig) -> Self {
        Self {
            max_total: config.max_total,
            fallback_lines: config.total_fallback_lines,
        }
    }

    /// Amount on a single line, if any pattern yields a plausible total.
    pub fn extract_from_line(&self, line: &str) -> Option<Decimal> {
        first_accepted(&TOTAL_PATTERNS, line, |captured| {
            let amount = parse_amount(captured)?;
            if amount > Decimal::ZERO && amount < self.max_total {
                Some(amount)
            } else {
                trace!("Rejected implausible total {} in '{}'", amount, line);
                None
            }
        })
        .map(|(_, amount)| amount)
    }
}

impl Default for TotalExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl LineExtractor for TotalExtractor {
    type Output = Decimal;

    fn extract(&self, lines: &NormalizedLines) -> Option<Decimal> {
        let keyword_hit = lines
            .iter()
            .filter(|line| PAYMENT.matches(line))
            .find_map(|line| self.extract_from_line(line));

        if let Some(total) = keyword_hit {
            debug!("Found total {} on a payment line", total);
            return Some(total);
        }

        let fallback = lines.tail_range(self.fallback_lines);
        let bottom_up = lines[fallback]
            .iter()
            .rev()
            .find_map(|line| self.extract_from_line(line));

        if let Some(total) = bottom_up {
            debug!("Found total {} in bottom-up scan", total);
        }
        bottom_up
    }
}

/// Parse an OCR amount such as `23.54` or `23,54`.
pub fn parse_amount(s: &str) -> Option<Decimal> {
    Decimal::from_str(&s.trim().replacen(',', ".", 1)).ok()
}
