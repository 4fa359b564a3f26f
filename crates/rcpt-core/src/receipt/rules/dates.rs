//! Date extraction for receipts.

use tracing::debug;

use super::patterns::DATE_PATTERNS;
use super::{first_accepted, LineExtractor, NormalizedLines};
use crate::models::config::ExtractionConfig;

/// Date field extractor.
///
/// Returns the date substring exactly as printed. Calendar validity is not
/// checked: one misread digit should not throw away an otherwise usable
/// date, so interpretation is left to the consumer.
pub struct DateExtractor {
    scan_lines: usize,
}

impl DateExtractor {
    pub fn new() -> Self {
        Self::from_config(&ExtractionConfig::default())
    }

    pub fn from_config(config: &ExtractionConfig) -> Self {
        Self {
            scan_lines: config.date_scan_lines,
        }
    }

    /// First date shape found on a single line.
    pub fn extract_from_line(&self, line: &str) -> Option<String> {
        first_accepted(&DATE_PATTERNS, line, |captured| Some(captured.to_string()))
            .map(|(_, date)| date)
    }
}

impl Default for DateExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl LineExtractor for DateExtractor {
    type Output = String;

    fn extract(&self, lines: &NormalizedLines) -> Option<String> {
        let date = lines
            .head(self.scan_lines)
            .iter()
            .find_map(|line| self.extract_from_line(line));

        if let Some(date) = &date {
            debug!("Found date {}", date);
        }
        date
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn date(text: &str) -> Option<String> {
        DateExtractor::new().extract(&NormalizedLines::from_raw(text))
    }

    #[test]
    fn test_extract_date_dmy() {
        assert_eq!(date("ЛИДЛ\nДата: 17.05.2024 14:32"), Some("17.05.2024".to_string()));
    }

    #[test]
    fn test_extract_date_ymd() {
        assert_eq!(date("ЛИДЛ\n2024-05-17 14:32"), Some("2024-05-17".to_string()));
    }

    #[test]
    fn test_extract_date_two_digit_year() {
        assert_eq!(date("17/05/24"), Some("17/05/24".to_string()));
    }

    #[test]
    fn test_extract_date_glued_to_suffix() {
        assert_eq!(date("17.05.2024г."), Some("17.05.2024".to_string()));
    }

    #[test]
    fn test_extract_date_glued_to_time() {
        assert_eq!(date("17.05.202414:32"), Some("17.05.2024".to_string()));
        assert_eq!(date("2024-05-1714:32"), Some("2024-05-17".to_string()));
    }

    #[test]
    fn test_impossible_date_kept_verbatim() {
        assert_eq!(date("31/02/9999"), Some("31/02/9999".to_string()));
    }

    #[test]
    fn test_first_line_wins() {
        assert_eq!(date("01.01.2023\n02.02.2024"), Some("01.01.2023".to_string()));
    }

    #[test]
    fn test_scan_window() {
        let mut text = "ред\n".repeat(15);
        text.push_str("17.05.2024");
        assert_eq!(date(&text), None);
    }

    #[test]
    fn test_no_date() {
        assert_eq!(date("Хляб 1.20\nОБЩО 1.20"), None);
    }
}
