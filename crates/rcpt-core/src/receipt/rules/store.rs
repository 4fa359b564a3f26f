//! Merchant name extraction.

use tracing::{debug, trace};

use super::patterns::{LEADING_DIGIT, LEGAL_FORM_PREFIX, LEGAL_FORM_SUFFIX, STORE_NAME_PATTERNS};
use super::vocabulary::STORE_HEADER;
use super::{first_accepted, LineExtractor, NormalizedLines};
use crate::models::config::ExtractionConfig;

/// Merchant name extractor.
///
/// Looks at the top of the receipt only. The first line that is neither
/// numeric nor a header line and that fits one of the name shapes decides
/// the result.
pub struct StoreNameExtractor {
    scan_lines: usize,
}

impl StoreNameExtractor {
    /// Captured names must be longer than this many characters.
    const MIN_LEN: usize = 2;
    /// Captured names must be shorter than this many characters.
    const MAX_LEN: usize = 50;

    pub fn new() -> Self {
        Self::from_config(&ExtractionConfig::default())
    }

    pub fn from_config(config: &ExtractionConfig) -> Self {
        Self {
            scan_lines: config.store_name_scan_lines,
        }
    }

    fn is_skipped(line: &str) -> bool {
        if LEADING_DIGIT.is_match(line) {
            return true;
        }
        if STORE_HEADER.matches(line) {
            trace!("Skipping {} line '{}'", STORE_HEADER.name(), line);
            return true;
        }
        false
    }

    fn extract_from_line(&self, line: &str) -> Option<String> {
        let (index, captured) = first_accepted(&STORE_NAME_PATTERNS, line, |captured| {
            let len = captured.chars().count();
            (len > Self::MIN_LEN && len < Self::MAX_LEN).then_some(captured)
        })?;

        let name = strip_legal_forms(captured);
        if name.is_empty() {
            trace!("Line '{}' is only a legal form", line);
            return None;
        }

        trace!("Store name shape {} matched '{}'", index, line);
        Some(name)
    }
}

impl Default for StoreNameExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl LineExtractor for StoreNameExtractor {
    type Output = String;

    fn extract(&self, lines: &NormalizedLines) -> Option<String> {
        let name = lines
            .head(self.scan_lines)
            .iter()
            .filter(|line| !Self::is_skipped(line))
            .find_map(|line| self.extract_from_line(line));

        if let Some(name) = &name {
            debug!("Found store name '{}'", name);
        }
        name
    }
}

/// Remove legal-entity forms (ЕООД, АД, ...) from both ends of a name.
pub fn strip_legal_forms(name: &str) -> String {
    let name = name.trim();
    let name = LEGAL_FORM_PREFIX.replace(name, "");
    let name = LEGAL_FORM_SUFFIX.replace(&name, "");
    name.trim().to_string()
}
