//! Line normalization.

use std::ops::{Deref, Range};

/// Trimmed, non-empty receipt lines in top-to-bottom order.
///
/// Built once per parse and shared read-only by every extractor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NormalizedLines {
    lines: Vec<String>,
}

impl NormalizedLines {
    /// Split raw OCR text on line breaks, trim each line and drop empty ones.
    pub fn from_raw(raw_text: &str) -> Self {
        let lines = raw_text
            .split(['\n', '\r'])
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .map(str::to_string)
            .collect();

        Self { lines }
    }

    /// The first `n` lines (or all of them if there are fewer).
    pub fn head(&self, n: usize) -> &[String] {
        &self.lines[..n.min(self.lines.len())]
    }

    /// Index range of the last `n` lines.
    pub fn tail_range(&self, n: usize) -> Range<usize> {
        self.lines.len().saturating_sub(n)..self.lines.len()
    }
}

impl Deref for NormalizedLines {
    type Target = [String];

    fn deref(&self) -> &Self::Target {
        &self.lines
    }
}

impl From<&str> for NormalizedLines {
    fn from(raw_text: &str) -> Self {
        Self::from_raw(raw_text)
    }
}
