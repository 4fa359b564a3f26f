//! Rule-based field extractors for retail receipts.

pub mod amounts;
pub mod dates;
pub mod items;
pub mod lines;
pub mod patterns;
pub mod store;
pub mod vocabulary;
pub mod zone;

pub use amounts::{parse_amount, TotalExtractor};
pub use dates::DateExtractor;
pub use items::{looks_like_product_line, ItemLineParser};
pub use lines::NormalizedLines;
pub use store::{strip_legal_forms, StoreNameExtractor};
pub use vocabulary::Vocabulary;
pub use zone::{ItemZone, ItemZoneDetector};

use regex::Regex;

/// Trait for extractors that read a single field from receipt lines.
pub trait LineExtractor {
    /// The type of value this extractor produces.
    type Output;

    /// Extract the field, or `None` when no candidate was accepted.
    fn extract(&self, lines: &NormalizedLines) -> Option<Self::Output>;
}

/// Try `patterns` in order against `text` and return the first group-1
/// capture that `accept` turns into a value, with the pattern's index.
pub fn first_accepted<'t, T>(
    patterns: &[Regex],
    text: &'t str,
    mut accept: impl FnMut(&'t str) -> Option<T>,
) -> Option<(usize, T)> {
    patterns.iter().enumerate().find_map(|(index, pattern)| {
        let captured = pattern.captures(text)?.get(1)?.as_str();
        accept(captured).map(|value| (index, value))
    })
}
