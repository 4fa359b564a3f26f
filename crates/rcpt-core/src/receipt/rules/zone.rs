//! Item zone detection.

use std::ops::Range;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use super::items::looks_like_product_line;
use super::vocabulary::{ITEM_FOOTER, ITEM_HEADER};
use super::NormalizedLines;
use crate::models::config::ExtractionConfig;

/// Half-open line range `[start, end)` believed to hold purchased items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemZone {
    pub start: usize,
    pub end: usize,
}

impl ItemZone {
    pub fn range(&self) -> Range<usize> {
        self.start..self.end.max(self.start)
    }

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Separates the receipt header and footer from the item lines.
pub struct ItemZoneDetector {
    header_scan_lines: usize,
}

impl ItemZoneDetector {
    pub fn new() -> Self {
        Self::from_config(&ExtractionConfig::default())
    }

    pub fn from_config(config: &ExtractionConfig) -> Self {
        Self {
            header_scan_lines: config.header_scan_lines,
        }
    }

    pub fn detect(&self, lines: &NormalizedLines) -> ItemZone {
        let mut start = 0;

        for (i, line) in lines.head(self.header_scan_lines).iter().enumerate() {
            if ITEM_HEADER.matches(line) {
                trace!("Line {} is an {} line", i, ITEM_HEADER.name());
                start = i + 1;
                continue;
            }
            if looks_like_product_line(line) {
                start = i;
                break;
            }
        }

        let end = lines[start..]
            .iter()
            .position(|line| ITEM_FOOTER.matches(line))
            .map_or(lines.len(), |offset| {
                trace!("Line {} is an {} line", start + offset, ITEM_FOOTER.name());
                start + offset
            });

        let zone = ItemZone { start, end };
        debug!("Item zone {}..{} of {} lines", zone.start, zone.end, lines.len());
        zone
    }
}

impl Default for ItemZoneDetector {
    fn default() -> Self {
        Self::new()
    }
}
