//! The per-sheet output table.

use crate::aggregate::ItemRecord;
use serde::{Deserialize, Serialize};

/// Everything the engine extracted from one sheet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub sheet: String,
    /// Row carrying the weekday labels
    pub header_row: usize,
    /// Menu items in source row order
    pub items: Vec<ItemRecord>,
    /// The first total-tagged row, kept apart so callers choose its placement
    pub total: Option<ItemRecord>,
    /// Any later total-tagged rows
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub extra_totals: Vec<ItemRecord>,
}

impl AnalysisResult {
    #[must_use]
    pub fn items(&self) -> &[ItemRecord] {
        &self.items
    }

    #[must_use]
    pub fn total(&self) -> Option<&ItemRecord> {
        self.total.as_ref()
    }

    #[must_use]
    pub fn extra_totals(&self) -> &[ItemRecord] {
        &self.extra_totals
    }

    /// Number of menu items, totals excluded
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// First item with the given name
    #[must_use]
    pub fn item(&self, name: &str) -> Option<&ItemRecord> {
        self.items.iter().find(|r| r.name == name)
    }

    /// Cells that were coerced to zero across items and totals
    #[must_use]
    pub fn defaulted_cells(&self) -> usize {
        self.items
            .iter()
            .chain(self.total.iter())
            .chain(self.extra_totals.iter())
            .map(|r| r.defaulted_cells)
            .sum()
    }
}

/// Collects records in encounter order and sets totals aside.
#[derive(Debug)]
pub struct ResultAssembler {
    sheet: String,
    header_row: usize,
    items: Vec<ItemRecord>,
    total: Option<ItemRecord>,
    extra_totals: Vec<ItemRecord>,
}

impl ResultAssembler {
    #[must_use]
    pub fn new(sheet: &str, header_row: usize) -> Self {
        Self {
            sheet: sheet.to_string(),
            header_row,
            items: Vec::new(),
            total: None,
            extra_totals: Vec::new(),
        }
    }

    pub fn push(&mut self, record: ItemRecord) {
        if !record.is_total {
            self.items.push(record);
        } else if self.total.is_none() {
            self.total = Some(record);
        } else {
            tracing::debug!(
                "Sheet '{}': extra total row '{}' at row {}",
                self.sheet,
                record.name,
                record.row
            );
            self.extra_totals.push(record);
        }
    }

    #[must_use]
    pub fn finish(self) -> AnalysisResult {
        AnalysisResult {
            sheet: self.sheet,
            header_row: self.header_row,
            items: self.items,
            total: self.total,
            extra_totals: self.extra_totals,
        }
    }
}

impl Extend<ItemRecord> for ResultAssembler {
    fn extend<T: IntoIterator<Item = ItemRecord>>(&mut self, iter: T) {
        for record in iter {
            self.push(record);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::BucketStats;

    fn record(name: &str, row: usize, is_total: bool) -> ItemRecord {
        ItemRecord {
            name: name.to_string(),
            row,
            weekday: BucketStats::default(),
            weekend: BucketStats::default(),
            is_total,
            defaulted_cells: 1,
        }
    }

    #[test]
    fn test_items_keep_row_order() {
        let mut assembler = ResultAssembler::new("week", 3);
        assembler.extend([
            record("바게트", 5, false),
            record("크루아상", 6, false),
            record("바게트", 7, false),
        ]);
        let result = assembler.finish();

        let names: Vec<&str> = result.items().iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["바게트", "크루아상", "바게트"]);
        assert!(result.total().is_none());
        assert_eq!(result.len(), 3);
    }

    #[test]
    fn test_first_total_wins() {
        let mut assembler = ResultAssembler::new("week", 3);
        assembler.extend([
            record("Croissant", 5, false),
            record("Grand Total", 6, true),
            record("Bagel", 7, false),
            record("합계", 8, true),
        ]);
        let result = assembler.finish();

        assert_eq!(result.len(), 2);
        assert!(result.items().iter().all(|r| !r.is_total));
        assert_eq!(result.total().map(|r| r.row), Some(6));
        assert_eq!(result.extra_totals().len(), 1);
        assert_eq!(result.extra_totals()[0].name, "합계");
        assert_eq!(result.defaulted_cells(), 4);
    }

    #[test]
    fn test_lookup_by_name() {
        let mut assembler = ResultAssembler::new("week", 0);
        assembler.push(record("Bagel", 2, false));
        let result = assembler.finish();

        assert_eq!(result.item("Bagel").map(|r| r.row), Some(2));
        assert!(result.item("Muffin").is_none());
    }

    #[test]
    fn test_serde_roundtrip() {
        let mut assembler = ResultAssembler::new("week", 1);
        assembler.push(record("Bagel", 3, false));
        assembler.push(record("Total", 4, true));
        let result = assembler.finish();

        let json = serde_json::to_string(&result).unwrap();
        assert!(!json.contains("extra_totals"));
        let parsed: AnalysisResult = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, result);
    }
}
