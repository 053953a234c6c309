//! Record scanning: decide which rows are menu items and pull their numbers.

use crate::classify::ColumnMasks;
use crate::config::LayoutConfig;
use crate::header::ResolvedLayout;
use ovenlog_sheet::{CellValue, Sheet};

/// Outcome of coercing one cell to a number.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Coerced {
    Parsed(f64),
    /// Text, blank, malformed or non-finite; counts as zero
    Defaulted,
}

impl Coerced {
    #[must_use]
    pub fn from_cell(cell: &CellValue) -> Self {
        cell.as_float().map_or(Coerced::Defaulted, Coerced::Parsed)
    }

    #[must_use]
    pub fn value(self) -> f64 {
        match self {
            Coerced::Parsed(v) => v,
            Coerced::Defaulted => 0.0,
        }
    }

    #[must_use]
    pub fn is_defaulted(self) -> bool {
        matches!(self, Coerced::Defaulted)
    }
}

/// Why a candidate row was not treated as an item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// Name cell missing, empty or whitespace
    EmptyName,
    /// Name matched a bookkeeping label
    Excluded(String),
}

/// A row accepted as an item, with its raw data-region series.
#[derive(Debug, Clone, PartialEq)]
pub struct ScannedRow {
    pub row: usize,
    pub name: String,
    pub cells: Vec<Coerced>,
}

/// One candidate row's outcome.
#[derive(Debug, Clone, PartialEq)]
pub enum RowScan {
    Accepted(ScannedRow),
    Skipped { row: usize, reason: SkipReason },
}

/// Production/waste pairs of one row, aligned with the bucket masks.
#[derive(Debug, Clone, PartialEq)]
pub struct PairedSeries {
    pub production: Vec<f64>,
    pub waste: Vec<f64>,
    pub is_weekday: Vec<bool>,
    pub is_weekend: Vec<bool>,
    /// Cells in the paired range that fell back to zero
    pub defaulted: usize,
}

impl ScannedRow {
    /// Split the series by parity: even positions are production, odd
    /// positions are waste.
    ///
    /// When the series and the masks disagree in length, both are cut to the
    /// shorter one for this row only. A trailing production cell without a
    /// waste partner pairs with zero waste.
    #[must_use]
    pub fn paired(&self, masks: &ColumnMasks) -> PairedSeries {
        let len = self.cells.len().min(masks.len());
        if self.cells.len() != masks.len() {
            tracing::warn!(
                "Row {} ('{}'): {} data cells but {} labeled columns, using {}",
                self.row,
                self.name,
                self.cells.len(),
                masks.len(),
                len
            );
        }

        let cells = &self.cells[..len];
        let production: Vec<f64> = cells.iter().step_by(2).map(|c| c.value()).collect();
        let waste: Vec<f64> = (0..production.len())
            .map(|i| cells.get(2 * i + 1).map_or(0.0, |c| c.value()))
            .collect();
        let (is_weekday, is_weekend) = masks.pair_masks(len);

        PairedSeries {
            production,
            waste,
            is_weekday,
            is_weekend,
            defaulted: cells.iter().filter(|c| c.is_defaulted()).count(),
        }
    }
}

/// Lazy walk over the candidate rows below the weekday header.
pub struct RecordScanner<'a> {
    sheet: &'a Sheet,
    layout: &'a ResolvedLayout,
    config: &'a LayoutConfig,
    next_row: usize,
}

impl<'a> RecordScanner<'a> {
    #[must_use]
    pub fn new(sheet: &'a Sheet, layout: &'a ResolvedLayout, config: &'a LayoutConfig) -> Self {
        Self {
            sheet,
            layout,
            config,
            next_row: layout.first_data_row,
        }
    }

    /// Only the accepted rows
    pub fn accepted(self) -> impl Iterator<Item = ScannedRow> + 'a {
        self.filter_map(|scan| match scan {
            RowScan::Accepted(row) => Some(row),
            RowScan::Skipped { .. } => None,
        })
    }

    fn scan_row(&self, row: usize) -> RowScan {
        let name = self
            .layout
            .name_column
            .map(|col| self.sheet.cell(row, col).as_str())
            .unwrap_or_default();
        let name = name.trim();

        if name.is_empty() {
            return RowScan::Skipped {
                row,
                reason: SkipReason::EmptyName,
            };
        }
        if self.config.is_excluded(name) {
            return RowScan::Skipped {
                row,
                reason: SkipReason::Excluded(name.to_string()),
            };
        }

        let cells = self
            .sheet
            .row_slice(row, self.layout.data_start, self.layout.data_end())
            .iter()
            .map(Coerced::from_cell)
            .collect();

        RowScan::Accepted(ScannedRow {
            row,
            name: name.to_string(),
            cells,
        })
    }
}

impl Iterator for RecordScanner<'_> {
    type Item = RowScan;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next_row >= self.sheet.row_count() {
            return None;
        }
        let row = self.next_row;
        self.next_row += 1;

        let scan = self.scan_row(row);
        if let RowScan::Skipped { reason, .. } = &scan {
            tracing::trace!("Row {} skipped: {:?}", row, reason);
        }
        Some(scan)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::header::resolve;

    fn log_sheet() -> Sheet {
        Sheet::from_rows(
            "week",
            vec![
                vec![],
                vec![
                    CellValue::Null,
                    CellValue::Null,
                    CellValue::from("월"),
                    CellValue::Null,
                    CellValue::from("토"),
                    CellValue::Null,
                ],
                vec![],
                vec![
                    CellValue::Null,
                    CellValue::from("크루아상"),
                    CellValue::Int(10),
                    CellValue::Int(2),
                    CellValue::from("품절"),
                    CellValue::Int(1),
                ],
                vec![CellValue::Null, CellValue::from("  ")],
                vec![CellValue::Null, CellValue::from("입력한 사람"), CellValue::Int(3)],
                vec![
                    CellValue::Null,
                    CellValue::from(" 합계 "),
                    CellValue::Int(10),
                    CellValue::Int(2),
                    CellValue::Int(0),
                    CellValue::Int(1),
                ],
                vec![CellValue::Null, CellValue::from("바게트"), CellValue::Int(4)],
            ],
        )
    }

    #[test]
    fn test_coercion() {
        assert_eq!(Coerced::from_cell(&CellValue::Int(3)), Coerced::Parsed(3.0));
        assert_eq!(
            Coerced::from_cell(&CellValue::String("2.5".to_string())),
            Coerced::Parsed(2.5)
        );
        assert_eq!(
            Coerced::from_cell(&CellValue::String("see note".to_string())),
            Coerced::Defaulted
        );
        assert_eq!(Coerced::from_cell(&CellValue::Null), Coerced::Defaulted);
        assert_eq!(Coerced::Defaulted.value(), 0.0);
    }

    #[test]
    fn test_row_outcomes() {
        let sheet = log_sheet();
        let config = LayoutConfig::default();
        let layout = resolve(&sheet, &config).unwrap();

        let scans: Vec<RowScan> = RecordScanner::new(&sheet, &layout, &config).collect();
        assert_eq!(scans.len(), 5);

        assert!(matches!(&scans[0], RowScan::Accepted(r) if r.name == "크루아상" && r.row == 3));
        assert_eq!(
            scans[1],
            RowScan::Skipped {
                row: 4,
                reason: SkipReason::EmptyName
            }
        );
        assert_eq!(
            scans[2],
            RowScan::Skipped {
                row: 5,
                reason: SkipReason::Excluded("입력한 사람".to_string())
            }
        );
        assert!(matches!(&scans[3], RowScan::Accepted(r) if r.name == "합계"));
        assert!(matches!(&scans[4], RowScan::Accepted(r) if r.name == "바게트"));
    }

    #[test]
    fn test_text_cell_becomes_defaulted() {
        let sheet = log_sheet();
        let config = LayoutConfig::default();
        let layout = resolve(&sheet, &config).unwrap();

        let first = RecordScanner::new(&sheet, &layout, &config)
            .accepted()
            .next()
            .unwrap();
        assert_eq!(
            first.cells,
            vec![
                Coerced::Parsed(10.0),
                Coerced::Parsed(2.0),
                Coerced::Defaulted,
                Coerced::Parsed(1.0)
            ]
        );
    }

    #[test]
    fn test_pairing_by_parity() {
        let sheet = log_sheet();
        let config = LayoutConfig::default();
        let layout = resolve(&sheet, &config).unwrap();
        let masks = ColumnMasks::from_day_map(&layout.day_map);

        let first = RecordScanner::new(&sheet, &layout, &config)
            .accepted()
            .next()
            .unwrap();
        let series = first.paired(&masks);

        assert_eq!(series.production, vec![10.0, 0.0]);
        assert_eq!(series.waste, vec![2.0, 1.0]);
        assert_eq!(series.is_weekday, vec![true, false]);
        assert_eq!(series.is_weekend, vec![false, true]);
        assert_eq!(series.defaulted, 1);
    }

    #[test]
    fn test_short_row_is_truncated() {
        let sheet = log_sheet();
        let config = LayoutConfig::default();
        let layout = resolve(&sheet, &config).unwrap();
        let masks = ColumnMasks::from_day_map(&layout.day_map);

        let last = RecordScanner::new(&sheet, &layout, &config)
            .accepted()
            .last()
            .unwrap();
        assert_eq!(last.cells.len(), 1);

        let series = last.paired(&masks);
        assert_eq!(series.production, vec![4.0]);
        assert_eq!(series.waste, vec![0.0]);
        assert_eq!(series.is_weekday, vec![true]);
        assert_eq!(series.is_weekend, vec![false]);
    }

    #[test]
    fn test_rows_above_first_data_row_are_not_scanned() {
        let sheet = log_sheet();
        let config = LayoutConfig::default().with_data_row_offset(5);
        let layout = resolve(&sheet, &config).unwrap();

        let rows: Vec<usize> = RecordScanner::new(&sheet, &layout, &config)
            .map(|scan| match scan {
                RowScan::Accepted(r) => r.row,
                RowScan::Skipped { row, .. } => row,
            })
            .collect();
        assert_eq!(rows, vec![6, 7]);
    }

    #[test]
    fn test_waste_summary_row_is_excluded_not_total() {
        let sheet = Sheet::from_data(vec![
            vec!["", "월", "", "토", ""],
            vec!["", "", "", "", ""],
            vec!["품목별 폐기 합계", "2", "", "3", ""],
        ]);
        let config = LayoutConfig::default();
        let layout = resolve(&sheet, &config).unwrap();

        assert!(config.is_total("품목별 폐기 합계"));
        let scans: Vec<RowScan> = RecordScanner::new(&sheet, &layout, &config).collect();
        assert_eq!(
            scans,
            vec![RowScan::Skipped {
                row: 2,
                reason: SkipReason::Excluded("품목별 폐기 합계".to_string())
            }]
        );
    }
}
