//! Weekday header resolution.
//!
//! Production logs put one calendar day in two adjacent columns (production,
//! waste) and usually merge the weekday label across both, so only the first
//! sub-column carries text. The resolver finds the header row and rebuilds a
//! label for every data column by forward-filling those gaps.

use crate::config::LayoutConfig;
use crate::error::{AnalysisError, Result};
use crate::weekday::DayLabel;
use ovenlog_sheet::{CellValue, Sheet};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Resolved weekday per data column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnDayMap(Vec<DayLabel>);

impl ColumnDayMap {
    /// Build a map from header cells, forward-filling blanks.
    ///
    /// Each blank cell inherits the nearest preceding non-blank cell. Filling
    /// happens on the raw cell, so blanks after a non-day label (such as a
    /// trailing "Total" column) stay `Unknown`, as do leading blanks.
    pub fn from_cells<'a, I>(cells: I) -> Self
    where
        I: IntoIterator<Item = &'a CellValue>,
    {
        let mut current = DayLabel::Unknown;
        let labels = cells
            .into_iter()
            .map(|cell| {
                if !cell.is_blank() {
                    current = DayLabel::from_cell(cell);
                }
                current
            })
            .collect();
        Self(labels)
    }

    #[must_use]
    pub fn labels(&self) -> &[DayLabel] {
        &self.0
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> DayLabel {
        self.0.get(index).copied().unwrap_or(DayLabel::Unknown)
    }
}

impl From<Vec<DayLabel>> for ColumnDayMap {
    fn from(labels: Vec<DayLabel>) -> Self {
        Self(labels)
    }
}

/// Where the data lives in one sheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedLayout {
    /// Row carrying the weekday labels
    pub header_row: usize,
    /// First candidate item row
    pub first_data_row: usize,
    /// First column of the data region
    pub data_start: usize,
    /// Column holding item names, if the sheet has any label column
    pub name_column: Option<usize>,
    /// One label per data-region column
    pub day_map: ColumnDayMap,
}

impl ResolvedLayout {
    /// One past the last column of the data region
    #[must_use]
    pub fn data_end(&self) -> usize {
        self.data_start + self.day_map.len()
    }
}

/// Distinct recognized weekdays in a row, over its full width.
fn distinct_days(row: &[CellValue]) -> usize {
    row.iter()
        .map(DayLabel::from_cell)
        .filter(|d| d.is_known())
        .collect::<HashSet<_>>()
        .len()
}

/// Find the first row within the search window that names enough weekdays.
#[must_use]
pub fn find_header_row(sheet: &Sheet, config: &LayoutConfig) -> Option<usize> {
    (0..config.header_search_rows.min(sheet.row_count()))
        .find(|&r| distinct_days(sheet.row(r)) >= config.min_distinct_days)
}

/// Pick the right-most label column that carries text in the item rows.
fn detect_name_column(sheet: &Sheet, first_data_row: usize, data_start: usize) -> Option<usize> {
    let has_text = |col: usize| {
        (first_data_row..sheet.row_count()).any(|r| {
            sheet
                .cell(r, col)
                .as_text()
                .is_some_and(|t| !t.trim().is_empty())
        })
    };

    (0..data_start)
        .rev()
        .find(|&col| has_text(col))
        .or_else(|| data_start.checked_sub(1))
}

/// Locate the weekday header and rebuild the per-column day map.
pub fn resolve(sheet: &Sheet, config: &LayoutConfig) -> Result<ResolvedLayout> {
    let header_row =
        find_header_row(sheet, config).ok_or_else(|| AnalysisError::LayoutNotFound {
            sheet: sheet.name().to_string(),
            searched_rows: config.header_search_rows,
        })?;

    let header = sheet.row(header_row);
    let data_start = config.data_start_column.unwrap_or_else(|| {
        header
            .iter()
            .position(|cell| DayLabel::from_cell(cell).is_known())
            .unwrap_or(0)
    });

    let mut width = header.len().saturating_sub(data_start);
    if let Some(max) = config.max_data_columns {
        width = width.min(max);
    }

    let day_map = ColumnDayMap::from_cells(
        (data_start..data_start + width).map(|col| sheet.cell(header_row, col)),
    );

    let first_data_row = header_row + config.data_row_offset;
    let name_column = config
        .name_column
        .or_else(|| detect_name_column(sheet, first_data_row, data_start));

    tracing::debug!(
        "Sheet '{}': header row {}, data columns {}..{}, name column {:?}",
        sheet.name(),
        header_row,
        data_start,
        data_start + width,
        name_column
    );

    Ok(ResolvedLayout {
        header_row,
        first_data_row,
        data_start,
        name_column,
        day_map,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::weekday::DayLabel::{Mon, Tue, Unknown, Wed};

    fn cells(values: &[&str]) -> Vec<CellValue> {
        values.iter().map(|v| CellValue::from(*v)).collect()
    }

    #[test]
    fn test_forward_fill() {
        let header = cells(&["", "", "Mon", "", "Tue", "", "", "Wed", ""]);
        let map = ColumnDayMap::from_cells(&header);

        assert_eq!(
            map.labels(),
            &[Unknown, Unknown, Mon, Mon, Tue, Tue, Tue, Wed, Wed]
        );
    }

    #[test]
    fn test_fill_stops_at_non_day_label() {
        let header = cells(&["Mon", "", "Total", ""]);
        let map = ColumnDayMap::from_cells(&header);

        assert_eq!(map.labels(), &[Mon, Mon, Unknown, Unknown]);
    }

    #[test]
    fn test_whitespace_counts_as_blank() {
        let header = cells(&["월", "  ", "화", ""]);
        let map = ColumnDayMap::from_cells(&header);

        assert_eq!(map.labels(), &[Mon, Mon, Tue, Tue]);
    }

    #[test]
    fn test_header_needs_two_distinct_days() {
        let sheet = Sheet::from_data(vec![
            vec!["Mon", "", "Mon", ""],
            vec!["", "", "", ""],
            vec!["Mon", "", "Tue", ""],
        ]);

        assert_eq!(find_header_row(&sheet, &LayoutConfig::default()), Some(2));
    }

    #[test]
    fn test_header_outside_window_fails() {
        let mut rows = vec![vec![""; 4]; 10];
        rows.push(vec!["", "", "Mon", "Tue"]);
        let sheet = Sheet::from_data(rows);

        let err = resolve(&sheet, &LayoutConfig::default()).unwrap_err();
        assert_eq!(
            err,
            AnalysisError::LayoutNotFound {
                sheet: "Sheet1".to_string(),
                searched_rows: 10,
            }
        );

        let wider = LayoutConfig::default().with_header_search_rows(11);
        assert_eq!(resolve(&sheet, &wider).unwrap().header_row, 10);
    }

    #[test]
    fn test_resolve_detects_data_start_and_name_column() {
        let sheet = Sheet::from_data(vec![
            vec!["", "", "", "", "", "", ""],
            vec!["", "", "", "월", "", "화", ""],
            vec!["", "", "", "1일", "", "2일", ""],
            vec!["", "", "메뉴", "생산", "폐기", "생산", "폐기"],
            vec!["빵", "", "소금빵", "5", "1", "6", "0"],
        ]);

        let layout = resolve(&sheet, &LayoutConfig::default()).unwrap();
        assert_eq!(layout.header_row, 1);
        assert_eq!(layout.first_data_row, 3);
        assert_eq!(layout.data_start, 3);
        assert_eq!(layout.data_end(), 7);
        assert_eq!(layout.name_column, Some(2));
        assert_eq!(layout.day_map.labels(), &[Mon, Mon, Tue, Tue]);
    }

    #[test]
    fn test_fixed_data_start_keeps_leading_unknowns() {
        let sheet = Sheet::from_data(vec![vec![
            "", "", "Mon", "", "Tue", "", "", "Wed", "",
        ]]);
        let config = LayoutConfig::default().with_data_start_column(0);

        let layout = resolve(&sheet, &config).unwrap();
        assert_eq!(
            layout.day_map.labels(),
            &[Unknown, Unknown, Mon, Mon, Tue, Tue, Tue, Wed, Wed]
        );
        assert_eq!(layout.name_column, None);
    }

    #[test]
    fn test_region_ends_with_header_row_and_respects_cap() {
        let sheet = Sheet::from_rows(
            "ragged",
            vec![
                cells(&["", "Sat", "", "Sun", ""]),
                cells(&["Bagel", "1", "0", "2", "0", "50", "0"]),
            ],
        );

        let layout = resolve(&sheet, &LayoutConfig::default()).unwrap();
        assert_eq!(layout.data_start, 1);
        assert_eq!(layout.day_map.len(), 4);
        assert_eq!(layout.data_end(), 5);
        assert_eq!(layout.day_map.get(3), DayLabel::Sun);

        let capped = LayoutConfig::default().with_max_data_columns(2);
        assert_eq!(resolve(&sheet, &capped).unwrap().day_map.len(), 2);
    }
}
