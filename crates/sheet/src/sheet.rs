use crate::cell::CellValue;

static NULL_CELL: CellValue = CellValue::Null;

/// A sheet representing a raw 2D grid of cells (row-major storage).
///
/// Rows are not required to have the same length. Loaders keep whatever
/// shape the source file had, and every read accessor treats a position
/// outside a row as an empty cell.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Sheet {
    name: String,
    data: Vec<Vec<CellValue>>,
}

impl Sheet {
    /// Create a new empty sheet
    #[must_use]
    pub fn new() -> Self {
        Self::with_name("Sheet1")
    }

    /// Create a new empty sheet with a name
    #[must_use]
    pub fn with_name(name: &str) -> Self {
        Sheet {
            name: name.to_string(),
            data: Vec::new(),
        }
    }

    /// Create a sheet from a 2D vector of values
    #[must_use]
    pub fn from_data<T: Into<CellValue>>(data: Vec<Vec<T>>) -> Self {
        let converted: Vec<Vec<CellValue>> = data
            .into_iter()
            .map(|row| row.into_iter().map(Into::into).collect())
            .collect();

        Sheet {
            name: "Sheet1".to_string(),
            data: converted,
        }
    }

    /// Create a named sheet from rows of cell values
    #[must_use]
    pub fn from_rows(name: &str, rows: Vec<Vec<CellValue>>) -> Self {
        Sheet {
            name: name.to_string(),
            data: rows,
        }
    }

    /// Get the sheet name
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Set the sheet name
    pub fn set_name(&mut self, name: &str) {
        self.name = name.to_string();
    }

    /// Get the number of rows
    #[must_use]
    pub fn row_count(&self) -> usize {
        self.data.len()
    }

    // ===== Cell Access =====

    /// Get a cell value by row and column index (0-based), if present
    #[must_use]
    pub fn get(&self, row: usize, col: usize) -> Option<&CellValue> {
        self.data.get(row).and_then(|r| r.get(col))
    }

    /// Get a cell value, reading positions outside the grid as `Null`
    #[must_use]
    pub fn cell(&self, row: usize, col: usize) -> &CellValue {
        self.get(row, col).unwrap_or(&NULL_CELL)
    }

    // ===== Row Access =====

    /// Get an entire row by index (0-based); missing rows read as empty
    #[must_use]
    pub fn row(&self, index: usize) -> &[CellValue] {
        self.data.get(index).map_or(&[], Vec::as_slice)
    }

    /// Get the cells of a row in `start..end`, clipped to the row's length
    #[must_use]
    pub fn row_slice(&self, index: usize, start: usize, end: usize) -> &[CellValue] {
        let row = self.row(index);
        let end = end.min(row.len());
        if start >= end {
            return &[];
        }
        &row[start..end]
    }

    /// Get internal data reference
    #[must_use]
    pub fn data(&self) -> &Vec<Vec<CellValue>> {
        &self.data
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ragged() -> Sheet {
        Sheet::from_rows(
            "log",
            vec![
                vec![CellValue::from("a"), CellValue::Int(1), CellValue::Int(2)],
                vec![CellValue::from("b")],
                vec![],
            ],
        )
    }

    #[test]
    fn test_from_data() {
        let sheet = Sheet::from_data(vec![vec![1, 2, 3], vec![4, 5, 6]]);

        assert_eq!(sheet.row_count(), 2);
        assert_eq!(sheet.row(0).len(), 3);
        assert_eq!(sheet.get(1, 2), Some(&CellValue::Int(6)));
    }

    #[test]
    fn test_ragged_reads_are_null() {
        let sheet = ragged();

        assert_eq!(sheet.row(0).len(), 3);
        assert_eq!(sheet.row(1).len(), 1);
        assert_eq!(sheet.cell(1, 2), &CellValue::Null);
        assert_eq!(sheet.cell(2, 0), &CellValue::Null);
        assert_eq!(sheet.cell(99, 99), &CellValue::Null);
        assert_eq!(sheet.get(1, 2), None);
    }

    #[test]
    fn test_row_slice_clips() {
        let sheet = ragged();

        assert_eq!(sheet.row_slice(0, 1, 10), &[CellValue::Int(1), CellValue::Int(2)]);
        assert!(sheet.row_slice(1, 1, 10).is_empty());
        assert!(sheet.row_slice(7, 0, 3).is_empty());
        assert!(sheet.row(7).is_empty());
    }
}
