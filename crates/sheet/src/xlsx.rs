use crate::book::Book;
use crate::cell::CellValue;
use crate::error::{Result, SheetError};
use crate::sheet::Sheet;
use calamine::{open_workbook_auto, open_workbook_auto_from_rs, Data, Range, Reader, Sheets};
use rust_xlsxwriter::{Format, Workbook, Worksheet};
use std::io::{Cursor, Read, Seek};
use std::path::Path;

/// Convert calamine Data to CellValue
fn data_to_cell_value(data: &Data) -> CellValue {
    match data {
        Data::Empty => CellValue::Null,
        Data::Bool(b) => CellValue::Bool(*b),
        Data::Int(i) => CellValue::Int(*i),
        Data::Float(f) => CellValue::Float(*f),
        Data::String(s) => CellValue::String(s.clone()),
        // Excel stores dates as days since 1899-12-30
        Data::DateTime(dt) => CellValue::Float(dt.as_f64()),
        Data::DateTimeIso(s) | Data::DurationIso(s) => CellValue::String(s.clone()),
        Data::Error(e) => CellValue::String(format!("#ERROR: {e:?}")),
    }
}

/// Convert a worksheet range into absolute grid rows.
///
/// calamine ranges start at the first used cell, so leading empty rows and
/// columns are padded back in to keep row/column indices identical to the
/// ones a spreadsheet user sees.
fn range_to_rows(range: &Range<Data>) -> Vec<Vec<CellValue>> {
    let Some((start_row, start_col)) = range.start() else {
        return Vec::new();
    };

    let mut data: Vec<Vec<CellValue>> = vec![Vec::new(); start_row as usize];
    for row in range.rows() {
        let mut cells = vec![CellValue::Null; start_col as usize];
        cells.extend(row.iter().map(data_to_cell_value));
        data.push(cells);
    }
    data
}

fn read_all_sheets<RS: Read + Seek>(workbook: &mut Sheets<RS>) -> Result<Book> {
    let sheet_names = workbook.sheet_names();
    let mut book = Book::new();

    for sheet_name in sheet_names {
        let range = match workbook.worksheet_range(&sheet_name) {
            Ok(range) => range,
            Err(e) => {
                tracing::warn!("Skipping unreadable sheet '{}': {}", sheet_name, e);
                continue;
            }
        };
        let sheet = Sheet::from_rows(&sheet_name, range_to_rows(&range));
        book.add_sheet(&sheet_name, sheet)?;
    }

    Ok(book)
}

impl Sheet {
    /// Save the sheet to an Excel file, with the first row in bold
    ///
    /// # Errors
    ///
    /// Returns error if file cannot be created or written.
    pub fn save_as_xlsx<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();

        self.write_to_worksheet(worksheet)?;

        workbook.save(path.as_ref())?;
        Ok(())
    }

    /// Write sheet data to a worksheet
    fn write_to_worksheet(&self, worksheet: &mut Worksheet) -> Result<()> {
        worksheet.set_name(self.name())?;
        let header_format = Format::new().set_bold();

        for (row_idx, row) in self.data().iter().enumerate() {
            let row_num = u32::try_from(row_idx)
                .map_err(|_| SheetError::Write("Row index overflow".to_string()))?;

            for (col_idx, cell) in row.iter().enumerate() {
                let col_num = u16::try_from(col_idx)
                    .map_err(|_| SheetError::Write("Column index overflow".to_string()))?;

                match cell {
                    CellValue::Null => {}
                    CellValue::Bool(b) => {
                        worksheet.write_boolean(row_num, col_num, *b)?;
                    }
                    CellValue::Int(i) => {
                        // Excel stores all numbers as f64
                        worksheet.write_number(row_num, col_num, *i as f64)?;
                    }
                    CellValue::Float(f) => {
                        worksheet.write_number(row_num, col_num, *f)?;
                    }
                    CellValue::String(s) if row_idx == 0 => {
                        worksheet.write_string_with_format(row_num, col_num, s, &header_format)?;
                    }
                    CellValue::String(s) => {
                        worksheet.write_string(row_num, col_num, s)?;
                    }
                }
            }
        }

        Ok(())
    }
}

impl Book {
    /// Load every sheet of an in-memory spreadsheet file
    ///
    /// # Errors
    ///
    /// Returns error if the bytes are not a readable workbook.
    pub fn from_workbook_bytes(bytes: &[u8]) -> Result<Self> {
        let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes))?;
        read_all_sheets(&mut workbook)
    }

    /// Get sheet names from a spreadsheet file without loading data
    ///
    /// # Errors
    ///
    /// Returns error if file cannot be opened.
    pub fn workbook_sheet_names<P: AsRef<Path>>(path: P) -> Result<Vec<String>> {
        let workbook = open_workbook_auto(path.as_ref())?;
        Ok(workbook.sheet_names())
    }

    /// Save the book to an Excel file, one worksheet per sheet
    ///
    /// # Errors
    ///
    /// Returns error if file cannot be created or written.
    pub fn save_as_xlsx<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let mut workbook = Workbook::new();

        for (_, sheet) in self.sheets() {
            let worksheet = workbook.add_worksheet();
            sheet.write_to_worksheet(worksheet)?;
        }

        workbook.save(path.as_ref())?;
        Ok(())
    }
}
