use crate::csv::CsvOptions;
use crate::error::{Result, SheetError};
use crate::sheet::Sheet;
use indexmap::IndexMap;
use std::path::Path;

/// Source encodings a book can be loaded from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    /// Delimited text with a single implicit sheet
    Delimited { delimiter: u8 },
    /// Multi-sheet spreadsheet container read through calamine
    Workbook,
}

impl SourceFormat {
    /// Detect the format from a file name's extension
    pub fn from_file_name(file_name: &str) -> Result<Self> {
        let ext = Path::new(file_name)
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_lowercase)
            .unwrap_or_default();

        match ext.as_str() {
            "csv" => Ok(SourceFormat::Delimited { delimiter: b',' }),
            "tsv" => Ok(SourceFormat::Delimited { delimiter: b'\t' }),
            "xlsx" | "xlsm" | "xls" | "xlsb" | "ods" => Ok(SourceFormat::Workbook),
            _ => Err(SheetError::UnsupportedFormat { extension: ext }),
        }
    }
}

/// A book containing multiple sheets (preserves insertion order)
#[derive(Debug, Clone, Default)]
pub struct Book {
    name: String,
    sheets: IndexMap<String, Sheet>,
}

impl Book {
    /// Create a new empty book
    #[must_use]
    pub fn new() -> Self {
        Self::with_name("Book1")
    }

    /// Create a new empty book with a name
    #[must_use]
    pub fn with_name(name: &str) -> Self {
        Book {
            name: name.to_string(),
            sheets: IndexMap::new(),
        }
    }

    /// Get the book name
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Set the book name
    pub fn set_name(&mut self, name: &str) {
        self.name = name.to_string();
    }

    /// Get the number of sheets
    #[must_use]
    pub fn sheet_count(&self) -> usize {
        self.sheets.len()
    }

    /// Get all sheet names in order
    #[must_use]
    pub fn sheet_names(&self) -> Vec<&str> {
        self.sheets.keys().map(String::as_str).collect()
    }

    /// Check if a sheet exists
    #[must_use]
    pub fn has_sheet(&self, name: &str) -> bool {
        self.sheets.contains_key(name)
    }

    /// Get a sheet by name
    pub fn get_sheet(&self, name: &str) -> Result<&Sheet> {
        self.sheets
            .get(name)
            .ok_or_else(|| SheetError::SheetNotFound {
                name: name.to_string(),
            })
    }

    /// Add a sheet to the book
    pub fn add_sheet(&mut self, name: &str, sheet: Sheet) -> Result<()> {
        if self.sheets.contains_key(name) {
            return Err(SheetError::SheetAlreadyExists {
                name: name.to_string(),
            });
        }

        let mut sheet = sheet;
        sheet.set_name(name);
        self.sheets.insert(name.to_string(), sheet);
        Ok(())
    }

    /// Iterate over `(name, sheet)` pairs in order
    pub fn sheets(&self) -> impl Iterator<Item = (&str, &Sheet)> {
        self.sheets.iter().map(|(k, v)| (k.as_str(), v))
    }

    // ===== Loading =====

    /// Load a book from a file, picking the reader from the extension.
    ///
    /// Delimited text becomes a single sheet named after the file stem.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file_name = file_name_of(path)?;
        let bytes = std::fs::read(path)?;
        Self::from_bytes(&file_name, &bytes)
    }

    /// Load a book from in-memory file content.
    ///
    /// `file_name` is only used for format detection and sheet naming.
    pub fn from_bytes(file_name: &str, bytes: &[u8]) -> Result<Self> {
        let stem = Path::new(file_name)
            .file_stem()
            .and_then(|s| s.to_str())
            .ok_or_else(|| SheetError::InvalidFileName(file_name.to_string()))?
            .to_string();

        let mut book = match SourceFormat::from_file_name(file_name)? {
            SourceFormat::Delimited { delimiter } => {
                let options = CsvOptions::default().with_delimiter(delimiter);
                let sheet = Sheet::from_csv_reader(&stem, bytes, &options)?;
                let mut book = Book::new();
                book.add_sheet(&stem, sheet)?;
                book
            }
            SourceFormat::Workbook => Book::from_workbook_bytes(bytes)?,
        };

        book.set_name(&stem);
        tracing::debug!(
            "Loaded '{}' with {} sheet(s): {:?}",
            file_name,
            book.sheet_count(),
            book.sheet_names()
        );
        Ok(book)
    }
}

fn file_name_of(path: &Path) -> Result<String> {
    path.file_name()
        .and_then(|s| s.to_str())
        .map(str::to_string)
        .ok_or_else(|| SheetError::InvalidFileName(path.display().to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell::CellValue;

    #[test]
    fn test_add_and_get_sheet() {
        let mut book = Book::new();
        book.add_sheet("Mon-Sun", Sheet::new()).unwrap();

        assert_eq!(book.sheet_count(), 1);
        assert!(book.has_sheet("Mon-Sun"));
        assert_eq!(book.get_sheet("Mon-Sun").unwrap().name(), "Mon-Sun");
    }

    #[test]
    fn test_duplicate_sheet_rejected() {
        let mut book = Book::new();
        book.add_sheet("A", Sheet::new()).unwrap();

        let result = book.add_sheet("A", Sheet::new());
        assert!(matches!(result, Err(SheetError::SheetAlreadyExists { .. })));
    }

    #[test]
    fn test_sheet_order_preserved() {
        let mut book = Book::new();
        book.add_sheet("b", Sheet::new()).unwrap();
        book.add_sheet("a", Sheet::new()).unwrap();

        assert_eq!(book.sheet_names(), vec!["b", "a"]);
    }

    #[test]
    fn test_format_detection() {
        assert_eq!(
            SourceFormat::from_file_name("log.CSV").unwrap(),
            SourceFormat::Delimited { delimiter: b',' }
        );
        assert_eq!(
            SourceFormat::from_file_name("log.tsv").unwrap(),
            SourceFormat::Delimited { delimiter: b'\t' }
        );
        assert_eq!(
            SourceFormat::from_file_name("log.xlsx").unwrap(),
            SourceFormat::Workbook
        );
        assert!(matches!(
            SourceFormat::from_file_name("log.pdf"),
            Err(SheetError::UnsupportedFormat { .. })
        ));
    }

    #[test]
    fn test_from_bytes_csv_uses_file_stem() {
        let book = Book::from_bytes("production_week1.csv", b",,Mon,,Tue,\n").unwrap();

        assert_eq!(book.name(), "production_week1");
        assert_eq!(book.sheet_names(), vec!["production_week1"]);
        let sheet = book.get_sheet("production_week1").unwrap();
        assert_eq!(sheet.cell(0, 2), &CellValue::String("Mon".to_string()));
    }
}
