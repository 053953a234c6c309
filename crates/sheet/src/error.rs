use thiserror::Error;

/// Errors that can occur while loading or writing grids
#[derive(Error, Debug)]
pub enum SheetError {
    #[error("Sheet not found: {name}")]
    SheetNotFound { name: String },

    #[error("Sheet already exists: {name}")]
    SheetAlreadyExists { name: String },

    #[error("Unsupported file format: '{extension}'. Supported: csv, tsv, xlsx, xlsm, xls, xlsb, ods")]
    UnsupportedFormat { extension: String },

    #[error("Invalid file name: {0}")]
    InvalidFileName(String),

    #[error("Workbook error: {0}")]
    Workbook(String),

    #[error("Write error: {0}")]
    Write(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<calamine::Error> for SheetError {
    fn from(err: calamine::Error) -> Self {
        SheetError::Workbook(err.to_string())
    }
}

impl From<rust_xlsxwriter::XlsxError> for SheetError {
    fn from(err: rust_xlsxwriter::XlsxError) -> Self {
        SheetError::Write(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, SheetError>;
