//! Raw cell grids for ovenlog
//!
//! Turns production-log files into untyped 2D grids, one [`Sheet`] per
//! logical sheet, collected in a [`Book`]. Delimited text (CSV/TSV) yields a
//! single sheet; spreadsheet containers (xlsx, xlsm, xls, xlsb, ods) yield one
//! sheet per worksheet.
//!
//! Grids keep the shape of the source. Rows may differ in length and any read
//! outside a row returns an empty cell.
//!
//! # Examples
//!
//! ```
//! use ovenlog_sheet::{Book, CellValue};
//!
//! let book = Book::from_bytes("week.csv", b",,Mon,,Tue,\nBagel,,10,2,8,1").unwrap();
//! let sheet = book.get_sheet("week").unwrap();
//!
//! assert_eq!(sheet.cell(1, 2), &CellValue::Int(10));
//! assert_eq!(sheet.cell(5, 5), &CellValue::Null);
//! ```
//!
//! ## Loading from disk
//!
//! ```no_run
//! use ovenlog_sheet::Book;
//!
//! let book = Book::from_path("production.xlsx").unwrap();
//! for (name, sheet) in book.sheets() {
//!     println!("{name}: {} rows", sheet.row_count());
//! }
//! ```

mod book;
mod cell;
mod csv;
mod error;
mod sheet;
mod xlsx;

/// Re-export book types.
pub use book::{Book, SourceFormat};
/// Re-export cell value type.
pub use cell::CellValue;
/// Re-export CSV options.
pub use csv::CsvOptions;
/// Re-export sheet error types.
pub use error::{Result, SheetError};
/// Re-export sheet type.
pub use sheet::Sheet;
