//! # ovenlog-core
//!
//! Layout resolution and weekday/weekend aggregation for bakery production
//! logs.
//!
//! Production logs are spreadsheets with a loose, hand-maintained layout: the
//! weekday header drifts by a row or two, weekday labels are merged across
//! each day's production and waste columns, and bookkeeping rows sit between
//! the menu items. This crate turns such a grid into per-item statistics.
//!
//! The pipeline, leaf first:
//! - [`header`]: find the weekday header row and label every data column
//! - [`classify`]: turn labels into weekday/weekend column masks
//! - [`scanner`]: walk candidate rows, skip noise, coerce cells to numbers
//! - [`aggregate`]: sum production, sales and waste per bucket
//! - [`result`]: collect records and set the grand-total row aside
//!
//! [`Analyzer`] runs the whole pipeline on a sheet or a book. [`AnalysisCache`]
//! memoizes results by file contents and sheet name.
//!
//! ## Example
//!
//! ```
//! use ovenlog_core::{Analyzer, LayoutConfig};
//! use ovenlog_sheet::Sheet;
//!
//! let sheet = Sheet::from_data(vec![
//!     vec!["", "", "Mon", "", "Sat", ""],
//!     vec!["", "", "", "", "", ""],
//!     vec!["", "Croissant", "10", "2", "20", "5"],
//! ]);
//!
//! let result = Analyzer::new(LayoutConfig::default()).analyze(&sheet).unwrap();
//! let croissant = result.item("Croissant").unwrap();
//! assert_eq!(croissant.weekday_sales(), 8);
//! assert_eq!(croissant.weekend_waste_rate(), 25.0);
//! ```

pub mod aggregate;
pub mod analyzer;
pub mod cache;
pub mod classify;
pub mod config;
pub mod error;
pub mod header;
pub mod result;
pub mod scanner;
pub mod weekday;

pub use aggregate::{BucketStats, ItemRecord};
pub use analyzer::{Analyzer, SheetOutcome, SheetReport};
pub use cache::{content_hash, AnalysisCache, CacheKey};
pub use classify::ColumnMasks;
pub use config::LayoutConfig;
pub use error::{AnalysisError, CacheError, ConfigError, Result};
pub use header::{ColumnDayMap, ResolvedLayout};
pub use result::AnalysisResult;
pub use scanner::{Coerced, RecordScanner, RowScan, SkipReason};
pub use weekday::DayLabel;
