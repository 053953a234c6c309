//! Engine entry points.

use crate::aggregate::ItemRecord;
use crate::classify::ColumnMasks;
use crate::config::LayoutConfig;
use crate::error::{AnalysisError, Result};
use crate::header::resolve;
use crate::result::{AnalysisResult, ResultAssembler};
use crate::scanner::RecordScanner;
use ovenlog_sheet::{Book, Sheet};
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

/// Runs the layout resolution and aggregation pipeline over sheets.
///
/// Holds only immutable configuration, so one analyzer can serve any number
/// of sheets, including from several threads at once.
#[derive(Debug, Clone, Default)]
pub struct Analyzer {
    config: LayoutConfig,
}

impl Analyzer {
    #[must_use]
    pub fn new(config: LayoutConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    /// Analyze one sheet.
    ///
    /// A panic raised while processing the sheet is caught and returned as
    /// [`AnalysisError::Unexpected`]. The process panic hook still runs
    /// first, so with the default hook the panic message is also printed to
    /// stderr. Callers that need quiet output install their own hook.
    pub fn analyze(&self, sheet: &Sheet) -> Result<AnalysisResult> {
        panic::catch_unwind(AssertUnwindSafe(|| self.run(sheet))).unwrap_or_else(|payload| {
            Err(AnalysisError::unexpected(
                sheet.name(),
                panic_message(payload.as_ref()),
            ))
        })
    }

    /// Analyze every sheet of a book independently, in book order.
    #[must_use]
    pub fn analyze_book(&self, book: &Book) -> Vec<SheetReport> {
        book.sheets()
            .map(|(_, sheet)| SheetReport {
                sheet: sheet.name().to_string(),
                result: self.analyze(sheet),
            })
            .collect()
    }

    fn run(&self, sheet: &Sheet) -> Result<AnalysisResult> {
        let layout = resolve(sheet, &self.config)?;
        let masks = ColumnMasks::from_day_map(&layout.day_map);

        let mut assembler = ResultAssembler::new(sheet.name(), layout.header_row);
        assembler.extend(
            RecordScanner::new(sheet, &layout, &self.config)
                .accepted()
                .map(|row| {
                    let series = row.paired(&masks);
                    let is_total = self.config.is_total(&row.name);
                    ItemRecord::from_series(&row.name, row.row, &series, is_total)
                }),
        );

        let result = assembler.finish();
        tracing::debug!(
            "Sheet '{}': {} items, total row {}",
            result.sheet,
            result.len(),
            if result.total.is_some() { "present" } else { "absent" }
        );
        Ok(result)
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "panic while analyzing sheet".to_string()
    }
}

/// What happened to one sheet, as shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SheetOutcome {
    /// No weekday header in the search window
    LayoutNotFound,
    /// Header found but no row qualified as a menu item
    NoItems,
    /// This many menu items were extracted
    Items(usize),
    /// Unexpected failure
    Failed,
}

/// Per-sheet result of [`Analyzer::analyze_book`].
#[derive(Debug, Clone, PartialEq)]
pub struct SheetReport {
    pub sheet: String,
    pub result: Result<AnalysisResult>,
}

impl SheetReport {
    #[must_use]
    pub fn outcome(&self) -> SheetOutcome {
        match &self.result {
            Ok(result) if result.is_empty() => SheetOutcome::NoItems,
            Ok(result) => SheetOutcome::Items(result.len()),
            Err(AnalysisError::LayoutNotFound { .. }) => SheetOutcome::LayoutNotFound,
            Err(AnalysisError::Unexpected { .. }) => SheetOutcome::Failed,
        }
    }
}
