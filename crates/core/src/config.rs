//! Layout configuration.
//!
//! Production logs from one template family share a few conventions that
//! cannot be detected from the grid itself: how far below the weekday header
//! the first item row sits, which labels mark bookkeeping rows, and what a
//! grand-total row is called. They live here so a new template variant is a
//! config file rather than a code change.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default number of leading rows searched for the weekday header.
pub const DEFAULT_HEADER_SEARCH_ROWS: usize = 10;
/// Default distance from the weekday header to the first item row
/// (header, date row, column-header row, data).
pub const DEFAULT_DATA_ROW_OFFSET: usize = 2;
/// Default number of distinct weekday tokens a header row must carry.
pub const DEFAULT_MIN_DISTINCT_DAYS: usize = 2;

const DEFAULT_EXCLUDED_NAMES: &[&str] = &[
    "입력한 사람",
    "생산리스트",
    "전체 폐기율",
    "품목별 폐기 합계",
    "Entered by",
    "Production list",
    "Overall waste rate",
    "Per-item waste total",
];

const DEFAULT_TOTAL_MARKERS: &[&str] = &["합계", "Total", "total", "TOTAL"];

/// Template conventions used by the header resolver and record scanner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Leading rows searched for the weekday header
    pub header_search_rows: usize,
    /// Distinct weekday tokens required for a row to count as the header
    pub min_distinct_days: usize,
    /// Rows between the weekday header and the first item row
    pub data_row_offset: usize,
    /// Column holding item names; `None` picks the right-most label column
    /// that carries any text below the header
    pub name_column: Option<usize>,
    /// First data column; `None` uses the first labeled weekday column
    pub data_start_column: Option<usize>,
    /// Upper bound on the width of the data region
    pub max_data_columns: Option<usize>,
    /// Row names that are bookkeeping rather than menu items (exact match)
    pub excluded_names: Vec<String>,
    /// Substrings that mark a row as the grand total
    pub total_markers: Vec<String>,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            header_search_rows: DEFAULT_HEADER_SEARCH_ROWS,
            min_distinct_days: DEFAULT_MIN_DISTINCT_DAYS,
            data_row_offset: DEFAULT_DATA_ROW_OFFSET,
            name_column: None,
            data_start_column: None,
            max_data_columns: None,
            excluded_names: DEFAULT_EXCLUDED_NAMES
                .iter()
                .map(|s| (*s).to_string())
                .collect(),
            total_markers: DEFAULT_TOTAL_MARKERS
                .iter()
                .map(|s| (*s).to_string())
                .collect(),
        }
    }
}

impl LayoutConfig {
    /// Load a config from a `.yaml`, `.yml` or `.json` file.
    ///
    /// Missing fields fall back to their defaults.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_lowercase)
            .unwrap_or_default();
        let content = std::fs::read_to_string(path)?;

        let config: LayoutConfig = match ext.as_str() {
            "yaml" | "yml" => serde_yaml::from_str(&content)?,
            "json" => serde_json::from_str(&content)?,
            _ => return Err(ConfigError::UnsupportedFormat(ext)),
        };
        config.validate()?;
        Ok(config)
    }

    /// Check that the values can drive an analysis.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.header_search_rows == 0 {
            return Err(ConfigError::Invalid(
                "header_search_rows must be at least 1".to_string(),
            ));
        }
        if !(1..=7).contains(&self.min_distinct_days) {
            return Err(ConfigError::Invalid(format!(
                "min_distinct_days must be between 1 and 7, got {}",
                self.min_distinct_days
            )));
        }
        if self.max_data_columns == Some(0) {
            return Err(ConfigError::Invalid(
                "max_data_columns must be at least 1 when set".to_string(),
            ));
        }
        if self.total_markers.iter().any(String::is_empty) {
            return Err(ConfigError::Invalid(
                "total_markers must not contain empty strings".to_string(),
            ));
        }
        Ok(())
    }

    /// Render the config as YAML.
    pub fn to_yaml(&self) -> Result<String, ConfigError> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Set the header search window
    #[must_use]
    pub fn with_header_search_rows(mut self, rows: usize) -> Self {
        self.header_search_rows = rows;
        self
    }

    /// Set the header-to-data row offset
    #[must_use]
    pub fn with_data_row_offset(mut self, offset: usize) -> Self {
        self.data_row_offset = offset;
        self
    }

    /// Pin the name column
    #[must_use]
    pub fn with_name_column(mut self, column: usize) -> Self {
        self.name_column = Some(column);
        self
    }

    /// Pin the first data column
    #[must_use]
    pub fn with_data_start_column(mut self, column: usize) -> Self {
        self.data_start_column = Some(column);
        self
    }

    /// Cap the data region width
    #[must_use]
    pub fn with_max_data_columns(mut self, columns: usize) -> Self {
        self.max_data_columns = Some(columns);
        self
    }

    /// Replace the excluded row names
    #[must_use]
    pub fn with_excluded_names<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.excluded_names = names.into_iter().map(Into::into).collect();
        self
    }

    /// Replace the total markers
    #[must_use]
    pub fn with_total_markers<I, S>(mut self, markers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.total_markers = markers.into_iter().map(Into::into).collect();
        self
    }

    /// Whether a trimmed row name is a bookkeeping label
    #[must_use]
    pub fn is_excluded(&self, name: &str) -> bool {
        self.excluded_names.iter().any(|n| n == name)
    }

    /// Whether a row name marks the grand total
    #[must_use]
    pub fn is_total(&self, name: &str) -> bool {
        self.total_markers.iter().any(|m| name.contains(m.as_str()))
    }
}
