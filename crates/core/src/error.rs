//! Error types for ovenlog.

use thiserror::Error;

/// Result type for sheet analysis.
pub type Result<T> = std::result::Result<T, AnalysisError>;

/// Reasons a single sheet's analysis can fail.
///
/// Cell-level and row-level problems never show up here: unparseable cells
/// are coerced to zero and noise rows are skipped.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AnalysisError {
    /// No row in the search window carried enough weekday labels.
    #[error("No weekday header found in the first {searched_rows} rows of sheet '{sheet}'")]
    LayoutNotFound { sheet: String, searched_rows: usize },

    /// Anything else that went wrong while analyzing one sheet.
    #[error("Unexpected error while analyzing sheet '{sheet}': {message}")]
    Unexpected { sheet: String, message: String },
}

impl AnalysisError {
    /// Create an unexpected-condition error.
    pub fn unexpected(sheet: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Unexpected {
            sheet: sheet.into(),
            message: message.into(),
        }
    }

    /// Name of the sheet the error belongs to.
    #[must_use]
    pub fn sheet(&self) -> &str {
        match self {
            Self::LayoutNotFound { sheet, .. } | Self::Unexpected { sheet, .. } => sheet,
        }
    }
}

/// Errors raised while loading or validating a layout configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parse error.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// JSON parse error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The file extension is not a known config format.
    #[error("Unsupported config format '{0}'. Use .yaml, .yml or .json")]
    UnsupportedFormat(String),

    /// A field holds a value the engine cannot work with.
    #[error("Invalid layout config: {0}")]
    Invalid(String),
}

/// Errors raised while persisting or restoring the analysis cache.
#[derive(Debug, Error)]
pub enum CacheError {
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
