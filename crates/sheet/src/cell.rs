use serde::{Deserialize, Serialize};
use std::fmt;

/// Represents a single untyped cell value in a grid
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
}

impl CellValue {
    /// Check if the value is null or text made only of whitespace.
    ///
    /// Merged spreadsheet cells surface as either of these depending on
    /// the source format, so both count as "empty" for layout purposes.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        match self {
            CellValue::Null => true,
            CellValue::String(s) => s.trim().is_empty(),
            _ => false,
        }
    }

    /// Try to get the value as a finite float.
    ///
    /// Text is trimmed before parsing. `NaN` and infinities are rejected so
    /// that strings such as `"nan"` never leak into sums.
    #[must_use]
    pub fn as_float(&self) -> Option<f64> {
        let value = match self {
            CellValue::Float(f) => *f,
            CellValue::Int(i) => *i as f64,
            CellValue::Bool(b) => {
                if *b {
                    1.0
                } else {
                    0.0
                }
            }
            CellValue::String(s) => s.trim().parse().ok()?,
            CellValue::Null => return None,
        };
        value.is_finite().then_some(value)
    }

    /// Get the value as a string
    #[must_use]
    pub fn as_str(&self) -> String {
        match self {
            CellValue::Null => String::new(),
            CellValue::Bool(b) => b.to_string(),
            CellValue::Int(i) => i.to_string(),
            CellValue::Float(f) => f.to_string(),
            CellValue::String(s) => s.clone(),
        }
    }

    /// Borrow the text content, if this is a string cell
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            CellValue::String(s) => Some(s.as_str()),
            _ => None,
        }
    }

    /// Parse a string into a `CellValue` with type inference
    /// Tries: null -> bool -> int -> float -> string
    #[must_use]
    pub fn parse(s: &str) -> CellValue {
        let trimmed = s.trim();

        if trimmed.is_empty() {
            return CellValue::Null;
        }

        // "1"/"0" are parsed as Int, not Bool
        match trimmed.to_lowercase().as_str() {
            "true" => return CellValue::Bool(true),
            "false" => return CellValue::Bool(false),
            _ => {}
        }

        if let Ok(i) = trimmed.parse::<i64>() {
            return CellValue::Int(i);
        }

        if let Ok(f) = trimmed.parse::<f64>() {
            if f.is_finite() {
                return CellValue::Float(f);
            }
        }

        CellValue::String(s.to_string())
    }
}

impl Default for CellValue {
    fn default() -> Self {
        CellValue::Null
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Null => write!(f, ""),
            CellValue::Bool(b) => write!(f, "{b}"),
            CellValue::Int(i) => write!(f, "{i}"),
            CellValue::Float(fl) => write!(f, "{fl}"),
            CellValue::String(s) => write!(f, "{s}"),
        }
    }
}

impl From<bool> for CellValue {
    fn from(b: bool) -> Self {
        CellValue::Bool(b)
    }
}

impl From<i64> for CellValue {
    fn from(i: i64) -> Self {
        CellValue::Int(i)
    }
}

impl From<i32> for CellValue {
    fn from(i: i32) -> Self {
        CellValue::Int(i64::from(i))
    }
}

impl From<f64> for CellValue {
    fn from(f: f64) -> Self {
        CellValue::Float(f)
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        CellValue::String(s)
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        if s.is_empty() {
            CellValue::Null
        } else {
            CellValue::String(s.to_string())
        }
    }
}

impl<T: Into<CellValue>> From<Option<T>> for CellValue {
    fn from(opt: Option<T>) -> Self {
        match opt {
            Some(v) => v.into(),
            None => CellValue::Null,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_null() {
        assert_eq!(CellValue::parse(""), CellValue::Null);
        assert_eq!(CellValue::parse("  "), CellValue::Null);
    }

    #[test]
    fn test_parse_numbers() {
        assert_eq!(CellValue::parse("42"), CellValue::Int(42));
        assert_eq!(CellValue::parse(" -12 "), CellValue::Int(-12));
        assert_eq!(CellValue::parse("2.5"), CellValue::Float(2.5));
    }

    #[test]
    fn test_parse_keeps_weekday_text() {
        assert_eq!(CellValue::parse("월"), CellValue::String("월".to_string()));
        assert_eq!(CellValue::parse("Mon"), CellValue::String("Mon".to_string()));
    }

    #[test]
    fn test_parse_rejects_non_finite() {
        assert_eq!(CellValue::parse("nan"), CellValue::String("nan".to_string()));
        assert_eq!(CellValue::parse("inf"), CellValue::String("inf".to_string()));
    }

    #[test]
    fn test_as_float() {
        assert_eq!(CellValue::Int(42).as_float(), Some(42.0));
        assert_eq!(CellValue::String(" 7 ".to_string()).as_float(), Some(7.0));
        assert_eq!(CellValue::String("sold out".to_string()).as_float(), None);
        assert_eq!(CellValue::String("NaN".to_string()).as_float(), None);
        assert_eq!(CellValue::Float(f64::INFINITY).as_float(), None);
        assert_eq!(CellValue::Null.as_float(), None);
    }

    #[test]
    fn test_is_blank() {
        assert!(CellValue::Null.is_blank());
        assert!(CellValue::String("   ".to_string()).is_blank());
        assert!(!CellValue::Int(0).is_blank());
        assert!(!CellValue::String("화".to_string()).is_blank());
    }

    #[test]
    fn test_empty_str_is_null() {
        assert_eq!(CellValue::from(""), CellValue::Null);
        assert_eq!(CellValue::from("Tue"), CellValue::String("Tue".to_string()));
    }
}
