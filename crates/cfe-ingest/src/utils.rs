//! Shared cell-parsing utilities.
//!
//! Every consumer of raw cells goes through [`parse_cell`], which keeps
//! "absent", "NaN" and "not a number" apart instead of coercing them.

// =============================================================================
// Cell Parsing
// =============================================================================

/// Outcome of parsing one raw cell as a number.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CellValue {
    /// A finite floating point number.
    Number(f64),
    /// The literal `NaN` token (any case). Present but undefined.
    NaNToken,
    /// Empty after trimming. Absent.
    Missing,
    /// Non-empty text that is not a finite number (`inf` included).
    Malformed,
}

impl CellValue {
    /// Plot value of a cell in a numeric column.
    ///
    /// `Malformed` maps to `None`, but a column containing one is never
    /// classified as numeric, so this only happens for foreign callers.
    pub fn as_plot_value(self) -> Option<f64> {
        match self {
            CellValue::Number(n) => Some(n),
            CellValue::NaNToken => Some(f64::NAN),
            CellValue::Missing | CellValue::Malformed => None,
        }
    }

    pub fn is_missing(self) -> bool {
        matches!(self, CellValue::Missing)
    }
}

/// Check if a string is the NaN token (case-insensitive).
pub fn is_nan_token(s: &str) -> bool {
    s.trim().eq_ignore_ascii_case("nan")
}

/// Parse a raw cell into one of the four [`CellValue`] outcomes.
///
/// # Example
///
/// ```rust,ignore
/// use cfe_ingest::utils::{parse_cell, CellValue};
///
/// assert_eq!(parse_cell(" 3.4 "), CellValue::Number(3.4));
/// assert_eq!(parse_cell("nan"), CellValue::NaNToken);
/// assert_eq!(parse_cell(""), CellValue::Missing);
/// assert_eq!(parse_cell("3.4um"), CellValue::Malformed);
/// ```
pub fn parse_cell(s: &str) -> CellValue {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return CellValue::Missing;
    }
    if is_nan_token(trimmed) {
        return CellValue::NaNToken;
    }
    match trimmed.parse::<f64>() {
        Ok(n) if n.is_finite() => CellValue::Number(n),
        _ => CellValue::Malformed,
    }
}

/// Check if a cell parses as a number or the NaN token.
pub fn is_numeric_cell(s: &str) -> bool {
    matches!(parse_cell(s), CellValue::Number(_) | CellValue::NaNToken)
}

/// Truncate a string for tabular display, appending "..." when shortened.
pub fn truncate_str(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{kept}...")
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_cell_numbers() {
        assert_eq!(parse_cell("42"), CellValue::Number(42.0));
        assert_eq!(parse_cell("  -1.5  "), CellValue::Number(-1.5));
        assert_eq!(parse_cell("2.8e3"), CellValue::Number(2800.0));
        assert_eq!(parse_cell(".5"), CellValue::Number(0.5));
    }

    #[test]
    fn test_parse_cell_nan_token_any_case() {
        assert_eq!(parse_cell("NaN"), CellValue::NaNToken);
        assert_eq!(parse_cell("nan"), CellValue::NaNToken);
        assert_eq!(parse_cell(" NAN "), CellValue::NaNToken);
    }

    #[test]
    fn test_parse_cell_missing() {
        assert_eq!(parse_cell(""), CellValue::Missing);
        assert_eq!(parse_cell("   "), CellValue::Missing);
        assert!(parse_cell("\t").is_missing());
    }

    #[test]
    fn test_parse_cell_malformed_is_not_nan() {
        assert_eq!(parse_cell("A"), CellValue::Malformed);
        assert_eq!(parse_cell("1,234"), CellValue::Malformed);
        assert_eq!(parse_cell("12px"), CellValue::Malformed);
        assert_eq!(parse_cell("N/A"), CellValue::Malformed);
    }

    #[test]
    fn test_parse_cell_infinity_is_malformed() {
        assert_eq!(parse_cell("inf"), CellValue::Malformed);
        assert_eq!(parse_cell("-Infinity"), CellValue::Malformed);
        assert_eq!(parse_cell("INF"), CellValue::Malformed);
        assert_eq!(parse_cell("1e400"), CellValue::Malformed);
    }

    #[test]
    fn test_as_plot_value() {
        assert_eq!(CellValue::Number(1.0).as_plot_value(), Some(1.0));
        assert!(CellValue::NaNToken.as_plot_value().unwrap().is_nan());
        assert_eq!(CellValue::Missing.as_plot_value(), None);
        assert_eq!(CellValue::Malformed.as_plot_value(), None);
    }

    #[test]
    fn test_is_numeric_cell() {
        assert!(is_numeric_cell("3"));
        assert!(is_numeric_cell("NaN"));
        assert!(!is_numeric_cell(""));
        assert!(!is_numeric_cell("B"));
    }

    #[test]
    fn test_truncate_str() {
        assert_eq!(truncate_str("short", 10), "short");
        assert_eq!(truncate_str("a_very_long_feature_name", 10), "a_very_...");
    }
}
