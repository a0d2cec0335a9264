use crate::data::{CellValue, Dataset};

/// Parse a cell as a finite number. Text is trimmed and must parse in full;
/// nulls, blanks, NaN and infinities do not count as numbers.
pub fn try_coerce(value: &CellValue) -> Option<f64> {
    match value {
        CellValue::Null => None,
        CellValue::Number(n) => Some(*n).filter(|n| n.is_finite()),
        CellValue::Text(s) => s.trim().parse::<f64>().ok().filter(|n| n.is_finite()),
    }
}

/// Numeric value of a cell, or 0 when it is not a finite number.
pub fn coerce(value: &CellValue) -> f64 {
    try_coerce(value).unwrap_or(0.0)
}

/// Coerce a whole column in row order.
pub fn column_values(data: &Dataset, column: &str) -> Vec<f64> {
    data.column_values(column).map(coerce).collect()
}

/// Number of non-null cells in `column` that would fall back to zero.
pub fn non_numeric_count(data: &Dataset, column: &str) -> usize {
    data.column_values(column)
        .filter(|v| !v.is_null() && try_coerce(v).is_none())
        .count()
}
