use thiserror::Error;

/// The cleaned text of a cell did not form a number.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("cannot read a number from {cell:?} (cleaned to {cleaned:?})")]
pub struct FormatError {
    pub cell: String,
    pub cleaned: String,
}

/// Salvage a number from a dirty cell such as `"$1,234.56"` or `"-12.3abc"`.
///
/// `decimal_symbol` becomes `.`, digits pass through, a `-` survives only as
/// the first character kept, and everything else is dropped. The result is
/// parsed with a fixed `.` decimal point and no grouping.
pub fn extract_number(cell: &str, decimal_symbol: char) -> Result<f64, FormatError> {
    let mut cleaned = String::with_capacity(cell.len());
    for c in cell.chars() {
        if c == decimal_symbol {
            cleaned.push('.');
        } else if c.is_ascii_digit() {
            cleaned.push(c);
        } else if c == '-' && cleaned.is_empty() {
            cleaned.push(c);
        }
    }

    cleaned.parse::<f64>().map_err(|_| FormatError {
        cell: cell.to_string(),
        cleaned,
    })
}
