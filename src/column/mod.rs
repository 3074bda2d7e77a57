// src/column/mod.rs
use serde::Serialize;
use tracing::{info, trace};

use crate::tokenize::{data_rows, header, Record};

pub mod number;

pub use number::{extract_number, FormatError};

/// Running sum over one column.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct ColumnTotals {
    pub sum: f64,
    /// Cells that yielded a number.
    pub count: u64,
    /// Cells that were present but unreadable. Never part of `count`.
    pub rejected: u64,
}

impl ColumnTotals {
    pub const ZERO: Self = ColumnTotals {
        sum: 0.0,
        count: 0,
        rejected: 0,
    };

    /// Add another total into `self`, counts saturating on overflow.
    pub fn add(&mut self, other: ColumnTotals) {
        self.sum += other.sum;
        self.count = self.count.saturating_add(other.count);
        self.rejected = self.rejected.saturating_add(other.rejected);
    }

    pub fn average(&self) -> Option<f64> {
        (self.count > 0).then(|| self.sum / self.count as f64)
    }
}

/// Index of the first header field containing `identifier`.
pub fn locate_column(identifier: &str, records: &[Record]) -> Option<usize> {
    header(records)?
        .iter()
        .position(|field| field.contains(identifier))
}

/// Sum column `index` over every data row.
///
/// Column 0 and a missing column both contribute nothing. Rows too short to
/// reach the column are skipped; unreadable cells are logged and counted in
/// `rejected` only.
pub fn sum_column(index: Option<usize>, records: &[Record], decimal_symbol: char) -> ColumnTotals {
    let index = match index {
        Some(i) if i > 0 => i,
        _ => return ColumnTotals::ZERO,
    };

    let mut totals = ColumnTotals::ZERO;
    for (row, record) in data_rows(records).iter().enumerate() {
        let Some(cell) = record.get(index) else {
            trace!(row = row + 1, fields = record.len(), "row too short, skipped");
            continue;
        };
        match extract_number(cell, decimal_symbol) {
            Ok(value) => {
                totals.sum += value;
                totals.count += 1;
            }
            Err(e) => {
                info!(row = row + 1, "skipping cell: {}", e);
                totals.rejected += 1;
            }
        }
    }
    totals
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokenize::tokenize;

    #[test]
    fn lookup_is_substring_containment() {
        let records = tokenize("Name,\"Total Cost, Initial (USD)\"\n");
        assert_eq!(locate_column("Cost, Initial", &records), Some(1));
    }

    #[test]
    fn lookup_takes_first_match() {
        let records = tokenize("id,price a,price b\n");
        assert_eq!(locate_column("price", &records), Some(1));
    }

    #[test]
    fn lookup_misses() {
        let records = tokenize("a,b\n1,2\n");
        assert_eq!(locate_column("zzz", &records), None);
        assert_eq!(locate_column("a", &[]), None);
    }

    #[test]
    fn unquoted_header_comma_splits_the_name() {
        let records = tokenize("Name,Cost, Initial\nA,10.00\nC,20.5\n");
        assert_eq!(records[0], vec!["Name", "Cost", " Initial"]);
        assert_eq!(locate_column("Cost, Initial", &records), None);
        assert_eq!(
            sum_column(locate_column("Cost, Initial", &records), &records, '.'),
            ColumnTotals::ZERO
        );
    }

    #[test]
    fn header_row_is_not_summed() {
        let records = tokenize("x,5\ny,7\n");
        let totals = sum_column(Some(1), &records, '.');
        assert_eq!(totals.count, 1);
        assert_eq!(totals.sum, 7.0);
    }

    #[test]
    fn first_column_is_never_summed() {
        let records = tokenize("Cost\n1\n2\n");
        let index = locate_column("Cost", &records);
        assert_eq!(index, Some(0));
        assert_eq!(sum_column(index, &records, '.'), ColumnTotals::ZERO);
    }

    #[test]
    fn missing_column_sums_nothing() {
        let records = tokenize("a,b\n1,2\n");
        assert_eq!(sum_column(None, &records, '.'), ColumnTotals::ZERO);
    }

    #[test]
    fn malformed_and_short_rows() {
        let records = tokenize("Name,\"Cost, Initial\"\nA,10.00\nB,bad\nC,20.5\nD\n");
        let totals = sum_column(locate_column("Cost, Initial", &records), &records, '.');
        assert!((totals.sum - 30.5).abs() < 1e-9);
        assert_eq!(totals.count, 2);
        // "bad" is rejected, the short "D" row is not
        assert_eq!(totals.rejected, 1);
    }

    #[test]
    fn totals_combine() {
        let mut total = ColumnTotals {
            sum: 10.0,
            count: 2,
            rejected: 0,
        };
        total.add(ColumnTotals {
            sum: 5.0,
            count: 1,
            rejected: 3,
        });
        assert_eq!(total.sum, 15.0);
        assert_eq!(total.count, 3);
        assert_eq!(total.rejected, 3);
        assert_eq!(total.average(), Some(5.0));
        assert_eq!(ColumnTotals::ZERO.average(), None);
    }
}
