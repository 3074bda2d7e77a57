//! Sum and average a named column across one or more comma-delimited files.
//!
//! The pipeline is `tokenize` → `column::locate_column` → `column::sum_column`,
//! driven per file by `process` and rendered by `report`.

pub mod column;
pub mod config;
pub mod process;
pub mod report;
pub mod tokenize;

pub use column::{extract_number, locate_column, sum_column, ColumnTotals, FormatError};
pub use config::Config;
pub use process::{sum_file, sum_files, sum_text, RunSummary};
pub use tokenize::{tokenize, Record};
