use anyhow::Result;
use serde::Serialize;
use std::path::PathBuf;

use crate::process::RunSummary;

#[derive(Debug, Serialize)]
pub struct FileLine {
    pub path: PathBuf,
    pub column_found: bool,
    pub sum: f64,
    pub count: u64,
}

/// What gets printed at the end of a run.
#[derive(Debug, Serialize)]
pub struct Report {
    pub column: String,
    pub files_processed: usize,
    pub files_failed: usize,
    pub sum: f64,
    pub count: u64,
    pub rejected: u64,
    pub average: Option<f64>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub per_file: Vec<FileLine>,
}

impl Report {
    pub fn from_summary(summary: &RunSummary, per_file: bool) -> Self {
        let per_file = if per_file {
            summary
                .files
                .iter()
                .map(|f| FileLine {
                    path: f.path.clone(),
                    column_found: f.column_index.is_some(),
                    sum: f.totals.sum,
                    count: f.totals.count,
                })
                .collect()
        } else {
            Vec::new()
        };

        Self {
            column: summary.column.clone(),
            files_processed: summary.files.len(),
            files_failed: summary.failed.len(),
            sum: summary.totals.sum,
            count: summary.totals.count,
            rejected: summary.totals.rejected,
            average: summary.totals.average(),
            per_file,
        }
    }

    /// Human-readable summary. The average line only appears when something was counted.
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        for line in &self.per_file {
            let detail = if line.column_found {
                format!("sum {:.2} over {} values", line.sum, line.count)
            } else {
                "column not found".to_string()
            };
            out.push_str(&format!("{}: {}\n", line.path.display(), detail));
        }
        out.push_str(&format!("Total {}: {:.2}\n", self.column, self.sum));
        if let Some(avg) = self.average {
            out.push_str(&format!(
                "Average {}: {:.2} ({} values)\n",
                self.column, avg, self.count
            ));
        }
        if self.files_failed > 0 {
            out.push_str(&format!("{} file(s) could not be read\n", self.files_failed));
        }
        out
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
