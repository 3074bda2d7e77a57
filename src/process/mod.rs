// src/process/mod.rs
use anyhow::{Context, Result};
use rayon::prelude::*;
use serde::Serialize;
use std::{
    fs,
    path::{Path, PathBuf},
    time::Instant,
};
use tracing::{debug, error, info, instrument, warn};

use crate::{
    column::{locate_column, sum_column, ColumnTotals},
    config::Config,
    tokenize::tokenize,
};

pub mod inputs;

pub use inputs::expand_inputs;

/// Result for one file that could be read.
#[derive(Debug, Clone, Serialize)]
pub struct FileOutcome {
    pub path: PathBuf,
    /// Header position of the column, `None` when no header field matched.
    pub column_index: Option<usize>,
    pub totals: ColumnTotals,
}

/// A file that was skipped because it could not be read.
#[derive(Debug, Clone, Serialize)]
pub struct FailedFile {
    pub path: PathBuf,
    pub reason: String,
}

/// Everything a run produced, in input order.
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub column: String,
    pub files: Vec<FileOutcome>,
    pub failed: Vec<FailedFile>,
    pub totals: ColumnTotals,
}

/// Tokenize `text` and sum the configured column.
pub fn sum_text(text: &str, config: &Config) -> ColumnTotals {
    let records = tokenize(text);
    let index = locate_column(&config.column, &records);
    sum_column(index, &records, config.decimal_symbol)
}

/// Read one file and sum its column.
#[instrument(level = "debug", skip(path, config), fields(path = %path.as_ref().display()))]
pub fn sum_file<P: AsRef<Path>>(path: P, config: &Config) -> Result<ColumnTotals> {
    read_and_sum(path.as_ref(), config).map(|outcome| outcome.totals)
}

fn read_and_sum(path: &Path, config: &Config) -> Result<FileOutcome> {
    let bytes = fs::read(path).with_context(|| format!("reading {:?}", path))?;
    let text = String::from_utf8_lossy(&bytes);

    let records = tokenize(&text);
    let column_index = locate_column(&config.column, &records);
    match column_index {
        None => warn!(path = %path.display(), column = %config.column, "column not found"),
        Some(0) => warn!(path = %path.display(), "column is the first field, not summed"),
        Some(_) => {}
    }
    let totals = sum_column(column_index, &records, config.decimal_symbol);

    debug!(
        path = %path.display(),
        records = records.len(),
        sum = totals.sum,
        count = totals.count,
        rejected = totals.rejected,
        "file summed"
    );
    Ok(FileOutcome {
        path: path.to_path_buf(),
        column_index,
        totals,
    })
}

/// Sum the column across `paths`. Unreadable files are logged and skipped.
///
/// With `config.jobs > 1` the files are read on a dedicated rayon pool; the
/// per-file results are still combined in input order.
#[instrument(level = "info", skip_all, fields(files = paths.len(), jobs = config.jobs))]
pub fn sum_files(paths: &[PathBuf], config: &Config) -> RunSummary {
    let start = Instant::now();

    let results: Vec<Result<FileOutcome>> = if config.jobs > 1 && paths.len() > 1 {
        match rayon::ThreadPoolBuilder::new()
            .num_threads(config.jobs)
            .build()
        {
            Ok(pool) => pool.install(|| {
                paths
                    .par_iter()
                    .map(|p| read_and_sum(p, config))
                    .collect()
            }),
            Err(e) => {
                warn!("thread pool unavailable ({}), running sequentially", e);
                paths.iter().map(|p| read_and_sum(p, config)).collect()
            }
        }
    } else {
        paths.iter().map(|p| read_and_sum(p, config)).collect()
    };

    let mut summary = RunSummary {
        column: config.column.clone(),
        files: Vec::with_capacity(paths.len()),
        failed: Vec::new(),
        totals: ColumnTotals::ZERO,
    };
    for (path, result) in paths.iter().zip(results) {
        match result {
            Ok(outcome) => {
                summary.totals.add(outcome.totals);
                summary.files.push(outcome);
            }
            Err(e) => {
                error!("skipping {}: {:#}", path.display(), e);
                summary.failed.push(FailedFile {
                    path: path.clone(),
                    reason: format!("{:#}", e),
                });
            }
        }
    }

    info!(
        ok = summary.files.len(),
        failed = summary.failed.len(),
        count = summary.totals.count,
        elapsed = ?start.elapsed(),
        "run complete"
    );
    summary
}
