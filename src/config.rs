use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::{fs, path::Path};

/// Header text matched (by containment) when no column is configured.
pub const DEFAULT_COLUMN: &str = "Cost, Initial";
/// Character read as the decimal point when none is configured.
pub const DEFAULT_DECIMAL_SYMBOL: char = '.';

/// Settings shared by every file in a run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Substring looked for in the header row.
    pub column: String,
    /// Character mapped to `.` when reading cells.
    pub decimal_symbol: char,
    /// Worker threads for file-level processing; 1 keeps everything on the caller's thread.
    pub jobs: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            column: DEFAULT_COLUMN.to_string(),
            decimal_symbol: DEFAULT_DECIMAL_SYMBOL,
            jobs: 1,
        }
    }
}

/// Values given on the command line or through `COLSUM_*` variables.
/// Each one that is set beats the config file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Overrides {
    pub column: Option<String>,
    pub decimal_symbol: Option<char>,
    pub jobs: Option<usize>,
}

impl Config {
    /// Defaults, then the optional file, then `overrides`. The result is validated.
    pub fn resolve(file: Option<&Path>, overrides: &Overrides) -> Result<Self> {
        let mut config = match file {
            Some(path) => Self::load(path)?,
            None => Self::default(),
        };
        if let Some(column) = &overrides.column {
            config.column = column.clone();
        }
        if let Some(decimal_symbol) = overrides.decimal_symbol {
            config.decimal_symbol = decimal_symbol;
        }
        if let Some(jobs) = overrides.jobs {
            config.jobs = jobs;
        }
        config.validate().context("invalid configuration")?;
        Ok(config)
    }

    /// Read a config file. `.yaml`/`.yml` is YAML, anything else JSON.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)
            .with_context(|| format!("reading config file {:?}", path))?;

        let is_yaml = matches!(
            path.extension().and_then(|e| e.to_str()),
            Some("yaml") | Some("yml")
        );
        let config = if is_yaml {
            serde_yaml::from_str(&text).with_context(|| format!("parsing YAML config {:?}", path))?
        } else {
            serde_json::from_str(&text).with_context(|| format!("parsing JSON config {:?}", path))?
        };
        Ok(config)
    }

    /// Reject settings that could never produce a sensible run.
    pub fn validate(&self) -> Result<()> {
        if self.column.is_empty() {
            bail!("column identifier must not be empty");
        }
        let d = self.decimal_symbol;
        if d.is_ascii_digit() || d == '-' || d == '"' {
            bail!("{:?} cannot be used as the decimal symbol", d);
        }
        if self.jobs == 0 {
            bail!("jobs must be at least 1");
        }
        Ok(())
    }
}
