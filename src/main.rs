use anyhow::Result;
use clap::{Parser, ValueEnum};
use colsum::{
    config::{Config, Overrides},
    process::{expand_inputs, sum_files},
    report::Report,
};
use std::path::PathBuf;
use tracing::{debug, info};
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Output {
    Text,
    Json,
}

/// Sum and average one column across delimited text files.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Files to read; glob patterns are expanded
    #[arg(required = true)]
    files: Vec<String>,

    /// Text contained in the header of the column to sum
    #[arg(short, long, env = "COLSUM_COLUMN")]
    column: Option<String>,

    /// Character used as the decimal point in cells
    #[arg(short, long, env = "COLSUM_DECIMAL")]
    decimal: Option<char>,

    /// Files processed in parallel
    #[arg(short, long, env = "COLSUM_JOBS")]
    jobs: Option<usize>,

    /// YAML or JSON file with column / decimal_symbol / jobs
    #[arg(long)]
    config: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t = Output::Text)]
    output: Output,

    /// Also print one line per file
    #[arg(long)]
    per_file: bool,

    /// Log at debug level unless RUST_LOG says otherwise
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn overrides(&self) -> Overrides {
        Overrides {
            column: self.column.clone(),
            decimal_symbol: self.decimal,
            jobs: self.jobs,
        }
    }

    fn resolve_config(&self) -> Result<Config> {
        Config::resolve(self.config.as_deref(), &self.overrides())
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // ─── 1) init logging ─────────────────────────────────────────────
    let default_level = if cli.verbose { "debug" } else { "info" };
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    fmt::Subscriber::builder()
        .with_env_filter(env)
        .with_writer(std::io::stderr)
        .init();

    // ─── 2) configuration ────────────────────────────────────────────
    let config = cli.resolve_config()?;
    debug!(?config, "resolved configuration");

    // ─── 3) sum every file ───────────────────────────────────────────
    let paths = expand_inputs(&cli.files);
    info!("{} file(s) to read", paths.len());
    let summary = sum_files(&paths, &config);

    // ─── 4) report ───────────────────────────────────────────────────
    let report = Report::from_summary(&summary, cli.per_file);
    match cli.output {
        Output::Text => print!("{}", report.to_text()),
        Output::Json => println!("{}", report.to_json()?),
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use colsum::config::DEFAULT_COLUMN;
    use std::io::Write;
    use tempfile::Builder;

    fn yaml_config(body: &str) -> tempfile::NamedTempFile {
        let mut f = Builder::new().suffix(".yaml").tempfile().unwrap();
        f.write_all(body.as_bytes()).unwrap();
        f
    }

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("colsum").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn flag_beats_config_file() {
        let f = yaml_config("column: Amount\njobs: 2\n");
        let path = f.path().to_str().unwrap();
        let cli = parse(&["--config", path, "--column", "Price", "a.csv"]);

        let config = cli.resolve_config().unwrap();
        assert_eq!(config.column, "Price");
        assert_eq!(config.jobs, 2);
        assert_eq!(config.decimal_symbol, '.');
    }

    #[test]
    fn config_file_keys_fill_in_over_defaults() {
        let f = yaml_config("decimal_symbol: ','\n");
        let path = f.path().to_str().unwrap();
        let cli = parse(&["--config", path, "a.csv", "b.csv"]);

        let config = cli.resolve_config().unwrap();
        assert_eq!(config.column, DEFAULT_COLUMN);
        assert_eq!(config.decimal_symbol, ',');
        assert_eq!(config.jobs, 1);
        assert_eq!(cli.files, vec!["a.csv", "b.csv"]);
    }

    #[test]
    fn zero_jobs_is_rejected() {
        let cli = parse(&["--jobs", "0", "a.csv"]);
        assert!(cli.resolve_config().is_err());
    }

    #[test]
    fn files_are_required() {
        assert!(Cli::try_parse_from(["colsum"]).is_err());
    }
}
