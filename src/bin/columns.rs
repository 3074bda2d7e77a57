// src/bin/columns.rs
//
// Print the header fields of each file with their index, marking the one the
// column identifier would select.

use anyhow::{Context, Result};
use clap::Parser;
use colsum::{
    config::DEFAULT_COLUMN,
    locate_column,
    process::expand_inputs,
    tokenize::{header, tokenize},
};
use std::fs;
use tracing::error;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser, Debug)]
#[command(author, version, about = "List header columns of delimited text files")]
struct Cli {
    #[arg(required = true)]
    files: Vec<String>,

    /// Column identifier to highlight
    #[arg(short, long, env = "COLSUM_COLUMN", default_value = DEFAULT_COLUMN)]
    column: String,
}

fn main() -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    for path in expand_inputs(&cli.files) {
        let bytes = match fs::read(&path).with_context(|| format!("reading {:?}", path)) {
            Ok(b) => b,
            Err(e) => {
                error!("{:#}", e);
                continue;
            }
        };
        let records = tokenize(&String::from_utf8_lossy(&bytes));
        let selected = locate_column(&cli.column, &records);

        println!("{}", path.display());
        match header(&records) {
            Some(fields) => {
                for (i, field) in fields.iter().enumerate() {
                    let mark = if selected == Some(i) { "*" } else { " " };
                    println!("{} {:>4}  {}", mark, i, field);
                }
                println!("  {} data row(s)", records.len() - 1);
            }
            None => println!("  (no complete header row)"),
        }
    }

    Ok(())
}
