use std::io::Write;
use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::Parser;

use crate::data::{aggregate_rows, filter_rows, load_file, LoadOptions};
use crate::render::{self, OutputFormat};

/// Status returned when any step fails.
pub const EXIT_FAILURE: u8 = 1;

#[derive(Parser, Debug, Clone)]
#[command(name = "csv-slice")]
#[command(about = "Process CSV files with filtering and aggregation")]
#[command(version)]
#[command(after_help = "Examples:\n  \
    csv-slice --file products.csv                              # Show the whole table\n  \
    csv-slice --file products.csv --where \"price>500\"          # Filter rows\n  \
    csv-slice --file products.csv --where \"brand=apple\"        # Text equality\n  \
    csv-slice --file products.csv --aggregate \"price=avg\"      # avg, min or max\n  \
    csv-slice --file products.csv --where \"brand=apple\" --aggregate \"price=max\"")]
pub struct Cli {
    /// Path to the input file (.csv, .json or .parquet)
    #[arg(long, value_name = "PATH")]
    pub file: PathBuf,

    /// Filter condition, e.g. "price>500" (operators: >=, <=, >, <, =)
    #[arg(long = "where", value_name = "CONDITION")]
    pub condition: Option<String>,

    /// Aggregation, e.g. "price=avg" (functions: avg, min, max)
    #[arg(long, value_name = "COLUMN=FUNC")]
    pub aggregate: Option<String>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,

    /// Field delimiter for CSV input
    #[arg(long, default_value_t = ',')]
    pub delimiter: char,

    /// Log debug details to stderr
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    fn load_options(&self) -> Result<LoadOptions> {
        if !self.delimiter.is_ascii() {
            bail!("Delimiter must be a single ASCII character, got '{}'", self.delimiter);
        }
        Ok(LoadOptions {
            delimiter: self.delimiter as u8,
        })
    }
}

/// Load, optionally filter, optionally aggregate, then render to `out`.
pub fn run<W: Write>(cli: &Cli, out: &mut W) -> Result<()> {
    let table = load_file(&cli.file, cli.load_options()?)?;

    let table = match &cli.condition {
        Some(condition) => {
            let rows = filter_rows(&table.rows, &table.headers, condition)?;
            table.with_rows(rows)
        }
        None => table,
    };

    match &cli.aggregate {
        Some(spec) => {
            let result = aggregate_rows(&table.rows, &table.headers, spec)?;
            render::write_aggregation(out, result.as_ref(), cli.format)
        }
        None => render::write_table(out, &table, cli.format),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_flags() {
        let cli = Cli::try_parse_from([
            "csv-slice",
            "--file",
            "data.csv",
            "--where",
            "price>500",
            "--aggregate",
            "price=avg",
            "--format",
            "json",
        ])
        .unwrap();
        assert_eq!(cli.file, PathBuf::from("data.csv"));
        assert_eq!(cli.condition.as_deref(), Some("price>500"));
        assert_eq!(cli.aggregate.as_deref(), Some("price=avg"));
        assert_eq!(cli.format, OutputFormat::Json);
        assert_eq!(cli.delimiter, ',');
        assert!(!cli.verbose);
    }

    #[test]
    fn file_is_required() {
        assert!(Cli::try_parse_from(["csv-slice", "--where", "a=b"]).is_err());
    }

    #[test]
    fn non_ascii_delimiter_is_rejected() {
        let cli = Cli::try_parse_from(["csv-slice", "--file", "x.csv", "--delimiter", "§"]).unwrap();
        assert!(cli.load_options().is_err());
    }
}
