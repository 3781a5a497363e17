use std::io::Write;
use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{ArrayRef, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use arrow::util::pretty::pretty_format_batches;
use clap::ValueEnum;

use crate::data::{AggregationResult, Table};

// ---------------------------------------------------------------------------
// Output formats
// ---------------------------------------------------------------------------

/// How results are written to stdout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Bordered text grid
    #[default]
    Table,
    /// Header plus rows as CSV
    Csv,
    /// JSON document
    Json,
}

/// Write a row table in the chosen format.
pub fn write_table<W: Write>(out: &mut W, table: &Table, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Table => write_grid(out, table),
        OutputFormat::Csv => write_csv(out, table),
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, table).context("writing JSON")?;
            writeln!(out)?;
            Ok(())
        }
    }
}

/// Write an aggregation outcome; `None` means there were no rows to reduce.
pub fn write_aggregation<W: Write>(
    out: &mut W,
    result: Option<&AggregationResult>,
    format: OutputFormat,
) -> Result<()> {
    match format {
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, &result).context("writing JSON")?;
            writeln!(out)?;
            Ok(())
        }
        other => write_table(out, &AggregationResult::summary_table(result), other),
    }
}

// ---------------------------------------------------------------------------
// Grid rendering via Arrow's pretty printer
// ---------------------------------------------------------------------------

/// Every column becomes a Utf8 array; short rows are padded with empty cells.
fn to_record_batch(table: &Table) -> Result<RecordBatch> {
    let fields: Vec<Field> = table
        .headers
        .iter()
        .map(|h| Field::new(h.as_str(), DataType::Utf8, false))
        .collect();

    let columns: Vec<ArrayRef> = (0..table.headers.len())
        .map(|idx| {
            let cells: Vec<&str> = table
                .rows
                .iter()
                .map(|row| row.get(idx).map(String::as_str).unwrap_or(""))
                .collect();
            Arc::new(StringArray::from(cells)) as ArrayRef
        })
        .collect();

    RecordBatch::try_new(Arc::new(Schema::new(fields)), columns).context("building record batch")
}

fn write_grid<W: Write>(out: &mut W, table: &Table) -> Result<()> {
    if table.headers.is_empty() {
        return Ok(());
    }
    let batch = to_record_batch(table)?;
    let grid = pretty_format_batches(&[batch]).context("formatting table")?;
    writeln!(out, "{grid}")?;
    Ok(())
}

// ---------------------------------------------------------------------------
// CSV output
// ---------------------------------------------------------------------------

fn write_csv<W: Write>(out: &mut W, table: &Table) -> Result<()> {
    let mut writer = csv::WriterBuilder::new().flexible(true).from_writer(out);
    writer.write_record(&table.headers).context("writing CSV header")?;
    for row in &table.rows {
        writer.write_record(row).context("writing CSV row")?;
    }
    writer.flush()?;
    Ok(())
}
