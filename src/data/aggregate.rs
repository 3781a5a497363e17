use super::condition::parse_aggregation;
use super::error::{QueryError, QueryResult};
use super::model::{cell_at, column_index, AggregationResult, AggregationSpec, CellValue, Row};

/// Parse `column=function` and reduce that column over `rows`.
///
/// Returns `Ok(None)` when there are no rows. Checks run in a fixed order:
/// spec format, column lookup, numeric parse of every cell (the first bad
/// cell aborts), emptiness, and only then the function name.
pub fn aggregate_rows(
    rows: &[Row],
    headers: &[String],
    spec: &str,
) -> QueryResult<Option<AggregationResult>> {
    let spec = parse_aggregation(spec)?;
    apply_aggregation(rows, headers, &spec)
}

/// Reduce a column according to an already parsed spec.
pub fn apply_aggregation(
    rows: &[Row],
    headers: &[String],
    spec: &AggregationSpec,
) -> QueryResult<Option<AggregationResult>> {
    let values = numeric_column(rows, headers, &spec.column)?;
    if values.is_empty() {
        log::debug!("aggregate {}={} over no rows", spec.column, spec.function);
        return Ok(None);
    }

    let function = spec.resolve_function()?;
    let value = function.apply(&values);
    log::debug!("aggregate {}={function} over {} rows -> {value}", spec.column, values.len());

    Ok(Some(AggregationResult {
        column: spec.column.clone(),
        function,
        value,
    }))
}

/// Every cell of `column` as `f64`, failing on the first non-numeric cell.
pub fn numeric_column(rows: &[Row], headers: &[String], column: &str) -> QueryResult<Vec<f64>> {
    let index = column_index(headers, column)?;

    rows.iter()
        .enumerate()
        .map(|(row_no, row)| {
            let cell = cell_at(row, row_no, index, column)?;
            CellValue::parse(cell)
                .as_f64()
                .ok_or_else(|| QueryError::NonNumericColumn(column.to_string()))
        })
        .collect()
}
