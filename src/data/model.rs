use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use super::error::{QueryError, QueryResult};

// ---------------------------------------------------------------------------
// CellValue – a single cell, typed lazily at comparison time
// ---------------------------------------------------------------------------

/// Outcome of trying to read a cell (or an operand) as a number.
///
/// Cells are stored as text; the numeric interpretation is decided per
/// comparison so a column may freely mix numbers and words.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CellValue<'a> {
    Number(f64),
    Text(&'a str),
}

impl<'a> CellValue<'a> {
    /// Numeric if the trimmed text parses as `f64`, otherwise the raw text.
    pub fn parse(raw: &'a str) -> Self {
        match raw.trim().parse::<f64>() {
            Ok(n) => CellValue::Number(n),
            Err(_) => CellValue::Text(raw),
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CellValue::Number(n) => Some(*n),
            CellValue::Text(_) => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Table – headers plus positionally aligned rows
// ---------------------------------------------------------------------------

/// One record: text cells aligned to the table headers by position.
pub type Row = Vec<String>;

/// A loaded dataset. Header uniqueness and row widths are not enforced.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<Row>,
}

impl Table {
    pub fn new(headers: Vec<String>, rows: Vec<Row>) -> Self {
        Table { headers, rows }
    }

    /// Same headers, different rows.
    pub fn with_rows(&self, rows: Vec<Row>) -> Self {
        Table {
            headers: self.headers.clone(),
            rows,
        }
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Position of the first header named `column`.
pub fn column_index(headers: &[String], column: &str) -> QueryResult<usize> {
    headers
        .iter()
        .position(|h| h == column)
        .ok_or_else(|| QueryError::ColumnNotFound(column.to_string()))
}

/// Cell of `row` at `index`, or `MissingCell` for short rows.
///
/// `row_no` is the 0-based position; the error reports it 1-based.
pub fn cell_at<'r>(row: &'r Row, row_no: usize, index: usize, column: &str) -> QueryResult<&'r str> {
    row.get(index)
        .map(String::as_str)
        .ok_or_else(|| QueryError::MissingCell {
            row: row_no + 1,
            column: column.to_string(),
        })
}

// ---------------------------------------------------------------------------
// Condition – `column OP operand`
// ---------------------------------------------------------------------------

/// Comparison operators understood by `--where`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    Ge,
    Le,
    Gt,
    Lt,
    Eq,
}

impl Operator {
    /// Order in which operator symbols are searched for in a condition.
    /// Two-character symbols come first so `>=` is never split on `>`.
    pub const SCAN_ORDER: [Operator; 5] = [
        Operator::Ge,
        Operator::Le,
        Operator::Gt,
        Operator::Lt,
        Operator::Eq,
    ];

    pub fn symbol(self) -> &'static str {
        match self {
            Operator::Ge => ">=",
            Operator::Le => "<=",
            Operator::Gt => ">",
            Operator::Lt => "<",
            Operator::Eq => "=",
        }
    }

    /// IEEE-754 comparison; any comparison involving NaN is false.
    pub fn compare(self, lhs: f64, rhs: f64) -> bool {
        match self {
            Operator::Ge => lhs >= rhs,
            Operator::Le => lhs <= rhs,
            Operator::Gt => lhs > rhs,
            Operator::Lt => lhs < rhs,
            Operator::Eq => lhs == rhs,
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// A parsed `--where` condition. The operand stays as text until evaluation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Condition {
    pub column: String,
    pub operator: Operator,
    pub operand: String,
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.column, self.operator, self.operand)
    }
}

// ---------------------------------------------------------------------------
// Aggregation
// ---------------------------------------------------------------------------

/// Reductions supported by `--aggregate`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AggregateFn {
    /// Arithmetic mean
    Avg,
    /// Minimum value
    Min,
    /// Maximum value
    Max,
}

impl AggregateFn {
    pub fn as_str(self) -> &'static str {
        match self {
            AggregateFn::Avg => "avg",
            AggregateFn::Min => "min",
            AggregateFn::Max => "max",
        }
    }

    /// Reduce a non-empty slice. `min`/`max` ignore NaN unless every value is NaN.
    pub fn apply(self, values: &[f64]) -> f64 {
        match self {
            AggregateFn::Avg => values.iter().sum::<f64>() / values.len() as f64,
            AggregateFn::Min => values.iter().copied().reduce(f64::min).unwrap_or(f64::NAN),
            AggregateFn::Max => values.iter().copied().reduce(f64::max).unwrap_or(f64::NAN),
        }
    }
}

impl FromStr for AggregateFn {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "avg" => Ok(AggregateFn::Avg),
            "min" => Ok(AggregateFn::Min),
            "max" => Ok(AggregateFn::Max),
            other => Err(QueryError::UnknownAggregationFunction(other.to_string())),
        }
    }
}

impl fmt::Display for AggregateFn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A parsed `--aggregate` spec.
///
/// The function name is kept as text: it is only resolved after the column
/// has been checked and its values collected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AggregationSpec {
    pub column: String,
    pub function: String,
}

impl AggregationSpec {
    pub fn resolve_function(&self) -> QueryResult<AggregateFn> {
        self.function.parse()
    }
}

/// One aggregated value, rendered as a single-row table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AggregationResult {
    pub column: String,
    pub function: AggregateFn,
    pub value: f64,
}

impl AggregationResult {
    pub const HEADERS: [&'static str; 3] = ["Column", "Function", "Result"];

    /// `[column, function, value]`
    pub fn to_row(&self) -> Row {
        vec![
            self.column.clone(),
            self.function.to_string(),
            self.value.to_string(),
        ]
    }

    /// Table with the fixed summary headers and zero or one row.
    pub fn summary_table(result: Option<&AggregationResult>) -> Table {
        Table::new(
            Self::HEADERS.iter().map(|h| h.to_string()).collect(),
            result.map(|r| vec![r.to_row()]).unwrap_or_default(),
        )
    }
}
