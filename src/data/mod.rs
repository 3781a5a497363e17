/// Data layer: core types, loading, filtering and aggregation.
///
/// Architecture:
/// ```text
///  .csv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → Table (headers + text rows)
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  `column OP value` → matching rows, order kept
///   └──────────┘
///        │
///        ▼
///   ┌───────────┐
///   │ aggregate │  `column=avg|min|max` → zero or one summary row
///   └───────────┘
/// ```

pub mod aggregate;
pub mod condition;
pub mod error;
pub mod filter;
pub mod loader;
pub mod model;

pub use aggregate::aggregate_rows;
pub use condition::{parse_aggregation, parse_condition};
pub use error::QueryError;
pub use filter::filter_rows;
pub use loader::{load_file, LoadOptions};
pub use model::{AggregateFn, AggregationResult, AggregationSpec, Condition, Operator, Row, Table};
