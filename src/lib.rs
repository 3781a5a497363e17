//! Filter and aggregate small tabular files from the command line.
//!
//! ```text
//! csv-slice --file products.csv --where "price>500" --aggregate "price=avg"
//! ```
//!
//! The [`data`] layer holds the pure parts (condition parsing, row filtering,
//! aggregation) plus the file loader; [`render`] turns a table into text and
//! [`cli`] wires them together.

pub mod cli;
pub mod data;
pub mod render;
