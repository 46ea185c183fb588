//! JSON-to-table conversion
//!
//! API responses are arbitrary nested JSON. Each resource describes the
//! columns it can print as a mapping from column name to a path inside one
//! item of the response, plus the path to the list of items. This module
//! turns a response into flat records, picks the columns to show and
//! renders them.

pub mod types;
pub mod path;
pub mod extractor;
pub mod columns;
pub mod resource;
pub mod printer;

pub use types::{mapping, ColumnPathMapping, Record};
pub use path::{JsonPath, Segment};
pub use extractor::convert_to_records;
pub use columns::{parse_cols, resolve_columns, ColumnSelection};
pub use resource::{ColumnDef, ResourceTable};
pub use printer::{format_cell, generate_output, render_json, render_table, OutputFormat, PrintOptions};
