//! # ionosctl-table - JSON-to-table output for the IONOS Cloud CLI
//!
//! Every `ionosctl` command prints an API response either as an aligned
//! table or as JSON. This crate holds the engine behind that output.
//!
//! ## Modules
//!
//! - **table::extractor**: turn a nested response into flat records using a
//!   root path and a column -> field path mapping
//! - **table::columns**: resolve the columns to show from defaults and `--cols`
//! - **table::printer**: render records as text or JSON
//! - **table::resource**: per-resource column tables
//!
//! ## Quick Start
//!
//! ```rust
//! use ionosctl_table::table::{convert_to_records, mapping};
//! use serde_json::json;
//!
//! # fn main() -> anyhow::Result<()> {
//! let response = json!({
//!     "items": [
//!         {"id": "dc-1", "properties": {"name": "prod", "location": "de/fra"}},
//!         {"id": "dc-2", "properties": {"name": "staging"}}
//!     ]
//! });
//!
//! let paths = mapping([("DatacenterId", "id"), ("Location", "properties.location")]);
//! let records = convert_to_records("items", &paths, &response)?;
//!
//! assert_eq!(records.len(), 2);
//! assert_eq!(records[1]["Location"], serde_json::Value::Null);
//! # Ok(())
//! # }
//! ```
//!
//! ### Full pipeline
//!
//! ```rust
//! use ionosctl_table::table::{generate_output, PrintOptions, ResourceTable};
//! use serde_json::json;
//!
//! # fn main() -> anyhow::Result<()> {
//! let servers = ResourceTable::new("items")
//!     .with_column("ServerId", "id")
//!     .with_column("Name", "properties.name")
//!     .with_column("Cores", "properties.cores")
//!     .with_defaults(["ServerId", "Name"]);
//!
//! let response = json!({"items": [{"id": "s-1", "properties": {"name": "web", "cores": 2}}]});
//! let mut warnings: Vec<u8> = Vec::new();
//! let output = generate_output(&servers, &response, &["Name", "Cores"], PrintOptions::default(), &mut warnings)?;
//!
//! assert_eq!(output, "Name   Cores\nweb    2\n");
//! # Ok(())
//! # }
//! ```

use anyhow::{bail, Context, Result};
use serde_json::Value;
use std::io::{Read, Write};

pub mod error;
pub mod table;

// Re-export commonly used types for convenience
pub use error::{ColumnError, Json2TableError, ResourceTableError};
pub use table::{
    convert_to_records, generate_output, resolve_columns, ColumnPathMapping, ColumnSelection,
    OutputFormat, PrintOptions, Record, ResourceTable,
};

/// Main entry point: read one JSON response and render it for `table`
pub fn render_response<R: Read, W: Write>(
    reader: R,
    table: &ResourceTable,
    requested: &[String],
    options: PrintOptions,
    diagnostics: &mut W,
) -> Result<String> {
    let response = read_response(reader)?;
    generate_output(table, &response, requested, options, diagnostics)
}

/// Read a single JSON document, SIMD-accelerated when the input allows it
pub fn read_response<R: Read>(mut reader: R) -> Result<Value> {
    let mut content = Vec::new();
    reader
        .read_to_end(&mut content)
        .context("Failed to read input")?;

    if content.iter().all(|b| b.is_ascii_whitespace()) {
        bail!("No JSON document found in input");
    }

    // simd-json parses in place, so keep the original bytes for the fallback
    let mut scratch = content.clone();
    match simd_json::serde::from_slice::<Value>(&mut scratch) {
        Ok(value) => Ok(value),
        Err(_) => serde_json::from_slice(&content).context("Failed to parse JSON"),
    }
}
