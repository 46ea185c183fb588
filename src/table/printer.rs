//! Rendering of extracted records
//!
//! Text output is an aligned, borderless table in the spirit of a tab
//! writer: one header line of column names, then one line per record.
//! JSON output prints the records restricted to the selected columns, and
//! API JSON prints the whole response untouched.

use crate::table::columns::resolve_columns;
use crate::table::extractor::convert_to_records;
use crate::table::resource::ResourceTable;
use crate::table::types::Record;
use anyhow::{Context, Result};
use clap::ValueEnum;
use serde::Serialize;
use serde_json::{Map, Value};
use std::io::Write;
use tabled::builder::Builder;
use tabled::settings::{Alignment, Padding, Style};

/// Gap between columns in text output
const COLUMN_GAP: usize = 3;

/// Output format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Aligned text table
    #[default]
    Text,
    /// Extracted records as JSON
    Json,
    /// The raw API response as JSON
    ApiJson,
}

/// Printing options shared by every command
#[derive(Debug, Clone, Copy, Default)]
pub struct PrintOptions {
    pub format: OutputFormat,

    /// Omit the header line in text output
    pub no_headers: bool,
}

/// Run the full pipeline for one response: extract, select columns, render.
///
/// Unknown `--cols` entries are written to `diagnostics` and skipped. Any
/// extraction failure aborts before anything is rendered.
pub fn generate_output<T, S, W>(
    table: &ResourceTable,
    source: &T,
    requested: &[S],
    options: PrintOptions,
    diagnostics: &mut W,
) -> Result<String>
where
    T: Serialize + ?Sized,
    S: AsRef<str>,
    W: Write,
{
    table.validate().context("Invalid table definition")?;

    if options.format == OutputFormat::ApiJson {
        let value = serde_json::to_value(source).context("Failed to serialize response")?;
        return serde_json::to_string_pretty(&value).context("Failed to format response");
    }

    let records = convert_to_records(&table.root_path, &table.mapping(), source)
        .context("Failed to convert response to table")?;

    let selection = resolve_columns(&table.all_columns(), &table.defaults(), requested);
    selection
        .report(diagnostics)
        .context("Failed to write column diagnostics")?;

    match options.format {
        OutputFormat::Text => Ok(render_table(&records, &selection.columns, options.no_headers)),
        _ => render_json(&records, &selection.columns),
    }
}

/// Render records as an aligned text table with the given column order
pub fn render_table<S: AsRef<str>>(records: &[Record], columns: &[S], no_headers: bool) -> String {
    if columns.is_empty() || (records.is_empty() && no_headers) {
        return String::new();
    }

    let mut builder = Builder::default();
    if !no_headers {
        builder.push_record(columns.iter().map(|c| c.as_ref().to_string()));
    }
    for record in records {
        builder.push_record(
            columns
                .iter()
                .map(|c| record.get(c.as_ref()).map(format_cell).unwrap_or_default()),
        );
    }

    let mut table = builder.build();
    table
        .with(Style::empty())
        .with(Padding::new(0, COLUMN_GAP, 0, 0))
        .with(Alignment::left());

    let rendered = table.to_string();
    let mut out = String::with_capacity(rendered.len());
    for line in rendered.lines() {
        out.push_str(line.trim_end());
        out.push('\n');
    }
    out
}

/// Render records as a pretty JSON array keeping only `columns`
pub fn render_json<S: AsRef<str>>(records: &[Record], columns: &[S]) -> Result<String> {
    let rows: Vec<Value> = records
        .iter()
        .map(|record| {
            let mut row = Map::new();
            for column in columns {
                let column = column.as_ref();
                let cell = record.get(column).cloned().unwrap_or(Value::Null);
                row.insert(column.to_string(), cell);
            }
            Value::Object(row)
        })
        .collect();

    serde_json::to_string_pretty(&rows).context("Failed to serialize records")
}

/// Format a single cell for text output
pub fn format_cell(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::Array(items) => {
            let inner: Vec<String> = items.iter().map(format_cell).collect();
            format!("[{}]", inner.join(" "))
        }
        Value::Object(_) => value.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: Value) -> Record {
        serde_json::from_value(value).unwrap()
    }

    fn datacenters() -> ResourceTable {
        ResourceTable::new("items")
            .with_column("DatacenterId", "id")
            .with_column("Name", "properties.name")
            .with_column("Location", "properties.location")
            .with_defaults(["DatacenterId", "Name"])
    }

    fn response() -> Value {
        json!({
            "id": "datacenters",
            "items": [
                {"id": "dc-1", "properties": {"name": "prod", "location": "de/fra"}},
                {"id": "dc-2", "properties": {"name": "staging"}}
            ]
        })
    }

    #[test]
    fn test_format_cell() {
        assert_eq!(format_cell(&Value::Null), "");
        assert_eq!(format_cell(&json!("AVAILABLE")), "AVAILABLE");
        assert_eq!(format_cell(&json!(4)), "4");
        assert_eq!(format_cell(&json!(true)), "true");
        assert_eq!(format_cell(&json!(["10.0.0.1", "10.0.0.2"])), "[10.0.0.1 10.0.0.2]");
        assert_eq!(format_cell(&json!({"a": 1})), r#"{"a":1}"#);
    }

    #[test]
    fn test_render_table_aligns_columns() {
        let records = vec![
            record(json!({"Id": "i1", "Name": "first"})),
            record(json!({"Id": "i22", "Name": "second"})),
        ];

        let output = render_table(&records, &["Id", "Name"], false);

        assert_eq!(output, "Id    Name\ni1    first\ni22   second\n");
    }

    #[test]
    fn test_render_table_blank_for_null() {
        let records = vec![record(json!({"Id": "i1", "Name": null, "State": "BUSY"}))];

        let output = render_table(&records, &["Id", "Name", "State"], false);

        assert_eq!(output, "Id   Name   State\ni1          BUSY\n");
    }

    #[test]
    fn test_render_table_headers_only_when_empty() {
        let output = render_table(&[], &["Id", "Name"], false);
        assert_eq!(output, "Id   Name\n");
        assert_eq!(render_table(&[], &["Id"], true), "");
    }

    #[test]
    fn test_render_json_restricts_columns() {
        let records = vec![record(json!({"Id": "i1", "Name": "n1", "State": "AVAILABLE"}))];

        let output = render_json(&records, &["State", "Id"]).unwrap();
        let parsed: Value = serde_json::from_str(&output).unwrap();

        assert_eq!(parsed, json!([{"Id": "i1", "State": "AVAILABLE"}]));
    }

    #[test]
    fn test_generate_output_text() {
        let mut diagnostics: Vec<u8> = Vec::new();
        let output = generate_output(
            &datacenters(),
            &response(),
            &[] as &[&str],
            PrintOptions::default(),
            &mut diagnostics,
        )
        .unwrap();

        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("DatacenterId"));
        assert!(lines[1].starts_with("dc-1"));
        assert!(lines[2].ends_with("staging"));
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_generate_output_reports_unknown_columns() {
        let mut diagnostics: Vec<u8> = Vec::new();
        let options = PrintOptions {
            format: OutputFormat::Json,
            no_headers: false,
        };

        let output = generate_output(
            &datacenters(),
            &response(),
            &["Location", "Size"],
            options,
            &mut diagnostics,
        )
        .unwrap();

        let parsed: Value = serde_json::from_str(&output).unwrap();
        assert_eq!(parsed, json!([{"Location": "de/fra"}, {"Location": null}]));

        let diagnostics = String::from_utf8(diagnostics).unwrap();
        assert!(diagnostics.starts_with("unknown column Size"));
    }

    #[test]
    fn test_generate_output_api_json() {
        let mut diagnostics: Vec<u8> = Vec::new();
        let options = PrintOptions {
            format: OutputFormat::ApiJson,
            no_headers: false,
        };

        let output =
            generate_output(&datacenters(), &response(), &["Nope"], options, &mut diagnostics).unwrap();

        let parsed: Value = serde_json::from_str(&output).unwrap();
        assert_eq!(parsed, response());
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_generate_output_aborts_on_bad_root() {
        let table = ResourceTable::new("entities.servers.items").with_column("Id", "id");
        let mut diagnostics: Vec<u8> = Vec::new();

        let err = generate_output(
            &table,
            &response(),
            &[] as &[&str],
            PrintOptions::default(),
            &mut diagnostics,
        )
        .unwrap_err();

        assert!(format!("{:#}", err).contains("'entities.servers.items' does not exist"));
    }
}
