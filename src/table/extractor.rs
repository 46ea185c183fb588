use crate::error::Json2TableError;
use crate::table::path::JsonPath;
use crate::table::types::{ColumnPathMapping, Record};
use serde::Serialize;
use serde_json::Value;
use std::borrow::Cow;
use tracing::debug;

/// Convert an API response into flat records, one per root object.
///
/// `source` is normalized through `serde_json` first, so typed SDK models and
/// raw `Value`s take the same route. `root_path` locates the array of records
/// inside the response (empty means the response itself), and every entry of
/// `mapping` becomes one key of every record. Fields that do not resolve are
/// `null`; only structural problems with the input or the root path fail.
pub fn convert_to_records<T>(
    root_path: &str,
    mapping: &ColumnPathMapping,
    source: &T,
) -> Result<Vec<Record>, Json2TableError>
where
    T: Serialize + ?Sized,
{
    if mapping.is_empty() {
        return Err(Json2TableError::EmptyMapping);
    }

    let value = serde_json::to_value(source)?;
    match &value {
        Value::Null => return Err(Json2TableError::NilSource),
        Value::Array(items) if items.is_empty() => return Ok(Vec::new()),
        _ => {}
    }

    let roots = resolve_roots(root_path, &value)?;
    debug!(root_path, roots = roots.len(), columns = mapping.len(), "resolved root objects");

    let columns = compile_paths(mapping);
    Ok(roots
        .into_iter()
        .map(|root| build_record(&columns, &root))
        .collect())
}

/// Locate the objects that each become one record
fn resolve_roots<'a>(
    root_path: &str,
    value: &'a Value,
) -> Result<Vec<Cow<'a, Value>>, Json2TableError> {
    if root_path.is_empty() {
        return Ok(match value {
            Value::Array(items) => items.iter().map(Cow::Borrowed).collect(),
            other => vec![Cow::Borrowed(other)],
        });
    }

    let resolved = JsonPath::parse(root_path)
        .and_then(|path| path.resolve(value))
        .ok_or_else(|| Json2TableError::PathNotFound {
            path: root_path.to_string(),
            available: top_level_keys(value),
        })?;

    // Pages wrapped in an outer array are flattened by exactly one level
    let mut roots = Vec::new();
    match resolved {
        Cow::Borrowed(Value::Array(children)) => {
            for child in children {
                match child {
                    Value::Array(inner) => roots.extend(inner.iter().map(Cow::Borrowed)),
                    other => roots.push(Cow::Borrowed(other)),
                }
            }
        }
        Cow::Owned(Value::Array(children)) => {
            for child in children {
                match child {
                    Value::Array(inner) => roots.extend(inner.into_iter().map(Cow::Owned)),
                    other => roots.push(Cow::Owned(other)),
                }
            }
        }
        _ => {
            return Err(Json2TableError::NotAnArray {
                path: root_path.to_string(),
            });
        }
    }

    Ok(roots)
}

fn top_level_keys(value: &Value) -> Vec<String> {
    match value {
        Value::Object(map) => map.keys().cloned().collect(),
        _ => Vec::new(),
    }
}

fn compile_paths(mapping: &ColumnPathMapping) -> Vec<(&str, Option<JsonPath>)> {
    mapping
        .iter()
        .map(|(column, path)| {
            let parsed = JsonPath::parse(path);
            if parsed.is_none() {
                debug!(column = column.as_str(), path = path.as_str(), "unparseable field path");
            }
            (column.as_str(), parsed)
        })
        .collect()
}

fn build_record(columns: &[(&str, Option<JsonPath>)], root: &Value) -> Record {
    let mut record = Record::new();

    for (column, path) in columns {
        let cell = path
            .as_ref()
            .and_then(|p| p.resolve(root))
            .map(Cow::into_owned)
            .unwrap_or(Value::Null);
        record.insert(column.to_string(), cell);
    }

    record
}
