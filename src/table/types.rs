use serde_json::{Map, Value};
use std::collections::HashMap;

/// Column name -> field path, e.g. `"Name" -> "properties.name"`
pub type ColumnPathMapping = HashMap<String, String>;

/// One flat row extracted from a response: column name -> cell value
pub type Record = Map<String, Value>;

/// Build a [`ColumnPathMapping`] from `(column, path)` pairs
pub fn mapping<I, K, V>(pairs: I) -> ColumnPathMapping
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<String>,
{
    pairs
        .into_iter()
        .map(|(column, path)| (column.into(), path.into()))
        .collect()
}
