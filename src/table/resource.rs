use crate::error::ResourceTableError;
use crate::table::types::ColumnPathMapping;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// One printable column of a resource
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnDef {
    pub name: String,
    pub path: String,
}

/// Table layout for one resource type (datacenters, servers, certificates...)
///
/// Loaded from JSON such as:
///
/// ```json
/// {
///   "rootPath": "items",
///   "columns": [
///     {"name": "DatacenterId", "path": "id"},
///     {"name": "Name", "path": "properties.name"}
///   ],
///   "defaultColumns": ["DatacenterId", "Name"]
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceTable {
    /// Where the list of items lives in a response (empty: the response itself)
    #[serde(default)]
    pub root_path: String,

    /// Every supported column, in display order
    pub columns: Vec<ColumnDef>,

    /// Columns shown without `--cols`; all columns when empty
    #[serde(default)]
    pub default_columns: Vec<String>,
}

impl ResourceTable {
    pub fn new(root_path: impl Into<String>) -> Self {
        ResourceTable {
            root_path: root_path.into(),
            ..Default::default()
        }
    }

    pub fn with_column(mut self, name: impl Into<String>, path: impl Into<String>) -> Self {
        self.columns.push(ColumnDef {
            name: name.into(),
            path: path.into(),
        });
        self
    }

    pub fn with_defaults<I, S>(mut self, defaults: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.default_columns = defaults.into_iter().map(Into::into).collect();
        self
    }

    pub fn all_columns(&self) -> Vec<String> {
        self.columns.iter().map(|c| c.name.clone()).collect()
    }

    pub fn defaults(&self) -> Vec<String> {
        if self.default_columns.is_empty() {
            self.all_columns()
        } else {
            self.default_columns.clone()
        }
    }

    pub fn mapping(&self) -> ColumnPathMapping {
        self.columns
            .iter()
            .map(|c| (c.name.clone(), c.path.clone()))
            .collect()
    }

    pub fn validate(&self) -> Result<(), ResourceTableError> {
        let mut seen = HashSet::new();
        for column in &self.columns {
            if column.name.is_empty() {
                return Err(ResourceTableError::EmptyColumnName);
            }
            if column.path.is_empty() {
                return Err(ResourceTableError::EmptyPath(column.name.clone()));
            }
            if !seen.insert(column.name.as_str()) {
                return Err(ResourceTableError::DuplicateColumn(column.name.clone()));
            }
        }

        if let Some(unknown) = self.default_columns.iter().find(|d| !seen.contains(d.as_str())) {
            return Err(ResourceTableError::UnknownDefault(unknown.clone()));
        }

        Ok(())
    }
}
