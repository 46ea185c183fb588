//! Error types for JSON-to-table conversion.

use thiserror::Error;

/// Structural failures of a single conversion call.
///
/// Per-field misses are never errors; they become `null` cells.
#[derive(Debug, Error)]
pub enum Json2TableError {
    #[error("provided object cannot be nil")]
    NilSource,

    #[error("json paths must not be empty/nil")]
    EmptyMapping,

    #[error("'{path}' does not exist in [{}]", .available.join(" "))]
    PathNotFound { path: String, available: Vec<String> },

    #[error("root path does not lead to an array in object: {path}")]
    NotAnArray { path: String },

    #[error(transparent)]
    Serialize(#[from] serde_json::Error),
}

/// Recoverable diagnostic produced while resolving `--cols`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColumnError {
    #[error("unknown column {name}, available columns: {}", .available.join(", "))]
    UnknownColumn { name: String, available: Vec<String> },
}

/// Invalid per-resource table configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResourceTableError {
    #[error("column name must not be empty")]
    EmptyColumnName,

    #[error("column {0} is declared more than once")]
    DuplicateColumn(String),

    #[error("column {0} has an empty path")]
    EmptyPath(String),

    #[error("default column {0} is not a declared column")]
    UnknownDefault(String),
}
