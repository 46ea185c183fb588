//! Column selection for `--cols`
//!
//! Every resource declares the columns it can print and a default subset.
//! A user-supplied `--cols` list replaces the defaults; names that the
//! resource does not know are reported as diagnostics while the valid ones
//! still render.

use crate::error::ColumnError;
use std::io::Write;
use tracing::warn;

/// Outcome of [`resolve_columns`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnSelection {
    /// Columns to render, in order
    pub columns: Vec<String>,

    /// Requested names that did not match any known column
    pub unknown: Vec<ColumnError>,
}

impl ColumnSelection {
    pub fn has_unknown(&self) -> bool {
        !self.unknown.is_empty()
    }

    /// Write one line per unknown column to `out`
    pub fn report<W: Write>(&self, out: &mut W) -> std::io::Result<()> {
        for err in &self.unknown {
            writeln!(out, "{}", err)?;
        }
        Ok(())
    }
}

/// Pick the columns to render.
///
/// With no `requested` columns the defaults are returned as-is. Otherwise
/// each requested name is matched exactly (case-sensitive) against
/// `all_columns` and kept in request order, duplicates included.
pub fn resolve_columns<A, D, R>(all_columns: &[A], default_columns: &[D], requested: &[R]) -> ColumnSelection
where
    A: AsRef<str>,
    D: AsRef<str>,
    R: AsRef<str>,
{
    if requested.is_empty() {
        return ColumnSelection {
            columns: default_columns.iter().map(|c| c.as_ref().to_string()).collect(),
            unknown: Vec::new(),
        };
    }

    let mut selection = ColumnSelection::default();
    for name in requested {
        let name = name.as_ref();
        match all_columns.iter().find(|known| known.as_ref() == name) {
            Some(known) => selection.columns.push(known.as_ref().to_string()),
            None => {
                warn!(column = name, "unknown column");
                selection.unknown.push(ColumnError::UnknownColumn {
                    name: name.to_string(),
                    available: all_columns.iter().map(|c| c.as_ref().to_string()).collect(),
                });
            }
        }
    }

    selection
}

/// Split comma-separated `--cols` values, e.g. `["Name,State", " Id "]`
/// becomes `["Name", "State", "Id"]`. Empty entries are dropped.
pub fn parse_cols<S: AsRef<str>>(values: &[S]) -> Vec<String> {
    values
        .iter()
        .flat_map(|v| v.as_ref().split(','))
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .map(String::from)
        .collect()
}
