use crate::diff::{DiffCell, DiffTable};
use crate::key::Key;
use serde::Serialize;
use std::fmt::Display;

/// One non-unchanged cell, flattened for machine-readable output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CellDiff {
    pub row: Key,
    pub column: Key,
    pub status: CellStatus,
    #[serde(rename = "value_left")]
    pub left: Option<String>,
    #[serde(rename = "value_right")]
    pub right: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CellStatus {
    Changed,
    Added,
    Removed,
}

pub fn serialize_cell_diffs(diffs: &[CellDiff]) -> serde_json::Result<String> {
    serde_json::to_string(diffs)
}

pub fn serialize_diff_table<V: Serialize>(diff: &DiffTable<V>) -> serde_json::Result<String> {
    serde_json::to_string(diff)
}

pub fn diff_table_to_cell_diffs<V: Display>(diff: &DiffTable<V>) -> Vec<CellDiff> {
    let mut out = Vec::new();
    for (row_key, row) in diff.row_keys().iter().zip(diff.cells()) {
        for (col_key, cell) in diff.col_keys().iter().zip(row) {
            let Some(cell) = cell else { continue };
            let status = match cell {
                DiffCell::Unchanged { .. } => continue,
                DiffCell::Changed { .. } => CellStatus::Changed,
                DiffCell::Added { .. } => CellStatus::Added,
                DiffCell::Removed { .. } => CellStatus::Removed,
            };
            out.push(CellDiff {
                row: row_key.key.clone(),
                column: col_key.key.clone(),
                status,
                left: cell.left_value().map(ToString::to_string),
                right: cell.right_value().map(ToString::to_string),
            });
        }
    }
    out
}
