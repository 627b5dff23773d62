//! Diff results for table comparison.
//!
//! This module defines the types produced by the differ:
//! - [`DiffCell`]: the status of one aligned cell
//! - [`DiffKey`]: a row or column key tagged with its presence on each side
//! - [`DiffTable`]: the union of both tables with a [`DiffCell`] per position
//! - [`DiffSummary`]: per-status counts over a [`DiffTable`]

use crate::error::TableError;
use crate::key::{Axis, Key};
use crate::table::TableModel;
use rustc_hash::FxHashMap;
use serde::Serialize;

/// The status of a single aligned cell. Exactly one tag applies per cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum DiffCell<V> {
    Unchanged { value: V },
    Changed { old: V, new: V },
    /// Present only in the right-hand table.
    Added { value: V },
    /// Present only in the left-hand table.
    Removed { value: V },
}

impl<V> DiffCell<V> {
    pub fn is_unchanged(&self) -> bool {
        matches!(self, DiffCell::Unchanged { .. })
    }

    /// Value as it appears in the left table, if the cell exists there.
    pub fn left_value(&self) -> Option<&V> {
        match self {
            DiffCell::Unchanged { value } | DiffCell::Removed { value } => Some(value),
            DiffCell::Changed { old, .. } => Some(old),
            DiffCell::Added { .. } => None,
        }
    }

    /// Value as it appears in the right table, if the cell exists there.
    pub fn right_value(&self) -> Option<&V> {
        match self {
            DiffCell::Unchanged { value } | DiffCell::Added { value } => Some(value),
            DiffCell::Changed { new, .. } => Some(new),
            DiffCell::Removed { .. } => None,
        }
    }
}

/// Whether a row or column key exists on both sides or only one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyStatus {
    Both,
    Added,
    Removed,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiffKey {
    pub key: Key,
    pub status: KeyStatus,
}

impl DiffKey {
    pub fn new(key: Key, status: KeyStatus) -> DiffKey {
        DiffKey { key, status }
    }

    pub fn in_left(&self) -> bool {
        self.status != KeyStatus::Added
    }

    pub fn in_right(&self) -> bool {
        self.status != KeyStatus::Removed
    }
}

/// A table over the union of two tables' keys whose cells carry a diff status.
///
/// `cells[r][c]` is `None` only where row `r` exists solely on one side and
/// column `c` solely on the other, so neither table has a value there.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DiffTable<V> {
    row_keys: Vec<DiffKey>,
    col_keys: Vec<DiffKey>,
    cells: Vec<Vec<Option<DiffCell<V>>>>,
    corner: Vec<Vec<String>>,
    row_depth: usize,
    col_depth: usize,
}

impl<V> DiffTable<V> {
    pub(crate) fn from_parts(
        row_keys: Vec<DiffKey>,
        col_keys: Vec<DiffKey>,
        cells: Vec<Vec<Option<DiffCell<V>>>>,
        corner: Vec<Vec<String>>,
        row_depth: usize,
        col_depth: usize,
    ) -> DiffTable<V> {
        debug_assert_eq!(cells.len(), row_keys.len());
        debug_assert!(cells.iter().all(|row| row.len() == col_keys.len()));
        DiffTable {
            row_keys,
            col_keys,
            cells,
            corner,
            row_depth,
            col_depth,
        }
    }

    pub fn row_keys(&self) -> &[DiffKey] {
        &self.row_keys
    }

    pub fn col_keys(&self) -> &[DiffKey] {
        &self.col_keys
    }

    pub fn cells(&self) -> &[Vec<Option<DiffCell<V>>>] {
        &self.cells
    }

    pub fn corner(&self) -> &[Vec<String>] {
        &self.corner
    }

    pub fn row_depth(&self) -> usize {
        self.row_depth
    }

    pub fn col_depth(&self) -> usize {
        self.col_depth
    }

    pub fn nrows(&self) -> usize {
        self.row_keys.len()
    }

    pub fn ncols(&self) -> usize {
        self.col_keys.len()
    }

    /// Looks up the cell at `(row_key, col_key)`.
    ///
    /// Returns `Ok(None)` for the empty slots described on [`DiffTable`].
    pub fn get(&self, row_key: &Key, col_key: &Key) -> Result<Option<&DiffCell<V>>, TableError> {
        let row = position(&self.row_keys, row_key).ok_or_else(|| TableError::KeyNotFound {
            axis: Axis::Row,
            key: row_key.clone(),
        })?;
        let col = position(&self.col_keys, col_key).ok_or_else(|| TableError::KeyNotFound {
            axis: Axis::Column,
            key: col_key.clone(),
        })?;
        Ok(self.cells[row][col].as_ref())
    }

    pub fn summary(&self) -> DiffSummary {
        let mut summary = DiffSummary::default();
        for key in &self.row_keys {
            match key.status {
                KeyStatus::Added => summary.rows_added += 1,
                KeyStatus::Removed => summary.rows_removed += 1,
                KeyStatus::Both => {}
            }
        }
        for key in &self.col_keys {
            match key.status {
                KeyStatus::Added => summary.cols_added += 1,
                KeyStatus::Removed => summary.cols_removed += 1,
                KeyStatus::Both => {}
            }
        }
        for cell in self.cells.iter().flatten().flatten() {
            match cell {
                DiffCell::Unchanged { .. } => summary.unchanged += 1,
                DiffCell::Changed { .. } => summary.changed += 1,
                DiffCell::Added { .. } => summary.added += 1,
                DiffCell::Removed { .. } => summary.removed += 1,
            }
        }
        summary
    }

    /// True if any cell is not `Unchanged` or any key exists on one side only.
    pub fn has_differences(&self) -> bool {
        self.row_keys
            .iter()
            .chain(self.col_keys.iter())
            .any(|key| key.status != KeyStatus::Both)
            || self
                .cells
                .iter()
                .flatten()
                .flatten()
                .any(|cell| !cell.is_unchanged())
    }
}

impl<V: Clone> DiffTable<V> {
    /// Rebuilds the left-hand table from the keys and values recorded in the diff.
    pub fn left_table(&self) -> Result<TableModel<V>, TableError> {
        self.side_table(DiffKey::in_left, DiffCell::left_value, "left")
    }

    /// Rebuilds the right-hand table from the keys and values recorded in the diff.
    pub fn right_table(&self) -> Result<TableModel<V>, TableError> {
        self.side_table(DiffKey::in_right, DiffCell::right_value, "right")
    }

    fn side_table(
        &self,
        keep: fn(&DiffKey) -> bool,
        value_of: fn(&DiffCell<V>) -> Option<&V>,
        side: &str,
    ) -> Result<TableModel<V>, TableError> {
        let rows: Vec<usize> = (0..self.row_keys.len())
            .filter(|&r| keep(&self.row_keys[r]))
            .collect();
        let cols: Vec<usize> = (0..self.col_keys.len())
            .filter(|&c| keep(&self.col_keys[c]))
            .collect();

        let mut values = Vec::with_capacity(rows.len());
        for &r in &rows {
            let mut row = Vec::with_capacity(cols.len());
            for &c in &cols {
                let value = self.cells[r][c].as_ref().and_then(value_of).ok_or_else(|| {
                    TableError::structure(format!(
                        "diff has no {side} value at row {} column {}",
                        self.row_keys[r].key, self.col_keys[c].key
                    ))
                })?;
                row.push(value.clone());
            }
            values.push(row);
        }

        TableModel::with_depths(
            rows.iter().map(|&r| self.row_keys[r].key.clone()).collect(),
            cols.iter().map(|&c| self.col_keys[c].key.clone()).collect(),
            values,
            self.row_depth,
            self.col_depth,
        )?
        .with_corner(self.corner.clone())
    }
}

fn position(keys: &[DiffKey], key: &Key) -> Option<usize> {
    keys.iter().position(|k| &k.key == key)
}

/// Counts of cells and keys by diff status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DiffSummary {
    pub unchanged: usize,
    pub changed: usize,
    pub added: usize,
    pub removed: usize,
    pub rows_added: usize,
    pub rows_removed: usize,
    pub cols_added: usize,
    pub cols_removed: usize,
}

/// Position of every key in `keys`, for O(1) lookups while diffing.
pub(crate) fn index_keys<'a>(keys: impl Iterator<Item = &'a Key>) -> FxHashMap<&'a Key, usize> {
    keys.enumerate().map(|(pos, key)| (key, pos)).collect()
}
