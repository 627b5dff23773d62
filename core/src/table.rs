//! In-memory hierarchical tables.
//!
//! A [`TableModel`] holds ordered row keys, ordered column keys, and a dense
//! value matrix indexed by `(row position, column position)`. Tables are built
//! either from explicit keys ([`TableModel::new`]) or by slicing a raw
//! rectangular array into its header and data regions
//! ([`TableModel::from_array`]). Once built a table never changes.

use crate::error::TableError;
use crate::key::{Axis, Key, keys_from_levels};
use rustc_hash::FxHashMap;
use serde::Serialize;

/// An immutable table with multi-level row and column headers.
///
/// # Invariants
///
/// - `values.len() == row_keys.len()` and every value row has `col_keys.len()` entries.
/// - Every row key has `row_depth` labels; every column key has `col_depth` labels.
/// - Keys are unique within each axis.
/// - `corner` is `col_depth` rows of `row_depth` labels.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableModel<V> {
    row_keys: Vec<Key>,
    col_keys: Vec<Key>,
    values: Vec<Vec<V>>,
    corner: Vec<Vec<String>>,
    row_depth: usize,
    col_depth: usize,
    #[serde(skip)]
    row_index: FxHashMap<Key, usize>,
    #[serde(skip)]
    col_index: FxHashMap<Key, usize>,
}

impl<V> TableModel<V> {
    /// Builds a table from explicit keys and a row-major value matrix.
    ///
    /// Header depth on each axis is taken from the keys; an axis without keys
    /// has depth zero. The corner is blank.
    pub fn new(
        row_keys: Vec<Key>,
        col_keys: Vec<Key>,
        values: Vec<Vec<V>>,
    ) -> Result<TableModel<V>, TableError> {
        let row_depth = row_keys.first().map(Key::depth).unwrap_or(0);
        let col_depth = col_keys.first().map(Key::depth).unwrap_or(0);
        TableModel::with_depths(row_keys, col_keys, values, row_depth, col_depth)
    }

    pub(crate) fn with_depths(
        row_keys: Vec<Key>,
        col_keys: Vec<Key>,
        values: Vec<Vec<V>>,
        row_depth: usize,
        col_depth: usize,
    ) -> Result<TableModel<V>, TableError> {
        check_key_depth(&row_keys, row_depth, Axis::Row)?;
        check_key_depth(&col_keys, col_depth, Axis::Column)?;

        if values.len() != row_keys.len() {
            return Err(TableError::structure(format!(
                "value matrix has {} rows but there are {} row keys",
                values.len(),
                row_keys.len()
            )));
        }
        for (idx, row) in values.iter().enumerate() {
            if row.len() != col_keys.len() {
                return Err(TableError::structure(format!(
                    "value row {} has {} entries but there are {} column keys",
                    idx,
                    row.len(),
                    col_keys.len()
                )));
            }
        }

        let row_index = build_index(&row_keys, Axis::Row)?;
        let col_index = build_index(&col_keys, Axis::Column)?;

        Ok(TableModel {
            row_keys,
            col_keys,
            values,
            corner: blank_corner(row_depth, col_depth),
            row_depth,
            col_depth,
            row_index,
            col_index,
        })
    }

    /// Replaces the corner block shown above the row headers.
    ///
    /// The corner must have `col_depth` rows of `row_depth` labels each.
    pub fn with_corner(mut self, corner: Vec<Vec<String>>) -> Result<TableModel<V>, TableError> {
        if corner.len() != self.col_depth || corner.iter().any(|row| row.len() != self.row_depth) {
            return Err(TableError::structure(format!(
                "corner must be {} rows of {} labels",
                self.col_depth, self.row_depth
            )));
        }
        self.corner = corner;
        Ok(self)
    }

    pub fn row_keys(&self) -> &[Key] {
        &self.row_keys
    }

    pub fn col_keys(&self) -> &[Key] {
        &self.col_keys
    }

    pub fn values(&self) -> &[Vec<V>] {
        &self.values
    }

    pub fn corner(&self) -> &[Vec<String>] {
        &self.corner
    }

    /// Number of header levels on the row axis (width of the row-header block).
    pub fn row_depth(&self) -> usize {
        self.row_depth
    }

    /// Number of header levels on the column axis (height of the column-header block).
    pub fn col_depth(&self) -> usize {
        self.col_depth
    }

    pub fn nrows(&self) -> usize {
        self.row_keys.len()
    }

    pub fn ncols(&self) -> usize {
        self.col_keys.len()
    }

    pub fn row_index(&self, key: &Key) -> Option<usize> {
        self.row_index.get(key).copied()
    }

    pub fn col_index(&self, key: &Key) -> Option<usize> {
        self.col_index.get(key).copied()
    }

    /// Looks up the value at `(row_key, col_key)`.
    pub fn get(&self, row_key: &Key, col_key: &Key) -> Result<&V, TableError> {
        let row = self.row_index(row_key).ok_or_else(|| TableError::KeyNotFound {
            axis: Axis::Row,
            key: row_key.clone(),
        })?;
        let col = self.col_index(col_key).ok_or_else(|| TableError::KeyNotFound {
            axis: Axis::Column,
            key: col_key.clone(),
        })?;
        Ok(&self.values[row][col])
    }
}

impl<V: Clone + ToString> TableModel<V> {
    /// Slices a raw rectangular array into corner, row headers, column headers,
    /// and values.
    ///
    /// The top-left `col_depth x row_depth` block is the corner; the left
    /// `row_depth` columns below it give each row's key, the top `col_depth`
    /// rows right of it give each column's key, and the remaining block is the
    /// value matrix. Header labels are the textual form of the array entries.
    pub fn from_array<R: AsRef<[V]>>(
        array: &[R],
        row_depth: usize,
        col_depth: usize,
    ) -> Result<TableModel<V>, TableError> {
        if row_depth == 0 || col_depth == 0 {
            return Err(TableError::structure(format!(
                "header depths must be at least 1 (got row_depth={row_depth}, col_depth={col_depth})"
            )));
        }
        let width = array.first().map(|row| row.as_ref().len()).unwrap_or(0);
        if let Some((idx, row)) = array
            .iter()
            .enumerate()
            .find(|(_, row)| row.as_ref().len() != width)
        {
            return Err(TableError::structure(format!(
                "array row {} has {} entries, expected {}",
                idx,
                row.as_ref().len(),
                width
            )));
        }
        if col_depth > array.len() || row_depth > width {
            return Err(TableError::structure(format!(
                "header depths row_depth={row_depth}, col_depth={col_depth} exceed the {}x{} array",
                array.len(),
                width
            )));
        }

        let (header_rows, body_rows) = array.split_at(col_depth);

        let corner: Vec<Vec<String>> = header_rows
            .iter()
            .map(|row| row.as_ref()[..row_depth].iter().map(V::to_string).collect())
            .collect();
        let col_levels: Vec<Vec<String>> = header_rows
            .iter()
            .map(|row| row.as_ref()[row_depth..].iter().map(V::to_string).collect())
            .collect();
        let col_keys = keys_from_levels(&col_levels);

        let mut row_keys = Vec::with_capacity(body_rows.len());
        let mut values = Vec::with_capacity(body_rows.len());
        for row in body_rows {
            let (labels, data) = row.as_ref().split_at(row_depth);
            row_keys.push(Key::new(labels.iter().map(V::to_string).collect()));
            values.push(data.to_vec());
        }

        TableModel::with_depths(row_keys, col_keys, values, row_depth, col_depth)?
            .with_corner(corner)
    }
}

fn blank_corner(row_depth: usize, col_depth: usize) -> Vec<Vec<String>> {
    vec![vec![String::new(); row_depth]; col_depth]
}

fn check_key_depth(keys: &[Key], depth: usize, axis: Axis) -> Result<(), TableError> {
    for key in keys {
        if key.depth() == 0 {
            return Err(TableError::structure(format!("{axis} key with no labels")));
        }
        if key.depth() != depth {
            return Err(TableError::structure(format!(
                "{axis} key {key} has {} levels but the {axis} headers have {depth}",
                key.depth()
            )));
        }
    }
    Ok(())
}

fn build_index(keys: &[Key], axis: Axis) -> Result<FxHashMap<Key, usize>, TableError> {
    let mut index = FxHashMap::default();
    index.reserve(keys.len());
    for (pos, key) in keys.iter().enumerate() {
        if index.insert(key.clone(), pos).is_some() {
            return Err(TableError::DuplicateKey {
                axis,
                key: key.clone(),
            });
        }
    }
    Ok(index)
}
