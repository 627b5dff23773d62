//! Key-based alignment of two tables.
//!
//! Rows and columns are matched by [`Key`] equality, never by position. The
//! union of keys on each axis is the left table's keys in their original
//! order followed by the right-only keys in the right table's order.

use crate::diff::{DiffCell, DiffKey, DiffTable, KeyStatus, index_keys};
use crate::error::TableError;
use crate::key::{Axis, Key};
use crate::table::TableModel;
use log::debug;
use std::fmt::Display;

/// Default cell comparator: values are equal when they compare equal or
/// render to the same text, so every table is unchanged against itself
/// (a `NaN` float included).
pub fn default_value_equals<V: PartialEq + Display>(left: &V, right: &V) -> bool {
    left == right || left.to_string() == right.to_string()
}

/// Diffs `left` against `right` using [`default_value_equals`].
pub fn produce_diff<V: Clone + PartialEq + Display>(
    left: &TableModel<V>,
    right: &TableModel<V>,
) -> Result<DiffTable<V>, TableError> {
    produce_diff_with(left, right, default_value_equals::<V>)
}

/// Diffs `left` against `right`, treating two present values as unchanged
/// when `value_equals(left_value, right_value)` holds.
pub fn produce_diff_with<V, F>(
    left: &TableModel<V>,
    right: &TableModel<V>,
    value_equals: F,
) -> Result<DiffTable<V>, TableError>
where
    V: Clone,
    F: Fn(&V, &V) -> bool,
{
    let row_depth = union_depth(
        (left.row_depth(), left.nrows()),
        (right.row_depth(), right.nrows()),
        Axis::Row,
    )?;
    let col_depth = union_depth(
        (left.col_depth(), left.ncols()),
        (right.col_depth(), right.ncols()),
        Axis::Column,
    )?;

    let rows = union_keys(left.row_keys(), right.row_keys());
    let cols = union_keys(left.col_keys(), right.col_keys());

    let left_rows = index_keys(left.row_keys().iter());
    let left_cols = index_keys(left.col_keys().iter());
    let right_rows = index_keys(right.row_keys().iter());
    let right_cols = index_keys(right.col_keys().iter());

    let mut cells = Vec::with_capacity(rows.len());
    for row in &rows {
        let lr = left_rows.get(&row.key).copied();
        let rr = right_rows.get(&row.key).copied();
        let mut out = Vec::with_capacity(cols.len());
        for col in &cols {
            let lc = left_cols.get(&col.key).copied();
            let rc = right_cols.get(&col.key).copied();
            let left_value = lr.zip(lc).map(|(r, c)| &left.values()[r][c]);
            let right_value = rr.zip(rc).map(|(r, c)| &right.values()[r][c]);
            out.push(classify(left_value, right_value, &value_equals));
        }
        cells.push(out);
    }

    let corner = if left.row_depth() == 0 || left.col_depth() == 0 {
        right.corner()
    } else {
        left.corner()
    };
    let corner = fit_corner(corner.to_vec(), row_depth, col_depth);

    debug!(
        "diffed {}x{} against {}x{} into {}x{}",
        left.nrows(),
        left.ncols(),
        right.nrows(),
        right.ncols(),
        rows.len(),
        cols.len()
    );

    Ok(DiffTable::from_parts(rows, cols, cells, corner, row_depth, col_depth))
}

fn classify<V: Clone>(
    left: Option<&V>,
    right: Option<&V>,
    value_equals: &impl Fn(&V, &V) -> bool,
) -> Option<DiffCell<V>> {
    match (left, right) {
        (Some(l), Some(r)) if value_equals(l, r) => Some(DiffCell::Unchanged { value: l.clone() }),
        (Some(l), Some(r)) => Some(DiffCell::Changed {
            old: l.clone(),
            new: r.clone(),
        }),
        (Some(l), None) => Some(DiffCell::Removed { value: l.clone() }),
        (None, Some(r)) => Some(DiffCell::Added { value: r.clone() }),
        (None, None) => None,
    }
}

fn union_keys(left: &[Key], right: &[Key]) -> Vec<DiffKey> {
    let right_index = index_keys(right.iter());
    let left_index = index_keys(left.iter());

    let mut union = Vec::with_capacity(left.len() + right.len());
    for key in left {
        let status = if right_index.contains_key(key) {
            KeyStatus::Both
        } else {
            KeyStatus::Removed
        };
        union.push(DiffKey::new(key.clone(), status));
    }
    for key in right {
        if !left_index.contains_key(key) {
            union.push(DiffKey::new(key.clone(), KeyStatus::Added));
        }
    }
    union
}

/// Header depth of the union axis; an axis without keys adopts the other side's depth.
fn union_depth(
    (left_depth, left_len): (usize, usize),
    (right_depth, right_len): (usize, usize),
    axis: Axis,
) -> Result<usize, TableError> {
    match (left_len > 0, right_len > 0) {
        (true, true) if left_depth != right_depth => Err(TableError::structure(format!(
            "{axis} headers have {left_depth} levels on the left but {right_depth} on the right"
        ))),
        (true, _) => Ok(left_depth),
        (false, true) => Ok(right_depth),
        (false, false) => Ok(left_depth.max(right_depth)),
    }
}

/// Pads or truncates a corner block to `col_depth` rows of `row_depth` labels.
fn fit_corner(
    mut corner: Vec<Vec<String>>,
    row_depth: usize,
    col_depth: usize,
) -> Vec<Vec<String>> {
    corner.resize_with(col_depth, Vec::new);
    for row in &mut corner {
        row.resize_with(row_depth, String::new);
    }
    corner
}
