//! Projection of a diff onto the rows and columns that changed.

use crate::diff::{DiffCell, DiffKey, DiffTable, KeyStatus};
use log::debug;

/// Keeps only rows and columns that carry a difference.
///
/// A row is kept if it is itself added or removed, or if any of its cells is
/// not `Unchanged`; columns follow the same rule. Header depths and the corner
/// are always kept, so a diff with no differences filters to a valid table
/// with zero rows and zero columns.
pub fn only_the_diffs<V: Clone>(diff: &DiffTable<V>) -> DiffTable<V> {
    let cells = diff.cells();

    let rows: Vec<usize> = (0..diff.nrows())
        .filter(|&r| {
            is_tagged(&diff.row_keys()[r]) || cells[r].iter().any(is_difference)
        })
        .collect();
    let cols: Vec<usize> = (0..diff.ncols())
        .filter(|&c| {
            is_tagged(&diff.col_keys()[c]) || cells.iter().any(|row| is_difference(&row[c]))
        })
        .collect();

    debug!(
        "kept {} of {} rows and {} of {} columns",
        rows.len(),
        diff.nrows(),
        cols.len(),
        diff.ncols()
    );

    let kept_cells = rows
        .iter()
        .map(|&r| cols.iter().map(|&c| cells[r][c].clone()).collect())
        .collect();

    DiffTable::from_parts(
        rows.iter().map(|&r| diff.row_keys()[r].clone()).collect(),
        cols.iter().map(|&c| diff.col_keys()[c].clone()).collect(),
        kept_cells,
        diff.corner().to_vec(),
        diff.row_depth(),
        diff.col_depth(),
    )
}

fn is_tagged(key: &DiffKey) -> bool {
    key.status != KeyStatus::Both
}

fn is_difference<V>(cell: &Option<DiffCell<V>>) -> bool {
    cell.as_ref().is_some_and(|cell| !cell.is_unchanged())
}
