//! Common test utilities shared across integration tests.

#![allow(dead_code)]

use table_diff::{Key, TableModel, keys_from_levels};

/// Builds keys from row-major label lists, one list per key.
pub fn keys(labels: &[&[&str]]) -> Vec<Key> {
    labels.iter().map(|l| Key::from(*l)).collect()
}

pub fn key(labels: &[&str]) -> Key {
    Key::from(labels)
}

/// The 2x2 table from the single-cell-change scenario: row keys `(r1,r2)` and
/// `(r3,r4)`, column keys `(a,c)` and `(b,d)`, corner `[[a,b],[c,d]]`.
pub fn two_by_two(values: [[i32; 2]; 2]) -> TableModel<i32> {
    let levels = vec![vec!["a", "b"], vec!["c", "d"]];
    TableModel::new(
        keys(&[&["r1", "r2"], &["r3", "r4"]]),
        keys_from_levels(&levels),
        values.iter().map(|row| row.to_vec()).collect(),
    )
    .expect("valid 2x2 table")
    .with_corner(vec![
        vec!["a".to_string(), "b".to_string()],
        vec!["c".to_string(), "d".to_string()],
    ])
    .expect("corner matches header depths")
}

pub fn grid(rows: &[&[&str]]) -> Vec<Vec<String>> {
    rows.iter()
        .map(|row| row.iter().map(|s| s.to_string()).collect())
        .collect()
}

pub fn sliced(rows: &[&[&str]], row_depth: usize, col_depth: usize) -> TableModel<String> {
    TableModel::from_array(&grid(rows), row_depth, col_depth).unwrap_or_else(|e| {
        panic!("failed to slice table: {e}");
    })
}

/// Asserts every line of a rendered grid has the same width and that every
/// `|`-delimited field on content lines lines up with the separator's columns.
pub fn assert_uniform_width(text: &str) {
    let lines: Vec<&str> = text.lines().collect();
    assert!(!lines.is_empty(), "rendered text is empty");
    let width = lines[0].chars().count();
    for line in &lines {
        assert_eq!(
            line.chars().count(),
            width,
            "line {line:?} differs in width from {:?}",
            lines[0]
        );
    }
    let field_starts = |line: &str, delim: char| -> Vec<usize> {
        line.chars()
            .enumerate()
            .filter(|(_, c)| *c == delim)
            .map(|(i, _)| i)
            .collect()
    };
    let content: Vec<&&str> = lines.iter().filter(|l| l.starts_with('|')).collect();
    if let Some(first) = content.first() {
        let bars = field_starts(first, '|');
        for line in &content {
            assert_eq!(field_starts(line, '|'), bars, "misaligned fields in {line:?}");
        }
    }
}
