//! Fixed-width text rendering of tables and diffs.
//!
//! The grid has two sections: the row-header block (corner plus row labels)
//! on the left and the data block on the right. Separator lines put a `+` at
//! each section boundary:
//!
//! ```text
//! +-----+----------+
//! |a |b |b         |
//! |c |d |d         |
//! +-----+----------+
//! |r3|r4|[-6-]{+7+}|
//! +-----+----------+
//! ```

use crate::config::{CellMarkup, RenderConfig};
use crate::diff::{DiffCell, DiffTable, KeyStatus};
use crate::table::TableModel;
use similar::{ChangeTag, TextDiff};
use std::fmt::Display;

/// Renders a diff with whole-value markup.
pub fn diff_table_to_string<V: Display>(diff: &DiffTable<V>) -> String {
    diff_table_to_string_with(diff, &RenderConfig::default())
}

pub fn diff_table_to_string_with<V: Display>(diff: &DiffTable<V>, config: &RenderConfig) -> String {
    TextGrid::from_diff(diff, config.markup).render()
}

/// Renders a plain table; no cell carries markup.
pub fn table_to_string<V: Display>(table: &TableModel<V>) -> String {
    TextGrid::from_table(table).render()
}

/// Text form of one diff cell.
pub fn render_cell<V: Display>(cell: &DiffCell<V>, markup: CellMarkup) -> String {
    match cell {
        DiffCell::Unchanged { value } => value.to_string(),
        DiffCell::Changed { old, new } => match markup {
            CellMarkup::Whole => format!("[-{}-]{{+{}+}}", old, new),
            CellMarkup::Inline => inline_change(&old.to_string(), &new.to_string()),
        },
        DiffCell::Added { value } => format!("{{+{}+}}", value),
        DiffCell::Removed { value } => format!("[-{}-]", value),
    }
}

/// Header label with the markup of its key's status.
pub(crate) fn mark_label(label: &str, status: KeyStatus) -> String {
    match status {
        KeyStatus::Both => label.to_string(),
        KeyStatus::Added => format!("{{+{}+}}", label),
        KeyStatus::Removed => format!("[-{}-]", label),
    }
}

fn inline_change(old: &str, new: &str) -> String {
    let mut out = String::with_capacity(old.len() + new.len() + 8);
    for (tag, text) in change_segments(old, new) {
        match tag {
            ChangeTag::Equal => out.push_str(&text),
            ChangeTag::Delete => out.push_str(&format!("[-{}-]", text)),
            ChangeTag::Insert => out.push_str(&format!("{{+{}+}}", text)),
        }
    }
    out
}

/// Character-level diff of `old` against `new`, with consecutive changes of
/// the same kind merged into one segment.
pub(crate) fn change_segments(old: &str, new: &str) -> Vec<(ChangeTag, String)> {
    let diff = TextDiff::from_chars(old, new);
    let mut segments: Vec<(ChangeTag, String)> = Vec::new();

    for change in diff.iter_all_changes() {
        let tag = change.tag();
        match segments.last_mut() {
            Some((last, text)) if *last == tag => text.push_str(change.value()),
            _ => segments.push((tag, change.value().to_string())),
        }
    }
    segments
}

/// Already-rendered cell texts laid out by section.
struct TextGrid {
    /// `col_depth` rows of `row_depth` labels.
    corner: Vec<Vec<String>>,
    /// One entry per data row, `row_depth` labels each.
    row_labels: Vec<Vec<String>>,
    /// One entry per header level, one label per data column.
    col_labels: Vec<Vec<String>>,
    cells: Vec<Vec<String>>,
    row_depth: usize,
}

impl TextGrid {
    fn from_diff<V: Display>(diff: &DiffTable<V>, markup: CellMarkup) -> TextGrid {
        let row_labels = diff
            .row_keys()
            .iter()
            .map(|k| {
                (0..diff.row_depth())
                    .map(|level| mark_label(k.key.label(level), k.status))
                    .collect()
            })
            .collect();
        let col_labels = (0..diff.col_depth())
            .map(|level| {
                diff.col_keys()
                    .iter()
                    .map(|k| mark_label(k.key.label(level), k.status))
                    .collect()
            })
            .collect();
        let cells = diff
            .cells()
            .iter()
            .map(|row| {
                row.iter()
                    .map(|cell| {
                        cell.as_ref()
                            .map(|cell| render_cell(cell, markup))
                            .unwrap_or_default()
                    })
                    .collect()
            })
            .collect();

        TextGrid {
            corner: diff.corner().to_vec(),
            row_labels,
            col_labels,
            cells,
            row_depth: diff.row_depth(),
        }
    }

    fn from_table<V: Display>(table: &TableModel<V>) -> TextGrid {
        TextGrid {
            corner: table.corner().to_vec(),
            row_labels: table
                .row_keys()
                .iter()
                .map(|k| k.labels().to_vec())
                .collect(),
            col_labels: (0..table.col_depth())
                .map(|level| {
                    table
                        .col_keys()
                        .iter()
                        .map(|k| k.label(level).to_string())
                        .collect()
                })
                .collect(),
            cells: table
                .values()
                .iter()
                .map(|row| row.iter().map(|v| v.to_string()).collect())
                .collect(),
            row_depth: table.row_depth(),
        }
    }

    fn render(&self) -> String {
        let ncols = self.col_labels.first().map(Vec::len).unwrap_or_else(|| {
            self.cells.first().map(Vec::len).unwrap_or(0)
        });

        let mut left_widths = vec![0usize; self.row_depth];
        for labels in self.corner.iter().chain(self.row_labels.iter()) {
            widen(&mut left_widths, labels);
        }
        let mut data_widths = vec![0usize; ncols];
        for labels in self.col_labels.iter().chain(self.cells.iter()) {
            widen(&mut data_widths, labels);
        }

        let separator = separator_line(&[left_widths.as_slice(), data_widths.as_slice()]);
        let mut out = String::new();

        out.push_str(&separator);
        for (level, labels) in self.col_labels.iter().enumerate() {
            let corner = self.corner.get(level).map(Vec::as_slice).unwrap_or(&[]);
            push_row(&mut out, corner, &left_widths, labels, &data_widths);
        }
        out.push_str(&separator);
        for (labels, cells) in self.row_labels.iter().zip(self.cells.iter()) {
            push_row(&mut out, labels, &left_widths, cells, &data_widths);
        }
        out.push_str(&separator);
        out
    }
}

fn text_width(text: &str) -> usize {
    text.chars().count()
}

fn widen(widths: &mut [usize], texts: &[String]) {
    for (width, text) in widths.iter_mut().zip(texts) {
        *width = (*width).max(text_width(text));
    }
}

fn separator_line(sections: &[&[usize]]) -> String {
    let mut line = String::from("+");
    for widths in sections.iter().filter(|w| !w.is_empty()) {
        let inner = widths.iter().sum::<usize>() + widths.len() - 1;
        line.push_str(&"-".repeat(inner));
        line.push('+');
    }
    line.push('\n');
    line
}

fn push_row(
    out: &mut String,
    left: &[String],
    left_widths: &[usize],
    data: &[String],
    data_widths: &[usize],
) {
    out.push('|');
    for (idx, width) in left_widths.iter().enumerate() {
        push_field(out, left.get(idx).map(String::as_str).unwrap_or(""), *width);
    }
    for (idx, width) in data_widths.iter().enumerate() {
        push_field(out, data.get(idx).map(String::as_str).unwrap_or(""), *width);
    }
    out.push('\n');
}

fn push_field(out: &mut String, text: &str, width: usize) {
    out.push_str(&format!("{:<width$}|", text, width = width));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whole_markup_wraps_full_values() {
        let cell = DiffCell::Changed { old: 6, new: 7 };
        assert_eq!(render_cell(&cell, CellMarkup::Whole), "[-6-]{+7+}");
        assert_eq!(render_cell(&DiffCell::Added { value: "x" }, CellMarkup::Whole), "{+x+}");
        assert_eq!(render_cell(&DiffCell::Removed { value: "x" }, CellMarkup::Whole), "[-x-]");
        assert_eq!(render_cell(&DiffCell::Unchanged { value: "x" }, CellMarkup::Inline), "x");
    }

    #[test]
    fn inline_markup_marks_changed_characters() {
        assert_eq!(inline_change("m1,1", "m1,x"), "m1,[-1-]{+x+}");
        assert_eq!(inline_change("c21", "c21Diff"), "c21{+Diff+}");
        assert_eq!(inline_change("m32", "mD32iff"), "m{+D+}32{+iff+}");
        assert_eq!(inline_change("same", "same"), "same");
        assert_eq!(inline_change("", "new"), "{+new+}");
    }

    #[test]
    fn separator_skips_empty_sections() {
        let none: &[usize] = &[];
        let corner: &[usize] = &[2, 2];
        let narrow: &[usize] = &[1];
        let data: &[usize] = &[5, 10, 5];
        assert_eq!(separator_line(&[corner, none]), "+-----+\n");
        assert_eq!(separator_line(&[narrow, data]), "+-+----------------------+\n");
        assert_eq!(separator_line(&[none, none]), "+\n");
    }

    #[test]
    fn labels_follow_key_status() {
        assert_eq!(mark_label("col", KeyStatus::Both), "col");
        assert_eq!(mark_label("col", KeyStatus::Added), "{+col+}");
        assert_eq!(mark_label("col", KeyStatus::Removed), "[-col-]");
    }
}
