//! HTML diff reports.
//!
//! A report is a single self-contained document holding the filtered diff
//! grid, optionally the full diff grid, and the left and right tables as
//! context. Files are written atomically: the document goes to a temporary
//! file in the output directory and is renamed into place once complete.

use crate::config::{CellMarkup, RenderConfig};
use crate::diff::{DiffCell, DiffTable, KeyStatus};
use crate::error::TableError;
use crate::filter::only_the_diffs;
use crate::output::text::change_segments;
use crate::table::TableModel;
use log::info;
use similar::ChangeTag;
use std::fmt::Display;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

const STYLE: &str = r#":root{
  --bg:#ffffff;
  --panel:#f6f8fa;
  --border:#d0d7de;
  --text:#1f2328;
  --muted:#656d76;
  --mono:ui-monospace,"SFMono-Regular",Menlo,Consolas,"Liberation Mono",monospace;
  --sans:system-ui,-apple-system,"Segoe UI",Arial,sans-serif;
  --add-bg:rgba(46,160,67,.18);
  --add-br:rgba(46,160,67,.45);
  --rm-bg:rgba(248,81,73,.18);
  --rm-br:rgba(248,81,73,.45);
  --edit-bg:rgba(210,153,34,.22);
  --edit-br:rgba(210,153,34,.50);
}
body{margin:0;background:var(--bg);color:var(--text);font-family:var(--sans);}
.wrap{padding:12px;}
h1{font-size:16px;margin:0 0 8px 0;}
h2{font-size:13px;margin:16px 0 6px 0;color:var(--muted);text-transform:uppercase;letter-spacing:.3px;}
.meta{font-family:var(--mono);font-size:12px;color:var(--muted);}
.cols{display:grid;grid-template-columns:1fr 1fr;gap:12px;}
@media (max-width:1100px){.cols{grid-template-columns:1fr;}}
.card{background:var(--panel);border:1px solid var(--border);border-radius:8px;padding:10px;min-width:0;overflow:auto;}
.note{font-size:12px;color:var(--muted);}
table{border-collapse:collapse;font-family:var(--mono);font-size:12px;}
th,td{border:1px solid var(--border);padding:3px 6px;white-space:nowrap;text-align:left;}
th{background:var(--panel);}
th.corner{color:var(--muted);}
.col-added,.row-added,.cell-added{background:var(--add-bg);}
.col-removed,.row-removed,.cell-removed{background:var(--rm-bg);}
.cell-edited{background:var(--edit-bg);box-shadow:inset 0 0 0 1px var(--edit-br);}
span.add{background:var(--add-bg);border-bottom:1px solid var(--add-br);}
span.rm{background:var(--rm-bg);border-bottom:1px solid var(--rm-br);text-decoration:line-through;}
.legend{display:flex;gap:10px;margin-top:10px;font-size:12px;color:var(--muted);}
.legend .item{display:flex;gap:6px;align-items:center;}
.swatch{width:12px;height:12px;border-radius:3px;border:1px solid var(--border);}
.sw-add{background:var(--add-bg);border-color:var(--add-br);}
.sw-rm{background:var(--rm-bg);border-color:var(--rm-br);}
.sw-edit{background:var(--edit-bg);border-color:var(--edit-br);}
"#;

/// Writes `<output_dir>/<name>.html` with the diff and its context using the
/// default [`RenderConfig`]. Returns the path of the written file.
pub fn write_diff_and_context<V: Display + Clone>(
    name: &str,
    output_dir: impl AsRef<Path>,
    diff: &DiffTable<V>,
) -> Result<PathBuf, TableError> {
    write_diff_and_context_with(name, output_dir, diff, &RenderConfig::default())
}

pub fn write_diff_and_context_with<V: Display + Clone>(
    name: &str,
    output_dir: impl AsRef<Path>,
    diff: &DiffTable<V>,
    config: &RenderConfig,
) -> Result<PathBuf, TableError> {
    let output_dir = output_dir.as_ref();
    check_report_name(name, output_dir)?;

    let html = diff_table_to_html(name, diff, config)?;

    fs::create_dir_all(output_dir).map_err(|e| TableError::report_write(output_dir, e))?;
    let path = output_dir.join(format!("{name}.html"));

    let mut tmp = NamedTempFile::new_in(output_dir).map_err(|e| TableError::report_write(&path, e))?;
    publish_permissions(&tmp).map_err(|e| TableError::report_write(&path, e))?;
    tmp.write_all(html.as_bytes())
        .and_then(|()| tmp.flush())
        .map_err(|e| TableError::report_write(&path, e))?;
    tmp.persist(&path)
        .map_err(|e| TableError::report_write(&path, e.error))?;

    info!("wrote diff report to {}", path.display());
    Ok(path)
}

/// Temp files start out owner-only; reports are meant to be shared.
#[cfg(unix)]
fn publish_permissions(tmp: &NamedTempFile) -> io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    tmp.as_file().set_permissions(fs::Permissions::from_mode(0o644))
}

#[cfg(not(unix))]
fn publish_permissions(_tmp: &NamedTempFile) -> io::Result<()> {
    Ok(())
}

/// Builds the report document without touching the file system.
pub fn diff_table_to_html<V: Display + Clone>(
    name: &str,
    diff: &DiffTable<V>,
    config: &RenderConfig,
) -> Result<String, TableError> {
    let title = config.title.as_deref().unwrap_or(name);
    let summary = diff.summary();
    let filtered = only_the_diffs(diff);

    let mut html = String::new();
    html.push_str("<!doctype html><html><head><meta charset=\"utf-8\" />");
    html.push_str("<meta name=\"viewport\" content=\"width=device-width,initial-scale=1\" />");
    html.push_str(&format!("<title>{}</title>", escape_html(title)));
    html.push_str("<style>");
    html.push_str(STYLE);
    html.push_str("</style></head><body><div class=\"wrap\">");
    html.push_str(&format!("<h1>{}</h1>", escape_html(title)));
    html.push_str(&format!(
        "<div class=\"meta\">{} changed | {} added | {} removed | {} unchanged cells</div>",
        summary.changed, summary.added, summary.removed, summary.unchanged
    ));

    html.push_str("<h2>Differences</h2><div class=\"card\">");
    if filtered.nrows() == 0 && filtered.ncols() == 0 {
        html.push_str("<div class=\"note\">No differences found.</div>");
    } else {
        render_diff_grid(&mut html, &filtered, config.markup);
    }
    html.push_str("</div>");

    if config.include_full_diff {
        html.push_str("<h2>Full comparison</h2><div class=\"card\">");
        render_diff_grid(&mut html, diff, config.markup);
        html.push_str("</div>");
    }

    if config.include_context {
        let left = diff.left_table()?;
        let right = diff.right_table()?;
        html.push_str("<h2>Context</h2><div class=\"cols\">");
        render_context_card(&mut html, "Left", &left);
        render_context_card(&mut html, "Right", &right);
        html.push_str("</div>");
    }

    html.push_str(
        r#"<div class="legend">
  <div class="item"><span class="swatch sw-add"></span><span>added</span></div>
  <div class="item"><span class="swatch sw-rm"></span><span>removed</span></div>
  <div class="item"><span class="swatch sw-edit"></span><span>changed</span></div>
</div>"#,
    );
    html.push_str("</div></body></html>\n");
    Ok(html)
}

fn check_report_name(name: &str, output_dir: &Path) -> Result<(), TableError> {
    let invalid = name.trim().is_empty()
        || name == "."
        || name == ".."
        || name.contains(|c: char| c == '/' || c == '\\');
    if invalid {
        return Err(TableError::report_write(
            output_dir.join(name),
            io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("report name '{name}' must be a plain file name"),
            ),
        ));
    }
    Ok(())
}

fn render_diff_grid<V: Display>(out: &mut String, diff: &DiffTable<V>, markup: CellMarkup) {
    out.push_str("<table><thead>");
    for level in 0..diff.col_depth() {
        out.push_str("<tr>");
        push_corner_row(out, diff.corner(), level, diff.row_depth());
        for key in diff.col_keys() {
            out.push_str(&format!(
                "<th class=\"{}\">{}</th>",
                status_class("col", key.status),
                escape_html(key.key.label(level))
            ));
        }
        out.push_str("</tr>");
    }
    out.push_str("</thead><tbody>");

    for (key, row) in diff.row_keys().iter().zip(diff.cells()) {
        out.push_str("<tr>");
        for level in 0..diff.row_depth() {
            out.push_str(&format!(
                "<th class=\"{}\">{}</th>",
                status_class("row", key.status),
                escape_html(key.key.label(level))
            ));
        }
        for cell in row {
            match cell {
                Some(cell) => {
                    let (class, body) = render_cell_html(cell, markup);
                    out.push_str(&format!("<td class=\"{}\">{}</td>", class, body));
                }
                None => out.push_str("<td class=\"cell-empty\"></td>"),
            }
        }
        out.push_str("</tr>");
    }
    out.push_str("</tbody></table>");
}

fn render_context_card<V: Display>(out: &mut String, label: &str, table: &TableModel<V>) {
    out.push_str("<div class=\"card\">");
    out.push_str(&format!(
        "<h2>{}</h2><div class=\"meta\">{} rows x {} columns</div>",
        escape_html(label),
        table.nrows(),
        table.ncols()
    ));
    out.push_str("<table><thead>");
    for level in 0..table.col_depth() {
        out.push_str("<tr>");
        push_corner_row(out, table.corner(), level, table.row_depth());
        for key in table.col_keys() {
            out.push_str(&format!("<th class=\"col\">{}</th>", escape_html(key.label(level))));
        }
        out.push_str("</tr>");
    }
    out.push_str("</thead><tbody>");
    for (key, row) in table.row_keys().iter().zip(table.values()) {
        out.push_str("<tr>");
        for label in key.labels() {
            out.push_str(&format!("<th class=\"row\">{}</th>", escape_html(label)));
        }
        for value in row {
            out.push_str(&format!("<td>{}</td>", escape_html(&value.to_string())));
        }
        out.push_str("</tr>");
    }
    out.push_str("</tbody></table></div>");
}

fn push_corner_row(out: &mut String, corner: &[Vec<String>], level: usize, row_depth: usize) {
    let labels = corner.get(level);
    for idx in 0..row_depth {
        let label = labels.and_then(|l| l.get(idx)).map(String::as_str).unwrap_or("");
        out.push_str(&format!("<th class=\"corner\">{}</th>", escape_html(label)));
    }
}

fn status_class(prefix: &str, status: KeyStatus) -> String {
    match status {
        KeyStatus::Both => prefix.to_string(),
        KeyStatus::Added => format!("{prefix} {prefix}-added"),
        KeyStatus::Removed => format!("{prefix} {prefix}-removed"),
    }
}

fn render_cell_html<V: Display>(cell: &DiffCell<V>, markup: CellMarkup) -> (&'static str, String) {
    match cell {
        DiffCell::Unchanged { value } => ("cell", escape_html(&value.to_string())),
        DiffCell::Added { value } => ("cell-added", added_span(&value.to_string())),
        DiffCell::Removed { value } => ("cell-removed", removed_span(&value.to_string())),
        DiffCell::Changed { old, new } => {
            let (old, new) = (old.to_string(), new.to_string());
            let body = match markup {
                CellMarkup::Whole => format!("{}{}", removed_span(&old), added_span(&new)),
                CellMarkup::Inline => change_segments(&old, &new)
                    .iter()
                    .map(|(tag, text)| match tag {
                        ChangeTag::Equal => escape_html(text),
                        ChangeTag::Delete => removed_span(text),
                        ChangeTag::Insert => added_span(text),
                    })
                    .collect(),
            };
            ("cell-edited", body)
        }
    }
}

fn added_span(text: &str) -> String {
    format!("<span class=\"add\">{}</span>", escape_html(text))
}

fn removed_span(text: &str) -> String {
    format!("<span class=\"rm\">{}</span>", escape_html(text))
}

pub(crate) fn escape_html(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_markup_characters() {
        assert_eq!(escape_html("<a href='x'>&\"</a>"), "&lt;a href=&#39;x&#39;&gt;&amp;&quot;&lt;/a&gt;");
    }

    #[test]
    fn report_names_must_be_plain_file_names() {
        let dir = Path::new("out");
        for name in ["", "  ", ".", "..", "a/b", "a\\b"] {
            let err = check_report_name(name, dir).expect_err("name should be rejected");
            assert!(matches!(err, TableError::ReportWrite { .. }), "{name}: {err}");
        }
        assert!(check_report_name("TableDiffDemo", dir).is_ok());
    }

    #[test]
    fn inline_changed_cell_uses_spans_per_segment() {
        let cell = DiffCell::Changed {
            old: "m1,1",
            new: "m1,x",
        };
        let (class, body) = render_cell_html(&cell, CellMarkup::Inline);
        assert_eq!(class, "cell-edited");
        assert_eq!(
            body,
            "m1,<span class=\"rm\">1</span><span class=\"add\">x</span>"
        );
    }
}
