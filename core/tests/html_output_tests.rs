mod common;

use common::{sliced, two_by_two};
use std::fs;
use table_diff::{
    RenderConfig, TableError, diff_table_to_html, produce_diff, write_diff_and_context,
    write_diff_and_context_with,
};

fn demo_diff() -> table_diff::DiffTable<String> {
    let left = sliced(
        &[
            &[" ", "col1", "col2", "col3"],
            &["row1", "m1,1", "m2,1", "m3,1"],
            &["row2", "m1,2", "m2,2", "m3,2"],
        ],
        1,
        1,
    );
    let right = sliced(
        &[
            &[" ", "col1", "col2", "col2.5", "col3"],
            &["row1", "m1,x", "m2,1", "m2.5,1", "m3,1"],
            &["row2", "m1,2", "m2,2", "m2.5,2", "m3,2"],
        ],
        1,
        1,
    );
    produce_diff(&left, &right).unwrap()
}

#[test]
fn writes_report_into_new_nested_directory() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let dir = tmp.path().join("reports").join("nested");

    let path = write_diff_and_context("TableDiffDemo", &dir, &demo_diff()).expect("write report");

    assert_eq!(path, dir.join("TableDiffDemo.html"));
    let html = fs::read_to_string(&path).expect("read report");
    assert!(html.starts_with("<!doctype html>"));
    assert!(html.contains("<title>TableDiffDemo</title>"));
    assert!(html.contains("<span class=\"rm\">m1,1</span><span class=\"add\">m1,x</span>"));
    assert!(html.contains("<th class=\"col col-added\">col2.5</th>"));
    assert!(html.contains("<h2>Context</h2>"));
    assert!(html.contains("<h2>Left</h2>"));
    assert!(html.contains("<h2>Right</h2>"));
    // Unchanged columns only appear through the full diff and the context tables.
    assert!(html.contains("m3,2"));

    let leftovers: Vec<_> = fs::read_dir(&dir)
        .unwrap()
        .map(|entry| entry.unwrap().file_name())
        .collect();
    assert_eq!(leftovers.len(), 1, "temporary files left behind: {leftovers:?}");
}

#[test]
fn rewriting_a_report_replaces_it() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let first = produce_diff(&two_by_two([[1, 2], [3, 4]]), &two_by_two([[1, 2], [3, 5]])).unwrap();
    let second = produce_diff(&two_by_two([[1, 2], [3, 4]]), &two_by_two([[9, 2], [3, 4]])).unwrap();

    write_diff_and_context("report", tmp.path(), &first).unwrap();
    let path = write_diff_and_context("report", tmp.path(), &second).unwrap();

    let html = fs::read_to_string(path).unwrap();
    assert!(html.contains("<span class=\"add\">9</span>"));
    assert!(!html.contains("<span class=\"add\">5</span>"));
}

#[test]
fn compact_config_omits_context_sections() {
    let config = RenderConfig::builder()
        .title("Nightly <check>")
        .include_context(false)
        .include_full_diff(false)
        .build()
        .unwrap();

    let html = diff_table_to_html("nightly", &demo_diff(), &config).unwrap();
    assert!(html.contains("<title>Nightly &lt;check&gt;</title>"));
    assert!(!html.contains("<h2>Context</h2>"));
    assert!(!html.contains("<h2>Full comparison</h2>"));
    assert!(!html.contains("m3,2"), "unchanged column should be filtered out");
}

#[test]
fn identical_tables_report_no_differences() {
    let table = two_by_two([[1, 2], [3, 4]]);
    let diff = produce_diff(&table, &table).unwrap();
    let html = diff_table_to_html("same", &diff, &RenderConfig::default()).unwrap();
    assert!(html.contains("No differences found."));
}

#[test]
fn cell_text_is_escaped() {
    let left = sliced(&[&["", "<col>"], &["r&1", "a<b"]], 1, 1);
    let right = sliced(&[&["", "<col>"], &["r&1", "a>b"]], 1, 1);
    let diff = produce_diff(&left, &right).unwrap();

    let html = diff_table_to_html("escape", &diff, &RenderConfig::default()).unwrap();
    assert!(html.contains("&lt;col&gt;"));
    assert!(html.contains("r&amp;1"));
    assert!(html.contains("<span class=\"rm\">a&lt;b</span>"));
    assert!(!html.contains("<col>"));
}

#[test]
fn invalid_name_is_report_write_error() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let err = write_diff_and_context("../escape", tmp.path(), &demo_diff())
        .expect_err("name with a path separator");
    assert!(matches!(err, TableError::ReportWrite { .. }), "{err}");
    assert_eq!(err.code(), "TDIFF_REPORT_001");
}

#[test]
fn unwritable_directory_is_report_write_error() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let blocker = tmp.path().join("not-a-dir");
    fs::write(&blocker, "file in the way").unwrap();

    let err = write_diff_and_context("report", blocker.join("sub"), &demo_diff())
        .expect_err("parent is a file");
    assert!(matches!(err, TableError::ReportWrite { .. }), "{err}");
    assert!(!blocker.join("sub").exists());
}

#[cfg(unix)]
#[test]
fn report_is_readable_by_group_and_others() {
    use std::os::unix::fs::PermissionsExt;

    let tmp = tempfile::tempdir().expect("tempdir");
    let path = write_diff_and_context("shared", tmp.path(), &demo_diff()).expect("write report");

    let mode = fs::metadata(&path).expect("metadata").permissions().mode() & 0o777;
    assert_eq!(mode, 0o644);
}
