mod common;

use common::{assert_uniform_width, grid, sliced, two_by_two};
use table_diff::{
    CellMarkup, RenderConfig, TableModel, diff_table_to_string, diff_table_to_string_with,
    only_the_diffs, produce_diff, table_to_string,
};

#[test]
fn single_cell_change_renders_only_the_changed_cell() {
    let diff = produce_diff(&two_by_two([[3, 4], [5, 6]]), &two_by_two([[3, 4], [5, 7]])).unwrap();
    let text = diff_table_to_string(&only_the_diffs(&diff));

    assert_eq!(
        text,
        "+-----+----------+\n\
         |a |b |b         |\n\
         |c |d |d         |\n\
         +-----+----------+\n\
         |r3|r4|[-6-]{+7+}|\n\
         +-----+----------+\n"
    );
    assert_uniform_width(&text);
}

#[test]
fn sliced_tables_diff_on_mutated_cells() {
    let mut array = grid(&[
        &["a", "b", "c", "x"],
        &["d", "e", "f", "g"],
        &["h", "i", "j", "k"],
        &["x", "y", "z", "z"],
    ]);
    let table1 = TableModel::from_array(&array, 1, 2).unwrap();
    array[3][3] = "l".to_string();
    array[0][2] = "j".to_string();
    let table2 = TableModel::from_array(&array, 1, 2).unwrap();

    let diff = produce_diff(&table1, &table2).unwrap();
    let text = diff_table_to_string(&only_the_diffs(&diff));

    // Renaming column (c,f) to (j,f) removes one column and adds another, so
    // both rows carry a difference; column (b,e) is untouched and dropped.
    assert_eq!(
        text,
        "+-+----------------------+\n\
         |a|[-c-]|x         |{+j+}|\n\
         |d|[-f-]|g         |{+f+}|\n\
         +-+----------------------+\n\
         |h|[-j-]|k         |{+j+}|\n\
         |x|[-z-]|[-z-]{+l+}|{+z+}|\n\
         +-+----------------------+\n"
    );
    assert_uniform_width(&text);
}

#[test]
fn full_diff_marks_added_column_headers() {
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

    let diff = produce_diff(&left, &right).unwrap();
    let text = diff_table_to_string(&diff);
    assert_eq!(
        text,
        "+----+-------------------------------------+\n\
         |    |col1            |col2|col3|{+col2.5+}|\n\
         +----+-------------------------------------+\n\
         |row1|[-m1,1-]{+m1,x+}|m2,1|m3,1|{+m2.5,1+}|\n\
         |row2|m1,2            |m2,2|m3,2|{+m2.5,2+}|\n\
         +----+-------------------------------------+\n"
    );
    assert_uniform_width(&text);

    let inline = RenderConfig::builder()
        .markup(CellMarkup::Inline)
        .build()
        .unwrap();
    let text = diff_table_to_string_with(&only_the_diffs(&diff), &inline);
    assert_eq!(
        text,
        "+----+------------------------+\n\
         |    |col1         |{+col2.5+}|\n\
         +----+------------------------+\n\
         |row1|m1,[-1-]{+x+}|{+m2.5,1+}|\n\
         |row2|m1,2         |{+m2.5,2+}|\n\
         +----+------------------------+\n"
    );
    assert_uniform_width(&text);
}

#[test]
fn plain_table_renders_without_markup() {
    let table = sliced(
        &[
            &[" ", "col1", "col2", "col3"],
            &["row1", "m1,1", "m2,1", "m3,1"],
            &["row2", "m1,2", "m2,2", "m3,2"],
        ],
        1,
        1,
    );

    let text = table_to_string(&table);
    assert_eq!(
        text,
        "+----+--------------+\n\
         |    |col1|col2|col3|\n\
         +----+--------------+\n\
         |row1|m1,1|m2,1|m3,1|\n\
         |row2|m1,2|m2,2|m3,2|\n\
         +----+--------------+\n"
    );
    assert_eq!(text, table_to_string(&table), "rendering is deterministic");
}

#[test]
fn removed_rows_mark_their_labels() {
    let left = sliced(&[&["", "a"], &["r1", "1"], &["r2", "2"]], 1, 1);
    let right = sliced(&[&["", "a"], &["r1", "1"]], 1, 1);

    let text = diff_table_to_string(&only_the_diffs(&produce_diff(&left, &right).unwrap()));
    assert_eq!(
        text,
        "+------+-----+\n\
         |      |a    |\n\
         +------+-----+\n\
         |[-r2-]|[-2-]|\n\
         +------+-----+\n"
    );
}

#[test]
fn empty_filtered_diff_keeps_header_block() {
    let table = two_by_two([[3, 4], [5, 6]]);
    let text = diff_table_to_string(&only_the_diffs(&produce_diff(&table, &table).unwrap()));
    assert_eq!(text, "+---+\n|a|b|\n|c|d|\n+---+\n+---+\n");
    assert_uniform_width(&text);
}

#[test]
fn wide_values_widen_their_column_everywhere() {
    let table = sliced(
        &[
            &["", "short"],
            &["x", "a much longer value"],
            &["y", "1"],
        ],
        1,
        1,
    );
    let text = table_to_string(&table);
    assert_uniform_width(&text);
    assert!(text.contains("|x|a much longer value|\n"));
    assert!(text.contains("|y|1                  |\n"));
    assert!(text.contains("| |short              |\n"));
}

#[test]
fn multi_byte_labels_are_measured_in_characters() {
    let table = sliced(&[&["", "größe"], &["ü", "1"]], 1, 1);
    let text = table_to_string(&table);
    assert_uniform_width(&text);
    assert!(text.contains("|ü|1    |\n"), "{text}");
}
