use anyhow::{Context, Result, bail};
use serde_json::Value;
use std::fs;
use table_diff::TableModel;

/// Reads a JSON array of rows and slices it into a table.
///
/// Strings are taken as is, numbers and booleans use their JSON text, and
/// `null` becomes an empty cell.
pub fn load_table(path: &str, row_depth: usize, col_depth: usize) -> Result<TableModel<String>> {
    let text = fs::read_to_string(path).with_context(|| format!("Failed to read table: {}", path))?;
    let rows = parse_rows(&text).with_context(|| format!("Failed to parse table: {}", path))?;
    let table = TableModel::from_array(&rows, row_depth, col_depth)
        .with_context(|| format!("Invalid table layout: {}", path))?;
    log::debug!("loaded {} ({}x{})", path, table.nrows(), table.ncols());
    Ok(table)
}

fn parse_rows(text: &str) -> Result<Vec<Vec<String>>> {
    let value: Value = serde_json::from_str(text)?;
    let Value::Array(rows) = value else {
        bail!("expected a JSON array of rows");
    };

    rows.into_iter()
        .enumerate()
        .map(|(idx, row)| match row {
            Value::Array(cells) => cells
                .into_iter()
                .map(|cell| scalar_text(cell).with_context(|| format!("row {}", idx)))
                .collect(),
            _ => bail!("row {} is not an array", idx),
        })
        .collect()
}

fn scalar_text(cell: Value) -> Result<String> {
    match cell {
        Value::String(s) => Ok(s),
        Value::Null => Ok(String::new()),
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        Value::Array(_) | Value::Object(_) => bail!("cells must be strings, numbers, booleans or null"),
    }
}
