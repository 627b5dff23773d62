use crate::input::load_table;
use anyhow::Result;
use std::io::{self, Write};
use std::process::ExitCode;
use table_diff::table_to_string;

pub fn run(path: &str, row_depth: usize, col_depth: usize) -> Result<ExitCode> {
    let table = load_table(path, row_depth, col_depth)?;

    let stdout = io::stdout();
    let mut handle = stdout.lock();
    write!(handle, "{}", table_to_string(&table))?;
    handle.flush()?;

    Ok(ExitCode::SUCCESS)
}
