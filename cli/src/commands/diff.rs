use crate::OutputFormat;
use crate::input::load_table;
use anyhow::{Context, Result};
use std::io::{self, Write};
use std::process::ExitCode;
use table_diff::{
    CellMarkup, DiffTable, RenderConfig, diff_table_to_string_with, only_the_diffs, produce_diff,
    produce_diff_with, serialize_diff_table, write_diff_and_context_with,
};

pub struct DiffArgs<'a> {
    pub left: &'a str,
    pub right: &'a str,
    pub row_depth: usize,
    pub col_depth: usize,
    pub all: bool,
    pub inline: bool,
    pub format: OutputFormat,
    pub html: Option<&'a str>,
    pub name: &'a str,
    pub tolerance: Option<f64>,
}

pub fn run(args: DiffArgs<'_>) -> Result<ExitCode> {
    let left = load_table(args.left, args.row_depth, args.col_depth)?;
    let right = load_table(args.right, args.row_depth, args.col_depth)?;

    let diff = match args.tolerance {
        Some(eps) => produce_diff_with(&left, &right, |a: &String, b: &String| {
            numbers_within(a, b, eps)
        }),
        None => produce_diff(&left, &right),
    }
    .with_context(|| format!("Failed to diff {} against {}", args.left, args.right))?;

    let config = RenderConfig::builder()
        .markup(if args.inline {
            CellMarkup::Inline
        } else {
            CellMarkup::Whole
        })
        .build()?;

    if let Some(dir) = args.html {
        let path = write_diff_and_context_with(args.name, dir, &diff, &config)
            .with_context(|| format!("Failed to write HTML report to {}", dir))?;
        eprintln!("Wrote {}", path.display());
    }

    let shown = if args.all {
        diff.clone()
    } else {
        only_the_diffs(&diff)
    };

    let stdout = io::stdout();
    let mut handle = stdout.lock();
    match args.format {
        OutputFormat::Text => write_text(&mut handle, &diff, &shown, &config, args.all)?,
        OutputFormat::Json => writeln!(handle, "{}", serialize_diff_table(&shown)?)?,
    }
    handle.flush()?;

    Ok(if diff.has_differences() {
        ExitCode::from(1)
    } else {
        ExitCode::SUCCESS
    })
}

fn write_text<W: Write>(
    w: &mut W,
    diff: &DiffTable<String>,
    shown: &DiffTable<String>,
    config: &RenderConfig,
    all: bool,
) -> Result<()> {
    if all || diff.has_differences() {
        write!(w, "{}", diff_table_to_string_with(shown, config))?;
    }
    if !diff.has_differences() {
        writeln!(w, "No differences found.")?;
        return Ok(());
    }

    let summary = diff.summary();
    writeln!(w)?;
    writeln!(w, "Summary:")?;
    writeln!(w, "  Cells changed: {}", summary.changed)?;
    writeln!(w, "  Cells added: {}", summary.added)?;
    writeln!(w, "  Cells removed: {}", summary.removed)?;
    writeln!(
        w,
        "  Rows added/removed: {}/{}",
        summary.rows_added, summary.rows_removed
    )?;
    writeln!(
        w,
        "  Columns added/removed: {}/{}",
        summary.cols_added, summary.cols_removed
    )?;
    Ok(())
}

/// Equal text, or both values parse as numbers no more than `eps` apart.
fn numbers_within(a: &str, b: &str, eps: f64) -> bool {
    if a == b {
        return true;
    }
    match (a.trim().parse::<f64>(), b.trim().parse::<f64>()) {
        (Ok(x), Ok(y)) => (x - y).abs() <= eps,
        _ => false,
    }
}
