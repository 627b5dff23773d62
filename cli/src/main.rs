mod commands;
mod input;

use clap::{Parser, Subcommand, ValueEnum};
use std::process::ExitCode;
use table_diff::TableError;

#[derive(Parser)]
#[command(name = "table-diff")]
#[command(about = "Compare tables by row and column headers and show what changed")]
#[command(version)]
pub struct Cli {
    #[arg(long, short, global = true, help = "Log debug details to stderr")]
    pub verbose: bool,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Compare two tables")]
    Diff {
        #[arg(help = "Path to the left/before table (JSON array of rows)")]
        left: String,
        #[arg(help = "Path to the right/after table (JSON array of rows)")]
        right: String,
        #[arg(long, default_value_t = 1, help = "Number of row-header columns")]
        row_depth: usize,
        #[arg(long, default_value_t = 1, help = "Number of column-header rows")]
        col_depth: usize,
        #[arg(long, help = "Show every row and column, not only the differences")]
        all: bool,
        #[arg(long, help = "Mark changed characters instead of whole values")]
        inline: bool,
        #[arg(long, short, value_enum, default_value = "text", help = "Output format")]
        format: OutputFormat,
        #[arg(long, value_name = "DIR", help = "Also write an HTML report into this directory")]
        html: Option<String>,
        #[arg(long, default_value = "table-diff", help = "File name (without extension) of the HTML report")]
        name: String,
        #[arg(long, value_name = "EPS", help = "Treat numbers within EPS of each other as equal")]
        tolerance: Option<f64>,
    },
    #[command(about = "Print a table as a text grid")]
    Show {
        #[arg(help = "Path to the table (JSON array of rows)")]
        path: String,
        #[arg(long, default_value_t = 1, help = "Number of row-header columns")]
        row_depth: usize,
        #[arg(long, default_value_t = 1, help = "Number of column-header rows")]
        col_depth: usize,
    },
}

#[derive(Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    let result = match cli.command {
        Commands::Diff {
            left,
            right,
            row_depth,
            col_depth,
            all,
            inline,
            format,
            html,
            name,
            tolerance,
        } => commands::diff::run(commands::diff::DiffArgs {
            left: &left,
            right: &right,
            row_depth,
            col_depth,
            all,
            inline,
            format,
            html: html.as_deref(),
            name: &name,
            tolerance,
        }),
        Commands::Show {
            path,
            row_depth,
            col_depth,
        } => commands::show::run(&path, row_depth, col_depth),
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            if let Some(err) = table_error(&e) {
                log::debug!("error code {}", err.code());
            }
            ExitCode::from(2)
        }
    }
}

/// Finds the table error behind an `anyhow` chain, if any.
fn table_error(err: &anyhow::Error) -> Option<&TableError> {
    err.chain().find_map(|cause| cause.downcast_ref::<TableError>())
}
