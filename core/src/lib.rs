//! Table Diff: key-aligned comparison of tables with hierarchical headers.
//!
//! This crate provides functionality for:
//! - Building tables from explicit keys or by slicing a raw rectangular array
//! - Aligning two tables by row and column key and classifying every cell
//! - Projecting a diff onto only the rows and columns that changed
//! - Rendering tables and diffs as fixed-width text, HTML reports, or JSON
//!
//! # Quick Start
//!
//! ```
//! use table_diff::{TableModel, diff_table_to_string, only_the_diffs, produce_diff};
//!
//! let before = vec![
//!     vec!["", "col1", "col2"],
//!     vec!["row1", "1", "2"],
//! ];
//! let after = vec![
//!     vec!["", "col1", "col2"],
//!     vec!["row1", "1", "3"],
//! ];
//! let left = TableModel::from_array(&before, 1, 1)?;
//! let right = TableModel::from_array(&after, 1, 1)?;
//! let diff = produce_diff(&left, &right)?;
//!
//! assert_eq!(
//!     diff_table_to_string(&only_the_diffs(&diff)),
//!     "+----+----------+\n\
//!      |    |col2      |\n\
//!      +----+----------+\n\
//!      |row1|[-2-]{+3+}|\n\
//!      +----+----------+\n"
//! );
//! # Ok::<(), table_diff::TableError>(())
//! ```

mod config;
mod diff;
mod differ;
mod error;
mod error_codes;
mod filter;
mod key;
pub mod output;
mod table;

pub use config::{CellMarkup, ConfigError, RenderConfig, RenderConfigBuilder};
pub use diff::{DiffCell, DiffKey, DiffSummary, DiffTable, KeyStatus};
pub use differ::{default_value_equals, produce_diff, produce_diff_with};
pub use error::TableError;
pub use filter::only_the_diffs;
pub use key::{Axis, Key, keys_from_levels};
pub use output::html::{diff_table_to_html, write_diff_and_context, write_diff_and_context_with};
pub use output::json::{
    CellDiff, CellStatus, diff_table_to_cell_diffs, serialize_cell_diffs, serialize_diff_table,
};
pub use output::text::{diff_table_to_string, diff_table_to_string_with, render_cell, table_to_string};
pub use table::TableModel;
