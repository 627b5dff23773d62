//! Errors raised while building, diffing, and rendering tables.

use crate::error_codes;
use crate::key::{Axis, Key};
use std::path::PathBuf;
use thiserror::Error;

/// Errors produced by table construction, diffing, lookup, and report output.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum TableError {
    #[error("[TDIFF_TABLE_001] malformed table: {message}. Suggestion: check the header depths and that every row has the same length.")]
    Structure { message: String },

    #[error("[TDIFF_TABLE_002] duplicate {axis} key {key}. Suggestion: each {axis} needs a unique header so both tables can be aligned.")]
    DuplicateKey { axis: Axis, key: Key },

    #[error("[TDIFF_TABLE_003] {axis} key {key} not found. Suggestion: check the header labels and their order.")]
    KeyNotFound { axis: Axis, key: Key },

    #[error("[TDIFF_REPORT_001] failed to write report '{}': {source}. Suggestion: check that the output directory is writable.", path.display())]
    ReportWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl TableError {
    pub fn code(&self) -> &'static str {
        match self {
            TableError::Structure { .. } => error_codes::TABLE_STRUCTURE,
            TableError::DuplicateKey { .. } => error_codes::TABLE_DUPLICATE_KEY,
            TableError::KeyNotFound { .. } => error_codes::TABLE_KEY_NOT_FOUND,
            TableError::ReportWrite { .. } => error_codes::REPORT_WRITE,
        }
    }

    pub(crate) fn structure(message: impl Into<String>) -> TableError {
        TableError::Structure {
            message: message.into(),
        }
    }

    pub(crate) fn report_write(path: impl Into<PathBuf>, source: std::io::Error) -> TableError {
        TableError::ReportWrite {
            path: path.into(),
            source,
        }
    }
}
