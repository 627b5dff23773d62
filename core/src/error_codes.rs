//! Stable error codes surfaced in error messages and via `TableError::code()`.

pub const TABLE_STRUCTURE: &str = "TDIFF_TABLE_001";
pub const TABLE_DUPLICATE_KEY: &str = "TDIFF_TABLE_002";
pub const TABLE_KEY_NOT_FOUND: &str = "TDIFF_TABLE_003";
pub const REPORT_WRITE: &str = "TDIFF_REPORT_001";
