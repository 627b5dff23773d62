//! Header keys identifying rows and columns independently of their position.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Which axis of a table a key belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Axis {
    Row,
    Column,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::Row => f.write_str("row"),
            Axis::Column => f.write_str("column"),
        }
    }
}

/// An ordered sequence of header labels, one per header level.
///
/// Two keys are equal iff their label sequences are equal element-wise; the
/// number of labels is the header depth of the axis the key lives on.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Key(Vec<String>);

impl Key {
    pub fn new(labels: Vec<String>) -> Key {
        Key(labels)
    }

    pub fn labels(&self) -> &[String] {
        &self.0
    }

    pub fn depth(&self) -> usize {
        self.0.len()
    }

    /// Label at header `level`, or `""` past the key's depth.
    pub fn label(&self, level: usize) -> &str {
        self.0.get(level).map(String::as_str).unwrap_or("")
    }

    pub fn into_labels(self) -> Vec<String> {
        self.0
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.0.join(" / "))
    }
}

impl From<Vec<String>> for Key {
    fn from(labels: Vec<String>) -> Key {
        Key(labels)
    }
}

impl From<Vec<&str>> for Key {
    fn from(labels: Vec<&str>) -> Key {
        Key(labels.into_iter().map(str::to_owned).collect())
    }
}

impl From<&[&str]> for Key {
    fn from(labels: &[&str]) -> Key {
        Key(labels.iter().map(|s| (*s).to_owned()).collect())
    }
}

impl<const N: usize> From<[&str; N]> for Key {
    fn from(labels: [&str; N]) -> Key {
        Key(labels.iter().map(|s| (*s).to_owned()).collect())
    }
}

/// Builds one key per entry from a level-major label grid, i.e. `grid[level][i]`
/// is the label of entry `i` at header `level`.
pub fn keys_from_levels<S: AsRef<str>>(grid: &[Vec<S>]) -> Vec<Key> {
    let count = grid.first().map(Vec::len).unwrap_or(0);
    (0..count)
        .map(|i| {
            Key(grid
                .iter()
                .map(|level| level.get(i).map(|s| s.as_ref().to_owned()).unwrap_or_default())
                .collect())
        })
        .collect()
}
