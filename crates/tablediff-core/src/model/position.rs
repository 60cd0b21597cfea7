use serde::{Deserialize, Serialize};
use std::fmt;

/// Coordinate of an item: section index plus offset within that section
///
/// Positions order by section first, then row, which is the order every
/// diff collection is reported in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    pub section: usize,
    pub row: usize,
}

impl Position {
    pub fn new(section: usize, row: usize) -> Self {
        Self { section, row }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.section, self.row)
    }
}
