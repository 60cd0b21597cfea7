use serde::{Deserialize, Serialize};
use std::ops::Range;

/// A contiguous run of items in one snapshot
///
/// `start..end` is the half-open range of flat item indexes covered by the
/// section. `content` is whatever the section policy derives from the run
/// (typically its grouping key); sections are matched across snapshots by
/// `content` alone, never by their offsets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section<C> {
    pub start: usize,
    pub end: usize,
    pub content: C,
}

impl<C> Section<C> {
    pub fn new(start: usize, end: usize, content: C) -> Self {
        Self {
            start,
            end,
            content,
        }
    }

    /// Number of items in the section
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Flat index range covered by the section
    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }

    /// True if the flat item index falls inside this section
    pub fn contains(&self, index: usize) -> bool {
        self.start <= index && index < self.end
    }
}
