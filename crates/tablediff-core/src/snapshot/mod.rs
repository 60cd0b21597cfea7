//! Retained snapshot: an ordered item sequence plus its derived sections
//!
//! A snapshot is built once and never edited. Reconciliation builds a
//! candidate snapshot next to the retained one and swaps it in only after
//! the diff has been computed.

pub mod builder;

pub use builder::build_sections;

use crate::errors::{DiffError, Result};
use crate::model::{Position, Section};
use crate::policy::SectionPolicy;
use crate::rules::validation;

/// Ordered items and the sections derived from them
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot<I, C> {
    items: Vec<I>,
    sections: Vec<Section<C>>,
}

impl<I, C> Snapshot<I, C> {
    /// Snapshot with no items and no sections
    pub fn empty() -> Self {
        Self {
            items: Vec::new(),
            sections: Vec::new(),
        }
    }

    /// Derive sections for `items` (already ordered) and validate them
    ///
    /// # Errors
    ///
    /// Returns `DiffError::DuplicateSection` if two derived sections have
    /// equal content.
    pub fn build<P>(items: Vec<I>, policy: &P) -> Result<Self>
    where
        P: SectionPolicy<I, Content = C>,
        C: PartialEq + std::fmt::Debug,
    {
        let sections = build_sections(&items, policy);
        validation::validate_unique_sections(&sections)?;
        Ok(Self { items, sections })
    }

    pub fn items(&self) -> &[I] {
        &self.items
    }

    pub fn sections(&self) -> &[Section<C>] {
        &self.sections
    }

    pub fn into_items(self) -> Vec<I> {
        self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn section_count(&self) -> usize {
        self.sections.len()
    }

    /// Section descriptor at `index`
    ///
    /// # Errors
    ///
    /// Returns `DiffError::SectionOutOfRange` if `index` is not a section.
    pub fn section(&self, index: usize) -> Result<&Section<C>> {
        self.sections
            .get(index)
            .ok_or(DiffError::SectionOutOfRange {
                index,
                count: self.sections.len(),
            })
    }

    /// Number of items in section `index`
    ///
    /// # Errors
    ///
    /// Returns `DiffError::SectionOutOfRange` if `index` is not a section.
    pub fn item_count(&self, index: usize) -> Result<usize> {
        self.section(index).map(Section::len)
    }

    /// Item addressed by a section-relative position
    ///
    /// # Errors
    ///
    /// Returns `DiffError::PositionOutOfRange` if the position is outside the
    /// snapshot.
    pub fn item_at(&self, position: Position) -> Result<&I> {
        self.index_of(position)
            .and_then(|index| self.items.get(index))
            .ok_or(DiffError::PositionOutOfRange {
                section: position.section,
                row: position.row,
            })
    }

    /// Item at a flat index
    ///
    /// # Errors
    ///
    /// Returns `DiffError::ItemOutOfRange` if `index >= len()`.
    pub fn item(&self, index: usize) -> Result<&I> {
        self.items.get(index).ok_or(DiffError::ItemOutOfRange {
            index,
            len: self.items.len(),
        })
    }

    /// Flat index of a section-relative position
    pub fn index_of(&self, position: Position) -> Option<usize> {
        let section = self.sections.get(position.section)?;
        (position.row < section.len()).then(|| section.start + position.row)
    }

    /// Section-relative position of a flat index
    pub fn position_of(&self, index: usize) -> Option<Position> {
        let section = self.sections.partition_point(|s| s.end <= index);
        let found = self.sections.get(section)?;
        found
            .contains(index)
            .then(|| Position::new(section, index - found.start))
    }

    /// Position of every item, in flat order
    pub fn positions(&self) -> Vec<Position> {
        self.sections
            .iter()
            .enumerate()
            .flat_map(|(section, s)| (0..s.len()).map(move |row| Position::new(section, row)))
            .collect()
    }
}

impl<I, C> Default for Snapshot<I, C> {
    fn default() -> Self {
        Self::empty()
    }
}
