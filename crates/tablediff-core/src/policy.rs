//! Section policy trait, ready-made policies and the ordering comparator
//!
//! The policy decides how an ordered item sequence is cut into sections.
//! It is injected into the engine at construction; nothing about grouping is
//! global.

use std::cmp::Ordering;
use std::fmt;

use crate::model::Section;

/// Ordering used to sort incoming items before sections are derived
///
/// Sorting is stable, so items that compare `Equal` keep the order in which
/// the caller supplied them.
pub type Comparator<I> = Box<dyn Fn(&I, &I) -> Ordering + Send + Sync>;

/// Policy deciding which adjacent items share a section
///
/// Sections are derived from the *sorted* sequence, so a policy must agree
/// with the comparator: every group has to form one contiguous run. If the
/// same content would be produced by two separate runs, reconciliation fails
/// with `DiffError::DuplicateSection`.
pub trait SectionPolicy<I> {
    /// Descriptor stored in each section and compared across snapshots
    type Content: PartialEq + Clone + fmt::Debug;

    /// True if `next` continues the section that `prev` belongs to
    fn same_group(&self, prev: &I, next: &I) -> bool;

    /// Content of the section whose first item is `first`
    fn section_content(&self, first: &I) -> Self::Content;

    /// Section descriptor for the run `start..end` opened by `first`
    fn build_section(&self, first: &I, start: usize, end: usize) -> Section<Self::Content> {
        Section::new(start, end, self.section_content(first))
    }
}

/// Groups items by a key extracted with a function
///
/// # Example
/// ```
/// use tablediff_core::policy::{KeyedSectionPolicy, SectionPolicy};
///
/// let policy = KeyedSectionPolicy::new(|s: &(char, u32)| s.0);
/// assert!(policy.same_group(&('a', 1), &('a', 2)));
/// assert!(!policy.same_group(&('a', 1), &('b', 1)));
/// assert_eq!(policy.section_content(&('b', 9)), 'b');
/// ```
pub struct KeyedSectionPolicy<F> {
    key: F,
}

impl<F> KeyedSectionPolicy<F> {
    pub fn new(key: F) -> Self {
        Self { key }
    }
}

impl<I, K, F> SectionPolicy<I> for KeyedSectionPolicy<F>
where
    F: Fn(&I) -> K,
    K: PartialEq + Clone + fmt::Debug,
{
    type Content = K;

    fn same_group(&self, prev: &I, next: &I) -> bool {
        (self.key)(prev) == (self.key)(next)
    }

    fn section_content(&self, first: &I) -> K {
        (self.key)(first)
    }
}

impl<F> fmt::Debug for KeyedSectionPolicy<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyedSectionPolicy").finish_non_exhaustive()
    }
}

/// Puts every item into one section
///
/// Useful for flat lists that still want item-level animation.
#[derive(Debug, Clone, Copy, Default)]
pub struct SingleSectionPolicy;

impl<I> SectionPolicy<I> for SingleSectionPolicy {
    type Content = ();

    fn same_group(&self, _prev: &I, _next: &I) -> bool {
        true
    }

    fn section_content(&self, _first: &I) {}
}
