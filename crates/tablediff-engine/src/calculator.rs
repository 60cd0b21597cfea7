//! The stateful diff calculator
//!
//! One calculator owns one retained snapshot. Every mutation builds a
//! candidate snapshot from copies of the supplied items, diffs it against the
//! retained one and commits it only if everything succeeded. `&mut self`
//! keeps at most one reconcile in flight per instance.

use std::fmt;
use std::time::Instant;

use tablediff_core::errors::ExError;
use tablediff_core::model::{Item, Position, Section};
use tablediff_core::policy::{Comparator, SectionPolicy};
use tablediff_core::snapshot::Snapshot;
use tablediff_core::{compute_diff, DiffResult, Result};
use tablediff_core::{log_op_end, log_op_error, log_op_start};
use tablediff_core_types::RequestId;

/// Result of a calculator mutation; errors carry the op and request id
pub type EngineResult<T> = std::result::Result<T, ExError>;

/// Reconciles successive item sets into diffs for a rendering surface
pub struct DiffCalculator<I, P: SectionPolicy<I>> {
    policy: P,
    comparator: Option<Comparator<I>>,
    snapshot: Snapshot<I, P::Content>,
}

impl<I, P> DiffCalculator<I, P>
where
    I: Item,
    P: SectionPolicy<I>,
{
    /// Calculator that trusts the caller's item order
    pub fn new(policy: P) -> Self {
        Self {
            policy,
            comparator: None,
            snapshot: Snapshot::empty(),
        }
    }

    /// Calculator that sorts incoming items with `comparator`
    pub fn with_comparator(policy: P, comparator: Comparator<I>) -> Self {
        Self {
            policy,
            comparator: Some(comparator),
            snapshot: Snapshot::empty(),
        }
    }

    /// Replace the comparator; takes effect on the next mutation
    ///
    /// Call [`resort`](Self::resort) to reorder the retained items now.
    pub fn set_comparator(&mut self, comparator: Option<Comparator<I>>) {
        self.comparator = comparator;
    }

    pub fn has_comparator(&self) -> bool {
        self.comparator.is_some()
    }

    pub fn policy(&self) -> &P {
        &self.policy
    }

    // ========== Mutations ==========

    /// Reconcile the retained snapshot with `items`
    ///
    /// Items are copied with `clone_with_content`. Unless `already_sorted`,
    /// the copies are sorted (stably) with the comparator, if any.
    ///
    /// # Errors
    ///
    /// Returns an `ExError` of kind `DuplicateSection` if the sorted items
    /// split one section into non-contiguous runs. The retained snapshot is
    /// left unchanged.
    pub fn reconcile(&mut self, items: &[I], already_sorted: bool) -> EngineResult<DiffResult> {
        let candidate = items.iter().map(Item::clone_with_content).collect();
        self.commit("reconcile", candidate, already_sorted)
    }

    /// Reconcile with sorting; the usual entry point
    ///
    /// # Errors
    ///
    /// See [`reconcile`](Self::reconcile).
    pub fn set_items(&mut self, items: &[I]) -> EngineResult<DiffResult> {
        let candidate = items.iter().map(Item::clone_with_content).collect();
        self.commit("set_items", candidate, false)
    }

    /// Apply an incremental change to the retained items
    ///
    /// Items in `add_or_update` replace the retained item with the same
    /// identity or are appended; retained items matching anything in
    /// `delete` by identity are removed. The result is then sorted and
    /// reconciled.
    ///
    /// # Errors
    ///
    /// See [`reconcile`](Self::reconcile).
    pub fn update_items(&mut self, add_or_update: &[I], delete: &[I]) -> EngineResult<DiffResult> {
        let mut candidate: Vec<I> = self
            .snapshot
            .items()
            .iter()
            .map(Item::clone_with_content)
            .collect();

        for incoming in add_or_update {
            match candidate
                .iter_mut()
                .find(|existing| existing.same_identity(incoming))
            {
                Some(existing) => *existing = incoming.clone_with_content(),
                None => candidate.push(incoming.clone_with_content()),
            }
        }
        candidate.retain(|existing| !delete.iter().any(|gone| gone.same_identity(existing)));

        self.commit("update_items", candidate, false)
    }

    /// Re-sort the retained items with the current comparator
    ///
    /// # Errors
    ///
    /// See [`reconcile`](Self::reconcile).
    pub fn resort(&mut self) -> EngineResult<DiffResult> {
        let candidate = self
            .snapshot
            .items()
            .iter()
            .map(Item::clone_with_content)
            .collect();
        self.commit("resort", candidate, false)
    }

    fn commit(
        &mut self,
        op: &'static str,
        mut candidate: Vec<I>,
        already_sorted: bool,
    ) -> EngineResult<DiffResult> {
        let request_id = RequestId::new();
        log_op_start!(
            op,
            request_id = %request_id,
            old_len = self.snapshot.len(),
            new_len = candidate.len(),
            already_sorted = already_sorted
        );
        let start = Instant::now();

        if !already_sorted {
            if let Some(comparator) = &self.comparator {
                candidate.sort_by(|a, b| comparator(a, b));
            }
        }

        let built = Snapshot::build(candidate, &self.policy);
        let elapsed = start.elapsed().as_millis() as u64;
        let next = match built {
            Ok(next) => next,
            Err(err) => {
                log_op_error!(op, err.clone(), duration_ms = elapsed, request_id = %request_id);
                return Err(ExError::from(err)
                    .with_op(op)
                    .with_request_id(request_id));
            }
        };

        let diff = compute_diff(&self.snapshot, &next);
        self.snapshot = next;

        let elapsed = start.elapsed().as_millis() as u64;
        log_op_end!(
            op,
            duration_ms = elapsed,
            request_id = %request_id,
            section_count = self.snapshot.section_count(),
            updated = diff.updated_items.len(),
            deleted = diff.deleted_items.len(),
            inserted = diff.inserted_items.len(),
            moved = diff.moved_items.len()
        );
        Ok(diff)
    }

    // ========== Accessors ==========

    pub fn section_count(&self) -> usize {
        self.snapshot.section_count()
    }

    /// Number of items in section `section`
    ///
    /// # Errors
    ///
    /// Returns `DiffError::SectionOutOfRange` for an unknown section.
    pub fn item_count(&self, section: usize) -> Result<usize> {
        self.snapshot.item_count(section)
    }

    /// Section descriptor at `index`
    ///
    /// # Errors
    ///
    /// Returns `DiffError::SectionOutOfRange` for an unknown section.
    pub fn section(&self, index: usize) -> Result<&Section<P::Content>> {
        self.snapshot.section(index)
    }

    /// Retained item at a section-relative position
    ///
    /// # Errors
    ///
    /// Returns `DiffError::PositionOutOfRange` for an unknown position.
    pub fn item_at(&self, position: Position) -> Result<&I> {
        self.snapshot.item_at(position)
    }

    /// Retained item at a flat index
    ///
    /// # Errors
    ///
    /// Returns `DiffError::ItemOutOfRange` for an index past the end.
    pub fn item(&self, index: usize) -> Result<&I> {
        self.snapshot.item(index)
    }

    pub fn items(&self) -> &[I] {
        self.snapshot.items()
    }

    pub fn sections(&self) -> &[Section<P::Content>] {
        self.snapshot.sections()
    }

    pub fn snapshot(&self) -> &Snapshot<I, P::Content> {
        &self.snapshot
    }
}

impl<I, P> fmt::Debug for DiffCalculator<I, P>
where
    P: SectionPolicy<I> + fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DiffCalculator")
            .field("policy", &self.policy)
            .field("has_comparator", &self.comparator.is_some())
            .field("items", &self.snapshot.len())
            .field("sections", &self.snapshot.section_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tablediff_core::errors::ExErrorKind;
    use tablediff_core::policy::KeyedSectionPolicy;

    #[derive(Debug, Clone, PartialEq)]
    struct Entry {
        id: u32,
        group: char,
        label: String,
    }

    impl Item for Entry {
        fn same_identity(&self, other: &Self) -> bool {
            self.id == other.id
        }

        fn same_content(&self, other: &Self) -> bool {
            self.label == other.label
        }
    }

    fn entry(id: u32, group: char, label: &str) -> Entry {
        Entry {
            id,
            group,
            label: label.to_string(),
        }
    }

    fn group_of(e: &Entry) -> char {
        e.group
    }

    fn calculator() -> DiffCalculator<Entry, KeyedSectionPolicy<fn(&Entry) -> char>> {
        DiffCalculator::with_comparator(
            KeyedSectionPolicy::new(group_of as fn(&Entry) -> char),
            Box::new(|a: &Entry, b: &Entry| a.group.cmp(&b.group).then(a.label.cmp(&b.label))),
        )
    }

    #[test]
    fn test_first_set_items_inserts_sections() {
        let mut calc = calculator();
        let diff = calc
            .set_items(&[entry(1, 'B', "x"), entry(2, 'A', "y")])
            .unwrap();
        assert_eq!(diff.inserted_sections, vec![0, 1]);
        assert_eq!(calc.section_count(), 2);
        assert_eq!(calc.item(0).unwrap().id, 2);
    }

    #[test]
    fn test_failed_reconcile_keeps_snapshot() {
        let mut calc = calculator();
        calc.set_items(&[entry(1, 'A', "1")]).unwrap();

        // Pre-sorted claim with a split group
        let err = calc
            .reconcile(&[entry(1, 'A', "1"), entry(2, 'B', "2"), entry(3, 'A', "3")], true)
            .unwrap_err();

        assert_eq!(err.kind(), ExErrorKind::DuplicateSection);
        assert_eq!(err.op(), Some("reconcile"));
        assert!(err.request_id().is_some());
        assert_eq!(calc.items(), &[entry(1, 'A', "1")]);
    }

    #[test]
    fn test_update_items_replaces_appends_and_deletes() {
        let mut calc = calculator();
        calc.set_items(&[entry(1, 'A', "1"), entry(2, 'A', "2")])
            .unwrap();

        let diff = calc
            .update_items(&[entry(2, 'A', "2b"), entry(3, 'A', "3")], &[entry(1, 'A', "")])
            .unwrap();

        let ids: Vec<u32> = calc.items().iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![2, 3]);
        assert_eq!(calc.item(0).unwrap().label, "2b");
        assert_eq!(diff.deleted_items, vec![Position::new(0, 0)]);
        assert_eq!(diff.inserted_items, vec![Position::new(0, 1)]);
    }

    #[test]
    fn test_debug_omits_comparator_body() {
        let calc = calculator();
        let text = format!("{:?}", calc);
        assert!(text.contains("has_comparator: true"));
    }
}
