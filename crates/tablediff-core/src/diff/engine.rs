//! Snapshot diff computation engine.
//!
//! The core entry point is [`compute_diff`], which compares the retained
//! snapshot with a validated candidate and produces a [`DiffResult`].

use std::collections::BTreeSet;

use crate::diff::model::{DiffResult, ItemMove};
use crate::diff::reducer::{self, RankedMove};
use crate::diff::resolution::{resolve_sections, SectionLayout};
use crate::model::{Item, Position};
use crate::snapshot::Snapshot;

/// Content change waiting for the final move set
#[derive(Debug, Clone, Copy)]
struct PendingUpdate {
    old: Position,
    new: Position,
}

/// Compute the edit script that turns `old` into `new`
///
/// 1. Pair sections and find destroyed / created ones.
/// 2. Match every old item against the candidate by identity (O(n·m)).
/// 3. Classify each match as delete, insert, update or move candidate,
///    skipping operations a section delete or insert already covers.
/// 4. Reduce move candidates.
/// 5. Drop updates that share a coordinate with a final move endpoint.
///
/// Both snapshots must already be validated; this step cannot fail.
pub fn compute_diff<I, C>(old: &Snapshot<I, C>, new: &Snapshot<I, C>) -> DiffResult
where
    I: Item,
    C: PartialEq,
{
    let layout = resolve_sections(old.sections(), new.sections());
    let old_positions = old.positions();
    let new_positions = new.positions();

    let matches = match_items(old.items(), new.items());
    let mut matched_from = vec![None; new.len()];
    for (old_index, found) in matches.iter().enumerate() {
        if let Some(new_index) = *found {
            if matched_from[new_index].is_none() {
                matched_from[new_index] = Some(old_index);
            }
        }
    }

    let (source_ranks, destination_ranks) = stay_ranks(
        &layout,
        &matches,
        &matched_from,
        &old_positions,
        &new_positions,
    );

    let mut diff = DiffResult {
        updated_sections: layout.updated.clone(),
        deleted_sections: layout.deleted.clone(),
        inserted_sections: layout.inserted.clone(),
        ..DiffResult::default()
    };
    let mut candidates = Vec::new();
    let mut pending_updates = Vec::new();

    for (old_index, found) in matches.iter().enumerate() {
        let from = old_positions[old_index];
        let origin_destroyed = layout.is_deleted(from.section);

        let Some(new_index) = *found else {
            if !origin_destroyed {
                diff.deleted_items.push(from);
            }
            continue;
        };
        let to = new_positions[new_index];
        let target_created = layout.is_inserted(to.section);

        if !origin_destroyed && !old.items()[old_index].same_content(&new.items()[new_index]) {
            pending_updates.push(PendingUpdate { old: from, new: to });
        }

        match (origin_destroyed, target_created) {
            (true, true) => {}
            (true, false) => diff.inserted_items.push(to),
            (false, true) => diff.deleted_items.push(from),
            (false, false) => {
                let item_move = ItemMove::new(from, to);
                let ranks = (source_ranks[old_index], destination_ranks[new_index]);
                match ranks {
                    // Rows alone miss rank changes caused by deletes and inserts
                    (Some(source), Some(destination))
                        if layout.survives_as(from.section, to.section) =>
                    {
                        candidates.push(RankedMove::local(item_move, source, destination));
                    }
                    _ => candidates.push(RankedMove::cross(item_move)),
                }
            }
        }
    }

    for (new_index, origin) in matched_from.iter().enumerate() {
        let to = new_positions[new_index];
        if origin.is_none() && !layout.is_inserted(to.section) {
            diff.inserted_items.push(to);
        }
    }

    diff.moved_items = reducer::reduce(candidates);
    filter_updates(&mut diff, pending_updates);
    diff.normalize();

    tracing::debug!(
        component = module_path!(),
        op = "compute_diff",
        old_len = old.len(),
        new_len = new.len(),
        updated = diff.updated_items.len(),
        deleted = diff.deleted_items.len(),
        inserted = diff.inserted_items.len(),
        moved = diff.moved_items.len(),
        updated_sections = diff.updated_sections.len(),
        deleted_sections = diff.deleted_sections.len(),
        inserted_sections = diff.inserted_sections.len(),
        deferred_updates = diff.deferred_updates.len()
    );

    diff
}

/// For each old item, the index of the first new item with the same identity
fn match_items<I: Item>(old: &[I], new: &[I]) -> Vec<Option<usize>> {
    old.iter()
        .map(|item| new.iter().position(|candidate| item.same_identity(candidate)))
        .collect()
}

/// Ranks of items that stay inside a surviving section pair
///
/// Source rank: position among the old section's stayers, in old order.
/// Destination rank: position among the new section's stayers, in new order.
fn stay_ranks(
    layout: &SectionLayout,
    matches: &[Option<usize>],
    matched_from: &[Option<usize>],
    old_positions: &[Position],
    new_positions: &[Position],
) -> (Vec<Option<usize>>, Vec<Option<usize>>) {
    let mut source_ranks = vec![None; matches.len()];
    let mut next_source = vec![0usize; layout.old_to_new.len()];
    for (old_index, found) in matches.iter().enumerate() {
        let Some(new_index) = *found else { continue };
        let from = old_positions[old_index].section;
        if layout.survives_as(from, new_positions[new_index].section) {
            source_ranks[old_index] = Some(next_source[from]);
            next_source[from] += 1;
        }
    }

    let mut destination_ranks = vec![None; matched_from.len()];
    let mut next_destination = vec![0usize; layout.new_to_old.len()];
    for (new_index, origin) in matched_from.iter().enumerate() {
        let Some(old_index) = *origin else { continue };
        let to = new_positions[new_index].section;
        if layout.survives_as(old_positions[old_index].section, to) {
            destination_ranks[new_index] = Some(next_destination[to]);
            next_destination[to] += 1;
        }
    }

    (source_ranks, destination_ranks)
}

/// Keep only updates that no final move or delete already accounts for
///
/// An update sharing its old coordinate with a move endpoint cannot be
/// reloaded in the same batch. If the item's own move survived reduction, the
/// post-batch reload of the move destination refreshes it; otherwise the
/// reload is deferred to the item's new position.
fn filter_updates(diff: &mut DiffResult, pending: Vec<PendingUpdate>) {
    let endpoints: BTreeSet<Position> = diff
        .moved_items
        .iter()
        .flat_map(|m| [m.from, m.to])
        .collect();
    let moved_sources: BTreeSet<Position> = diff.moved_items.iter().map(|m| m.from).collect();
    let deleted: BTreeSet<Position> = diff.deleted_items.iter().copied().collect();

    for update in pending {
        if deleted.contains(&update.old) {
            continue;
        }
        if endpoints.contains(&update.old) {
            if !moved_sources.contains(&update.old) {
                diff.deferred_updates.push(update.new);
            }
            continue;
        }
        diff.updated_items.push(update.old);
    }
}
