use std::collections::BTreeSet;

use serde::Serialize;
use thiserror::Error;

use crate::diff::model::{DiffResult, ItemMove};
use crate::model::{Item, Position, Section};
use crate::snapshot::Snapshot;

/// Which coordinate space a reported coordinate belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Space {
    Old,
    New,
}

/// A property a computed diff fails to satisfy
///
/// Violations are non-fatal findings: the diff is still returned, the checker
/// reports why a rendering surface would reject it.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
pub enum DiffViolation {
    #[error("{group} position {position} is outside the {space:?} snapshot")]
    PositionOutOfRange {
        group: &'static str,
        space: Space,
        position: Position,
    },

    #[error("{group} section {index} is outside the {space:?} snapshot")]
    SectionOutOfRange {
        group: &'static str,
        space: Space,
        index: usize,
    },

    #[error("Position {position} is both deleted and a move source")]
    DeletedAndMoved { position: Position },

    #[error("Position {position} is both updated and a move endpoint")]
    UpdatedAndMoved { position: Position },

    #[error("Move {item_move} starts in a deleted section")]
    MoveFromDeletedSection { item_move: ItemMove },

    #[error("Move {item_move} ends in an inserted section")]
    MoveIntoInsertedSection { item_move: ItemMove },

    #[error("Item delete {position} is covered by its deleted section")]
    DeleteInsideDeletedSection { position: Position },

    #[error("Item insert {position} is covered by its inserted section")]
    InsertInsideInsertedSection { position: Position },

    #[error("{surviving_old} surviving old sections but {surviving_new} surviving new sections")]
    SurvivorMismatch {
        surviving_old: usize,
        surviving_new: usize,
    },

    #[error("Section {old_section} -> {new_section}: batch leaves {expected} items, snapshot has {actual}")]
    CountMismatch {
        old_section: usize,
        new_section: usize,
        expected: i64,
        actual: usize,
    },

    #[error("Section {old_section} -> {new_section}: replayed batch puts the wrong item at row {row}")]
    OrderMismatch {
        old_section: usize,
        new_section: usize,
        row: usize,
    },
}

/// Check a computed diff against both snapshots
///
/// Verifies coordinate ranges, disjointness of deletes / updates / move
/// endpoints, section-boundary legality and, for every surviving section
/// pair, that the batch leaves exactly the new item count:
///
/// `new = old - deletes - moves out + inserts + moves in`
///
/// Surviving pairs are the non-deleted old sections zipped, in order, with
/// the non-inserted new sections. Returns every violation found; an empty
/// vector means the diff is legal.
pub fn check_diff<I, C>(
    old: &Snapshot<I, C>,
    new: &Snapshot<I, C>,
    diff: &DiffResult,
) -> Vec<DiffViolation> {
    let mut violations = Vec::new();
    check_ranges(old.sections(), new.sections(), diff, &mut violations);
    check_disjointness(diff, &mut violations);
    check_boundaries(diff, &mut violations);
    check_counts(old.sections(), new.sections(), diff, &mut violations);
    violations
}

fn check_ranges<C>(
    old: &[Section<C>],
    new: &[Section<C>],
    diff: &DiffResult,
    violations: &mut Vec<DiffViolation>,
) {
    let position_groups: [(&'static str, Space, Vec<Position>); 5] = [
        ("updated", Space::Old, diff.updated_items.clone()),
        ("deleted", Space::Old, diff.deleted_items.clone()),
        ("inserted", Space::New, diff.inserted_items.clone()),
        ("deferred", Space::New, diff.deferred_updates.clone()),
        (
            "moved",
            Space::Old,
            diff.moved_items.iter().map(|m| m.from).collect(),
        ),
    ];
    let moved_to: Vec<Position> = diff.moved_items.iter().map(|m| m.to).collect();

    let chained = position_groups
        .into_iter()
        .chain(std::iter::once(("moved", Space::New, moved_to)));
    for (group, space, positions) in chained {
        let sections = match space {
            Space::Old => old,
            Space::New => new,
        };
        for position in positions {
            let inside = sections
                .get(position.section)
                .is_some_and(|s| position.row < s.len());
            if !inside {
                violations.push(DiffViolation::PositionOutOfRange {
                    group,
                    space,
                    position,
                });
            }
        }
    }

    let section_groups: [(&'static str, Space, &[usize], usize); 3] = [
        ("deleted", Space::Old, diff.deleted_sections.as_slice(), old.len()),
        ("inserted", Space::New, diff.inserted_sections.as_slice(), new.len()),
        (
            "updated",
            Space::New,
            diff.updated_sections.as_slice(),
            old.len().min(new.len()),
        ),
    ];
    for (group, space, indexes, limit) in section_groups {
        for &index in indexes {
            if index >= limit {
                violations.push(DiffViolation::SectionOutOfRange {
                    group,
                    space,
                    index,
                });
            }
        }
    }
}

fn check_disjointness(diff: &DiffResult, violations: &mut Vec<DiffViolation>) {
    let sources: BTreeSet<Position> = diff.moved_items.iter().map(|m| m.from).collect();
    let endpoints: BTreeSet<Position> = diff
        .moved_items
        .iter()
        .flat_map(|m| [m.from, m.to])
        .collect();

    for &position in &diff.deleted_items {
        if sources.contains(&position) {
            violations.push(DiffViolation::DeletedAndMoved { position });
        }
    }
    for &position in &diff.updated_items {
        if endpoints.contains(&position) {
            violations.push(DiffViolation::UpdatedAndMoved { position });
        }
    }
}

fn check_boundaries(diff: &DiffResult, violations: &mut Vec<DiffViolation>) {
    let deleted: BTreeSet<usize> = diff.deleted_sections.iter().copied().collect();
    let inserted: BTreeSet<usize> = diff.inserted_sections.iter().copied().collect();

    for &item_move in &diff.moved_items {
        if deleted.contains(&item_move.from.section) {
            violations.push(DiffViolation::MoveFromDeletedSection { item_move });
        }
        if inserted.contains(&item_move.to.section) {
            violations.push(DiffViolation::MoveIntoInsertedSection { item_move });
        }
    }
    for &position in &diff.deleted_items {
        if deleted.contains(&position.section) {
            violations.push(DiffViolation::DeleteInsideDeletedSection { position });
        }
    }
    for &position in &diff.inserted_items {
        if inserted.contains(&position.section) {
            violations.push(DiffViolation::InsertInsideInsertedSection { position });
        }
    }
}

fn check_counts<C>(
    old: &[Section<C>],
    new: &[Section<C>],
    diff: &DiffResult,
    violations: &mut Vec<DiffViolation>,
) {
    let pairs = match surviving_pairs(old.len(), new.len(), diff) {
        Ok(pairs) => pairs,
        Err(violation) => {
            violations.push(violation);
            return;
        }
    };

    for (old_section, new_section) in pairs {
        let count = |items: &Vec<Position>, section: usize| {
            items.iter().filter(|p| p.section == section).count() as i64
        };
        let moves_out = diff
            .moved_items
            .iter()
            .filter(|m| m.from.section == old_section && m.to.section != new_section)
            .count() as i64;
        let moves_in = diff
            .moved_items
            .iter()
            .filter(|m| m.to.section == new_section && m.from.section != old_section)
            .count() as i64;

        let expected = old[old_section].len() as i64 - count(&diff.deleted_items, old_section)
            - moves_out
            + count(&diff.inserted_items, new_section)
            + moves_in;
        let actual = new[new_section].len();
        if expected != actual as i64 {
            violations.push(DiffViolation::CountMismatch {
                old_section,
                new_section,
                expected,
                actual,
            });
        }
    }
}

/// Old sections that survive, zipped in order with the new sections that
/// are not inserted
fn surviving_pairs(
    old_len: usize,
    new_len: usize,
    diff: &DiffResult,
) -> Result<Vec<(usize, usize)>, DiffViolation> {
    let deleted: BTreeSet<usize> = diff.deleted_sections.iter().copied().collect();
    let inserted: BTreeSet<usize> = diff.inserted_sections.iter().copied().collect();
    let surviving_old: Vec<usize> = (0..old_len).filter(|i| !deleted.contains(i)).collect();
    let surviving_new: Vec<usize> = (0..new_len).filter(|i| !inserted.contains(i)).collect();

    if surviving_old.len() != surviving_new.len() {
        return Err(DiffViolation::SurvivorMismatch {
            surviving_old: surviving_old.len(),
            surviving_new: surviving_new.len(),
        });
    }
    Ok(surviving_old.into_iter().zip(surviving_new).collect())
}

/// Replay a diff against the old snapshot and compare with the new one
///
/// Simulates how a list view commits a batch, for every surviving section
/// pair: inserted rows and move destinations take their slots, then the
/// section's untouched old items fill the remaining slots in old order.
/// Every slot must then hold an item with the same identity as the new
/// snapshot's item at that row. Inserted sections are rebuilt from the new
/// snapshot, so they always match.
///
/// Structural problems (survivor or count mismatches) are left to
/// [`check_diff`]; a pair whose slots do not add up is reported at the first
/// row that cannot be filled.
pub fn check_convergence<I, C>(
    old: &Snapshot<I, C>,
    new: &Snapshot<I, C>,
    diff: &DiffResult,
) -> Vec<DiffViolation>
where
    I: Item,
{
    let Ok(pairs) = surviving_pairs(old.section_count(), new.section_count(), diff) else {
        return Vec::new();
    };
    let deleted: BTreeSet<Position> = diff.deleted_items.iter().copied().collect();
    let sources: BTreeSet<Position> = diff.moved_items.iter().map(|m| m.from).collect();

    let mut violations = Vec::new();
    for (old_section, new_section) in pairs {
        let (Ok(old_len), Ok(new_len)) = (old.item_count(old_section), new.item_count(new_section))
        else {
            continue;
        };

        let mut slots: Vec<Option<&I>> = vec![None; new_len];
        let mut mismatch = None;
        let claimed = diff
            .inserted_items
            .iter()
            .filter(|p| p.section == new_section)
            .map(|&p| (p, new.item_at(p).ok()))
            .chain(
                diff.moved_items
                    .iter()
                    .filter(|m| m.to.section == new_section)
                    .map(|m| (m.to, old.item_at(m.from).ok())),
            );
        for (target, item) in claimed {
            match slots.get_mut(target.row) {
                Some(slot) if slot.is_none() => *slot = item,
                _ => {
                    mismatch.get_or_insert(target.row);
                }
            }
        }

        let mut untouched = (0..old_len)
            .map(|row| Position::new(old_section, row))
            .filter(|p| !deleted.contains(p) && !sources.contains(p))
            .filter_map(|p| old.item_at(p).ok());
        for slot in slots.iter_mut().filter(|slot| slot.is_none()) {
            *slot = untouched.next();
        }

        for (row, slot) in slots.iter().enumerate() {
            let expected = new.item_at(Position::new(new_section, row)).ok();
            let same = matches!((slot, expected), (Some(a), Some(b)) if a.same_identity(b));
            if !same {
                mismatch = Some(mismatch.map_or(row, |first: usize| first.min(row)));
                break;
            }
        }

        if let Some(row) = mismatch {
            violations.push(DiffViolation::OrderMismatch {
                old_section,
                new_section,
                row,
            });
        }
    }
    violations
}
