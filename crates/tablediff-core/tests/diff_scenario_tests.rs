//! Reconciliation scenarios over pairs of snapshots
//!
//! Each test builds the old and new snapshots directly and checks the exact
//! edit script, then runs the invariant checker over it.
mod common;

use common::{row, snapshot, TestRow};
use tablediff_core::rules::{check_convergence, check_diff};
use tablediff_core::{compute_diff, DiffResult, ItemMove, Position, Snapshot};

fn p(section: usize, row: usize) -> Position {
    Position::new(section, row)
}

fn diff_and_check(
    old: &Snapshot<TestRow, char>,
    new: &Snapshot<TestRow, char>,
) -> DiffResult {
    let diff = compute_diff(old, new);
    let violations = check_diff(old, new, &diff);
    assert!(violations.is_empty(), "violations: {:?}", violations);
    let divergent = check_convergence(old, new, &diff);
    assert!(divergent.is_empty(), "divergent: {:?}", divergent);
    diff
}

fn base() -> Vec<TestRow> {
    vec![
        row(1, 'A', "1"),
        row(2, 'B', "2"),
        row(3, 'B', "3"),
        row(4, 'C', "4"),
        row(5, 'C', "5"),
    ]
}

#[test]
fn test_resubmitting_identical_items_is_empty() {
    // GIVEN the five-row base snapshot
    let old = snapshot(base());

    // WHEN the same rows are diffed against it
    let diff = diff_and_check(&old, &snapshot(base()));

    // THEN nothing changes
    assert!(diff.is_empty());
}

#[test]
fn test_insert_into_existing_section() {
    let old = snapshot(vec![row(1, 'A', "1"), row(2, 'B', "2"), row(3, 'B', "3")]);
    let new = snapshot(vec![
        row(1, 'A', "1"),
        row(6, 'A', "6"),
        row(2, 'B', "2"),
        row(3, 'B', "3"),
    ]);

    let diff = diff_and_check(&old, &new);

    assert_eq!(diff.inserted_items, vec![p(0, 1)]);
    assert!(diff.inserted_sections.is_empty());
    assert!(diff.deleted_sections.is_empty());
    assert!(diff.moved_items.is_empty());
    assert!(diff.updated_items.is_empty());
    // B still starts one row later in flat terms
    assert_eq!(new.sections()[1].start, old.sections()[1].start + 1);
}

#[test]
fn test_deleting_sole_item_destroys_section() {
    let old = snapshot(vec![row(1, 'A', "1"), row(2, 'C', "2")]);
    let new = snapshot(vec![row(1, 'A', "1")]);

    let diff = diff_and_check(&old, &new);

    assert_eq!(diff.deleted_sections, vec![1]);
    assert!(diff.deleted_items.is_empty());
    assert!(diff.updated_sections.is_empty());
}

#[test]
fn test_new_header_creates_section() {
    let old = snapshot(vec![row(1, 'A', "1"), row(2, 'C', "2")]);
    let new = snapshot(vec![row(1, 'A', "1"), row(3, 'B', "3"), row(2, 'C', "2")]);

    let diff = diff_and_check(&old, &new);

    assert_eq!(diff.inserted_sections, vec![1]);
    assert!(diff.inserted_items.is_empty());
    assert!(diff.moved_items.is_empty());
    assert_eq!(diff.updated_sections, vec![1]);
}

#[test]
fn test_text_change_reorders_within_section() {
    // [1, 2, 3] -> "1" becomes "9" -> [2, 3, 9]
    let old = snapshot(vec![row(1, 'A', "1"), row(2, 'A', "2"), row(3, 'A', "3")]);
    let new = snapshot(vec![row(1, 'A', "9"), row(2, 'A', "2"), row(3, 'A', "3")]);

    let diff = diff_and_check(&old, &new);

    assert_eq!(diff.moved_items, vec![ItemMove::new(p(0, 0), p(0, 2))]);
    assert!(diff.updated_items.is_empty());
    assert!(diff.deferred_updates.is_empty());
}

#[test]
fn test_reorder_behind_deletes_moves_every_reranked_item() {
    // [1, 2, 5, 6, 7] -> drop 1 and 2, texts flip -> [3, 6, 9]
    let old = snapshot(vec![
        row(1, 'A', "1"),
        row(2, 'A', "2"),
        row(3, 'A', "5"),
        row(4, 'A', "6"),
        row(5, 'A', "7"),
    ]);
    let new = snapshot(vec![row(3, 'A', "9"), row(4, 'A', "6"), row(5, 'A', "3")]);

    let diff = diff_and_check(&old, &new);

    assert_eq!(diff.deleted_items, vec![p(0, 0), p(0, 1)]);
    assert_eq!(
        diff.moved_items,
        vec![ItemMove::new(p(0, 2), p(0, 2)), ItemMove::new(p(0, 4), p(0, 0))]
    );
}

#[test]
fn test_move_between_sections_with_update() {
    let old = snapshot(vec![row(1, 'A', "1"), row(2, 'A', "2"), row(3, 'B', "3")]);
    let new = snapshot(vec![row(1, 'A', "1"), row(2, 'B', "4"), row(3, 'B', "3")]);

    let diff = diff_and_check(&old, &new);

    assert_eq!(diff.moved_items, vec![ItemMove::new(p(0, 1), p(1, 1))]);
    // Own move survives, so the destination reload covers the content change
    assert!(diff.updated_items.is_empty());
    assert!(diff.deferred_updates.is_empty());
}

#[test]
fn test_mixed_delete_insert_update() {
    let old = snapshot(base());
    let new = snapshot(vec![
        row(1, 'A', "1"),
        row(7, 'A', "7"),
        row(2, 'B', "2"),
        row(3, 'B', "3x"),
        row(5, 'C', "5"),
    ]);

    let diff = diff_and_check(&old, &new);

    assert_eq!(diff.inserted_items, vec![p(0, 1)]);
    assert_eq!(diff.deleted_items, vec![p(2, 0)]);
    assert_eq!(diff.updated_items, vec![p(1, 1)]);
    assert!(diff.moved_items.is_empty());
    assert!(diff.deleted_sections.is_empty());
}

#[test]
fn test_section_reorder_is_delete_plus_insert() {
    // Moving every row of A under Z reorders sections A B -> B Z
    let old = snapshot(vec![row(1, 'A', "1"), row(2, 'B', "2")]);
    let new = snapshot(vec![row(1, 'Z', "1"), row(2, 'B', "2")]);

    let diff = diff_and_check(&old, &new);

    assert!(diff.moved_sections.is_empty());
    assert_eq!(diff.deleted_sections, vec![0]);
    assert_eq!(diff.inserted_sections, vec![1]);
    assert!(diff.moved_items.is_empty());
    assert!(diff.inserted_items.is_empty());
}

#[test]
fn test_everything_removed() {
    let old = snapshot(base());
    let new = snapshot(Vec::new());

    let diff = diff_and_check(&old, &new);

    assert_eq!(diff.deleted_sections, vec![0, 1, 2]);
    assert!(diff.deleted_items.is_empty());
    assert!(diff.updated_sections.is_empty());
}

#[test]
fn test_diff_is_deterministic() {
    let old = snapshot(base());
    let new = snapshot(vec![
        row(5, 'A', "0"),
        row(4, 'B', "9"),
        row(3, 'B', "1"),
        row(8, 'D', "8"),
    ]);

    let first = compute_diff(&old, &new);
    let second = compute_diff(&old, &new);

    assert_eq!(first, second);
    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );
}
