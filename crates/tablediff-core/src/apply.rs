//! Driving a list-rendering surface from a diff
//!
//! ## Ordering contract
//!
//! Surfaces with batch-update APIs only accept a batch whose operations are
//! issued in this order:
//!
//! 1. reload updated items
//! 2. delete sections
//! 3. delete items
//! 4. move sections
//! 5. move items
//! 6. insert sections
//! 7. insert items
//!
//! After the batch commits, move destinations and deferred updates are
//! reloaded (moves reposition but do not refresh content), then updated
//! sections are reloaded. An empty diff issues no calls at all.
//!
//! ## Example
//!
//! ```
//! use tablediff_core::apply::{apply_plan, BatchPlan, ListSurface};
//! use tablediff_core::{DiffResult, Position};
//!
//! #[derive(Default)]
//! struct Log(Vec<String>);
//!
//! impl ListSurface for Log {
//!     fn begin_batch(&mut self) { self.0.push("begin".into()); }
//!     fn end_batch(&mut self) { self.0.push("end".into()); }
//!     fn reload_items(&mut self, p: &[Position]) { self.0.push(format!("reload {}", p.len())); }
//!     fn delete_sections(&mut self, _: &[usize]) {}
//!     fn delete_items(&mut self, _: &[Position]) {}
//!     fn move_section(&mut self, _: usize, _: usize) {}
//!     fn move_item(&mut self, _: Position, _: Position) {}
//!     fn insert_sections(&mut self, _: &[usize]) {}
//!     fn insert_items(&mut self, p: &[Position]) { self.0.push(format!("insert {}", p.len())); }
//!     fn reload_sections(&mut self, _: &[usize]) {}
//! }
//!
//! let diff = DiffResult {
//!     inserted_items: vec![Position::new(0, 1)],
//!     ..DiffResult::default()
//! };
//! let mut log = Log::default();
//! apply_plan(&BatchPlan::from_diff(&diff), &mut log);
//! assert_eq!(log.0, vec!["begin", "insert 1", "end"]);
//! ```

use std::collections::BTreeSet;

use crate::commands::BatchOp;
use crate::diff::model::DiffResult;
use crate::model::Position;

/// A list-rendering surface that can execute batched updates
pub trait ListSurface {
    fn begin_batch(&mut self);
    fn end_batch(&mut self);
    fn reload_items(&mut self, positions: &[Position]);
    fn delete_sections(&mut self, sections: &[usize]);
    fn delete_items(&mut self, positions: &[Position]);
    fn move_section(&mut self, from: usize, to: usize);
    fn move_item(&mut self, from: Position, to: Position);
    fn insert_sections(&mut self, sections: &[usize]);
    fn insert_items(&mut self, positions: &[Position]);
    fn reload_sections(&mut self, sections: &[usize]);
}

/// Ordered surface operations for one diff
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchPlan {
    /// Operations inside the animated batch, in contract order
    pub batch: Vec<BatchOp>,
    /// Reloads issued after the batch commits
    pub fixup: Vec<BatchOp>,
}

impl BatchPlan {
    /// Lay out `diff` in contract order, omitting empty groups
    pub fn from_diff(diff: &DiffResult) -> Self {
        let mut batch = Vec::new();

        if !diff.updated_items.is_empty() {
            batch.push(BatchOp::ReloadItems {
                positions: diff.updated_items.clone(),
            });
        }
        if !diff.deleted_sections.is_empty() {
            batch.push(BatchOp::DeleteSections {
                sections: diff.deleted_sections.clone(),
            });
        }
        if !diff.deleted_items.is_empty() {
            batch.push(BatchOp::DeleteItems {
                positions: diff.deleted_items.clone(),
            });
        }
        batch.extend(
            diff.moved_sections
                .iter()
                .map(|m| BatchOp::MoveSection { from: m.from, to: m.to }),
        );
        batch.extend(
            diff.moved_items
                .iter()
                .map(|m| BatchOp::MoveItem { from: m.from, to: m.to }),
        );
        if !diff.inserted_sections.is_empty() {
            batch.push(BatchOp::InsertSections {
                sections: diff.inserted_sections.clone(),
            });
        }
        if !diff.inserted_items.is_empty() {
            batch.push(BatchOp::InsertItems {
                positions: diff.inserted_items.clone(),
            });
        }

        let mut fixup = Vec::new();
        let reloads: BTreeSet<Position> = diff
            .moved_items
            .iter()
            .map(|m| m.to)
            .chain(diff.deferred_updates.iter().copied())
            .collect();
        if !reloads.is_empty() {
            fixup.push(BatchOp::ReloadItems {
                positions: reloads.into_iter().collect(),
            });
        }
        if !diff.updated_sections.is_empty() {
            fixup.push(BatchOp::ReloadSections {
                sections: diff.updated_sections.clone(),
            });
        }

        Self { batch, fixup }
    }

    pub fn is_empty(&self) -> bool {
        self.batch.is_empty() && self.fixup.is_empty()
    }
}

/// Execute a plan against a surface
///
/// Issues `begin_batch`, the batch operations and `end_batch`, then the
/// fix-up operations. The batch bracket is skipped when the batch is empty;
/// nothing at all is issued for an empty plan.
pub fn apply_plan<S: ListSurface + ?Sized>(plan: &BatchPlan, surface: &mut S) {
    if !plan.batch.is_empty() {
        surface.begin_batch();
        for op in &plan.batch {
            dispatch(op, surface);
        }
        surface.end_batch();
    }
    for op in &plan.fixup {
        dispatch(op, surface);
    }
}

fn dispatch<S: ListSurface + ?Sized>(op: &BatchOp, surface: &mut S) {
    match op {
        BatchOp::ReloadItems { positions } => surface.reload_items(positions),
        BatchOp::DeleteSections { sections } => surface.delete_sections(sections),
        BatchOp::DeleteItems { positions } => surface.delete_items(positions),
        BatchOp::MoveSection { from, to } => surface.move_section(*from, *to),
        BatchOp::MoveItem { from, to } => surface.move_item(*from, *to),
        BatchOp::InsertSections { sections } => surface.insert_sections(sections),
        BatchOp::InsertItems { positions } => surface.insert_items(positions),
        BatchOp::ReloadSections { sections } => surface.reload_sections(sections),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diff::model::{ItemMove, SectionMove};

    #[derive(Default)]
    struct Recorder {
        calls: Vec<String>,
    }

    impl ListSurface for Recorder {
        fn begin_batch(&mut self) {
            self.calls.push("begin".to_string());
        }
        fn end_batch(&mut self) {
            self.calls.push("end".to_string());
        }
        fn reload_items(&mut self, positions: &[Position]) {
            self.calls.push(format!("reload_items {}", positions.len()));
        }
        fn delete_sections(&mut self, sections: &[usize]) {
            self.calls.push(format!("delete_sections {:?}", sections));
        }
        fn delete_items(&mut self, positions: &[Position]) {
            self.calls.push(format!("delete_items {}", positions.len()));
        }
        fn move_section(&mut self, from: usize, to: usize) {
            self.calls.push(format!("move_section {} {}", from, to));
        }
        fn move_item(&mut self, from: Position, to: Position) {
            self.calls.push(format!("move_item {} {}", from, to));
        }
        fn insert_sections(&mut self, sections: &[usize]) {
            self.calls.push(format!("insert_sections {:?}", sections));
        }
        fn insert_items(&mut self, positions: &[Position]) {
            self.calls.push(format!("insert_items {}", positions.len()));
        }
        fn reload_sections(&mut self, sections: &[usize]) {
            self.calls.push(format!("reload_sections {:?}", sections));
        }
    }

    fn p(section: usize, row: usize) -> Position {
        Position::new(section, row)
    }

    #[test]
    fn test_empty_diff_issues_no_calls() {
        let plan = BatchPlan::from_diff(&DiffResult::default());
        assert!(plan.is_empty());
        let mut recorder = Recorder::default();
        apply_plan(&plan, &mut recorder);
        assert!(recorder.calls.is_empty());
    }

    #[test]
    fn test_full_diff_follows_contract_order() {
        let diff = DiffResult {
            updated_items: vec![p(0, 0)],
            updated_sections: vec![1],
            deleted_items: vec![p(0, 2)],
            deleted_sections: vec![2],
            inserted_items: vec![p(1, 0)],
            inserted_sections: vec![3],
            moved_sections: vec![SectionMove { from: 4, to: 4 }],
            moved_items: vec![ItemMove::new(p(0, 1), p(0, 3))],
            deferred_updates: vec![p(0, 4)],
        };
        let mut recorder = Recorder::default();
        apply_plan(&BatchPlan::from_diff(&diff), &mut recorder);
        assert_eq!(
            recorder.calls,
            vec![
                "begin",
                "reload_items 1",
                "delete_sections [2]",
                "delete_items 1",
                "move_section 4 4",
                "move_item 0-1 0-3",
                "insert_sections [3]",
                "insert_items 1",
                "end",
                "reload_items 2",
                "reload_sections [1]",
            ]
        );
    }

    #[test]
    fn test_fixup_reloads_are_deduplicated() {
        let diff = DiffResult {
            moved_items: vec![ItemMove::new(p(0, 0), p(0, 1))],
            deferred_updates: vec![p(0, 1)],
            ..DiffResult::default()
        };
        let plan = BatchPlan::from_diff(&diff);
        assert_eq!(
            plan.fixup,
            vec![BatchOp::ReloadItems {
                positions: vec![p(0, 1)]
            }]
        );
    }

    #[test]
    fn test_hand_built_section_moves_keep_their_order() {
        let diff = DiffResult {
            moved_sections: vec![SectionMove { from: 0, to: 2 }, SectionMove { from: 2, to: 0 }],
            ..DiffResult::default()
        };
        let plan = BatchPlan::from_diff(&diff);
        assert_eq!(
            plan.batch,
            vec![
                BatchOp::MoveSection { from: 0, to: 2 },
                BatchOp::MoveSection { from: 2, to: 0 },
            ]
        );
        assert!(plan.fixup.is_empty());

        let mut recorder = Recorder::default();
        apply_plan(&plan, &mut recorder);
        assert_eq!(
            recorder.calls,
            vec!["begin", "move_section 0 2", "move_section 2 0", "end"]
        );
    }

    #[test]
    fn test_section_reload_only_skips_batch_bracket() {
        let diff = DiffResult {
            updated_sections: vec![0],
            ..DiffResult::default()
        };
        let mut recorder = Recorder::default();
        apply_plan(&BatchPlan::from_diff(&diff), &mut recorder);
        assert_eq!(recorder.calls, vec!["reload_sections [0]"]);
    }
}
