//! Diff output types.
//!
//! All collections are sorted ascending so serialized output is
//! deterministic. Item moves sort by their source position.

use serde::{Deserialize, Serialize};

use crate::model::Position;

/// A section moving from an old index to a new index
///
/// [`compute_diff`](crate::diff::compute_diff) never produces one: reordered
/// sections are reported as delete plus insert. The type exists for API
/// completeness, so hand-built diffs and [`BatchPlan`](crate::apply::BatchPlan)
/// can express the full set of surface operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SectionMove {
    pub from: usize,
    pub to: usize,
}

/// An item moving from an old-space position to a new-space position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ItemMove {
    pub from: Position,
    pub to: Position,
}

impl ItemMove {
    pub fn new(from: Position, to: Position) -> Self {
        Self { from, to }
    }

    /// True if both ends lie in the same section index
    pub fn is_section_local(&self) -> bool {
        self.from.section == self.to.section
    }
}

impl std::fmt::Display for ItemMove {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} -> {}", self.from, self.to)
    }
}

/// The edit script between two snapshots
///
/// Coordinates of `updated_items`, `deleted_items`, `deleted_sections` and
/// every `from` are in the old snapshot's space. `inserted_items`,
/// `inserted_sections`, `deferred_updates`, `updated_sections` and every `to`
/// are in the new snapshot's space.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffResult {
    /// Items to reload in place
    pub updated_items: Vec<Position>,
    /// Section indexes whose content differs between the snapshots
    pub updated_sections: Vec<usize>,
    pub deleted_items: Vec<Position>,
    pub deleted_sections: Vec<usize>,
    pub inserted_items: Vec<Position>,
    pub inserted_sections: Vec<usize>,
    pub moved_sections: Vec<SectionMove>,
    pub moved_items: Vec<ItemMove>,
    /// Content changes whose reload collides with a move endpoint; reloaded
    /// after the batch at their new position
    pub deferred_updates: Vec<Position>,
}

impl DiffResult {
    /// True if there is nothing for a rendering surface to do
    pub fn is_empty(&self) -> bool {
        self.updated_items.is_empty()
            && self.updated_sections.is_empty()
            && self.deleted_items.is_empty()
            && self.deleted_sections.is_empty()
            && self.inserted_items.is_empty()
            && self.inserted_sections.is_empty()
            && self.moved_sections.is_empty()
            && self.moved_items.is_empty()
            && self.deferred_updates.is_empty()
    }

    /// Total number of reported operations across all groups
    pub fn operation_count(&self) -> usize {
        self.updated_items.len()
            + self.updated_sections.len()
            + self.deleted_items.len()
            + self.deleted_sections.len()
            + self.inserted_items.len()
            + self.inserted_sections.len()
            + self.moved_sections.len()
            + self.moved_items.len()
            + self.deferred_updates.len()
    }

    /// Sort every collection ascending
    pub(crate) fn normalize(&mut self) {
        self.updated_items.sort();
        self.updated_sections.sort();
        self.deleted_items.sort();
        self.deleted_sections.sort();
        self.inserted_items.sort();
        self.inserted_sections.sort();
        self.moved_sections.sort();
        self.moved_items.sort();
        self.deferred_updates.sort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_empty() {
        let diff = DiffResult::default();
        assert!(diff.is_empty());
        assert_eq!(diff.operation_count(), 0);
    }

    #[test]
    fn test_any_group_makes_non_empty() {
        let mut diff = DiffResult::default();
        diff.deferred_updates.push(Position::new(0, 0));
        assert!(!diff.is_empty());

        let mut diff = DiffResult::default();
        diff.moved_sections.push(SectionMove { from: 0, to: 1 });
        assert!(!diff.is_empty());
        assert_eq!(diff.operation_count(), 1);
    }

    #[test]
    fn test_normalize_sorts_moves_by_source() {
        let mut diff = DiffResult {
            moved_items: vec![
                ItemMove::new(Position::new(1, 0), Position::new(0, 0)),
                ItemMove::new(Position::new(0, 3), Position::new(0, 1)),
                ItemMove::new(Position::new(0, 1), Position::new(0, 3)),
            ],
            deleted_sections: vec![2, 0],
            ..DiffResult::default()
        };
        diff.normalize();
        let sources: Vec<Position> = diff.moved_items.iter().map(|m| m.from).collect();
        assert_eq!(
            sources,
            vec![Position::new(0, 1), Position::new(0, 3), Position::new(1, 0)]
        );
        assert_eq!(diff.deleted_sections, vec![0, 2]);
    }

    #[test]
    fn test_serializes_field_names() {
        let diff = DiffResult {
            moved_items: vec![ItemMove::new(Position::new(0, 0), Position::new(0, 2))],
            ..DiffResult::default()
        };
        let json = serde_json::to_value(&diff).unwrap();
        assert_eq!(json["moved_items"][0]["from"]["row"], 0);
        assert_eq!(json["moved_items"][0]["to"]["row"], 2);
        assert!(json["updated_items"].as_array().unwrap().is_empty());
    }
}
