//! Human-readable summary renderer for diffs.

use std::fmt::Display;

use crate::diff::model::DiffResult;

/// Render a human-readable Markdown summary of a [`DiffResult`].
///
/// Lists each non-empty operation group with its coordinates, item
/// positions as `section-row`. Informational only.
pub fn render_human_summary(diff: &DiffResult) -> String {
    let mut out = String::new();

    out.push_str("## Table Diff\n\n");

    if diff.is_empty() {
        out.push_str("_No changes._\n");
        return out;
    }

    out.push_str(&format!(
        "**Operations**: {}\n\n",
        diff.operation_count()
    ));

    // Section-level groups
    let has_sections = !diff.deleted_sections.is_empty()
        || !diff.inserted_sections.is_empty()
        || !diff.updated_sections.is_empty()
        || !diff.moved_sections.is_empty();
    if has_sections {
        out.push_str("### Sections\n\n");
        push_group(&mut out, "Deleted", &diff.deleted_sections);
        push_group(&mut out, "Inserted", &diff.inserted_sections);
        push_group(&mut out, "Updated", &diff.updated_sections);
        let moves: Vec<String> = diff
            .moved_sections
            .iter()
            .map(|m| format!("{} → {}", m.from, m.to))
            .collect();
        push_group(&mut out, "Moved", &moves);
        out.push('\n');
    }

    // Item-level groups
    let has_items = !diff.deleted_items.is_empty()
        || !diff.inserted_items.is_empty()
        || !diff.updated_items.is_empty()
        || !diff.moved_items.is_empty()
        || !diff.deferred_updates.is_empty();
    if has_items {
        out.push_str("### Items\n\n");
        push_group(&mut out, "Deleted", &diff.deleted_items);
        push_group(&mut out, "Inserted", &diff.inserted_items);
        push_group(&mut out, "Updated", &diff.updated_items);
        let moves: Vec<String> = diff
            .moved_items
            .iter()
            .map(|m| format!("{} → {}", m.from, m.to))
            .collect();
        push_group(&mut out, "Moved", &moves);
        push_group(&mut out, "Reloaded after batch", &diff.deferred_updates);
        out.push('\n');
    }

    out
}

fn push_group<T: Display>(out: &mut String, label: &str, values: &[T]) {
    if values.is_empty() {
        return;
    }
    let joined: Vec<String> = values.iter().map(|v| format!("`{}`", v)).collect();
    out.push_str(&format!(
        "- **{}** ({}): {}\n",
        label,
        values.len(),
        joined.join(", ")
    ));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diff::model::ItemMove;
    use crate::model::Position;

    #[test]
    fn test_empty_diff_summary() {
        let summary = render_human_summary(&DiffResult::default());
        assert!(summary.starts_with("## Table Diff"));
        assert!(summary.contains("_No changes._"));
        assert!(!summary.contains("### Items"));
    }

    #[test]
    fn test_summary_lists_groups_with_coordinates() {
        let diff = DiffResult {
            deleted_sections: vec![2],
            inserted_items: vec![Position::new(0, 1)],
            moved_items: vec![ItemMove::new(Position::new(1, 0), Position::new(1, 3))],
            ..DiffResult::default()
        };
        let summary = render_human_summary(&diff);
        assert!(summary.contains("**Operations**: 3"));
        assert!(summary.contains("- **Deleted** (1): `2`"));
        assert!(summary.contains("- **Inserted** (1): `0-1`"));
        assert!(summary.contains("`1-0 → 1-3`"));
        assert!(!summary.contains("Reloaded after batch"));
    }

    #[test]
    fn test_summary_mentions_deferred_updates() {
        let diff = DiffResult {
            moved_items: vec![ItemMove::new(Position::new(0, 0), Position::new(0, 1))],
            deferred_updates: vec![Position::new(0, 0)],
            ..DiffResult::default()
        };
        let summary = render_human_summary(&diff);
        assert!(summary.contains("- **Reloaded after batch** (1): `0-0`"));
        assert!(!summary.contains("### Sections"));
    }
}
