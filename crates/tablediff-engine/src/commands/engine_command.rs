//! Engine-level mutation commands.

use tablediff_core::model::Item;
use tablediff_core::policy::SectionPolicy;
use tablediff_core::DiffResult;

use crate::calculator::{DiffCalculator, EngineResult};

/// Mutations a calculator accepts
#[derive(Debug, Clone, PartialEq)]
pub enum EngineCommand<I> {
    /// Reconcile with an explicit item set
    Reconcile { items: Vec<I>, already_sorted: bool },
    /// Reconcile with sorting
    SetItems { items: Vec<I> },
    /// Replace-or-append `add_or_update`, remove `delete` by identity
    UpdateItems {
        add_or_update: Vec<I>,
        delete: Vec<I>,
    },
    /// Re-sort the retained items with the current comparator
    Resort,
}

impl<I> EngineCommand<I> {
    /// Operation name used in logs and errors
    pub fn op_name(&self) -> &'static str {
        match self {
            EngineCommand::Reconcile { .. } => "reconcile",
            EngineCommand::SetItems { .. } => "set_items",
            EngineCommand::UpdateItems { .. } => "update_items",
            EngineCommand::Resort => "resort",
        }
    }
}

/// Apply an engine command to a calculator.
///
/// # Errors
///
/// Propagates the calculator's `ExError`; the retained snapshot is unchanged
/// on error.
pub fn apply_engine_command<I, P>(
    cmd: EngineCommand<I>,
    calculator: &mut DiffCalculator<I, P>,
) -> EngineResult<DiffResult>
where
    I: Item,
    P: SectionPolicy<I>,
{
    match cmd {
        EngineCommand::Reconcile {
            items,
            already_sorted,
        } => calculator.reconcile(&items, already_sorted),
        EngineCommand::SetItems { items } => calculator.set_items(&items),
        EngineCommand::UpdateItems {
            add_or_update,
            delete,
        } => calculator.update_items(&add_or_update, &delete),
        EngineCommand::Resort => calculator.resort(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_op_names() {
        let cmd: EngineCommand<u32> = EngineCommand::SetItems { items: vec![1] };
        assert_eq!(cmd.op_name(), "set_items");
        assert_eq!(EngineCommand::<u32>::Resort.op_name(), "resort");
    }
}
