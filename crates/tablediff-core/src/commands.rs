//! Batch operations a list-rendering surface executes
//!
//! One variant per surface call. A [`crate::apply::BatchPlan`] orders them;
//! [`crate::apply::apply_plan`] dispatches them onto a
//! [`crate::apply::ListSurface`].

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::model::Position;

/// A single surface operation
///
/// Section indexes and positions are in the coordinate space the surface
/// expects for that call: deletes, reloads and move sources in the old
/// space, inserts and move destinations in the new space. Post-batch reloads
/// are in the new space.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum BatchOp {
    ReloadItems { positions: Vec<Position> },
    DeleteSections { sections: Vec<usize> },
    DeleteItems { positions: Vec<Position> },
    MoveSection { from: usize, to: usize },
    MoveItem { from: Position, to: Position },
    InsertSections { sections: Vec<usize> },
    InsertItems { positions: Vec<Position> },
    ReloadSections { sections: Vec<usize> },
}

impl fmt::Display for BatchOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BatchOp::ReloadItems { positions } => write!(f, "reload items {}", join(positions)),
            BatchOp::DeleteSections { sections } => {
                write!(f, "delete sections {}", join(sections))
            }
            BatchOp::DeleteItems { positions } => write!(f, "delete items {}", join(positions)),
            BatchOp::MoveSection { from, to } => write!(f, "move section {} -> {}", from, to),
            BatchOp::MoveItem { from, to } => write!(f, "move item {} -> {}", from, to),
            BatchOp::InsertSections { sections } => {
                write!(f, "insert sections {}", join(sections))
            }
            BatchOp::InsertItems { positions } => write!(f, "insert items {}", join(positions)),
            BatchOp::ReloadSections { sections } => {
                write!(f, "reload sections {}", join(sections))
            }
        }
    }
}

fn join<T: fmt::Display>(values: &[T]) -> String {
    let parts: Vec<String> = values.iter().map(ToString::to_string).collect();
    format!("[{}]", parts.join(", "))
}
