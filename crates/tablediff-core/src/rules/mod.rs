//! Structural rules over snapshots and computed diffs
//!
//! - `validation`: hard checks that fail a reconcile before anything commits
//! - `invariants`: non-fatal checks over a computed diff, reported as violations,
//!   including a replay that confirms the batch reproduces the new order

pub mod invariants;
pub mod validation;

pub use invariants::{check_convergence, check_diff, DiffViolation};
pub use validation::validate_unique_sections;
