//! Tablediff Core - sectioned list reconciliation
//!
//! This crate computes the edit script between two ordered, sectioned
//! snapshots of a collection so a list-rendering surface can animate from
//! one to the other:
//! - Item and section-policy contracts
//! - Section derivation and validated snapshots
//! - Diff engine with section resolution and move-chain reduction
//! - Batch plans that drive a rendering surface in a legal order
//! - Invariant checks over computed diffs
//!
//! Everything here is pure and synchronous; the stateful engine lives in
//! `tablediff-engine`.

pub mod apply;
pub mod commands;
pub mod diff;
pub mod errors;
pub mod logging_facility;
pub mod model;
pub mod policy;
pub mod rules;
pub mod snapshot;

// Re-export commonly used types
pub use apply::{apply_plan, BatchPlan, ListSurface};
pub use commands::BatchOp;
pub use diff::{compute_diff, DiffResult, ItemMove, SectionMove};
pub use errors::{DiffError, ExError, ExErrorKind, Result};
pub use model::{Item, Position, Section};
pub use policy::{Comparator, KeyedSectionPolicy, SectionPolicy, SingleSectionPolicy};
pub use snapshot::Snapshot;
