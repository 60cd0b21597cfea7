//! Reconciliation of two snapshots into an edit script.
//!
//! ## Entry point
//!
//! ```
//! use tablediff_core::diff::{compute_diff, render_human_summary};
//! use tablediff_core::policy::SingleSectionPolicy;
//! use tablediff_core::snapshot::Snapshot;
//! use tablediff_core::Item;
//!
//! #[derive(Clone)]
//! struct Word(&'static str);
//!
//! impl Item for Word {
//!     fn same_identity(&self, other: &Self) -> bool {
//!         self.0 == other.0
//!     }
//!     fn same_content(&self, _other: &Self) -> bool {
//!         true
//!     }
//! }
//!
//! let old = Snapshot::build(vec![Word("a"), Word("b")], &SingleSectionPolicy).unwrap();
//! let new = Snapshot::build(vec![Word("b"), Word("a")], &SingleSectionPolicy).unwrap();
//! let diff = compute_diff(&old, &new);
//! assert_eq!(diff.moved_items.len(), 1);
//! println!("{}", render_human_summary(&diff));
//! ```
//!
//! ## Guarantees
//!
//! - **Determinism**: identical inputs produce identical, sorted output.
//! - **Batch legality**: no item move starts in a deleted section or ends in
//!   an inserted section; no position is both updated and a move endpoint.
//! - **No section moves**: reordered sections are reported as delete + insert.

pub mod engine;
pub mod human_summary;
pub mod model;
pub mod reducer;
pub mod resolution;

pub use engine::compute_diff;
pub use human_summary::render_human_summary;
pub use model::{DiffResult, ItemMove, SectionMove};
pub use resolution::{resolve_sections, SectionLayout};
