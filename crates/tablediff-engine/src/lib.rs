//! Tablediff Engine - stateful reconciliation
//!
//! Owns the retained snapshot, the section policy and the optional
//! comparator, and exposes the mutation, accessor and command/query surfaces
//! over the pure core.

pub mod calculator;
pub mod commands;

pub use calculator::{DiffCalculator, EngineResult};
pub use commands::engine_command::{apply_engine_command, EngineCommand};
pub use commands::engine_query::{apply_engine_query, EngineQuery, EngineQueryResult};
