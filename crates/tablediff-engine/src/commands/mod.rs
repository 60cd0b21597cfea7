//! Command and query dispatch over a [`crate::DiffCalculator`].
//!
//! Commands mutate the retained snapshot and return the resulting diff;
//! queries are read-only.

pub mod engine_command;
pub mod engine_query;
