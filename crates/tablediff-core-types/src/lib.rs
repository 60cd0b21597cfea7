//! Core types shared across the tablediff crates
//!
//! This crate provides foundational types used by both the error and
//! logging facilities:
//!
//! - **Correlation types**: RequestId, one per engine operation
//! - **Schema constants**: Canonical field keys and event names

pub mod correlation;
pub mod schema;

pub use correlation::RequestId;
