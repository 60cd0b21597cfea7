//! Engine-level read-only query surface.
//!
//! `apply_engine_query` is the single entry point for reads of the retained
//! snapshot. Unlike `apply_engine_command`, it takes the calculator by shared
//! reference and never changes it.

use std::time::Instant;

use tablediff_core::errors::ExError;
use tablediff_core::model::{Item, Position, Section};
use tablediff_core::policy::SectionPolicy;
use tablediff_core::{log_op_end, log_op_error, log_op_start};

use crate::calculator::{DiffCalculator, EngineResult};

/// Read-only queries supported by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineQuery {
    /// Number of sections in the retained snapshot
    SectionCount,
    /// Number of items in one section
    ItemCount { section: usize },
    /// Section descriptor at an index
    Section { index: usize },
    /// Item at a section-relative position
    ItemAt { position: Position },
    /// Item at a flat index
    Item { index: usize },
    /// Every retained item, in order
    Items,
}

impl EngineQuery {
    /// Operation name used in logs and errors
    pub fn op_name(&self) -> &'static str {
        match self {
            EngineQuery::SectionCount => "section_count",
            EngineQuery::ItemCount { .. } => "item_count",
            EngineQuery::Section { .. } => "section",
            EngineQuery::ItemAt { .. } => "item_at",
            EngineQuery::Item { .. } => "item",
            EngineQuery::Items => "items",
        }
    }
}

/// Result of an engine query; values are copies of the retained data.
#[derive(Debug, Clone, PartialEq)]
pub enum EngineQueryResult<I, C> {
    SectionCount(usize),
    ItemCount(usize),
    Section(Section<C>),
    ItemAt(I),
    Item(I),
    Items(Vec<I>),
}

/// Run a read-only query against a calculator.
///
/// # Errors
///
/// Returns an `ExError` of kind `OutOfRange` for lookups outside the
/// retained snapshot.
pub fn apply_engine_query<I, P>(
    query: EngineQuery,
    calculator: &DiffCalculator<I, P>,
) -> EngineResult<EngineQueryResult<I, P::Content>>
where
    I: Item,
    P: SectionPolicy<I>,
{
    let op = query.op_name();
    log_op_start!(op);
    let start = Instant::now();

    let result = match query {
        EngineQuery::SectionCount => Ok(EngineQueryResult::SectionCount(
            calculator.section_count(),
        )),
        EngineQuery::ItemCount { section } => calculator
            .item_count(section)
            .map(EngineQueryResult::ItemCount),
        EngineQuery::Section { index } => calculator
            .section(index)
            .map(|s| EngineQueryResult::Section(s.clone())),
        EngineQuery::ItemAt { position } => calculator
            .item_at(position)
            .map(|item| EngineQueryResult::ItemAt(item.clone_with_content())),
        EngineQuery::Item { index } => calculator
            .item(index)
            .map(|item| EngineQueryResult::Item(item.clone_with_content())),
        EngineQuery::Items => Ok(EngineQueryResult::Items(
            calculator
                .items()
                .iter()
                .map(Item::clone_with_content)
                .collect(),
        )),
    };

    let elapsed = start.elapsed().as_millis() as u64;
    match result {
        Ok(value) => {
            log_op_end!(op, duration_ms = elapsed);
            Ok(value)
        }
        Err(err) => {
            log_op_error!(op, err.clone(), duration_ms = elapsed);
            Err(ExError::from(err).with_op(op))
        }
    }
}
