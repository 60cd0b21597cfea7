//! Move-chain reduction
//!
//! Works only on moves that stay inside one surviving section. Each such move
//! carries two ranks: its rank among the items that stay in the section, in
//! old order (source) and in new order (destination). Ranks already account
//! for deletes, inserts and cross-section moves, so the passes below compare
//! ranks rather than raw rows.
//!
//! 1. Index-shift reconciliation: a move whose source rank equals its
//!    destination rank only looks like a move because of index shifts; drop it.
//! 2. Cycle collapse: walk chains (destination rank of one move equals the
//!    source rank of the next) with a visited set. A closed 2-cycle of unit
//!    steps keeps its first step; a closed cycle with exactly one long jump
//!    keeps only the jump. Everything else is emitted unchanged.
//!
//! Cross-section moves pass through untouched.

use std::collections::{BTreeMap, BTreeSet};

use crate::diff::model::ItemMove;

/// Move candidate with its within-section ranks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RankedMove {
    pub item_move: ItemMove,
    /// `(source, destination)` ranks; `None` for cross-section moves
    pub ranks: Option<(usize, usize)>,
}

impl RankedMove {
    /// Move between two sections; never reduced
    pub fn cross(item_move: ItemMove) -> Self {
        Self {
            item_move,
            ranks: None,
        }
    }

    /// Move inside one surviving section
    pub fn local(item_move: ItemMove, source: usize, destination: usize) -> Self {
        Self {
            item_move,
            ranks: Some((source, destination)),
        }
    }

    fn group_key(&self) -> (usize, usize) {
        (self.item_move.from.section, self.item_move.to.section)
    }
}

/// Run both reduction passes and return the moves to emit, sorted by source
pub fn reduce(candidates: Vec<RankedMove>) -> Vec<ItemMove> {
    let mut moves: Vec<ItemMove> = collapse_cycles(drop_index_shift_noops(candidates))
        .into_iter()
        .map(|candidate| candidate.item_move)
        .collect();
    moves.sort();
    moves
}

/// Drop local moves whose source and destination ranks are equal
pub fn drop_index_shift_noops(candidates: Vec<RankedMove>) -> Vec<RankedMove> {
    candidates
        .into_iter()
        .filter(|candidate| match candidate.ranks {
            Some((source, destination)) => source != destination,
            None => true,
        })
        .collect()
}

/// Collapse closed move cycles inside each section pair
pub fn collapse_cycles(candidates: Vec<RankedMove>) -> Vec<RankedMove> {
    let mut kept = Vec::with_capacity(candidates.len());
    // Per section pair: source rank -> (destination rank, candidate)
    let mut groups: BTreeMap<(usize, usize), BTreeMap<usize, (usize, RankedMove)>> =
        BTreeMap::new();

    for candidate in candidates {
        match candidate.ranks {
            Some((source, destination)) => {
                groups
                    .entry(candidate.group_key())
                    .or_default()
                    .insert(source, (destination, candidate));
            }
            None => kept.push(candidate),
        }
    }

    for by_source in groups.values() {
        let mut visited = BTreeSet::new();
        for &start in by_source.keys() {
            if visited.contains(&start) {
                continue;
            }
            let (chain, closed) = walk_chain(by_source, start, &mut visited);
            kept.extend(select_from_chain(&chain, closed));
        }
    }

    kept
}

/// Follow destination ranks from `start` until the chain ends or revisits
fn walk_chain(
    by_source: &BTreeMap<usize, (usize, RankedMove)>,
    start: usize,
    visited: &mut BTreeSet<usize>,
) -> (Vec<(usize, usize, RankedMove)>, bool) {
    let mut chain = Vec::new();
    let mut cursor = start;
    loop {
        let Some(&(destination, candidate)) = by_source.get(&cursor) else {
            return (chain, false);
        };
        if !visited.insert(cursor) {
            return (chain, false);
        }
        chain.push((cursor, destination, candidate));
        if destination == start {
            return (chain, true);
        }
        cursor = destination;
    }
}

fn select_from_chain(chain: &[(usize, usize, RankedMove)], closed: bool) -> Vec<RankedMove> {
    let every = || -> Vec<RankedMove> { chain.iter().map(|&(_, _, candidate)| candidate).collect() };
    if !closed {
        return every();
    }

    let long_jumps: Vec<RankedMove> = chain
        .iter()
        .filter(|(source, destination, _)| source.abs_diff(*destination) > 1)
        .map(|&(_, _, candidate)| candidate)
        .collect();

    match (chain.len(), long_jumps.len()) {
        (2, 0) => vec![chain[0].2],
        (_, 1) => long_jumps,
        _ => every(),
    }
}
