//! Section resolution: which sections survive, which are destroyed or created
//!
//! Sections are paired across snapshots by content equality. Section moves
//! are not reported, so only pairs whose new indexes increase along the old
//! order can survive; the longest such run is kept and every other pair is
//! reported as a delete of the old section plus an insert of the new one.

use crate::model::Section;

/// How the old section sequence maps onto the new one
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SectionLayout {
    /// Surviving new index for each old section, `None` if destroyed
    pub old_to_new: Vec<Option<usize>>,
    /// Surviving old index for each new section, `None` if created
    pub new_to_old: Vec<Option<usize>>,
    /// Destroyed old section indexes, ascending
    pub deleted: Vec<usize>,
    /// Created new section indexes, ascending
    pub inserted: Vec<usize>,
    /// Indexes present in both sequences whose content differs, ascending
    pub updated: Vec<usize>,
}

impl SectionLayout {
    pub fn is_deleted(&self, old_section: usize) -> bool {
        matches!(self.old_to_new.get(old_section), Some(None))
    }

    pub fn is_inserted(&self, new_section: usize) -> bool {
        matches!(self.new_to_old.get(new_section), Some(None))
    }

    /// True if old section `old_section` survives as new section `new_section`
    pub fn survives_as(&self, old_section: usize, new_section: usize) -> bool {
        self.old_to_new.get(old_section) == Some(&Some(new_section))
    }
}

/// Pair old and new sections and classify the rest
pub fn resolve_sections<C: PartialEq>(old: &[Section<C>], new: &[Section<C>]) -> SectionLayout {
    // Content is unique within a validated snapshot, so first match is the match.
    let pairs: Vec<(usize, usize)> = old
        .iter()
        .enumerate()
        .filter_map(|(old_index, section)| {
            new.iter()
                .position(|candidate| candidate.content == section.content)
                .map(|new_index| (old_index, new_index))
        })
        .collect();

    let targets: Vec<usize> = pairs.iter().map(|&(_, new_index)| new_index).collect();

    let mut old_to_new = vec![None; old.len()];
    let mut new_to_old = vec![None; new.len()];
    for keep in longest_increasing_subsequence(&targets) {
        let (old_index, new_index) = pairs[keep];
        old_to_new[old_index] = Some(new_index);
        new_to_old[new_index] = Some(old_index);
    }

    let deleted = indexes_of_none(&old_to_new);
    let inserted = indexes_of_none(&new_to_old);
    let updated = old
        .iter()
        .zip(new.iter())
        .enumerate()
        .filter(|(_, (before, after))| before.content != after.content)
        .map(|(index, _)| index)
        .collect();

    SectionLayout {
        old_to_new,
        new_to_old,
        deleted,
        inserted,
        updated,
    }
}

fn indexes_of_none(mapping: &[Option<usize>]) -> Vec<usize> {
    mapping
        .iter()
        .enumerate()
        .filter(|(_, target)| target.is_none())
        .map(|(index, _)| index)
        .collect()
}

/// Indexes into `values` of one longest strictly increasing subsequence
///
/// Patience sorting with predecessor links, O(k log k). Ties between equally
/// long runs resolve toward the run ending in the smallest value.
fn longest_increasing_subsequence(values: &[usize]) -> Vec<usize> {
    // tails[l]: index of the smallest tail of any increasing run of length l + 1
    let mut tails: Vec<usize> = Vec::new();
    let mut predecessor: Vec<Option<usize>> = vec![None; values.len()];

    for (index, &value) in values.iter().enumerate() {
        let slot = tails.partition_point(|&tail| values[tail] < value);
        if slot > 0 {
            predecessor[index] = Some(tails[slot - 1]);
        }
        if slot == tails.len() {
            tails.push(index);
        } else {
            tails[slot] = index;
        }
    }

    let mut run = Vec::with_capacity(tails.len());
    let mut cursor = tails.last().copied();
    while let Some(index) = cursor {
        run.push(index);
        cursor = predecessor[index];
    }
    run.reverse();
    run
}
