//! Section derivation over an ordered item sequence

use crate::model::Section;
use crate::policy::SectionPolicy;

/// Cut an ordered item sequence into sections
///
/// Walks the sequence once. A new section opens wherever the policy says the
/// current item does not continue the previous item's group; the last run
/// closes at the end of the sequence. Empty input yields no sections.
///
/// The result partitions `0..items.len()` with no gaps or overlaps, in
/// ascending offset order.
pub fn build_sections<I, P>(items: &[I], policy: &P) -> Vec<Section<P::Content>>
where
    P: SectionPolicy<I>,
{
    let mut sections = Vec::new();
    let Some(first) = items.first() else {
        return sections;
    };

    let mut run_start = 0;
    let mut run_first = first;
    for (index, pair) in items.windows(2).enumerate() {
        if !policy.same_group(&pair[0], &pair[1]) {
            let boundary = index + 1;
            sections.push(policy.build_section(run_first, run_start, boundary));
            run_start = boundary;
            run_first = &pair[1];
        }
    }
    sections.push(policy.build_section(run_first, run_start, items.len()));

    sections
}
