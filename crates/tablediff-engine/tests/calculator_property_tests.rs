#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use common::{ascending, calculator, header_policy, row, Row};
use proptest::prelude::*;
use tablediff_core::rules::{check_convergence, check_diff};
use tablediff_core::Snapshot;

const HEADERS: [char; 4] = ['A', 'B', 'C', 'D'];

fn rows_strategy() -> impl Strategy<Value = Vec<Row>> {
    prop::collection::vec((0..HEADERS.len(), 0u8..6), 0..12).prop_map(|specs| {
        specs
            .into_iter()
            .enumerate()
            .map(|(id, (header, text))| row(id as u32, HEADERS[header], &text.to_string()))
            .collect()
    })
}

/// Keep each row with some probability, possibly changing its header or text
fn edit_strategy(base: Vec<Row>) -> impl Strategy<Value = (Vec<Row>, Vec<Row>)> {
    let len = base.len();
    (
        prop::collection::vec((0u8..5, 0..HEADERS.len(), 0u8..6), len),
        prop::collection::vec((0..HEADERS.len(), 0u8..6), 0..4),
    )
        .prop_map(move |(edits, added)| {
            let mut next = Vec::new();
            for (original, (action, header, text)) in base.iter().zip(edits) {
                match action {
                    0 => {}
                    1 => next.push(row(original.id, HEADERS[header], &original.text)),
                    2 => next.push(row(original.id, original.header, &text.to_string())),
                    _ => next.push(original.clone()),
                }
            }
            for (offset, (header, text)) in added.into_iter().enumerate() {
                next.push(row(1000 + offset as u32, HEADERS[header], &text.to_string()));
            }
            (base.clone(), next)
        })
}

fn pair_strategy() -> impl Strategy<Value = (Vec<Row>, Vec<Row>)> {
    rows_strategy().prop_flat_map(edit_strategy)
}

proptest! {
    #[test]
    fn prop_reconcile_of_own_items_is_empty(rows in rows_strategy()) {
        let mut calc = calculator();
        calc.set_items(&rows).unwrap();

        let items = calc.items().to_vec();
        let diff = calc.reconcile(&items, true).unwrap();

        prop_assert!(diff.is_empty(), "diff: {:?}", diff);
    }

    #[test]
    fn prop_snapshot_converges_to_sorted_input((old, new) in pair_strategy()) {
        let mut calc = calculator();
        calc.set_items(&old).unwrap();
        calc.set_items(&new).unwrap();

        let mut expected = new.clone();
        expected.sort_by(ascending);
        prop_assert_eq!(calc.items(), expected.as_slice());

        let fresh = Snapshot::build(expected, &header_policy()).unwrap();
        prop_assert_eq!(calc.sections(), fresh.sections());
    }

    #[test]
    fn prop_every_transition_is_legal((old, new) in pair_strategy()) {
        let mut calc = calculator();
        calc.set_items(&old).unwrap();
        let before = calc.snapshot().clone();

        let diff = calc.set_items(&new).unwrap();

        let violations = check_diff(&before, calc.snapshot(), &diff);
        prop_assert!(violations.is_empty(), "violations: {:?}", violations);
    }

    #[test]
    fn prop_replayed_batch_reproduces_new_order((old, new) in pair_strategy()) {
        let mut calc = calculator();
        calc.set_items(&old).unwrap();
        let before = calc.snapshot().clone();

        let diff = calc.set_items(&new).unwrap();

        let divergent = check_convergence(&before, calc.snapshot(), &diff);
        prop_assert!(divergent.is_empty(), "divergent: {:?}\ndiff: {:?}", divergent, diff);
    }
}
