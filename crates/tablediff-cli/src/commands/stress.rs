//! Stress command
//!
//! Usage: tablediff stress [--iterations N] [--seed S] [--max-changes K]
//!
//! Each round picks random rows to add, update and delete, applies them with
//! `update_items`, checks the diff against both snapshots and replays it to
//! confirm the batch reproduces the new order.

use clap::Args;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tablediff_core::rules::{check_convergence, check_diff};
use thiserror::Error;

use crate::model::{calculator, Row};

const HEADERS: [&str; 6] = ["A", "B", "C", "D", "E", "F"];
const TEXT_VALUES: u32 = 20;

#[derive(Debug, Args)]
pub struct StressArgs {
    /// Number of rounds
    #[arg(short = 'n', long, default_value_t = 1000)]
    pub iterations: usize,

    /// RNG seed; rounds are reproducible for a given seed
    #[arg(short, long, default_value_t = 42)]
    pub seed: u64,

    /// Upper bound (exclusive) on adds, updates and deletes per round
    #[arg(short, long, default_value_t = 5)]
    pub max_changes: usize,
}

#[derive(Error, Debug)]
#[error("Round {round} produced {count} invariant violation(s); first: {first}")]
pub struct StressFailure {
    pub round: usize,
    pub count: usize,
    pub first: String,
}

fn random_header(rng: &mut StdRng) -> String {
    HEADERS[rng.gen_range(0..HEADERS.len())].to_string()
}

fn random_text(rng: &mut StdRng) -> String {
    rng.gen_range(0..TEXT_VALUES).to_string()
}

/// One random change against `items`: `(add_or_update, delete)`
fn random_change(rng: &mut StdRng, items: &[Row], max_changes: usize) -> (Vec<Row>, Vec<Row>) {
    let bound = max_changes.max(1);
    let mut add_or_update = Vec::new();
    let mut delete = Vec::new();

    let updates = rng.gen_range(0..bound);
    let deletes = rng.gen_range(0..bound);
    let adds = rng.gen_range(0..bound);

    if !items.is_empty() {
        let mut touched = Vec::new();
        for _ in 0..updates {
            let index = rng.gen_range(0..items.len());
            if touched.contains(&index) {
                continue;
            }
            touched.push(index);
            let mut updated = items[index].clone();
            updated.text = random_text(rng);
            if rng.gen_bool(0.5) {
                updated.header = random_header(rng);
            }
            add_or_update.push(updated);
        }

        let mut removed = Vec::new();
        for _ in 0..deletes {
            let index = rng.gen_range(0..items.len());
            if removed.contains(&index) {
                continue;
            }
            removed.push(index);
            delete.push(items[index].clone());
        }
    }

    for _ in 0..adds {
        let header = random_header(rng);
        let text = random_text(rng);
        add_or_update.push(Row::new(header, text));
    }

    (add_or_update, delete)
}

/// Execute stress command
pub fn execute(args: StressArgs) -> Result<(), Box<dyn std::error::Error>> {
    let mut rng = StdRng::seed_from_u64(args.seed);
    let mut calc = calculator(false);
    let mut operations = 0usize;

    for round in 0..args.iterations {
        let (add_or_update, delete) = random_change(&mut rng, calc.items(), args.max_changes);
        let before = calc.snapshot().clone();

        let diff = calc.update_items(&add_or_update, &delete)?;
        operations += diff.operation_count();

        let mut violations = check_diff(&before, calc.snapshot(), &diff);
        violations.extend(check_convergence(&before, calc.snapshot(), &diff));
        if let Some(first) = violations.first() {
            let rendered = serde_json::to_string(&diff)?;
            tracing::error!(
                round = round,
                violations = violations.len(),
                diff = %rendered,
                "invariant violation"
            );
            return Err(Box::new(StressFailure {
                round,
                count: violations.len(),
                first: first.to_string(),
            }));
        }
    }

    println!(
        "✓ {} rounds, {} operations, {} items in {} sections",
        args.iterations,
        operations,
        calc.items().len(),
        calc.section_count()
    );
    Ok(())
}
