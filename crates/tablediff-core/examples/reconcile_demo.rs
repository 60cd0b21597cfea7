//! Reconcile Demonstration
//!
//! Diffs two sectioned snapshots and walks the result through a batch plan.
#![allow(clippy::unwrap_used, clippy::expect_used)]
//!
//! Key concepts illustrated:
//! 1. Section derivation from sorted items
//! 2. Section destroy/create vs item-level operations
//! 3. Batch ordering for a rendering surface

use tablediff_core::diff::render_human_summary;
use tablediff_core::rules::{check_convergence, check_diff};
use tablediff_core::{BatchPlan, Item, KeyedSectionPolicy, Snapshot};

#[derive(Debug, Clone)]
struct Contact {
    id: u32,
    initial: char,
    name: &'static str,
}

impl Item for Contact {
    fn same_identity(&self, other: &Self) -> bool {
        self.id == other.id
    }

    fn same_content(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

fn contacts(list: &[(u32, &'static str)]) -> Vec<Contact> {
    let mut items: Vec<Contact> = list
        .iter()
        .map(|&(id, name)| Contact {
            id,
            initial: name.chars().next().unwrap_or('#'),
            name,
        })
        .collect();
    items.sort_by(|a, b| a.name.cmp(b.name));
    items
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== Tablediff Reconcile Demo ===\n");

    let policy = KeyedSectionPolicy::new(|c: &Contact| c.initial);

    let old = Snapshot::build(
        contacts(&[(1, "Ada"), (2, "Alan"), (3, "Barbara"), (4, "Claude")]),
        &policy,
    )?;
    println!("Old: {} items in {} sections", old.len(), old.section_count());

    // Barbara leaves (B destroyed), Alan is renamed to Edsger (new E section),
    // Grace joins.
    let new = Snapshot::build(
        contacts(&[(1, "Ada"), (2, "Edsger"), (4, "Claude"), (5, "Grace")]),
        &policy,
    )?;
    println!("New: {} items in {} sections\n", new.len(), new.section_count());

    let diff = tablediff_core::compute_diff(&old, &new);
    print!("{}", render_human_summary(&diff));

    let mut violations = check_diff(&old, &new, &diff);
    violations.extend(check_convergence(&old, &new, &diff));
    assert!(violations.is_empty(), "violations: {:?}", violations);
    println!("\n✓ Diff satisfies every batch invariant and replays to the new order\n");

    let plan = BatchPlan::from_diff(&diff);
    println!("## Batch");
    for op in &plan.batch {
        println!("  {}", op);
    }
    println!("## After commit");
    for op in &plan.fixup {
        println!("  {}", op);
    }

    Ok(())
}
