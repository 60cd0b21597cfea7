//! Run command
//!
//! Usage: tablediff run <SCENARIO> [--format json|summary|plan] [--descending]

use std::path::PathBuf;

use clap::{Args, ValueEnum};
use tablediff_core::apply::{apply_plan, BatchPlan, ListSurface};
use tablediff_core::diff::render_human_summary;
use tablediff_core::Position;

use crate::model::calculator;
use crate::scenario::Scenario;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// DiffResult as pretty JSON
    Json,
    /// Markdown summary
    Summary,
    /// Surface calls in the order a batch-update API expects
    Plan,
}

#[derive(Debug, Args)]
pub struct RunArgs {
    /// Scenario file
    pub scenario: PathBuf,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Json)]
    pub format: OutputFormat,

    /// Sort texts descending inside each header
    #[arg(long)]
    pub descending: bool,
}

/// Execute run command
pub fn execute(args: RunArgs) -> Result<(), Box<dyn std::error::Error>> {
    let scenario = Scenario::load(&args.scenario)?;
    tracing::debug!(
        old = scenario.old.len(),
        added = scenario.added.len(),
        updated = scenario.updated.len(),
        deleted = scenario.deleted.len(),
        "scenario loaded"
    );

    let mut calc = calculator(args.descending);
    calc.set_items(&scenario.old)?;
    let diff = calc.update_items(&scenario.add_or_update(), &scenario.deleted)?;

    match args.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&diff)?),
        OutputFormat::Summary => {
            print!("{}", render_human_summary(&diff));
            println!("\n### Rows\n");
            for row in calc.items() {
                println!("- {}", row);
            }
        }
        OutputFormat::Plan => {
            let mut surface = PrintSurface::default();
            apply_plan(&BatchPlan::from_diff(&diff), &mut surface);
            for line in surface.lines {
                println!("{}", line);
            }
        }
    }

    Ok(())
}

/// Records surface calls as text
#[derive(Debug, Default)]
struct PrintSurface {
    lines: Vec<String>,
}

impl PrintSurface {
    fn push(&mut self, line: String) {
        self.lines.push(line);
    }
}

fn positions(positions: &[Position]) -> String {
    positions
        .iter()
        .map(Position::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

fn sections(sections: &[usize]) -> String {
    sections
        .iter()
        .map(usize::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

impl ListSurface for PrintSurface {
    fn begin_batch(&mut self) {
        self.push("begin batch".to_string());
    }

    fn end_batch(&mut self) {
        self.push("end batch".to_string());
    }

    fn reload_items(&mut self, p: &[Position]) {
        self.push(format!("reload items [{}]", positions(p)));
    }

    fn delete_sections(&mut self, s: &[usize]) {
        self.push(format!("delete sections [{}]", sections(s)));
    }

    fn delete_items(&mut self, p: &[Position]) {
        self.push(format!("delete items [{}]", positions(p)));
    }

    fn move_section(&mut self, from: usize, to: usize) {
        self.push(format!("move section {} -> {}", from, to));
    }

    fn move_item(&mut self, from: Position, to: Position) {
        self.push(format!("move item {} -> {}", from, to));
    }

    fn insert_sections(&mut self, s: &[usize]) {
        self.push(format!("insert sections [{}]", sections(s)));
    }

    fn insert_items(&mut self, p: &[Position]) {
        self.push(format!("insert items [{}]", positions(p)));
    }

    fn reload_sections(&mut self, s: &[usize]) {
        self.push(format!("reload sections [{}]", sections(s)));
    }
}
