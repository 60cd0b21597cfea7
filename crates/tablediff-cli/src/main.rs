//! Tablediff CLI
//!
//! Replays table-diff scenarios and stress-tests the reconciler

use clap::{Parser, Subcommand};
use tablediff_core::logging_facility::{self, Profile};

mod commands;
mod model;
mod scenario;

#[derive(Debug, Parser)]
#[command(name = "tablediff")]
#[command(about = "Tablediff - sectioned list diffs for table animation", long_about = None)]
struct Cli {
    /// Logging profile: development or production (logs go to stderr)
    #[arg(long, global = true, default_value = "development")]
    log_profile: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Replay a scenario file and print the resulting diff
    Run(commands::run::RunArgs),
    /// Random add/update/delete rounds checked against the diff invariants
    Stress(commands::stress::StressArgs),
}

fn main() {
    let cli = Cli::parse();

    let profile = match cli.log_profile.parse::<Profile>() {
        Ok(profile) => profile,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };
    logging_facility::init(profile);

    let result = match cli.command {
        Commands::Run(args) => commands::run::execute(args),
        Commands::Stress(args) => commands::stress::execute(args),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
