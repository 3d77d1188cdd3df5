//! `ontochange-conformance`: validates change-list documents against the
//! change model contract.
//!
//! Runs the complete conformance suite across:
//! - Corpus loading (every `*.json` file parses as a change list)
//! - Change laws (inverse, exclusivity, retargeting, record round trip)
//! - Replay (revert restores state, minimisation preserves it)
//! - Hygiene (redundant adjacent changes)
//! - RDF output (N-Triples, Turtle, JSON-LD structure)
//!
//! **Usage:**
//! ```text
//! ontochange-conformance [--dir <path>] [--config <file.toml>]
//! ```
//!
//! Exits non-zero if any conformance check fails.

#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    missing_docs,
    clippy::missing_errors_doc
)]

use std::path::PathBuf;
use std::process;

use anyhow::Result;
use clap::Parser;
use ontochange_clients::config::Config;
use ontochange_clients::logging;
use ontochange_conformance::{run_all, Severity};

/// Run the change-list conformance suite.
#[derive(Parser)]
#[command(
    name = "ontochange-conformance",
    about = "Validate ontology change lists against the change model contract"
)]
struct Args {
    /// Directory of change-list documents (default from config, else changes/).
    #[arg(long)]
    dir: Option<PathBuf>,

    /// Configuration file (default: ./ontochange.toml when present).
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let config = Config::load(args.config.as_deref())?;
    logging::init(&config.log_level);

    let dir = args.dir.unwrap_or(config.changes_dir);
    let report = run_all(&dir)?;

    // Print results
    println!("Change List Conformance Report");
    println!("==============================");
    println!();

    for result in &report.results {
        println!("{result}");
    }

    let passed = report.count(Severity::Pass);
    let warned = report.count(Severity::Warning);
    let failed = report.failure_count();

    println!();
    println!(
        "Summary: {} passed, {} warnings, {} failed",
        passed, warned, failed
    );

    if failed > 0 {
        eprintln!("Conformance FAILED: {} check(s) did not pass.", failed);
        process::exit(1);
    }

    println!("Conformance PASSED.");
    Ok(())
}
