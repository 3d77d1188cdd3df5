//! `ontochange-apply`: applies change-list documents to a project and writes
//! the resulting ontologies to the output directory.
//!
//! **Outputs:**
//! - `<out>/<name>.nt`: N-Triples, one file per ontology
//! - `<out>/<name>.ttl`: Turtle 1.1
//! - `<out>/<name>.json`: JSON-LD 1.1
//! - `<out>/project.json`: the final project document
//! - `<out>/history.json`: the revision history
//!
//! **Usage:**
//! ```text
//! ontochange-apply --changes <file.json>... [--project <file.json>] [--out <path>]
//!                  [--minimise] [--author <name>] [--config <file.toml>]
//! ```

#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    missing_docs,
    clippy::missing_errors_doc
)]

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use ontochange_clients::apply::{run, ApplyOptions};
use ontochange_clients::config::Config;
use ontochange_clients::logging;

/// Apply ontology change lists to a project.
#[derive(Parser)]
#[command(name = "ontochange-apply", about = "Apply ontology change lists to a project")]
struct Args {
    /// Change-list documents, applied in order as one batch each.
    #[arg(long, required = true, num_args = 1..)]
    changes: Vec<PathBuf>,

    /// Project document to seed the store with.
    #[arg(long)]
    project: Option<PathBuf>,

    /// Output directory (default from config, else public/).
    #[arg(long)]
    out: Option<PathBuf>,

    /// Minimise each change list before applying it.
    #[arg(long)]
    minimise: bool,

    /// Author recorded on revisions (default from config, else "anonymous").
    #[arg(long)]
    author: Option<String>,

    /// Configuration file (default: ./ontochange.toml when present).
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let config = Config::load(args.config.as_deref())?;
    logging::init(&config.log_level);

    let options = ApplyOptions {
        project: args.project,
        changes: args.changes,
        out: args.out.unwrap_or(config.out),
        minimise: args.minimise || config.minimise,
        author: args.author.unwrap_or(config.author),
    };

    let summary = run(&options)?;

    println!(
        "Applied {} change list(s): {} revision(s) committed",
        options.changes.len(),
        summary.revisions.len()
    );
    for path in &summary.written {
        println!("  Written: {}", path.display());
    }
    Ok(())
}
