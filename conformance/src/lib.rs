//! Conformance suite for ontology change lists.
//!
//! Loads every change-list document under a directory and checks it against
//! the contract of the change model.
//!
//! # Conformance Scope
//!
//! | Validator | Standard |
//! |-----------|----------|
//! | `corpus` | every `*.json` file is a JSON array of change records |
//! | `laws` | double inverse, family/direction exclusivity, identity retarget, record round trip |
//! | `replay` | revert restores every snapshot, minimisation preserves the final state |
//! | `hygiene` | no duplicate or immediately undone adjacent changes (warnings) |
//! | `rdf` | replayed ontologies serialize to well-formed N-Triples, Turtle and JSON-LD |
//!
//! # Entry Point
//!
//! ```no_run
//! use ontochange_conformance::run_all;
//! use std::path::Path;
//!
//! let report = run_all(Path::new("changes")).expect("Failed to run conformance");
//! assert!(report.all_passed());
//! ```

#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    missing_docs,
    clippy::missing_errors_doc
)]

pub mod corpus;
pub mod report;
pub mod validators;

use std::path::Path;

use tracing::info;

pub use corpus::ChangeListFile;
pub use report::{ConformanceReport, Severity, TestResult};

/// Runs all conformance validators over the change lists under `dir`.
///
/// Validators are run in this order:
/// 1. Corpus loading
/// 2. Change laws
/// 3. Replay, revert and minimisation
/// 4. List hygiene
/// 5. RDF output
///
/// # Errors
///
/// Returns an error only if a file system operation fails.
pub fn run_all(dir: &Path) -> anyhow::Result<ConformanceReport> {
    let (files, mut report) = corpus::load(dir)?;
    info!(dir = %dir.display(), lists = files.len(), "running conformance");

    report.extend(validators::laws::validate(&files));
    report.extend(validators::replay::validate(&files));
    report.extend(validators::hygiene::validate(&files));
    report.extend(validators::rdf::validate(&files));

    Ok(report)
}
