//! Discovery and parsing of change-list documents.
//!
//! A change-list document is a JSON array of change records. Every `*.json`
//! file below the corpus directory is one document; files that do not parse
//! are reported as failures rather than aborting the run.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use ontochange_model::OntologyChange;
use tracing::debug;
use walkdir::WalkDir;

use crate::report::{ConformanceReport, TestResult};

/// One parsed change-list document.
#[derive(Debug, Clone)]
pub struct ChangeListFile {
    /// Where the document was read from.
    pub path: PathBuf,
    /// The changes, in document order.
    pub changes: Vec<OntologyChange>,
}

impl ChangeListFile {
    /// The file name, for report messages.
    pub fn name(&self) -> String {
        self.path
            .file_name()
            .map_or_else(|| self.path.display().to_string(), |n| n.to_string_lossy().into_owned())
    }
}

/// Loads every `*.json` change list under `dir`, sorted by path.
///
/// Parse failures are recorded in the returned report under the `corpus`
/// validator.
///
/// # Errors
///
/// Returns an error if the directory cannot be walked or a file cannot be
/// read.
pub fn load(dir: &Path) -> Result<(Vec<ChangeListFile>, ConformanceReport)> {
    let mut report = ConformanceReport::new();
    let mut paths = Vec::new();
    for entry in WalkDir::new(dir).sort_by_file_name() {
        let entry = entry.with_context(|| format!("Failed to walk {}", dir.display()))?;
        let path = entry.path();
        if entry.file_type().is_file() && path.extension().is_some_and(|ext| ext == "json") {
            paths.push(path.to_path_buf());
        }
    }

    let mut files = Vec::with_capacity(paths.len());
    for path in paths {
        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        match serde_json::from_str::<Vec<OntologyChange>>(&content) {
            Ok(changes) => {
                debug!(path = %path.display(), changes = changes.len(), "loaded change list");
                files.push(ChangeListFile { path, changes });
            }
            Err(e) => report.push(TestResult::fail(
                "corpus",
                format!("{} is not a valid change list: {e}", path.display()),
            )),
        }
    }

    if files.is_empty() && report.results.is_empty() {
        report.push(TestResult::warn(
            "corpus",
            format!("No change lists found under {}", dir.display()),
        ));
    } else if !files.is_empty() {
        report.push(TestResult::pass(
            "corpus",
            format!("Loaded {} change list(s) from {}", files.len(), dir.display()),
        ));
    }

    Ok((files, report))
}
