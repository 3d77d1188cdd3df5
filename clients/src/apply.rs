//! The change-list application pipeline.
//!
//! Seeds a store (from a project document, or empty), applies each
//! change-list file as one batch, then writes every ontology as N-Triples,
//! Turtle and JSON-LD next to the project snapshot and revision history.

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use ontochange_model::change_list::{minimise, ontology_ids_of};
use ontochange_model::serializer::{jsonld, ntriples, turtle};
use ontochange_model::{Ontology, OntologyChange, OntologyId, OntologyStore, ProjectDocument};
use tracing::{info, warn};

/// File name of the final project document.
pub const PROJECT_FILE: &str = "project.json";
/// File name of the revision history.
pub const HISTORY_FILE: &str = "history.json";

/// Inputs of one run.
#[derive(Debug, Clone)]
pub struct ApplyOptions {
    /// Project document seeding the store. Without one, ontologies are
    /// created on first use.
    pub project: Option<PathBuf>,
    /// Change-list files, applied in order, one batch each.
    pub changes: Vec<PathBuf>,
    /// Output directory.
    pub out: PathBuf,
    /// Minimise each list before applying it.
    pub minimise: bool,
    /// Author recorded on revisions.
    pub author: String,
}

/// What one run produced.
#[derive(Debug, Clone, Default)]
pub struct ApplySummary {
    /// Revision numbers committed, in order.
    pub revisions: Vec<u64>,
    /// Files written, in order.
    pub written: Vec<PathBuf>,
}

/// Runs the pipeline.
///
/// # Errors
///
/// Returns an error if an input cannot be read or parsed, if a batch is
/// rejected by the store, or if an output cannot be written.
pub fn run(options: &ApplyOptions) -> Result<ApplySummary> {
    let store = match &options.project {
        Some(path) => {
            let document: ProjectDocument = read_json(path)?;
            OntologyStore::from_document(document)
                .with_context(|| format!("Invalid project {}", path.display()))?
        }
        None => OntologyStore::new(),
    };

    let mut summary = ApplySummary::default();
    for path in &options.changes {
        let mut changes: Vec<OntologyChange> = read_json(path)?;
        if options.project.is_none() {
            create_missing(&store, &changes)?;
        }
        if options.minimise {
            let before = changes.len();
            changes = minimise(&changes);
            info!(path = %path.display(), before, after = changes.len(), "minimised change list");
        }
        let message = format!("Apply {}", path.display());
        let result = store
            .apply_changes(&options.author, &message, &changes)
            .with_context(|| format!("Failed to apply {}", path.display()))?;
        match result.revision() {
            Some(revision) => summary.revisions.push(revision),
            None => warn!(path = %path.display(), "change list had no effect"),
        }
    }

    fs::create_dir_all(&options.out).with_context(|| {
        format!("Failed to create output directory: {}", options.out.display())
    })?;

    // Per-ontology stems must not collide with the run-level documents.
    let mut stems: BTreeSet<String> = [PROJECT_FILE, HISTORY_FILE]
        .iter()
        .filter_map(|name| name.strip_suffix(".json"))
        .map(str::to_owned)
        .collect();
    for id in store.ontology_ids() {
        let Some(ontology) = store.ontology(&id) else {
            continue;
        };
        let stem = unique_stem(&id, &mut stems);
        summary.written.extend(write_ontology(&options.out, &stem, &ontology)?);
    }

    let project_path = options.out.join(PROJECT_FILE);
    write_json(&project_path, &store.to_document())?;
    summary.written.push(project_path);

    let history_path = options.out.join(HISTORY_FILE);
    write_json(&history_path, &store.history())?;
    summary.written.push(history_path);

    Ok(summary)
}

fn create_missing(store: &OntologyStore, changes: &[OntologyChange]) -> Result<()> {
    let known: BTreeSet<OntologyId> = store.ontology_ids().into_iter().collect();
    for id in ontology_ids_of(changes) {
        if !known.contains(&id) {
            info!(ontology = %id, "creating ontology");
            store.create_ontology(id)?;
        }
    }
    Ok(())
}

/// A file stem for `id`: the last IRI segment, made unique within a run.
fn unique_stem(id: &OntologyId, taken: &mut BTreeSet<String>) -> String {
    let base: String = id
        .ontology_iri()
        .map_or("anonymous", |iri| iri.local_name())
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
        .collect();
    let base = if base.is_empty() { "ontology".to_owned() } else { base };
    let mut stem = base.clone();
    let mut n = 2;
    while !taken.insert(stem.clone()) {
        stem = format!("{base}-{n}");
        n += 1;
    }
    stem
}

fn write_ontology(out: &Path, stem: &str, ontology: &Ontology) -> Result<Vec<PathBuf>> {
    let nt_path = out.join(format!("{stem}.nt"));
    fs::write(&nt_path, ntriples::to_ntriples(ontology))
        .with_context(|| format!("Failed to write {}", nt_path.display()))?;

    let ttl_path = out.join(format!("{stem}.ttl"));
    fs::write(&ttl_path, turtle::to_turtle(ontology))
        .with_context(|| format!("Failed to write {}", ttl_path.display()))?;

    let json_path = out.join(format!("{stem}.json"));
    write_json(&json_path, &jsonld::to_json_ld(ontology))?;

    Ok(vec![nt_path, ttl_path, json_path])
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("Failed to parse {}", path.display()))
}

fn write_json<T: serde::Serialize>(path: &Path, value: &T) -> Result<()> {
    let text = serde_json::to_string_pretty(value)
        .with_context(|| format!("Failed to serialize {}", path.display()))?;
    fs::write(path, text).with_context(|| format!("Failed to write {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use ontochange_model::Iri;

    const PIZZA: &str = r#"[
      { "ontology": { "ontology_iri": "http://example.org/pizza" },
        "data": { "kind": "add-import", "payload": "http://example.org/food" } },
      { "ontology": { "ontology_iri": "http://example.org/pizza" },
        "data": { "kind": "remove-import", "payload": "http://example.org/food" } },
      { "ontology": { "ontology_iri": "http://example.org/pizza" },
        "data": { "kind": "add-import", "payload": "http://example.org/food" } }
    ]"#;

    fn options(dir: &Path, minimise: bool) -> ApplyOptions {
        let changes = dir.join("pizza.json");
        fs::write(&changes, PIZZA).expect("write");
        ApplyOptions {
            project: None,
            changes: vec![changes],
            out: dir.join("public"),
            minimise,
            author: "alice".to_owned(),
        }
    }

    #[test]
    fn writes_artifacts_and_history() {
        let dir = tempfile::tempdir().expect("tempdir");
        let summary = run(&options(dir.path(), false)).expect("run");
        assert_eq!(summary.revisions, vec![1]);
        for name in ["pizza.nt", "pizza.ttl", "pizza.json", "project.json", "history.json"] {
            assert!(dir.path().join("public").join(name).is_file(), "missing {name}");
        }
        let history = fs::read_to_string(dir.path().join("public/history.json")).expect("read");
        let history: serde_json::Value = serde_json::from_str(&history).expect("parse");
        assert_eq!(history["revisions"][0]["changes"].as_array().map(Vec::len), Some(3));
        assert_eq!(history["revisions"][0]["author"], "alice");
    }

    #[test]
    fn minimise_shrinks_recorded_revision() {
        let dir = tempfile::tempdir().expect("tempdir");
        run(&options(dir.path(), true)).expect("run");
        let history = fs::read_to_string(dir.path().join("public/history.json")).expect("read");
        let history: serde_json::Value = serde_json::from_str(&history).expect("parse");
        assert_eq!(history["revisions"][0]["changes"].as_array().map(Vec::len), Some(1));
    }

    #[test]
    fn project_rejects_unknown_ontologies() {
        let dir = tempfile::tempdir().expect("tempdir");
        let project = dir.path().join("project.json");
        fs::write(&project, r#"{ "ontologies": [] }"#).expect("write");
        let mut options = options(dir.path(), false);
        options.project = Some(project);
        assert!(run(&options).is_err());
        assert!(!dir.path().join("public").exists());
    }

    #[test]
    fn ontologies_named_like_run_documents_keep_their_files() {
        let dir = tempfile::tempdir().expect("tempdir");
        let changes = dir.path().join("history.json");
        fs::write(
            &changes,
            r#"[
              { "ontology": { "ontology_iri": "http://example.org/history" },
                "data": { "kind": "add-import", "payload": "http://example.org/food" } },
              { "ontology": { "ontology_iri": "http://example.org/project" },
                "data": { "kind": "add-import", "payload": "http://example.org/food" } }
            ]"#,
        )
        .expect("write");
        let options = ApplyOptions {
            project: None,
            changes: vec![changes],
            out: dir.path().join("public"),
            minimise: false,
            author: "alice".to_owned(),
        };
        let summary = run(&options).expect("run");

        let unique: BTreeSet<_> = summary.written.iter().collect();
        assert_eq!(unique.len(), summary.written.len(), "{:?}", summary.written);

        let out = dir.path().join("public");
        for name in ["history-2.json", "project-2.json"] {
            let text = fs::read_to_string(out.join(name)).expect("read");
            let value: serde_json::Value = serde_json::from_str(&text).expect("parse");
            assert!(value.get("@graph").is_some(), "{name} is not JSON-LD");
        }
        let history = fs::read_to_string(out.join(HISTORY_FILE)).expect("read");
        let history: serde_json::Value = serde_json::from_str(&history).expect("parse");
        assert!(history.get("revisions").is_some());
        let project = fs::read_to_string(out.join(PROJECT_FILE)).expect("read");
        let project: serde_json::Value = serde_json::from_str(&project).expect("parse");
        assert!(project.get("ontologies").is_some());
    }

    #[test]
    fn stems_are_unique() {
        let mut taken = BTreeSet::new();
        let id = OntologyId::new(Iri::parse("http://example.org/pizza").expect("valid IRI"));
        assert_eq!(unique_stem(&id, &mut taken), "pizza");
        assert_eq!(unique_stem(&id, &mut taken), "pizza-2");
        assert_eq!(unique_stem(&OntologyId::anonymous(), &mut taken), "anonymous");
    }
}
