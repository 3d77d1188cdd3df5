//! Ontology snapshots and the atomic change store.
//!
//! An [`Ontology`] is a value: ordered sets of imports, annotations and
//! axioms under one id. The [`OntologyStore`] owns a project of such
//! snapshots plus its [`RevisionHistory`] behind a single mutex, so every
//! batch either lands completely or not at all, and batches from different
//! threads never interleave.

use std::collections::btree_map::Entry;
use std::collections::{BTreeMap, BTreeSet};
use std::sync::{Mutex, MutexGuard, PoisonError};

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::axiom::Axiom;
use crate::change::OntologyChange;
use crate::change_list;
use crate::error::{ChangeError, Result};
use crate::history::{Revision, RevisionHistory};
use crate::model::{Annotation, Entity, ImportsDeclaration, OntologyId};

/// A snapshot of one ontology.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ontology {
    id: OntologyId,
    #[serde(default)]
    imports: BTreeSet<ImportsDeclaration>,
    #[serde(default)]
    annotations: BTreeSet<Annotation>,
    #[serde(default)]
    axioms: BTreeSet<Axiom>,
}

impl Ontology {
    /// Creates an empty ontology.
    #[must_use]
    pub fn new(id: OntologyId) -> Self {
        Self {
            id,
            imports: BTreeSet::new(),
            annotations: BTreeSet::new(),
            axioms: BTreeSet::new(),
        }
    }

    /// The ontology id.
    #[must_use]
    pub fn id(&self) -> &OntologyId {
        &self.id
    }

    /// The imports declarations.
    #[must_use]
    pub fn imports(&self) -> &BTreeSet<ImportsDeclaration> {
        &self.imports
    }

    /// The ontology annotations.
    #[must_use]
    pub fn annotations(&self) -> &BTreeSet<Annotation> {
        &self.annotations
    }

    /// The axioms.
    #[must_use]
    pub fn axioms(&self) -> &BTreeSet<Axiom> {
        &self.axioms
    }

    /// Whether the ontology has no imports, annotations or axioms.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.imports.is_empty() && self.annotations.is_empty() && self.axioms.is_empty()
    }

    /// The entities mentioned by the axioms.
    #[must_use]
    pub fn signature(&self) -> BTreeSet<Entity> {
        self.axioms.iter().flat_map(Axiom::signature).collect()
    }

    /// Applies one change and reports whether the snapshot mutated.
    ///
    /// Adding a present payload or removing an absent one is a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`ChangeError::OntologyMismatch`] when the change targets a
    /// different ontology.
    pub fn apply(&mut self, change: &OntologyChange) -> Result<bool> {
        if change.ontology_id() != &self.id {
            return Err(ChangeError::OntologyMismatch {
                expected: self.id.clone(),
                actual: change.ontology_id().clone(),
            });
        }
        let mutated = match change {
            OntologyChange::AddAxiom(c) => self.axioms.insert(c.axiom().clone()),
            OntologyChange::RemoveAxiom(c) => self.axioms.remove(c.axiom()),
            OntologyChange::AddImport(c) => self.imports.insert(c.imports_declaration().clone()),
            OntologyChange::RemoveImport(c) => self.imports.remove(c.imports_declaration()),
            OntologyChange::AddOntologyAnnotation(c) => {
                self.annotations.insert(c.annotation().clone())
            }
            OntologyChange::RemoveOntologyAnnotation(c) => {
                self.annotations.remove(c.annotation())
            }
        };
        Ok(mutated)
    }
}

/// A project of ontologies, as stored on disk.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectDocument {
    /// The ontologies of the project.
    #[serde(default)]
    pub ontologies: Vec<Ontology>,
}

/// The outcome of one committed batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeApplicationResult {
    revision: Option<u64>,
    effective_changes: Vec<OntologyChange>,
}

impl ChangeApplicationResult {
    /// The new revision number, or `None` when nothing changed.
    #[must_use]
    pub fn revision(&self) -> Option<u64> {
        self.revision
    }

    /// The changes that mutated a snapshot, in application order.
    #[must_use]
    pub fn effective_changes(&self) -> &[OntologyChange] {
        &self.effective_changes
    }

    /// Whether the batch changed anything.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.effective_changes.is_empty()
    }
}

#[derive(Debug, Default)]
struct ProjectState {
    ontologies: BTreeMap<OntologyId, Ontology>,
    history: RevisionHistory,
}

/// A mutex-guarded project of ontologies with a revision history.
#[derive(Debug, Default)]
pub struct OntologyStore {
    state: Mutex<ProjectState>,
}

impl OntologyStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds a store from a project document.
    ///
    /// # Errors
    ///
    /// Returns [`ChangeError::DuplicateOntology`] when two ontologies share an
    /// id.
    pub fn from_document(document: ProjectDocument) -> Result<Self> {
        let store = Self::new();
        for ontology in document.ontologies {
            store.insert_ontology(ontology)?;
        }
        Ok(store)
    }

    /// Snapshots every ontology into a project document.
    #[must_use]
    pub fn to_document(&self) -> ProjectDocument {
        ProjectDocument {
            ontologies: self.lock().ontologies.values().cloned().collect(),
        }
    }

    /// Adds an empty ontology.
    ///
    /// # Errors
    ///
    /// Returns [`ChangeError::DuplicateOntology`] when the id is taken.
    pub fn create_ontology(&self, id: OntologyId) -> Result<()> {
        self.insert_ontology(Ontology::new(id))
    }

    /// Adds a populated ontology without recording a revision.
    ///
    /// # Errors
    ///
    /// Returns [`ChangeError::DuplicateOntology`] when the id is taken.
    pub fn insert_ontology(&self, ontology: Ontology) -> Result<()> {
        let mut state = self.lock();
        match state.ontologies.entry(ontology.id.clone()) {
            Entry::Occupied(entry) => Err(ChangeError::DuplicateOntology(entry.key().clone())),
            Entry::Vacant(entry) => {
                debug!(ontology = %ontology.id, "created ontology");
                entry.insert(ontology);
                Ok(())
            }
        }
    }

    /// A snapshot of one ontology.
    #[must_use]
    pub fn ontology(&self, id: &OntologyId) -> Option<Ontology> {
        self.lock().ontologies.get(id).cloned()
    }

    /// The ids of every ontology, in order.
    #[must_use]
    pub fn ontology_ids(&self) -> Vec<OntologyId> {
        self.lock().ontologies.keys().cloned().collect()
    }

    /// A copy of the revision history.
    #[must_use]
    pub fn history(&self) -> RevisionHistory {
        self.lock().history.clone()
    }

    /// A copy of one revision.
    ///
    /// # Errors
    ///
    /// Returns [`ChangeError::UnknownRevision`] when no such revision exists.
    pub fn revision(&self, number: u64) -> Result<Revision> {
        self.lock().history.get(number).cloned()
    }

    /// Applies a batch of changes atomically.
    ///
    /// A revision is recorded when at least one change mutated a snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`ChangeError::UnknownOntology`] when a change targets an
    /// ontology that is not in the store. The store is left untouched.
    pub fn apply_changes(
        &self,
        author: &str,
        message: &str,
        changes: &[OntologyChange],
    ) -> Result<ChangeApplicationResult> {
        let mut state = self.lock();
        Self::commit(&mut state, author, message, changes)
    }

    /// Undoes a revision by applying the inverse of its changes as a new
    /// batch.
    ///
    /// # Errors
    ///
    /// Returns [`ChangeError::UnknownRevision`] when no such revision exists,
    /// or any error [`apply_changes`](Self::apply_changes) reports.
    pub fn revert_revision(&self, author: &str, number: u64) -> Result<ChangeApplicationResult> {
        let mut state = self.lock();
        let inverse = change_list::inverse_of(state.history.get(number)?.changes());
        let message = format!("Revert revision {number}");
        Self::commit(&mut state, author, &message, &inverse)
    }

    fn commit(
        state: &mut ProjectState,
        author: &str,
        message: &str,
        changes: &[OntologyChange],
    ) -> Result<ChangeApplicationResult> {
        let (staged, effective_changes) = match Self::stage(&state.ontologies, changes) {
            Ok(staged) => staged,
            Err(error) => {
                warn!(%error, author, changes = changes.len(), "rejected change batch");
                return Err(error);
            }
        };
        if effective_changes.is_empty() {
            debug!(author, "batch had no effect");
            return Ok(ChangeApplicationResult {
                revision: None,
                effective_changes,
            });
        }
        state.ontologies.extend(staged);
        let revision = state
            .history
            .append(author, message, effective_changes.clone());
        info!(
            revision = revision.number(),
            author,
            changes = effective_changes.len(),
            "committed revision"
        );
        Ok(ChangeApplicationResult {
            revision: Some(revision.number()),
            effective_changes,
        })
    }

    /// Applies `changes` to copies of the affected snapshots.
    fn stage(
        ontologies: &BTreeMap<OntologyId, Ontology>,
        changes: &[OntologyChange],
    ) -> Result<(BTreeMap<OntologyId, Ontology>, Vec<OntologyChange>)> {
        let mut staged: BTreeMap<OntologyId, Ontology> = BTreeMap::new();
        let mut effective = Vec::new();
        for change in changes {
            let id = change.ontology_id();
            let ontology = match staged.entry(id.clone()) {
                Entry::Occupied(entry) => entry.into_mut(),
                Entry::Vacant(entry) => {
                    let snapshot = ontologies
                        .get(id)
                        .cloned()
                        .ok_or_else(|| ChangeError::UnknownOntology(id.clone()))?;
                    entry.insert(snapshot)
                }
            };
            if ontology.apply(change)? {
                debug!(%change, "applied change");
                effective.push(change.clone());
            }
        }
        Ok((staged, effective))
    }

    fn lock(&self) -> MutexGuard<'_, ProjectState> {
        // Batches commit by a single extend after staging, so a poisoned
        // guard still holds a consistent project.
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::change::{AddAxiomChange, AddImportChange, AddOntologyAnnotationChange};
    use crate::model::Iri;

    fn pizza() -> OntologyId {
        OntologyId::new(Iri::parse("http://example.org/pizza").expect("valid IRI"))
    }

    fn iri(local: &str) -> Iri {
        Iri::parse(&format!("http://example.org/pizza#{local}")).expect("valid IRI")
    }

    fn add_sub(id: OntologyId, sub: &str, sup: &str) -> OntologyChange {
        AddAxiomChange::of(
            id,
            Axiom::SubClassOf {
                sub_class: iri(sub),
                super_class: iri(sup),
            },
        )
        .into()
    }

    fn add_import(id: OntologyId) -> OntologyChange {
        AddImportChange::of(
            id,
            ImportsDeclaration::new(Iri::parse("http://example.org/food").expect("valid IRI")),
        )
        .into()
    }

    fn store() -> OntologyStore {
        let store = OntologyStore::new();
        store.create_ontology(pizza()).expect("fresh id");
        store
    }

    #[test]
    fn apply_reports_mutation() {
        let mut ontology = Ontology::new(pizza());
        let change = add_import(pizza());
        assert_eq!(ontology.apply(&change), Ok(true));
        assert_eq!(ontology.apply(&change), Ok(false));
        assert_eq!(ontology.imports().len(), 1);
        assert_eq!(ontology.apply(&change.inverse_change()), Ok(true));
        assert_eq!(ontology.apply(&change.inverse_change()), Ok(false));
        assert!(ontology.is_empty());
    }

    #[test]
    fn apply_rejects_foreign_changes() {
        let mut ontology = Ontology::new(pizza());
        let other = OntologyId::new(Iri::parse("http://example.org/other").expect("valid IRI"));
        assert_eq!(
            ontology.apply(&add_import(other.clone())),
            Err(ChangeError::OntologyMismatch {
                expected: pizza(),
                actual: other,
            })
        );
    }

    #[test]
    fn annotations_are_tracked() {
        let mut ontology = Ontology::new(pizza());
        let change: OntologyChange =
            AddOntologyAnnotationChange::of(pizza(), Annotation::label("Pizza")).into();
        assert_eq!(ontology.apply(&change), Ok(true));
        assert_eq!(ontology.annotations().len(), 1);
    }

    #[test]
    fn create_rejects_duplicates() {
        let store = store();
        assert_eq!(
            store.create_ontology(pizza()),
            Err(ChangeError::DuplicateOntology(pizza()))
        );
    }

    #[test]
    fn batch_commits_revision() {
        let store = store();
        let changes = vec![add_sub(pizza(), "A", "B"), add_import(pizza())];
        let result = store.apply_changes("alice", "init", &changes).expect("apply");
        assert_eq!(result.revision(), Some(1));
        assert_eq!(result.effective_changes(), changes.as_slice());
        let snapshot = store.ontology(&pizza()).expect("present");
        assert_eq!(snapshot.axioms().len(), 1);
        assert_eq!(snapshot.imports().len(), 1);
        assert_eq!(store.revision(1).map(|r| r.author().to_owned()), Ok("alice".to_owned()));
    }

    #[test]
    fn no_op_batch_records_nothing() {
        let store = store();
        let change = add_import(pizza());
        store.apply_changes("alice", "one", &[change.clone()]).expect("apply");
        let result = store.apply_changes("alice", "again", &[change]).expect("apply");
        assert!(result.is_empty());
        assert_eq!(result.revision(), None);
        assert_eq!(store.history().len(), 1);
    }

    #[test]
    fn failed_batch_leaves_store_untouched() {
        let store = store();
        let before = store.ontology(&pizza());
        let unknown = OntologyId::new(Iri::parse("http://example.org/unknown").expect("valid IRI"));
        let changes = vec![add_sub(pizza(), "A", "B"), add_import(unknown.clone())];
        assert_eq!(
            store.apply_changes("alice", "bad", &changes),
            Err(ChangeError::UnknownOntology(unknown))
        );
        assert_eq!(store.ontology(&pizza()), before);
        assert!(store.history().is_empty());
    }

    #[test]
    fn revert_restores_snapshot() {
        let store = store();
        store
            .apply_changes("alice", "seed", &[add_sub(pizza(), "X", "Y")])
            .expect("apply");
        let before = store.ontology(&pizza());
        store
            .apply_changes(
                "alice",
                "edit",
                &[add_sub(pizza(), "A", "B"), add_import(pizza())],
            )
            .expect("apply");
        let reverted = store.revert_revision("bob", 2).expect("revert");
        assert_eq!(reverted.revision(), Some(3));
        assert_eq!(store.ontology(&pizza()), before);
        assert_eq!(
            store.revision(3).map(|r| r.message().to_owned()),
            Ok("Revert revision 2".to_owned())
        );
    }

    #[test]
    fn revert_unknown_revision_fails() {
        assert_eq!(
            store().revert_revision("bob", 7),
            Err(ChangeError::UnknownRevision(7))
        );
    }

    #[test]
    fn concurrent_batches_are_serialized() {
        let store = store();
        std::thread::scope(|scope| {
            for worker in 0..8 {
                let store = &store;
                scope.spawn(move || {
                    let changes: Vec<OntologyChange> = (0..16)
                        .map(|n| add_sub(pizza(), &format!("W{worker}C{n}"), "Top"))
                        .collect();
                    store.apply_changes("worker", "batch", &changes)
                });
            }
        });
        let history = store.history();
        assert_eq!(history.len(), 8);
        for revision in history.iter() {
            assert_eq!(revision.changes().len(), 16);
            // Every change of one batch names the same worker.
            let prefix: BTreeSet<String> = revision
                .changes()
                .iter()
                .filter_map(|c| c.axiom())
                .filter_map(|a| match a {
                    Axiom::SubClassOf { sub_class, .. } => {
                        sub_class.local_name().split('C').next().map(str::to_owned)
                    }
                    _ => None,
                })
                .collect();
            assert_eq!(prefix.len(), 1);
        }
        assert_eq!(store.ontology(&pizza()).map(|o| o.axioms().len()), Some(128));
    }

    #[test]
    fn document_round_trip() {
        let store = store();
        store
            .apply_changes("alice", "seed", &[add_import(pizza())])
            .expect("apply");
        let document = store.to_document();
        let json = serde_json::to_string(&document).expect("serialize");
        let parsed: ProjectDocument = serde_json::from_str(&json).expect("parse");
        let reseeded = OntologyStore::from_document(parsed).expect("seed");
        assert_eq!(reseeded.ontology(&pizza()), store.ontology(&pizza()));
    }
}
