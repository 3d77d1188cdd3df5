//! The change record format handed to ontology engines.
//!
//! A record pairs the target ontology id with a kind-tagged payload. It is
//! the only serialization boundary of the change model: change-list
//! documents on disk are JSON arrays of records.
//!
//! ```json
//! { "ontology": { "ontology_iri": "http://example.org/pizza" },
//!   "data": { "kind": "add-import", "payload": "http://example.org/food" } }
//! ```

use serde::{Deserialize, Serialize};

use crate::axiom::Axiom;
use crate::change::ChangeKind;
use crate::model::{Annotation, ImportsDeclaration, OntologyId};

/// The kind-tagged payload of a change record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "payload", rename_all = "kebab-case")]
pub enum OwlOntologyChangeData {
    /// Add an axiom.
    AddAxiom(Axiom),
    /// Remove an axiom.
    RemoveAxiom(Axiom),
    /// Add an imports declaration.
    AddImport(ImportsDeclaration),
    /// Remove an imports declaration.
    RemoveImport(ImportsDeclaration),
    /// Add an ontology annotation.
    AddOntologyAnnotation(Annotation),
    /// Remove an ontology annotation.
    RemoveOntologyAnnotation(Annotation),
}

impl OwlOntologyChangeData {
    /// The change kind this payload belongs to.
    #[must_use]
    pub fn kind(&self) -> ChangeKind {
        match self {
            OwlOntologyChangeData::AddAxiom(_) => ChangeKind::AddAxiom,
            OwlOntologyChangeData::RemoveAxiom(_) => ChangeKind::RemoveAxiom,
            OwlOntologyChangeData::AddImport(_) => ChangeKind::AddImport,
            OwlOntologyChangeData::RemoveImport(_) => ChangeKind::RemoveImport,
            OwlOntologyChangeData::AddOntologyAnnotation(_) => ChangeKind::AddOntologyAnnotation,
            OwlOntologyChangeData::RemoveOntologyAnnotation(_) => {
                ChangeKind::RemoveOntologyAnnotation
            }
        }
    }
}

/// A serializable (ontology id, payload) pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OwlOntologyChangeRecord {
    #[serde(rename = "ontology")]
    ontology_id: OntologyId,
    data: OwlOntologyChangeData,
}

impl OwlOntologyChangeRecord {
    /// Creates a record.
    #[must_use]
    pub fn new(ontology_id: OntologyId, data: OwlOntologyChangeData) -> Self {
        Self { ontology_id, data }
    }

    /// The id of the target ontology.
    #[must_use]
    pub fn ontology_id(&self) -> &OntologyId {
        &self.ontology_id
    }

    /// The payload.
    #[must_use]
    pub fn data(&self) -> &OwlOntologyChangeData {
        &self.data
    }

    /// Splits the record into its id and payload.
    #[must_use]
    pub fn into_parts(self) -> (OntologyId, OwlOntologyChangeData) {
        (self.ontology_id, self.data)
    }
}
