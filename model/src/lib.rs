//! OWL ontology changes as immutable Rust values.
//!
//! The `ontochange-model` crate describes atomic mutations of the
//! ontologies in a project: adding or removing axioms, imports declarations
//! and ontology annotations. Every change knows its inverse, can be
//! retargeted or rewritten under an IRI mapping, dispatches to visitors and
//! converts into the [`OwlOntologyChangeRecord`] format handed to ontology
//! engines.
//!
//! # Entry Point
//!
//! ```
//! use ontochange_model::{
//!     AddImportChange, ImportsDeclaration, Iri, OntologyChange, OntologyId, OntologyStore,
//! };
//!
//! let id = OntologyId::new(Iri::parse("http://example.org/pizza")?);
//! let store = OntologyStore::new();
//! store.create_ontology(id.clone())?;
//!
//! let import = ImportsDeclaration::new(Iri::parse("http://example.org/food")?);
//! let change = OntologyChange::from(AddImportChange::of(id.clone(), import));
//! let result = store.apply_changes("alice", "import food", &[change.clone()])?;
//! assert_eq!(result.revision(), Some(1));
//!
//! store.apply_changes("alice", "undo", &[change.inverse_change()])?;
//! assert!(store.ontology(&id).map_or(false, |o| o.imports().is_empty()));
//! # Ok::<(), ontochange_model::ChangeError>(())
//! ```
//!
//! # Serialization
//!
//! ```
//! # use ontochange_model::{Ontology, OntologyId, Iri};
//! let ontology = Ontology::new(OntologyId::new(Iri::parse("http://example.org/pizza")?));
//! let turtle = ontochange_model::serializer::turtle::to_turtle(&ontology);
//! let ntriples = ontochange_model::serializer::ntriples::to_ntriples(&ontology);
//! assert!(turtle.contains("owl:Ontology"));
//! assert_eq!(ntriples.lines().count(), 1);
//! # Ok::<(), ontochange_model::ChangeError>(())
//! ```

#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    missing_docs,
    clippy::missing_errors_doc
)]

pub mod axiom;
pub mod change;
pub mod change_list;
pub mod error;
pub mod history;
pub mod model;
pub mod record;
pub mod replace;
pub mod serializer;
pub mod store;
pub mod visitor;

pub use axiom::{Axiom, AxiomType};
pub use change::{
    AddAxiomChange, AddImportChange, AddOntologyAnnotationChange, ChangeKind, OntologyChange,
    RemoveAxiomChange, RemoveImportChange, RemoveOntologyAnnotationChange,
};
pub use error::{ChangeError, Result};
pub use history::{Revision, RevisionHistory};
pub use model::{
    Annotation, AnnotationValue, Entity, EntityType, ImportsDeclaration, Iri, Literal, OntologyId,
};
pub use record::{OwlOntologyChangeData, OwlOntologyChangeRecord};
pub use replace::{IriReplacer, MapIriReplacer};
pub use store::{ChangeApplicationResult, Ontology, OntologyStore, ProjectDocument};
pub use visitor::{OntologyChangeVisitor, OntologyChangeVisitorEx};
