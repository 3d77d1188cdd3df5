//! Error type shared by the change model, the store and the revision history.

use thiserror::Error;

use crate::change::ChangeKind;
use crate::model::OntologyId;

/// Result alias for fallible change-model operations.
pub type Result<T> = std::result::Result<T, ChangeError>;

/// Errors raised by the change model and the ontology store.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChangeError {
    /// A narrowing accessor was called on a change carrying another payload.
    ///
    /// This is a contract violation: callers are expected to check the
    /// change kind first.
    #[error("no such element: {requested} requested from a {actual} change")]
    NoSuchElement {
        /// The payload that was asked for (`"axiom"`, `"annotation"`, `"imports declaration"`).
        requested: &'static str,
        /// The kind of the change that was asked.
        actual: ChangeKind,
    },

    /// The text is not an absolute IRI.
    #[error("invalid IRI '{iri}': {reason}")]
    InvalidIri {
        /// The offending text.
        iri: String,
        /// Why it was rejected.
        reason: &'static str,
    },

    /// A version IRI was supplied for an anonymous ontology.
    #[error("an anonymous ontology cannot carry a version IRI")]
    InvalidOntologyId,

    /// A change was applied to a snapshot of a different ontology.
    #[error("change targets ontology {actual} but was applied to {expected}")]
    OntologyMismatch {
        /// The id of the snapshot.
        expected: OntologyId,
        /// The id carried by the change.
        actual: OntologyId,
    },

    /// A change targets an ontology the store does not hold.
    #[error("unknown ontology: {0}")]
    UnknownOntology(OntologyId),

    /// An ontology with the same id is already in the store.
    #[error("ontology already exists: {0}")]
    DuplicateOntology(OntologyId),

    /// No revision with the given number has been recorded.
    #[error("unknown revision: {0}")]
    UnknownRevision(u64),

    /// A revision history whose numbers do not run 1, 2, 3, ...
    #[error("revision {found} found where revision {expected} was expected")]
    NonSequentialRevision {
        /// The number the position requires.
        expected: u64,
        /// The number recorded there.
        found: u64,
    },
}
