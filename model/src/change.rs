//! Ontology change records.
//!
//! An [`OntologyChange`] is an immutable description of one atomic mutation
//! to one ontology of a project. The set of change kinds is closed:
//!
//! | Variant | Payload | Inverse |
//! |---------|---------|---------|
//! | [`AddAxiomChange`] | [`Axiom`] | [`RemoveAxiomChange`] |
//! | [`RemoveAxiomChange`] | [`Axiom`] | [`AddAxiomChange`] |
//! | [`AddImportChange`] | [`ImportsDeclaration`] | [`RemoveImportChange`] |
//! | [`RemoveImportChange`] | [`ImportsDeclaration`] | [`AddImportChange`] |
//! | [`AddOntologyAnnotationChange`] | [`Annotation`] | [`RemoveOntologyAnnotationChange`] |
//! | [`RemoveOntologyAnnotationChange`] | [`Annotation`] | [`AddOntologyAnnotationChange`] |
//!
//! Replacement operations return [`Cow::Borrowed`] when nothing changes, so
//! an unchanged change is handed back as the very same instance.
//!
//! ```
//! use ontochange_model::{AddImportChange, ImportsDeclaration, Iri, OntologyChange, OntologyId};
//!
//! let id = OntologyId::new(Iri::parse("http://example.org/pizza")?);
//! let decl = ImportsDeclaration::new(Iri::parse("http://example.org/food")?);
//! let change = OntologyChange::from(AddImportChange::of(id.clone(), decl));
//!
//! assert!(!change.is_axiom_change());
//! assert!(change.signature().is_empty());
//! assert!(matches!(change.inverse_change(), OntologyChange::RemoveImport(_)));
//! # Ok::<(), ontochange_model::ChangeError>(())
//! ```

use std::borrow::Cow;
use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::axiom::{Axiom, AxiomType};
use crate::error::{ChangeError, Result};
use crate::model::{Annotation, Entity, ImportsDeclaration, OntologyId};
use crate::record::{OwlOntologyChangeData, OwlOntologyChangeRecord};
use crate::replace::IriReplacer;
use crate::visitor::{OntologyChangeVisitor, OntologyChangeVisitorEx};

/// Tag naming the variant of an [`OntologyChange`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ChangeKind {
    /// Adds an axiom.
    AddAxiom,
    /// Removes an axiom.
    RemoveAxiom,
    /// Adds an imports declaration.
    AddImport,
    /// Removes an imports declaration.
    RemoveImport,
    /// Adds an ontology annotation.
    AddOntologyAnnotation,
    /// Removes an ontology annotation.
    RemoveOntologyAnnotation,
}

impl ChangeKind {
    /// Every change kind.
    pub const ALL: [ChangeKind; 6] = [
        ChangeKind::AddAxiom,
        ChangeKind::RemoveAxiom,
        ChangeKind::AddImport,
        ChangeKind::RemoveImport,
        ChangeKind::AddOntologyAnnotation,
        ChangeKind::RemoveOntologyAnnotation,
    ];

    /// The kebab-case name used in change-list documents.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            ChangeKind::AddAxiom => "add-axiom",
            ChangeKind::RemoveAxiom => "remove-axiom",
            ChangeKind::AddImport => "add-import",
            ChangeKind::RemoveImport => "remove-import",
            ChangeKind::AddOntologyAnnotation => "add-ontology-annotation",
            ChangeKind::RemoveOntologyAnnotation => "remove-ontology-annotation",
        }
    }

    /// The kind of the inverse change.
    #[must_use]
    pub fn inverse(self) -> ChangeKind {
        match self {
            ChangeKind::AddAxiom => ChangeKind::RemoveAxiom,
            ChangeKind::RemoveAxiom => ChangeKind::AddAxiom,
            ChangeKind::AddImport => ChangeKind::RemoveImport,
            ChangeKind::RemoveImport => ChangeKind::AddImport,
            ChangeKind::AddOntologyAnnotation => ChangeKind::RemoveOntologyAnnotation,
            ChangeKind::RemoveOntologyAnnotation => ChangeKind::AddOntologyAnnotation,
        }
    }

    /// Whether changes of this kind add their payload.
    #[must_use]
    pub fn is_addition(self) -> bool {
        matches!(
            self,
            ChangeKind::AddAxiom | ChangeKind::AddImport | ChangeKind::AddOntologyAnnotation
        )
    }
}

impl fmt::Display for ChangeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Declares one change variant: the struct, its factory, accessors,
/// typed inverse and ontology-id replacement.
macro_rules! change_variant {
    (
        $(#[$meta:meta])*
        $name:ident, $inverse:ident, $field:ident: $payload:ty
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub struct $name {
            ontology_id: OntologyId,
            $field: $payload,
        }

        impl $name {
            /// Creates the change for the ontology identified by `ontology_id`.
            #[must_use]
            pub fn of(ontology_id: OntologyId, $field: $payload) -> Self {
                Self {
                    ontology_id,
                    $field,
                }
            }

            /// The id of the ontology this change applies to.
            #[must_use]
            pub fn ontology_id(&self) -> &OntologyId {
                &self.ontology_id
            }

            /// The payload of this change.
            #[must_use]
            pub fn $field(&self) -> &$payload {
                &self.$field
            }

            /// The change that undoes this one.
            #[must_use]
            pub fn inverse_change(&self) -> $inverse {
                $inverse::of(self.ontology_id.clone(), self.$field.clone())
            }

            /// Retargets this change at another ontology.
            ///
            /// Returns this very instance when `ontology_id` is already the
            /// target.
            #[must_use]
            pub fn replace_ontology_id(&self, ontology_id: &OntologyId) -> Cow<'_, Self> {
                if &self.ontology_id == ontology_id {
                    Cow::Borrowed(self)
                } else {
                    Cow::Owned(Self::of(ontology_id.clone(), self.$field.clone()))
                }
            }
        }
    };
}

change_variant!(
    /// Adds an axiom to an ontology.
    AddAxiomChange, RemoveAxiomChange, axiom: Axiom
);
change_variant!(
    /// Removes an axiom from an ontology.
    RemoveAxiomChange, AddAxiomChange, axiom: Axiom
);
change_variant!(
    /// Adds an imports declaration to an ontology.
    AddImportChange, RemoveImportChange, imports_declaration: ImportsDeclaration
);
change_variant!(
    /// Removes an imports declaration from an ontology.
    RemoveImportChange, AddImportChange, imports_declaration: ImportsDeclaration
);
change_variant!(
    /// Adds an annotation to the ontology header.
    AddOntologyAnnotationChange, RemoveOntologyAnnotationChange, annotation: Annotation
);
change_variant!(
    /// Removes an annotation from the ontology header.
    RemoveOntologyAnnotationChange, AddOntologyAnnotationChange, annotation: Annotation
);

/// One atomic mutation to one ontology.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "OwlOntologyChangeRecord", from = "OwlOntologyChangeRecord")]
pub enum OntologyChange {
    /// See [`AddAxiomChange`].
    AddAxiom(AddAxiomChange),
    /// See [`RemoveAxiomChange`].
    RemoveAxiom(RemoveAxiomChange),
    /// See [`AddImportChange`].
    AddImport(AddImportChange),
    /// See [`RemoveImportChange`].
    RemoveImport(RemoveImportChange),
    /// See [`AddOntologyAnnotationChange`].
    AddOntologyAnnotation(AddOntologyAnnotationChange),
    /// See [`RemoveOntologyAnnotationChange`].
    RemoveOntologyAnnotation(RemoveOntologyAnnotationChange),
}

impl OntologyChange {
    /// The variant tag of this change.
    #[must_use]
    pub fn kind(&self) -> ChangeKind {
        match self {
            OntologyChange::AddAxiom(_) => ChangeKind::AddAxiom,
            OntologyChange::RemoveAxiom(_) => ChangeKind::RemoveAxiom,
            OntologyChange::AddImport(_) => ChangeKind::AddImport,
            OntologyChange::RemoveImport(_) => ChangeKind::RemoveImport,
            OntologyChange::AddOntologyAnnotation(_) => ChangeKind::AddOntologyAnnotation,
            OntologyChange::RemoveOntologyAnnotation(_) => ChangeKind::RemoveOntologyAnnotation,
        }
    }

    /// The id of the ontology this change applies to.
    #[must_use]
    pub fn ontology_id(&self) -> &OntologyId {
        match self {
            OntologyChange::AddAxiom(c) => c.ontology_id(),
            OntologyChange::RemoveAxiom(c) => c.ontology_id(),
            OntologyChange::AddImport(c) => c.ontology_id(),
            OntologyChange::RemoveImport(c) => c.ontology_id(),
            OntologyChange::AddOntologyAnnotation(c) => c.ontology_id(),
            OntologyChange::RemoveOntologyAnnotation(c) => c.ontology_id(),
        }
    }

    /// Whether this change adds or removes an axiom.
    #[must_use]
    pub fn is_axiom_change(&self) -> bool {
        self.is_add_axiom() || self.is_remove_axiom()
    }

    /// Whether this change adds an axiom.
    #[must_use]
    pub fn is_add_axiom(&self) -> bool {
        matches!(self, OntologyChange::AddAxiom(_))
    }

    /// Whether this change removes an axiom.
    #[must_use]
    pub fn is_remove_axiom(&self) -> bool {
        matches!(self, OntologyChange::RemoveAxiom(_))
    }

    /// Whether this change adds or removes an imports declaration.
    #[must_use]
    pub fn is_import_change(&self) -> bool {
        self.is_add_import() || self.is_remove_import()
    }

    /// Whether this change adds an imports declaration.
    #[must_use]
    pub fn is_add_import(&self) -> bool {
        matches!(self, OntologyChange::AddImport(_))
    }

    /// Whether this change removes an imports declaration.
    #[must_use]
    pub fn is_remove_import(&self) -> bool {
        matches!(self, OntologyChange::RemoveImport(_))
    }

    /// Whether this change adds or removes an ontology annotation.
    #[must_use]
    pub fn is_ontology_annotation_change(&self) -> bool {
        self.is_add_ontology_annotation() || self.is_remove_ontology_annotation()
    }

    /// Whether this change adds an ontology annotation.
    #[must_use]
    pub fn is_add_ontology_annotation(&self) -> bool {
        matches!(self, OntologyChange::AddOntologyAnnotation(_))
    }

    /// Whether this change removes an ontology annotation.
    #[must_use]
    pub fn is_remove_ontology_annotation(&self) -> bool {
        matches!(self, OntologyChange::RemoveOntologyAnnotation(_))
    }

    /// Whether this is an axiom change whose axiom has type `axiom_type`.
    #[must_use]
    pub fn is_change_for(&self, axiom_type: AxiomType) -> bool {
        self.axiom()
            .is_some_and(|axiom| axiom.axiom_type() == axiom_type)
    }

    /// The entities this change references: the axiom signature for axiom
    /// changes, empty for every other variant.
    #[must_use]
    pub fn signature(&self) -> BTreeSet<Entity> {
        self.axiom().map(Axiom::signature).unwrap_or_default()
    }

    /// The axiom of an axiom change.
    #[must_use]
    pub fn axiom(&self) -> Option<&Axiom> {
        match self {
            OntologyChange::AddAxiom(c) => Some(c.axiom()),
            OntologyChange::RemoveAxiom(c) => Some(c.axiom()),
            _ => None,
        }
    }

    /// The annotation of an ontology annotation change.
    #[must_use]
    pub fn annotation(&self) -> Option<&Annotation> {
        match self {
            OntologyChange::AddOntologyAnnotation(c) => Some(c.annotation()),
            OntologyChange::RemoveOntologyAnnotation(c) => Some(c.annotation()),
            _ => None,
        }
    }

    /// The imports declaration of an import change.
    #[must_use]
    pub fn imports_declaration(&self) -> Option<&ImportsDeclaration> {
        match self {
            OntologyChange::AddImport(c) => Some(c.imports_declaration()),
            OntologyChange::RemoveImport(c) => Some(c.imports_declaration()),
            _ => None,
        }
    }

    /// The axiom of an axiom change.
    ///
    /// # Errors
    ///
    /// Returns [`ChangeError::NoSuchElement`] for every non-axiom change.
    pub fn axiom_or_err(&self) -> Result<&Axiom> {
        self.axiom().ok_or_else(|| self.no_such_element("axiom"))
    }

    /// The annotation of an ontology annotation change.
    ///
    /// # Errors
    ///
    /// Returns [`ChangeError::NoSuchElement`] for every other change.
    pub fn annotation_or_err(&self) -> Result<&Annotation> {
        self.annotation()
            .ok_or_else(|| self.no_such_element("annotation"))
    }

    /// The imports declaration of an import change.
    ///
    /// # Errors
    ///
    /// Returns [`ChangeError::NoSuchElement`] for every other change.
    pub fn imports_declaration_or_err(&self) -> Result<&ImportsDeclaration> {
        self.imports_declaration()
            .ok_or_else(|| self.no_such_element("imports declaration"))
    }

    fn no_such_element(&self, requested: &'static str) -> ChangeError {
        ChangeError::NoSuchElement {
            requested,
            actual: self.kind(),
        }
    }

    /// Rewrites the IRIs in the payload.
    ///
    /// Axiom changes rewrite every entity IRI of the axiom, annotation
    /// changes rewrite the property and an IRI value. Import changes are
    /// left as they are. Returns this very instance when nothing changes.
    #[must_use]
    pub fn replace_iris(&self, replacer: &dyn IriReplacer) -> Cow<'_, OntologyChange> {
        let id = || self.ontology_id().clone();
        let replaced: Option<OntologyChange> = match self {
            OntologyChange::AddAxiom(c) => c
                .axiom()
                .replace_iris(replacer)
                .map(|axiom| AddAxiomChange::of(id(), axiom).into()),
            OntologyChange::RemoveAxiom(c) => c
                .axiom()
                .replace_iris(replacer)
                .map(|axiom| RemoveAxiomChange::of(id(), axiom).into()),
            OntologyChange::AddOntologyAnnotation(c) => c
                .annotation()
                .replaced(replacer)
                .map(|annotation| AddOntologyAnnotationChange::of(id(), annotation).into()),
            OntologyChange::RemoveOntologyAnnotation(c) => c
                .annotation()
                .replaced(replacer)
                .map(|annotation| RemoveOntologyAnnotationChange::of(id(), annotation).into()),
            OntologyChange::AddImport(_) | OntologyChange::RemoveImport(_) => None,
        };
        replaced.map_or(Cow::Borrowed(self), Cow::Owned)
    }

    /// Calls the visitor method matching this variant, exactly once.
    pub fn accept<V: OntologyChangeVisitor + ?Sized>(&self, visitor: &mut V) {
        match self {
            OntologyChange::AddAxiom(c) => visitor.visit_add_axiom(c),
            OntologyChange::RemoveAxiom(c) => visitor.visit_remove_axiom(c),
            OntologyChange::AddImport(c) => visitor.visit_add_import(c),
            OntologyChange::RemoveImport(c) => visitor.visit_remove_import(c),
            OntologyChange::AddOntologyAnnotation(c) => visitor.visit_add_ontology_annotation(c),
            OntologyChange::RemoveOntologyAnnotation(c) => {
                visitor.visit_remove_ontology_annotation(c);
            }
        }
    }

    /// Calls the visitor method matching this variant, exactly once, and
    /// returns its result.
    pub fn accept_ex<V: OntologyChangeVisitorEx + ?Sized>(&self, visitor: &mut V) -> V::Output {
        match self {
            OntologyChange::AddAxiom(c) => visitor.visit_add_axiom(c),
            OntologyChange::RemoveAxiom(c) => visitor.visit_remove_axiom(c),
            OntologyChange::AddImport(c) => visitor.visit_add_import(c),
            OntologyChange::RemoveImport(c) => visitor.visit_remove_import(c),
            OntologyChange::AddOntologyAnnotation(c) => visitor.visit_add_ontology_annotation(c),
            OntologyChange::RemoveOntologyAnnotation(c) => {
                visitor.visit_remove_ontology_annotation(c)
            }
        }
    }

    /// The change that undoes this one: same ontology, same payload,
    /// addition and removal swapped.
    #[must_use]
    pub fn inverse_change(&self) -> OntologyChange {
        match self {
            OntologyChange::AddAxiom(c) => c.inverse_change().into(),
            OntologyChange::RemoveAxiom(c) => c.inverse_change().into(),
            OntologyChange::AddImport(c) => c.inverse_change().into(),
            OntologyChange::RemoveImport(c) => c.inverse_change().into(),
            OntologyChange::AddOntologyAnnotation(c) => c.inverse_change().into(),
            OntologyChange::RemoveOntologyAnnotation(c) => c.inverse_change().into(),
        }
    }

    /// Retargets this change at another ontology, keeping the payload.
    ///
    /// Returns this very instance when `ontology_id` is already the target.
    #[must_use]
    pub fn replace_ontology_id(&self, ontology_id: &OntologyId) -> Cow<'_, OntologyChange> {
        if self.ontology_id() == ontology_id {
            return Cow::Borrowed(self);
        }
        let retargeted: OntologyChange = match self {
            OntologyChange::AddAxiom(c) => c.replace_ontology_id(ontology_id).into_owned().into(),
            OntologyChange::RemoveAxiom(c) => {
                c.replace_ontology_id(ontology_id).into_owned().into()
            }
            OntologyChange::AddImport(c) => c.replace_ontology_id(ontology_id).into_owned().into(),
            OntologyChange::RemoveImport(c) => {
                c.replace_ontology_id(ontology_id).into_owned().into()
            }
            OntologyChange::AddOntologyAnnotation(c) => {
                c.replace_ontology_id(ontology_id).into_owned().into()
            }
            OntologyChange::RemoveOntologyAnnotation(c) => {
                c.replace_ontology_id(ontology_id).into_owned().into()
            }
        };
        Cow::Owned(retargeted)
    }

    /// Converts this change to the record format consumed by ontology
    /// engines and stored in change-list documents.
    #[must_use]
    pub fn to_owl_ontology_change_record(&self) -> OwlOntologyChangeRecord {
        let data = match self {
            OntologyChange::AddAxiom(c) => OwlOntologyChangeData::AddAxiom(c.axiom().clone()),
            OntologyChange::RemoveAxiom(c) => OwlOntologyChangeData::RemoveAxiom(c.axiom().clone()),
            OntologyChange::AddImport(c) => {
                OwlOntologyChangeData::AddImport(c.imports_declaration().clone())
            }
            OntologyChange::RemoveImport(c) => {
                OwlOntologyChangeData::RemoveImport(c.imports_declaration().clone())
            }
            OntologyChange::AddOntologyAnnotation(c) => {
                OwlOntologyChangeData::AddOntologyAnnotation(c.annotation().clone())
            }
            OntologyChange::RemoveOntologyAnnotation(c) => {
                OwlOntologyChangeData::RemoveOntologyAnnotation(c.annotation().clone())
            }
        };
        OwlOntologyChangeRecord::new(self.ontology_id().clone(), data)
    }
}

impl fmt::Display for OntologyChange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} on {}: ", self.kind(), self.ontology_id())?;
        match self {
            OntologyChange::AddAxiom(c) => write!(f, "{}", c.axiom().axiom_type()),
            OntologyChange::RemoveAxiom(c) => write!(f, "{}", c.axiom().axiom_type()),
            OntologyChange::AddImport(c) => write!(f, "<{}>", c.imports_declaration().iri()),
            OntologyChange::RemoveImport(c) => write!(f, "<{}>", c.imports_declaration().iri()),
            OntologyChange::AddOntologyAnnotation(c) => write!(f, "<{}>", c.annotation().property),
            OntologyChange::RemoveOntologyAnnotation(c) => {
                write!(f, "<{}>", c.annotation().property)
            }
        }
    }
}

impl From<AddAxiomChange> for OntologyChange {
    fn from(change: AddAxiomChange) -> Self {
        OntologyChange::AddAxiom(change)
    }
}

impl From<RemoveAxiomChange> for OntologyChange {
    fn from(change: RemoveAxiomChange) -> Self {
        OntologyChange::RemoveAxiom(change)
    }
}

impl From<AddImportChange> for OntologyChange {
    fn from(change: AddImportChange) -> Self {
        OntologyChange::AddImport(change)
    }
}

impl From<RemoveImportChange> for OntologyChange {
    fn from(change: RemoveImportChange) -> Self {
        OntologyChange::RemoveImport(change)
    }
}

impl From<AddOntologyAnnotationChange> for OntologyChange {
    fn from(change: AddOntologyAnnotationChange) -> Self {
        OntologyChange::AddOntologyAnnotation(change)
    }
}

impl From<RemoveOntologyAnnotationChange> for OntologyChange {
    fn from(change: RemoveOntologyAnnotationChange) -> Self {
        OntologyChange::RemoveOntologyAnnotation(change)
    }
}

impl From<OwlOntologyChangeRecord> for OntologyChange {
    fn from(record: OwlOntologyChangeRecord) -> Self {
        let (id, data) = record.into_parts();
        match data {
            OwlOntologyChangeData::AddAxiom(axiom) => AddAxiomChange::of(id, axiom).into(),
            OwlOntologyChangeData::RemoveAxiom(axiom) => RemoveAxiomChange::of(id, axiom).into(),
            OwlOntologyChangeData::AddImport(decl) => AddImportChange::of(id, decl).into(),
            OwlOntologyChangeData::RemoveImport(decl) => RemoveImportChange::of(id, decl).into(),
            OwlOntologyChangeData::AddOntologyAnnotation(annotation) => {
                AddOntologyAnnotationChange::of(id, annotation).into()
            }
            OwlOntologyChangeData::RemoveOntologyAnnotation(annotation) => {
                RemoveOntologyAnnotationChange::of(id, annotation).into()
            }
        }
    }
}

impl From<OntologyChange> for OwlOntologyChangeRecord {
    fn from(change: OntologyChange) -> Self {
        change.to_owl_ontology_change_record()
    }
}
