//! Core vocabulary types.
//!
//! These types carry the payloads of ontology changes: IRIs, ontology ids,
//! typed entities, literals, annotations and imports declarations. All of
//! them are owned, immutable once built, totally ordered (so snapshots can
//! keep them in ordered sets) and serde-enabled.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::{ChangeError, Result};
use crate::replace::IriReplacer;

/// An absolute IRI.
///
/// Cloning is cheap: the text is shared.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Iri(Arc<str>);

impl Iri {
    /// Parses an absolute IRI.
    ///
    /// # Errors
    ///
    /// Returns [`ChangeError::InvalidIri`] when the text has no scheme, an
    /// empty remainder, or contains characters IRIs may not contain.
    pub fn parse(text: &str) -> Result<Self> {
        let invalid = |reason| ChangeError::InvalidIri {
            iri: text.to_owned(),
            reason,
        };
        let Some((scheme, rest)) = text.split_once(':') else {
            return Err(invalid("missing scheme"));
        };
        let mut chars = scheme.chars();
        match chars.next() {
            Some(c) if c.is_ascii_alphabetic() => {}
            _ => return Err(invalid("scheme must start with a letter")),
        }
        if !chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.')) {
            return Err(invalid("scheme contains an illegal character"));
        }
        if rest.is_empty() {
            return Err(invalid("empty hierarchical part"));
        }
        if text
            .chars()
            .any(|c| {
                c.is_whitespace()
                    || matches!(c, '<' | '>' | '"' | '{' | '}' | '|' | '\\' | '^' | '`')
            })
        {
            return Err(invalid("contains a character not allowed in IRIs"));
        }
        Ok(Self(Arc::from(text)))
    }

    /// Builds an IRI from a compile-time constant known to be absolute.
    pub(crate) fn from_static(text: &'static str) -> Self {
        Self(Arc::from(text))
    }

    /// Returns the IRI text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the fragment or last path segment, used for labels and
    /// prefixed names.
    #[must_use]
    pub fn local_name(&self) -> &str {
        let text = self.as_str();
        text.rfind(|c| c == '#' || c == '/')
            .map_or(text, |i| &text[i + 1..])
    }

    /// Applies `replacer`, returning the rewritten IRI or `None` when the
    /// replacer leaves this IRI alone.
    pub(crate) fn replaced(&self, replacer: &dyn IriReplacer) -> Option<Iri> {
        replacer.replace(self).filter(|new| new != self)
    }
}

impl fmt::Display for Iri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Debug for Iri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}>", self.0)
    }
}

impl TryFrom<String> for Iri {
    type Error = ChangeError;

    fn try_from(text: String) -> Result<Self> {
        Self::parse(&text)
    }
}

impl From<Iri> for String {
    fn from(iri: Iri) -> Self {
        iri.0.as_ref().to_owned()
    }
}

impl std::str::FromStr for Iri {
    type Err = ChangeError;

    fn from_str(text: &str) -> Result<Self> {
        Self::parse(text)
    }
}

/// Identifier of an ontology within a multi-ontology project.
///
/// An id without an ontology IRI is anonymous. Anonymous ids never carry a
/// version IRI.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawOntologyId")]
pub struct OntologyId {
    #[serde(skip_serializing_if = "Option::is_none")]
    ontology_iri: Option<Iri>,
    #[serde(skip_serializing_if = "Option::is_none")]
    version_iri: Option<Iri>,
}

#[derive(Deserialize)]
struct RawOntologyId {
    #[serde(default)]
    ontology_iri: Option<Iri>,
    #[serde(default)]
    version_iri: Option<Iri>,
}

impl TryFrom<RawOntologyId> for OntologyId {
    type Error = ChangeError;

    fn try_from(raw: RawOntologyId) -> Result<Self> {
        Self::try_new(raw.ontology_iri, raw.version_iri)
    }
}

impl OntologyId {
    /// The id of an anonymous ontology.
    #[must_use]
    pub fn anonymous() -> Self {
        Self {
            ontology_iri: None,
            version_iri: None,
        }
    }

    /// An id naming an ontology without a version.
    #[must_use]
    pub fn new(ontology_iri: Iri) -> Self {
        Self {
            ontology_iri: Some(ontology_iri),
            version_iri: None,
        }
    }

    /// An id naming a specific version of an ontology.
    #[must_use]
    pub fn with_version(ontology_iri: Iri, version_iri: Iri) -> Self {
        Self {
            ontology_iri: Some(ontology_iri),
            version_iri: Some(version_iri),
        }
    }

    /// Builds an id from optional parts.
    ///
    /// # Errors
    ///
    /// Returns [`ChangeError::InvalidOntologyId`] when a version IRI is
    /// given without an ontology IRI.
    pub fn try_new(ontology_iri: Option<Iri>, version_iri: Option<Iri>) -> Result<Self> {
        if ontology_iri.is_none() && version_iri.is_some() {
            return Err(ChangeError::InvalidOntologyId);
        }
        Ok(Self {
            ontology_iri,
            version_iri,
        })
    }

    /// The ontology IRI, if the ontology is named.
    #[must_use]
    pub fn ontology_iri(&self) -> Option<&Iri> {
        self.ontology_iri.as_ref()
    }

    /// The version IRI, if any.
    #[must_use]
    pub fn version_iri(&self) -> Option<&Iri> {
        self.version_iri.as_ref()
    }

    /// Whether this id names no ontology IRI.
    #[must_use]
    pub fn is_anonymous(&self) -> bool {
        self.ontology_iri.is_none()
    }
}

impl fmt::Display for OntologyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.ontology_iri, &self.version_iri) {
            (None, _) => f.write_str("<anonymous>"),
            (Some(iri), None) => write!(f, "<{iri}>"),
            (Some(iri), Some(version)) => write!(f, "<{iri}> <{version}>"),
        }
    }
}

impl fmt::Debug for OntologyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "OntologyId({self})")
    }
}

/// The kind of an OWL entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum EntityType {
    /// `owl:Class`.
    Class,
    /// `owl:ObjectProperty`.
    ObjectProperty,
    /// `owl:DatatypeProperty`.
    DataProperty,
    /// `owl:AnnotationProperty`.
    AnnotationProperty,
    /// `owl:NamedIndividual`.
    NamedIndividual,
    /// `rdfs:Datatype`.
    Datatype,
}

impl EntityType {
    /// Every entity type, in declaration order.
    pub const ALL: [EntityType; 6] = [
        EntityType::Class,
        EntityType::ObjectProperty,
        EntityType::DataProperty,
        EntityType::AnnotationProperty,
        EntityType::NamedIndividual,
        EntityType::Datatype,
    ];

    /// The IRI of the OWL/RDFS class whose instances are entities of this type.
    #[must_use]
    pub fn type_iri(self) -> &'static str {
        match self {
            EntityType::Class => iris::OWL_CLASS,
            EntityType::ObjectProperty => iris::OWL_OBJECT_PROPERTY,
            EntityType::DataProperty => iris::OWL_DATATYPE_PROPERTY,
            EntityType::AnnotationProperty => iris::OWL_ANNOTATION_PROPERTY,
            EntityType::NamedIndividual => iris::OWL_NAMED_INDIVIDUAL,
            EntityType::Datatype => iris::RDFS_DATATYPE,
        }
    }
}

/// A typed OWL entity.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Entity {
    /// What kind of entity this is.
    pub entity_type: EntityType,
    /// The entity IRI.
    pub iri: Iri,
}

impl Entity {
    /// Creates an entity.
    #[must_use]
    pub fn new(entity_type: EntityType, iri: Iri) -> Self {
        Self { entity_type, iri }
    }

    /// Shorthand for an `owl:Class`.
    #[must_use]
    pub fn class(iri: Iri) -> Self {
        Self::new(EntityType::Class, iri)
    }

    /// Shorthand for an `owl:ObjectProperty`.
    #[must_use]
    pub fn object_property(iri: Iri) -> Self {
        Self::new(EntityType::ObjectProperty, iri)
    }

    /// Shorthand for an `owl:DatatypeProperty`.
    #[must_use]
    pub fn data_property(iri: Iri) -> Self {
        Self::new(EntityType::DataProperty, iri)
    }

    /// Shorthand for an `owl:AnnotationProperty`.
    #[must_use]
    pub fn annotation_property(iri: Iri) -> Self {
        Self::new(EntityType::AnnotationProperty, iri)
    }

    /// Shorthand for an `owl:NamedIndividual`.
    #[must_use]
    pub fn individual(iri: Iri) -> Self {
        Self::new(EntityType::NamedIndividual, iri)
    }

    pub(crate) fn replaced(&self, replacer: &dyn IriReplacer) -> Option<Entity> {
        self.iri
            .replaced(replacer)
            .map(|iri| Entity::new(self.entity_type, iri))
    }
}

/// An RDF literal.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Literal {
    /// The lexical form.
    pub lexical: String,
    /// The datatype IRI (`rdf:langString` for language-tagged strings).
    pub datatype: Iri,
    /// The language tag, for language-tagged strings.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lang: Option<String>,
}

impl Literal {
    /// An `xsd:string` literal.
    #[must_use]
    pub fn string(lexical: impl Into<String>) -> Self {
        Self {
            lexical: lexical.into(),
            datatype: Iri::from_static(iris::XSD_STRING),
            lang: None,
        }
    }

    /// A literal with an explicit datatype.
    #[must_use]
    pub fn typed(lexical: impl Into<String>, datatype: Iri) -> Self {
        Self {
            lexical: lexical.into(),
            datatype,
            lang: None,
        }
    }

    /// A language-tagged string.
    #[must_use]
    pub fn lang_string(lexical: impl Into<String>, lang: impl Into<String>) -> Self {
        Self {
            lexical: lexical.into(),
            datatype: Iri::from_static(iris::RDF_LANG_STRING),
            lang: Some(lang.into()),
        }
    }
}

/// The value of an annotation.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AnnotationValue {
    /// An IRI value.
    Iri(Iri),
    /// A literal value.
    Literal(Literal),
}

impl AnnotationValue {
    fn replaced(&self, replacer: &dyn IriReplacer) -> Option<AnnotationValue> {
        match self {
            AnnotationValue::Iri(iri) => iri.replaced(replacer).map(AnnotationValue::Iri),
            AnnotationValue::Literal(_) => None,
        }
    }
}

/// An annotation: a property paired with a value.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Annotation {
    /// The annotation property IRI.
    pub property: Iri,
    /// The annotation value.
    pub value: AnnotationValue,
}

impl Annotation {
    /// Creates an annotation.
    #[must_use]
    pub fn new(property: Iri, value: AnnotationValue) -> Self {
        Self { property, value }
    }

    /// An `rdfs:label` annotation with a plain string value.
    #[must_use]
    pub fn label(text: impl Into<String>) -> Self {
        Self::new(
            Iri::from_static(iris::RDFS_LABEL),
            AnnotationValue::Literal(Literal::string(text)),
        )
    }

    /// Rewrites the property IRI and an IRI value. Returns `None` when
    /// nothing changes.
    pub(crate) fn replaced(&self, replacer: &dyn IriReplacer) -> Option<Annotation> {
        let property = self.property.replaced(replacer);
        let value = self.value.replaced(replacer);
        if property.is_none() && value.is_none() {
            return None;
        }
        Some(Annotation {
            property: property.unwrap_or_else(|| self.property.clone()),
            value: value.unwrap_or_else(|| self.value.clone()),
        })
    }
}

/// An `owl:imports` declaration.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ImportsDeclaration {
    iri: Iri,
}

impl ImportsDeclaration {
    /// Declares an import of the ontology at `iri`.
    #[must_use]
    pub fn new(iri: Iri) -> Self {
        Self { iri }
    }

    /// The IRI of the imported ontology.
    #[must_use]
    pub fn iri(&self) -> &Iri {
        &self.iri
    }
}

/// Standard IRI constants.
pub mod iris {
    /// OWL namespace.
    pub const OWL: &str = "http://www.w3.org/2002/07/owl#";
    /// RDF namespace.
    pub const RDF: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#";
    /// RDFS namespace.
    pub const RDFS: &str = "http://www.w3.org/2000/01/rdf-schema#";
    /// XSD namespace.
    pub const XSD: &str = "http://www.w3.org/2001/XMLSchema#";

    /// `owl:Ontology`.
    pub const OWL_ONTOLOGY: &str = "http://www.w3.org/2002/07/owl#Ontology";
    /// `owl:Class`.
    pub const OWL_CLASS: &str = "http://www.w3.org/2002/07/owl#Class";
    /// `owl:ObjectProperty`.
    pub const OWL_OBJECT_PROPERTY: &str = "http://www.w3.org/2002/07/owl#ObjectProperty";
    /// `owl:DatatypeProperty`.
    pub const OWL_DATATYPE_PROPERTY: &str = "http://www.w3.org/2002/07/owl#DatatypeProperty";
    /// `owl:AnnotationProperty`.
    pub const OWL_ANNOTATION_PROPERTY: &str = "http://www.w3.org/2002/07/owl#AnnotationProperty";
    /// `owl:NamedIndividual`.
    pub const OWL_NAMED_INDIVIDUAL: &str = "http://www.w3.org/2002/07/owl#NamedIndividual";
    /// `owl:imports`.
    pub const OWL_IMPORTS: &str = "http://www.w3.org/2002/07/owl#imports";
    /// `owl:versionIRI`.
    pub const OWL_VERSION_IRI: &str = "http://www.w3.org/2002/07/owl#versionIRI";
    /// `owl:equivalentClass`.
    pub const OWL_EQUIVALENT_CLASS: &str = "http://www.w3.org/2002/07/owl#equivalentClass";
    /// `owl:disjointWith`.
    pub const OWL_DISJOINT_WITH: &str = "http://www.w3.org/2002/07/owl#disjointWith";
    /// `rdf:type`.
    pub const RDF_TYPE: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#type";
    /// `rdf:langString`.
    pub const RDF_LANG_STRING: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#langString";
    /// `rdfs:Datatype`.
    pub const RDFS_DATATYPE: &str = "http://www.w3.org/2000/01/rdf-schema#Datatype";
    /// `rdfs:label`.
    pub const RDFS_LABEL: &str = "http://www.w3.org/2000/01/rdf-schema#label";
    /// `rdfs:comment`.
    pub const RDFS_COMMENT: &str = "http://www.w3.org/2000/01/rdf-schema#comment";
    /// `rdfs:subClassOf`.
    pub const RDFS_SUBCLASS_OF: &str = "http://www.w3.org/2000/01/rdf-schema#subClassOf";
    /// `rdfs:subPropertyOf`.
    pub const RDFS_SUBPROPERTY_OF: &str = "http://www.w3.org/2000/01/rdf-schema#subPropertyOf";
    /// `rdfs:domain`.
    pub const RDFS_DOMAIN: &str = "http://www.w3.org/2000/01/rdf-schema#domain";
    /// `rdfs:range`.
    pub const RDFS_RANGE: &str = "http://www.w3.org/2000/01/rdf-schema#range";
    /// `xsd:string`.
    pub const XSD_STRING: &str = "http://www.w3.org/2001/XMLSchema#string";
    /// `xsd:integer`.
    pub const XSD_INTEGER: &str = "http://www.w3.org/2001/XMLSchema#integer";
    /// `xsd:boolean`.
    pub const XSD_BOOLEAN: &str = "http://www.w3.org/2001/XMLSchema#boolean";
}
