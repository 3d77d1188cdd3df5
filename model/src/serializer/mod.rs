//! RDF serializers for ontology snapshots.
//!
//! Three serialization formats are supported:
//! - **N-Triples** ([`ntriples`]): one triple per line, for diffing and bulk loading
//! - **Turtle** ([`turtle`]): prefixed and grouped by subject, for RDF tooling
//! - **JSON-LD** ([`jsonld`]): `@context` plus `@graph`, behind the `serializers` feature
//!
//! All three render the same triples, produced by [`triples`].

use std::collections::HashMap;

use crate::axiom::Axiom;
use crate::model::{iris, Annotation, AnnotationValue, Iri, Literal};
use crate::store::Ontology;

#[cfg(feature = "serializers")]
pub mod jsonld;
pub mod ntriples;
pub mod turtle;

/// Blank node label used for the ontology node of an anonymous ontology.
pub const ANONYMOUS_ONTOLOGY: &str = "ontology";

/// The prefixes shared by the Turtle and JSON-LD serializers.
pub const PREFIXES: [(&str, &str); 4] = [
    ("owl", iris::OWL),
    ("rdf", iris::RDF),
    ("rdfs", iris::RDFS),
    ("xsd", iris::XSD),
];

/// An RDF term.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Term {
    /// A named resource.
    Iri(Iri),
    /// A blank node with the given label.
    Blank(&'static str),
    /// A literal.
    Literal(Literal),
}

/// One RDF statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Triple {
    /// The subject.
    pub subject: Term,
    /// The predicate.
    pub predicate: Iri,
    /// The object.
    pub object: Term,
}

/// The RDF rendering of an ontology snapshot.
///
/// The ontology node comes first, followed by one or more triples per axiom
/// in axiom order.
#[must_use]
pub fn triples(ontology: &Ontology) -> Vec<Triple> {
    let mut out = Vec::new();
    let node = ontology
        .id()
        .ontology_iri()
        .map_or(Term::Blank(ANONYMOUS_ONTOLOGY), |iri| Term::Iri(iri.clone()));

    push(&mut out, node.clone(), iris::RDF_TYPE, named(iris::OWL_ONTOLOGY));
    if let Some(version) = ontology.id().version_iri() {
        push(&mut out, node.clone(), iris::OWL_VERSION_IRI, Term::Iri(version.clone()));
    }
    for import in ontology.imports() {
        push(&mut out, node.clone(), iris::OWL_IMPORTS, Term::Iri(import.iri().clone()));
    }
    for annotation in ontology.annotations() {
        annotate(&mut out, node.clone(), annotation);
    }
    for axiom in ontology.axioms() {
        axiom_triples(&mut out, axiom);
    }
    out
}

fn axiom_triples(out: &mut Vec<Triple>, axiom: &Axiom) {
    match axiom {
        Axiom::Declaration { entity } => push(
            out,
            Term::Iri(entity.iri.clone()),
            iris::RDF_TYPE,
            named(entity.entity_type.type_iri()),
        ),
        Axiom::SubClassOf {
            sub_class,
            super_class,
        } => link(out, sub_class, iris::RDFS_SUBCLASS_OF, super_class),
        Axiom::EquivalentClasses { classes } => pairwise(out, classes, iris::OWL_EQUIVALENT_CLASS),
        Axiom::DisjointClasses { classes } => pairwise(out, classes, iris::OWL_DISJOINT_WITH),
        Axiom::SubObjectPropertyOf {
            sub_property,
            super_property,
        } => link(out, sub_property, iris::RDFS_SUBPROPERTY_OF, super_property),
        Axiom::ObjectPropertyDomain { property, domain } => {
            link(out, property, iris::RDFS_DOMAIN, domain);
        }
        Axiom::ObjectPropertyRange { property, range } => {
            link(out, property, iris::RDFS_RANGE, range);
        }
        Axiom::ClassAssertion { class, individual } => {
            link(out, individual, iris::RDF_TYPE, class);
        }
        Axiom::ObjectPropertyAssertion {
            property,
            subject,
            object,
        } => out.push(Triple {
            subject: Term::Iri(subject.clone()),
            predicate: property.clone(),
            object: Term::Iri(object.clone()),
        }),
        Axiom::DataPropertyAssertion {
            property,
            subject,
            value,
        } => out.push(Triple {
            subject: Term::Iri(subject.clone()),
            predicate: property.clone(),
            object: Term::Literal(value.clone()),
        }),
        Axiom::AnnotationAssertion {
            subject,
            annotation,
        } => annotate(out, Term::Iri(subject.clone()), annotation),
    }
}

/// Pairs the first operand with each of the others.
fn pairwise(out: &mut Vec<Triple>, classes: &[Iri], predicate: &'static str) {
    if let Some((first, rest)) = classes.split_first() {
        for other in rest {
            link(out, first, predicate, other);
        }
    }
}

fn annotate(out: &mut Vec<Triple>, subject: Term, annotation: &Annotation) {
    let object = match &annotation.value {
        AnnotationValue::Iri(iri) => Term::Iri(iri.clone()),
        AnnotationValue::Literal(literal) => Term::Literal(literal.clone()),
    };
    out.push(Triple {
        subject,
        predicate: annotation.property.clone(),
        object,
    });
}

fn link(out: &mut Vec<Triple>, subject: &Iri, predicate: &'static str, object: &Iri) {
    push(out, Term::Iri(subject.clone()), predicate, Term::Iri(object.clone()));
}

fn push(out: &mut Vec<Triple>, subject: Term, predicate: &'static str, object: Term) {
    out.push(Triple {
        subject,
        predicate: Iri::from_static(predicate),
        object,
    });
}

fn named(iri: &'static str) -> Term {
    Term::Iri(Iri::from_static(iri))
}

/// Groups triples by subject, keeping subjects in order of first appearance.
pub(crate) fn group_by_subject(triples: &[Triple]) -> Vec<(&Term, Vec<(&Iri, &Term)>)> {
    let mut index: HashMap<&Term, usize> = HashMap::new();
    let mut groups: Vec<(&Term, Vec<(&Iri, &Term)>)> = Vec::new();
    for triple in triples {
        let slot = *index.entry(&triple.subject).or_insert_with(|| {
            groups.push((&triple.subject, Vec::new()));
            groups.len() - 1
        });
        groups[slot].1.push((&triple.predicate, &triple.object));
    }
    groups
}

/// Abbreviates an IRI against [`PREFIXES`] when the local part is a valid
/// prefixed-name suffix.
pub(crate) fn compact(iri: &str) -> Option<String> {
    PREFIXES.iter().find_map(|(prefix, namespace)| {
        let local = iri.strip_prefix(namespace)?;
        let simple = !local.is_empty()
            && local
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        simple.then(|| format!("{prefix}:{local}"))
    })
}

/// Escapes a lexical form for a double-quoted RDF string.
pub(crate) fn escape(s: &str) -> String {
    s.replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\n', "\\n")
        .replace('\r', "\\r")
}
