//! Turtle 1.1 serializer for ontology snapshots.
//!
//! Produces a Turtle document with the standard prefix block followed by
//! one block per subject, the ontology node first.

use super::{compact, escape, group_by_subject, triples, Term, PREFIXES};
use crate::model::{iris, Literal};
use crate::store::Ontology;

/// Serializes an ontology snapshot to a Turtle string.
#[must_use]
pub fn to_turtle(ontology: &Ontology) -> String {
    let mut out = String::with_capacity(4 * 1024);

    for (prefix, namespace) in PREFIXES {
        out.push_str(&format!("@prefix {:<5} <{}> .\n", format!("{prefix}:"), namespace));
    }
    out.push('\n');

    let triples = triples(ontology);
    for (subject, pairs) in group_by_subject(&triples) {
        let body: Vec<String> = pairs
            .iter()
            .map(|(predicate, object)| {
                let predicate = if predicate.as_str() == iris::RDF_TYPE {
                    "a".to_owned()
                } else {
                    name(predicate.as_str())
                };
                format!("  {} {}", predicate, turtle_term(object))
            })
            .collect();
        out.push_str(&format!("{}\n{} .\n\n", turtle_term(subject), body.join(" ;\n")));
    }

    out
}

fn name(iri: &str) -> String {
    compact(iri).unwrap_or_else(|| format!("<{}>", iri))
}

fn turtle_term(term: &Term) -> String {
    match term {
        Term::Iri(iri) => name(iri.as_str()),
        Term::Blank(label) => format!("_:{label}"),
        Term::Literal(literal) => turtle_literal(literal),
    }
}

fn turtle_literal(literal: &Literal) -> String {
    match &literal.lang {
        Some(lang) => format!("{}@{}", turtle_string(&literal.lexical), lang),
        None if literal.datatype.as_str() == iris::XSD_STRING => turtle_string(&literal.lexical),
        None => format!(
            "{}^^{}",
            turtle_string(&literal.lexical),
            name(literal.datatype.as_str())
        ),
    }
}

fn turtle_string(s: &str) -> String {
    format!("\"{}\"", escape(s))
}
