//! N-Triples serializer for ontology snapshots.
//!
//! Produces a valid N-Triples document (one triple per line, absolute IRIs).
//! N-Triples is suitable for streaming, bulk loading, and diff-friendly storage.

use super::{escape, triples, Term};
use crate::model::Literal;
use crate::store::Ontology;

/// Serializes an ontology snapshot to an N-Triples string.
#[must_use]
pub fn to_ntriples(ontology: &Ontology) -> String {
    let mut out = String::with_capacity(4 * 1024);
    for t in triples(ontology) {
        triple(&mut out, &term(&t.subject), t.predicate.as_str(), &term(&t.object));
    }
    out
}

fn triple(out: &mut String, subj: &str, pred: &str, obj: &str) {
    out.push_str(subj);
    out.push_str(" <");
    out.push_str(pred);
    out.push_str("> ");
    out.push_str(obj);
    out.push_str(" .\n");
}

fn term(term: &Term) -> String {
    match term {
        Term::Iri(value) => iri(value.as_str()),
        Term::Blank(label) => format!("_:{label}"),
        Term::Literal(literal) => lit(literal),
    }
}

fn iri(s: &str) -> String {
    format!("<{}>", s)
}

fn lit(literal: &Literal) -> String {
    let escaped = escape(&literal.lexical);
    match &literal.lang {
        Some(lang) => format!("\"{}\"@{}", escaped, lang),
        None => format!("\"{}\"^^<{}>", escaped, literal.datatype),
    }
}
