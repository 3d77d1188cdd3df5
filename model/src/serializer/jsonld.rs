//! JSON-LD 1.1 serializer for ontology snapshots.
//!
//! Produces a single JSON-LD document with a `@context` of the standard
//! prefixes and a `@graph` array holding one node per subject.

use serde_json::{json, Map, Value};

use super::{compact, group_by_subject, triples, Term, PREFIXES};
use crate::model::{iris, Literal};
use crate::store::Ontology;

/// Serializes an ontology snapshot to a JSON-LD `Value`.
///
/// The returned value can be pretty-printed with [`serde_json::to_string_pretty`].
#[must_use]
pub fn to_json_ld(ontology: &Ontology) -> Value {
    json!({
        "@context": build_context(),
        "@graph": build_graph(ontology)
    })
}

fn build_context() -> Value {
    let mut ctx = Map::new();
    for (prefix, namespace) in PREFIXES {
        ctx.insert(prefix.to_owned(), json!(namespace));
    }
    Value::Object(ctx)
}

fn build_graph(ontology: &Ontology) -> Value {
    let triples = triples(ontology);
    let nodes: Vec<Value> = group_by_subject(&triples)
        .into_iter()
        .map(|(subject, pairs)| {
            let mut node = Map::new();
            node.insert("@id".to_owned(), json!(node_id(subject)));
            let mut types: Vec<Value> = Vec::new();
            let mut properties: Map<String, Value> = Map::new();
            for (predicate, object) in pairs {
                if predicate.as_str() == iris::RDF_TYPE {
                    types.push(json!(key(object_iri(object))));
                    continue;
                }
                let entry = properties
                    .entry(key(predicate.as_str()))
                    .or_insert_with(|| Value::Array(Vec::new()));
                if let Value::Array(values) = entry {
                    values.push(object_to_json(object));
                }
            }
            if !types.is_empty() {
                node.insert("@type".to_owned(), single_or_array(types));
            }
            for (name, values) in properties {
                let values = match values {
                    Value::Array(values) => single_or_array(values),
                    other => other,
                };
                node.insert(name, values);
            }
            Value::Object(node)
        })
        .collect();
    Value::Array(nodes)
}

fn node_id(term: &Term) -> String {
    match term {
        Term::Iri(iri) => iri.as_str().to_owned(),
        Term::Blank(label) => format!("_:{label}"),
        Term::Literal(literal) => literal.lexical.clone(),
    }
}

fn object_iri(term: &Term) -> &str {
    match term {
        Term::Iri(iri) => iri.as_str(),
        Term::Blank(label) => *label,
        Term::Literal(literal) => literal.lexical.as_str(),
    }
}

fn key(iri: &str) -> String {
    compact(iri).unwrap_or_else(|| iri.to_owned())
}

fn object_to_json(term: &Term) -> Value {
    match term {
        Term::Iri(iri) => json!({ "@id": iri.as_str() }),
        Term::Blank(label) => json!({ "@id": format!("_:{label}") }),
        Term::Literal(literal) => literal_to_json(literal),
    }
}

fn literal_to_json(literal: &Literal) -> Value {
    match &literal.lang {
        Some(lang) => json!({ "@value": literal.lexical, "@language": lang }),
        None if literal.datatype.as_str() == iris::XSD_STRING => json!(literal.lexical),
        None => json!({ "@value": literal.lexical, "@type": key(literal.datatype.as_str()) }),
    }
}

fn single_or_array(mut values: Vec<Value>) -> Value {
    if values.len() == 1 {
        values.remove(0)
    } else {
        Value::Array(values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::OntologyId;
    use crate::serializer::tests::pizza;

    #[test]
    fn has_context_and_graph() {
        let doc = to_json_ld(&pizza());
        assert_eq!(doc["@context"]["owl"], iris::OWL);
        assert!(doc["@graph"].is_array());
    }

    #[test]
    fn ontology_node_is_first() {
        let doc = to_json_ld(&pizza());
        let node = &doc["@graph"][0];
        assert_eq!(node["@id"], "http://example.org/pizza");
        assert_eq!(node["@type"], "owl:Ontology");
        assert_eq!(node["owl:imports"]["@id"], "http://example.org/food");
        assert_eq!(node["owl:versionIRI"]["@id"], "http://example.org/pizza/1.0");
    }

    #[test]
    fn repeated_predicates_become_arrays() {
        let doc = to_json_ld(&pizza());
        let graph = doc["@graph"].as_array().cloned().unwrap_or_default();
        let a = graph
            .iter()
            .find(|node| node["@id"] == "http://example.org/pizza#A")
            .cloned()
            .unwrap_or_default();
        assert_eq!(a["owl:equivalentClass"].as_array().map(Vec::len), Some(2));
    }

    #[test]
    fn plain_strings_are_bare_values() {
        let doc = to_json_ld(&pizza());
        let graph = doc["@graph"].as_array().cloned().unwrap_or_default();
        assert!(graph
            .iter()
            .any(|node| node["http://example.org/pizza#hasName"] == "Say \"cheese\"\nplease"));
    }

    #[test]
    fn anonymous_ontology_uses_blank_id() {
        let doc = to_json_ld(&Ontology::new(OntologyId::anonymous()));
        assert_eq!(doc["@graph"][0]["@id"], "_:ontology");
    }
}
