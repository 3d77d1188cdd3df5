//! RDF 1.1 / Turtle 1.1 / JSON-LD output validator.
//!
//! Replays each list and checks that every resulting ontology serializes to
//! well-formed output:
//! - every N-Triples line is a single ` .`-terminated statement
//! - the Turtle document declares the standard prefixes and the ontology node
//! - the JSON-LD document has a `@context` object and a `@graph` array

use ontochange_model::change_list::ontology_ids_of;
use ontochange_model::serializer::{jsonld, ntriples, turtle, PREFIXES};
use ontochange_model::{Ontology, OntologyStore};

use crate::corpus::ChangeListFile;
use crate::report::{ConformanceReport, TestResult};

const VALIDATOR: &str = "rdf";

/// Validates the serialized form of every replayed ontology.
pub fn validate(files: &[ChangeListFile]) -> ConformanceReport {
    let mut report = ConformanceReport::new();
    for file in files {
        let store = OntologyStore::new();
        let seeded = ontology_ids_of(&file.changes)
            .into_iter()
            .try_for_each(|id| store.create_ontology(id))
            .and_then(|()| store.apply_changes("conformance", "rdf", &file.changes));
        if let Err(e) = seeded {
            report.push(TestResult::fail(
                VALIDATOR,
                format!("{}: cannot replay: {e}", file.name()),
            ));
            continue;
        }

        let mut issues = Vec::new();
        let mut triple_count = 0;
        for id in store.ontology_ids() {
            let Some(ontology) = store.ontology(&id) else {
                continue;
            };
            triple_count += check_ntriples(&ontology, &mut issues);
            check_turtle(&ontology, &mut issues);
            check_json_ld(&ontology, &mut issues);
        }

        if issues.is_empty() {
            report.push(TestResult::pass(
                VALIDATOR,
                format!("{}: serializations are well-formed ({triple_count} triples)", file.name()),
            ));
        } else {
            issues.truncate(10);
            report.push(TestResult::fail_with_details(
                VALIDATOR,
                format!("{}: serializations have structural issues", file.name()),
                issues,
            ));
        }
    }
    report
}

/// Checks the N-Triples rendering and returns its triple count.
fn check_ntriples(ontology: &Ontology, issues: &mut Vec<String>) -> usize {
    let content = ntriples::to_ntriples(ontology);
    let mut count = 0;
    for (i, line) in content.lines().enumerate() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        count += 1;
        if !trimmed.ends_with(" .") {
            issues.push(format!(
                "{}: N-Triples line {} does not end with \" .\"",
                ontology.id(),
                i + 1
            ));
        }
        if !(trimmed.starts_with('<') || trimmed.starts_with("_:")) {
            issues.push(format!(
                "{}: N-Triples line {} has no valid subject",
                ontology.id(),
                i + 1
            ));
        }
    }
    if count == 0 {
        issues.push(format!("{}: N-Triples output is empty", ontology.id()));
    }
    count
}

fn check_turtle(ontology: &Ontology, issues: &mut Vec<String>) {
    let content = turtle::to_turtle(ontology);
    for (prefix, _) in PREFIXES {
        if !content.contains(&format!("@prefix {prefix}:")) {
            issues.push(format!("{}: Turtle is missing the {prefix}: prefix", ontology.id()));
        }
    }
    if !content.contains("a owl:Ontology") {
        issues.push(format!("{}: Turtle has no ontology node", ontology.id()));
    }
}

fn check_json_ld(ontology: &Ontology, issues: &mut Vec<String>) {
    let doc = jsonld::to_json_ld(ontology);
    if !doc["@context"].is_object() {
        issues.push(format!("{}: JSON-LD has no @context object", ontology.id()));
    }
    if !doc["@graph"].as_array().is_some_and(|graph| !graph.is_empty()) {
        issues.push(format!("{}: JSON-LD @graph is missing or empty", ontology.id()));
    }
}
