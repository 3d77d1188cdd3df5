//! Per-change algebraic laws.
//!
//! Checks, for every change of every list:
//! - the inverse of the inverse is the change itself
//! - exactly one change family holds, and exactly one direction
//! - retargeting at the current ontology id hands back the same instance
//! - the change survives the engine record and its JSON form

use ontochange_model::OntologyChange;

use crate::corpus::ChangeListFile;
use crate::report::{ConformanceReport, TestResult};

const VALIDATOR: &str = "laws";

/// Validates the change laws over every list.
pub fn validate(files: &[ChangeListFile]) -> ConformanceReport {
    let mut report = ConformanceReport::new();
    for file in files {
        let issues: Vec<String> = file
            .changes
            .iter()
            .enumerate()
            .flat_map(|(i, change)| {
                check_change(change)
                    .into_iter()
                    .map(move |issue| format!("change {}: {issue}", i + 1))
            })
            .collect();
        if issues.is_empty() {
            report.push(TestResult::pass(
                VALIDATOR,
                format!(
                    "{}: {} change(s) satisfy the change laws",
                    file.name(),
                    file.changes.len()
                ),
            ));
        } else {
            report.push(TestResult::fail_with_details(
                VALIDATOR,
                format!("{}: {} law violation(s)", file.name(), issues.len()),
                issues,
            ));
        }
    }
    report
}

/// The laws `change` violates, one line each.
pub fn check_change(change: &OntologyChange) -> Vec<String> {
    let mut issues = Vec::new();

    if &change.inverse_change().inverse_change() != change {
        issues.push(format!("double inverse of {change} differs"));
    }
    if change.inverse_change().kind() != change.kind().inverse() {
        issues.push(format!("inverse of {change} has kind {}", change.inverse_change().kind()));
    }

    let families = [
        change.is_axiom_change(),
        change.is_import_change(),
        change.is_ontology_annotation_change(),
    ];
    if families.iter().filter(|&&f| f).count() != 1 {
        issues.push(format!("{change} does not belong to exactly one family"));
    }
    let directions = [
        change.is_add_axiom(),
        change.is_remove_axiom(),
        change.is_add_import(),
        change.is_remove_import(),
        change.is_add_ontology_annotation(),
        change.is_remove_ontology_annotation(),
    ];
    if directions.iter().filter(|&&d| d).count() != 1 {
        issues.push(format!("{change} does not have exactly one direction"));
    }

    let same = change.replace_ontology_id(change.ontology_id());
    if !std::ptr::eq(same.as_ref(), change) {
        issues.push(format!("retargeting {change} at its own id copied it"));
    }

    if &OntologyChange::from(change.to_owl_ontology_change_record()) != change {
        issues.push(format!("{change} does not survive its record"));
    }
    match serde_json::to_string(change).map(|json| serde_json::from_str::<OntologyChange>(&json)) {
        Ok(Ok(back)) if &back == change => {}
        Ok(Ok(_)) => issues.push(format!("{change} changes through JSON")),
        Ok(Err(e)) | Err(e) => issues.push(format!("{change} fails JSON round trip: {e}")),
    }

    issues
}
