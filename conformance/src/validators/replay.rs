//! Replay validator.
//!
//! Applies each list to a fresh store holding an empty ontology for every id
//! the list targets, then checks that:
//! - reverting the resulting revision restores every snapshot
//! - the minimised list yields the same final state as the full list

use ontochange_model::change_list::{minimise, ontology_ids_of};
use ontochange_model::{Ontology, OntologyChange, OntologyStore};

use crate::corpus::ChangeListFile;
use crate::report::{ConformanceReport, TestResult};

const VALIDATOR: &str = "replay";

/// Validates replay, revert and minimisation over every list.
pub fn validate(files: &[ChangeListFile]) -> ConformanceReport {
    let mut report = ConformanceReport::new();
    for file in files {
        match check_list(&file.changes) {
            Ok(summary) => report.push(TestResult::pass(
                VALIDATOR,
                format!("{}: {summary}", file.name()),
            )),
            Err(issues) => report.push(TestResult::fail_with_details(
                VALIDATOR,
                format!("{}: replay does not restore state", file.name()),
                issues,
            )),
        }
    }
    report
}

/// Replays one list, returning a summary line or the problems found.
pub fn check_list(changes: &[OntologyChange]) -> Result<String, Vec<String>> {
    let mut issues = Vec::new();

    let store = fresh_store(changes).map_err(|e| vec![e])?;
    let before = snapshots(&store);
    let applied = store
        .apply_changes("conformance", "replay", changes)
        .map_err(|e| vec![format!("apply failed: {e}")])?;
    let after = snapshots(&store);

    if let Some(revision) = applied.revision() {
        match store.revert_revision("conformance", revision) {
            Ok(_) if snapshots(&store) == before => {}
            Ok(_) => issues.push(format!("reverting revision {revision} left a different state")),
            Err(e) => issues.push(format!("revert failed: {e}")),
        }
    }

    let minimised = minimise(changes);
    let minimal = fresh_store(changes).map_err(|e| vec![e])?;
    match minimal.apply_changes("conformance", "minimised", &minimised) {
        Ok(_) if snapshots(&minimal) == after => {}
        Ok(_) => issues.push("minimised list yields a different state".to_owned()),
        Err(e) => issues.push(format!("minimised list failed to apply: {e}")),
    }

    if issues.is_empty() {
        Ok(format!(
            "{} effective of {} change(s), {} after minimisation",
            applied.effective_changes().len(),
            changes.len(),
            minimised.len()
        ))
    } else {
        Err(issues)
    }
}

fn fresh_store(changes: &[OntologyChange]) -> Result<OntologyStore, String> {
    let store = OntologyStore::new();
    for id in ontology_ids_of(changes) {
        store
            .create_ontology(id)
            .map_err(|e| format!("cannot seed store: {e}"))?;
    }
    Ok(store)
}

fn snapshots(store: &OntologyStore) -> Vec<Option<Ontology>> {
    store
        .ontology_ids()
        .iter()
        .map(|id| store.ontology(id))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validators::fixtures::{add_import, add_sub, file};

    #[test]
    fn replay_restores_and_minimises() {
        let changes = vec![
            add_sub("A", "B"),
            add_import(),
            add_sub("A", "B").inverse_change(),
            add_import(),
        ];
        let summary = check_list(&changes).expect("list replays");
        assert_eq!(summary, "3 effective of 4 change(s), 2 after minimisation");
    }

    #[test]
    fn no_op_list_passes() {
        let changes = vec![add_import().inverse_change()];
        assert!(check_list(&changes).is_ok());
        assert!(validate(&[file(changes)]).all_passed());
    }
}
