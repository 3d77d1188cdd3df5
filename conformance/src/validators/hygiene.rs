//! Change-list hygiene.
//!
//! Flags lists that would shrink under minimisation for obvious reasons:
//! the same change twice in a row, or a change immediately undone by its
//! inverse. These are warnings; the list still applies correctly.

use crate::corpus::ChangeListFile;
use crate::report::{ConformanceReport, TestResult};

const VALIDATOR: &str = "hygiene";

/// Validates list hygiene over every list.
pub fn validate(files: &[ChangeListFile]) -> ConformanceReport {
    let mut report = ConformanceReport::new();
    for file in files {
        if file.changes.is_empty() {
            report.push(TestResult::warn(VALIDATOR, format!("{}: empty change list", file.name())));
            continue;
        }

        let mut issues = Vec::new();
        for (i, pair) in file.changes.windows(2).enumerate() {
            let (first, second) = (&pair[0], &pair[1]);
            if first == second {
                issues.push(format!("changes {} and {}: duplicate {first}", i + 1, i + 2));
            } else if second == &first.inverse_change() {
                issues.push(format!(
                    "changes {} and {}: {first} is undone immediately",
                    i + 1,
                    i + 2
                ));
            }
        }

        if issues.is_empty() {
            report.push(TestResult::pass(
                VALIDATOR,
                format!("{}: no redundant adjacent changes", file.name()),
            ));
        } else {
            report.push(TestResult::warn_with_details(
                VALIDATOR,
                format!("{}: {} redundant adjacent change(s)", file.name(), issues.len()),
                issues,
            ));
        }
    }
    report
}
