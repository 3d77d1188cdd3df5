//! Revision history.
//!
//! Every batch that changes at least one ontology becomes a [`Revision`]
//! holding its effective changes. Revision numbers start at 1 and increase
//! by one per committed batch.

use std::collections::{BTreeMap, BTreeSet};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::change::{ChangeKind, OntologyChange};
use crate::change_list;
use crate::error::{ChangeError, Result};
use crate::model::Entity;

/// The effective changes of one committed batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Revision {
    number: u64,
    author: String,
    timestamp: DateTime<Utc>,
    message: String,
    changes: Vec<OntologyChange>,
}

impl Revision {
    /// The revision number.
    #[must_use]
    pub fn number(&self) -> u64 {
        self.number
    }

    /// Who submitted the batch.
    #[must_use]
    pub fn author(&self) -> &str {
        &self.author
    }

    /// When the batch was committed.
    #[must_use]
    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    /// The commit message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// The effective changes, in application order.
    #[must_use]
    pub fn changes(&self) -> &[OntologyChange] {
        &self.changes
    }

    /// Number of changes per kind.
    #[must_use]
    pub fn summary(&self) -> BTreeMap<ChangeKind, usize> {
        let mut counts = BTreeMap::new();
        for change in &self.changes {
            *counts.entry(change.kind()).or_insert(0) += 1;
        }
        counts
    }

    /// Every entity touched by this revision.
    #[must_use]
    pub fn signature(&self) -> BTreeSet<Entity> {
        change_list::signature_of(&self.changes)
    }
}

/// An append-only sequence of revisions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawHistory")]
pub struct RevisionHistory {
    revisions: Vec<Revision>,
}

#[derive(Deserialize)]
struct RawHistory {
    revisions: Vec<Revision>,
}

impl TryFrom<RawHistory> for RevisionHistory {
    type Error = ChangeError;

    fn try_from(raw: RawHistory) -> Result<Self> {
        for (expected, revision) in (1..).zip(&raw.revisions) {
            if revision.number != expected {
                return Err(ChangeError::NonSequentialRevision {
                    expected,
                    found: revision.number,
                });
            }
        }
        Ok(Self {
            revisions: raw.revisions,
        })
    }
}

impl RevisionHistory {
    /// Creates an empty history.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a revision stamped with the current time.
    pub fn append(
        &mut self,
        author: impl Into<String>,
        message: impl Into<String>,
        changes: Vec<OntologyChange>,
    ) -> &Revision {
        self.append_at(author, message, changes, Utc::now())
    }

    /// Appends a revision with an explicit timestamp.
    pub fn append_at(
        &mut self,
        author: impl Into<String>,
        message: impl Into<String>,
        changes: Vec<OntologyChange>,
        timestamp: DateTime<Utc>,
    ) -> &Revision {
        let revision = Revision {
            number: self.head_number() + 1,
            author: author.into(),
            timestamp,
            message: message.into(),
            changes,
        };
        self.revisions.push(revision);
        &self.revisions[self.revisions.len() - 1]
    }

    /// The number of the latest revision, or 0 for an empty history.
    #[must_use]
    pub fn head_number(&self) -> u64 {
        self.revisions.last().map_or(0, Revision::number)
    }

    /// The latest revision.
    #[must_use]
    pub fn head(&self) -> Option<&Revision> {
        self.revisions.last()
    }

    /// Looks up a revision by number.
    ///
    /// # Errors
    ///
    /// Returns [`ChangeError::UnknownRevision`] when no such revision exists.
    pub fn get(&self, number: u64) -> Result<&Revision> {
        // Numbers are dense and start at 1.
        number
            .checked_sub(1)
            .and_then(|index| usize::try_from(index).ok())
            .and_then(|index| self.revisions.get(index))
            .ok_or(ChangeError::UnknownRevision(number))
    }

    /// The changes committed after revision `number`, oldest first.
    #[must_use]
    pub fn changes_since(&self, number: u64) -> Vec<&OntologyChange> {
        self.revisions
            .iter()
            .filter(|revision| revision.number > number)
            .flat_map(|revision| revision.changes.iter())
            .collect()
    }

    /// Iterates revisions oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &Revision> {
        self.revisions.iter()
    }

    /// Number of revisions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.revisions.len()
    }

    /// Whether no revision has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.revisions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::change::AddImportChange;
    use crate::model::{ImportsDeclaration, Iri, OntologyId};

    fn add_import() -> OntologyChange {
        AddImportChange::of(
            OntologyId::new(Iri::parse("http://example.org/pizza").expect("valid IRI")),
            ImportsDeclaration::new(Iri::parse("http://example.org/food").expect("valid IRI")),
        )
        .into()
    }

    #[test]
    fn numbers_start_at_one_and_increase() {
        let mut history = RevisionHistory::new();
        assert_eq!(history.head_number(), 0);
        assert_eq!(history.append("alice", "first", vec![add_import()]).number(), 1);
        assert_eq!(history.append("bob", "second", vec![]).number(), 2);
        assert_eq!(history.head().map(Revision::author), Some("bob"));
        assert_eq!(history.len(), 2);
    }

    #[test]
    fn get_rejects_unknown_numbers() {
        let mut history = RevisionHistory::new();
        history.append("alice", "first", vec![add_import()]);
        assert!(history.get(1).is_ok());
        assert_eq!(history.get(0), Err(ChangeError::UnknownRevision(0)));
        assert_eq!(history.get(2), Err(ChangeError::UnknownRevision(2)));
    }

    fn revision_json(number: u64) -> serde_json::Value {
        serde_json::json!({
            "number": number,
            "author": "alice",
            "timestamp": "2024-01-01T00:00:00Z",
            "message": "m",
            "changes": [],
        })
    }

    #[test]
    fn deserialize_accepts_dense_numbering() {
        let json = serde_json::json!({ "revisions": [revision_json(1), revision_json(2)] });
        let history: RevisionHistory = serde_json::from_value(json).expect("parse");
        assert_eq!(history.get(2).map(Revision::number), Ok(2));
    }

    #[test]
    fn deserialize_rejects_gaps_in_numbering() {
        let json = serde_json::json!({ "revisions": [revision_json(5)] });
        let err = serde_json::from_value::<RevisionHistory>(json).expect_err("gap");
        assert!(err.to_string().contains("revision 5 found where revision 1"), "{err}");

        let json = serde_json::json!({ "revisions": [revision_json(1), revision_json(3)] });
        assert!(serde_json::from_value::<RevisionHistory>(json).is_err());
    }

    #[test]
    fn history_round_trips_through_json() {
        let mut history = RevisionHistory::new();
        history.append("alice", "first", vec![add_import()]);
        history.append("bob", "second", vec![add_import().inverse_change()]);
        let json = serde_json::to_string(&history).expect("serialize");
        let back: RevisionHistory = serde_json::from_str(&json).expect("parse");
        assert_eq!(back, history);
    }

    #[test]
    fn summary_counts_kinds() {
        let mut history = RevisionHistory::new();
        let change = add_import();
        let revision = history.append("alice", "m", vec![change.clone(), change.inverse_change()]);
        let summary = revision.summary();
        assert_eq!(summary.get(&ChangeKind::AddImport), Some(&1));
        assert_eq!(summary.get(&ChangeKind::RemoveImport), Some(&1));
    }

    #[test]
    fn changes_since_skips_older_revisions() {
        let mut history = RevisionHistory::new();
        let change = add_import();
        history.append("alice", "one", vec![change.clone()]);
        history.append("alice", "two", vec![change.inverse_change()]);
        assert_eq!(history.changes_since(1), vec![&change.inverse_change()]);
        assert!(history.changes_since(2).is_empty());
    }

    #[test]
    fn serializes_with_changes_as_records() {
        let mut history = RevisionHistory::new();
        history.append("alice", "one", vec![add_import()]);
        let json = serde_json::to_value(&history).expect("serialize");
        assert_eq!(json["revisions"][0]["changes"][0]["data"]["kind"], "add-import");
        let back: RevisionHistory = serde_json::from_value(json).expect("deserialize");
        assert_eq!(back, history);
    }
}
