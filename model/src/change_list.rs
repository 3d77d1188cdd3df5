//! Operations over ordered change lists.

use std::borrow::Cow;
use std::collections::{BTreeSet, HashMap};

use crate::change::OntologyChange;
use crate::model::{Entity, OntologyId};
use crate::replace::IriReplacer;

/// The list that undoes `changes`: every inverse, in reverse order.
#[must_use]
pub fn inverse_of(changes: &[OntologyChange]) -> Vec<OntologyChange> {
    changes.iter().rev().map(OntologyChange::inverse_change).collect()
}

/// The union of the signatures of `changes`.
#[must_use]
pub fn signature_of(changes: &[OntologyChange]) -> BTreeSet<Entity> {
    changes.iter().flat_map(OntologyChange::signature).collect()
}

/// Drops every change superseded by a later change to the same payload of
/// the same ontology.
///
/// Whether a payload ends up present depends only on the last change that
/// touches it, so the result leaves any ontology in the same final state as
/// the full list. Surviving changes keep their relative order.
#[must_use]
pub fn minimise(changes: &[OntologyChange]) -> Vec<OntologyChange> {
    // Keyed by the additive form so an add and a remove of one payload collide.
    let mut last: HashMap<Cow<'_, OntologyChange>, usize> = HashMap::new();
    for (index, change) in changes.iter().enumerate() {
        let key = if change.kind().is_addition() {
            Cow::Borrowed(change)
        } else {
            Cow::Owned(change.inverse_change())
        };
        last.insert(key, index);
    }
    let keep: BTreeSet<usize> = last.into_values().collect();
    keep.into_iter().map(|index| changes[index].clone()).collect()
}

/// Applies `replacer` to every change, borrowing the unchanged ones.
#[must_use]
pub fn replace_iris_in<'a>(
    changes: &'a [OntologyChange],
    replacer: &dyn IriReplacer,
) -> Vec<Cow<'a, OntologyChange>> {
    changes
        .iter()
        .map(|change| change.replace_iris(replacer))
        .collect()
}

/// Retargets every change at `ontology_id`, borrowing the ones already
/// targeting it.
#[must_use]
pub fn replace_ontology_id_in<'a>(
    changes: &'a [OntologyChange],
    ontology_id: &OntologyId,
) -> Vec<Cow<'a, OntologyChange>> {
    changes
        .iter()
        .map(|change| change.replace_ontology_id(ontology_id))
        .collect()
}

/// The distinct ontology ids targeted by `changes`.
#[must_use]
pub fn ontology_ids_of(changes: &[OntologyChange]) -> BTreeSet<OntologyId> {
    changes
        .iter()
        .map(|change| change.ontology_id().clone())
        .collect()
}
