//! Property-based tests for the change algebra.
//!
//! Uses proptest to check the inverse, retargeting, record and minimisation
//! laws over generated changes drawn from a deliberately small vocabulary,
//! so that generated lists touch the same payloads often.

use ontochange_model::change_list::{inverse_of, minimise};
use ontochange_model::{
    AddAxiomChange, AddImportChange, AddOntologyAnnotationChange, Annotation, Axiom, Entity,
    ImportsDeclaration, Iri, OntologyChange, OntologyId, OntologyStore, RemoveAxiomChange,
    RemoveImportChange, RemoveOntologyAnnotationChange,
};
use proptest::prelude::*;

fn iri(text: String) -> Iri {
    Iri::parse(&text).expect("generated IRIs are absolute")
}

fn ontology_ids() -> [OntologyId; 2] {
    [
        OntologyId::new(iri("http://example.org/o0".to_owned())),
        OntologyId::new(iri("http://example.org/o1".to_owned())),
    ]
}

fn entity_iri() -> impl Strategy<Value = Iri> {
    (0u8..5).prop_map(|n| iri(format!("http://example.org/vocab#e{n}")))
}

fn ontology_id() -> impl Strategy<Value = OntologyId> {
    (0usize..2).prop_map(|n| ontology_ids()[n].clone())
}

fn axiom() -> impl Strategy<Value = Axiom> {
    prop_oneof![
        entity_iri().prop_map(|iri| Axiom::Declaration {
            entity: Entity::class(iri)
        }),
        (entity_iri(), entity_iri()).prop_map(|(sub_class, super_class)| Axiom::SubClassOf {
            sub_class,
            super_class
        }),
        (entity_iri(), entity_iri()).prop_map(|(class, individual)| Axiom::ClassAssertion {
            class,
            individual
        }),
    ]
}

fn imports_declaration() -> impl Strategy<Value = ImportsDeclaration> {
    (0u8..3).prop_map(|n| ImportsDeclaration::new(iri(format!("http://example.org/import{n}"))))
}

fn annotation() -> impl Strategy<Value = Annotation> {
    (0u8..3).prop_map(|n| Annotation::label(format!("label {n}")))
}

fn change() -> impl Strategy<Value = OntologyChange> {
    (ontology_id(), 0u8..6, axiom(), imports_declaration(), annotation()).prop_map(
        |(id, kind, axiom, import, annotation)| match kind {
            0 => AddAxiomChange::of(id, axiom).into(),
            1 => RemoveAxiomChange::of(id, axiom).into(),
            2 => AddImportChange::of(id, import).into(),
            3 => RemoveImportChange::of(id, import).into(),
            4 => AddOntologyAnnotationChange::of(id, annotation).into(),
            _ => RemoveOntologyAnnotationChange::of(id, annotation).into(),
        },
    )
}

fn seeded_store(base: &[OntologyChange]) -> OntologyStore {
    let store = OntologyStore::new();
    for id in ontology_ids() {
        store.create_ontology(id).expect("fresh ids");
    }
    store.apply_changes("seed", "base", base).expect("known ontologies");
    store
}

fn snapshots(store: &OntologyStore) -> Vec<Option<ontochange_model::Ontology>> {
    ontology_ids().iter().map(|id| store.ontology(id)).collect()
}

// =============================================================================
// Per-change laws
// =============================================================================

proptest! {
    /// inverse is an involution: inverse(inverse(c)) = c
    #[test]
    fn prop_inverse_involution(c in change()) {
        let inverse = c.inverse_change();
        prop_assert_eq!(inverse.inverse_change(), c.clone());
        prop_assert_eq!(inverse.kind(), c.kind().inverse());
        prop_assert_eq!(inverse.ontology_id(), c.ontology_id());
    }

    /// Retargeting at the current id hands back the same instance.
    #[test]
    fn prop_retarget_same_id_is_identity(c in change()) {
        let same = c.replace_ontology_id(c.ontology_id());
        prop_assert!(std::ptr::eq(same.as_ref(), &c));
    }

    /// Retargeting elsewhere keeps the kind, the payload and the inverse kind.
    #[test]
    fn prop_retarget_preserves_payload(c in change(), target in ontology_id()) {
        let moved = c.replace_ontology_id(&target).into_owned();
        prop_assert_eq!(moved.ontology_id(), &target);
        prop_assert_eq!(moved.kind(), c.kind());
        prop_assert_eq!(moved.axiom(), c.axiom());
        prop_assert_eq!(moved.imports_declaration(), c.imports_declaration());
        prop_assert_eq!(moved.annotation(), c.annotation());
        prop_assert_eq!(moved.inverse_change().kind(), c.inverse_change().kind());
    }

    /// Exactly one family predicate holds, and add xor remove.
    #[test]
    fn prop_predicates_are_exclusive(c in change()) {
        let families = [
            c.is_axiom_change(),
            c.is_import_change(),
            c.is_ontology_annotation_change(),
        ];
        prop_assert_eq!(families.iter().filter(|&&f| f).count(), 1);
        let directions = [
            c.is_add_axiom(),
            c.is_remove_axiom(),
            c.is_add_import(),
            c.is_remove_import(),
            c.is_add_ontology_annotation(),
            c.is_remove_ontology_annotation(),
        ];
        prop_assert_eq!(directions.iter().filter(|&&d| d).count(), 1);
    }

    /// Changes survive the record conversion and its JSON form.
    #[test]
    fn prop_record_round_trip(c in change()) {
        let record = c.to_owl_ontology_change_record();
        prop_assert_eq!(record.ontology_id(), c.ontology_id());
        prop_assert_eq!(record.data().kind(), c.kind());
        prop_assert_eq!(OntologyChange::from(record), c.clone());

        let json = serde_json::to_string(&c).expect("serialize");
        let back: OntologyChange = serde_json::from_str(&json).expect("parse");
        prop_assert_eq!(back, c);
    }
}

// =============================================================================
// List laws
// =============================================================================

proptest! {
    /// Undoing the effective changes restores every snapshot.
    #[test]
    fn prop_apply_then_inverse_restores(
        base in prop::collection::vec(change(), 0..12),
        changes in prop::collection::vec(change(), 0..24),
    ) {
        let store = seeded_store(&base);
        let before = snapshots(&store);
        let applied = store.apply_changes("test", "edit", &changes).expect("apply");
        store
            .apply_changes("test", "undo", &inverse_of(applied.effective_changes()))
            .expect("undo");
        prop_assert_eq!(snapshots(&store), before);
    }

    /// Reverting the last revision restores every snapshot.
    #[test]
    fn prop_revert_restores(
        base in prop::collection::vec(change(), 0..12),
        changes in prop::collection::vec(change(), 1..24),
    ) {
        let store = seeded_store(&base);
        let before = snapshots(&store);
        let applied = store.apply_changes("test", "edit", &changes).expect("apply");
        if let Some(revision) = applied.revision() {
            store.revert_revision("test", revision).expect("revert");
        }
        prop_assert_eq!(snapshots(&store), before);
    }

    /// The minimised list leaves every ontology in the same final state.
    #[test]
    fn prop_minimise_preserves_final_state(
        base in prop::collection::vec(change(), 0..12),
        changes in prop::collection::vec(change(), 0..32),
    ) {
        let full = seeded_store(&base);
        let minimal = seeded_store(&base);
        full.apply_changes("test", "full", &changes).expect("apply");
        let minimised = minimise(&changes);
        prop_assert!(minimised.len() <= changes.len());
        minimal.apply_changes("test", "minimal", &minimised).expect("apply");
        prop_assert_eq!(snapshots(&full), snapshots(&minimal));
    }

    /// Minimising twice changes nothing.
    #[test]
    fn prop_minimise_idempotent(changes in prop::collection::vec(change(), 0..32)) {
        let once = minimise(&changes);
        prop_assert_eq!(minimise(&once), once);
    }
}
