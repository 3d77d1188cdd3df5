//! Visitor dispatch over the change variants.
//!
//! Code inside this crate matches on [`OntologyChange`](crate::OntologyChange)
//! directly. The visitor traits serve consumers that prefer one method per
//! variant: diff renderers, history writers, reindexers.

use crate::change::{
    AddAxiomChange, AddImportChange, AddOntologyAnnotationChange, RemoveAxiomChange,
    RemoveImportChange, RemoveOntologyAnnotationChange,
};

/// A side-effecting visitor. Every method defaults to doing nothing.
pub trait OntologyChangeVisitor {
    /// Visits an [`AddAxiomChange`].
    fn visit_add_axiom(&mut self, _change: &AddAxiomChange) {}
    /// Visits a [`RemoveAxiomChange`].
    fn visit_remove_axiom(&mut self, _change: &RemoveAxiomChange) {}
    /// Visits an [`AddImportChange`].
    fn visit_add_import(&mut self, _change: &AddImportChange) {}
    /// Visits a [`RemoveImportChange`].
    fn visit_remove_import(&mut self, _change: &RemoveImportChange) {}
    /// Visits an [`AddOntologyAnnotationChange`].
    fn visit_add_ontology_annotation(&mut self, _change: &AddOntologyAnnotationChange) {}
    /// Visits a [`RemoveOntologyAnnotationChange`].
    fn visit_remove_ontology_annotation(&mut self, _change: &RemoveOntologyAnnotationChange) {}
}

/// A result-producing visitor.
pub trait OntologyChangeVisitorEx {
    /// The value produced for each visited change.
    type Output;

    /// Visits an [`AddAxiomChange`].
    fn visit_add_axiom(&mut self, change: &AddAxiomChange) -> Self::Output;
    /// Visits a [`RemoveAxiomChange`].
    fn visit_remove_axiom(&mut self, change: &RemoveAxiomChange) -> Self::Output;
    /// Visits an [`AddImportChange`].
    fn visit_add_import(&mut self, change: &AddImportChange) -> Self::Output;
    /// Visits a [`RemoveImportChange`].
    fn visit_remove_import(&mut self, change: &RemoveImportChange) -> Self::Output;
    /// Visits an [`AddOntologyAnnotationChange`].
    fn visit_add_ontology_annotation(
        &mut self,
        change: &AddOntologyAnnotationChange,
    ) -> Self::Output;
    /// Visits a [`RemoveOntologyAnnotationChange`].
    fn visit_remove_ontology_annotation(
        &mut self,
        change: &RemoveOntologyAnnotationChange,
    ) -> Self::Output;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::axiom::Axiom;
    use crate::change::{ChangeKind, OntologyChange};
    use crate::model::{Annotation, Entity, ImportsDeclaration, Iri, OntologyId};

    #[derive(Default)]
    struct Recorder {
        calls: Vec<&'static str>,
        last_import: Option<AddImportChange>,
    }

    impl OntologyChangeVisitor for Recorder {
        fn visit_add_axiom(&mut self, _change: &AddAxiomChange) {
            self.calls.push("add-axiom");
        }
        fn visit_remove_axiom(&mut self, _change: &RemoveAxiomChange) {
            self.calls.push("remove-axiom");
        }
        fn visit_add_import(&mut self, change: &AddImportChange) {
            self.calls.push("add-import");
            self.last_import = Some(change.clone());
        }
        fn visit_remove_import(&mut self, _change: &RemoveImportChange) {
            self.calls.push("remove-import");
        }
        fn visit_add_ontology_annotation(&mut self, _change: &AddOntologyAnnotationChange) {
            self.calls.push("add-ontology-annotation");
        }
        fn visit_remove_ontology_annotation(&mut self, _change: &RemoveOntologyAnnotationChange) {
            self.calls.push("remove-ontology-annotation");
        }
    }

    /// Reports which method was called as the variant's kind.
    struct KindOf;

    impl OntologyChangeVisitorEx for KindOf {
        type Output = ChangeKind;

        fn visit_add_axiom(&mut self, _change: &AddAxiomChange) -> Self::Output {
            ChangeKind::AddAxiom
        }
        fn visit_remove_axiom(&mut self, _change: &RemoveAxiomChange) -> Self::Output {
            ChangeKind::RemoveAxiom
        }
        fn visit_add_import(&mut self, _change: &AddImportChange) -> Self::Output {
            ChangeKind::AddImport
        }
        fn visit_remove_import(&mut self, _change: &RemoveImportChange) -> Self::Output {
            ChangeKind::RemoveImport
        }
        fn visit_add_ontology_annotation(
            &mut self,
            _change: &AddOntologyAnnotationChange,
        ) -> Self::Output {
            ChangeKind::AddOntologyAnnotation
        }
        fn visit_remove_ontology_annotation(
            &mut self,
            _change: &RemoveOntologyAnnotationChange,
        ) -> Self::Output {
            ChangeKind::RemoveOntologyAnnotation
        }
    }

    struct ImportIri;

    impl OntologyChangeVisitorEx for ImportIri {
        type Output = Option<Iri>;

        fn visit_add_axiom(&mut self, _change: &AddAxiomChange) -> Self::Output {
            None
        }
        fn visit_remove_axiom(&mut self, _change: &RemoveAxiomChange) -> Self::Output {
            None
        }
        fn visit_add_import(&mut self, change: &AddImportChange) -> Self::Output {
            Some(change.imports_declaration().iri().clone())
        }
        fn visit_remove_import(&mut self, change: &RemoveImportChange) -> Self::Output {
            Some(change.imports_declaration().iri().clone())
        }
        fn visit_add_ontology_annotation(
            &mut self,
            _change: &AddOntologyAnnotationChange,
        ) -> Self::Output {
            None
        }
        fn visit_remove_ontology_annotation(
            &mut self,
            _change: &RemoveOntologyAnnotationChange,
        ) -> Self::Output {
            None
        }
    }

    fn add_import() -> AddImportChange {
        AddImportChange::of(
            OntologyId::new(Iri::parse("http://example.org/pizza").expect("valid IRI")),
            ImportsDeclaration::new(Iri::parse("http://example.org/food").expect("valid IRI")),
        )
    }

    fn one_of_each() -> Vec<OntologyChange> {
        let pizza = OntologyId::new(Iri::parse("http://example.org/pizza").expect("valid IRI"));
        let class = Iri::parse("http://example.org/pizza#Margherita").expect("valid IRI");
        let axiom = Axiom::Declaration {
            entity: Entity::class(class),
        };
        let add_axiom = OntologyChange::from(AddAxiomChange::of(pizza.clone(), axiom));
        let add_annotation = OntologyChange::from(AddOntologyAnnotationChange::of(
            pizza,
            Annotation::label("Pizza"),
        ));
        let add_import = OntologyChange::from(add_import());
        vec![
            add_axiom.inverse_change(),
            add_axiom,
            add_import.inverse_change(),
            add_import,
            add_annotation.inverse_change(),
            add_annotation,
        ]
    }

    #[test]
    fn one_of_each_covers_every_kind() {
        let mut kinds: Vec<_> = one_of_each().iter().map(OntologyChange::kind).collect();
        kinds.sort();
        let mut all = ChangeKind::ALL.to_vec();
        all.sort();
        assert_eq!(kinds, all);
    }

    #[test]
    fn accept_dispatches_every_variant_once() {
        for change in one_of_each() {
            let mut recorder = Recorder::default();
            change.accept(&mut recorder);
            assert_eq!(recorder.calls, vec![change.kind().as_str()], "{change:?}");
        }
    }

    #[test]
    fn accept_ex_returns_matching_method_result() {
        for change in one_of_each() {
            assert_eq!(change.accept_ex(&mut KindOf), change.kind(), "{change:?}");
        }
    }

    #[test]
    fn accept_calls_matching_method_once() {
        let change = OntologyChange::from(add_import());
        let mut recorder = Recorder::default();
        change.accept(&mut recorder);
        assert_eq!(recorder.calls, vec!["add-import"]);
        assert_eq!(recorder.last_import, Some(add_import()));
    }

    #[test]
    fn accept_ex_propagates_result() {
        let change = OntologyChange::from(add_import());
        let iri = change.accept_ex(&mut ImportIri);
        assert_eq!(iri.as_ref().map(Iri::as_str), Some("http://example.org/food"));

        let inverse = change.inverse_change();
        assert_eq!(inverse.accept_ex(&mut ImportIri), iri);
    }

    #[test]
    fn default_methods_ignore_changes() {
        struct Nothing;
        impl OntologyChangeVisitor for Nothing {}
        OntologyChange::from(add_import()).accept(&mut Nothing);
    }
}
