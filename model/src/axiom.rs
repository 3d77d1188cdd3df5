//! OWL axioms carried by axiom changes.
//!
//! The supported axiom kinds form a closed set, listed by
//! [`AxiomType::ALL`]. Every axiom knows its type, its signature (the typed
//! entities it mentions) and how to rewrite its IRIs.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::model::{Annotation, AnnotationValue, Entity, EntityType, Iri, Literal};
use crate::replace::IriReplacer;

/// The kind of an axiom.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum AxiomType {
    /// Entity declaration.
    Declaration,
    /// `SubClassOf(C D)`.
    SubClassOf,
    /// `EquivalentClasses(C1 ... Cn)`.
    EquivalentClasses,
    /// `DisjointClasses(C1 ... Cn)`.
    DisjointClasses,
    /// `SubObjectPropertyOf(P Q)`.
    SubObjectPropertyOf,
    /// `ObjectPropertyDomain(P C)`.
    ObjectPropertyDomain,
    /// `ObjectPropertyRange(P C)`.
    ObjectPropertyRange,
    /// `ClassAssertion(C i)`.
    ClassAssertion,
    /// `ObjectPropertyAssertion(P i j)`.
    ObjectPropertyAssertion,
    /// `DataPropertyAssertion(P i v)`.
    DataPropertyAssertion,
    /// `AnnotationAssertion(A s v)`.
    AnnotationAssertion,
}

impl AxiomType {
    /// Every supported axiom type.
    pub const ALL: [AxiomType; 11] = [
        AxiomType::Declaration,
        AxiomType::SubClassOf,
        AxiomType::EquivalentClasses,
        AxiomType::DisjointClasses,
        AxiomType::SubObjectPropertyOf,
        AxiomType::ObjectPropertyDomain,
        AxiomType::ObjectPropertyRange,
        AxiomType::ClassAssertion,
        AxiomType::ObjectPropertyAssertion,
        AxiomType::DataPropertyAssertion,
        AxiomType::AnnotationAssertion,
    ];

    /// The OWL functional-syntax name of this axiom type.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            AxiomType::Declaration => "Declaration",
            AxiomType::SubClassOf => "SubClassOf",
            AxiomType::EquivalentClasses => "EquivalentClasses",
            AxiomType::DisjointClasses => "DisjointClasses",
            AxiomType::SubObjectPropertyOf => "SubObjectPropertyOf",
            AxiomType::ObjectPropertyDomain => "ObjectPropertyDomain",
            AxiomType::ObjectPropertyRange => "ObjectPropertyRange",
            AxiomType::ClassAssertion => "ClassAssertion",
            AxiomType::ObjectPropertyAssertion => "ObjectPropertyAssertion",
            AxiomType::DataPropertyAssertion => "DataPropertyAssertion",
            AxiomType::AnnotationAssertion => "AnnotationAssertion",
        }
    }
}

impl fmt::Display for AxiomType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A logical statement within an ontology.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum Axiom {
    /// Declares an entity.
    Declaration {
        /// The declared entity.
        entity: Entity,
    },
    /// `sub_class` is a subclass of `super_class`.
    SubClassOf {
        /// The subclass.
        sub_class: Iri,
        /// The superclass.
        super_class: Iri,
    },
    /// The classes are pairwise equivalent.
    EquivalentClasses {
        /// The operands, at least two.
        classes: Vec<Iri>,
    },
    /// The classes are pairwise disjoint.
    DisjointClasses {
        /// The operands, at least two.
        classes: Vec<Iri>,
    },
    /// `sub_property` is a sub-property of `super_property`.
    SubObjectPropertyOf {
        /// The sub-property.
        sub_property: Iri,
        /// The super-property.
        super_property: Iri,
    },
    /// The domain of an object property.
    ObjectPropertyDomain {
        /// The property.
        property: Iri,
        /// The domain class.
        domain: Iri,
    },
    /// The range of an object property.
    ObjectPropertyRange {
        /// The property.
        property: Iri,
        /// The range class.
        range: Iri,
    },
    /// `individual` is an instance of `class`.
    ClassAssertion {
        /// The class.
        class: Iri,
        /// The individual.
        individual: Iri,
    },
    /// `subject` is related to `object` by `property`.
    ObjectPropertyAssertion {
        /// The object property.
        property: Iri,
        /// The source individual.
        subject: Iri,
        /// The target individual.
        object: Iri,
    },
    /// `subject` has the data value `value` for `property`.
    DataPropertyAssertion {
        /// The data property.
        property: Iri,
        /// The individual.
        subject: Iri,
        /// The literal value.
        value: Literal,
    },
    /// An annotation on the resource named `subject`.
    AnnotationAssertion {
        /// The annotated IRI.
        subject: Iri,
        /// The annotation.
        annotation: Annotation,
    },
}

impl Axiom {
    /// Returns the type of this axiom.
    #[must_use]
    pub fn axiom_type(&self) -> AxiomType {
        match self {
            Axiom::Declaration { .. } => AxiomType::Declaration,
            Axiom::SubClassOf { .. } => AxiomType::SubClassOf,
            Axiom::EquivalentClasses { .. } => AxiomType::EquivalentClasses,
            Axiom::DisjointClasses { .. } => AxiomType::DisjointClasses,
            Axiom::SubObjectPropertyOf { .. } => AxiomType::SubObjectPropertyOf,
            Axiom::ObjectPropertyDomain { .. } => AxiomType::ObjectPropertyDomain,
            Axiom::ObjectPropertyRange { .. } => AxiomType::ObjectPropertyRange,
            Axiom::ClassAssertion { .. } => AxiomType::ClassAssertion,
            Axiom::ObjectPropertyAssertion { .. } => AxiomType::ObjectPropertyAssertion,
            Axiom::DataPropertyAssertion { .. } => AxiomType::DataPropertyAssertion,
            Axiom::AnnotationAssertion { .. } => AxiomType::AnnotationAssertion,
        }
    }

    /// Returns the entities this axiom references, typed by their role.
    ///
    /// Annotation subjects are plain IRIs and are not part of the signature.
    #[must_use]
    pub fn signature(&self) -> BTreeSet<Entity> {
        let mut sig = BTreeSet::new();
        match self {
            Axiom::Declaration { entity } => {
                sig.insert(entity.clone());
            }
            Axiom::SubClassOf {
                sub_class,
                super_class,
            } => {
                sig.insert(Entity::class(sub_class.clone()));
                sig.insert(Entity::class(super_class.clone()));
            }
            Axiom::EquivalentClasses { classes } | Axiom::DisjointClasses { classes } => {
                sig.extend(classes.iter().cloned().map(Entity::class));
            }
            Axiom::SubObjectPropertyOf {
                sub_property,
                super_property,
            } => {
                sig.insert(Entity::object_property(sub_property.clone()));
                sig.insert(Entity::object_property(super_property.clone()));
            }
            Axiom::ObjectPropertyDomain {
                property,
                domain: class,
            }
            | Axiom::ObjectPropertyRange {
                property,
                range: class,
            } => {
                sig.insert(Entity::object_property(property.clone()));
                sig.insert(Entity::class(class.clone()));
            }
            Axiom::ClassAssertion { class, individual } => {
                sig.insert(Entity::class(class.clone()));
                sig.insert(Entity::individual(individual.clone()));
            }
            Axiom::ObjectPropertyAssertion {
                property,
                subject,
                object,
            } => {
                sig.insert(Entity::object_property(property.clone()));
                sig.insert(Entity::individual(subject.clone()));
                sig.insert(Entity::individual(object.clone()));
            }
            Axiom::DataPropertyAssertion {
                property,
                subject,
                value,
            } => {
                sig.insert(Entity::data_property(property.clone()));
                sig.insert(Entity::individual(subject.clone()));
                sig.insert(Entity::new(EntityType::Datatype, value.datatype.clone()));
            }
            Axiom::AnnotationAssertion { annotation, .. } => {
                sig.insert(Entity::annotation_property(annotation.property.clone()));
                if let AnnotationValue::Literal(literal) = &annotation.value {
                    sig.insert(Entity::new(EntityType::Datatype, literal.datatype.clone()));
                }
            }
        }
        sig
    }

    /// Rewrites every entity IRI in this axiom. Literals are left alone.
    ///
    /// Returns `None` when the replacer maps no IRI of this axiom to a
    /// different IRI.
    #[must_use]
    pub fn replace_iris(&self, replacer: &dyn IriReplacer) -> Option<Axiom> {
        let mut changed = false;
        let mut swap = |iri: &Iri| match iri.replaced(replacer) {
            Some(new) => {
                changed = true;
                new
            }
            None => iri.clone(),
        };
        let replaced = match self {
            Axiom::Declaration { entity } => {
                return entity
                    .replaced(replacer)
                    .map(|entity| Axiom::Declaration { entity });
            }
            Axiom::SubClassOf {
                sub_class,
                super_class,
            } => Axiom::SubClassOf {
                sub_class: swap(sub_class),
                super_class: swap(super_class),
            },
            Axiom::EquivalentClasses { classes } => Axiom::EquivalentClasses {
                classes: classes.iter().map(&mut swap).collect(),
            },
            Axiom::DisjointClasses { classes } => Axiom::DisjointClasses {
                classes: classes.iter().map(&mut swap).collect(),
            },
            Axiom::SubObjectPropertyOf {
                sub_property,
                super_property,
            } => Axiom::SubObjectPropertyOf {
                sub_property: swap(sub_property),
                super_property: swap(super_property),
            },
            Axiom::ObjectPropertyDomain { property, domain } => Axiom::ObjectPropertyDomain {
                property: swap(property),
                domain: swap(domain),
            },
            Axiom::ObjectPropertyRange { property, range } => Axiom::ObjectPropertyRange {
                property: swap(property),
                range: swap(range),
            },
            Axiom::ClassAssertion { class, individual } => Axiom::ClassAssertion {
                class: swap(class),
                individual: swap(individual),
            },
            Axiom::ObjectPropertyAssertion {
                property,
                subject,
                object,
            } => Axiom::ObjectPropertyAssertion {
                property: swap(property),
                subject: swap(subject),
                object: swap(object),
            },
            Axiom::DataPropertyAssertion {
                property,
                subject,
                value,
            } => Axiom::DataPropertyAssertion {
                property: swap(property),
                subject: swap(subject),
                value: value.clone(),
            },
            Axiom::AnnotationAssertion {
                subject,
                annotation,
            } => {
                let subject = swap(subject);
                let annotation = match annotation.replaced(replacer) {
                    Some(new) => {
                        changed = true;
                        new
                    }
                    None => annotation.clone(),
                };
                Axiom::AnnotationAssertion {
                    subject,
                    annotation,
                }
            }
        };
        changed.then_some(replaced)
    }
}
