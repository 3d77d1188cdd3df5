//! Demonstrates applying a batch of changes and serializing the result.
//!
//! Run with: `cargo run --example dump_ontology -p ontochange-model`

use ontochange_model::{
    AddAxiomChange, AddImportChange, AddOntologyAnnotationChange, Annotation, Axiom, Entity,
    ImportsDeclaration, Iri, OntologyChange, OntologyId, OntologyStore,
};

fn main() -> Result<(), ontochange_model::ChangeError> {
    let pizza = |local: &str| Iri::parse(&format!("http://example.org/pizza#{local}"));
    let id = OntologyId::new(Iri::parse("http://example.org/pizza")?);

    let store = OntologyStore::new();
    store.create_ontology(id.clone())?;

    let changes: Vec<OntologyChange> = vec![
        AddImportChange::of(
            id.clone(),
            ImportsDeclaration::new(Iri::parse("http://example.org/food")?),
        )
        .into(),
        AddOntologyAnnotationChange::of(id.clone(), Annotation::label("Pizza ontology")).into(),
        AddAxiomChange::of(
            id.clone(),
            Axiom::Declaration {
                entity: Entity::class(pizza("Pizza")?),
            },
        )
        .into(),
        AddAxiomChange::of(
            id.clone(),
            Axiom::SubClassOf {
                sub_class: pizza("Margherita")?,
                super_class: pizza("Pizza")?,
            },
        )
        .into(),
    ];

    let result = store.apply_changes("demo", "Build the pizza ontology", &changes)?;
    println!(
        "Revision {:?}: {} effective changes",
        result.revision(),
        result.effective_changes().len()
    );
    for change in result.effective_changes() {
        println!("  {change}");
    }
    println!();

    let Some(ontology) = store.ontology(&id) else {
        return Ok(());
    };
    println!("{}", ontochange_model::serializer::turtle::to_turtle(&ontology));

    let json_ld = ontochange_model::serializer::jsonld::to_json_ld(&ontology);
    let json_str =
        serde_json::to_string_pretty(&json_ld).unwrap_or_else(|e| format!("JSON error: {e}"));
    println!("JSON-LD output ({} bytes)", json_str.len());
    Ok(())
}
