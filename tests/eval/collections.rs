//! Integration tests for collection result types

use blueprint_dsl::prelude::*;
use blueprint_eval::{EvalConfig, TypeDecl, evaluate, evaluate_with};
use blueprint_foundation::ErrorKind;
use proptest::prelude::*;

fn bottle(d: &mut Design) -> blueprint_foundation::Result<()> {
    d.result_type(
        "application/vnd.bottle",
        vec![
            attribute("id", INT32),
            attribute("name", STRING),
            attribute("vintage", INT32),
            view("default", vec![attribute("id", ()), attribute("name", ())]),
            view("tiny", vec![attribute("id", ())]),
        ],
    )
}

#[test]
fn collections_inherit_element_views() {
    let model = evaluate(|d| {
        d.collection_of("Bottle", vec![])?;
        bottle(d)
    })
    .unwrap();

    let coll = model.result_type("BottleCollection").unwrap();
    assert_eq!(coll.identifier, "application/vnd.bottle; type=collection");
    let names: Vec<_> = coll.views().iter().map(|v| v.name.as_str()).collect();
    assert_eq!(names, ["default", "tiny"]);
    assert_eq!(coll.views(), model.result_type("Bottle").unwrap().views());
}

#[test]
fn explicit_views_restrict_the_collection() {
    let model = evaluate(|d| {
        bottle(d)?;
        d.collection_of("application/vnd.bottle", vec![view("default", vec![])])
    })
    .unwrap();
    let coll = model.result_type("BottleCollection").unwrap();
    assert_eq!(coll.views().len(), 1);
    assert_eq!(coll.view("default").unwrap().attributes(), ["id", "name"]);
    assert!(!coll.collection().unwrap().inherit_views);
}

#[test]
fn unknown_collection_views_are_unresolved() {
    let diags = evaluate(|d| {
        bottle(d)?;
        d.collection_of(
            "Bottle",
            vec![view("default", vec![]), view("full", vec![])],
        )
    })
    .unwrap_err();
    assert_eq!(diags.len(), 1);
    let err = &diags.as_slice()[0];
    assert_eq!(err.kind, ErrorKind::UnresolvedReference("full".into()));
    assert_eq!(err.context.as_ref().unwrap().subject(), Some("view \"full\""));
}

#[test]
fn collection_shortcuts_generate_result_types() {
    let model = evaluate(|d| {
        bottle(d)?;
        d.service(
            "cellar",
            vec![method("list", vec![result(collection_of("Bottle"))])],
        )
    })
    .unwrap();

    let coll = model.result_type("BottleCollection").unwrap();
    assert!(coll.collection().unwrap().generated);
    assert_eq!(coll.views().len(), 2);

    let result = model.method("cellar", "list").unwrap().result().unwrap();
    let decl = model.resolve(result.ty.type_ref().unwrap()).unwrap();
    assert_eq!(decl, TypeDecl::Result(coll));
    assert!(decl.attribute().ty.type_name().starts_with("ArrayOf("));
}

#[test]
fn collection_suffix_is_configurable() {
    let config = EvalConfig::new().with_collection_suffix("List");
    let model = evaluate_with(config, |d| {
        bottle(d)?;
        d.ty("Cellar", vec![attribute("bottles", collection_of("Bottle"))])
    })
    .unwrap();
    assert!(model.result_type("BottleList").is_some());
    assert!(model.result_type("BottleCollection").is_none());
}

#[test]
fn collections_of_user_types_are_unresolved() {
    let diags = evaluate(|d| {
        d.ty("Plain", vec![attribute("x", STRING)])?;
        d.collection_of("Plain", vec![view("default", vec![])])
    })
    .unwrap_err();
    assert!(diags.any(|k| *k == ErrorKind::UnresolvedReference("Plain".into())));
}

// =============================================================================
// Collection Chains
// =============================================================================

/// The bottle, an explicit collection of it and a collection of that.
fn declare_chain(d: &mut Design, which: usize) -> blueprint_foundation::Result<()> {
    match which {
        0 => bottle(d),
        1 => d.collection_of("Bottle", vec![view("default", vec![])]),
        _ => d.collection_of("BottleCollection", vec![]),
    }
}

proptest! {
    #[test]
    fn collection_chains_do_not_depend_on_order(
        order in Just(vec![0_usize, 1, 2]).prop_shuffle()
    ) {
        let chain = |order: &[usize]| {
            evaluate(|d| order.iter().try_for_each(|&i| declare_chain(d, i)))
                .unwrap_or_else(|diags| panic!("chain failed:\n{diags}"))
        };
        let model = chain(&order);
        let outer = model
            .result_type("application/vnd.bottle; type=collection; type=collection")
            .unwrap();
        prop_assert_eq!(&outer.type_name, "BottleCollectionCollection");
        prop_assert_eq!(model.result_types().len(), 3);
        prop_assert_eq!(model, chain(&[0, 1, 2]));
    }
}

#[test]
fn inheriting_chains_receive_the_element_views() {
    let model = evaluate(|d| {
        d.collection_of("BottleCollection", vec![])?;
        d.collection_of("Bottle", vec![])?;
        bottle(d)
    })
    .unwrap();
    let element = model.result_type("Bottle").unwrap();
    let outer = model.result_type("BottleCollectionCollection").unwrap();
    assert_eq!(outer.views(), element.views());
}

#[test]
fn chains_follow_the_configured_suffix() {
    let config = EvalConfig::new().with_collection_suffix("List");
    let model = evaluate_with(config, |d| {
        d.collection_of("BottleList", vec![])?;
        d.collection_of("Bottle", vec![])?;
        bottle(d)
    })
    .unwrap();
    let outer = model.result_type("BottleListList").unwrap();
    assert_eq!(
        outer.identifier,
        "application/vnd.bottle; type=collection; type=collection"
    );
    assert!(model.result_type("BottleCollection").is_none());
}

