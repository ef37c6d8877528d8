//! Integration tests for failed evaluations
//!
//! A failed run returns every diagnostic and no model.

use blueprint_dsl::prelude::*;
use blueprint_eval::evaluate;
use blueprint_foundation::ErrorKind;

#[test]
fn duplicate_types_fail_once() {
    let diags = evaluate(|d| {
        d.ty("User", vec![attribute("name", STRING)])?;
        d.ty("User", vec![attribute("email", STRING)])
    })
    .unwrap_err();
    assert_eq!(diags.len(), 1);
    assert_eq!(
        diags.as_slice()[0].kind,
        ErrorKind::DuplicateName {
            kind: "type".into(),
            name: "User".into()
        }
    );
}

#[test]
fn result_types_need_a_default_view() {
    let diags = evaluate(|d| {
        d.result_type("application/vnd.thing", vec![attribute("x", STRING)])
    })
    .unwrap_err();
    assert_eq!(diags.len(), 1);
    assert_eq!(
        diags.as_slice()[0].kind,
        ErrorKind::MissingDefaultView("application/vnd.thing".into())
    );

    let model = evaluate(|d| {
        d.result_type(
            "application/vnd.thing",
            vec![attribute("x", STRING), view("default", vec![attribute("x", ())])],
        )
    })
    .unwrap();
    assert!(model.result_type("Thing").unwrap().has_default_view());
}

#[test]
fn defaults_must_match_their_type() {
    let diags = evaluate(|d| {
        d.ty("T", vec![attribute("n", (INT32, vec![default("abc")]))])
    })
    .unwrap_err();
    assert_eq!(diags.len(), 1);
    let err = &diags.as_slice()[0];
    assert!(matches!(err.kind, ErrorKind::IncompatibleDefault { .. }));
    assert_eq!(
        err.context.as_ref().unwrap().stack,
        vec!["type \"T\"", "attribute \"n\""]
    );
}

#[test]
fn unresolved_references_name_the_attribute() {
    let diags = evaluate(|d| d.ty("Order", vec![attribute("customer", "Customer")])).unwrap_err();
    assert_eq!(diags.len(), 1);
    let err = &diags.as_slice()[0];
    assert_eq!(err.kind, ErrorKind::UnresolvedReference("Customer".into()));
    let context = err.context.as_ref().unwrap();
    assert_eq!(context.root(), Some("type \"Order\""));
    assert_eq!(context.subject(), Some("attribute \"customer\""));
    assert!(err.to_string().contains("attribute \"customer\""));
}

#[test]
fn every_problem_is_reported() {
    let diags = evaluate(|d| {
        d.ty("A", vec![attribute("n", (INT32, vec![default("abc")]))])?;
        d.ty("B", vec![attribute("ghost", "Ghost")])?;
        d.result_type("application/vnd.c", vec![attribute("x", STRING)])?;
        d.ty("A", ())
    })
    .unwrap_err();
    assert_eq!(diags.len(), 4);
    assert_eq!(diags.count_where(|k| matches!(k, ErrorKind::DuplicateName { .. })), 1);
    assert!(diags.any(|k| matches!(k, ErrorKind::IncompatibleDefault { .. })));
    assert!(diags.any(|k| matches!(k, ErrorKind::UnresolvedReference(_))));
    assert!(diags.any(|k| matches!(k, ErrorKind::MissingDefaultView(_))));
    assert!(diags.to_string().starts_with("4 errors:"));
}

#[test]
fn malformed_calls_abort_declaration() {
    let diags = evaluate(|d| {
        d.ty("A", vec![attribute("x", (STRING, INT32))])?;
        d.ty("B", vec![attribute("y", "Missing")])
    })
    .unwrap_err();
    assert_eq!(diags.len(), 1);
    let err = &diags.as_slice()[0];
    assert!(err.is_fatal());
    assert_eq!(err.context.as_ref().unwrap().root(), Some("type \"A\""));
}

#[test]
fn misplaced_builders_fail_evaluation() {
    let diags = evaluate(|d| d.ty("T", vec![title("Not an API"), attribute("x", STRING)]))
        .unwrap_err();
    assert_eq!(diags.len(), 1);
    assert!(matches!(
        &diags.as_slice()[0].kind,
        ErrorKind::IncompatibleDsl { call, parent } if call == "title" && parent == "type"
    ));
}

#[test]
fn malformed_calls_inside_misplaced_builders_abort_declaration() {
    let diags = evaluate(|d| {
        d.ty("T", vec![view("default", vec![attribute("x", (STRING, INT32))])])?;
        d.ty("U", vec![attribute("y", STRING)])
    })
    .unwrap_err();
    assert_eq!(diags.len(), 1);
    let err = &diags.as_slice()[0];
    assert!(err.is_fatal());
    assert!(!diags.any(|k| matches!(k, ErrorKind::IncompatibleDsl { .. })));
    assert_eq!(err.context.as_ref().unwrap().root(), Some("type \"T\""));
}

