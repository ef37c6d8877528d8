//! Integration tests for Diagnostics and Reporter
//!
//! Tests multi-error accumulation and frame tracking.

use blueprint_foundation::{Diagnostics, Error, ErrorContext, ErrorKind, Reporter};

// =============================================================================
// Reporter
// =============================================================================

#[test]
fn reporter_attaches_current_frames() {
    let mut reporter = Reporter::new();
    reporter.enter("type \"User\"");
    reporter.enter("attribute \"age\"");
    reporter.report(Error::missing_required("years"));
    reporter.leave();
    reporter.report(Error::missing_required("name"));
    reporter.leave();

    let diags = reporter.finish();
    assert_eq!(diags.len(), 2);
    assert_eq!(
        diags.as_slice()[0].context.as_ref().unwrap().stack,
        vec!["type \"User\"", "attribute \"age\""]
    );
    assert_eq!(
        diags.as_slice()[1].context.as_ref().unwrap().subject(),
        Some("type \"User\"")
    );
}

#[test]
fn reporter_keeps_existing_context() {
    let mut reporter = Reporter::new();
    reporter.enter("service \"calc\"");
    let ctx = ErrorContext::new().with_frame("type \"Other\"");
    reporter.report(Error::unresolved_reference("X").with_context(ctx.clone()));
    assert_eq!(reporter.diagnostics().as_slice()[0].context, Some(ctx));
}

#[test]
fn within_pops_its_frame() {
    let mut reporter = Reporter::new();
    let value = reporter.within("api \"calc\"", |r| {
        r.within("server \"main\"", |r| r.report(Error::invalid_uri_variable("x")));
        r.context().stack.len()
    });
    assert_eq!(value, 1);
    assert!(reporter.context().is_empty());
    assert_eq!(
        reporter.diagnostics().as_slice()[0].context.as_ref().unwrap().stack.len(),
        2
    );
}

#[test]
fn locate_does_not_record() {
    let mut reporter = Reporter::new();
    reporter.enter("method \"add\"");
    let err = reporter.locate(Error::invalid_argument("payload", "a type"));
    assert_eq!(err.context.unwrap().subject(), Some("method \"add\""));
    assert!(!reporter.has_errors());
}

#[test]
fn absorb_appends_in_order() {
    let mut first = Reporter::new();
    first.report(Error::missing_required("a"));
    let mut second = Reporter::new();
    second.report(Error::missing_required("b"));
    second.absorb(first.finish());

    let names: Vec<_> = second
        .finish()
        .into_iter()
        .map(|e| match e.kind {
            ErrorKind::MissingRequired(name) => name,
            other => panic!("unexpected {other}"),
        })
        .collect();
    assert_eq!(names, ["b", "a"]);
}

// =============================================================================
// Diagnostics
// =============================================================================

#[test]
fn diagnostics_queries() {
    let mut diags = Diagnostics::new();
    assert!(diags.is_empty());
    diags.push(Error::duplicate_name("type", "A"));
    diags.push(Error::duplicate_name("type", "B"));
    diags.push(Error::unresolved_reference("C"));

    assert_eq!(diags.len(), 3);
    assert_eq!(
        diags.count_where(|k| matches!(k, ErrorKind::DuplicateName { .. })),
        2
    );
    assert!(diags.any(|k| matches!(k, ErrorKind::UnresolvedReference(_))));
    assert!(!diags.any(|k| matches!(k, ErrorKind::Internal(_))));
    assert_eq!((&diags).into_iter().count(), 3);
}

#[test]
fn diagnostics_display() {
    assert_eq!(format!("{}", Diagnostics::new()), "no errors");

    let one = Diagnostics::from(Error::unresolved_reference("X"));
    assert_eq!(format!("{one}"), "unresolved type reference \"X\"");

    let mut two = one.clone();
    two.push(Error::missing_required("a"));
    let msg = format!("{two}");
    assert!(msg.starts_with("2 errors:"));
    assert_eq!(msg.lines().count(), 3);
}
