//! Integration tests for Error types
//!
//! Tests error construction, display, context, and error kinds.

use blueprint_foundation::{Error, ErrorContext, ErrorKind};

// =============================================================================
// Error Construction
// =============================================================================

#[test]
fn error_invalid_argument() {
    let err = Error::invalid_argument("attribute", "(), (type), (type, dsl)");
    assert!(matches!(err.kind, ErrorKind::InvalidArgument { .. }));
    let msg = format!("{err}");
    assert!(msg.contains("attribute"));
    assert!(msg.contains("(type, dsl)"));
}

#[test]
fn error_duplicate_name() {
    let err = Error::duplicate_name("service", "calc");
    assert_eq!(format!("{err}"), "duplicate service name \"calc\"");
}

#[test]
fn error_missing_required() {
    let err = Error::missing_required("age");
    assert_eq!(err.kind, ErrorKind::MissingRequired("age".to_string()));
}

#[test]
fn error_incompatible_default() {
    let err = Error::incompatible_default("\"abc\"", "Int32");
    let msg = format!("{err}");
    assert!(msg.contains("\"abc\""));
    assert!(msg.contains("Int32"));
}

#[test]
fn error_unresolved_reference() {
    let err = Error::unresolved_reference("Ghost");
    assert_eq!(format!("{err}"), "unresolved type reference \"Ghost\"");
}

#[test]
fn error_missing_default_view() {
    let err = Error::missing_default_view("application/vnd.bottle");
    assert!(format!("{err}").contains("no default view"));
}

#[test]
fn error_incompatible_dsl() {
    let err = Error::incompatible_dsl("title", "service");
    assert_eq!(format!("{err}"), "title cannot be used in service");
}

#[test]
fn error_undefined_attribute() {
    let err = Error::undefined_attribute("tiny", "color");
    let msg = format!("{err}");
    assert!(msg.contains("tiny"));
    assert!(msg.contains("color"));
}

#[test]
fn error_invalid_uri_variable() {
    let err = Error::invalid_uri_variable("URI parameter \"version\" has no matching variable");
    assert!(matches!(err.kind, ErrorKind::InvalidUriVariable(_)));
}

#[test]
fn error_internal() {
    let err = Error::internal("registry is sealed");
    assert!(format!("{err}").starts_with("internal error"));
}

// =============================================================================
// Fatality
// =============================================================================

#[test]
fn only_argument_errors_are_fatal() {
    assert!(Error::invalid_argument("payload", "at least one argument").is_fatal());
    let non_fatal = [
        Error::duplicate_name("type", "T"),
        Error::missing_required("a"),
        Error::incompatible_default("1", "String"),
        Error::unresolved_reference("T"),
        Error::missing_default_view("R"),
        Error::incompatible_dsl("uri", "api"),
        Error::undefined_attribute("v", "a"),
        Error::invalid_uri_variable("x"),
        Error::internal("x"),
    ];
    assert!(non_fatal.iter().all(|e| !e.is_fatal()));
}

// =============================================================================
// Context
// =============================================================================

#[test]
fn context_frames_render_outermost_first() {
    let ctx = ErrorContext::new()
        .with_frame("service \"calc\"")
        .with_frame("method \"add\"")
        .with_frame("payload");
    assert_eq!(ctx.root(), Some("service \"calc\""));
    assert_eq!(ctx.subject(), Some("payload"));
    assert_eq!(
        format!("{ctx}"),
        "in service \"calc\" > method \"add\" > payload"
    );
}

#[test]
fn error_display_includes_context() {
    let err = Error::unresolved_reference("Ghost")
        .with_context(ErrorContext::new().with_frame("type \"T\""));
    assert_eq!(
        format!("{err}"),
        "unresolved type reference \"Ghost\" (in type \"T\")"
    );
}

#[test]
fn errors_are_std_errors() {
    fn assert_error<E: std::error::Error>(_: &E) {}
    assert_error(&Error::internal("x"));
}
