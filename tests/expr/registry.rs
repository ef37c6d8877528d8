//! Integration tests for the root registry
//!
//! Tests registration, lookup, resolution and the sealing lifecycle.

use blueprint_expr::{
    ApiExpr, AttributeExpr, ERROR_RESULT, RegistryPhase, ResultTypeExpr, RootExpr, RootKind,
    RootRegistry, ServiceExpr, TypeId, TypeLookup, UserTypeExpr,
};
use blueprint_foundation::ErrorKind;

fn user_type(name: &str) -> RootExpr {
    RootExpr::Type(UserTypeExpr::new(name, AttributeExpr::object()))
}

// =============================================================================
// Registration
// =============================================================================

#[test]
fn fresh_registries_are_independent() {
    let mut first = RootRegistry::new();
    first.register(user_type("User")).unwrap();
    let second = RootRegistry::new();
    assert!(first.contains(RootKind::Type, "User"));
    assert!(!second.contains(RootKind::Type, "User"));
    assert!(second.contains(RootKind::Type, ERROR_RESULT));
}

#[test]
fn same_name_in_different_kinds_is_allowed() {
    let mut registry = RootRegistry::new();
    registry.register(user_type("calc")).unwrap();
    registry
        .register(RootExpr::Service(ServiceExpr::new("calc")))
        .unwrap();
    registry
        .register(RootExpr::Api(ApiExpr::new("calc")))
        .unwrap();
    assert_eq!(registry.len(), 4);
}

#[test]
fn duplicates_leave_the_first_declaration() {
    let mut registry = RootRegistry::new();
    let mut first = UserTypeExpr::new("User", AttributeExpr::object());
    first.attribute.description = Some("first".to_string());
    registry.register(RootExpr::Type(first)).unwrap();

    let err = registry.register(user_type("User")).unwrap_err();
    assert_eq!(
        err.kind,
        ErrorKind::DuplicateName {
            kind: "type".to_string(),
            name: "User".to_string()
        }
    );
    assert_eq!(
        registry.user_type("User").unwrap().attribute.description.as_deref(),
        Some("first")
    );
}

// =============================================================================
// Resolution
// =============================================================================

#[test]
fn result_types_resolve_by_identifier_or_type_name() {
    let mut registry = RootRegistry::new();
    registry
        .register(RootExpr::ResultType(ResultTypeExpr::new(
            "application/vnd.goa.bottle+json",
        )))
        .unwrap();
    let by_id = registry.resolve("application/vnd.goa.bottle+json").unwrap();
    let by_name = registry.resolve("GoaBottle").unwrap();
    assert_eq!(by_id, by_name);
    assert!(matches!(by_id, TypeId::Result(_)));
    assert!(registry.attribute_of("GoaBottle").is_some());
}

#[test]
fn missing_names_are_unresolved() {
    let registry = RootRegistry::new();
    let err = registry.resolve("Ghost").unwrap_err();
    assert_eq!(err.kind, ErrorKind::UnresolvedReference("Ghost".to_string()));
    assert!(registry.attribute_of("Ghost").is_none());
}

// =============================================================================
// Lifecycle
// =============================================================================

#[test]
fn sealing_orders_declarations() {
    let mut a = RootRegistry::new();
    let mut b = RootRegistry::new();
    for name in ["Zeta", "Alpha", "Mid"] {
        a.register(user_type(name)).unwrap();
    }
    for name in ["Mid", "Zeta", "Alpha"] {
        b.register(user_type(name)).unwrap();
    }
    a.begin_prepare();
    b.begin_prepare();
    a.seal();
    b.seal();

    assert_eq!(a.phase(), RegistryPhase::Sealed);
    assert_eq!(a.type_index(), b.type_index());
    assert_eq!(a.into_parts(), b.into_parts());
}

#[test]
fn sealed_registry_rejects_registration() {
    let mut registry = RootRegistry::new();
    registry.seal();
    let err = registry
        .register(RootExpr::ResultType(ResultTypeExpr::new("application/x")))
        .unwrap_err();
    assert!(matches!(err.kind, ErrorKind::Internal(_)));
}

#[test]
fn type_index_is_a_snapshot() {
    let mut registry = RootRegistry::new();
    registry.register(user_type("A")).unwrap();
    let index = registry.type_index();
    registry.register(user_type("B")).unwrap();
    assert!(index.get("A").is_some());
    assert!(index.get("B").is_none());
    assert!(registry.type_index().get("B").is_some());
}
