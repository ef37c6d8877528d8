//! Integration tests for data types
//!
//! Tests default-value compatibility against semantic types.

use blueprint_expr::{AttributeExpr, DataType, Primitive, RootExpr, RootRegistry, UserTypeExpr};
use blueprint_foundation::Value;
use proptest::prelude::*;

fn object(fields: &[(&str, Primitive)]) -> DataType {
    let mut attr = AttributeExpr::object();
    for (name, ty) in fields {
        attr.push_field(*name, AttributeExpr::new(DataType::Primitive(*ty)));
    }
    attr.ty
}

// =============================================================================
// Primitives
// =============================================================================

#[test]
fn primitive_compatibility_table() {
    let cases = [
        (Primitive::String, Value::from("a"), true),
        (Primitive::String, Value::from(1), false),
        (Primitive::Bytes, Value::from("a"), true),
        (Primitive::Bytes, Value::bytes(b"a"), true),
        (Primitive::Boolean, Value::from(false), true),
        (Primitive::Boolean, Value::from("false"), false),
        (Primitive::Int32, Value::from(i64::from(i32::MAX)), true),
        (Primitive::Int32, Value::from(i64::from(i32::MAX) + 1), false),
        (Primitive::Int64, Value::from(i64::MAX), true),
        (Primitive::Int64, Value::from(1.0), false),
        (Primitive::Float32, Value::from(1), true),
        (Primitive::Float64, Value::from(2.5), true),
        (Primitive::Any, Value::Null, true),
    ];
    for (ty, value, expected) in cases {
        assert_eq!(
            DataType::Primitive(ty).accepts(&value, &()),
            expected,
            "{ty} <- {value}"
        );
    }
}

// =============================================================================
// Composites
// =============================================================================

#[test]
fn composite_compatibility() {
    let tags = DataType::array(Primitive::String);
    assert!(tags.accepts(&Value::array(["a", "b"]), &()));
    assert!(!tags.accepts(&Value::array([Value::from("a"), Value::from(1)]), &()));
    assert!(!tags.accepts(&Value::from("a"), &()));

    let scores = DataType::map(Primitive::String, Primitive::Int32);
    assert!(scores.accepts(&Value::map([("x", 1)]), &()));
    assert!(!scores.accepts(&Value::map([(1, 1)]), &()));

    let point = object(&[("x", Primitive::Float64), ("y", Primitive::Float64)]);
    assert!(point.accepts(&Value::map([("x", 1.0), ("y", 2.0)]), &()));
    assert!(!point.accepts(&Value::map([("z", 1.0)]), &()));
}

#[test]
fn named_types_are_checked_through_the_registry() {
    let mut registry = RootRegistry::new();
    let count = UserTypeExpr::new("Count", AttributeExpr::new(Primitive::Int32.into()));
    registry.register(RootExpr::Type(count)).unwrap();

    let ty = DataType::named("Count");
    assert!(ty.accepts(&Value::from(3), &registry));
    assert!(!ty.accepts(&Value::from("three"), &registry));
    // Unknown names are left to reference resolution.
    assert!(DataType::named("Ghost").accepts(&Value::from("x"), &registry));
}

#[test]
fn alias_cycles_terminate() {
    let mut registry = RootRegistry::new();
    for (name, target) in [("A", "B"), ("B", "A")] {
        let ut = UserTypeExpr::new(name, AttributeExpr::new(DataType::named(target)));
        registry.register(RootExpr::Type(ut)).unwrap();
    }
    assert!(DataType::named("A").accepts(&Value::from(1), &registry));
}

#[test]
fn type_names_for_messages() {
    assert_eq!(DataType::array(Primitive::Int32).type_name(), "ArrayOf(Int32)");
    assert_eq!(
        DataType::map(Primitive::String, "User").type_name(),
        "MapOf(String, User)"
    );
    assert_eq!(DataType::collection("Bottle").type_name(), "CollectionOf(Bottle)");
}

// =============================================================================
// Properties
// =============================================================================

fn int_value() -> impl Strategy<Value = Value> {
    any::<i32>().prop_map(Value::from)
}

proptest! {
    #[test]
    fn int32_values_fit_every_numeric_type(v in int_value()) {
        for ty in [Primitive::Int32, Primitive::Int64, Primitive::Float32, Primitive::Float64] {
            prop_assert!(DataType::Primitive(ty).accepts(&v, &()));
        }
    }

    #[test]
    fn arrays_accept_arrays_of_their_element(items in prop::collection::vec(".*", 0..8)) {
        let value = Value::array(items.iter().map(String::as_str));
        prop_assert!(DataType::array(Primitive::String).accepts(&value, &()));
        prop_assert!(!DataType::array(Primitive::Boolean).accepts(&value, &()) || items.is_empty());
    }
}
