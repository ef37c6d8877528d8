//! Integration tests for Value types
//!
//! Tests Value construction, equality, ordering, display, and conversions.

use blueprint_foundation::Value;
use proptest::prelude::*;
use std::collections::HashSet;

// =============================================================================
// Value Construction
// =============================================================================

#[test]
fn value_conversions() {
    assert_eq!(Value::from(true), Value::Bool(true));
    assert_eq!(Value::from(42), Value::Int(42));
    assert_eq!(Value::from(42_i64).as_int(), Some(42));
    assert_eq!(Value::from(1.5).as_number(), Some(1.5));
    assert_eq!(Value::from("abc").as_str(), Some("abc"));
    assert_eq!(Value::from(String::from("abc")), Value::from("abc"));
    assert!(Value::Null.is_null());
}

#[test]
fn value_int_as_number() {
    assert_eq!(Value::Int(3).as_number(), Some(3.0));
    assert_eq!(Value::from("3").as_number(), None);
}

#[test]
fn value_array_and_map() {
    let arr = Value::array([1, 2, 3]);
    assert_eq!(arr.as_array().unwrap().len(), 3);
    assert_eq!(arr.type_name(), "array");

    let map = Value::map([("a", 1), ("b", 2)]);
    let entries = map.as_map().unwrap();
    assert_eq!(entries.get(&Value::from("b")), Some(&Value::Int(2)));
    assert_eq!(map.type_name(), "map");
}

#[test]
fn value_bytes() {
    let v = Value::bytes(b"hi");
    assert_eq!(v.type_name(), "bytes");
    assert_ne!(v, Value::from("hi"));
}

// =============================================================================
// Equality, Ordering and Hashing
// =============================================================================

#[test]
fn values_of_different_shapes_are_ordered_by_shape() {
    assert!(Value::Null < Value::Bool(false));
    assert!(Value::Bool(true) < Value::Int(0));
    assert!(Value::Int(100) < Value::Float(0.0));
    assert!(Value::from("z") < Value::bytes(b"a"));
}

#[test]
fn floats_are_totally_ordered() {
    let nan = Value::Float(f64::NAN);
    assert_eq!(nan, nan.clone());
    assert!(Value::Float(-0.0) < Value::Float(0.0));
}

#[test]
fn equal_values_hash_equally() {
    let mut set = HashSet::new();
    set.insert(Value::array(["a", "b"]));
    set.insert(Value::array(["a", "b"]));
    set.insert(Value::map([("k", 1.5)]));
    assert_eq!(set.len(), 2);
}

// =============================================================================
// Display
// =============================================================================

#[test]
fn value_display() {
    assert_eq!(format!("{}", Value::Null), "null");
    assert_eq!(format!("{}", Value::from("abc")), "\"abc\"");
    assert_eq!(format!("{}", Value::array([1, 2])), "[1, 2]");
    assert_eq!(format!("{}", Value::Float(1.0)), "1.0");
}

// =============================================================================
// Properties
// =============================================================================

proptest! {
    #[test]
    fn ordering_is_consistent_with_equality(a in any::<i64>(), b in any::<i64>()) {
        let (x, y) = (Value::Int(a), Value::Int(b));
        prop_assert_eq!(x == y, x.cmp(&y) == std::cmp::Ordering::Equal);
        prop_assert_eq!(x.cmp(&y), a.cmp(&b));
    }

    #[test]
    fn strings_round_trip_through_value(s in ".*") {
        let v = Value::from(s.as_str());
        prop_assert_eq!(v.as_str(), Some(s.as_str()));
    }
}
