//! Type constructors, composite element primitives and views.

use blueprint_expr::{DataType, ExprKind, Primitive, ViewExpr};

use crate::opt::{Opt, apply_within, first_invalid, misplaced};

/// UTF-8 text.
pub const STRING: Primitive = Primitive::String;
/// Raw bytes.
pub const BYTES: Primitive = Primitive::Bytes;
/// Boolean.
pub const BOOLEAN: Primitive = Primitive::Boolean;
/// 32-bit signed integer.
pub const INT32: Primitive = Primitive::Int32;
/// 64-bit signed integer.
pub const INT64: Primitive = Primitive::Int64;
/// 32-bit float.
pub const FLOAT32: Primitive = Primitive::Float32;
/// 64-bit float.
pub const FLOAT64: Primitive = Primitive::Float64;
/// Any value.
pub const ANY: Primitive = Primitive::Any;

/// An array of `element`, which may be a primitive, a composite or a type
/// name.
pub fn array_of(element: impl Into<DataType>) -> DataType {
    DataType::array(element)
}

/// A map from `key` to `value`.
pub fn map_of(key: impl Into<DataType>, value: impl Into<DataType>) -> DataType {
    DataType::map(key, value)
}

/// A collection of the named result type.
pub fn collection_of(element: impl Into<String>) -> DataType {
    DataType::collection(element)
}

/// Applies options to the element attribute of an array, or the value
/// attribute of a map.
pub fn elem(opts: Vec<Opt>) -> Opt {
    let invalid = first_invalid(&opts);
    Opt::new("elem", move |target, reporter| {
        let slot = target.attribute_mut().and_then(|attr| match &mut attr.ty {
            DataType::Array(elem) | DataType::Map(_, elem) => Some(elem),
            _ => None,
        });
        match slot {
            Some(elem) => apply_within("elem".into(), opts, elem.as_mut(), reporter),
            None => misplaced("elem", &opts, target, reporter),
        }
    })
    .guarded_by(invalid)
}

/// Applies options to the key attribute of a map.
pub fn key(opts: Vec<Opt>) -> Opt {
    let invalid = first_invalid(&opts);
    Opt::new("key", move |target, reporter| {
        let slot = target.attribute_mut().and_then(|attr| match &mut attr.ty {
            DataType::Map(key, _) => Some(key),
            _ => None,
        });
        match slot {
            Some(key) => apply_within("key".into(), opts, key.as_mut(), reporter),
            None => misplaced("key", &opts, target, reporter),
        }
    })
    .guarded_by(invalid)
}

/// Declares a view of a result type. Inside, `attribute(name, ())` selects
/// attributes; an empty name means the default view.
pub fn view(name: impl Into<String>, opts: Vec<Opt>) -> Opt {
    let name = name.into();
    let invalid = first_invalid(&opts);
    Opt::new("view", move |target, reporter| {
        if target.views_mut().is_none() {
            return misplaced("view", &opts, target, reporter);
        }
        let mut view = ViewExpr::new(name);
        apply_within(ExprKind::View.frame(&view.name), opts, &mut view, reporter)?;
        if let Some(views) = target.views_mut() {
            views.push(view);
        }
        Ok(())
    })
    .guarded_by(invalid)
}
