//! Semantic types of attributes.
//!
//! A [`DataType`] is either a primitive, a composite built from attributes
//! (array, map, inline object), or a by-name reference to a top-level type.
//! By-name references stay symbolic until the registry resolves them into a
//! [`TypeId`].

use std::fmt;

use blueprint_foundation::Value;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::attribute::AttributeExpr;

// =============================================================================
// Primitive
// =============================================================================

/// Primitive semantic types.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Primitive {
    /// UTF-8 text.
    String,
    /// Raw bytes.
    Bytes,
    /// Boolean.
    Boolean,
    /// 32-bit signed integer.
    Int32,
    /// 64-bit signed integer.
    Int64,
    /// 32-bit float.
    Float32,
    /// 64-bit float.
    Float64,
    /// Any value.
    Any,
}

impl Primitive {
    /// Returns the design-language name of the primitive.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::String => "String",
            Self::Bytes => "Bytes",
            Self::Boolean => "Boolean",
            Self::Int32 => "Int32",
            Self::Int64 => "Int64",
            Self::Float32 => "Float32",
            Self::Float64 => "Float64",
            Self::Any => "Any",
        }
    }

    /// Checks if a value is representable by this primitive.
    ///
    /// Floats accept integers; bytes accept text.
    #[must_use]
    pub fn accepts(self, value: &Value) -> bool {
        match (self, value) {
            (Self::Any, _)
            | (Self::String, Value::String(_))
            | (Self::Bytes, Value::Bytes(_) | Value::String(_))
            | (Self::Boolean, Value::Bool(_))
            | (Self::Int64, Value::Int(_))
            | (Self::Float32 | Self::Float64, Value::Int(_) | Value::Float(_)) => true,
            (Self::Int32, Value::Int(n)) => i32::try_from(*n).is_ok(),
            _ => false,
        }
    }
}

impl fmt::Display for Primitive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// =============================================================================
// Type references
// =============================================================================

/// Direct link to a top-level type, valid once the registry is sealed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum TypeId {
    /// Index into the user types.
    User(usize),
    /// Index into the result types.
    Result(usize),
}

/// A by-name reference to a user type or result type.
///
/// The target is filled in during finalization; before that only the name
/// is meaningful.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TypeRef {
    name: String,
    target: Option<TypeId>,
}

impl TypeRef {
    /// Creates an unresolved reference.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            target: None,
        }
    }

    /// Returns the referenced name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the resolved target, if any.
    #[must_use]
    pub const fn target(&self) -> Option<TypeId> {
        self.target
    }

    /// Returns true once the reference has been linked.
    #[must_use]
    pub const fn is_resolved(&self) -> bool {
        self.target.is_some()
    }

    /// Links the reference to its declaration.
    pub fn resolve(&mut self, id: TypeId) {
        self.target = Some(id);
    }

    /// Points the reference at a different name, dropping any link.
    pub fn rename(&mut self, name: impl Into<String>) {
        self.name = name.into();
        self.target = None;
    }
}

// =============================================================================
// DataType
// =============================================================================

/// The semantic type of an attribute.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum DataType {
    /// A primitive type.
    Primitive(Primitive),
    /// Homogeneous array; the element attribute carries element validations.
    Array(Box<AttributeExpr>),
    /// Map with key and value attributes.
    Map(Box<AttributeExpr>, Box<AttributeExpr>),
    /// Inline object with ordered child attributes.
    Object(Vec<(String, AttributeExpr)>),
    /// Reference to a user type or result type by name.
    Named(TypeRef),
    /// Collection of a result type, normalized during preparation into a
    /// reference to the generated collection result type.
    Collection(TypeRef),
}

impl DataType {
    /// Creates an array type with the given element type.
    #[must_use]
    pub fn array(element: impl Into<DataType>) -> Self {
        Self::Array(Box::new(AttributeExpr::new(element.into())))
    }

    /// Creates a map type with the given key and value types.
    #[must_use]
    pub fn map(key: impl Into<DataType>, value: impl Into<DataType>) -> Self {
        Self::Map(
            Box::new(AttributeExpr::new(key.into())),
            Box::new(AttributeExpr::new(value.into())),
        )
    }

    /// Creates an empty inline object type.
    #[must_use]
    pub const fn object() -> Self {
        Self::Object(Vec::new())
    }

    /// Creates a by-name reference.
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self::Named(TypeRef::new(name))
    }

    /// Creates a collection of the named result type.
    #[must_use]
    pub fn collection(element: impl Into<String>) -> Self {
        Self::Collection(TypeRef::new(element))
    }

    /// Returns true for inline objects.
    #[must_use]
    pub const fn is_object(&self) -> bool {
        matches!(self, Self::Object(_))
    }

    /// Returns the primitive, if this is one.
    #[must_use]
    pub const fn as_primitive(&self) -> Option<Primitive> {
        match self {
            Self::Primitive(p) => Some(*p),
            _ => None,
        }
    }

    /// Returns the type reference of named and collection types.
    #[must_use]
    pub const fn type_ref(&self) -> Option<&TypeRef> {
        match self {
            Self::Named(r) | Self::Collection(r) => Some(r),
            _ => None,
        }
    }

    /// Returns the child attributes of an inline object.
    #[must_use]
    pub fn fields(&self) -> Option<&[(String, AttributeExpr)]> {
        match self {
            Self::Object(fields) => Some(fields),
            _ => None,
        }
    }

    /// Returns a readable name for messages.
    #[must_use]
    pub fn type_name(&self) -> String {
        match self {
            Self::Primitive(p) => p.name().to_string(),
            Self::Array(elem) => format!("ArrayOf({})", elem.ty.type_name()),
            Self::Map(k, v) => format!("MapOf({}, {})", k.ty.type_name(), v.ty.type_name()),
            Self::Object(_) => "Object".to_string(),
            Self::Named(r) => r.name().to_string(),
            Self::Collection(r) => format!("CollectionOf({})", r.name()),
        }
    }

    /// Checks if a value is representable by this type.
    ///
    /// Named types are looked up through `lookup`; names it cannot find are
    /// accepted, since unresolved references are reported separately.
    #[must_use]
    pub fn accepts(&self, value: &Value, lookup: &dyn TypeLookup) -> bool {
        self.accepts_inner(value, lookup, &mut Vec::new())
    }

    fn accepts_inner<'a>(
        &'a self,
        value: &Value,
        lookup: &'a dyn TypeLookup,
        seen: &mut Vec<&'a str>,
    ) -> bool {
        match (self, value) {
            (Self::Primitive(p), v) => p.accepts(v),
            (Self::Array(elem), Value::Array(items)) => items
                .iter()
                .all(|item| elem.ty.accepts_inner(item, lookup, &mut Vec::new())),
            (Self::Map(k, v), Value::Map(entries)) => entries.iter().all(|(key, val)| {
                k.ty.accepts_inner(key, lookup, &mut Vec::new())
                    && v.ty.accepts_inner(val, lookup, &mut Vec::new())
            }),
            (Self::Object(fields), Value::Map(entries)) => entries.iter().all(|(key, val)| {
                let Some(key) = key.as_str() else {
                    return false;
                };
                fields
                    .iter()
                    .find(|(name, _)| name == key)
                    .is_some_and(|(_, attr)| attr.ty.accepts_inner(val, lookup, &mut Vec::new()))
            }),
            (Self::Named(r) | Self::Collection(r), v) => {
                // A cycle of aliases without descending into the value
                // cannot constrain it further.
                if seen.contains(&r.name()) {
                    return true;
                }
                let Some(attr) = lookup.attribute_of(r.name()) else {
                    return true;
                };
                seen.push(r.name());
                if matches!(self, Self::Collection(_)) {
                    return match v {
                        Value::Array(items) => items
                            .iter()
                            .all(|item| attr.ty.accepts_inner(item, lookup, &mut Vec::new())),
                        _ => false,
                    };
                }
                attr.ty.accepts_inner(v, lookup, seen)
            }
            _ => false,
        }
    }
}

impl From<Primitive> for DataType {
    fn from(p: Primitive) -> Self {
        Self::Primitive(p)
    }
}

impl From<&str> for DataType {
    fn from(name: &str) -> Self {
        Self::named(name)
    }
}

impl From<String> for DataType {
    fn from(name: String) -> Self {
        Self::named(name)
    }
}

/// Name-based access to the shapes of top-level types.
pub trait TypeLookup {
    /// Returns the attribute describing the shape of the named type.
    fn attribute_of(&self, name: &str) -> Option<&AttributeExpr>;
}

/// A lookup that knows no names.
impl TypeLookup for () {
    fn attribute_of(&self, _name: &str) -> Option<&AttributeExpr> {
        None
    }
}
