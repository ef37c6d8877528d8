//! The attribute tree.
//!
//! An [`AttributeExpr`] is a typed field definition: its type, optional
//! default, examples, validation rules and, for objects, ordered children
//! plus the set of required child names.

use std::collections::BTreeMap;
use std::fmt;

use blueprint_foundation::Value;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::api::DocsExpr;
use crate::types::{DataType, Primitive};

/// Free-form metadata used as generator hints (e.g. `rpc:tag`).
pub type Meta = BTreeMap<String, String>;

/// Meta key that disables example generation when set to `"false"`.
pub const META_EXAMPLE: &str = "openapi:example";

// =============================================================================
// Validation
// =============================================================================

/// Validation rules attached to an attribute.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Validation {
    /// Minimum length of strings, bytes, arrays and maps.
    pub min_length: Option<usize>,
    /// Maximum length of strings, bytes, arrays and maps.
    pub max_length: Option<usize>,
    /// Inclusive numeric lower bound.
    pub minimum: Option<f64>,
    /// Inclusive numeric upper bound.
    pub maximum: Option<f64>,
    /// Regular expression the value must match.
    pub pattern: Option<String>,
    /// Allowed values.
    pub values: Vec<Value>,
    /// Format tag.
    pub format: Option<Format>,
    /// Names of required child attributes, in declaration order.
    pub required: Vec<String>,
}

impl Validation {
    /// Returns true if no rule is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Adds required names, skipping ones already present.
    pub fn add_required<I, S>(&mut self, names: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for name in names {
            let name = name.into();
            if !self.required.contains(&name) {
                self.required.push(name);
            }
        }
    }
}

/// String formats understood by generators.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Format {
    /// RFC 3339 date.
    Date,
    /// RFC 3339 date-time.
    DateTime,
    /// RFC 4122 UUID.
    Uuid,
    /// RFC 5322 email address.
    Email,
    /// RFC 1035 hostname.
    Hostname,
    /// IPv4 address.
    Ipv4,
    /// IPv6 address.
    Ipv6,
    /// IPv4 or IPv6 address.
    Ip,
    /// RFC 3986 URI.
    Uri,
    /// IEEE 802 MAC-48 address.
    Mac,
    /// RFC 4632 / RFC 4291 CIDR notation.
    Cidr,
    /// Regular expression.
    Regexp,
    /// JSON document.
    Json,
    /// RFC 1123 date-time.
    Rfc1123,
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Date => "date",
            Self::DateTime => "date-time",
            Self::Uuid => "uuid",
            Self::Email => "email",
            Self::Hostname => "hostname",
            Self::Ipv4 => "ipv4",
            Self::Ipv6 => "ipv6",
            Self::Ip => "ip",
            Self::Uri => "uri",
            Self::Mac => "mac",
            Self::Cidr => "cidr",
            Self::Regexp => "regexp",
            Self::Json => "json",
            Self::Rfc1123 => "rfc1123",
        };
        f.write_str(s)
    }
}

// =============================================================================
// Example
// =============================================================================

/// A user-provided example value.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ExampleExpr {
    /// Short summary; `"default"` when none was given.
    pub summary: String,
    /// Long description.
    pub description: Option<String>,
    /// The example value.
    pub value: Option<Value>,
}

impl ExampleExpr {
    /// Creates an example with the given summary and no value.
    pub fn new(summary: impl Into<String>) -> Self {
        let summary = summary.into();
        Self {
            summary: if summary.is_empty() {
                "default".to_string()
            } else {
                summary
            },
            description: None,
            value: None,
        }
    }
}

// =============================================================================
// AttributeExpr
// =============================================================================

/// A typed field definition.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AttributeExpr {
    /// Semantic type.
    pub ty: DataType,
    /// Human description.
    pub description: Option<String>,
    /// External documentation.
    pub docs: Option<DocsExpr>,
    /// Default value.
    pub default: Option<Value>,
    /// User examples.
    pub examples: Vec<ExampleExpr>,
    /// Validation rules, including required child names.
    pub validation: Validation,
    /// Generator hints.
    pub meta: Meta,
    /// Whether generators may synthesize examples; set during preparation.
    pub generate_examples: bool,
}

impl AttributeExpr {
    /// Creates an attribute of the given type.
    #[must_use]
    pub fn new(ty: DataType) -> Self {
        Self {
            ty,
            description: None,
            docs: None,
            default: None,
            examples: Vec::new(),
            validation: Validation::default(),
            meta: Meta::new(),
            generate_examples: false,
        }
    }

    /// Creates a text attribute, the default when no type is given.
    #[must_use]
    pub fn text() -> Self {
        Self::new(DataType::Primitive(Primitive::String))
    }

    /// Creates an empty inline object attribute.
    #[must_use]
    pub fn object() -> Self {
        Self::new(DataType::object())
    }

    /// Returns the ordered child attributes of an inline object.
    #[must_use]
    pub fn fields(&self) -> &[(String, AttributeExpr)] {
        self.ty.fields().unwrap_or_default()
    }

    /// Returns the child attribute with the given name.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&AttributeExpr> {
        self.fields()
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, attr)| attr)
    }

    /// Returns true if the named child exists.
    #[must_use]
    pub fn has_field(&self, name: &str) -> bool {
        self.field(name).is_some()
    }

    /// Returns the required child names.
    #[must_use]
    pub fn required(&self) -> &[String] {
        &self.validation.required
    }

    /// Returns true if the named child is required.
    #[must_use]
    pub fn is_required(&self, name: &str) -> bool {
        self.validation.required.iter().any(|r| r == name)
    }

    /// Appends a child attribute. Returns false if this attribute is not an
    /// inline object.
    pub fn push_field(&mut self, name: impl Into<String>, attr: AttributeExpr) -> bool {
        match &mut self.ty {
            DataType::Object(fields) => {
                fields.push((name.into(), attr));
                true
            }
            _ => false,
        }
    }

    /// Visits this attribute and every nested attribute, depth first.
    ///
    /// Named types are not followed.
    pub fn walk_mut(&mut self, f: &mut dyn FnMut(&mut AttributeExpr)) {
        f(self);
        match &mut self.ty {
            DataType::Array(elem) => elem.walk_mut(f),
            DataType::Map(k, v) => {
                k.walk_mut(f);
                v.walk_mut(f);
            }
            DataType::Object(fields) => {
                for (_, attr) in fields {
                    attr.walk_mut(f);
                }
            }
            DataType::Primitive(_) | DataType::Named(_) | DataType::Collection(_) => {}
        }
    }
}

impl Default for AttributeExpr {
    fn default() -> Self {
        Self::text()
    }
}
