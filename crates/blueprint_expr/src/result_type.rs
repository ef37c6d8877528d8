//! Top-level types: user types, result types, views and collections.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::attribute::AttributeExpr;
use crate::types::{DataType, TypeRef};
use crate::{COLLECTION_PARAM, DEFAULT_VIEW};

/// A named user type.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct UserTypeExpr {
    /// Type name, unique among user types.
    pub name: String,
    /// Shape of the type.
    pub attribute: AttributeExpr,
}

impl UserTypeExpr {
    /// Creates a user type with the given shape.
    pub fn new(name: impl Into<String>, attribute: AttributeExpr) -> Self {
        Self {
            name: name.into(),
            attribute,
        }
    }

    /// Returns the shape of the type.
    #[must_use]
    pub const fn attribute(&self) -> &AttributeExpr {
        &self.attribute
    }
}

/// A named, ordered subset of a result type's attributes.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ViewExpr {
    /// View name; empty names become `"default"` during preparation.
    pub name: String,
    /// Description.
    pub description: Option<String>,
    /// Attribute names rendered by the view, in order.
    pub attributes: Vec<String>,
}

impl ViewExpr {
    /// Creates an empty view.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Returns the attribute names of the view.
    #[must_use]
    pub fn attributes(&self) -> &[String] {
        &self.attributes
    }
}

/// Collection-specific data of a result type.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CollectionExpr {
    /// The element result type.
    pub element: TypeRef,
    /// True when the collection copies every view of its element.
    pub inherit_views: bool,
    /// True when the collection was synthesized from a `CollectionOf` use.
    pub generated: bool,
}

/// A result type: a type with views.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ResultTypeExpr {
    /// Media-type style identifier, unique among result types.
    pub identifier: String,
    /// Type name derived from the identifier.
    pub type_name: String,
    /// Shape of the type.
    pub attribute: AttributeExpr,
    /// Views, in declaration order.
    pub views: Vec<ViewExpr>,
    /// Set for collections of another result type.
    pub collection: Option<CollectionExpr>,
}

impl ResultTypeExpr {
    /// Creates a result type with an empty object shape.
    pub fn new(identifier: impl Into<String>) -> Self {
        let identifier = identifier.into();
        Self {
            type_name: type_name_from_identifier(&identifier),
            identifier,
            attribute: AttributeExpr::object(),
            views: Vec::new(),
            collection: None,
        }
    }

    /// Creates a collection of the named element result type.
    ///
    /// The identifier and type name are provisional until the element is
    /// known; see [`ResultTypeExpr::name_collection`].
    pub fn collection_of(element: impl Into<String>) -> Self {
        let element = element.into();
        let mut rt = Self::new(format!("{element}{COLLECTION_PARAM}"));
        rt.type_name = format!("{}Collection", type_name_from_identifier(&element));
        rt.attribute = AttributeExpr::new(DataType::array(DataType::named(element.clone())));
        rt.collection = Some(CollectionExpr {
            element: TypeRef::new(element),
            inherit_views: false,
            generated: false,
        });
        rt
    }

    /// Renames a collection after its element result type.
    pub fn name_collection(&mut self, element: &Self, suffix: &str) {
        self.identifier = format!("{}{COLLECTION_PARAM}", element.identifier);
        self.type_name = format!("{}{suffix}", element.type_name);
        if let Some(coll) = &mut self.collection {
            coll.element.rename(element.identifier.clone());
        }
        if let DataType::Array(elem) = &mut self.attribute.ty {
            if let DataType::Named(r) = &mut elem.ty {
                r.rename(element.identifier.clone());
            }
        }
    }

    /// Returns true if `name` is this type's identifier or type name.
    #[must_use]
    pub fn is_named(&self, name: &str) -> bool {
        self.identifier == name || self.type_name == name
    }

    /// Returns the shape of the type.
    #[must_use]
    pub const fn attribute(&self) -> &AttributeExpr {
        &self.attribute
    }

    /// Returns the views.
    #[must_use]
    pub fn views(&self) -> &[ViewExpr] {
        &self.views
    }

    /// Returns the view with the given name.
    #[must_use]
    pub fn view(&self, name: &str) -> Option<&ViewExpr> {
        self.views.iter().find(|v| v.name == name)
    }

    /// Returns true if the type defines a `"default"` view.
    #[must_use]
    pub fn has_default_view(&self) -> bool {
        self.view(DEFAULT_VIEW).is_some()
    }

    /// Returns the collection data, if this is a collection.
    #[must_use]
    pub const fn collection(&self) -> Option<&CollectionExpr> {
        self.collection.as_ref()
    }

    /// Returns true for collections.
    #[must_use]
    pub const fn is_collection(&self) -> bool {
        self.collection.is_some()
    }
}

/// Derives a type name from a media-type style identifier.
///
/// Parameters are dropped, then the last path segment is taken, cut at
/// `+`, stripped of a `vnd.` prefix and camel-cased on `.`, `-` and `_`:
/// `application/vnd.goa.bottle+json` gives `GoaBottle`. Falls back to the
/// whole identifier and finally to `"ResultType"`.
#[must_use]
pub fn type_name_from_identifier(identifier: &str) -> String {
    let base = identifier.split(';').next().unwrap_or_default().trim();
    let last = base.rsplit('/').next().unwrap_or(base);
    let last = last.split('+').next().unwrap_or(last);
    let last = last.strip_prefix("vnd.").unwrap_or(last);
    let name = camel_case(last);
    if !name.is_empty() {
        return name;
    }
    let name = camel_case(base);
    if name.is_empty() {
        "ResultType".to_string()
    } else {
        name
    }
}

fn camel_case(s: &str) -> String {
    s.split(|c: char| !c.is_alphanumeric())
        .filter(|part| !part.is_empty())
        .map(|part| {
            let mut chars = part.chars();
            chars.next().map_or_else(String::new, |first| {
                first.to_uppercase().chain(chars).collect::<String>()
            })
        })
        .collect()
}
