//! The frozen model handed to generators.

use blueprint_expr::{
    ApiExpr, AttributeExpr, Declarations, MethodExpr, ResultTypeExpr, ServiceExpr, TypeId,
    TypeLookup, TypeRef, UserTypeExpr,
};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A fully evaluated design.
///
/// Every type reference is resolved and every collection carries its views.
/// Declarations are sorted by name, so two evaluations of the same set of
/// declarations compare equal whatever order they were made in. The model
/// exposes no mutation.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Model {
    api: Option<ApiExpr>,
    services: Vec<ServiceExpr>,
    types: Vec<UserTypeExpr>,
    result_types: Vec<ResultTypeExpr>,
}

/// A top-level type declaration a reference points to.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TypeDecl<'a> {
    /// A user type.
    User(&'a UserTypeExpr),
    /// A result type.
    Result(&'a ResultTypeExpr),
}

impl<'a> TypeDecl<'a> {
    /// Returns the declared name; the identifier for result types.
    #[must_use]
    pub fn name(&self) -> &'a str {
        match self {
            Self::User(ut) => &ut.name,
            Self::Result(rt) => &rt.identifier,
        }
    }

    /// Returns the shape of the declaration.
    #[must_use]
    pub fn attribute(&self) -> &'a AttributeExpr {
        match self {
            Self::User(ut) => &ut.attribute,
            Self::Result(rt) => &rt.attribute,
        }
    }
}

impl Model {
    pub(crate) fn new(declarations: Declarations) -> Self {
        let Declarations {
            api,
            services,
            types,
            result_types,
        } = declarations;
        Self {
            api,
            services,
            types,
            result_types,
        }
    }

    /// Returns the API declaration, if any.
    #[must_use]
    pub const fn api(&self) -> Option<&ApiExpr> {
        self.api.as_ref()
    }

    /// Returns all services, sorted by name.
    #[must_use]
    pub fn services(&self) -> &[ServiceExpr] {
        &self.services
    }

    /// Returns a service by name.
    #[must_use]
    pub fn service(&self, name: &str) -> Option<&ServiceExpr> {
        self.services
            .binary_search_by(|svc| svc.name.as_str().cmp(name))
            .ok()
            .map(|i| &self.services[i])
    }

    /// Returns a method of a service.
    #[must_use]
    pub fn method(&self, service: &str, method: &str) -> Option<&MethodExpr> {
        self.service(service)?.method(method)
    }

    /// Returns all user types, sorted by name. Includes the built-in
    /// `ErrorResult`.
    #[must_use]
    pub fn user_types(&self) -> &[UserTypeExpr] {
        &self.types
    }

    /// Returns a user type by name.
    #[must_use]
    pub fn user_type(&self, name: &str) -> Option<&UserTypeExpr> {
        self.types
            .binary_search_by(|ut| ut.name.as_str().cmp(name))
            .ok()
            .map(|i| &self.types[i])
    }

    /// Returns all result types, sorted by identifier.
    #[must_use]
    pub fn result_types(&self) -> &[ResultTypeExpr] {
        &self.result_types
    }

    /// Returns a result type by identifier or type name.
    #[must_use]
    pub fn result_type(&self, name: &str) -> Option<&ResultTypeExpr> {
        self.result_types
            .binary_search_by(|rt| rt.identifier.as_str().cmp(name))
            .ok()
            .map(|i| &self.result_types[i])
            .or_else(|| self.result_types.iter().find(|rt| rt.type_name == name))
    }

    /// Follows a resolved reference to its declaration.
    #[must_use]
    pub fn resolve(&self, reference: &TypeRef) -> Option<TypeDecl<'_>> {
        match reference.target()? {
            TypeId::User(i) => self.types.get(i).map(TypeDecl::User),
            TypeId::Result(i) => self.result_types.get(i).map(TypeDecl::Result),
        }
    }
}

impl TypeLookup for Model {
    fn attribute_of(&self, name: &str) -> Option<&AttributeExpr> {
        self.user_type(name)
            .map(UserTypeExpr::attribute)
            .or_else(|| self.result_type(name).map(ResultTypeExpr::attribute))
    }
}
