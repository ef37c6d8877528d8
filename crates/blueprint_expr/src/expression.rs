//! Capability-based access to expressions.
//!
//! Builder primitives never switch over concrete expression types. Each
//! expression kind implements [`Expression`] and exposes only the
//! capabilities it supports; every accessor defaults to `None`, meaning the
//! primitive does not apply there.

use std::fmt;

use crate::api::{ApiExpr, ContactExpr, DocsExpr, HostExpr, LicenseExpr, ServerExpr};
use crate::attribute::{AttributeExpr, ExampleExpr, Meta};
use crate::result_type::{ResultTypeExpr, UserTypeExpr, ViewExpr};
use crate::service::{ErrorExpr, MethodExpr, ServiceExpr};

/// The kind of an expression, used in diagnostics.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ExprKind {
    /// The API.
    Api,
    /// A server.
    Server,
    /// A server host.
    Host,
    /// A service.
    Service,
    /// A method.
    Method,
    /// A user type.
    Type,
    /// A result type.
    ResultType,
    /// An attribute, payload, result or variable.
    Attribute,
    /// A result type view.
    View,
    /// An error.
    Error,
    /// An example.
    Example,
    /// Documentation link.
    Docs,
    /// Contact information.
    Contact,
    /// License information.
    License,
}

impl ExprKind {
    /// Returns the keyword used for this kind in messages.
    #[must_use]
    pub const fn keyword(self) -> &'static str {
        match self {
            Self::Api => "api",
            Self::Server => "server",
            Self::Host => "host",
            Self::Service => "service",
            Self::Method => "method",
            Self::Type => "type",
            Self::ResultType => "result type",
            Self::Attribute => "attribute",
            Self::View => "view",
            Self::Error => "error",
            Self::Example => "example",
            Self::Docs => "docs",
            Self::Contact => "contact",
            Self::License => "license",
        }
    }

    /// Formats a diagnostic frame for the named expression of this kind.
    #[must_use]
    pub fn frame(self, name: &str) -> String {
        format!("{} {name:?}", self.keyword())
    }
}

impl fmt::Display for ExprKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// An expression node that builder primitives can be applied to.
pub trait Expression {
    /// Returns the kind of the expression.
    fn kind(&self) -> ExprKind;

    /// Description text.
    fn description_mut(&mut self) -> Option<&mut Option<String>> {
        None
    }

    /// External documentation.
    fn docs_mut(&mut self) -> Option<&mut Option<DocsExpr>> {
        None
    }

    /// URL of a docs, contact or license expression.
    fn url_mut(&mut self) -> Option<&mut Option<String>> {
        None
    }

    /// Name of a contact or license expression.
    fn name_mut(&mut self) -> Option<&mut Option<String>> {
        None
    }

    /// Email of a contact expression.
    fn email_mut(&mut self) -> Option<&mut Option<String>> {
        None
    }

    /// Generator hints.
    fn meta_mut(&mut self) -> Option<&mut Meta> {
        None
    }

    /// The attribute describing the expression's shape.
    fn attribute_mut(&mut self) -> Option<&mut AttributeExpr> {
        None
    }

    /// The view being defined.
    fn view_mut(&mut self) -> Option<&mut ViewExpr> {
        None
    }

    /// The views of a result type.
    fn views_mut(&mut self) -> Option<&mut Vec<ViewExpr>> {
        None
    }

    /// The API being defined.
    fn api_mut(&mut self) -> Option<&mut ApiExpr> {
        None
    }

    /// Servers of an API or service.
    fn servers_mut(&mut self) -> Option<&mut Vec<ServerExpr>> {
        None
    }

    /// The server being defined.
    fn server_mut(&mut self) -> Option<&mut ServerExpr> {
        None
    }

    /// The host being defined.
    fn host_mut(&mut self) -> Option<&mut HostExpr> {
        None
    }

    /// The service being defined.
    fn service_mut(&mut self) -> Option<&mut ServiceExpr> {
        None
    }

    /// Errors of a service or method.
    fn errors_mut(&mut self) -> Option<&mut Vec<ErrorExpr>> {
        None
    }

    /// The method being defined.
    fn method_mut(&mut self) -> Option<&mut MethodExpr> {
        None
    }

    /// The example being defined.
    fn example_mut(&mut self) -> Option<&mut ExampleExpr> {
        None
    }
}

// =============================================================================
// API-level expressions
// =============================================================================

impl Expression for ApiExpr {
    fn kind(&self) -> ExprKind {
        ExprKind::Api
    }

    fn description_mut(&mut self) -> Option<&mut Option<String>> {
        Some(&mut self.description)
    }

    fn docs_mut(&mut self) -> Option<&mut Option<DocsExpr>> {
        Some(&mut self.docs)
    }

    fn meta_mut(&mut self) -> Option<&mut Meta> {
        Some(&mut self.meta)
    }

    fn api_mut(&mut self) -> Option<&mut ApiExpr> {
        Some(self)
    }

    fn servers_mut(&mut self) -> Option<&mut Vec<ServerExpr>> {
        Some(&mut self.servers)
    }
}

impl Expression for ContactExpr {
    fn kind(&self) -> ExprKind {
        ExprKind::Contact
    }

    fn url_mut(&mut self) -> Option<&mut Option<String>> {
        Some(&mut self.url)
    }

    fn name_mut(&mut self) -> Option<&mut Option<String>> {
        Some(&mut self.name)
    }

    fn email_mut(&mut self) -> Option<&mut Option<String>> {
        Some(&mut self.email)
    }
}

impl Expression for LicenseExpr {
    fn kind(&self) -> ExprKind {
        ExprKind::License
    }

    fn url_mut(&mut self) -> Option<&mut Option<String>> {
        Some(&mut self.url)
    }

    fn name_mut(&mut self) -> Option<&mut Option<String>> {
        Some(&mut self.name)
    }
}

impl Expression for DocsExpr {
    fn kind(&self) -> ExprKind {
        ExprKind::Docs
    }

    fn description_mut(&mut self) -> Option<&mut Option<String>> {
        Some(&mut self.description)
    }

    fn url_mut(&mut self) -> Option<&mut Option<String>> {
        Some(&mut self.url)
    }
}

impl Expression for ServerExpr {
    fn kind(&self) -> ExprKind {
        ExprKind::Server
    }

    fn description_mut(&mut self) -> Option<&mut Option<String>> {
        Some(&mut self.description)
    }

    fn server_mut(&mut self) -> Option<&mut ServerExpr> {
        Some(self)
    }
}

impl Expression for HostExpr {
    fn kind(&self) -> ExprKind {
        ExprKind::Host
    }

    fn description_mut(&mut self) -> Option<&mut Option<String>> {
        Some(&mut self.description)
    }

    fn host_mut(&mut self) -> Option<&mut HostExpr> {
        Some(self)
    }
}

// =============================================================================
// Services
// =============================================================================

impl Expression for ServiceExpr {
    fn kind(&self) -> ExprKind {
        ExprKind::Service
    }

    fn description_mut(&mut self) -> Option<&mut Option<String>> {
        Some(&mut self.description)
    }

    fn docs_mut(&mut self) -> Option<&mut Option<DocsExpr>> {
        Some(&mut self.docs)
    }

    fn meta_mut(&mut self) -> Option<&mut Meta> {
        Some(&mut self.meta)
    }

    fn servers_mut(&mut self) -> Option<&mut Vec<ServerExpr>> {
        Some(&mut self.servers)
    }

    fn service_mut(&mut self) -> Option<&mut ServiceExpr> {
        Some(self)
    }

    fn errors_mut(&mut self) -> Option<&mut Vec<ErrorExpr>> {
        Some(&mut self.errors)
    }
}

impl Expression for MethodExpr {
    fn kind(&self) -> ExprKind {
        ExprKind::Method
    }

    fn description_mut(&mut self) -> Option<&mut Option<String>> {
        Some(&mut self.description)
    }

    fn docs_mut(&mut self) -> Option<&mut Option<DocsExpr>> {
        Some(&mut self.docs)
    }

    fn meta_mut(&mut self) -> Option<&mut Meta> {
        Some(&mut self.meta)
    }

    fn errors_mut(&mut self) -> Option<&mut Vec<ErrorExpr>> {
        Some(&mut self.errors)
    }

    fn method_mut(&mut self) -> Option<&mut MethodExpr> {
        Some(self)
    }
}

impl Expression for ErrorExpr {
    fn kind(&self) -> ExprKind {
        ExprKind::Error
    }

    fn description_mut(&mut self) -> Option<&mut Option<String>> {
        Some(&mut self.attribute.description)
    }

    fn meta_mut(&mut self) -> Option<&mut Meta> {
        Some(&mut self.attribute.meta)
    }

    fn attribute_mut(&mut self) -> Option<&mut AttributeExpr> {
        Some(&mut self.attribute)
    }
}

// =============================================================================
// Types and attributes
// =============================================================================

impl Expression for AttributeExpr {
    fn kind(&self) -> ExprKind {
        ExprKind::Attribute
    }

    fn description_mut(&mut self) -> Option<&mut Option<String>> {
        Some(&mut self.description)
    }

    fn docs_mut(&mut self) -> Option<&mut Option<DocsExpr>> {
        Some(&mut self.docs)
    }

    fn meta_mut(&mut self) -> Option<&mut Meta> {
        Some(&mut self.meta)
    }

    fn attribute_mut(&mut self) -> Option<&mut AttributeExpr> {
        Some(self)
    }
}

impl Expression for UserTypeExpr {
    fn kind(&self) -> ExprKind {
        ExprKind::Type
    }

    fn description_mut(&mut self) -> Option<&mut Option<String>> {
        Some(&mut self.attribute.description)
    }

    fn docs_mut(&mut self) -> Option<&mut Option<DocsExpr>> {
        Some(&mut self.attribute.docs)
    }

    fn meta_mut(&mut self) -> Option<&mut Meta> {
        Some(&mut self.attribute.meta)
    }

    fn attribute_mut(&mut self) -> Option<&mut AttributeExpr> {
        Some(&mut self.attribute)
    }
}

impl Expression for ResultTypeExpr {
    fn kind(&self) -> ExprKind {
        ExprKind::ResultType
    }

    fn description_mut(&mut self) -> Option<&mut Option<String>> {
        Some(&mut self.attribute.description)
    }

    fn docs_mut(&mut self) -> Option<&mut Option<DocsExpr>> {
        Some(&mut self.attribute.docs)
    }

    fn meta_mut(&mut self) -> Option<&mut Meta> {
        Some(&mut self.attribute.meta)
    }

    fn attribute_mut(&mut self) -> Option<&mut AttributeExpr> {
        Some(&mut self.attribute)
    }

    fn views_mut(&mut self) -> Option<&mut Vec<ViewExpr>> {
        Some(&mut self.views)
    }
}

impl Expression for ViewExpr {
    fn kind(&self) -> ExprKind {
        ExprKind::View
    }

    fn description_mut(&mut self) -> Option<&mut Option<String>> {
        Some(&mut self.description)
    }

    fn view_mut(&mut self) -> Option<&mut ViewExpr> {
        Some(self)
    }
}

impl Expression for ExampleExpr {
    fn kind(&self) -> ExprKind {
        ExprKind::Example
    }

    fn description_mut(&mut self) -> Option<&mut Option<String>> {
        Some(&mut self.description)
    }

    fn example_mut(&mut self) -> Option<&mut ExampleExpr> {
        Some(self)
    }
}
