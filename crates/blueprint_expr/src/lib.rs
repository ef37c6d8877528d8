//! Expression model, attribute tree, and root registry for Blueprint designs.
//!
//! This crate provides:
//! - [`DataType`] / [`Primitive`] - Semantic types of attributes
//! - [`AttributeExpr`] - The recursive attribute tree
//! - API, service, method, type and result type expressions
//! - [`Expression`] - Capability-based access used by builder primitives
//! - [`RootRegistry`] - Run-scoped index of top-level declarations

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod api;
pub mod attribute;
pub mod expression;
pub mod registry;
pub mod result_type;
pub mod service;
pub mod types;

pub use api::{ApiExpr, ContactExpr, DocsExpr, HostExpr, LicenseExpr, ServerExpr};
pub use attribute::{AttributeExpr, ExampleExpr, Format, META_EXAMPLE, Meta, Validation};
pub use expression::{ExprKind, Expression};
pub use registry::{Declarations, RegistryPhase, RootExpr, RootKind, RootRegistry, TypeIndex};
pub use result_type::{
    CollectionExpr, ResultTypeExpr, UserTypeExpr, ViewExpr, type_name_from_identifier,
};
pub use service::{ErrorExpr, META_FAULT, META_TEMPORARY, META_TIMEOUT, MethodExpr, ServiceExpr};
pub use types::{DataType, Primitive, TypeId, TypeLookup, TypeRef};

/// Name of the built-in error type used by errors declared without a type.
pub const ERROR_RESULT: &str = "ErrorResult";

/// Name of the view every result type must define.
pub const DEFAULT_VIEW: &str = "default";

/// Identifier suffix of collection result types.
pub const COLLECTION_PARAM: &str = "; type=collection";
