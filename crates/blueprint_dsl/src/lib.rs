//! Declarative builder primitives for Blueprint designs.
//!
//! This crate provides:
//! - [`Opt`] - Deferred mutations returned by every primitive
//! - [`args`] - Argument-shape dispatch for attribute-like primitives
//! - [`Design`] - Top-level declarations into a fresh root registry
//!
//! Primitives compose by nesting; a parent constructor creates its node,
//! applies its children, and only then attaches or registers the node.
//!
//! ```ignore
//! use blueprint_dsl::prelude::*;
//!
//! let mut design = Design::new();
//! design.ty("Person", vec![
//!     attribute("name", (STRING, "Full name")),
//!     attribute("age", (INT32, vec![minimum(0)])),
//!     required(["name"]),
//! ])?;
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod args;
pub mod attribute;
pub mod common;
pub mod design;
pub mod opt;
pub mod server;
pub mod service;
pub mod types;

pub use args::{Arg, AttributeArgs, IntoArgs};
pub use design::Design;
pub use opt::{Opt, apply_all};

/// Everything needed to write a design.
pub mod prelude {
    pub use crate::attribute::{
        META_RPC_TAG, attribute, attributes, default, enum_values, example, example_with, field,
        format, max_length, maximum, min_length, minimum, pattern, required, ty, value,
    };
    pub use crate::common::{
        contact, description, docs, email, license, meta, name, terms_of_service, title, url,
        version,
    };
    pub use crate::design::Design;
    pub use crate::opt::Opt;
    pub use crate::server::{host, server, services, uri, variable};
    pub use crate::service::{error, fault, method, payload, result, temporary, timeout};
    pub use crate::types::{
        ANY, BOOLEAN, BYTES, FLOAT32, FLOAT64, INT32, INT64, STRING, array_of, collection_of,
        elem, key, map_of, view,
    };
    pub use blueprint_expr::{DataType, Format, Primitive};
    pub use blueprint_foundation::Value;
}
