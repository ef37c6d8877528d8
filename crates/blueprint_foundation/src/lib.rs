//! Errors, diagnostics, and literal values for Blueprint.
//!
//! This crate provides:
//! - [`Error`] - Rich error types with expression context
//! - [`Diagnostics`] and [`Reporter`] - Multi-error collection across a run
//! - [`Value`] - Literal values used for defaults, examples and enums

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod diagnostics;
pub mod error;
pub mod value;

pub use diagnostics::{Diagnostics, Reporter};
pub use error::{Error, ErrorContext, ErrorKind, Result};
pub use value::Value;
