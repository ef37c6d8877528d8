//! Argument-shape dispatch for attribute-like primitives.
//!
//! `attribute`, `field`, `variable`, `payload`, `result`, `error` and
//! top-level `ty` accept a variable argument list whose meaning depends on
//! its shape:
//!
//! | Arguments                     | Meaning                                  |
//! |-------------------------------|------------------------------------------|
//! | `()`                          | text, no constraints                     |
//! | `(dsl)`                       | inline object described by `dsl`         |
//! | `(type)`                      | field of that type                       |
//! | `(type, dsl)`                 | typed field with validations from `dsl`  |
//! | `(type, "description")`       | typed field with a description           |
//! | `(type, "description", dsl)`  | both                                     |
//!
//! A string in type position names a user or result type, declared before
//! or after the reference.

use blueprint_expr::{DataType, Primitive};
use blueprint_foundation::{Error, Result};

use crate::opt::{Opt, first_invalid};

/// Accepted shapes, used in invalid-argument messages.
pub const EXPECTED_SHAPES: &str = "(), (dsl), (type), (type, dsl), (type, description) or (type, description, dsl)";

/// One argument of an attribute-like primitive.
#[derive(Debug)]
pub enum Arg {
    /// A string: a type name in first position, else a description.
    Str(String),
    /// A semantic type.
    Type(DataType),
    /// Nested builder options.
    Dsl(Vec<Opt>),
}

impl From<&str> for Arg {
    fn from(s: &str) -> Self {
        Self::Str(s.to_string())
    }
}

impl From<String> for Arg {
    fn from(s: String) -> Self {
        Self::Str(s)
    }
}

impl From<Primitive> for Arg {
    fn from(p: Primitive) -> Self {
        Self::Type(DataType::Primitive(p))
    }
}

impl From<DataType> for Arg {
    fn from(ty: DataType) -> Self {
        Self::Type(ty)
    }
}

impl From<Opt> for Arg {
    fn from(opt: Opt) -> Self {
        Self::Dsl(vec![opt])
    }
}

impl From<Vec<Opt>> for Arg {
    fn from(opts: Vec<Opt>) -> Self {
        Self::Dsl(opts)
    }
}

/// Conversion of Rust values and tuples into an argument list.
pub trait IntoArgs {
    /// Converts into the argument list.
    fn into_args(self) -> Vec<Arg>;
}

impl IntoArgs for () {
    fn into_args(self) -> Vec<Arg> {
        Vec::new()
    }
}

impl IntoArgs for Vec<Arg> {
    fn into_args(self) -> Vec<Arg> {
        self
    }
}

macro_rules! single_arg {
    ($($t:ty),*) => {
        $(
            impl IntoArgs for $t {
                fn into_args(self) -> Vec<Arg> {
                    vec![Arg::from(self)]
                }
            }
        )*
    };
}

single_arg!(&str, String, Primitive, DataType, Opt, Vec<Opt>);

impl<A: Into<Arg>> IntoArgs for (A,) {
    fn into_args(self) -> Vec<Arg> {
        vec![self.0.into()]
    }
}

impl<A: Into<Arg>, B: Into<Arg>> IntoArgs for (A, B) {
    fn into_args(self) -> Vec<Arg> {
        vec![self.0.into(), self.1.into()]
    }
}

impl<A: Into<Arg>, B: Into<Arg>, C: Into<Arg>> IntoArgs for (A, B, C) {
    fn into_args(self) -> Vec<Arg> {
        vec![self.0.into(), self.1.into(), self.2.into()]
    }
}

impl<A: Into<Arg>, B: Into<Arg>, C: Into<Arg>, D: Into<Arg>> IntoArgs for (A, B, C, D) {
    fn into_args(self) -> Vec<Arg> {
        vec![self.0.into(), self.1.into(), self.2.into(), self.3.into()]
    }
}

/// A parsed argument list.
#[derive(Debug, Default)]
pub struct AttributeArgs {
    /// Explicit type; `None` for the `()` and `(dsl)` shapes.
    pub ty: Option<DataType>,
    /// Description.
    pub description: Option<String>,
    /// Nested options.
    pub dsl: Vec<Opt>,
}

/// Parses an argument list into one of the six shapes.
pub fn parse_attribute_args(call: &str, args: Vec<Arg>) -> Result<AttributeArgs> {
    let mut it = args.into_iter();
    let parsed = match (it.next(), it.next(), it.next(), it.next()) {
        (None, ..) => AttributeArgs::default(),
        (Some(Arg::Dsl(dsl)), None, ..) => AttributeArgs {
            dsl,
            ..AttributeArgs::default()
        },
        (Some(first), second, third, None) => {
            let Some(ty) = type_arg(first) else {
                return Err(invalid(call));
            };
            match (second, third) {
                (None, None) => AttributeArgs {
                    ty: Some(ty),
                    ..AttributeArgs::default()
                },
                (Some(Arg::Dsl(dsl)), None) => AttributeArgs {
                    ty: Some(ty),
                    description: None,
                    dsl,
                },
                (Some(Arg::Str(description)), None) => AttributeArgs {
                    ty: Some(ty),
                    description: Some(description),
                    dsl: Vec::new(),
                },
                (Some(Arg::Str(description)), Some(Arg::Dsl(dsl))) => AttributeArgs {
                    ty: Some(ty),
                    description: Some(description),
                    dsl,
                },
                _ => return Err(invalid(call)),
            }
        }
        _ => return Err(invalid(call)),
    };
    Ok(parsed)
}

/// Returns the fatal error of a malformed argument list, or of the first
/// malformed call nested in a well-formed one.
pub(crate) fn args_invalid(parsed: &Result<AttributeArgs>) -> Option<Error> {
    match parsed {
        Ok(args) => first_invalid(&args.dsl),
        Err(err) => Some(err.clone()),
    }
}

fn type_arg(arg: Arg) -> Option<DataType> {
    match arg {
        Arg::Type(ty) => Some(ty),
        Arg::Str(name) => Some(DataType::named(name)),
        Arg::Dsl(_) => None,
    }
}

fn invalid(call: &str) -> Error {
    Error::invalid_argument(call, EXPECTED_SHAPES)
}
