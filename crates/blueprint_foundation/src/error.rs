//! Error types for the Blueprint design language.
//!
//! Uses `thiserror` for ergonomic error definition with rich context.

use std::fmt;

use thiserror::Error;

/// The main error type for Blueprint operations.
///
/// A single `Error` is one diagnostic: what went wrong ([`ErrorKind`]) and,
/// when known, which expression it concerns ([`ErrorContext`]).
#[derive(Debug, Clone, PartialEq, Error)]
pub struct Error {
    /// The kind of error that occurred.
    pub kind: ErrorKind,
    /// Optional context about where the error occurred.
    pub context: Option<ErrorContext>,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind)?;
        if let Some(ctx) = &self.context {
            if !ctx.is_empty() {
                write!(f, " ({ctx})")?;
            }
        }
        Ok(())
    }
}

impl Error {
    /// Creates a new error with the given kind.
    #[must_use]
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            context: None,
        }
    }

    /// Adds context to this error.
    #[must_use]
    pub fn with_context(mut self, context: ErrorContext) -> Self {
        self.context = Some(context);
        self
    }

    /// Creates an invalid argument error for a builder call.
    #[must_use]
    pub fn invalid_argument(call: impl Into<String>, expected: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidArgument {
            call: call.into(),
            expected: expected.into(),
        })
    }

    /// Creates a duplicate name error.
    #[must_use]
    pub fn duplicate_name(kind: impl Into<String>, name: impl Into<String>) -> Self {
        Self::new(ErrorKind::DuplicateName {
            kind: kind.into(),
            name: name.into(),
        })
    }

    /// Creates a missing required attribute error.
    #[must_use]
    pub fn missing_required(name: impl Into<String>) -> Self {
        Self::new(ErrorKind::MissingRequired(name.into()))
    }

    /// Creates an incompatible default value error.
    #[must_use]
    pub fn incompatible_default(value: impl Into<String>, ty: impl Into<String>) -> Self {
        Self::new(ErrorKind::IncompatibleDefault {
            value: value.into(),
            ty: ty.into(),
        })
    }

    /// Creates an unresolved type reference error.
    #[must_use]
    pub fn unresolved_reference(name: impl Into<String>) -> Self {
        Self::new(ErrorKind::UnresolvedReference(name.into()))
    }

    /// Creates a missing default view error.
    #[must_use]
    pub fn missing_default_view(result_type: impl Into<String>) -> Self {
        Self::new(ErrorKind::MissingDefaultView(result_type.into()))
    }

    /// Creates an incompatible DSL error: `call` is not allowed inside `parent`.
    #[must_use]
    pub fn incompatible_dsl(call: impl Into<String>, parent: impl Into<String>) -> Self {
        Self::new(ErrorKind::IncompatibleDsl {
            call: call.into(),
            parent: parent.into(),
        })
    }

    /// Creates an undefined attribute error for a view.
    #[must_use]
    pub fn undefined_attribute(view: impl Into<String>, attribute: impl Into<String>) -> Self {
        Self::new(ErrorKind::UndefinedAttribute {
            view: view.into(),
            attribute: attribute.into(),
        })
    }

    /// Creates an invalid URI variable error.
    #[must_use]
    pub fn invalid_uri_variable(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidUriVariable(message.into()))
    }

    /// Creates an internal error.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Internal(message.into()))
    }

    /// Returns true if this error must abort declaration immediately.
    #[must_use]
    pub const fn is_fatal(&self) -> bool {
        matches!(self.kind, ErrorKind::InvalidArgument { .. })
    }
}

/// Categorized error kinds for pattern matching.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ErrorKind {
    /// A builder call received an argument combination outside the
    /// recognized shapes. Fatal to declaration.
    #[error("invalid arguments in call to {call}: expected {expected}")]
    InvalidArgument {
        /// The builder primitive that was called.
        call: String,
        /// Description of the accepted argument shapes.
        expected: String,
    },

    /// Two declarations of the same kind share a name.
    #[error("duplicate {kind} name \"{name}\"")]
    DuplicateName {
        /// The declaration kind (type, view, service, ...).
        kind: String,
        /// The conflicting name.
        name: String,
    },

    /// A required attribute name has no matching declared attribute.
    #[error("required attribute \"{0}\" is not defined")]
    MissingRequired(String),

    /// A default value does not match its attribute type.
    #[error("default value {value} is incompatible with attribute of type {ty}")]
    IncompatibleDefault {
        /// Rendering of the offending value.
        value: String,
        /// Name of the attribute type.
        ty: String,
    },

    /// A by-name type reference never matched a declaration.
    #[error("unresolved type reference \"{0}\"")]
    UnresolvedReference(String),

    /// A result type has no view named "default".
    #[error("result type \"{0}\" has no default view")]
    MissingDefaultView(String),

    /// A builder primitive was used inside an expression that does not
    /// support it.
    #[error("{call} cannot be used in {parent}")]
    IncompatibleDsl {
        /// The builder primitive that was misplaced.
        call: String,
        /// The expression it was applied to.
        parent: String,
    },

    /// A view lists an attribute its result type does not define.
    #[error("view \"{view}\" references undefined attribute \"{attribute}\"")]
    UndefinedAttribute {
        /// The view name.
        view: String,
        /// The unknown attribute name.
        attribute: String,
    },

    /// A host URI variable is undeclared or unconstrained.
    #[error("invalid URI variable: {0}")]
    InvalidUriVariable(String),

    /// Internal error (should not happen).
    #[error("internal error: {0}")]
    Internal(String),
}

/// Context about where an error occurred.
///
/// The frame stack names the enclosing expressions from the outermost
/// declaration inward, e.g. `type "User"` then `attribute "age"`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorContext {
    /// Enclosing expressions, outermost first.
    pub stack: Vec<String>,
}

impl ErrorContext {
    /// Creates a new empty context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a frame.
    #[must_use]
    pub fn with_frame(mut self, frame: impl Into<String>) -> Self {
        self.stack.push(frame.into());
        self
    }

    /// Returns the innermost frame, the expression the error is about.
    #[must_use]
    pub fn subject(&self) -> Option<&str> {
        self.stack.last().map(String::as_str)
    }

    /// Returns the outermost frame, the top-level declaration.
    #[must_use]
    pub fn root(&self) -> Option<&str> {
        self.stack.first().map(String::as_str)
    }

    /// Returns true if no frames were recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.stack.is_empty() {
            return Ok(());
        }
        write!(f, "in {}", self.stack.join(" > "))
    }
}

/// Result type alias using Blueprint's Error.
pub type Result<T> = std::result::Result<T, Error>;
