//! Services, methods and errors.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::ERROR_RESULT;
use crate::api::{DocsExpr, ServerExpr};
use crate::attribute::{AttributeExpr, Meta};
use crate::types::DataType;

/// Meta key marking an error as temporary (retryable).
pub const META_TEMPORARY: &str = "error:temporary";
/// Meta key marking an error as caused by a timeout.
pub const META_TIMEOUT: &str = "error:timeout";
/// Meta key marking an error as a server-side fault.
pub const META_FAULT: &str = "error:fault";

/// A service: a named group of methods sharing errors and servers.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ServiceExpr {
    /// Service name.
    pub name: String,
    /// Description.
    pub description: Option<String>,
    /// External documentation.
    pub docs: Option<DocsExpr>,
    /// Generator hints.
    pub meta: Meta,
    /// Methods, in declaration order.
    pub methods: Vec<MethodExpr>,
    /// Errors that apply to every method.
    pub errors: Vec<ErrorExpr>,
    /// Service-specific servers; override the API servers.
    pub servers: Vec<ServerExpr>,
}

impl ServiceExpr {
    /// Creates a service with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Returns the method with the given name.
    #[must_use]
    pub fn method(&self, name: &str) -> Option<&MethodExpr> {
        self.methods.iter().find(|m| m.name == name)
    }

    /// Returns the methods in declaration order.
    #[must_use]
    pub fn methods(&self) -> &[MethodExpr] {
        &self.methods
    }

    /// Returns the service-level errors.
    #[must_use]
    pub fn errors(&self) -> &[ErrorExpr] {
        &self.errors
    }
}

/// A method: payload, result and errors.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MethodExpr {
    /// Method name.
    pub name: String,
    /// Name of the owning service.
    pub service: String,
    /// Description.
    pub description: Option<String>,
    /// External documentation.
    pub docs: Option<DocsExpr>,
    /// Generator hints.
    pub meta: Meta,
    /// Request payload.
    pub payload: Option<AttributeExpr>,
    /// Response result.
    pub result: Option<AttributeExpr>,
    /// Errors; after preparation this includes the service errors.
    pub errors: Vec<ErrorExpr>,
}

impl MethodExpr {
    /// Creates a method of the given service.
    pub fn new(name: impl Into<String>, service: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            service: service.into(),
            ..Self::default()
        }
    }

    /// Returns the payload attribute.
    #[must_use]
    pub const fn payload(&self) -> Option<&AttributeExpr> {
        self.payload.as_ref()
    }

    /// Returns the result attribute.
    #[must_use]
    pub const fn result(&self) -> Option<&AttributeExpr> {
        self.result.as_ref()
    }

    /// Returns the errors.
    #[must_use]
    pub fn errors(&self) -> &[ErrorExpr] {
        &self.errors
    }

    /// Returns the error with the given name.
    #[must_use]
    pub fn error(&self, name: &str) -> Option<&ErrorExpr> {
        self.errors.iter().find(|e| e.name == name)
    }
}

/// A named error return value.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ErrorExpr {
    /// Error name, unique within its service or method.
    pub name: String,
    /// Shape of the error value.
    pub attribute: AttributeExpr,
    /// True if the error was inherited from the service.
    pub inherited: bool,
}

impl ErrorExpr {
    /// Creates an error using the built-in error result type.
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_attribute(name, AttributeExpr::new(DataType::named(ERROR_RESULT)))
    }

    /// Creates an error with the given shape.
    pub fn with_attribute(name: impl Into<String>, attribute: AttributeExpr) -> Self {
        Self {
            name: name.into(),
            attribute,
            inherited: false,
        }
    }

    /// Returns true if the error is marked temporary.
    #[must_use]
    pub fn is_temporary(&self) -> bool {
        self.attribute.meta.contains_key(META_TEMPORARY)
    }

    /// Returns true if the error is marked as a timeout.
    #[must_use]
    pub fn is_timeout(&self) -> bool {
        self.attribute.meta.contains_key(META_TIMEOUT)
    }

    /// Returns true if the error is marked as a server fault.
    #[must_use]
    pub fn is_fault(&self) -> bool {
        self.attribute.meta.contains_key(META_FAULT)
    }
}
