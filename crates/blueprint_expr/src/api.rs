//! API-level expressions: the API itself, contact, license, docs, servers
//! and hosts.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::attribute::{AttributeExpr, Meta};

/// The API declaration: name, documentation metadata and servers.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ApiExpr {
    /// API name.
    pub name: String,
    /// Title used in documentation.
    pub title: Option<String>,
    /// Description used in documentation.
    pub description: Option<String>,
    /// API version.
    pub version: Option<String>,
    /// Terms of service text or URL.
    pub terms_of_service: Option<String>,
    /// Support contact.
    pub contact: Option<ContactExpr>,
    /// Licensing information.
    pub license: Option<LicenseExpr>,
    /// External documentation.
    pub docs: Option<DocsExpr>,
    /// Servers hosting the API.
    pub servers: Vec<ServerExpr>,
    /// Generator hints.
    pub meta: Meta,
}

impl ApiExpr {
    /// Creates an API with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

/// Contact information.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ContactExpr {
    /// Contact name.
    pub name: Option<String>,
    /// Contact email.
    pub email: Option<String>,
    /// Contact URL.
    pub url: Option<String>,
}

/// License information.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LicenseExpr {
    /// License name.
    pub name: Option<String>,
    /// License URL.
    pub url: Option<String>,
}

/// External documentation link.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DocsExpr {
    /// Description of the documentation.
    pub description: Option<String>,
    /// Documentation URL.
    pub url: Option<String>,
}

/// A server: a named group of hosts serving some services.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ServerExpr {
    /// Server name.
    pub name: String,
    /// Description.
    pub description: Option<String>,
    /// Names of the services hosted; empty means all.
    pub services: Vec<String>,
    /// Hosts.
    pub hosts: Vec<HostExpr>,
}

impl ServerExpr {
    /// Creates a server with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

/// A host: URI templates and the variables they use.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct HostExpr {
    /// Host name (e.g. "production").
    pub name: String,
    /// Description.
    pub description: Option<String>,
    /// URI templates, possibly with `{param}` placeholders.
    pub uris: Vec<String>,
    /// URI variables as an object attribute, one child per variable.
    pub variables: AttributeExpr,
}

impl HostExpr {
    /// Creates a host with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            uris: Vec::new(),
            variables: AttributeExpr::object(),
        }
    }

    /// Returns the `{param}` placeholder names used by the host URIs, in
    /// order of first appearance.
    #[must_use]
    pub fn uri_params(&self) -> Vec<&str> {
        let mut params = Vec::new();
        for uri in &self.uris {
            let mut rest = uri.as_str();
            while let Some(open) = rest.find('{') {
                let after = &rest[open + 1..];
                let Some(close) = after.find('}') else {
                    break;
                };
                let name = &after[..close];
                if !name.is_empty() && !params.contains(&name) {
                    params.push(name);
                }
                rest = &after[close + 1..];
            }
        }
        params
    }
}
