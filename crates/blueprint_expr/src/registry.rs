//! Root registry of top-level declarations.
//!
//! The `RootRegistry` owns every top-level expression of one evaluation run:
//! - The API (at most one)
//! - Services
//! - User types (seeded with the built-in error result type)
//! - Result types, including generated collections
//!
//! Attributes refer to types by name; the registry is the only owner of the
//! canonical definitions. A registry is created per run and never shared.

use std::collections::BTreeMap;
use std::fmt;

use blueprint_foundation::{Error, Result};
use tracing::debug;

use crate::ERROR_RESULT;
use crate::api::ApiExpr;
use crate::attribute::AttributeExpr;
use crate::result_type::{ResultTypeExpr, UserTypeExpr};
use crate::service::ServiceExpr;
use crate::types::{DataType, Primitive, TypeId, TypeLookup};

// =============================================================================
// RootKind / RootExpr
// =============================================================================

/// Kinds of top-level declarations.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RootKind {
    /// The API.
    Api,
    /// A service.
    Service,
    /// A user type.
    Type,
    /// A result type.
    ResultType,
}

impl fmt::Display for RootKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Api => "api",
            Self::Service => "service",
            Self::Type => "type",
            Self::ResultType => "result type",
        };
        f.write_str(s)
    }
}

/// A top-level declaration ready to be registered.
#[derive(Clone, Debug, PartialEq)]
pub enum RootExpr {
    /// The API.
    Api(ApiExpr),
    /// A service.
    Service(ServiceExpr),
    /// A user type.
    Type(UserTypeExpr),
    /// A result type.
    ResultType(ResultTypeExpr),
}

impl RootExpr {
    /// Returns the declaration kind.
    #[must_use]
    pub const fn kind(&self) -> RootKind {
        match self {
            Self::Api(_) => RootKind::Api,
            Self::Service(_) => RootKind::Service,
            Self::Type(_) => RootKind::Type,
            Self::ResultType(_) => RootKind::ResultType,
        }
    }

    /// Returns the registration key: the name, or the identifier of result
    /// types.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Api(api) => &api.name,
            Self::Service(svc) => &svc.name,
            Self::Type(ut) => &ut.name,
            Self::ResultType(rt) => &rt.identifier,
        }
    }
}

/// Lifecycle of a registry.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RegistryPhase {
    /// Builders are registering declarations.
    Declaring,
    /// Preparation may add generated collection types.
    Preparing,
    /// Sorted and closed to registration.
    Sealed,
}

// =============================================================================
// RootRegistry
// =============================================================================

/// Run-scoped index of top-level declarations keyed by kind and name.
#[derive(Clone, Debug)]
pub struct RootRegistry {
    phase: RegistryPhase,
    api: Option<ApiExpr>,
    services: Vec<ServiceExpr>,
    types: Vec<UserTypeExpr>,
    result_types: Vec<ResultTypeExpr>,
    index: BTreeMap<(RootKind, String), usize>,
}

impl Default for RootRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl RootRegistry {
    /// Creates a registry holding only the built-in types.
    #[must_use]
    pub fn new() -> Self {
        let mut registry = Self {
            phase: RegistryPhase::Declaring,
            api: None,
            services: Vec::new(),
            types: Vec::new(),
            result_types: Vec::new(),
            index: BTreeMap::new(),
        };
        registry
            .index
            .insert((RootKind::Type, ERROR_RESULT.to_string()), 0);
        registry.types.push(error_result());
        registry
    }

    /// Returns the current lifecycle phase.
    #[must_use]
    pub const fn phase(&self) -> RegistryPhase {
        self.phase
    }

    /// Registers a top-level declaration.
    ///
    /// Fails with a duplicate-name error if a declaration of the same kind
    /// and name exists, or if an API is already declared. Once preparation
    /// starts only result types may be added; a sealed registry rejects
    /// everything.
    pub fn register(&mut self, expr: RootExpr) -> Result<()> {
        let kind = expr.kind();
        match self.phase {
            RegistryPhase::Declaring => {}
            RegistryPhase::Preparing if kind == RootKind::ResultType => {}
            phase => {
                return Err(Error::internal(format!(
                    "cannot register {kind} \"{}\" while {phase:?}",
                    expr.name()
                )));
            }
        }

        if let (RootExpr::Api(_), Some(existing)) = (&expr, &self.api) {
            return Err(Error::duplicate_name(
                RootKind::Api.to_string(),
                existing.name.clone(),
            ));
        }
        let key = (kind, expr.name().to_string());
        if self.index.contains_key(&key) {
            return Err(Error::duplicate_name(kind.to_string(), key.1));
        }

        debug!(%kind, name = %key.1, "registered declaration");
        let idx = match expr {
            RootExpr::Api(api) => {
                self.api = Some(api);
                0
            }
            RootExpr::Service(svc) => push(&mut self.services, svc),
            RootExpr::Type(ut) => push(&mut self.types, ut),
            RootExpr::ResultType(rt) => push(&mut self.result_types, rt),
        };
        self.index.insert(key, idx);
        Ok(())
    }

    /// Returns true if a declaration of that kind and name exists.
    #[must_use]
    pub fn contains(&self, kind: RootKind, name: &str) -> bool {
        self.index.contains_key(&(kind, name.to_string()))
    }

    /// Returns the number of registered declarations, built-ins included.
    #[must_use]
    pub fn len(&self) -> usize {
        usize::from(self.api.is_some())
            + self.services.len()
            + self.types.len()
            + self.result_types.len()
    }

    /// Returns true if nothing is registered. Never true in practice, since
    /// the built-in types are always present.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    // -------------------------------------------------------------------------
    // Lookup
    // -------------------------------------------------------------------------

    /// Returns the API declaration.
    #[must_use]
    pub const fn api(&self) -> Option<&ApiExpr> {
        self.api.as_ref()
    }

    /// Returns the API declaration mutably.
    pub fn api_mut(&mut self) -> Option<&mut ApiExpr> {
        self.api.as_mut()
    }

    /// Returns a service by name.
    #[must_use]
    pub fn service(&self, name: &str) -> Option<&ServiceExpr> {
        self.position(RootKind::Service, name)
            .map(|i| &self.services[i])
    }

    /// Returns a user type by name.
    #[must_use]
    pub fn user_type(&self, name: &str) -> Option<&UserTypeExpr> {
        self.position(RootKind::Type, name).map(|i| &self.types[i])
    }

    /// Returns a result type by identifier or type name.
    #[must_use]
    pub fn result_type(&self, name: &str) -> Option<&ResultTypeExpr> {
        self.result_type_position(name).map(|i| &self.result_types[i])
    }

    /// Returns the index of a result type by identifier or type name.
    #[must_use]
    pub fn result_type_position(&self, name: &str) -> Option<usize> {
        self.position(RootKind::ResultType, name).or_else(|| {
            self.result_types
                .iter()
                .position(|rt| rt.type_name == name)
        })
    }

    /// Returns all services.
    #[must_use]
    pub fn services(&self) -> &[ServiceExpr] {
        &self.services
    }

    /// Returns all services mutably.
    pub fn services_mut(&mut self) -> &mut [ServiceExpr] {
        &mut self.services
    }

    /// Returns all user types.
    #[must_use]
    pub fn user_types(&self) -> &[UserTypeExpr] {
        &self.types
    }

    /// Returns all user types mutably.
    pub fn user_types_mut(&mut self) -> &mut [UserTypeExpr] {
        &mut self.types
    }

    /// Returns all result types.
    #[must_use]
    pub fn result_types(&self) -> &[ResultTypeExpr] {
        &self.result_types
    }

    /// Returns all result types mutably.
    pub fn result_types_mut(&mut self) -> &mut [ResultTypeExpr] {
        &mut self.result_types
    }

    /// Resolves a type name to its declaration.
    ///
    /// User types take precedence over result types; result types match by
    /// identifier first, then by type name.
    pub fn resolve(&self, name: &str) -> Result<TypeId> {
        self.position(RootKind::Type, name)
            .map(TypeId::User)
            .or_else(|| self.result_type_position(name).map(TypeId::Result))
            .ok_or_else(|| Error::unresolved_reference(name))
    }

    /// Builds an owned name index for resolution while the registry is being
    /// mutated.
    #[must_use]
    pub fn type_index(&self) -> TypeIndex {
        let mut names = BTreeMap::new();
        for (i, rt) in self.result_types.iter().enumerate() {
            names.entry(rt.type_name.clone()).or_insert(TypeId::Result(i));
        }
        for (i, rt) in self.result_types.iter().enumerate() {
            names.insert(rt.identifier.clone(), TypeId::Result(i));
        }
        for (i, ut) in self.types.iter().enumerate() {
            names.insert(ut.name.clone(), TypeId::User(i));
        }
        TypeIndex { names }
    }

    /// Visits every attribute of every declaration, nested ones included.
    pub fn attributes_mut(&mut self, f: &mut dyn FnMut(&mut AttributeExpr)) {
        let api_servers = self.api.iter_mut().flat_map(|api| api.servers.iter_mut());
        let svc_servers = self.services.iter_mut().flat_map(|svc| svc.servers.iter_mut());
        for server in api_servers.chain(svc_servers) {
            for host in &mut server.hosts {
                host.variables.walk_mut(f);
            }
        }
        for svc in &mut self.services {
            for err in &mut svc.errors {
                err.attribute.walk_mut(f);
            }
            for method in &mut svc.methods {
                for attr in method.payload.iter_mut().chain(method.result.iter_mut()) {
                    attr.walk_mut(f);
                }
                for err in &mut method.errors {
                    err.attribute.walk_mut(f);
                }
            }
        }
        for ut in &mut self.types {
            ut.attribute.walk_mut(f);
        }
        for rt in &mut self.result_types {
            rt.attribute.walk_mut(f);
        }
    }

    fn position(&self, kind: RootKind, name: &str) -> Option<usize> {
        self.index.get(&(kind, name.to_string())).copied()
    }

    // -------------------------------------------------------------------------
    // Lifecycle
    // -------------------------------------------------------------------------

    /// Closes declaration; only generated result types may be added from
    /// now on.
    pub fn begin_prepare(&mut self) {
        if self.phase == RegistryPhase::Declaring {
            self.phase = RegistryPhase::Preparing;
        }
    }

    /// Rebuilds the name index after declarations were renamed.
    pub fn reindex(&mut self) {
        self.index.clear();
        if let Some(api) = &self.api {
            self.index.insert((RootKind::Api, api.name.clone()), 0);
        }
        for (i, svc) in self.services.iter().enumerate() {
            self.index.insert((RootKind::Service, svc.name.clone()), i);
        }
        for (i, ut) in self.types.iter().enumerate() {
            self.index.insert((RootKind::Type, ut.name.clone()), i);
        }
        for (i, rt) in self.result_types.iter().enumerate() {
            self.index
                .insert((RootKind::ResultType, rt.identifier.clone()), i);
        }
    }

    /// Sorts every arena by name and closes the registry to registration.
    ///
    /// After sealing, positions and [`TypeId`]s depend only on the set of
    /// declarations, not on the order they were made in.
    pub fn seal(&mut self) {
        self.services.sort_by(|a, b| a.name.cmp(&b.name));
        self.types.sort_by(|a, b| a.name.cmp(&b.name));
        self.result_types
            .sort_by(|a, b| a.identifier.cmp(&b.identifier));
        self.reindex();
        self.phase = RegistryPhase::Sealed;
        debug!(declarations = self.len(), "registry sealed");
    }

    /// Consumes the registry, returning its declarations.
    #[must_use]
    pub fn into_parts(self) -> Declarations {
        Declarations {
            api: self.api,
            services: self.services,
            types: self.types,
            result_types: self.result_types,
        }
    }
}

impl TypeLookup for RootRegistry {
    fn attribute_of(&self, name: &str) -> Option<&AttributeExpr> {
        match self.resolve(name).ok()? {
            TypeId::User(i) => self.types.get(i).map(UserTypeExpr::attribute),
            TypeId::Result(i) => self.result_types.get(i).map(ResultTypeExpr::attribute),
        }
    }
}

fn push<T>(arena: &mut Vec<T>, item: T) -> usize {
    arena.push(item);
    arena.len() - 1
}

/// The built-in error result type used by errors declared without a type.
fn error_result() -> UserTypeExpr {
    let mut attr = AttributeExpr::object();
    let fields = [
        ("name", Primitive::String, "Name is the name of this class of errors."),
        ("id", Primitive::String, "ID is a unique identifier for this particular occurrence of the problem."),
        ("message", Primitive::String, "Message is a human-readable explanation specific to this occurrence of the problem."),
        ("temporary", Primitive::Boolean, "Is the error temporary?"),
        ("timeout", Primitive::Boolean, "Is the error a timeout?"),
        ("fault", Primitive::Boolean, "Is the error a server-side fault?"),
    ];
    for (name, ty, description) in fields {
        let mut field = AttributeExpr::new(DataType::Primitive(ty));
        field.description = Some(description.to_string());
        attr.push_field(name, field);
    }
    attr.validation.add_required(["name", "id", "message", "temporary"]);
    attr.description = Some("Error response result type".to_string());
    UserTypeExpr::new(ERROR_RESULT, attr)
}

// =============================================================================
// TypeIndex / Declarations
// =============================================================================

/// Owned snapshot of type names to declarations.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TypeIndex {
    names: BTreeMap<String, TypeId>,
}

impl TypeIndex {
    /// Looks up a type name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<TypeId> {
        self.names.get(name).copied()
    }

    /// Returns the number of names indexed.
    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Returns true if no names are indexed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// The declarations of a consumed registry.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Declarations {
    /// The API.
    pub api: Option<ApiExpr>,
    /// Services sorted by name.
    pub services: Vec<ServiceExpr>,
    /// User types sorted by name.
    pub types: Vec<UserTypeExpr>,
    /// Result types sorted by identifier.
    pub result_types: Vec<ResultTypeExpr>,
}
