//! Validate phase.
//!
//! Every node is checked on its own; a failure is recorded and the scan goes
//! on, so one run surfaces every independent problem. Type names that do not
//! resolve are skipped here and reported by Finalize.

use std::collections::BTreeSet;

use blueprint_expr::{
    AttributeExpr, DataType, ErrorExpr, ExprKind, HostExpr, ResultTypeExpr, RootRegistry,
    ServerExpr, ServiceExpr, TypeLookup,
};
use blueprint_foundation::{Error, Reporter};
use tracing::debug;

/// Runs the phase over the whole registry.
pub(crate) fn run(registry: &RootRegistry, reporter: &mut Reporter) {
    let before = reporter.diagnostics().len();
    if let Some(api) = registry.api() {
        reporter.within(ExprKind::Api.frame(&api.name), |r| {
            check_servers(&api.servers, registry, r);
        });
    }
    for svc in registry.services() {
        reporter.within(ExprKind::Service.frame(&svc.name), |r| {
            check_service(svc, registry, r);
        });
    }
    for ut in registry.user_types() {
        reporter.within(ExprKind::Type.frame(&ut.name), |r| {
            check_attribute(&ut.attribute, registry, r);
        });
    }
    for rt in registry.result_types() {
        reporter.within(ExprKind::ResultType.frame(&rt.identifier), |r| {
            check_result_type(rt, registry, r);
        });
    }
    debug!(
        found = reporter.diagnostics().len() - before,
        "validate finished"
    );
}

// =============================================================================
// Attributes
// =============================================================================

/// What an attribute looks like once named types are followed.
enum Shape<'a> {
    Fields(&'a [(String, AttributeExpr)]),
    Scalar,
    Unknown,
}

fn shape<'a>(attr: &'a AttributeExpr, lookup: &'a dyn TypeLookup) -> Shape<'a> {
    let mut current = attr;
    let mut seen: Vec<&str> = Vec::new();
    loop {
        match &current.ty {
            DataType::Object(fields) => return Shape::Fields(fields),
            DataType::Named(r) => {
                if seen.contains(&r.name()) {
                    return Shape::Unknown;
                }
                seen.push(r.name());
                match lookup.attribute_of(r.name()) {
                    Some(next) => current = next,
                    None => return Shape::Unknown,
                }
            }
            DataType::Collection(_) => return Shape::Unknown,
            _ => return Shape::Scalar,
        }
    }
}

fn check_attribute(attr: &AttributeExpr, lookup: &dyn TypeLookup, r: &mut Reporter) {
    if let Some(default) = &attr.default {
        if !attr.ty.accepts(default, lookup) {
            r.report(Error::incompatible_default(
                default.to_string(),
                attr.ty.type_name(),
            ));
        }
    }

    let required = attr.required();
    if !required.is_empty() {
        match shape(attr, lookup) {
            Shape::Fields(fields) => {
                for name in required {
                    if !fields.iter().any(|(field, _)| field == name) {
                        r.report(Error::missing_required(name.clone()));
                    }
                }
            }
            Shape::Scalar => {
                for name in required {
                    r.report(Error::missing_required(name.clone()));
                }
            }
            Shape::Unknown => {}
        }
    }

    match &attr.ty {
        DataType::Object(fields) => {
            report_duplicates("attribute", fields.iter().map(|(name, _)| name.as_str()), r);
            for (name, child) in fields {
                r.within(ExprKind::Attribute.frame(name), |r| {
                    check_attribute(child, lookup, r);
                });
            }
        }
        DataType::Array(elem) => r.within("elem", |r| check_attribute(elem, lookup, r)),
        DataType::Map(key, value) => {
            r.within("key", |r| check_attribute(key, lookup, r));
            r.within("elem", |r| check_attribute(value, lookup, r));
        }
        DataType::Primitive(_) | DataType::Named(_) | DataType::Collection(_) => {}
    }
}

/// Reports each name that occurs more than once, once.
fn report_duplicates<'a>(kind: &str, names: impl IntoIterator<Item = &'a str>, r: &mut Reporter) {
    let mut seen = BTreeSet::new();
    let mut reported = BTreeSet::new();
    for name in names {
        if !seen.insert(name) && reported.insert(name) {
            r.report(Error::duplicate_name(kind, name));
        }
    }
}

// =============================================================================
// Services
// =============================================================================

fn check_service(svc: &ServiceExpr, registry: &RootRegistry, r: &mut Reporter) {
    report_duplicates("method", svc.methods.iter().map(|m| m.name.as_str()), r);
    report_duplicates("error", svc.errors.iter().map(|e| e.name.as_str()), r);
    check_errors(&svc.errors, registry, r);
    check_servers(&svc.servers, registry, r);

    for method in &svc.methods {
        r.within(ExprKind::Method.frame(&method.name), |r| {
            // Inherited errors were checked on the service.
            let own: Vec<&ErrorExpr> = method.errors.iter().filter(|e| !e.inherited).collect();
            report_duplicates("error", own.iter().map(|e| e.name.as_str()), r);
            if let Some(payload) = method.payload() {
                r.within("payload", |r| check_attribute(payload, registry, r));
            }
            if let Some(result) = method.result() {
                r.within("result", |r| check_attribute(result, registry, r));
            }
            check_errors(own, registry, r);
        });
    }
}

fn check_errors<'a>(
    errors: impl IntoIterator<Item = &'a ErrorExpr>,
    registry: &RootRegistry,
    r: &mut Reporter,
) {
    for err in errors {
        r.within(ExprKind::Error.frame(&err.name), |r| {
            check_attribute(&err.attribute, registry, r);
        });
    }
}

// =============================================================================
// Servers
// =============================================================================

fn check_servers(servers: &[ServerExpr], registry: &RootRegistry, r: &mut Reporter) {
    report_duplicates("server", servers.iter().map(|s| s.name.as_str()), r);
    for server in servers {
        r.within(ExprKind::Server.frame(&server.name), |r| {
            report_duplicates("host", server.hosts.iter().map(|h| h.name.as_str()), r);
            for host in &server.hosts {
                r.within(ExprKind::Host.frame(&host.name), |r| {
                    check_host(host, registry, r);
                });
            }
        });
    }
}

fn check_host(host: &HostExpr, registry: &RootRegistry, r: &mut Reporter) {
    for param in host.uri_params() {
        if !host.variables.has_field(param) {
            r.report(Error::invalid_uri_variable(format!(
                "URI parameter \"{param}\" has no matching variable"
            )));
        }
    }
    for (name, var) in host.variables.fields() {
        if var.default.is_none() && var.validation.values.is_empty() {
            r.within(ExprKind::Attribute.frame(name), |r| {
                r.report(Error::invalid_uri_variable(format!(
                    "variable \"{name}\" needs a default value or an enum"
                )));
            });
        }
    }
    check_attribute(&host.variables, registry, r);
}

// =============================================================================
// Result types
// =============================================================================

fn check_result_type(rt: &ResultTypeExpr, registry: &RootRegistry, r: &mut Reporter) {
    check_attribute(&rt.attribute, registry, r);
    report_duplicates("view", rt.views.iter().map(|v| v.name.as_str()), r);

    let inherits = rt.collection().is_some_and(|c| c.inherit_views);
    if !inherits && !rt.has_default_view() {
        r.report(Error::missing_default_view(&rt.identifier));
    }

    // Collection views select attributes of the innermost element.
    let Some(target) = innermost_element(rt, registry) else {
        return;
    };
    let fields = match shape(target.attribute(), registry) {
        Shape::Fields(fields) => fields,
        Shape::Scalar => &[],
        Shape::Unknown => return,
    };
    for view in &rt.views {
        r.within(ExprKind::View.frame(&view.name), |r| {
            for name in &view.attributes {
                if !fields.iter().any(|(field, _)| field == name) {
                    r.report(Error::undefined_attribute(&view.name, name));
                }
            }
        });
    }
}

/// Follows a chain of collections down to its first non-collection type.
fn innermost_element<'a>(
    rt: &'a ResultTypeExpr,
    registry: &'a RootRegistry,
) -> Option<&'a ResultTypeExpr> {
    let mut current = rt;
    for _ in 0..=registry.result_types().len() {
        match current.collection() {
            Some(coll) => current = registry.result_type(coll.element.name())?,
            None => return Some(current),
        }
    }
    None
}
