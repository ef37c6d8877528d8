//! Finalize phase: reference resolution and derived views.

use std::collections::{BTreeMap, BTreeSet};

use blueprint_expr::{
    AttributeExpr, DataType, ErrorExpr, ExprKind, ResultTypeExpr, RootRegistry, ServerExpr,
    TypeId, TypeIndex, ViewExpr,
};
use blueprint_foundation::{Error, Reporter};
use tracing::debug;

/// Runs the phase. Expects a sealed registry.
pub(crate) fn run(registry: &mut RootRegistry, reporter: &mut Reporter) {
    let index = registry.type_index();
    let before = reporter.diagnostics().len();
    resolve_references(registry, &index, reporter);
    derive_collection_views(registry, reporter);
    debug!(
        names = index.len(),
        found = reporter.diagnostics().len() - before,
        "finalize finished"
    );
}

// =============================================================================
// Resolution
// =============================================================================

fn resolve_references(registry: &mut RootRegistry, index: &TypeIndex, reporter: &mut Reporter) {
    if let Some(api) = registry.api_mut() {
        reporter.within(ExprKind::Api.frame(&api.name), |r| {
            resolve_servers(&mut api.servers, index, r);
        });
    }

    for svc in registry.services_mut() {
        reporter.within(ExprKind::Service.frame(&svc.name), |r| {
            resolve_servers(&mut svc.servers, index, r);
            resolve_errors(&mut svc.errors, index, r);
            for method in &mut svc.methods {
                r.within(ExprKind::Method.frame(&method.name), |r| {
                    if let Some(payload) = &mut method.payload {
                        r.within("payload", |r| resolve_attribute(payload, index, r));
                    }
                    if let Some(result) = &mut method.result {
                        r.within("result", |r| resolve_attribute(result, index, r));
                    }
                    resolve_errors(&mut method.errors, index, r);
                });
            }
        });
    }

    for ut in registry.user_types_mut() {
        reporter.within(ExprKind::Type.frame(&ut.name), |r| {
            resolve_attribute(&mut ut.attribute, index, r);
        });
    }

    for rt in registry.result_types_mut() {
        reporter.within(ExprKind::ResultType.frame(&rt.identifier), |r| {
            if let Some(coll) = &mut rt.collection {
                match index.get(coll.element.name()) {
                    Some(id @ TypeId::Result(_)) => coll.element.resolve(id),
                    // The shape only wraps the element; one report is enough.
                    _ => {
                        r.report(Error::unresolved_reference(coll.element.name()));
                        return;
                    }
                }
            }
            resolve_attribute(&mut rt.attribute, index, r);
        });
    }
}

fn resolve_servers(servers: &mut [ServerExpr], index: &TypeIndex, r: &mut Reporter) {
    for server in servers {
        r.within(ExprKind::Server.frame(&server.name), |r| {
            for host in &mut server.hosts {
                r.within(ExprKind::Host.frame(&host.name), |r| {
                    resolve_attribute(&mut host.variables, index, r);
                });
            }
        });
    }
}

fn resolve_errors(errors: &mut [ErrorExpr], index: &TypeIndex, r: &mut Reporter) {
    for err in errors {
        if err.inherited {
            // Already reported where the service declares it.
            resolve_attribute(&mut err.attribute, index, &mut Reporter::new());
        } else {
            r.within(ExprKind::Error.frame(&err.name), |r| {
                resolve_attribute(&mut err.attribute, index, r);
            });
        }
    }
}

/// Links every by-name reference under `attr`. References are not followed,
/// so self and mutual references terminate.
fn resolve_attribute(attr: &mut AttributeExpr, index: &TypeIndex, r: &mut Reporter) {
    match &mut attr.ty {
        DataType::Named(target) => match index.get(target.name()) {
            Some(id) => target.resolve(id),
            None => r.report(Error::unresolved_reference(target.name())),
        },
        // Left over by Prepare only when the element was never declared.
        DataType::Collection(target) => {
            r.report(Error::unresolved_reference(target.name()));
        }
        DataType::Array(elem) => r.within("elem", |r| resolve_attribute(elem, index, r)),
        DataType::Map(key, value) => {
            r.within("key", |r| resolve_attribute(key, index, r));
            r.within("elem", |r| resolve_attribute(value, index, r));
        }
        DataType::Object(fields) => {
            for (name, child) in fields {
                r.within(ExprKind::Attribute.frame(name), |r| {
                    resolve_attribute(child, index, r);
                });
            }
        }
        DataType::Primitive(_) => {}
    }
}

// =============================================================================
// Derived views
// =============================================================================

/// Gives collections the views of their element: all of them when the
/// collection declares none, otherwise the element view behind each
/// name-only view.
///
/// A collection of a collection is derived after its element, so views
/// flow down whole chains. Collections whose elements form a cycle keep
/// their declared views.
fn derive_collection_views(registry: &mut RootRegistry, reporter: &mut Reporter) {
    let mut pending: BTreeMap<usize, usize> = registry
        .result_types()
        .iter()
        .enumerate()
        .filter_map(|(i, rt)| match rt.collection()?.element.target()? {
            TypeId::Result(e) if e < registry.result_types().len() => Some((i, e)),
            _ => None,
        })
        .collect();
    let mut failed = BTreeSet::new();

    loop {
        let ready: Vec<(usize, usize)> = pending
            .iter()
            .filter(|(_, e)| !pending.contains_key(e))
            .map(|(&i, &e)| (i, e))
            .collect();
        if ready.is_empty() {
            break;
        }
        for (i, e) in ready {
            pending.remove(&i);
            let views = registry.result_types()[e].views.clone();
            let quiet = failed.contains(&e);
            let rt = &mut registry.result_types_mut()[i];
            if !derive_views(rt, views, quiet, reporter) {
                failed.insert(i);
            }
        }
    }
    if !pending.is_empty() {
        debug!(collections = pending.len(), "collection element cycle");
    }
}

/// Derives the views of one collection from `views`, those of its element.
/// Returns false when an inheriting collection ends up without a default
/// view; `quiet` suppresses that report when the element already failed.
fn derive_views(
    rt: &mut ResultTypeExpr,
    views: Vec<ViewExpr>,
    quiet: bool,
    reporter: &mut Reporter,
) -> bool {
    let inherit = rt.collection().is_some_and(|c| c.inherit_views);
    reporter.within(ExprKind::ResultType.frame(&rt.identifier), |r| {
        if inherit {
            rt.views = views;
            if rt.has_default_view() {
                return true;
            }
            if !quiet {
                r.report(Error::missing_default_view(&rt.identifier));
            }
            return false;
        }
        for view in &mut rt.views {
            if !view.attributes.is_empty() {
                continue;
            }
            match views.iter().find(|v| v.name == view.name) {
                Some(source) => {
                    view.attributes.clone_from(&source.attributes);
                    if view.description.is_none() {
                        view.description.clone_from(&source.description);
                    }
                }
                None => {
                    let err = Error::unresolved_reference(view.name.clone());
                    r.within(ExprKind::View.frame(&view.name), |r| r.report(err));
                }
            }
        }
        true
    })
}
