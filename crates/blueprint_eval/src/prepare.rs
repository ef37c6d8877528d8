//! Prepare phase: normalization, inherited defaults and canonical defaults.
//!
//! Runs over the whole registry before anything is validated. Lookups here
//! tolerate missing names; whatever cannot be found is left for Finalize to
//! report.

use std::collections::{BTreeMap, BTreeSet};

use blueprint_expr::{
    COLLECTION_PARAM, DEFAULT_VIEW, DataType, ExprKind, META_EXAMPLE, Meta, ResultTypeExpr,
    RootExpr, RootKind, RootRegistry, type_name_from_identifier,
};
use blueprint_foundation::{Error, ErrorContext, Reporter};
use tracing::debug;

use crate::EvalConfig;

/// Runs the phase and seals the registry.
pub(crate) fn run(registry: &mut RootRegistry, config: &EvalConfig, reporter: &mut Reporter) {
    debug!(declarations = registry.len(), "prepare started");
    registry.begin_prepare();
    name_collections(registry, config, reporter);
    registry.reindex();
    let generated = normalize_collections(registry, config, reporter);
    canonical_defaults(registry, config);
    propagate_errors(registry);
    registry.seal();
    debug!(generated, declarations = registry.len(), "prepare finished");
}

// =============================================================================
// Collections
// =============================================================================

/// Gives explicitly declared collections their canonical identifier and
/// type name now that every element is declared.
///
/// A collection whose element is itself a collection waits until that
/// element is renamed, so chains resolve the same in any declaration order.
fn name_collections(registry: &mut RootRegistry, config: &EvalConfig, reporter: &mut Reporter) {
    let mut pending = BTreeSet::new();
    for (i, rt) in registry.result_types_mut().iter_mut().enumerate() {
        let Some(type_name) = rt
            .collection()
            .filter(|coll| !coll.generated)
            .map(|coll| {
                format!(
                    "{}{}",
                    type_name_from_identifier(coll.element.name()),
                    config.collection_suffix
                )
            })
        else {
            continue;
        };
        rt.type_name = type_name;
        pending.insert(i);
    }

    loop {
        let mut renamed = false;
        for i in pending.clone() {
            let Some(name) = registry.result_types()[i]
                .collection()
                .map(|coll| coll.element.name().to_string())
            else {
                continue;
            };
            let Some(pos) = element_position(registry, &name) else {
                continue;
            };
            if pending.contains(&pos) {
                continue;
            }
            pending.remove(&i);
            renamed = true;

            let element = registry.result_types()[pos].clone();
            let identifier = format!("{}{COLLECTION_PARAM}", element.identifier);
            let taken = registry
                .result_types()
                .iter()
                .enumerate()
                .any(|(j, other)| j != i && other.identifier == identifier);
            if taken {
                let frame = ExprKind::ResultType.frame(&registry.result_types()[i].identifier);
                reporter.report(
                    Error::duplicate_name(RootKind::ResultType.to_string(), identifier)
                        .with_context(ErrorContext::new().with_frame(frame)),
                );
                continue;
            }
            registry.result_types_mut()[i].name_collection(&element, &config.collection_suffix);
        }
        if !renamed {
            break;
        }
    }
}

/// Finds a result type by its current identifier, then by type name. The
/// index is stale while collections are being renamed.
fn element_position(registry: &RootRegistry, name: &str) -> Option<usize> {
    let types = registry.result_types();
    types
        .iter()
        .position(|rt| rt.identifier == name)
        .or_else(|| types.iter().position(|rt| rt.type_name == name))
}

/// Rewrites every `Collection` shortcut into a reference to the collection
/// result type of its element, generating that type when nobody declared
/// it. Returns the number of generated types.
fn normalize_collections(
    registry: &mut RootRegistry,
    config: &EvalConfig,
    reporter: &mut Reporter,
) -> usize {
    let mut elements = BTreeSet::new();
    registry.attributes_mut(&mut |attr| {
        if let DataType::Collection(r) = &attr.ty {
            elements.insert(r.name().to_string());
        }
    });

    let mut targets = BTreeMap::new();
    let mut generated = 0;
    for name in elements {
        let Some(pos) = registry.result_type_position(&name) else {
            continue;
        };
        let element = registry.result_types()[pos].clone();
        let identifier = format!("{}{COLLECTION_PARAM}", element.identifier);
        if !registry.contains(RootKind::ResultType, &identifier) {
            let mut collection = ResultTypeExpr::collection_of(element.identifier.clone());
            collection.name_collection(&element, &config.collection_suffix);
            if let Some(coll) = &mut collection.collection {
                coll.generated = true;
            }
            if let Err(err) = registry.register(RootExpr::ResultType(collection)) {
                reporter.report(err);
                continue;
            }
            debug!(%identifier, "generated collection result type");
            generated += 1;
        }
        targets.insert(name, identifier);
    }

    registry.attributes_mut(&mut |attr| {
        let target = match &attr.ty {
            DataType::Collection(r) => targets.get(r.name()).cloned(),
            _ => None,
        };
        if let Some(identifier) = target {
            attr.ty = DataType::named(identifier);
        }
    });
    generated
}

// =============================================================================
// Defaults
// =============================================================================

fn canonical_defaults(registry: &mut RootRegistry, config: &EvalConfig) {
    let disabled = |meta: &Meta| meta.get(META_EXAMPLE).is_some_and(|v| v == "false");
    let examples =
        config.generate_examples && !registry.api().is_some_and(|api| disabled(&api.meta));
    registry.attributes_mut(&mut |attr| {
        attr.generate_examples = examples && !disabled(&attr.meta);
    });

    for rt in registry.result_types_mut() {
        for view in &mut rt.views {
            if view.name.is_empty() {
                view.name = DEFAULT_VIEW.to_string();
            }
        }
        let explicit = !rt.views.is_empty();
        if let Some(coll) = &mut rt.collection {
            coll.inherit_views = !explicit;
        }
    }
}

/// Copies service errors into every method. A method's own error shadows a
/// service error of the same name.
fn propagate_errors(registry: &mut RootRegistry) {
    for svc in registry.services_mut() {
        for method in &mut svc.methods {
            for err in &svc.errors {
                if method.error(&err.name).is_none() {
                    let mut err = err.clone();
                    err.inherited = true;
                    method.errors.push(err);
                }
            }
        }
    }
}
