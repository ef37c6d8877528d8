//! Methods, payloads, results and errors.

use blueprint_expr::{
    AttributeExpr, DataType, ERROR_RESULT, ErrorExpr, ExprKind, META_FAULT, META_TEMPORARY,
    META_TIMEOUT, MethodExpr,
};
use blueprint_foundation::Error;

use crate::args::{EXPECTED_SHAPES, IntoArgs, args_invalid, parse_attribute_args};
use crate::attribute::build_attribute;
use crate::opt::{Opt, apply_within, first_invalid, incompatible, misplaced};

/// Declares a method of the enclosing service.
pub fn method(name: impl Into<String>, opts: Vec<Opt>) -> Opt {
    let name = name.into();
    let invalid = first_invalid(&opts);
    Opt::new("method", move |target, reporter| {
        let Some(service) = target.service_mut() else {
            return misplaced("method", &opts, target, reporter);
        };
        let mut method = MethodExpr::new(name, service.name.clone());
        apply_within(ExprKind::Method.frame(&method.name), opts, &mut method, reporter)?;
        if let Some(service) = target.service_mut() {
            service.methods.push(method);
        }
        Ok(())
    })
    .guarded_by(invalid)
}

/// Declares the method payload. Requires at least one argument.
pub fn payload(args: impl IntoArgs) -> Opt {
    method_attribute("payload", args, |m| &mut m.payload)
}

/// Declares the method result. Requires at least one argument.
pub fn result(args: impl IntoArgs) -> Opt {
    method_attribute("result", args, |m| &mut m.result)
}

fn method_attribute(
    call: &'static str,
    args: impl IntoArgs,
    slot: fn(&mut MethodExpr) -> &mut Option<AttributeExpr>,
) -> Opt {
    let args = args.into_args();
    let parsed = if args.is_empty() {
        Err(Error::invalid_argument(
            call,
            EXPECTED_SHAPES.trim_start_matches("(), "),
        ))
    } else {
        parse_attribute_args(call, args)
    };
    let invalid = args_invalid(&parsed);
    Opt::new(call, move |target, reporter| {
        let parsed = parsed?;
        if target.method_mut().is_none() {
            return misplaced(call, &parsed.dsl, target, reporter);
        }
        let attr = reporter.within(call, |r| build_attribute(parsed, true, r))?;
        if let Some(method) = target.method_mut() {
            *slot(method) = Some(attr);
        }
        Ok(())
    })
    .guarded_by(invalid)
}

/// Declares an error of a service or method.
///
/// Without a type the error uses the built-in error result type, and a lone
/// nested builder describes the error itself (`temporary`, `description`)
/// rather than an inline object.
pub fn error(name: impl Into<String>, args: impl IntoArgs) -> Opt {
    let name = name.into();
    let parsed = parse_attribute_args("error", args.into_args());
    let invalid = args_invalid(&parsed);
    Opt::new("error", move |target, reporter| {
        let mut parsed = parsed?;
        if target.errors_mut().is_none() {
            return misplaced("error", &parsed.dsl, target, reporter);
        }
        let ty = parsed
            .ty
            .take()
            .unwrap_or_else(|| DataType::named(ERROR_RESULT));
        let dsl = std::mem::take(&mut parsed.dsl);
        let mut error = ErrorExpr::with_attribute(name, AttributeExpr::new(ty));
        error.attribute.description = parsed.description;
        apply_within(ExprKind::Error.frame(&error.name), dsl, &mut error, reporter)?;
        if let Some(errors) = target.errors_mut() {
            errors.push(error);
        }
        Ok(())
    })
    .guarded_by(invalid)
}

/// Marks an error as temporary (retryable).
pub fn temporary() -> Opt {
    qualifier("temporary", META_TEMPORARY)
}

/// Marks an error as caused by a timeout.
pub fn timeout() -> Opt {
    qualifier("timeout", META_TIMEOUT)
}

/// Marks an error as a server-side fault.
pub fn fault() -> Opt {
    qualifier("fault", META_FAULT)
}

fn qualifier(call: &'static str, key: &'static str) -> Opt {
    Opt::new(call, move |target, reporter| {
        if target.kind() != ExprKind::Error {
            incompatible(call, target, reporter);
            return Ok(());
        }
        if let Some(meta) = target.meta_mut() {
            meta.insert(key.to_string(), "true".to_string());
        }
        Ok(())
    })
}
