//! Attribute primitives: children, requirements, defaults, examples and
//! validations.

use blueprint_expr::{AttributeExpr, DataType, ExampleExpr, ExprKind, Format, Primitive, Validation};
use blueprint_foundation::{Reporter, Result, Value};

use crate::args::{AttributeArgs, IntoArgs, args_invalid, parse_attribute_args};
use crate::opt::{Opt, apply_all, apply_within, first_invalid, incompatible, misplaced};

/// Meta key holding the wire tag of a `field`.
pub const META_RPC_TAG: &str = "rpc:tag";

/// Declares a child attribute.
///
/// Inside a view, only the name is used: it selects the attribute for
/// rendering. See [`crate::args`] for the accepted argument shapes.
///
/// ```ignore
/// attribute("age", (INT32, vec![minimum(2)]))
/// ```
pub fn attribute(name: impl Into<String>, args: impl IntoArgs) -> Opt {
    child_attribute("attribute", name.into(), args, None)
}

/// Declares a child attribute with an RPC wire tag.
pub fn field(tag: u32, name: impl Into<String>, args: impl IntoArgs) -> Opt {
    child_attribute("field", name.into(), args, Some(tag))
}

fn child_attribute(call: &'static str, name: String, args: impl IntoArgs, tag: Option<u32>) -> Opt {
    let parsed = parse_attribute_args(call, args.into_args());
    let invalid = args_invalid(&parsed);
    Opt::new(call, move |target, reporter| {
        let parsed = parsed?;
        if let Some(view) = target.view_mut() {
            if let Some(err) = first_invalid(&parsed.dsl) {
                return Err(err);
            }
            if !view.attributes.contains(&name) {
                view.attributes.push(name);
            }
            return Ok(());
        }
        if !target.attribute_mut().is_some_and(|a| a.ty.is_object()) {
            return misplaced(call, &parsed.dsl, target, reporter);
        }
        let frame = ExprKind::Attribute.frame(&name);
        let mut attr = reporter.within(frame, |r| build_attribute(parsed, true, r))?;
        if let Some(tag) = tag {
            attr.meta.insert(META_RPC_TAG.to_string(), tag.to_string());
        }
        if let Some(parent) = target.attribute_mut() {
            parent.push_field(name, attr);
        }
        Ok(())
    })
    .guarded_by(invalid)
}

/// Builds an attribute from parsed arguments.
///
/// Without an explicit type the attribute starts as an inline object; when
/// `inline_text` is set and the nested options declared no child, it falls
/// back to text.
pub(crate) fn build_attribute(
    parsed: AttributeArgs,
    inline_text: bool,
    reporter: &mut Reporter,
) -> Result<AttributeExpr> {
    let inline = parsed.ty.is_none();
    let mut attr = AttributeExpr::new(parsed.ty.unwrap_or_else(DataType::object));
    attr.description = parsed.description;
    apply_all(parsed.dsl, &mut attr, reporter)?;
    if inline && inline_text && matches!(&attr.ty, DataType::Object(fields) if fields.is_empty()) {
        attr.ty = DataType::Primitive(Primitive::String);
    }
    Ok(attr)
}

/// Groups attribute declarations; applies `opts` to the enclosing expression.
pub fn attributes(opts: Vec<Opt>) -> Opt {
    let invalid = first_invalid(&opts);
    Opt::new("attributes", move |target, reporter| {
        if target.attribute_mut().is_none() && target.view_mut().is_none() {
            return misplaced("attributes", &opts, target, reporter);
        }
        apply_all(opts, target, reporter)
    })
    .guarded_by(invalid)
}

/// Marks child attributes as required.
pub fn required<I, S>(names: I) -> Opt
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let names: Vec<String> = names.into_iter().map(Into::into).collect();
    Opt::new("required", move |target, reporter| {
        match target.attribute_mut() {
            Some(attr) => attr.validation.add_required(names),
            None => incompatible("required", target, reporter),
        }
        Ok(())
    })
}

/// Sets the default value.
pub fn default(value: impl Into<Value>) -> Opt {
    let value = value.into();
    Opt::new("default", move |target, reporter| {
        match target.attribute_mut() {
            Some(attr) => attr.default = Some(value),
            None => incompatible("default", target, reporter),
        }
        Ok(())
    })
}

/// Sets the semantic type of the enclosing attribute.
pub fn ty(ty: impl Into<DataType>) -> Opt {
    let ty = ty.into();
    Opt::new("ty", move |target, reporter| {
        match target.attribute_mut() {
            Some(attr) => attr.ty = ty,
            None => incompatible("ty", target, reporter),
        }
        Ok(())
    })
}

// =============================================================================
// Examples
// =============================================================================

/// Adds an example value with the default summary.
pub fn example(value: impl Into<Value>) -> Opt {
    let value = value.into();
    Opt::new("example", move |target, reporter| {
        match target.attribute_mut() {
            Some(attr) => {
                let mut ex = ExampleExpr::new("");
                ex.value = Some(value);
                attr.examples.push(ex);
            }
            None => incompatible("example", target, reporter),
        }
        Ok(())
    })
}

/// Adds an example described by `description` and `value` options.
pub fn example_with(summary: impl Into<String>, opts: Vec<Opt>) -> Opt {
    let summary = summary.into();
    let invalid = first_invalid(&opts);
    Opt::new("example", move |target, reporter| {
        if target.attribute_mut().is_none() {
            return misplaced("example", &opts, target, reporter);
        }
        let mut ex = ExampleExpr::new(summary);
        apply_within(ExprKind::Example.frame(&ex.summary), opts, &mut ex, reporter)?;
        if let Some(attr) = target.attribute_mut() {
            attr.examples.push(ex);
        }
        Ok(())
    })
    .guarded_by(invalid)
}

/// Sets the value of an example.
pub fn value(value: impl Into<Value>) -> Opt {
    let value = value.into();
    Opt::new("value", move |target, reporter| {
        match target.example_mut() {
            Some(ex) => ex.value = Some(value),
            None => incompatible("value", target, reporter),
        }
        Ok(())
    })
}

// =============================================================================
// Validations
// =============================================================================

fn validation(call: &'static str, rule: impl FnOnce(&mut Validation) + 'static) -> Opt {
    Opt::new(call, move |target, reporter| {
        match target.attribute_mut() {
            Some(attr) => rule(&mut attr.validation),
            None => incompatible(call, target, reporter),
        }
        Ok(())
    })
}

/// Minimum length of a string, bytes, array or map.
pub fn min_length(n: usize) -> Opt {
    validation("min_length", move |v| v.min_length = Some(n))
}

/// Maximum length of a string, bytes, array or map.
pub fn max_length(n: usize) -> Opt {
    validation("max_length", move |v| v.max_length = Some(n))
}

/// Inclusive numeric lower bound.
pub fn minimum(n: impl Into<f64>) -> Opt {
    let n = n.into();
    validation("minimum", move |v| v.minimum = Some(n))
}

/// Inclusive numeric upper bound.
pub fn maximum(n: impl Into<f64>) -> Opt {
    let n = n.into();
    validation("maximum", move |v| v.maximum = Some(n))
}

/// Regular expression the value must match.
pub fn pattern(re: impl Into<String>) -> Opt {
    let re = re.into();
    validation("pattern", move |v| v.pattern = Some(re))
}

/// Restricts the value to the given members.
pub fn enum_values<I, V>(values: I) -> Opt
where
    I: IntoIterator<Item = V>,
    V: Into<Value>,
{
    let values: Vec<Value> = values.into_iter().map(Into::into).collect();
    validation("enum_values", move |v| v.values = values)
}

/// Sets the string format.
pub fn format(format: Format) -> Opt {
    validation("format", move |v| v.format = Some(format))
}
