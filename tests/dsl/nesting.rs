//! Integration tests for nested builders
//!
//! Tests capability dispatch, composite elements, examples and metadata.

use blueprint_dsl::prelude::*;
use blueprint_expr::{ApiExpr, AttributeExpr, ResultTypeExpr, UserTypeExpr};
use blueprint_foundation::{ErrorKind, Reporter};

fn user_type(opts: Vec<Opt>) -> (UserTypeExpr, Reporter) {
    let mut ut = UserTypeExpr::new("T", AttributeExpr::object());
    let mut reporter = Reporter::new();
    blueprint_dsl::apply_all(opts, &mut ut, &mut reporter).unwrap();
    (ut, reporter)
}

// =============================================================================
// Attributes
// =============================================================================

#[test]
fn required_after_attribute() {
    let (ut, reporter) = user_type(vec![
        attribute("age", (INT32, vec![minimum(2)])),
        required(["age"]),
    ]);
    assert!(!reporter.has_errors());
    assert!(ut.attribute.ty.is_object());
    assert_eq!(ut.attribute.required(), ["age"]);
    assert_eq!(ut.attribute.field("age").unwrap().validation.minimum, Some(2.0));
}

#[test]
fn required_before_attribute() {
    let (ut, _) = user_type(vec![required(["age"]), attribute("age", INT32)]);
    assert!(ut.attribute.is_required("age"));
    assert!(ut.attribute.has_field("age"));
}

#[test]
fn attributes_group_children() {
    let (ut, _) = user_type(vec![attributes(vec![
        attribute("a", STRING),
        attribute("b", STRING),
    ])]);
    assert_eq!(ut.attribute.fields().len(), 2);
}

#[test]
fn field_records_its_tag() {
    let (ut, _) = user_type(vec![field(3, "id", INT64)]);
    let id = ut.attribute.field("id").unwrap();
    assert_eq!(id.meta.get(META_RPC_TAG).map(String::as_str), Some("3"));
}

#[test]
fn validations_and_examples() {
    let (ut, reporter) = user_type(vec![attribute(
        "email",
        (
            STRING,
            vec![
                format(Format::Email),
                pattern(".+@.+"),
                enum_values(["a@b.c", "d@e.f"]),
                example("a@b.c"),
                example_with("work", vec![description("Work address"), value("d@e.f")]),
            ],
        ),
    )]);
    assert!(!reporter.has_errors());
    let email = ut.attribute.field("email").unwrap();
    assert_eq!(email.validation.format, Some(Format::Email));
    assert_eq!(email.validation.values.len(), 2);
    assert_eq!(email.examples.len(), 2);
    assert_eq!(email.examples[0].summary, "default");
    assert_eq!(email.examples[1].summary, "work");
    assert_eq!(email.examples[1].value, Some(Value::from("d@e.f")));
}

#[test]
fn ty_overrides_the_type() {
    let (ut, _) = user_type(vec![attribute("n", vec![ty(INT32), default(1)])]);
    let n = ut.attribute.field("n").unwrap();
    assert_eq!(n.ty, DataType::Primitive(INT32));
    assert_eq!(n.default, Some(Value::from(1)));
}

// =============================================================================
// Capabilities
// =============================================================================

#[test]
fn misplaced_builders_are_reported_not_fatal() {
    let (ut, reporter) = user_type(vec![
        title("nope"),
        host("h", vec![]),
        attribute("ok", STRING),
    ]);
    assert!(ut.attribute.has_field("ok"));
    let diags = reporter.finish();
    assert_eq!(diags.len(), 2);
    assert!(diags
        .iter()
        .all(|e| matches!(&e.kind, ErrorKind::IncompatibleDsl { parent, .. } if parent == "type")));
}

#[test]
fn attribute_inside_a_scalar_is_incompatible() {
    let (_, reporter) = user_type(vec![attribute(
        "name",
        (STRING, vec![attribute("nested", STRING)]),
    )]);
    let err = &reporter.diagnostics().as_slice()[0];
    assert!(matches!(err.kind, ErrorKind::IncompatibleDsl { .. }));
    assert_eq!(err.context.as_ref().unwrap().subject(), Some("attribute \"name\""));
}

// =============================================================================
// Views and API metadata
// =============================================================================

#[test]
fn views_select_attribute_names() {
    let mut rt = ResultTypeExpr::new("application/vnd.user");
    let mut reporter = Reporter::new();
    blueprint_dsl::apply_all(
        vec![
            attribute("id", STRING),
            attribute("name", STRING),
            view("default", vec![attribute("id", ()), attribute("name", ()), attribute("id", ())]),
            view("", vec![attribute("id", ())]),
        ],
        &mut rt,
        &mut reporter,
    )
    .unwrap();
    assert_eq!(rt.view("default").unwrap().attributes(), ["id", "name"]);
    assert_eq!(rt.views().len(), 2);
}

#[test]
fn api_metadata() {
    let mut api = ApiExpr::new("calc");
    let mut reporter = Reporter::new();
    blueprint_dsl::apply_all(
        vec![
            title("Calculator"),
            description("Adds numbers"),
            version("2.0"),
            terms_of_service("https://example.com/terms"),
            contact(vec![name("Ops"), email("ops@example.com"), url("https://example.com")]),
            license(vec![name("MIT"), url("https://opensource.org/licenses/MIT")]),
            docs(vec![description("Guide"), url("https://example.com/docs")]),
            meta("openapi:example", "false"),
        ],
        &mut api,
        &mut reporter,
    )
    .unwrap();
    assert!(!reporter.has_errors());
    assert_eq!(api.version.as_deref(), Some("2.0"));
    assert_eq!(api.contact.unwrap().email.as_deref(), Some("ops@example.com"));
    assert_eq!(api.license.unwrap().name.as_deref(), Some("MIT"));
    assert_eq!(api.docs.unwrap().description.as_deref(), Some("Guide"));
    assert_eq!(api.meta.get("openapi:example").map(String::as_str), Some("false"));
}
