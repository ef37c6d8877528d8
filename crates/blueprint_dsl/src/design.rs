//! Top-level declarations.
//!
//! A [`Design`] is the declaration context of one evaluation run. It owns a
//! fresh [`RootRegistry`] and the [`Reporter`] that collects non-fatal
//! diagnostics while builders run.

use blueprint_expr::{
    ApiExpr, AttributeExpr, DataType, ExprKind, Expression, ResultTypeExpr, RootExpr,
    RootRegistry, ServiceExpr, UserTypeExpr,
};
use blueprint_foundation::{Diagnostics, Error, ErrorContext, Reporter, Result};
use tracing::trace;

use crate::args::{IntoArgs, parse_attribute_args};
use crate::opt::{Opt, apply_within};

/// Declaration context: registry plus diagnostics.
///
/// Every method returns `Err` only for fatal errors (malformed builder
/// calls); everything else is recorded and surfaces at evaluation.
#[derive(Debug, Default)]
pub struct Design {
    registry: RootRegistry,
    reporter: Reporter,
}

impl Design {
    /// Creates an empty design.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares the API. A design has at most one.
    pub fn api(&mut self, name: impl Into<String>, opts: Vec<Opt>) -> Result<()> {
        let name = non_empty("api", name.into())?;
        let frame = ExprKind::Api.frame(&name);
        self.declare(frame, ApiExpr::new(name), opts, RootExpr::Api)
    }

    /// Declares a service.
    pub fn service(&mut self, name: impl Into<String>, opts: Vec<Opt>) -> Result<()> {
        let name = non_empty("service", name.into())?;
        let frame = ExprKind::Service.frame(&name);
        self.declare(frame, ServiceExpr::new(name), opts, RootExpr::Service)
    }

    /// Declares a user type. Takes the attribute argument shapes; without a
    /// type the user type is an object.
    ///
    /// ```ignore
    /// design.ty("User", vec![attribute("name", STRING), required(["name"])])?;
    /// design.ty("Name", (STRING, "A person's name"))?;
    /// ```
    pub fn ty(&mut self, name: impl Into<String>, args: impl IntoArgs) -> Result<()> {
        let name = non_empty("ty", name.into())?;
        let frame = ExprKind::Type.frame(&name);
        let parsed = parse_attribute_args("ty", args.into_args())
            .map_err(|e| e.with_context(ErrorContext::new().with_frame(frame.clone())))?;
        let mut attr = AttributeExpr::new(parsed.ty.unwrap_or_else(DataType::object));
        attr.description = parsed.description;
        self.declare(frame, UserTypeExpr::new(name, attr), parsed.dsl, RootExpr::Type)
    }

    /// Declares a result type identified by a media-type style identifier.
    pub fn result_type(&mut self, identifier: impl Into<String>, opts: Vec<Opt>) -> Result<()> {
        let identifier = non_empty("result_type", identifier.into())?;
        let frame = ExprKind::ResultType.frame(&identifier);
        self.declare(
            frame,
            ResultTypeExpr::new(identifier),
            opts,
            RootExpr::ResultType,
        )
    }

    /// Declares a collection of the named result type explicitly, e.g. to
    /// give it its own views.
    pub fn collection_of(&mut self, element: impl Into<String>, opts: Vec<Opt>) -> Result<()> {
        let element = non_empty("collection_of", element.into())?;
        let collection = ResultTypeExpr::collection_of(element);
        let frame = ExprKind::ResultType.frame(&collection.identifier);
        self.declare(frame, collection, opts, RootExpr::ResultType)
    }

    fn declare<E: Expression + 'static>(
        &mut self,
        frame: String,
        mut node: E,
        opts: Vec<Opt>,
        wrap: fn(E) -> RootExpr,
    ) -> Result<()> {
        apply_within(frame.clone(), opts, &mut node, &mut self.reporter)?;
        trace!(%frame, "declared");
        if let Err(err) = self.registry.register(wrap(node)) {
            self.reporter
                .report(err.with_context(ErrorContext::new().with_frame(frame)));
        }
        Ok(())
    }

    /// Returns the registry populated so far.
    #[must_use]
    pub const fn registry(&self) -> &RootRegistry {
        &self.registry
    }

    /// Returns the diagnostics recorded so far.
    #[must_use]
    pub fn diagnostics(&self) -> &Diagnostics {
        self.reporter.diagnostics()
    }

    /// Consumes the design, returning its registry and diagnostics.
    #[must_use]
    pub fn into_parts(self) -> (RootRegistry, Diagnostics) {
        (self.registry, self.reporter.finish())
    }
}

fn non_empty(call: &str, name: String) -> Result<String> {
    if name.trim().is_empty() {
        Err(Error::invalid_argument(call, "a non-empty name"))
    } else {
        Ok(name)
    }
}
