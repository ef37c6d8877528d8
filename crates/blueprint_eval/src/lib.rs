//! Evaluation of Blueprint designs into a frozen model.
//!
//! This crate provides:
//! - [`evaluate`] and [`evaluate_with`] - Declare a design and evaluate it
//! - [`Evaluator`] - The Prepare, Validate and Finalize phases
//! - [`Model`] - The resolved, read-only result for code generators
//! - [`EvalConfig`] - Canonical defaults applied during Prepare
//!
//! Evaluation either returns a model or every diagnostic found, never both.
//!
//! ```ignore
//! use blueprint_dsl::prelude::*;
//!
//! let model = blueprint_eval::evaluate(|design| {
//!     design.ty("Person", vec![attribute("name", STRING), required(["name"])])
//! })?;
//! assert!(model.user_type("Person").is_some());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod config;
mod finalize;
pub mod model;
mod prepare;
mod validate;

pub use config::EvalConfig;
pub use model::{Model, TypeDecl};

use blueprint_dsl::Design;
use blueprint_foundation::{Diagnostics, Reporter, Result};
use tracing::{debug, warn};

/// Declares a design with `declare` and evaluates it with the default
/// configuration.
///
/// A fatal error returned by `declare` aborts the run; it is the only
/// diagnostic returned.
pub fn evaluate<F>(declare: F) -> std::result::Result<Model, Diagnostics>
where
    F: FnOnce(&mut Design) -> Result<()>,
{
    evaluate_with(EvalConfig::default(), declare)
}

/// Like [`evaluate`], with an explicit configuration.
pub fn evaluate_with<F>(config: EvalConfig, declare: F) -> std::result::Result<Model, Diagnostics>
where
    F: FnOnce(&mut Design) -> Result<()>,
{
    let mut design = Design::new();
    if let Err(err) = declare(&mut design) {
        warn!(%err, "declaration aborted");
        return Err(Diagnostics::from(err));
    }
    Evaluator::new(config).evaluate(design)
}

/// Runs the three evaluation phases over a declared design.
#[derive(Clone, Debug, Default)]
pub struct Evaluator {
    config: EvalConfig,
}

impl Evaluator {
    /// Creates an evaluator.
    #[must_use]
    pub const fn new(config: EvalConfig) -> Self {
        Self { config }
    }

    /// Returns the configuration.
    #[must_use]
    pub const fn config(&self) -> &EvalConfig {
        &self.config
    }

    /// Evaluates `design`.
    ///
    /// Diagnostics recorded while declaring are kept. Validate and Finalize
    /// always run to completion, so the error side lists every problem.
    pub fn evaluate(&self, design: Design) -> std::result::Result<Model, Diagnostics> {
        let (mut registry, declared) = design.into_parts();
        let mut reporter = Reporter::new();
        reporter.absorb(declared);

        prepare::run(&mut registry, &self.config, &mut reporter);
        validate::run(&registry, &mut reporter);
        finalize::run(&mut registry, &mut reporter);

        let diagnostics = reporter.finish();
        if diagnostics.is_empty() {
            debug!(declarations = registry.len(), "evaluation succeeded");
            Ok(Model::new(registry.into_parts()))
        } else {
            debug!(errors = diagnostics.len(), "evaluation failed");
            Err(diagnostics)
        }
    }
}
