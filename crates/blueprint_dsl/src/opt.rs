//! Deferred mutations.
//!
//! Every builder primitive returns an [`Opt`]: a closure over the
//! expression it will eventually be applied to. Nothing happens until the
//! enclosing constructor applies it to a freshly created node.

use std::fmt;

use blueprint_expr::Expression;
use blueprint_foundation::{Error, Reporter, Result};

type ApplyFn = Box<dyn FnOnce(&mut dyn Expression, &mut Reporter) -> Result<()>>;

/// A deferred mutation of an expression.
///
/// Applying returns `Err` only for fatal errors; misplaced primitives are
/// reported to the [`Reporter`] and applying continues. An option also
/// remembers the first malformed call nested inside it, so a misplaced
/// parent still fails on it.
#[must_use = "options do nothing until applied to an expression"]
pub struct Opt {
    call: &'static str,
    apply: ApplyFn,
    invalid: Option<Error>,
}

impl Opt {
    /// Wraps a mutation produced by the primitive named `call`.
    pub fn new(
        call: &'static str,
        apply: impl FnOnce(&mut dyn Expression, &mut Reporter) -> Result<()> + 'static,
    ) -> Self {
        Self {
            call,
            apply: Box::new(apply),
            invalid: None,
        }
    }

    /// An option that fails with `error` when applied.
    #[must_use]
    pub fn failed(call: &'static str, error: Error) -> Self {
        let invalid = Some(error.clone());
        Self::new(call, move |_, _| Err(error)).guarded_by(invalid)
    }

    /// Records the malformed call nested inside this option, if any.
    pub(crate) fn guarded_by(mut self, invalid: Option<Error>) -> Self {
        self.invalid = invalid;
        self
    }

    /// Returns the fatal error of the first malformed call within this
    /// option, without applying it.
    #[must_use]
    pub fn invalid(&self) -> Option<&Error> {
        self.invalid.as_ref()
    }

    /// Returns the name of the primitive that produced this option.
    #[must_use]
    pub const fn call(&self) -> &'static str {
        self.call
    }

    /// Applies the mutation. Fatal errors are located with the reporter's
    /// current frames.
    pub fn apply(self, target: &mut dyn Expression, reporter: &mut Reporter) -> Result<()> {
        (self.apply)(target, reporter).map_err(|e| reporter.locate(e))
    }
}

impl fmt::Debug for Opt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Opt").field("call", &self.call).finish_non_exhaustive()
    }
}

/// Applies options in order, stopping at the first fatal error.
pub fn apply_all(opts: Vec<Opt>, target: &mut dyn Expression, reporter: &mut Reporter) -> Result<()> {
    for opt in opts {
        opt.apply(target, reporter)?;
    }
    Ok(())
}

/// Reports that `call` cannot be used inside `target`.
pub(crate) fn incompatible(call: &str, target: &dyn Expression, reporter: &mut Reporter) {
    reporter.report(Error::incompatible_dsl(call, target.kind().keyword()));
}

/// Returns the first malformed call among `opts` and their descendants.
#[must_use]
pub fn first_invalid(opts: &[Opt]) -> Option<Error> {
    opts.iter().find_map(|opt| opt.invalid.clone())
}

/// Handles a parent primitive used in the wrong place: a malformed nested
/// call is still fatal, otherwise the misuse is reported and skipped.
pub(crate) fn misplaced(
    call: &str,
    opts: &[Opt],
    target: &dyn Expression,
    reporter: &mut Reporter,
) -> Result<()> {
    if let Some(err) = first_invalid(opts) {
        return Err(err);
    }
    incompatible(call, target, reporter);
    Ok(())
}

/// Applies options to a child node inside a diagnostic frame.
pub(crate) fn apply_within(
    frame: String,
    opts: Vec<Opt>,
    target: &mut dyn Expression,
    reporter: &mut Reporter,
) -> Result<()> {
    reporter.within(frame, |r| apply_all(opts, target, r))
}
