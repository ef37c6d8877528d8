//! Multi-error collection.
//!
//! A [`Reporter`] accumulates non-fatal diagnostics while a declaration or
//! evaluation pass keeps scanning. The frames pushed onto the reporter name
//! the expression currently being processed, so every diagnostic records
//! exactly which expression it is about.

use std::fmt;

use tracing::trace;

use crate::error::{Error, ErrorContext, ErrorKind};

// =============================================================================
// Diagnostics
// =============================================================================

/// An ordered, non-empty-by-convention list of diagnostics.
///
/// This is the error side of an evaluation run: when returned, no model was
/// produced.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Diagnostics {
    errors: Vec<Error>,
}

impl Diagnostics {
    /// Creates an empty diagnostic list.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of diagnostics.
    #[must_use]
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Returns true if there are no diagnostics.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Appends a diagnostic.
    pub fn push(&mut self, error: Error) {
        self.errors.push(error);
    }

    /// Returns an iterator over the diagnostics.
    pub fn iter(&self) -> impl Iterator<Item = &Error> {
        self.errors.iter()
    }

    /// Returns the diagnostics as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[Error] {
        &self.errors
    }

    /// Counts the diagnostics matching a predicate on their kind.
    #[must_use]
    pub fn count_where(&self, pred: impl Fn(&ErrorKind) -> bool) -> usize {
        self.errors.iter().filter(|e| pred(&e.kind)).count()
    }

    /// Returns true if any diagnostic matches a predicate on its kind.
    #[must_use]
    pub fn any(&self, pred: impl Fn(&ErrorKind) -> bool) -> bool {
        self.errors.iter().any(|e| pred(&e.kind))
    }
}

impl From<Error> for Diagnostics {
    fn from(error: Error) -> Self {
        Self {
            errors: vec![error],
        }
    }
}

impl IntoIterator for Diagnostics {
    type Item = Error;
    type IntoIter = std::vec::IntoIter<Error>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.into_iter()
    }
}

impl<'a> IntoIterator for &'a Diagnostics {
    type Item = &'a Error;
    type IntoIter = std::slice::Iter<'a, Error>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.iter()
    }
}

impl fmt::Display for Diagnostics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.errors.len() {
            0 => write!(f, "no errors"),
            1 => write!(f, "{}", self.errors[0]),
            n => {
                write!(f, "{n} errors:")?;
                for err in &self.errors {
                    write!(f, "\n  {err}")?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for Diagnostics {}

// =============================================================================
// Reporter
// =============================================================================

/// Accumulates diagnostics without interrupting the scan in progress.
#[derive(Debug, Default)]
pub struct Reporter {
    frames: Vec<String>,
    diagnostics: Diagnostics,
}

impl Reporter {
    /// Creates a reporter with no frames and no diagnostics.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Enters an expression. Every diagnostic reported until the matching
    /// [`Reporter::leave`] carries this frame.
    pub fn enter(&mut self, frame: impl Into<String>) {
        self.frames.push(frame.into());
    }

    /// Leaves the innermost expression.
    pub fn leave(&mut self) {
        self.frames.pop();
    }

    /// Runs `f` with `frame` pushed, popping it afterwards.
    pub fn within<T>(&mut self, frame: impl Into<String>, f: impl FnOnce(&mut Self) -> T) -> T {
        self.enter(frame);
        let out = f(self);
        self.leave();
        out
    }

    /// Returns the current context built from the frame stack.
    #[must_use]
    pub fn context(&self) -> ErrorContext {
        ErrorContext {
            stack: self.frames.clone(),
        }
    }

    /// Records a diagnostic, attaching the current frames unless the error
    /// already carries a context.
    pub fn report(&mut self, error: Error) {
        let error = if error.context.is_some() {
            error
        } else {
            let ctx = self.context();
            error.with_context(ctx)
        };
        trace!(%error, "diagnostic reported");
        self.diagnostics.push(error);
    }

    /// Attaches the current frames to an error without recording it.
    #[must_use]
    pub fn locate(&self, error: Error) -> Error {
        if error.context.is_some() {
            error
        } else {
            error.with_context(self.context())
        }
    }

    /// Returns true if any diagnostic was reported.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        !self.diagnostics.is_empty()
    }

    /// Returns the diagnostics collected so far.
    #[must_use]
    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    /// Moves all diagnostics from another reporter into this one.
    pub fn absorb(&mut self, other: Diagnostics) {
        for err in other {
            self.diagnostics.push(err);
        }
    }

    /// Consumes the reporter, returning the collected diagnostics.
    #[must_use]
    pub fn finish(self) -> Diagnostics {
        self.diagnostics
    }
}
