//! Blueprint - Declarative API design language
//!
//! This crate re-exports all layers of the Blueprint system for convenient access.
//! For detailed documentation, see the individual layer crates.
//!
//! # Architecture
//!
//! ```text
//! Layer 3: blueprint_eval       — Prepare, Validate, Finalize; frozen Model
//! Layer 2: blueprint_dsl        — Builder primitives, argument shapes, Design
//! Layer 1: blueprint_expr       — Expressions, attribute tree, Root Registry
//! Layer 0: blueprint_foundation — Core types (Value, Error, Diagnostics)
//! ```

pub use blueprint_dsl as dsl;
pub use blueprint_eval as eval;
pub use blueprint_expr as expr;
pub use blueprint_foundation as foundation;

pub use blueprint_eval::{EvalConfig, Evaluator, Model, evaluate, evaluate_with};
