//! Integration tests for Layer 3: Evaluation
//!
//! Tests for the frozen model, collections and diagnostics of whole designs.

mod collections;
mod diagnostics;
