//! Integration tests for Layer 2: Declarative builder
//!
//! Tests for argument shapes, nested builders and top-level declarations.

mod nesting;
