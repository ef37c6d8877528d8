//! Integration tests for Layer 1: Expressions
//!
//! Tests for data types, the attribute tree, capabilities and the root
//! registry lifecycle.

mod registry;
mod types;
