//! Integration tests for Layer 0: Foundation
//!
//! Tests for core types: Value, Error, Diagnostics and Reporter.

mod diagnostics;
mod errors;
mod values;
