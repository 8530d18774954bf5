//! Integration test suite for jinjagen
//!
//! End-to-end tests that drive the jinjagen binary through complete runs:
//! manifest loading, validation, context assembly, rendering, and output
//! writing.
//!
//! # Running Integration Tests
//!
//! ```bash
//! cargo test --test integration
//! ```
//!
//! # Test Organization
//!
//! - **render_flow**: successful renders, merge order, host properties,
//!   includes through dependency directories
//! - **validation**: descriptor rejection, overwrite policy, fail-fast runs
//! - **cli**: flag handling, skip, exit codes, error display

// Shared test utilities (from parent tests/ directory)
#[path = "../common/mod.rs"]
mod common;

mod render_flow;
mod validation;
