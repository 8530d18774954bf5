//! Core types and error handling for jinjagen
//!
//! This module forms the foundation of the rendering pipeline's type system.
//! It defines the error taxonomy shared by every stage (validation, value
//! source parsing, locator construction, rendering, output writing) and the
//! user-facing error presentation used by the CLI.
//!
//! # Error Management
//!
//! - **Strongly-typed errors** ([`JinjagenError`]) for precise error handling
//!   in code
//! - **User-friendly contexts** ([`ErrorContext`]) with actionable
//!   suggestions for CLI users
//! - **Automatic conversion** from [`std::io::Error`]
//!
//! Every error is terminal for a run: jinjagen surfaces the first failure and
//! stops, never retrying.

pub mod error;

pub use error::{ErrorContext, JinjagenError, user_friendly_error};
