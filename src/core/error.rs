//! Error handling for jinjagen
//!
//! This module provides the error types and user-friendly error reporting for
//! the rendering pipeline. The error system is designed around two core
//! principles:
//! 1. **Strongly-typed errors** for precise error handling in code
//! 2. **User-friendly messages** with actionable suggestions for CLI users
//!
//! # Architecture
//!
//! The error system consists of two main types:
//! - [`JinjagenError`] - Enumerated error types for all failure cases
//! - [`ErrorContext`] - Wrapper that adds user-friendly messages and suggestions
//!
//! # Error Categories
//!
//! - **Validation**: [`JinjagenError::Validation`] - bad descriptor or run
//!   configuration, detected pre-flight, never retried
//! - **Value sources**: [`JinjagenError::Parse`] for malformed JSON,
//!   [`JinjagenError::InvalidKey`] for reserved characters in top-level keys
//! - **Locators**: [`JinjagenError::LocatorInit`] - a configured dependency
//!   directory could not be turned into a lookup root
//! - **Rendering**: [`JinjagenError::Render`] - unresolved template
//!   references under strict mode, or engine-level failures
//! - **I/O**: [`JinjagenError::Io`] - read/write failures, converted from
//!   [`std::io::Error`]
//!
//! All errors are terminal for a run: the first one surfaces and processing
//! stops. Use [`user_friendly_error`] to convert any error into a displayable
//! format with contextual suggestions.
//!
//! # Examples
//!
//! ```rust,no_run
//! use jinjagen::core::{JinjagenError, ErrorContext};
//!
//! let error = JinjagenError::Validation {
//!     reason: "'template' path must not be null.".to_string(),
//! };
//! let context = ErrorContext::new(error)
//!     .with_suggestion("Set 'template' on every [[resource]] entry in jinjagen.toml");
//!
//! // Display with colors in terminal
//! context.display();
//! ```

use colored::Colorize;
use std::fmt;
use thiserror::Error;

/// The main error type for jinjagen operations
///
/// Each variant represents one category of the pipeline's error taxonomy and
/// carries a fixed human-readable category message plus the underlying cause
/// detail, suitable for direct display to the operator.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum JinjagenError {
    /// A descriptor or run-level configuration check failed pre-flight.
    #[error("Configuration validation failed: {reason}")]
    Validation {
        /// Human-readable description of the violated rule
        reason: String,
    },

    /// A value source file is not syntactically valid JSON.
    #[error("Invalid JSON in value file '{file}': {reason}")]
    Parse {
        /// Path of the offending value file
        file: String,
        /// Parser diagnostic
        reason: String,
    },

    /// A top-level key in a value source contains the reserved `.` character.
    #[error("Invalid key '{key}' in value file '{file}': keys of value files cannot contain chars in [.]")]
    InvalidKey {
        /// Path of the offending value file
        file: String,
        /// The rejected key
        key: String,
    },

    /// A resource locator could not be constructed from a dependency directory.
    #[error("Error occurred while creating resource locator for '{path}': {reason}")]
    LocatorInit {
        /// The configured lookup root
        path: String,
        /// Why construction failed
        reason: String,
    },

    /// Rendering failed, either inside the engine or because strict mode
    /// found unresolved references. `errors` aggregates every reported
    /// message, comma-joined, in engine-report order.
    #[error("Error occurred during resource rendering of '{template}': {errors}")]
    Render {
        /// Path of the template being rendered
        template: String,
        /// Comma-joined engine diagnostics
        errors: String,
    },

    /// IO error wrapper for std::io errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic error for cases not covered by specific variants
    #[error("{message}")]
    Other {
        /// The error message
        message: String,
    },
}

/// Error context wrapper that adds user-friendly information
///
/// Wraps a [`JinjagenError`] with an optional actionable suggestion and
/// optional extra details. This is what the CLI shows to operators.
#[derive(Debug)]
pub struct ErrorContext {
    /// The underlying error
    pub error: JinjagenError,
    /// Optional suggestion for resolving the error
    pub suggestion: Option<String>,
    /// Optional additional details about the error
    pub details: Option<String>,
}

impl ErrorContext {
    /// Create a new error context with no additional suggestions or details.
    #[must_use]
    pub const fn new(error: JinjagenError) -> Self {
        Self {
            error,
            suggestion: None,
            details: None,
        }
    }

    /// Add a suggestion for resolving the error
    ///
    /// Suggestions should be actionable steps that users can take to resolve
    /// the error. They are displayed in green in the terminal.
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Add additional details explaining the error
    ///
    /// Details provide context about why the error occurred or what it means.
    /// They are displayed in yellow in the terminal.
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Display the error context to stderr with terminal colors
    ///
    /// - Error message: red and bold
    /// - Details: yellow
    /// - Suggestion: green
    pub fn display(&self) {
        eprintln!("{}: {}", "error".red().bold(), self.error);

        if let Some(details) = &self.details {
            eprintln!("{}: {}", "details".yellow(), details);
        }

        if let Some(suggestion) = &self.suggestion {
            eprintln!("{}: {}", "suggestion".green(), suggestion);
        }
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.error)?;

        if let Some(details) = &self.details {
            write!(f, "\nDetails: {details}")?;
        }

        if let Some(suggestion) = &self.suggestion {
            write!(f, "\nSuggestion: {suggestion}")?;
        }

        Ok(())
    }
}

impl std::error::Error for ErrorContext {}

/// Convert any error into a user-friendly [`ErrorContext`]
///
/// Downcasts to [`JinjagenError`] when possible and attaches a suggestion
/// appropriate for the error category. Unrecognized errors pass through with
/// their message intact.
pub fn user_friendly_error(error: anyhow::Error) -> ErrorContext {
    match error.downcast::<JinjagenError>() {
        Ok(err) => {
            let (suggestion, details) = match &err {
                JinjagenError::Validation {
                    ..
                } => (
                    Some("Check the [[resource]] entries in jinjagen.toml"),
                    Some("Validation runs before any rendering; nothing was written"),
                ),
                JinjagenError::Parse {
                    ..
                } => (Some("Value files must each contain a single valid JSON document"), None),
                JinjagenError::InvalidKey {
                    ..
                } => (
                    Some("Rename the key; '.' is reserved as the flattening path separator"),
                    None,
                ),
                JinjagenError::LocatorInit {
                    ..
                } => (Some("Every entry in 'dependency-dirs' must be an existing directory"), None),
                JinjagenError::Render {
                    ..
                } => (
                    Some(
                        "Define the missing variables in a value file, or disable strict \
                         mode with 'fail-on-missing-values = false'",
                    ),
                    None,
                ),
                JinjagenError::Io(_) => {
                    (Some("Check file permissions and that the paths exist"), None)
                }
                _ => (None, None),
            };

            let mut ctx = ErrorContext::new(err);
            if let Some(s) = suggestion {
                ctx = ctx.with_suggestion(s);
            }
            if let Some(d) = details {
                ctx = ctx.with_details(d);
            }
            ctx
        }
        Err(err) => ErrorContext::new(JinjagenError::Other {
            message: format!("{err:#}"),
        }),
    }
}
