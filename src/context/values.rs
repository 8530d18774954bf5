//! Value source parsing
//!
//! A value source is a single JSON document whose top-level fields become one
//! [`NamespaceFragment`]. JSON was chosen by the original design for type
//! safety, support for complex types, and human readability.
//!
//! # Type preservation
//!
//! Array and object fields are stored as-is so templates can keep traversing
//! them by index or key. Every other JSON type (string, number, boolean,
//! null) is coerced to its textual representation up front, because the
//! engine's native substitution primitive is text.
//!
//! # Reserved characters
//!
//! Top-level keys must not contain `.` — it is reserved as the flattening
//! path separator (see [`super::flatten`]), and allowing it here would make a
//! literal key indistinguishable from a synthesized nested path.

use anyhow::Result;
use serde_json::Value;
use std::path::Path;
use tracing::debug;

use super::NamespaceFragment;
use crate::core::JinjagenError;

/// Parses JSON value files into namespace fragments.
pub struct ValueSourceReader;

impl ValueSourceReader {
    /// Read one value file and produce a fragment with one entry per
    /// top-level field.
    ///
    /// # Errors
    ///
    /// - [`JinjagenError::Io`] when the file cannot be read
    /// - [`JinjagenError::Parse`] when it is not a single valid JSON object
    /// - [`JinjagenError::InvalidKey`] when a top-level field name contains `.`
    pub fn read(path: &Path) -> Result<NamespaceFragment> {
        let content = std::fs::read_to_string(path).map_err(JinjagenError::Io)?;

        let document: Value =
            serde_json::from_str(&content).map_err(|e| JinjagenError::Parse {
                file: path.display().to_string(),
                reason: e.to_string(),
            })?;

        let Value::Object(fields) = document else {
            return Err(JinjagenError::Parse {
                file: path.display().to_string(),
                reason: "top level of a value file must be a JSON object".to_string(),
            }
            .into());
        };

        let mut fragment = NamespaceFragment::new();
        for (key, value) in fields {
            if key.contains('.') {
                return Err(JinjagenError::InvalidKey {
                    file: path.display().to_string(),
                    key,
                }
                .into());
            }

            debug!("Adding entry [ {key} ] to context.");
            fragment.push(key, coerce(value));
        }

        Ok(fragment)
    }
}

/// Arrays and objects stay structured; everything else becomes text.
fn coerce(value: Value) -> Value {
    match value {
        Value::Array(_) | Value::Object(_) => value,
        other => Value::String(scalar_text(&other)),
    }
}

/// Textual form of a JSON scalar, matching the engine-facing convention used
/// by the flattener: numbers and booleans via their canonical JSON rendering,
/// null as the literal `null`.
pub(crate) fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => "null".to_string(),
        other => other.to_string(),
    }
}
