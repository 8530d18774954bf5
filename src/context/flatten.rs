//! Host property graph flattening
//!
//! Converts an arbitrary nested object graph (the host build descriptor,
//! supplied as a pre-serialized JSON document) into a flat
//! [`NamespaceFragment`] whose keys are dotted/indexed paths. This lets the
//! same text-substitution mechanism reach nested structure without any
//! special template syntax.
//!
//! Every composite node is addressable at its own path in addition to its
//! children, so a field `a.b[0].c` yields four context keys:
//!
//! - `a` — the whole subtree
//! - `a.b` — the array
//! - `a.b[0]` — the element
//! - `a.b[0].c` — the scalar, as text
//!
//! The traversal is recursive, depth-first, and order-preserving. Since the
//! host graph arrives as an already-serialized document, there are no
//! per-field access failures to recover from; a host document whose top level
//! is not an object is skipped with a warning rather than aborting the run.

use serde_json::Value;
use tracing::warn;

use super::NamespaceFragment;
use super::values::scalar_text;

/// Flatten a host property document into a dotted-path fragment.
///
/// The synthetic root carries no key of its own: top-level fields of `root`
/// become the first path components.
#[must_use]
pub fn flatten(root: &Value) -> NamespaceFragment {
    let mut fragment = NamespaceFragment::new();

    match root {
        Value::Object(fields) => {
            for (key, value) in fields {
                flatten_into(key.clone(), value, &mut fragment);
            }
        }
        _ => {
            warn!("Host property document is not a JSON object; skipping it.");
        }
    }

    fragment
}

fn flatten_into(path: String, node: &Value, out: &mut NamespaceFragment) {
    match node {
        Value::Object(fields) => {
            // The materialized subtree stays addressable at its own path
            out.push(path.clone(), node.clone());
            for (key, value) in fields {
                flatten_into(format!("{path}.{key}"), value, out);
            }
        }
        Value::Array(elements) => {
            out.push(path.clone(), node.clone());
            for (i, element) in elements.iter().enumerate() {
                flatten_into(format!("{path}[{i}]"), element, out);
            }
        }
        scalar => {
            out.push(path, Value::String(scalar_text(scalar)));
        }
    }
}
