//! Render context assembly for jinjagen
//!
//! This module owns the data model handed to the template engine: typed
//! key/value namespaces built from heterogeneous sources (JSON value files,
//! the flattened host property document) and merged deterministically into a
//! single context per rendering job.
//!
//! # Data flow
//!
//! 1. Each source produces a [`NamespaceFragment`] — an ordered, unmerged
//!    batch of `(key, value)` pairs ([`values::ValueSourceReader`] for JSON
//!    files, [`flatten::flatten`] for the host property graph).
//! 2. [`assemble`] folds the fragments, in caller order, into one
//!    [`RenderContext`]. Later fragments overwrite earlier keys; collisions
//!    are never an error.
//! 3. The job hands the context to the renderer and discards it afterwards.
//!    Nothing in here is shared across jobs.
//!
//! Values are [`serde_json::Value`]s: text scalars, ordered sequences, or
//! key/value mappings. Scalar coercion to text happens in the producing
//! source, not here.

pub mod flatten;
pub mod values;

use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;

/// An unmerged, ordered batch of key/value pairs produced by one input source.
///
/// Order is preserved so that merging stays deterministic, but keys inside a
/// single fragment are not required to be unique; the last pair for a key
/// wins when the fragment is folded into a [`RenderContext`].
#[derive(Debug, Clone, Default)]
pub struct NamespaceFragment {
    entries: Vec<(String, Value)>,
}

impl NamespaceFragment {
    /// Create an empty fragment.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Append one entry, keeping insertion order.
    pub fn push(&mut self, key: impl Into<String>, value: Value) {
        self.entries.push((key.into(), value));
    }

    /// Iterate entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &(String, Value)> {
        self.entries.iter()
    }

    /// Number of entries in this fragment.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the fragment carries no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(String, Value)> for NamespaceFragment {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

/// The full merged namespace handed to the template engine for one job.
///
/// Keys are unique; insertion order is irrelevant. Constructed fresh per job
/// by [`assemble`] and discarded after rendering.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct RenderContext {
    values: BTreeMap<String, Value>,
}

impl RenderContext {
    /// Look up a top-level key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    /// Number of keys in the context.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the context is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// The underlying key/value map.
    #[must_use]
    pub const fn as_map(&self) -> &BTreeMap<String, Value> {
        &self.values
    }

    /// Resolve a dotted/indexed reference path against the context.
    ///
    /// A literal key match wins first (flattened fragments insert keys that
    /// themselves contain `.` and `[i]`), then the path is walked segment by
    /// segment through nested objects and arrays. Returns `None` when the
    /// path cannot be satisfied either way.
    #[must_use]
    pub fn resolve_path(&self, path: &str) -> Option<&Value> {
        if let Some(value) = self.values.get(path) {
            return Some(value);
        }

        let mut segments = path.split('.');
        let first = segments.next()?;
        let (name, indices) = split_indices(first)?;
        let mut current = self.values.get(name)?;
        for idx in indices {
            current = current.as_array()?.get(idx)?;
        }

        for segment in segments {
            let (name, indices) = split_indices(segment)?;
            current = current.as_object()?.get(name)?;
            for idx in indices {
                current = current.as_array()?.get(idx)?;
            }
        }

        Some(current)
    }
}

/// Split one path segment into its field name and trailing array indices,
/// e.g. `"b[0][2]"` becomes `("b", [0, 2])`.
fn split_indices(segment: &str) -> Option<(&str, Vec<usize>)> {
    match segment.find('[') {
        None => Some((segment, Vec::new())),
        Some(pos) => {
            let name = &segment[..pos];
            let mut indices = Vec::new();
            for part in segment[pos..].split('[').skip(1) {
                let digits = part.strip_suffix(']')?;
                indices.push(digits.parse().ok()?);
            }
            Some((name, indices))
        }
    }
}

/// Merge fragments, in the order given, into one [`RenderContext`].
///
/// A pure, deterministic fold: each subsequent fragment's keys overwrite any
/// existing key of the same name. No validation happens here; each fragment
/// already performed its own.
#[must_use]
pub fn assemble<I>(fragments: I) -> RenderContext
where
    I: IntoIterator<Item = NamespaceFragment>,
{
    let mut values = BTreeMap::new();
    for fragment in fragments {
        for (key, value) in fragment.entries {
            values.insert(key, value);
        }
    }
    RenderContext {
        values,
    }
}
