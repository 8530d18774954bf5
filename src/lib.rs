//! jinjagen - template-driven text artifact generation
//!
//! jinjagen renders concrete text files from Jinja-family templates plus one
//! or more externally supplied data sources. Users point a manifest at
//! template file(s) and corresponding JSON value file(s); when a run
//! executes, values are substituted into the templates and concrete outputs
//! are written at the configured locations.
//!
//! # Pipeline
//!
//! Each resource in the manifest is one sequential job:
//!
//! 1. **Validate** the descriptor (template and value files exist, output is
//!    writable under the overwrite policy, dependency dirs are directories)
//! 2. **Assemble** the render context: the flattened host property fragment
//!    first (if requested), then each value file in order, last write wins
//! 3. **Render** through the engine, with includes/extends resolved against
//!    an ordered locator chain (bundled resources, then dependency dirs)
//! 4. **Write** the output as UTF-8, fully replacing any existing content
//!
//! A run is fail-fast: the first validation or rendering failure halts the
//! remaining resources. Outputs already written stay on disk.
//!
//! # Strictness
//!
//! With `fail-on-missing-values = true` (the default), any template
//! reference the context cannot satisfy fails the job with every unresolved
//! reference aggregated into one error. With it off, unresolved references
//! render as empty text.
//!
//! # Core Modules
//!
//! - [`cli`] - Command-line interface and run assembly
//! - [`context`] - Namespace fragments, flattening, and context assembly
//! - [`core`] - Error taxonomy and user-facing error display
//! - [`job`] - Per-resource job lifecycle and the fail-fast runner
//! - [`manifest`] - `jinjagen.toml` parsing
//! - [`templating`] - Engine wrapper and the resource locator chain
//! - [`utils`] - Atomic file operations
//!
//! # Example
//!
//! ```toml
//! # jinjagen.toml
//! [[resource]]
//! template = "templates/app.conf.j2"
//! values = ["values/prod.json"]
//! output = "out/app.conf"
//! include-host-properties = false
//! ```
//!
//! ```bash
//! jinjagen --manifest jinjagen.toml
//! ```

pub mod cli;
pub mod context;
pub mod core;
pub mod job;
pub mod manifest;
pub mod templating;
pub mod utils;
