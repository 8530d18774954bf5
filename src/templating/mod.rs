//! Template rendering engine wrapper
//!
//! This module adapts the minijinja engine to the pipeline's narrow contract:
//! `render(template text, context) -> (output, errors)`. Everything else the
//! engine can do (expression grammar, filters, loops, inheritance) is
//! consumed off the shelf.
//!
//! # Strict vs. lenient resolution
//!
//! The engine itself always renders leniently: an unresolved reference
//! produces empty output for that expression instead of aborting. Alongside
//! the render, the wrapper collects every reference the template uses that
//! the assembled context cannot satisfy and reports them in
//! [`RenderOutcome::errors`]. Detection covers the whole include graph: the
//! top-level template is scanned for undeclared variables, and a strict
//! verification render catches anything that only goes missing inside an
//! included or extended template. The caller decides what the list means;
//! under strict mode a non-empty list fails the job, under lenient mode it is
//! ignored.
//!
//! # Includes and extends
//!
//! References to other named resources resolve through a
//! [`locator::LocatorChain`] installed as the engine's template loader:
//! bundled resources first, then each configured dependency directory in
//! order.

pub mod locator;

use std::sync::Arc;

use anyhow::Result;
use minijinja::{Environment, UndefinedBehavior};

use crate::context::RenderContext;
use crate::core::JinjagenError;
use locator::{LocatorChain, ResourceLocator};

/// Result of one engine invocation: the rendered text plus every unresolved
/// reference diagnostic, in report order.
#[derive(Debug)]
pub struct RenderOutcome {
    /// Rendered output, possibly partially empty under lenient resolution.
    pub output: String,
    /// One message per reference the context could not satisfy.
    pub errors: Vec<String>,
}

/// Per-job rendering engine.
///
/// Constructed fresh for each resource job with that job's locator chain and
/// discarded afterwards; no engine state leaks across jobs.
pub struct Renderer {
    chain: Arc<LocatorChain>,
}

impl Renderer {
    /// Wrap a locator chain for one job.
    #[must_use]
    pub fn new(chain: LocatorChain) -> Self {
        Self {
            chain: Arc::new(chain),
        }
    }

    /// Render `text` against `context`.
    ///
    /// `name` identifies the template in diagnostics (normally its path).
    ///
    /// # Errors
    ///
    /// [`JinjagenError::Render`] when the template cannot be parsed or the
    /// engine fails outright (bad filter, include of an unknown resource,
    /// ...). Unresolved variables are not errors here; they are reported in
    /// the outcome for the caller's policy decision.
    pub fn render(&self, name: &str, text: &str, context: &RenderContext) -> Result<RenderOutcome> {
        let mut env = Environment::new();
        // Chainable keeps nested lookups on undefined values silent as well,
        // so a missing `a.b.c` renders empty instead of aborting the job
        env.set_undefined_behavior(UndefinedBehavior::Chainable);

        let chain = Arc::clone(&self.chain);
        env.set_loader(move |resource: &str| Ok(chain.resolve(resource)));

        let template = env.template_from_str(text).map_err(|e| JinjagenError::Render {
            template: name.to_string(),
            errors: e.to_string(),
        })?;

        let mut errors = unresolved_references(&template, context);

        let output = template
            .render(minijinja::Value::from_serialize(context))
            .map_err(|e| JinjagenError::Render {
                template: name.to_string(),
                errors: e.to_string(),
            })?;

        // `undeclared_variables` only sees the top-level template, so a
        // reference that goes missing inside an included or extended
        // template would slip through. A second render under strict
        // undefined handling covers the whole include graph.
        if errors.is_empty() {
            if let Some(message) = self.strict_render_failure(text, context) {
                errors.push(message);
            }
        }

        Ok(RenderOutcome {
            output,
            errors,
        })
    }

    /// Render once more with strict undefined handling and report the
    /// engine's diagnostic if it trips over an undefined value anywhere in
    /// the include graph. Other error kinds are ignored here; they already
    /// surfaced from the lenient render.
    fn strict_render_failure(&self, text: &str, context: &RenderContext) -> Option<String> {
        let mut env = Environment::new();
        env.set_undefined_behavior(UndefinedBehavior::Strict);

        let chain = Arc::clone(&self.chain);
        env.set_loader(move |resource: &str| Ok(chain.resolve(resource)));

        let template = env.template_from_str(text).ok()?;
        match template.render(minijinja::Value::from_serialize(context)) {
            Ok(_) => None,
            Err(e) if matches!(e.kind(), minijinja::ErrorKind::UndefinedError) => {
                Some(e.to_string())
            }
            Err(_) => None,
        }
    }
}

/// Collect every reference path the template uses that the context cannot
/// resolve, as display-ready messages sorted lexicographically (the engine
/// reports the set unordered).
fn unresolved_references(
    template: &minijinja::Template<'_, '_>,
    context: &RenderContext,
) -> Vec<String> {
    let mut missing: Vec<String> = template
        .undeclared_variables(true)
        .into_iter()
        .filter(|path| context.resolve_path(path).is_none())
        .map(|path| format!("undefined variable '{path}'"))
        .collect();
    missing.sort();
    missing
}
