//! Resource jobs and run orchestration
//!
//! A [`ResourceJob`] carries one descriptor through its lifecycle:
//!
//! ```text
//! PENDING -> VALIDATED -> RENDERED -> WRITTEN        (success)
//! PENDING | VALIDATED | RENDERED -> FAILED           (terminal, typed error)
//! ```
//!
//! The [`JobRunner`] processes the resource set strictly one job at a time,
//! in the order supplied, and halts at the first failure. Outputs already
//! written before a failing job keep their content; there is no rollback.
//!
//! The only state shared across jobs is the host property fragment: computed
//! lazily the first time a job requests it, then reused by value for the
//! rest of the run.

use anyhow::Result;
use serde_json::Value;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::context::flatten::flatten;
use crate::context::values::ValueSourceReader;
use crate::context::{NamespaceFragment, assemble};
use crate::core::JinjagenError;
use crate::manifest::{Manifest, ResourceDescriptor, RunOptions};
use crate::templating::Renderer;
use crate::templating::locator::LocatorChain;
use crate::utils::fs::{read_text_file, safe_write};

/// Lifecycle state of one rendering job.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobState {
    /// Created, nothing checked yet.
    Pending,
    /// Descriptor passed the pre-flight checks.
    Validated,
    /// Context assembled and engine invoked successfully.
    Rendered,
    /// Output written; terminal success.
    Written,
    /// Terminal failure at any earlier state.
    Failed,
}

/// Summary of one successfully written job.
#[derive(Debug, Clone)]
pub struct JobReport {
    /// Template that was rendered.
    pub template: PathBuf,
    /// Where the output landed.
    pub output: PathBuf,
    /// Size of the rendered output in bytes.
    pub bytes: usize,
}

/// One unit of work: validate -> assemble context -> render -> write.
pub struct ResourceJob<'run> {
    descriptor: &'run ResourceDescriptor,
    options: &'run RunOptions,
    state: JobState,
}

impl<'run> ResourceJob<'run> {
    /// Create a pending job for `descriptor` under the run's options.
    #[must_use]
    pub const fn new(descriptor: &'run ResourceDescriptor, options: &'run RunOptions) -> Self {
        Self {
            descriptor,
            options,
            state: JobState::Pending,
        }
    }

    /// Current lifecycle state.
    #[must_use]
    pub const fn state(&self) -> JobState {
        self.state
    }

    /// Drive the job to completion. `host` is the run's flattened host
    /// property fragment when this descriptor requests it.
    ///
    /// On any error the job lands in [`JobState::Failed`] and the typed
    /// error propagates to the runner.
    pub fn run(&mut self, host: Option<&NamespaceFragment>) -> Result<JobReport> {
        match self.execute(host) {
            Ok(report) => Ok(report),
            Err(e) => {
                self.state = JobState::Failed;
                Err(e)
            }
        }
    }

    fn execute(&mut self, host: Option<&NamespaceFragment>) -> Result<JobReport> {
        self.validate()?;
        let rendered = self.render(host)?;
        self.write(&rendered)
    }

    /// Pre-flight checks, in order; the first violation wins.
    fn validate(&mut self) -> Result<()> {
        let template = require_path("template", self.descriptor.template.as_deref())?;
        validate_input_file("template", template)?;

        if !self.descriptor.include_host_properties && self.descriptor.values.is_empty() {
            return Err(JinjagenError::Validation {
                reason: "'values' must be defined with at least 1 path or set \
                         'include-host-properties' to true."
                    .to_string(),
            }
            .into());
        }

        for value in &self.descriptor.values {
            validate_input_file("value file", value)?;
        }

        let output = require_path("output", self.descriptor.output.as_deref())?;
        self.validate_output(output)?;

        for dir in &self.descriptor.dependency_dirs {
            validate_dependency_dir(dir)?;
        }

        self.state = JobState::Validated;
        Ok(())
    }

    /// Output rules differ from input files: the path may be new, but an
    /// existing file is only replaced when the run allows it.
    fn validate_output(&self, output: &Path) -> Result<()> {
        if output.exists() {
            if output.is_dir() {
                return Err(JinjagenError::Validation {
                    reason: format!("'output' path '{}' must be a file.", output.display()),
                }
                .into());
            }

            if !self.options.overwrite_output {
                return Err(JinjagenError::Validation {
                    reason: "Overwriting output files has been disabled in the run config. \
                             Set 'overwrite-output' to true to allow this."
                        .to_string(),
                }
                .into());
            }

            warn!("'output' path '{}' already exists and will be overwritten.", output.display());
        }
        Ok(())
    }

    /// Assemble the context (host fragment first, then each value file in
    /// descriptor order) and invoke the engine. Under strict mode any
    /// unresolved reference fails the job with the aggregated engine report.
    fn render(&mut self, host: Option<&NamespaceFragment>) -> Result<String> {
        let template = require_path("template", self.descriptor.template.as_deref())?;
        let text = read_text_file(template)?;

        let mut fragments = Vec::new();
        if let Some(host) = host {
            info!("Adding host properties to context.");
            fragments.push(host.clone());
        }
        for value in &self.descriptor.values {
            fragments.push(ValueSourceReader::read(value)?);
        }
        let context = assemble(fragments);

        let chain = LocatorChain::with_dirs(&self.descriptor.dependency_dirs)?;
        let renderer = Renderer::new(chain);
        let outcome = renderer.render(&template.display().to_string(), &text, &context)?;

        if !outcome.errors.is_empty() && self.options.fail_on_missing_values {
            return Err(JinjagenError::Render {
                template: template.display().to_string(),
                errors: outcome.errors.join(","),
            }
            .into());
        }

        self.state = JobState::Rendered;
        Ok(outcome.output)
    }

    /// Write the rendered text to the output path, fully replacing any
    /// existing content.
    fn write(&mut self, rendered: &str) -> Result<JobReport> {
        let template = require_path("template", self.descriptor.template.as_deref())?;
        let output = require_path("output", self.descriptor.output.as_deref())?;

        safe_write(output, rendered)?;

        self.state = JobState::Written;
        Ok(JobReport {
            template: template.to_path_buf(),
            output: output.to_path_buf(),
            bytes: rendered.len(),
        })
    }
}

fn require_path<'a>(key: &str, path: Option<&'a Path>) -> Result<&'a Path> {
    path.ok_or_else(|| {
        JinjagenError::Validation {
            reason: format!("'{key}' path must not be null."),
        }
        .into()
    })
}

fn validate_input_file(key: &str, path: &Path) -> Result<()> {
    if !path.exists() {
        return Err(JinjagenError::Validation {
            reason: format!("Provided {key} at location '{}' does not exist.", path.display()),
        }
        .into());
    }
    if !path.is_file() {
        return Err(JinjagenError::Validation {
            reason: format!("Provided {key} at location '{}' must be a file.", path.display()),
        }
        .into());
    }
    Ok(())
}

fn validate_dependency_dir(dir: &Path) -> Result<()> {
    if !dir.exists() {
        return Err(JinjagenError::Validation {
            reason: format!(
                "Provided dependency dir at location '{}' does not exist.",
                dir.display()
            ),
        }
        .into());
    }
    if dir.is_file() {
        return Err(JinjagenError::Validation {
            reason: format!(
                "Provided dependency dir at location '{}' must be a directory.",
                dir.display()
            ),
        }
        .into());
    }
    Ok(())
}

/// Sequential, fail-fast executor for a whole resource set.
pub struct JobRunner {
    manifest: Manifest,
    host_fragment: Option<NamespaceFragment>,
}

impl JobRunner {
    /// Create a runner for a parsed manifest.
    #[must_use]
    pub const fn new(manifest: Manifest) -> Self {
        Self {
            manifest,
            host_fragment: None,
        }
    }

    /// Process every resource in order, halting at the first failure.
    ///
    /// Returns one [`JobReport`] per written output. A skipped run returns
    /// an empty list.
    pub fn run(&mut self) -> Result<Vec<JobReport>> {
        debug!("Run begins.");

        if self.manifest.options.skip {
            warn!("Run is skipped as skip=true");
            return Ok(Vec::new());
        }

        if self.manifest.resources.is_empty() {
            return Err(JinjagenError::Validation {
                reason: "'resource' must be defined with at least 1 resource.".to_string(),
            }
            .into());
        }

        print_config(&self.manifest);

        info!("Starting resource rendering process.");

        let mut reports = Vec::with_capacity(self.manifest.resources.len());
        let options = &self.manifest.options;
        let host_cache = &mut self.host_fragment;

        for descriptor in &self.manifest.resources {
            debug!("Rendering resource {}", descriptor.describe());

            let host = if descriptor.include_host_properties {
                Some(host_fragment(host_cache, options)?)
            } else {
                None
            };

            let mut job = ResourceJob::new(descriptor, options);
            let report = job.run(host)?;
            debug!("Wrote {} bytes to '{}'", report.bytes, report.output.display());
            reports.push(report);
        }

        info!("Resource rendering process is complete.");
        debug!("Run ends.");
        Ok(reports)
    }
}

/// Lazily compute the run-wide host property fragment.
///
/// Read and flattened once; every later job that requests host properties
/// reuses the cached fragment. Without a host document the fragment is empty
/// and a warning is logged (once, since the cache is filled either way).
fn host_fragment<'a>(
    cache: &'a mut Option<NamespaceFragment>,
    options: &RunOptions,
) -> Result<&'a NamespaceFragment> {
    let fragment = match cache.take() {
        Some(fragment) => fragment,
        None => match &options.host_properties {
            Some(path) => {
                debug!("Reading host property document '{}'", path.display());
                let content = std::fs::read_to_string(path).map_err(JinjagenError::Io)?;
                let document: Value =
                    serde_json::from_str(&content).map_err(|e| JinjagenError::Parse {
                        file: path.display().to_string(),
                        reason: e.to_string(),
                    })?;
                flatten(&document)
            }
            None => {
                warn!(
                    "No host property document supplied; resources with \
                     include-host-properties=true get an empty host fragment."
                );
                NamespaceFragment::new()
            }
        },
    };

    Ok(cache.insert(fragment))
}

/// Dump the effective run configuration at debug level. Serialization
/// failures are only a warning.
fn print_config(manifest: &Manifest) {
    match serde_json::to_string_pretty(manifest) {
        Ok(json) => debug!("Run config:\n{json}"),
        Err(e) => warn!("Unable to print config: {e}"),
    }
}
