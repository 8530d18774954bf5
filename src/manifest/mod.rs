//! Manifest parsing for jinjagen runs.
//!
//! The manifest (`jinjagen.toml`) is how the invoking environment hands
//! jinjagen its work: run-wide switches plus an ordered list of resource
//! descriptors, each one rendering job.
//!
//! # Format
//!
//! ```toml
//! skip = false                    # bypass the whole run
//! fail-on-missing-values = true   # strict mode, run-wide
//! overwrite-output = false        # allow replacing existing outputs
//! host-properties = "build.json"  # optional host property document
//!
//! [[resource]]
//! template = "templates/app.conf.j2"
//! values = ["values/base.json", "values/prod.json"]
//! output = "out/app.conf"
//! include-host-properties = true
//! dependency-dirs = ["templates/partials"]
//! ```
//!
//! Relative paths are resolved against the manifest's own directory at load
//! time, so a run behaves the same from any working directory. Semantics of
//! each field (existence and type requirements, defaults, the
//! at-least-one-data-source invariant) are enforced by the job validation
//! pass, not here — this module only gets the descriptors off disk.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::core::JinjagenError;

const fn default_true() -> bool {
    true
}

/// Run-wide switches, shared by every job in the run.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct RunOptions {
    /// Bypass the entire pipeline with only a diagnostic notice.
    pub skip: bool,
    /// Strict mode: any unresolved template reference fails the job.
    pub fail_on_missing_values: bool,
    /// Permit replacing an output file that already exists.
    pub overwrite_output: bool,
    /// Optional pre-serialized host property document (JSON), flattened once
    /// per run and shared by every job that requests it.
    pub host_properties: Option<PathBuf>,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            skip: false,
            fail_on_missing_values: true,
            overwrite_output: false,
            host_properties: None,
        }
    }
}

/// One rendering unit: a template, its data sources, and its output target.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ResourceDescriptor {
    /// Path to the template file. This can be any text file.
    pub template: Option<PathBuf>,

    /// Ordered paths of zero or more value files. Each must be valid JSON.
    #[serde(default)]
    pub values: Vec<PathBuf>,

    /// Path the rendered output is written to. May or may not exist already;
    /// replacement is gated by the run's overwrite switch.
    pub output: Option<PathBuf>,

    /// Whether the flattened host property fragment is merged into this
    /// job's context (before the value files, which override it).
    #[serde(default = "default_true")]
    pub include_host_properties: bool,

    /// Ordered directories searched for templates referenced by include or
    /// extends. Each must exist and be a directory.
    #[serde(default)]
    pub dependency_dirs: Vec<PathBuf>,
}

impl Default for ResourceDescriptor {
    fn default() -> Self {
        Self {
            template: None,
            values: Vec::new(),
            output: None,
            include_host_properties: true,
            dependency_dirs: Vec::new(),
        }
    }
}

impl ResourceDescriptor {
    /// Short display form for log lines.
    #[must_use]
    pub fn describe(&self) -> String {
        let path =
            |p: &Option<PathBuf>| p.as_deref().map_or("<unset>".to_string(), |p| p.display().to_string());
        format!("template '{}' -> output '{}'", path(&self.template), path(&self.output))
    }
}

/// The parsed manifest: run options plus the ordered resource set.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Manifest {
    /// Run-wide switches.
    #[serde(flatten)]
    pub options: RunOptions,

    /// Ordered resource set; each entry is processed as one sequential job.
    #[serde(default, rename = "resource")]
    pub resources: Vec<ResourceDescriptor>,
}

impl Manifest {
    /// Load and parse a manifest from a TOML file.
    ///
    /// Relative paths inside the manifest are anchored to the manifest's
    /// directory. Structural problems (unreadable file, invalid TOML) are
    /// reported as validation failures; per-descriptor path checks happen
    /// later in the pre-flight validation pass.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| JinjagenError::Validation {
            reason: format!("cannot read manifest '{}': {e}", path.display()),
        })?;

        let mut manifest: Self =
            toml::from_str(&content).map_err(|e| JinjagenError::Validation {
                reason: format!("invalid manifest '{}': {e}", path.display()),
            })?;

        if let Some(base) = path.parent() {
            manifest.anchor(base);
        }

        Ok(manifest)
    }

    /// Resolve every relative path in the manifest against `base`.
    pub fn anchor(&mut self, base: &Path) {
        if let Some(host) = &mut self.options.host_properties {
            *host = anchored(base, host);
        }
        for resource in &mut self.resources {
            if let Some(template) = &mut resource.template {
                *template = anchored(base, template);
            }
            if let Some(output) = &mut resource.output {
                *output = anchored(base, output);
            }
            for value in &mut resource.values {
                *value = anchored(base, value);
            }
            for dir in &mut resource.dependency_dirs {
                *dir = anchored(base, dir);
            }
        }
    }
}

fn anchored(base: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() { path.to_path_buf() } else { base.join(path) }
}
