//! Command-line interface for jinjagen
//!
//! The CLI is a thin binding layer: it locates the manifest, applies
//! command-line overrides to the run-wide switches, sets up logging, and
//! hands the resulting configuration to the [`crate::job::JobRunner`].
//!
//! # Usage
//!
//! ```bash
//! jinjagen                                 # render using ./jinjagen.toml
//! jinjagen --manifest build/render.toml    # explicit manifest
//! jinjagen --overwrite                     # allow replacing existing outputs
//! jinjagen --lenient                       # don't fail on missing values
//! jinjagen --host-properties build.json    # supply the host property document
//! jinjagen --verbose                       # debug logging
//! ```
//!
//! Flags override the corresponding manifest switches; the manifest remains
//! the source of truth for the resource set itself.

use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use crate::job::JobRunner;
use crate::manifest::Manifest;

/// Renders text artifacts from Jinja-family templates and JSON value files.
#[derive(Parser, Debug)]
#[command(name = "jinjagen", version, about, long_about = None)]
pub struct Cli {
    /// Path to the run manifest.
    #[arg(short, long, default_value = "jinjagen.toml")]
    manifest: PathBuf,

    /// Allow replacing output files that already exist.
    ///
    /// Equivalent to `overwrite-output = true` in the manifest.
    #[arg(long)]
    overwrite: bool,

    /// Accept renders with unresolved template references.
    ///
    /// Equivalent to `fail-on-missing-values = false` in the manifest.
    #[arg(long)]
    lenient: bool,

    /// Bypass the entire run with only a diagnostic notice.
    #[arg(long)]
    skip: bool,

    /// Host property document (JSON) flattened into the context of every
    /// resource with `include-host-properties = true`. Overrides the
    /// manifest's `host-properties` path.
    #[arg(long, value_name = "PATH")]
    host_properties: Option<PathBuf>,

    /// Enable verbose output for debugging. Mutually exclusive with --quiet.
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    verbose: bool,

    /// Suppress all output except errors. Mutually exclusive with --verbose.
    #[arg(short, long, global = true)]
    quiet: bool,
}

impl Cli {
    /// Execute the run described by the manifest plus CLI overrides.
    pub fn execute(self) -> Result<()> {
        self.init_logging();

        let mut manifest = Manifest::load(&self.manifest)?;

        if self.overwrite {
            manifest.options.overwrite_output = true;
        }
        if self.lenient {
            manifest.options.fail_on_missing_values = false;
        }
        if self.skip {
            manifest.options.skip = true;
        }
        if let Some(host) = self.host_properties {
            manifest.options.host_properties = Some(host);
        }

        let skipped = manifest.options.skip;
        let reports = JobRunner::new(manifest).run()?;

        if !self.quiet {
            if skipped {
                println!("{}", "Run skipped.".yellow());
            } else {
                println!(
                    "\n{}",
                    format!("Rendered {} resource(s).", reports.len()).green().bold()
                );
                for report in &reports {
                    println!("  {} -> {}", report.template.display(), report.output.display());
                }
            }
        }

        Ok(())
    }

    /// Map `--verbose`/`--quiet` to a tracing filter. `RUST_LOG` wins when
    /// neither flag is set.
    fn init_logging(&self) {
        let filter = if self.verbose {
            EnvFilter::new("debug")
        } else if self.quiet {
            EnvFilter::new("error")
        } else if std::env::var("RUST_LOG").is_ok() {
            EnvFilter::from_default_env()
        } else {
            EnvFilter::new("info")
        };

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .try_init();
    }
}
