//! Resource locator chain for template includes and extends
//!
//! When a template references another named resource (`{% include %}`,
//! `{% extends %}`), the engine consults an ordered chain of lookup
//! strategies: bundled resources first, then each configured dependency
//! directory in the order supplied. The first strategy that knows the name
//! wins.
//!
//! Each strategy implements [`ResourceLocator`], so bundled defaults and
//! per-directory lookups can be substituted or tested independently.

use std::collections::HashMap;
use std::path::{Component, Path, PathBuf};

use anyhow::Result;

use crate::core::JinjagenError;

/// Resources compiled into the binary, consulted before any configured
/// directory. Templates can include them by name, e.g.
/// `{% include "builtin/generated-header.txt" %}`.
const BUNDLED: &[(&str, &str)] =
    &[("builtin/generated-header.txt", "Generated by jinjagen. Do not edit.\n")];

/// One lookup strategy in the chain.
pub trait ResourceLocator: Send + Sync {
    /// Resolve a resource name to its content, or report not-found.
    fn resolve(&self, name: &str) -> Option<String>;
}

/// In-memory locator over a fixed name→content table.
///
/// Backs the bundled resource set; tests also use it to stand in for
/// directories.
#[derive(Debug, Default)]
pub struct StaticLocator {
    entries: HashMap<String, String>,
}

impl StaticLocator {
    /// Build a locator from explicit entries.
    pub fn new<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            entries: entries.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }

    /// The resources shipped inside the jinjagen binary.
    #[must_use]
    pub fn bundled() -> Self {
        Self::new(BUNDLED.iter().copied())
    }
}

impl ResourceLocator for StaticLocator {
    fn resolve(&self, name: &str) -> Option<String> {
        self.entries.get(name).cloned()
    }
}

/// File-system locator rooted at one existing directory.
#[derive(Debug)]
pub struct DirLocator {
    root: PathBuf,
}

impl DirLocator {
    /// Create a locator for `root`.
    ///
    /// # Errors
    ///
    /// [`JinjagenError::LocatorInit`] if `root` does not exist or is not a
    /// directory.
    pub fn new(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        if !root.exists() {
            return Err(JinjagenError::LocatorInit {
                path: root.display().to_string(),
                reason: "directory does not exist".to_string(),
            }
            .into());
        }
        if !root.is_dir() {
            return Err(JinjagenError::LocatorInit {
                path: root.display().to_string(),
                reason: "path is not a directory".to_string(),
            }
            .into());
        }
        Ok(Self {
            root,
        })
    }
}

impl ResourceLocator for DirLocator {
    fn resolve(&self, name: &str) -> Option<String> {
        // Resource names must stay inside the lookup root
        let relative = Path::new(name);
        if relative.components().any(|c| !matches!(c, Component::Normal(_))) {
            return None;
        }

        let candidate = self.root.join(relative);
        if candidate.is_file() { std::fs::read_to_string(candidate).ok() } else { None }
    }
}

/// Ordered chain of locators; first existing match wins.
pub struct LocatorChain {
    locators: Vec<Box<dyn ResourceLocator>>,
}

impl LocatorChain {
    /// A chain holding only the bundled resources.
    #[must_use]
    pub fn new() -> Self {
        Self {
            locators: vec![Box::new(StaticLocator::bundled())],
        }
    }

    /// Build the chain for one rendering job: bundled resources first, then
    /// a [`DirLocator`] per dependency directory, in the order supplied.
    ///
    /// # Errors
    ///
    /// [`JinjagenError::LocatorInit`] for the first directory that cannot be
    /// turned into a lookup root.
    pub fn with_dirs<P: AsRef<Path>>(dirs: &[P]) -> Result<Self> {
        let mut chain = Self::new();
        for dir in dirs {
            chain.push(Box::new(DirLocator::new(dir.as_ref())?));
        }
        Ok(chain)
    }

    /// Append a locator at the end of the chain.
    pub fn push(&mut self, locator: Box<dyn ResourceLocator>) {
        self.locators.push(locator);
    }
}

impl Default for LocatorChain {
    fn default() -> Self {
        Self::new()
    }
}

// Not derivable: the chain holds trait objects.
impl std::fmt::Debug for LocatorChain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LocatorChain").field("locators", &self.locators.len()).finish()
    }
}

impl ResourceLocator for LocatorChain {
    fn resolve(&self, name: &str) -> Option<String> {
        self.locators.iter().find_map(|locator| locator.resolve(name))
    }
}
