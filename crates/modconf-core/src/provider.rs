//! Per-module lookup of facet settings.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{Result, SettingsError};
use crate::facet::FacetSettings;
use crate::persist::{discover_facets, facet_path, load_facet_toml, save_facet_toml};

/// Source of facet settings keyed by module name.
pub trait FacetSettingsProvider {
    /// Settings for `module`, if it has been configured.
    fn settings(&self, module: &str) -> Option<&FacetSettings>;

    /// Settings for `module`, creating defaults on first access.
    fn initialized_settings(&mut self, module: &str) -> &mut FacetSettings;
}

/// Settings held in memory only.
#[derive(Debug, Clone, Default)]
pub struct InMemoryFacetProvider {
    modules: BTreeMap<String, FacetSettings>,
}

impl InMemoryFacetProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a module's settings, returning the previous ones.
    pub fn insert(&mut self, module: impl Into<String>, facet: FacetSettings) -> Option<FacetSettings> {
        self.modules.insert(module.into(), facet)
    }

    /// Forget a module, e.g. when it is removed or leaves this toolchain.
    pub fn remove(&mut self, module: &str) -> Option<FacetSettings> {
        self.modules.remove(module)
    }

    /// Configured modules in name order.
    pub fn modules(&self) -> impl Iterator<Item = (&str, &FacetSettings)> {
        self.modules.iter().map(|(name, facet)| (name.as_str(), facet))
    }

    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }
}

impl FacetSettingsProvider for InMemoryFacetProvider {
    fn settings(&self, module: &str) -> Option<&FacetSettings> {
        self.modules.get(module)
    }

    fn initialized_settings(&mut self, module: &str) -> &mut FacetSettings {
        self.modules.entry(module.to_string()).or_default()
    }
}

/// Settings backed by a project's `facets/` directory.
///
/// All facet files are read on [`FacetProject::open`]; changes are written
/// back only by [`FacetProject::save`] or [`FacetProject::save_module`].
#[derive(Debug, Clone)]
pub struct FacetProject {
    root: PathBuf,
    modules: InMemoryFacetProvider,
}

impl FacetProject {
    /// Load every facet file under `root`.
    pub fn open(root: &Path) -> Result<Self> {
        let mut modules = InMemoryFacetProvider::new();
        for (module, path) in discover_facets(root)? {
            modules.insert(module, load_facet_toml(&path)?);
        }
        debug!(root = %root.display(), modules = modules.len(), "opened facet project");
        Ok(Self {
            root: root.to_path_buf(),
            modules,
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn modules(&self) -> impl Iterator<Item = (&str, &FacetSettings)> {
        self.modules.modules()
    }

    /// Drop a module and delete its file.
    pub fn remove_module(&mut self, module: &str) -> Result<Option<FacetSettings>> {
        validate_module_name(module)?;
        let removed = self.modules.remove(module);
        let path = facet_path(&self.root, module);
        if path.exists() {
            std::fs::remove_file(&path)?;
        }
        Ok(removed)
    }

    /// Write one module's settings to disk.
    pub fn save_module(&self, module: &str) -> Result<()> {
        validate_module_name(module)?;
        let facet = self.modules.settings(module).ok_or_else(|| SettingsError::NotFound {
            path: facet_path(&self.root, module),
        })?;
        save_facet_toml(&facet_path(&self.root, module), facet)
    }

    /// Write every module's settings to disk.
    pub fn save(&self) -> Result<()> {
        for (module, _) in self.modules.modules() {
            self.save_module(module)?;
        }
        Ok(())
    }
}

impl FacetSettingsProvider for FacetProject {
    fn settings(&self, module: &str) -> Option<&FacetSettings> {
        self.modules.settings(module)
    }

    fn initialized_settings(&mut self, module: &str) -> &mut FacetSettings {
        self.modules.initialized_settings(module)
    }
}

/// Module names become file names, so they must be a single plain path
/// component.
pub fn validate_module_name(module: &str) -> Result<()> {
    let valid = !module.is_empty()
        && module != "."
        && module != ".."
        && !module.contains(['/', '\\'])
        && !module.chars().any(char::is_control);
    if valid {
        Ok(())
    } else {
        Err(SettingsError::InvalidModuleName { name: module.into() })
    }
}
