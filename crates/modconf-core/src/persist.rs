//! TOML storage for facet settings.
//!
//! Each module's settings live in `facets/<module>.facet.toml` under the
//! project directory. Files without a `version` key predate versioning and
//! load as [`FacetSettings::DEFAULT_VERSION`]; migrating them is left to the
//! caller (see [`FacetSettings::needs_migration`]).

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use modconf_args::CompilerArguments;

use crate::error::{Result, SettingsError};
use crate::facet::{FacetSettings, ModuleKind};
use crate::settings::CompilerSettings;

/// Directory, relative to the project root, holding facet files.
pub const FACETS_DIR: &str = "facets";

/// File suffix of a facet file.
pub const FACET_SUFFIX: &str = ".facet.toml";

/// The stored form of [`FacetSettings`]. The merged arguments are derived and
/// never written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct FacetDocument {
    #[serde(default = "default_document_version")]
    pub version: u32,
    #[serde(default = "default_true")]
    pub use_project_settings: bool,
    #[serde(default)]
    pub kind: ModuleKind,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub implemented_module_names: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub source_set_names: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub production_output_path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub test_output_path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub compiler_arguments: Option<CompilerArguments>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub compiler_settings: Option<CompilerSettings>,
}

fn default_document_version() -> u32 {
    FacetSettings::DEFAULT_VERSION
}

fn default_true() -> bool {
    true
}

impl From<&FacetSettings> for FacetDocument {
    fn from(facet: &FacetSettings) -> Self {
        Self {
            version: facet.version,
            use_project_settings: facet.use_project_settings,
            kind: facet.kind,
            implemented_module_names: facet.implemented_module_names.clone(),
            source_set_names: facet.source_set_names.clone(),
            production_output_path: facet.production_output_path.clone(),
            test_output_path: facet.test_output_path.clone(),
            compiler_arguments: facet.compiler_arguments().cloned(),
            compiler_settings: facet.compiler_settings().cloned(),
        }
    }
}

impl FacetDocument {
    /// Build live settings; the merged arguments are computed here.
    pub fn into_settings(self) -> Result<FacetSettings> {
        let mut facet = FacetSettings::new();
        facet.version = self.version;
        facet.use_project_settings = self.use_project_settings;
        facet.implemented_module_names = self.implemented_module_names;
        facet.production_output_path = self.production_output_path;
        facet.test_output_path = self.test_output_path;
        facet.kind = self.kind;
        facet.source_set_names = self.source_set_names;
        facet.set_compiler_settings(self.compiler_settings)?;
        facet.set_compiler_arguments(self.compiler_arguments);
        if facet.needs_migration() {
            warn!(
                version = facet.version,
                current = FacetSettings::CURRENT_VERSION,
                "facet settings use an old schema version"
            );
        }
        Ok(facet)
    }
}

/// Parse facet settings from a TOML string.
pub fn parse_facet_toml(toml_str: &str) -> Result<FacetSettings> {
    let document: FacetDocument = toml::from_str(toml_str)?;
    document.into_settings()
}

/// Serialize facet settings to pretty TOML.
pub fn facet_to_toml(facet: &FacetSettings) -> Result<String> {
    let toml_str = toml::to_string_pretty(&FacetDocument::from(facet))?;
    Ok(toml_str)
}

/// Load facet settings from a file.
pub fn load_facet_toml(path: &Path) -> Result<FacetSettings> {
    if !path.exists() {
        return Err(SettingsError::NotFound {
            path: path.to_path_buf(),
        });
    }
    debug!(path = %path.display(), "loading facet settings");
    let content = std::fs::read_to_string(path)?;
    parse_facet_toml(&content)
}

/// Write facet settings to a file, creating parent directories.
pub fn save_facet_toml(path: &Path, facet: &FacetSettings) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, facet_to_toml(facet)?)?;
    debug!(path = %path.display(), "saved facet settings");
    Ok(())
}

/// Path of a module's facet file under `project_dir`.
pub fn facet_path(project_dir: &Path, module: &str) -> PathBuf {
    project_dir.join(FACETS_DIR).join(format!("{module}{FACET_SUFFIX}"))
}

/// Discover all facet files in a project's `facets/` directory.
///
/// Returns `(module_name, file_path)` pairs sorted by module name.
pub fn discover_facets(project_dir: &Path) -> Result<Vec<(String, PathBuf)>> {
    let facets_dir = project_dir.join(FACETS_DIR);
    if !facets_dir.is_dir() {
        return Ok(Vec::new());
    }

    let mut facets = Vec::new();
    for entry in std::fs::read_dir(&facets_dir)? {
        let path = entry?.path();
        let module = path
            .file_name()
            .and_then(|n| n.to_str())
            .and_then(|n| n.strip_suffix(FACET_SUFFIX))
            .filter(|m| !m.is_empty())
            .map(String::from);
        if let Some(module) = module {
            facets.push((module, path));
        }
    }
    facets.sort_by(|a, b| a.0.cmp(&b.0));
    Ok(facets)
}
