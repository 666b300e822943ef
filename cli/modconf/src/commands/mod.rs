//! CLI command implementations.

pub mod init;
pub mod list;
pub mod platforms;
pub mod remove;
pub mod set;
pub mod show;

use std::path::Path;

use anyhow::{Context, Result};
use modconf_core::FacetProject;
use tracing::debug;

/// Open the facet project rooted at `project_dir`.
pub(crate) fn open_project(project_dir: &Path) -> Result<FacetProject> {
    debug!(dir = %project_dir.display(), "opening project");
    FacetProject::open(project_dir)
        .with_context(|| format!("reading facet settings in {}", project_dir.display()))
}
