//! `modconf init`: configure a module with platform defaults.

use std::path::Path;

use anyhow::{bail, Result};
use modconf_args::default_compiler_arguments;
use modconf_core::{FacetSettings, FacetSettingsProvider};
use modconf_targets::TargetPlatformKind;

use super::open_project;

/// Create (or with `force`, replace) a module's settings.
pub fn run(project_dir: &Path, module: &str, platform: Option<&str>, force: bool) -> Result<()> {
    let platform = match platform {
        Some(name) => TargetPlatformKind::by_description(name)?,
        None => TargetPlatformKind::default_platform(),
    };

    let mut project = open_project(project_dir)?;
    if project.settings(module).is_some() && !force {
        bail!("module '{module}' is already configured. Use --force to replace its settings.");
    }

    let facet = project.initialized_settings(module);
    *facet = FacetSettings::new();
    facet.set_compiler_arguments(Some(default_compiler_arguments(&platform)));
    project.save_module(module)?;

    println!("Configured '{module}' for {platform}");
    Ok(())
}
