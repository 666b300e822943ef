//! `modconf remove`: drop a module's settings.

use std::path::Path;

use anyhow::{bail, Result};

use super::open_project;

pub fn run(project_dir: &Path, module: &str) -> Result<()> {
    let mut project = open_project(project_dir)?;
    if project.remove_module(module)?.is_none() {
        bail!("module '{module}' is not configured");
    }
    println!("Removed settings for '{module}'");
    Ok(())
}
