//! `modconf list`: configured modules.

use std::path::Path;

use anyhow::Result;

use super::open_project;

/// Print each configured module with its platform.
pub fn run(project_dir: &Path) -> Result<()> {
    let project = open_project(project_dir)?;
    let mut empty = true;
    for (module, facet) in project.modules() {
        empty = false;
        let platform = facet
            .target_platform_kind()
            .map(|p| p.to_string())
            .unwrap_or_else(|| "-".to_string());
        println!("  {module:<25} {platform}");
    }
    if empty {
        println!("No modules configured. Use 'modconf init <module>' to add one.");
    }
    Ok(())
}
