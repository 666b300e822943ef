//! `modconf show`: print a module's settings and what they resolve to.

use std::path::Path;

use anyhow::{bail, Context, Result};
use modconf_args::to_command_line;
use modconf_core::{facet_to_toml, FacetSettings, FacetSettingsProvider};
use serde_json::json;

use super::open_project;

pub fn run(project_dir: &Path, module: &str, format: Option<&str>) -> Result<()> {
    let project = open_project(project_dir)?;
    let facet = project
        .settings(module)
        .with_context(|| format!("module '{module}' is not configured"))?;

    match format.unwrap_or("human") {
        "human" => print_human(module, facet),
        "toml" => print!("{}", facet_to_toml(facet)?),
        "json" => println!("{}", serde_json::to_string_pretty(&summary(module, facet))?),
        other => bail!("unknown format: '{other}' (expected human, toml, or json)"),
    }
    Ok(())
}

/// JSON view of the stored settings plus everything derived from them.
pub(crate) fn summary(module: &str, facet: &FacetSettings) -> serde_json::Value {
    json!({
        "module": module,
        "version": facet.version,
        "use-project-settings": facet.use_project_settings,
        "kind": facet.kind,
        "platform": facet.target_platform_kind().map(|p| p.to_string()),
        "language-version": facet.language_version_view().map(|v| v.description()),
        "language-level": facet.language_level().map(|v| v.version_string()),
        "api-version": facet.api_version_view().map(|v| v.description()),
        "api-level": facet.api_level().map(|v| v.version_string()),
        "coroutines": facet.coroutine_support(),
        "additional-arguments": facet.override_text(),
        "arguments": facet.compiler_arguments(),
        "merged-command-line": facet.merged_compiler_arguments().map(to_command_line),
    })
}

fn print_human(module: &str, facet: &FacetSettings) {
    println!("=== Module: {module} ===");
    println!("Schema version: {}", facet.version);
    if facet.needs_migration() {
        println!("  (older than current schema version {})", FacetSettings::CURRENT_VERSION);
    }
    println!("Use project settings: {}", facet.use_project_settings);
    println!("Kind: {:?}", facet.kind);
    if !facet.source_set_names.is_empty() {
        println!("Source sets: {}", facet.source_set_names.join(", "));
    }
    println!();

    let Some(arguments) = facet.compiler_arguments() else {
        println!("No compiler arguments configured.");
        return;
    };

    println!("--- Resolved ---");
    match facet.target_platform_kind() {
        Some(platform) => println!("  Platform:         {platform}"),
        None => println!("  Platform:         (unrecognised target)"),
    }
    if let Some(view) = facet.language_version_view() {
        println!("  Language version: {view}");
    }
    if let Some(view) = facet.api_version_view() {
        println!("  API version:      {view}");
    }
    println!("  Coroutines:       {}", facet.coroutine_support());
    println!();

    println!("--- Arguments ({}) ---", arguments.family());
    println!("  {}", to_command_line(arguments).join(" "));
    if let Some(text) = facet.override_text().filter(|t| !t.trim().is_empty()) {
        println!("  Additional: {text}");
    }
    if let Some(merged) = facet.merged_compiler_arguments() {
        println!("  Merged:     {}", to_command_line(merged).join(" "));
    }
}
