//! `modconf platforms`: catalog listing.

use anyhow::Result;
use modconf_targets::{LanguageVersion, TargetPlatformKind};

/// List all platforms in catalog order.
pub fn list() -> Result<()> {
    let default = TargetPlatformKind::default_platform();
    println!("Target platforms:");
    println!();
    for platform in TargetPlatformKind::all_platforms() {
        let marker = if *platform == default { " (default)" } else { "" };
        println!("  {}{marker}", platform);
    }
    println!();
    println!("Language versions:");
    for version in LanguageVersion::ALL {
        println!("  {}", version.description());
    }
    println!();
    println!("Latest stable: {}", LanguageVersion::LATEST_STABLE);
    Ok(())
}
