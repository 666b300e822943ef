//! Compilation target kinds and the process-wide platform catalog.
//!
//! The catalog is assembled once from [`JvmTarget::ALL`] and never changes
//! afterwards, so lookups hand out `'static` slices.

use std::fmt;
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

use crate::error::{Result, TargetError};
use crate::jvm::JvmTarget;

/// The kind of platform a module is compiled for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "version", rename_all = "kebab-case")]
pub enum TargetPlatformKind {
    /// JVM bytecode at a specific target version.
    Jvm(JvmTarget),
    /// JavaScript output.
    JavaScript,
    /// Platform-independent metadata for multiplatform projects.
    Common,
}

static JVM_PLATFORMS: OnceLock<Vec<TargetPlatformKind>> = OnceLock::new();
static ALL_PLATFORMS: OnceLock<Vec<TargetPlatformKind>> = OnceLock::new();

impl TargetPlatformKind {
    /// Every JVM platform, ordered by target version.
    pub fn jvm_platforms() -> &'static [TargetPlatformKind] {
        JVM_PLATFORMS.get_or_init(|| JvmTarget::ALL.into_iter().map(TargetPlatformKind::Jvm).collect())
    }

    /// All JVM platforms, then JavaScript, then Common.
    pub fn all_platforms() -> &'static [TargetPlatformKind] {
        ALL_PLATFORMS.get_or_init(|| {
            let mut all = Self::jvm_platforms().to_vec();
            all.push(TargetPlatformKind::JavaScript);
            all.push(TargetPlatformKind::Common);
            all
        })
    }

    /// The catalog entry for a JVM target.
    pub fn jvm(version: JvmTarget) -> TargetPlatformKind {
        Self::jvm_platforms()[version.ordinal()]
    }

    /// The platform used when a module does not pick one.
    pub fn default_platform() -> TargetPlatformKind {
        Self::jvm(JvmTarget::DEFAULT)
    }

    /// Platform family name.
    pub fn name(&self) -> &'static str {
        match self {
            TargetPlatformKind::Jvm(_) => "JVM",
            TargetPlatformKind::JavaScript => "JavaScript",
            TargetPlatformKind::Common => "Common (experimental)",
        }
    }

    /// Version part of the description; empty for unversioned platforms.
    pub fn version_description(&self) -> &'static str {
        match self {
            TargetPlatformKind::Jvm(target) => target.description(),
            TargetPlatformKind::JavaScript | TargetPlatformKind::Common => "",
        }
    }

    /// Full description, e.g. `"JVM 1.8"`.
    pub fn description(&self) -> String {
        format!("{} {}", self.name(), self.version_description())
    }

    /// Find a catalog entry by its description, ignoring case and surrounding
    /// whitespace. Short forms `jvm-1.8`, `js` and `common` are accepted too.
    pub fn by_description(name: &str) -> Result<TargetPlatformKind> {
        let wanted = name.trim().to_ascii_lowercase();
        let short = |p: &TargetPlatformKind| match p {
            TargetPlatformKind::Jvm(t) => format!("jvm-{}", t.description()),
            TargetPlatformKind::JavaScript => "js".to_string(),
            TargetPlatformKind::Common => "common".to_string(),
        };
        Self::all_platforms()
            .iter()
            .find(|p| p.description().trim().to_ascii_lowercase() == wanted || short(p) == wanted)
            .copied()
            .ok_or_else(|| TargetError::UnknownPlatform { name: name.into() })
    }
}

impl fmt::Display for TargetPlatformKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description().trim_end())
    }
}
