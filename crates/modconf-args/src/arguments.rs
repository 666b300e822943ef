//! Per-platform compiler argument values.
//!
//! Each platform family has its own argument struct; the shared flags live in
//! [`CommonArguments`] and are embedded (flattened) in every family. Values are
//! plain data: cloning a [`CompilerArguments`] yields a fully independent copy.

use serde::{Deserialize, Serialize};

/// Raw coroutine-state token: feature allowed silently.
pub const ENABLE: &str = "enable";
/// Raw coroutine-state token: feature allowed with a warning.
pub const WARN: &str = "warn";
/// Raw coroutine-state token: feature reported as an error.
pub const ERROR: &str = "error";

/// Flags shared by every platform family.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct CommonArguments {
    /// Source compatibility level, e.g. `"1.1"`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language_version: Option<String>,
    /// Library API level, e.g. `"1.0"`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_version: Option<String>,
    /// Track the newest stable language version instead of the stored one.
    pub auto_advance_language_version: bool,
    /// Track the newest stable API version instead of the stored one.
    pub auto_advance_api_version: bool,
    /// Raw coroutine token: one of [`ENABLE`], [`WARN`], [`ERROR`], or unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coroutines_state: Option<String>,
    pub suppress_warnings: bool,
    pub verbose: bool,
    pub multi_platform: bool,
    pub no_inline: bool,
    /// Compiler plugin jars.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub plugin_classpaths: Vec<String>,
    /// `plugin:<id>:<key>=<value>` options.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub plugin_options: Vec<String>,
    /// Flags the parser could not place for this platform, as written.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub unknown_args: Vec<String>,
    /// Positional (non-flag) arguments, normally source paths.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub free_args: Vec<String>,
}

/// Arguments for the JVM backend.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct JvmArguments {
    #[serde(flatten)]
    pub common: CommonArguments,
    /// Bytecode target, stored as its description (e.g. `"1.8"`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub jvm_target: Option<String>,
    /// Output directory for class files.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub destination: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub classpath: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub module_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub jdk_home: Option<String>,
    pub no_stdlib: bool,
    pub no_reflect: bool,
    pub java_parameters: bool,
}

/// Arguments for the JavaScript backend.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct JsArguments {
    #[serde(flatten)]
    pub common: CommonArguments,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_file: Option<String>,
    pub source_map: bool,
    pub meta_info: bool,
    /// Module system: `plain`, `amd`, `commonjs` or `umd`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub module_kind: Option<String>,
    /// ECMAScript level, e.g. `"v5"`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
    /// Whether to call `main` on startup: `call` or `noCall`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub main: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub libraries: Option<String>,
    pub no_stdlib: bool,
}

/// Arguments for the platform-independent metadata compiler.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct MetadataArguments {
    #[serde(flatten)]
    pub common: CommonArguments,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub destination: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub classpath: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub module_name: Option<String>,
}

/// Structured compiler arguments for one of the platform families.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "platform", rename_all = "kebab-case")]
pub enum CompilerArguments {
    Jvm(JvmArguments),
    Js(JsArguments),
    Metadata(MetadataArguments),
}

impl CompilerArguments {
    /// The shared flags.
    pub fn common(&self) -> &CommonArguments {
        match self {
            CompilerArguments::Jvm(a) => &a.common,
            CompilerArguments::Js(a) => &a.common,
            CompilerArguments::Metadata(a) => &a.common,
        }
    }

    /// Mutable access to the shared flags.
    pub fn common_mut(&mut self) -> &mut CommonArguments {
        match self {
            CompilerArguments::Jvm(a) => &mut a.common,
            CompilerArguments::Js(a) => &mut a.common,
            CompilerArguments::Metadata(a) => &mut a.common,
        }
    }

    /// Short family name used in diagnostics.
    pub fn family(&self) -> &'static str {
        match self {
            CompilerArguments::Jvm(_) => "JVM",
            CompilerArguments::Js(_) => "JavaScript",
            CompilerArguments::Metadata(_) => "metadata",
        }
    }
}
