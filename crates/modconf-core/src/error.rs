//! Facet settings error types.

use std::path::PathBuf;

use modconf_args::ArgumentError;

/// Errors that can occur while editing, loading or saving facet settings.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    /// A setting that lives inside the compiler arguments was written while
    /// the module has none.
    #[error("cannot set {setting}: module has no compiler arguments")]
    ArgumentsMissing {
        /// Name of the rejected setting.
        setting: &'static str,
    },

    /// The override text could not be applied.
    #[error("invalid additional arguments: {0}")]
    Arguments(#[from] ArgumentError),

    /// Module names become file names and must be plain.
    #[error("invalid module name: '{name}'")]
    InvalidModuleName { name: String },

    /// Facet file not found.
    #[error("facet file not found: {}", path.display())]
    NotFound { path: PathBuf },

    /// TOML deserialization error.
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// TOML serialization error.
    #[error("TOML serialization error: {0}")]
    TomlSer(#[from] toml::ser::Error),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for settings operations.
pub type Result<T> = std::result::Result<T, SettingsError>;
