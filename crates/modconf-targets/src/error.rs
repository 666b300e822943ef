//! Error types for target and version lookups.

/// Errors that can occur when resolving toolchain names.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TargetError {
    /// The string does not name a known JVM target.
    #[error("unknown JVM target: '{value}'")]
    UnknownJvmTarget {
        /// The rejected input.
        value: String,
    },

    /// The string does not name a known language version.
    #[error("unknown language version: '{value}'")]
    UnknownLanguageVersion {
        /// The rejected input.
        value: String,
    },

    /// No platform in the catalog has this description.
    #[error("unknown platform: '{name}'")]
    UnknownPlatform {
        /// The rejected platform name.
        name: String,
    },
}

/// Result type for target operations.
pub type Result<T> = std::result::Result<T, TargetError>;
