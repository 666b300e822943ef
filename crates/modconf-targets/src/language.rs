//! Language versions and version-gated language features.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TargetError;

/// A language (or API) level understood by the toolchain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum LanguageVersion {
    /// Language level 1.0.
    #[serde(rename = "1.0")]
    V1_0,
    /// Language level 1.1.
    #[serde(rename = "1.1")]
    V1_1,
    /// Language level 1.2 (pre-release).
    #[serde(rename = "1.2")]
    V1_2,
}

impl LanguageVersion {
    /// Newest version the toolchain considers stable.
    pub const LATEST_STABLE: LanguageVersion = LanguageVersion::V1_1;

    /// Every version, oldest first.
    pub const ALL: [LanguageVersion; 3] = [
        LanguageVersion::V1_0,
        LanguageVersion::V1_1,
        LanguageVersion::V1_2,
    ];

    /// Short `major.minor` form, e.g. `"1.1"`.
    pub fn version_string(&self) -> &'static str {
        match self {
            LanguageVersion::V1_0 => "1.0",
            LanguageVersion::V1_1 => "1.1",
            LanguageVersion::V1_2 => "1.2",
        }
    }

    /// Whether this version has been released as stable.
    pub fn is_stable(&self) -> bool {
        *self <= Self::LATEST_STABLE
    }

    /// Human-readable description; pre-release versions are flagged.
    pub fn description(&self) -> String {
        if self.is_stable() {
            self.version_string().to_string()
        } else {
            format!("{} (EXPERIMENTAL)", self.version_string())
        }
    }

    /// Exact lookup by `major.minor` string.
    pub fn from_version_string(s: &str) -> Option<LanguageVersion> {
        Self::ALL.into_iter().find(|v| v.version_string() == s)
    }

    /// Lookup by a full version string such as `"1.1.0"` or `"1.1.2-rc"`.
    ///
    /// Only the `major.minor` prefix is significant.
    pub fn from_full_version_string(s: &str) -> Option<LanguageVersion> {
        if let Ok(v) = semver::Version::parse(s) {
            return Self::from_version_string(&format!("{}.{}", v.major, v.minor));
        }
        let mut parts = s.split(['.', '-']);
        match (parts.next(), parts.next()) {
            (Some(major), Some(minor)) => Self::from_version_string(&format!("{major}.{minor}")),
            _ => None,
        }
    }
}

impl fmt::Display for LanguageVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.version_string())
    }
}

impl FromStr for LanguageVersion {
    type Err = TargetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_full_version_string(s)
            .ok_or_else(|| TargetError::UnknownLanguageVersion { value: s.into() })
    }
}

/// How an opt-in language feature is treated by the compiler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FeatureState {
    /// Allowed silently.
    Enabled,
    /// Allowed, with a warning at each use.
    EnabledWithWarning,
    /// Recognised but reported as an error at each use.
    EnabledWithError,
    /// Not available at all.
    Disabled,
}

impl FeatureState {
    /// Every state, in declaration order.
    pub const ALL: [FeatureState; 4] = [
        FeatureState::Enabled,
        FeatureState::EnabledWithWarning,
        FeatureState::EnabledWithError,
        FeatureState::Disabled,
    ];

    /// Short label used in listings.
    pub fn label(&self) -> &'static str {
        match self {
            FeatureState::Enabled => "enabled",
            FeatureState::EnabledWithWarning => "enabled with warning",
            FeatureState::EnabledWithError => "enabled with error",
            FeatureState::Disabled => "disabled",
        }
    }
}

impl fmt::Display for FeatureState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Language features that are gated on a minimum language version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LanguageFeature {
    /// Suspending functions and coroutine builders.
    Coroutines,
}

impl LanguageFeature {
    /// First language version in which the feature exists.
    pub fn since_version(&self) -> LanguageVersion {
        match self {
            LanguageFeature::Coroutines => LanguageVersion::V1_1,
        }
    }

    /// State applied when the user has not chosen one.
    pub fn default_state(&self) -> FeatureState {
        match self {
            LanguageFeature::Coroutines => FeatureState::EnabledWithWarning,
        }
    }

    /// Whether `version` is new enough to have the feature at all.
    pub fn is_supported_by(&self, version: LanguageVersion) -> bool {
        version >= self.since_version()
    }
}
