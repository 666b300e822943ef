//! Language and API level policies.
//!
//! A level is either pinned to a specific version or follows whatever the
//! toolchain currently calls latest stable. Only pinned versions are
//! persisted; "latest stable" is stored as an auto-advance flag.

use std::cmp::Ordering;
use std::fmt;

use modconf_args::CommonArguments;
use modconf_targets::LanguageVersion;
use tracing::debug;

/// How a language or API level is chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VersionView {
    /// Follow [`LanguageVersion::LATEST_STABLE`].
    LatestStable,
    /// Pinned to one version.
    Specific(LanguageVersion),
}

impl VersionView {
    /// The version this view resolves to today.
    pub fn version(&self) -> LanguageVersion {
        match self {
            VersionView::LatestStable => LanguageVersion::LATEST_STABLE,
            VersionView::Specific(version) => *version,
        }
    }

    pub fn description(&self) -> String {
        match self {
            VersionView::LatestStable => format!("Latest stable ({})", self.version().version_string()),
            VersionView::Specific(version) => version.description(),
        }
    }

    /// Rebuild a view from its stored form.
    ///
    /// Auto-advance wins over the stored string; a missing or unknown string
    /// also falls back to [`VersionView::LatestStable`].
    pub fn deserialize(value: Option<&str>, is_auto_advance: bool) -> VersionView {
        if is_auto_advance {
            return VersionView::LatestStable;
        }
        match value.and_then(LanguageVersion::from_version_string) {
            Some(version) => VersionView::Specific(version),
            None => {
                debug!(?value, "unrecognised stored version, using latest stable");
                VersionView::LatestStable
            }
        }
    }

    /// Stored form: the version string and the auto-advance flag.
    pub fn serialize(&self) -> (String, bool) {
        let auto_advance = matches!(self, VersionView::LatestStable);
        (self.version().version_string().to_string(), auto_advance)
    }

    /// Compare by resolved version.
    pub fn cmp_resolved(&self, other: &VersionView) -> Ordering {
        self.version().cmp(&other.version())
    }
}

impl fmt::Display for VersionView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.description())
    }
}

/// Version views over the raw fields of [`CommonArguments`].
pub trait ArgumentVersionViews {
    /// Language version policy read from the stored string and auto-advance flag.
    fn language_version_view(&self) -> VersionView;
    /// Store `view` as a language version string plus auto-advance flag.
    fn set_language_version_view(&mut self, view: VersionView);
    /// API version policy read from the stored string and auto-advance flag.
    fn api_version_view(&self) -> VersionView;
    /// Store `view` as an API version string plus auto-advance flag.
    fn set_api_version_view(&mut self, view: VersionView);
}

impl ArgumentVersionViews for CommonArguments {
    fn language_version_view(&self) -> VersionView {
        VersionView::deserialize(self.language_version.as_deref(), self.auto_advance_language_version)
    }

    fn set_language_version_view(&mut self, view: VersionView) {
        let (value, auto_advance) = view.serialize();
        self.language_version = Some(value);
        self.auto_advance_language_version = auto_advance;
    }

    fn api_version_view(&self) -> VersionView {
        VersionView::deserialize(self.api_version.as_deref(), self.auto_advance_api_version)
    }

    fn set_api_version_view(&mut self, view: VersionView) {
        let (value, auto_advance) = view.serialize();
        self.api_version = Some(value);
        self.auto_advance_api_version = auto_advance;
    }
}
