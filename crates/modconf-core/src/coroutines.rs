//! Coroutine support level derived from compiler arguments.

use modconf_args::arguments::{CommonArguments, ENABLE, ERROR, WARN};
use modconf_targets::{FeatureState, LanguageFeature, LanguageVersion};

const FEATURE: LanguageFeature = LanguageFeature::Coroutines;

/// Maps between the raw `-Xcoroutines` token and [`FeatureState`].
pub struct CoroutineSupport;

impl CoroutineSupport {
    /// State requested by `arguments`, or the feature default when there are
    /// no arguments or the token is unset or unknown.
    pub fn by_arguments(arguments: Option<&CommonArguments>) -> FeatureState {
        Self::by_arguments_or_none(arguments).unwrap_or_else(|| FEATURE.default_state())
    }

    /// Like [`CoroutineSupport::by_arguments`] but without the default.
    pub fn by_arguments_or_none(arguments: Option<&CommonArguments>) -> Option<FeatureState> {
        Self::from_raw(arguments.and_then(|a| a.coroutines_state.as_deref()))
    }

    /// State for a raw token; unset or unknown gives the feature default.
    pub fn by_raw(raw: Option<&str>) -> FeatureState {
        Self::from_raw(raw).unwrap_or_else(|| FEATURE.default_state())
    }

    fn from_raw(raw: Option<&str>) -> Option<FeatureState> {
        match raw? {
            ENABLE => Some(FeatureState::Enabled),
            WARN => Some(FeatureState::EnabledWithWarning),
            ERROR => Some(FeatureState::EnabledWithError),
            _ => None,
        }
    }

    /// State after applying the language-version gate: versions older than
    /// the feature always yield [`FeatureState::Disabled`].
    pub fn effective_state(language_version: LanguageVersion, raw: Option<&str>) -> FeatureState {
        if !FEATURE.is_supported_by(language_version) {
            return FeatureState::Disabled;
        }
        Self::by_raw(raw)
    }

    /// Token written back to the arguments.
    ///
    /// `EnabledWithError` and `Disabled` share the `error` token, so a
    /// disabled state reads back as enabled-with-error.
    pub fn to_raw_token(state: FeatureState) -> &'static str {
        match state {
            FeatureState::Enabled => ENABLE,
            FeatureState::EnabledWithWarning => WARN,
            FeatureState::EnabledWithError | FeatureState::Disabled => ERROR,
        }
    }

    /// Case-insensitive lookup of a hand-written token. The first state in
    /// declaration order whose token matches wins; no match gives the default.
    pub fn by_token(token: &str) -> FeatureState {
        FeatureState::ALL
            .into_iter()
            .find(|state| Self::to_raw_token(*state).eq_ignore_ascii_case(token.trim()))
            .unwrap_or_else(|| FEATURE.default_state())
    }
}
