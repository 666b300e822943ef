//! The per-module settings aggregate.
//!
//! `FacetSettings` keeps `merged_compiler_arguments` equal to the structured
//! arguments with the additional-arguments text applied, as of the last write
//! to either. Structured arguments are always accepted: flags the parser does
//! not model are carried along rather than rejected. Additional-arguments text
//! is checked when written; malformed text is refused and changes nothing.
//!
//! Instances have a single owner. Mutators take `&mut self`; to share one
//! between threads, wrap it in a `Mutex` so reads never see a half-applied
//! update.

use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use modconf_args::{check_override_text, merge, CompilerArguments};
use modconf_targets::{FeatureState, JvmTarget, LanguageFeature, LanguageVersion, TargetPlatformKind};

use crate::coroutines::CoroutineSupport;
use crate::error::{Result, SettingsError};
use crate::settings::CompilerSettings;
use crate::version_view::{ArgumentVersionViews, VersionView};

/// How a module relates to source sets in multi-target builds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ModuleKind {
    #[default]
    Default,
    SourceSetHolder,
    CompilationAndSourceSetHolder,
}

/// One module's compiler configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FacetSettings {
    /// Schema version of the stored form; see [`FacetSettings::CURRENT_VERSION`].
    pub version: u32,
    /// Use project-wide settings instead of this module's own.
    pub use_project_settings: bool,
    compiler_arguments: Option<CompilerArguments>,
    compiler_settings: Option<CompilerSettings>,
    merged_compiler_arguments: Option<CompilerArguments>,
    pub implemented_module_names: Vec<String>,
    pub production_output_path: Option<String>,
    pub test_output_path: Option<String>,
    pub kind: ModuleKind,
    pub source_set_names: Vec<String>,
}

impl Default for FacetSettings {
    fn default() -> Self {
        Self {
            version: Self::CURRENT_VERSION,
            use_project_settings: true,
            compiler_arguments: None,
            compiler_settings: None,
            merged_compiler_arguments: None,
            implemented_module_names: Vec::new(),
            production_output_path: None,
            test_output_path: None,
            kind: ModuleKind::Default,
            source_set_names: Vec::new(),
        }
    }
}

impl FacetSettings {
    /// Bump on serialization-incompatible changes to the stored form.
    pub const CURRENT_VERSION: u32 = 3;
    /// Version assumed for stored data that predates versioning.
    pub const DEFAULT_VERSION: u32 = 0;

    pub fn new() -> Self {
        Self::default()
    }

    /// Whether stored data must be migrated before use.
    pub fn needs_migration(&self) -> bool {
        self.version < Self::CURRENT_VERSION
    }

    pub fn compiler_arguments(&self) -> Option<&CompilerArguments> {
        self.compiler_arguments.as_ref()
    }

    pub fn compiler_settings(&self) -> Option<&CompilerSettings> {
        self.compiler_settings.as_ref()
    }

    /// Structured arguments with the additional arguments applied.
    pub fn merged_compiler_arguments(&self) -> Option<&CompilerArguments> {
        self.merged_compiler_arguments.as_ref()
    }

    /// The additional-arguments text, if any settings are present.
    pub fn override_text(&self) -> Option<&str> {
        self.compiler_settings.as_ref().map(|s| s.additional_arguments.as_str())
    }

    /// Replace the structured arguments and recompute the merged arguments.
    pub fn set_compiler_arguments(&mut self, arguments: Option<CompilerArguments>) {
        self.merged_compiler_arguments = arguments.as_ref().map(|args| self.merge_stored_text(args));
        self.compiler_arguments = arguments;
        debug!(
            has_arguments = self.compiler_arguments.is_some(),
            "updated merged compiler arguments"
        );
    }

    /// Replace the compiler settings and recompute the merged arguments.
    ///
    /// Fails, changing nothing, if the additional arguments are malformed.
    pub fn set_compiler_settings(&mut self, settings: Option<CompilerSettings>) -> Result<()> {
        let text = settings.as_ref().map(|s| s.additional_arguments.as_str());
        let merged = match &self.compiler_arguments {
            Some(args) => Some(merge(args, text)?),
            None => {
                check_override_text(text.unwrap_or_default())?;
                None
            }
        };
        debug!(has_settings = settings.is_some(), "updated merged compiler arguments");
        self.compiler_settings = settings;
        self.merged_compiler_arguments = merged;
        Ok(())
    }

    /// Replace only the additional-arguments text.
    ///
    /// `None` clears the text but keeps the remaining compiler settings.
    pub fn set_override_text(&mut self, text: Option<String>) -> Result<()> {
        let settings = match (self.compiler_settings.clone(), text) {
            (Some(mut settings), text) => {
                settings.additional_arguments = text.unwrap_or_default();
                Some(settings)
            }
            (None, Some(text)) => Some(CompilerSettings::with_additional_arguments(text)),
            (None, None) => None,
        };
        self.set_compiler_settings(settings)
    }

    /// Merge `arguments` with the stored additional arguments.
    ///
    /// Stored text is checked on write, so it parses onto any arguments; an
    /// unmerged copy is used if it somehow does not.
    fn merge_stored_text(&self, arguments: &CompilerArguments) -> CompilerArguments {
        merge(arguments, self.override_text()).unwrap_or_else(|err| {
            error!(%err, "stored additional arguments do not parse; using arguments unmerged");
            arguments.clone()
        })
    }

    /// Apply `edit` to a copy of the arguments and store it, or fail if the
    /// module has no arguments.
    fn edit_arguments<F>(&mut self, setting: &'static str, edit: F) -> Result<()>
    where
        F: FnOnce(&mut CompilerArguments),
    {
        let Some(mut arguments) = self.compiler_arguments.clone() else {
            error!(setting, "cannot change a compiler argument: module has no compiler arguments");
            return Err(SettingsError::ArgumentsMissing { setting });
        };
        edit(&mut arguments);
        self.set_compiler_arguments(Some(arguments));
        Ok(())
    }

    /// Language level stored in the structured arguments.
    pub fn language_level(&self) -> Option<LanguageVersion> {
        self.compiler_arguments
            .as_ref()?
            .common()
            .language_version
            .as_deref()
            .and_then(LanguageVersion::from_full_version_string)
    }

    pub fn set_language_level(&mut self, level: Option<LanguageVersion>) -> Result<()> {
        self.edit_arguments("language level", |args| {
            args.common_mut().language_version = level.map(|v| v.version_string().to_string());
        })
    }

    /// API level stored in the structured arguments.
    pub fn api_level(&self) -> Option<LanguageVersion> {
        self.compiler_arguments
            .as_ref()?
            .common()
            .api_version
            .as_deref()
            .and_then(LanguageVersion::from_full_version_string)
    }

    pub fn set_api_level(&mut self, level: Option<LanguageVersion>) -> Result<()> {
        self.edit_arguments("API level", |args| {
            args.common_mut().api_version = level.map(|v| v.version_string().to_string());
        })
    }

    /// Language version policy, including the auto-advance flag.
    pub fn language_version_view(&self) -> Option<VersionView> {
        Some(self.compiler_arguments.as_ref()?.common().language_version_view())
    }

    pub fn set_language_version_view(&mut self, view: VersionView) -> Result<()> {
        self.edit_arguments("language version", |args| {
            args.common_mut().set_language_version_view(view);
        })
    }

    /// API version policy, including the auto-advance flag.
    pub fn api_version_view(&self) -> Option<VersionView> {
        Some(self.compiler_arguments.as_ref()?.common().api_version_view())
    }

    pub fn set_api_version_view(&mut self, view: VersionView) -> Result<()> {
        self.edit_arguments("API version", |args| {
            args.common_mut().set_api_version_view(view);
        })
    }

    /// Platform implied by the structured arguments.
    ///
    /// For JVM arguments this is the first catalog entry whose version
    /// string sorts at or after the stored target (the default target when
    /// unset); `None` if no entry does.
    pub fn target_platform_kind(&self) -> Option<TargetPlatformKind> {
        match self.compiler_arguments.as_ref()? {
            CompilerArguments::Jvm(jvm) => {
                let target = jvm.jvm_target.as_deref().unwrap_or(JvmTarget::DEFAULT.description());
                TargetPlatformKind::jvm_platforms()
                    .iter()
                    .find(|p| p.version_description() >= target)
                    .copied()
            }
            CompilerArguments::Js(_) => Some(TargetPlatformKind::JavaScript),
            CompilerArguments::Metadata(_) => Some(TargetPlatformKind::Common),
        }
    }

    /// Effective coroutine support for this module.
    pub fn coroutine_support(&self) -> FeatureState {
        let Some(language_version) = self.language_level() else {
            return LanguageFeature::Coroutines.default_state();
        };
        let raw = self
            .compiler_arguments
            .as_ref()
            .and_then(|a| a.common().coroutines_state.as_deref());
        CoroutineSupport::effective_state(language_version, raw)
    }

    pub fn set_coroutine_support(&mut self, state: FeatureState) -> Result<()> {
        self.edit_arguments("coroutine support", |args| {
            args.common_mut().coroutines_state = Some(CoroutineSupport::to_raw_token(state).to_string());
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use modconf_args::{default_compiler_arguments, ArgumentError, JsArguments, JvmArguments};

    fn jvm_settings(target: &str) -> FacetSettings {
        let mut facet = FacetSettings::new();
        facet.set_compiler_arguments(Some(CompilerArguments::Jvm(JvmArguments {
            jvm_target: Some(target.into()),
            ..Default::default()
        })));
        facet
    }

    fn jvm_target(args: &CompilerArguments) -> Option<&str> {
        match args {
            CompilerArguments::Jvm(jvm) => jvm.jvm_target.as_deref(),
            _ => None,
        }
    }

    #[test]
    fn defaults() {
        let facet = FacetSettings::new();
        assert_eq!(facet.version, FacetSettings::CURRENT_VERSION);
        assert!(facet.use_project_settings);
        assert!(!facet.needs_migration());
        assert!(facet.compiler_arguments().is_none());
        assert!(facet.merged_compiler_arguments().is_none());
        assert!(facet.target_platform_kind().is_none());
        assert_eq!(facet.kind, ModuleKind::Default);
        assert_eq!(facet.coroutine_support(), FeatureState::EnabledWithWarning);
    }

    #[test]
    fn jvm_scenario_with_new_language_level() {
        let mut facet = jvm_settings("1.6");
        facet.set_language_level(Some(LanguageVersion::V1_1)).unwrap();
        facet.set_coroutine_support(FeatureState::EnabledWithWarning).unwrap();

        assert_eq!(facet.target_platform_kind(), Some(TargetPlatformKind::jvm(JvmTarget::Jvm1_6)));
        assert_eq!(facet.language_level(), Some(LanguageVersion::V1_1));
        assert_eq!(facet.coroutine_support(), FeatureState::EnabledWithWarning);
    }

    #[test]
    fn jvm_scenario_with_old_language_level() {
        let mut facet = jvm_settings("1.6");
        facet.set_language_level(Some(LanguageVersion::V1_0)).unwrap();
        facet.set_coroutine_support(FeatureState::EnabledWithWarning).unwrap();

        let raw = facet.compiler_arguments().unwrap().common().coroutines_state.clone();
        assert_eq!(raw.as_deref(), Some("warn"));
        assert_eq!(facet.coroutine_support(), FeatureState::Disabled);
    }

    #[test]
    fn merged_follows_every_write() {
        let mut facet = jvm_settings("1.6");
        assert_eq!(facet.merged_compiler_arguments(), facet.compiler_arguments());

        facet.set_override_text(Some("-jvm-target 1.8 -nowarn".into())).unwrap();
        let merged = facet.merged_compiler_arguments().unwrap();
        assert_eq!(jvm_target(merged), Some("1.8"));
        assert!(merged.common().suppress_warnings);
        assert_eq!(jvm_target(facet.compiler_arguments().unwrap()), Some("1.6"));

        facet.set_language_level(Some(LanguageVersion::V1_0)).unwrap();
        let expected = merge(facet.compiler_arguments().unwrap(), facet.override_text()).unwrap();
        assert_eq!(facet.merged_compiler_arguments(), Some(&expected));
        assert_eq!(expected.common().language_version.as_deref(), Some("1.0"));
    }

    #[test]
    fn merged_matches_independent_recomputation() {
        let args = default_compiler_arguments(&TargetPlatformKind::JavaScript);
        let text = "-output out.js -source-map -language-version 1.0";
        let mut facet = FacetSettings::new();
        facet.set_compiler_arguments(Some(args.clone()));
        facet.set_override_text(Some(text.into())).unwrap();
        assert_eq!(facet.merged_compiler_arguments(), Some(&merge(&args, Some(text)).unwrap()));
    }

    #[test]
    fn clearing_arguments_clears_merged() {
        let mut facet = jvm_settings("1.6");
        facet.set_override_text(Some("-verbose".into())).unwrap();
        facet.set_compiler_arguments(None);
        assert!(facet.merged_compiler_arguments().is_none());
        assert_eq!(facet.override_text(), Some("-verbose"));
    }

    #[test]
    fn stored_arguments_are_independent_of_caller() {
        let mut mine = CompilerArguments::Jvm(JvmArguments::default());
        let mut facet = FacetSettings::new();
        facet.set_compiler_arguments(Some(mine.clone()));
        mine.common_mut().verbose = true;
        assert!(!facet.compiler_arguments().unwrap().common().verbose);
        assert!(!facet.merged_compiler_arguments().unwrap().common().verbose);
    }

    #[test]
    fn malformed_override_changes_nothing() {
        let mut facet = jvm_settings("1.6");
        facet.set_override_text(Some("-verbose".into())).unwrap();
        let before = facet.clone();

        let err = facet.set_override_text(Some("-verbose -d".into())).unwrap_err();
        assert!(matches!(err, SettingsError::Arguments(ArgumentError::MissingValue { .. })));
        assert_eq!(facet, before);

        let err = facet.set_override_text(Some("-d 'unclosed".into())).unwrap_err();
        assert!(matches!(err, SettingsError::Arguments(ArgumentError::UnterminatedQuote { .. })));
        assert_eq!(facet, before);
    }

    #[test]
    fn malformed_override_is_refused_without_arguments() {
        let mut facet = FacetSettings::new();
        assert!(facet.set_override_text(Some("-nowarn=yes".into())).is_err());
        assert!(facet.compiler_settings().is_none());
    }

    #[test]
    fn unmodelled_override_flags_are_carried_into_merge() {
        let mut facet = jvm_settings("1.6");
        facet.set_override_text(Some("-Xjsr305=strict -verbose".into())).unwrap();
        let merged = facet.merged_compiler_arguments().unwrap();
        assert_eq!(merged.common().unknown_args, vec!["-Xjsr305=strict"]);
        assert!(merged.common().verbose);
    }

    #[test]
    fn platform_switch_under_platform_specific_override() {
        let mut facet = jvm_settings("1.6");
        facet.set_override_text(Some("-jvm-target 1.8".into())).unwrap();

        let js = CompilerArguments::Js(JsArguments::default());
        facet.set_compiler_arguments(Some(js.clone()));
        assert_eq!(facet.compiler_arguments(), Some(&js));
        assert_eq!(facet.target_platform_kind(), Some(TargetPlatformKind::JavaScript));
        let merged = facet.merged_compiler_arguments().unwrap();
        assert_eq!(merged.family(), "JavaScript");
        assert_eq!(merged.common().unknown_args, vec!["-jvm-target", "1.8"]);
        assert_eq!(facet.override_text(), Some("-jvm-target 1.8"));
    }

    #[test]
    fn setters_without_arguments_fail_cleanly() {
        let mut facet = FacetSettings::new();
        facet.set_override_text(Some("-verbose".into())).unwrap();
        let before = facet.clone();

        assert!(matches!(
            facet.set_language_level(Some(LanguageVersion::V1_1)),
            Err(SettingsError::ArgumentsMissing { setting: "language level" })
        ));
        assert!(matches!(
            facet.set_api_level(None),
            Err(SettingsError::ArgumentsMissing { setting: "API level" })
        ));
        assert!(matches!(
            facet.set_coroutine_support(FeatureState::Enabled),
            Err(SettingsError::ArgumentsMissing { .. })
        ));
        assert_eq!(facet, before);
        assert!(facet.language_level().is_none());
        assert!(facet.api_level().is_none());
    }

    #[test]
    fn levels_read_full_version_strings() {
        let mut facet = jvm_settings("1.6");
        facet.set_compiler_arguments(Some(CompilerArguments::Jvm(JvmArguments {
            common: modconf_args::CommonArguments {
                language_version: Some("1.1.0".into()),
                api_version: Some("1.0-rc".into()),
                ..Default::default()
            },
            ..Default::default()
        })));
        assert_eq!(facet.language_level(), Some(LanguageVersion::V1_1));
        assert_eq!(facet.api_level(), Some(LanguageVersion::V1_0));

        facet.set_api_level(None).unwrap();
        assert!(facet.api_level().is_none());
    }

    #[test]
    fn version_views_track_auto_advance() {
        let mut facet = FacetSettings::new();
        assert!(facet.language_version_view().is_none());
        assert!(facet.set_api_version_view(VersionView::LatestStable).is_err());

        let mut facet = jvm_settings("1.6");
        facet.set_language_version_view(VersionView::LatestStable).unwrap();
        assert_eq!(facet.language_version_view(), Some(VersionView::LatestStable));
        assert_eq!(facet.language_level(), Some(LanguageVersion::LATEST_STABLE));

        facet
            .set_language_version_view(VersionView::Specific(LanguageVersion::V1_0))
            .unwrap();
        assert_eq!(
            facet.language_version_view(),
            Some(VersionView::Specific(LanguageVersion::V1_0))
        );
        assert_eq!(facet.coroutine_support(), FeatureState::Disabled);

        facet.set_api_version_view(VersionView::Specific(LanguageVersion::V1_0)).unwrap();
        assert_eq!(facet.api_level(), Some(LanguageVersion::V1_0));
        assert_eq!(
            facet.merged_compiler_arguments().unwrap().common().api_version.as_deref(),
            Some("1.0")
        );
    }

    #[test]
    fn target_platform_resolution() {
        assert_eq!(
            jvm_settings("1.8").target_platform_kind(),
            Some(TargetPlatformKind::jvm(JvmTarget::Jvm1_8))
        );
        assert_eq!(
            jvm_settings("1.7").target_platform_kind(),
            Some(TargetPlatformKind::jvm(JvmTarget::Jvm1_8))
        );
        assert_eq!(jvm_settings("9").target_platform_kind(), None);

        let mut unset = FacetSettings::new();
        unset.set_compiler_arguments(Some(CompilerArguments::Jvm(JvmArguments::default())));
        assert_eq!(unset.target_platform_kind(), Some(TargetPlatformKind::default_platform()));

        for platform in [TargetPlatformKind::JavaScript, TargetPlatformKind::Common] {
            let mut facet = FacetSettings::new();
            facet.set_compiler_arguments(Some(default_compiler_arguments(&platform)));
            assert_eq!(facet.target_platform_kind(), Some(platform));
        }
    }

    #[test]
    fn coroutine_default_without_language_level() {
        let mut facet = jvm_settings("1.6");
        facet.set_coroutine_support(FeatureState::Enabled).unwrap();
        assert_eq!(facet.coroutine_support(), FeatureState::EnabledWithWarning);
        facet.set_language_level(Some(LanguageVersion::V1_2)).unwrap();
        assert_eq!(facet.coroutine_support(), FeatureState::Enabled);
    }

    #[test]
    fn disabled_reads_back_as_error() {
        let mut facet = jvm_settings("1.6");
        facet.set_language_level(Some(LanguageVersion::V1_1)).unwrap();
        facet.set_coroutine_support(FeatureState::Disabled).unwrap();
        assert_eq!(facet.coroutine_support(), FeatureState::EnabledWithError);
    }

    #[test]
    fn clearing_override_keeps_other_settings() {
        let mut facet = jvm_settings("1.6");
        let mut settings = CompilerSettings::with_additional_arguments("-verbose");
        settings.copy_js_library_files = false;
        facet.set_compiler_settings(Some(settings)).unwrap();
        facet.set_override_text(None).unwrap();
        assert_eq!(facet.override_text(), Some(""));
        assert!(!facet.compiler_settings().unwrap().copy_js_library_files);
        assert!(!facet.merged_compiler_arguments().unwrap().common().verbose);
    }

    #[test]
    fn shared_between_threads_behind_a_mutex() {
        use std::sync::{Arc, Mutex};

        let facet = Arc::new(Mutex::new(jvm_settings("1.6")));
        let handles: Vec<_> = ["-verbose", "-nowarn", "-no-reflect"]
            .into_iter()
            .map(|text| {
                let facet = Arc::clone(&facet);
                std::thread::spawn(move || {
                    let mut facet = facet.lock().unwrap();
                    facet.set_override_text(Some(text.to_string())).unwrap();
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let facet = facet.lock().unwrap();
        let expected = merge(facet.compiler_arguments().unwrap(), facet.override_text()).unwrap();
        assert_eq!(facet.merged_compiler_arguments(), Some(&expected));
    }
}
