//! `modconf set`: edit a module's settings.

use std::path::Path;

use anyhow::{bail, Context, Result};
use modconf_args::CompilerArguments;
use modconf_core::{CoroutineSupport, FacetSettings, FacetSettingsProvider, VersionView};
use modconf_targets::{JvmTarget, LanguageVersion};

use super::open_project;

/// Requested edits; `None` leaves a setting alone.
#[derive(Debug, Default)]
pub struct Changes {
    pub language_version: Option<String>,
    pub api_version: Option<String>,
    pub coroutines: Option<String>,
    pub jvm_target: Option<String>,
    pub override_text: Option<String>,
}

pub fn run(project_dir: &Path, module: &str, changes: &Changes) -> Result<()> {
    let mut project = open_project(project_dir)?;
    if project.settings(module).is_none() {
        bail!("module '{module}' is not configured. Use 'modconf init {module}' first.");
    }

    apply(project.initialized_settings(module), changes)?;
    project.save_module(module)?;
    println!("Updated settings for '{module}'");
    Ok(())
}

/// Apply `changes` in a fixed order: arguments first, override text last.
pub(crate) fn apply(facet: &mut FacetSettings, changes: &Changes) -> Result<()> {
    if let Some(target) = &changes.jvm_target {
        let target: JvmTarget = target.parse()?;
        let mut arguments = facet
            .compiler_arguments()
            .cloned()
            .context("module has no compiler arguments")?;
        match &mut arguments {
            CompilerArguments::Jvm(jvm) => jvm.jvm_target = Some(target.description().to_string()),
            other => bail!("--jvm-target applies to JVM modules, not {} modules", other.family()),
        }
        facet.set_compiler_arguments(Some(arguments));
    }
    if let Some(version) = &changes.language_version {
        facet.set_language_version_view(parse_view(version)?)?;
    }
    if let Some(version) = &changes.api_version {
        facet.set_api_version_view(parse_view(version)?)?;
    }
    if let Some(token) = &changes.coroutines {
        facet.set_coroutine_support(CoroutineSupport::by_token(token))?;
    }
    if let Some(text) = &changes.override_text {
        let text = if text.trim().is_empty() { None } else { Some(text.clone()) };
        facet.set_override_text(text)?;
    }
    Ok(())
}

/// `latest` selects auto-advance; anything else must name a version.
fn parse_view(value: &str) -> Result<VersionView> {
    if value.eq_ignore_ascii_case("latest") {
        return Ok(VersionView::LatestStable);
    }
    let version: LanguageVersion = value.parse()?;
    Ok(VersionView::Specific(version))
}

#[cfg(test)]
mod tests {
    use super::*;
    use modconf_args::default_compiler_arguments;
    use modconf_targets::{FeatureState, TargetPlatformKind};

    fn facet_for(platform: TargetPlatformKind) -> FacetSettings {
        let mut facet = FacetSettings::new();
        facet.set_compiler_arguments(Some(default_compiler_arguments(&platform)));
        facet
    }

    #[test]
    fn apply_versions_and_coroutines() {
        let mut facet = facet_for(TargetPlatformKind::default_platform());
        let changes = Changes {
            language_version: Some("1.1".into()),
            api_version: Some("latest".into()),
            coroutines: Some("Enable".into()),
            ..Default::default()
        };
        apply(&mut facet, &changes).unwrap();
        assert_eq!(
            facet.language_version_view(),
            Some(VersionView::Specific(LanguageVersion::V1_1))
        );
        assert_eq!(facet.api_version_view(), Some(VersionView::LatestStable));
        assert_eq!(facet.coroutine_support(), FeatureState::Enabled);
    }

    #[test]
    fn apply_jvm_target_then_override() {
        let mut facet = facet_for(TargetPlatformKind::default_platform());
        let changes = Changes {
            jvm_target: Some("1.8".into()),
            override_text: Some("-nowarn".into()),
            ..Default::default()
        };
        apply(&mut facet, &changes).unwrap();
        assert_eq!(facet.target_platform_kind().unwrap().to_string(), "JVM 1.8");
        assert!(facet.merged_compiler_arguments().unwrap().common().suppress_warnings);

        apply(
            &mut facet,
            &Changes {
                override_text: Some("".into()),
                ..Default::default()
            },
        )
        .unwrap();
        assert!(!facet.merged_compiler_arguments().unwrap().common().suppress_warnings);
    }

    #[test]
    fn override_with_unmodelled_flag_is_stored() {
        let mut facet = facet_for(TargetPlatformKind::default_platform());
        let changes = Changes {
            override_text: Some("-Xjsr305=strict".into()),
            ..Default::default()
        };
        apply(&mut facet, &changes).unwrap();
        assert_eq!(facet.override_text(), Some("-Xjsr305=strict"));
        assert_eq!(
            facet.merged_compiler_arguments().unwrap().common().unknown_args,
            vec!["-Xjsr305=strict"]
        );
    }

    #[test]
    fn jvm_target_on_js_module_fails() {
        let mut facet = facet_for(TargetPlatformKind::JavaScript);
        let changes = Changes {
            jvm_target: Some("1.8".into()),
            ..Default::default()
        };
        assert!(apply(&mut facet, &changes).is_err());
    }

    #[test]
    fn bad_inputs_are_rejected() {
        let mut facet = facet_for(TargetPlatformKind::default_platform());
        for changes in [
            Changes {
                language_version: Some("0.9".into()),
                ..Default::default()
            },
            Changes {
                jvm_target: Some("11".into()),
                ..Default::default()
            },
            Changes {
                override_text: Some("-d 'unclosed".into()),
                ..Default::default()
            },
        ] {
            assert!(apply(&mut facet, &changes).is_err(), "{changes:?} should fail");
        }
    }

    #[test]
    fn set_requires_configured_module() {
        let dir = tempfile::tempdir().unwrap();
        assert!(run(dir.path(), "app", &Changes::default()).is_err());

        super::super::init::run(dir.path(), "app", None, false).unwrap();
        let changes = Changes {
            coroutines: Some("error".into()),
            language_version: Some("1.2".into()),
            ..Default::default()
        };
        run(dir.path(), "app", &changes).unwrap();

        let project = super::super::open_project(dir.path()).unwrap();
        let facet = project.settings("app").unwrap();
        assert_eq!(facet.language_level(), Some(LanguageVersion::V1_2));
        assert_eq!(facet.coroutine_support(), FeatureState::EnabledWithError);
    }
}
