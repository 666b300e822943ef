//! Platform-aware construction of compiler arguments.

use modconf_targets::TargetPlatformKind;

use crate::arguments::{CompilerArguments, JsArguments, JvmArguments, MetadataArguments};

/// Create the argument family matching `platform`, let `configure` adjust it,
/// then stamp the platform defaults.
///
/// Defaults are written after `configure` runs, so a JVM platform always ends
/// up with its own `jvm_target`. Callers that want a different target set it
/// on the returned value.
pub fn create_compiler_arguments<F>(platform: &TargetPlatformKind, configure: F) -> CompilerArguments
where
    F: FnOnce(&mut CompilerArguments),
{
    let mut arguments = match platform {
        TargetPlatformKind::Jvm(_) => CompilerArguments::Jvm(JvmArguments::default()),
        TargetPlatformKind::JavaScript => CompilerArguments::Js(JsArguments::default()),
        TargetPlatformKind::Common => CompilerArguments::Metadata(MetadataArguments::default()),
    };

    configure(&mut arguments);

    if let (TargetPlatformKind::Jvm(target), CompilerArguments::Jvm(jvm)) = (platform, &mut arguments) {
        jvm.jvm_target = Some(target.description().to_string());
    }

    arguments
}

/// [`create_compiler_arguments`] with nothing to configure.
pub fn default_compiler_arguments(platform: &TargetPlatformKind) -> CompilerArguments {
    create_compiler_arguments(platform, |_| {})
}

#[cfg(test)]
mod tests {
    use super::*;
    use modconf_targets::JvmTarget;

    #[test]
    fn family_follows_platform() {
        for platform in TargetPlatformKind::all_platforms() {
            let args = default_compiler_arguments(platform);
            let matches = match (platform, &args) {
                (TargetPlatformKind::Jvm(_), CompilerArguments::Jvm(_)) => true,
                (TargetPlatformKind::JavaScript, CompilerArguments::Js(_)) => true,
                (TargetPlatformKind::Common, CompilerArguments::Metadata(_)) => true,
                _ => false,
            };
            assert!(matches, "{platform} produced {} arguments", args.family());
        }
    }

    #[test]
    fn jvm_target_is_stamped() {
        let args = default_compiler_arguments(&TargetPlatformKind::jvm(JvmTarget::Jvm1_8));
        match args {
            CompilerArguments::Jvm(jvm) => assert_eq!(jvm.jvm_target.as_deref(), Some("1.8")),
            other => panic!("unexpected family: {other:?}"),
        }
    }

    #[test]
    fn defaults_win_over_configure_step() {
        let args = create_compiler_arguments(&TargetPlatformKind::jvm(JvmTarget::Jvm1_6), |args| {
            args.common_mut().language_version = Some("1.1".into());
            if let CompilerArguments::Jvm(jvm) = args {
                jvm.jvm_target = Some("1.8".into());
            }
        });
        assert_eq!(args.common().language_version.as_deref(), Some("1.1"));
        match args {
            CompilerArguments::Jvm(mut jvm) => {
                assert_eq!(jvm.jvm_target.as_deref(), Some("1.6"));
                jvm.jvm_target = Some("1.8".into());
                assert_eq!(jvm.jvm_target.as_deref(), Some("1.8"));
            }
            other => panic!("unexpected family: {other:?}"),
        }
    }

    #[test]
    fn non_jvm_platforms_get_no_target() {
        match default_compiler_arguments(&TargetPlatformKind::JavaScript) {
            CompilerArguments::Js(js) => assert!(js.target.is_none()),
            other => panic!("unexpected family: {other:?}"),
        }
    }
}
