//! Free-form compiler settings attached to a module.

use serde::{Deserialize, Serialize};

/// Settings that are not compiler arguments themselves, chiefly the extra
/// command-line text layered over the structured arguments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct CompilerSettings {
    /// Extra flags, parsed and applied on top of the structured arguments.
    pub additional_arguments: String,
    /// Script definition templates.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub script_templates: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub script_templates_classpath: String,
    /// Copy JavaScript library files next to the compiled output.
    pub copy_js_library_files: bool,
    pub output_directory_for_js_library_files: String,
}

impl Default for CompilerSettings {
    fn default() -> Self {
        Self {
            additional_arguments: String::new(),
            script_templates: String::new(),
            script_templates_classpath: String::new(),
            copy_js_library_files: true,
            output_directory_for_js_library_files: "lib".to_string(),
        }
    }
}

impl CompilerSettings {
    /// Settings carrying only `text` as additional arguments.
    pub fn with_additional_arguments(text: impl Into<String>) -> Self {
        Self {
            additional_arguments: text.into(),
            ..Default::default()
        }
    }
}
