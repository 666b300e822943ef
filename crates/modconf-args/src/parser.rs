//! Command-line override parsing.
//!
//! Override text is split into tokens with shell-like quoting, then each
//! recognised flag overwrites the matching field of the target arguments.
//! Repeatable flags (`-Xplugin`, `-P`) append instead.
//!
//! Flags outside the modelled set, and flags belonging to another platform
//! family, are kept verbatim in [`CommonArguments::unknown_args`] rather than
//! rejected. Only malformed text is an error. An unrecognised flag written as
//! `-flag value` keeps just `-flag`; its value lands in the free arguments.
//!
//! [`CommonArguments::unknown_args`]: crate::arguments::CommonArguments::unknown_args

use tracing::{debug, warn};

use crate::arguments::CompilerArguments;
use crate::error::{ArgumentError, Result};

/// Applies command-line tokens onto an existing arguments value.
pub trait ArgumentParser {
    /// Parse `tokens` and write every recognised option into `into`.
    ///
    /// Unrecognised flags are recorded, not rejected. On error `into` may be
    /// partially updated; callers that need an all-or-nothing update must
    /// parse into a scratch copy.
    fn parse(&self, tokens: &[String], into: &mut CompilerArguments) -> Result<()>;
}

/// Parser for the flag set understood by the bundled backends.
#[derive(Debug, Clone, Copy, Default)]
pub struct CommandLineParser;

/// A recognised flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flag {
    LanguageVersion,
    ApiVersion,
    Coroutines,
    NoWarn,
    Verbose,
    MultiPlatform,
    NoInline,
    AutoAdvanceLanguageVersion,
    AutoAdvanceApiVersion,
    Plugin,
    PluginOption,
    JvmTarget,
    Destination,
    Classpath,
    ModuleName,
    JdkHome,
    NoStdlib,
    NoReflect,
    JavaParameters,
    Output,
    SourceMap,
    MetaInfo,
    ModuleKind,
    JsTarget,
    Main,
    Libraries,
}

impl Flag {
    fn lookup(name: &str) -> Option<Flag> {
        let flag = match name {
            "-language-version" => Flag::LanguageVersion,
            "-api-version" => Flag::ApiVersion,
            "-Xcoroutines" => Flag::Coroutines,
            "-nowarn" => Flag::NoWarn,
            "-verbose" => Flag::Verbose,
            "-Xmulti-platform" => Flag::MultiPlatform,
            "-Xno-inline" => Flag::NoInline,
            "-Xauto-advance-language-version" => Flag::AutoAdvanceLanguageVersion,
            "-Xauto-advance-api-version" => Flag::AutoAdvanceApiVersion,
            "-Xplugin" => Flag::Plugin,
            "-P" => Flag::PluginOption,
            "-jvm-target" => Flag::JvmTarget,
            "-d" => Flag::Destination,
            "-classpath" | "-cp" => Flag::Classpath,
            "-module-name" => Flag::ModuleName,
            "-jdk-home" => Flag::JdkHome,
            "-no-stdlib" => Flag::NoStdlib,
            "-no-reflect" => Flag::NoReflect,
            "-java-parameters" => Flag::JavaParameters,
            "-output" => Flag::Output,
            "-source-map" => Flag::SourceMap,
            "-meta-info" => Flag::MetaInfo,
            "-module-kind" => Flag::ModuleKind,
            "-target" => Flag::JsTarget,
            "-main" => Flag::Main,
            "-libraries" => Flag::Libraries,
            _ => return None,
        };
        Some(flag)
    }

    fn takes_value(self) -> bool {
        !matches!(
            self,
            Flag::NoWarn
                | Flag::Verbose
                | Flag::MultiPlatform
                | Flag::NoInline
                | Flag::AutoAdvanceLanguageVersion
                | Flag::AutoAdvanceApiVersion
                | Flag::NoStdlib
                | Flag::NoReflect
                | Flag::JavaParameters
                | Flag::SourceMap
                | Flag::MetaInfo
        )
    }

    /// Write the flag into `args`. `value` is `Some` iff [`Flag::takes_value`].
    ///
    /// Returns `false` when the flag has no field in this platform family.
    fn apply(self, value: Option<String>, args: &mut CompilerArguments) -> bool {
        match self {
            Flag::LanguageVersion => args.common_mut().language_version = value,
            Flag::ApiVersion => args.common_mut().api_version = value,
            Flag::Coroutines => args.common_mut().coroutines_state = value,
            Flag::NoWarn => args.common_mut().suppress_warnings = true,
            Flag::Verbose => args.common_mut().verbose = true,
            Flag::MultiPlatform => args.common_mut().multi_platform = true,
            Flag::NoInline => args.common_mut().no_inline = true,
            Flag::AutoAdvanceLanguageVersion => args.common_mut().auto_advance_language_version = true,
            Flag::AutoAdvanceApiVersion => args.common_mut().auto_advance_api_version = true,
            Flag::Plugin => args.common_mut().plugin_classpaths.extend(value),
            Flag::PluginOption => args.common_mut().plugin_options.extend(value),
            Flag::JvmTarget => match args {
                CompilerArguments::Jvm(jvm) => jvm.jvm_target = value,
                _ => return false,
            },
            Flag::Destination => match args {
                CompilerArguments::Jvm(jvm) => jvm.destination = value,
                CompilerArguments::Metadata(meta) => meta.destination = value,
                CompilerArguments::Js(_) => return false,
            },
            Flag::Classpath => match args {
                CompilerArguments::Jvm(jvm) => jvm.classpath = value,
                CompilerArguments::Metadata(meta) => meta.classpath = value,
                CompilerArguments::Js(_) => return false,
            },
            Flag::ModuleName => match args {
                CompilerArguments::Jvm(jvm) => jvm.module_name = value,
                CompilerArguments::Metadata(meta) => meta.module_name = value,
                CompilerArguments::Js(_) => return false,
            },
            Flag::JdkHome => match args {
                CompilerArguments::Jvm(jvm) => jvm.jdk_home = value,
                _ => return false,
            },
            Flag::NoStdlib => match args {
                CompilerArguments::Jvm(jvm) => jvm.no_stdlib = true,
                CompilerArguments::Js(js) => js.no_stdlib = true,
                CompilerArguments::Metadata(_) => return false,
            },
            Flag::NoReflect => match args {
                CompilerArguments::Jvm(jvm) => jvm.no_reflect = true,
                _ => return false,
            },
            Flag::JavaParameters => match args {
                CompilerArguments::Jvm(jvm) => jvm.java_parameters = true,
                _ => return false,
            },
            Flag::Output => match args {
                CompilerArguments::Js(js) => js.output_file = value,
                _ => return false,
            },
            Flag::SourceMap => match args {
                CompilerArguments::Js(js) => js.source_map = true,
                _ => return false,
            },
            Flag::MetaInfo => match args {
                CompilerArguments::Js(js) => js.meta_info = true,
                _ => return false,
            },
            Flag::ModuleKind => match args {
                CompilerArguments::Js(js) => js.module_kind = value,
                _ => return false,
            },
            Flag::JsTarget => match args {
                CompilerArguments::Js(js) => js.target = value,
                _ => return false,
            },
            Flag::Main => match args {
                CompilerArguments::Js(js) => js.main = value,
                _ => return false,
            },
            Flag::Libraries => match args {
                CompilerArguments::Js(js) => js.libraries = value,
                _ => return false,
            },
        }
        true
    }
}

/// Keep tokens the parser cannot place so they survive into the merged value.
fn keep_unknown(into: &mut CompilerArguments, written: &[String]) {
    warn!(
        flag = %written[0],
        platform = into.family(),
        "compiler flag not recognised for this platform; kept as-is"
    );
    into.common_mut().unknown_args.extend_from_slice(written);
}

impl ArgumentParser for CommandLineParser {
    fn parse(&self, tokens: &[String], into: &mut CompilerArguments) -> Result<()> {
        let mut iter = tokens.iter();
        while let Some(token) = iter.next() {
            if token == "--" {
                into.common_mut().free_args.extend(iter.by_ref().cloned());
                break;
            }
            if !token.starts_with('-') || token == "-" {
                into.common_mut().free_args.push(token.clone());
                continue;
            }

            let (name, inline) = match token.split_once('=') {
                Some((name, value)) => (name, Some(value.to_string())),
                None => (token.as_str(), None),
            };
            let Some(flag) = Flag::lookup(name) else {
                keep_unknown(into, std::slice::from_ref(token));
                continue;
            };

            let mut written = vec![token.clone()];
            let value = if flag.takes_value() {
                match inline {
                    Some(v) => Some(v),
                    None => {
                        let v = iter
                            .next()
                            .cloned()
                            .ok_or_else(|| ArgumentError::MissingValue { flag: name.to_string() })?;
                        written.push(v.clone());
                        Some(v)
                    }
                }
            } else if inline.is_some() {
                return Err(ArgumentError::UnexpectedValue { flag: name.to_string() });
            } else {
                None
            };

            debug!(flag = name, ?value, "applying override flag");
            if !flag.apply(value, into) {
                keep_unknown(into, &written);
            }
        }
        Ok(())
    }
}

/// Split free-form argument text into tokens.
///
/// Whitespace separates tokens. Single quotes group literally. Double quotes
/// group too, and inside them only `\"` and `\\` are escapes, so Windows
/// paths keep their backslashes. Outside quotes a backslash escapes the next
/// character. `""` yields an empty token.
pub fn split_arguments(text: &str) -> Result<Vec<String>> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut in_token = false;
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '\'' | '"' => {
                in_token = true;
                loop {
                    match chars.next() {
                        Some(q) if q == c => break,
                        Some('\\') if c == '"' => match chars.next_if(|n| *n == '"' || *n == '\\') {
                            Some(escaped) => current.push(escaped),
                            None => current.push('\\'),
                        },
                        Some(other) => current.push(other),
                        None => return Err(ArgumentError::UnterminatedQuote { quote: c }),
                    }
                }
            }
            '\\' => {
                in_token = true;
                if let Some(escaped) = chars.next() {
                    current.push(escaped);
                }
            }
            c if c.is_whitespace() => {
                if in_token {
                    tokens.push(std::mem::take(&mut current));
                    in_token = false;
                }
            }
            c => {
                in_token = true;
                current.push(c);
            }
        }
    }
    if in_token {
        tokens.push(current);
    }
    Ok(tokens)
}

/// Render arguments as the command line that would reproduce them.
///
/// Only fields with a non-default value are emitted. Kept unrecognised flags
/// follow the modelled ones; free arguments come last, after a `--` separator
/// when one of them would otherwise read as a flag.
pub fn to_command_line(args: &CompilerArguments) -> Vec<String> {
    fn value(out: &mut Vec<String>, flag: &str, v: &Option<String>) {
        if let Some(v) = v {
            out.push(flag.to_string());
            out.push(v.clone());
        }
    }
    fn switch(out: &mut Vec<String>, flag: &str, on: bool) {
        if on {
            out.push(flag.to_string());
        }
    }

    let mut out = Vec::new();

    let common = args.common();
    value(&mut out, "-language-version", &common.language_version);
    value(&mut out, "-api-version", &common.api_version);
    if let Some(state) = &common.coroutines_state {
        out.push(format!("-Xcoroutines={state}"));
    }
    switch(&mut out, "-nowarn", common.suppress_warnings);
    switch(&mut out, "-verbose", common.verbose);
    switch(&mut out, "-Xmulti-platform", common.multi_platform);
    switch(&mut out, "-Xno-inline", common.no_inline);
    switch(&mut out, "-Xauto-advance-language-version", common.auto_advance_language_version);
    switch(&mut out, "-Xauto-advance-api-version", common.auto_advance_api_version);
    for path in &common.plugin_classpaths {
        out.push(format!("-Xplugin={path}"));
    }
    for option in &common.plugin_options {
        out.push("-P".to_string());
        out.push(option.clone());
    }

    match args {
        CompilerArguments::Jvm(jvm) => {
            value(&mut out, "-jvm-target", &jvm.jvm_target);
            value(&mut out, "-d", &jvm.destination);
            value(&mut out, "-classpath", &jvm.classpath);
            value(&mut out, "-module-name", &jvm.module_name);
            value(&mut out, "-jdk-home", &jvm.jdk_home);
            switch(&mut out, "-no-stdlib", jvm.no_stdlib);
            switch(&mut out, "-no-reflect", jvm.no_reflect);
            switch(&mut out, "-java-parameters", jvm.java_parameters);
        }
        CompilerArguments::Js(js) => {
            value(&mut out, "-output", &js.output_file);
            switch(&mut out, "-source-map", js.source_map);
            switch(&mut out, "-meta-info", js.meta_info);
            value(&mut out, "-module-kind", &js.module_kind);
            value(&mut out, "-target", &js.target);
            value(&mut out, "-main", &js.main);
            value(&mut out, "-libraries", &js.libraries);
            switch(&mut out, "-no-stdlib", js.no_stdlib);
        }
        CompilerArguments::Metadata(meta) => {
            value(&mut out, "-d", &meta.destination);
            value(&mut out, "-classpath", &meta.classpath);
            value(&mut out, "-module-name", &meta.module_name);
        }
    }

    out.extend(common.unknown_args.iter().cloned());
    if common.free_args.iter().any(|a| a.starts_with('-') && a != "-") {
        out.push("--".to_string());
    }
    out.extend(common.free_args.iter().cloned());
    out
}
