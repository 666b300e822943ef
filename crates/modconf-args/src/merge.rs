//! Structured arguments combined with free-form override text.

use tracing::debug;

use crate::arguments::{CompilerArguments, MetadataArguments};
use crate::error::Result;
use crate::parser::{split_arguments, ArgumentParser, CommandLineParser};

/// Clone `arguments` and apply `override_text` on top with the bundled parser.
///
/// The input is never modified; on error nothing is returned.
pub fn merge(arguments: &CompilerArguments, override_text: Option<&str>) -> Result<CompilerArguments> {
    merge_with(&CommandLineParser, arguments, override_text)
}

/// [`merge`] with a caller-supplied parser.
pub fn merge_with(
    parser: &dyn ArgumentParser,
    arguments: &CompilerArguments,
    override_text: Option<&str>,
) -> Result<CompilerArguments> {
    let mut merged = arguments.clone();
    let text = override_text.unwrap_or_default();
    if !text.trim().is_empty() {
        let tokens = split_arguments(text)?;
        debug!(count = tokens.len(), "merging override tokens");
        parser.parse(&tokens, &mut merged)?;
    }
    Ok(merged)
}

/// Check that `override_text` is well formed.
///
/// Whether text parses does not depend on the arguments it is applied to, so
/// text accepted here merges cleanly onto any arguments with the bundled parser.
pub fn check_override_text(override_text: &str) -> Result<()> {
    merge(&CompilerArguments::Metadata(MetadataArguments::default()), Some(override_text)).map(drop)
}
