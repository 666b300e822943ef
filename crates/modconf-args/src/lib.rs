//! Structured compiler arguments and free-form override parsing.
//!
//! - [`arguments`]: the per-platform argument values
//! - [`parser`]: command-line tokenizing and flag application
//! - [`factory`]: platform-aware construction with defaults stamped in
//! - [`merge`]: structured arguments plus override text, as a pure function

pub mod arguments;
pub mod error;
pub mod factory;
pub mod merge;
pub mod parser;

pub use arguments::{CommonArguments, CompilerArguments, JsArguments, JvmArguments, MetadataArguments};
pub use error::{ArgumentError, Result};
pub use factory::{create_compiler_arguments, default_compiler_arguments};
pub use merge::{check_override_text, merge, merge_with};
pub use parser::{split_arguments, to_command_line, ArgumentParser, CommandLineParser};
