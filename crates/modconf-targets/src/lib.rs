//! Target platform catalog and toolchain version registry for modconf.
//!
//! Everything in this crate is a closed, statically known table:
//! - **JVM targets:** bytecode versions the JVM backend can emit
//! - **Language versions:** language/API levels, with the newest stable one marked
//! - **Language features:** opt-in features gated on a minimum language version
//! - **Platforms:** the compilation target kinds, with one catalog built per process

pub mod error;
pub mod jvm;
pub mod language;
pub mod platform;

pub use error::{Result, TargetError};
pub use jvm::JvmTarget;
pub use language::{FeatureState, LanguageFeature, LanguageVersion};
pub use platform::TargetPlatformKind;
