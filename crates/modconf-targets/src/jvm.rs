//! JVM bytecode targets.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TargetError;

/// A JVM bytecode version the compiler can target.
///
/// Variants are declared oldest first; the derived ordering follows the
/// declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum JvmTarget {
    /// Java 6 bytecode.
    #[serde(rename = "1.6")]
    Jvm1_6,
    /// Java 8 bytecode.
    #[serde(rename = "1.8")]
    Jvm1_8,
}

impl JvmTarget {
    /// Target used when nothing else is configured.
    pub const DEFAULT: JvmTarget = JvmTarget::Jvm1_6;

    /// Every target, oldest first.
    pub const ALL: [JvmTarget; 2] = [JvmTarget::Jvm1_6, JvmTarget::Jvm1_8];

    /// The user-facing version string, e.g. `"1.8"`.
    pub fn description(&self) -> &'static str {
        match self {
            JvmTarget::Jvm1_6 => "1.6",
            JvmTarget::Jvm1_8 => "1.8",
        }
    }

    /// Position of this target in [`JvmTarget::ALL`].
    pub fn ordinal(&self) -> usize {
        match self {
            JvmTarget::Jvm1_6 => 0,
            JvmTarget::Jvm1_8 => 1,
        }
    }

    /// Look up a target by its exact description.
    pub fn from_string(s: &str) -> Option<JvmTarget> {
        Self::ALL.into_iter().find(|t| t.description() == s)
    }
}

impl fmt::Display for JvmTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}

impl FromStr for JvmTarget {
    type Err = TargetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_string(s).ok_or_else(|| TargetError::UnknownJvmTarget { value: s.into() })
    }
}
