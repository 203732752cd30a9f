//! Target language identifiers.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A supported output language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Target {
    #[serde(alias = "dotnet")]
    CSharp,
    Go,
    Python,
}

impl Target {
    /// Every target, in dispatch order.
    pub const ALL: [Target; 3] = [Target::CSharp, Target::Go, Target::Python];

    pub fn name(&self) -> &'static str {
        match self {
            Target::CSharp => "csharp",
            Target::Go => "go",
            Target::Python => "python",
        }
    }

    /// File extension for generated programs.
    pub fn extension(&self) -> &'static str {
        match self {
            Target::CSharp => "cs",
            Target::Go => "go",
            Target::Python => "py",
        }
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown target `{0}` (expected one of: csharp, go, python)")]
pub struct UnknownTarget(pub String);

impl FromStr for Target {
    type Err = UnknownTarget;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "csharp" | "cs" | "dotnet" => Ok(Target::CSharp),
            "go" | "golang" => Ok(Target::Go),
            "python" | "py" => Ok(Target::Python),
            _ => Err(UnknownTarget(s.to_string())),
        }
    }
}
