//! Build invocation options
//!
//! Options are fixed at invocation start and read-only for the duration of
//! one build run.

use std::fmt;
use std::str::FromStr;

/// Which distribution variant a build produces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BuildTarget {
    /// Every discovered module
    All,

    /// An explicitly opted-in subset of modules
    Custom,
}

impl fmt::Display for BuildTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BuildTarget::All => write!(f, "all"),
            BuildTarget::Custom => write!(f, "custom"),
        }
    }
}

impl FromStr for BuildTarget {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(BuildTarget::All),
            "custom" => Ok(BuildTarget::Custom),
            other => Err(format!(
                "unknown build target '{}' (expected 'all' or 'custom')",
                other
            )),
        }
    }
}

/// Options for one build invocation
#[derive(Debug, Clone)]
pub struct BuildOptions {
    /// Target variant to build
    pub target: BuildTarget,

    /// Name suffix for the custom bundle
    pub custom_name: String,

    /// Module names to include in a custom bundle
    pub include: Vec<String>,

    /// Module names to exclude from a custom bundle
    pub exclude: Vec<String>,

    /// Produce a readable source bundle instead of a minified one
    pub source_mode: bool,
}

impl BuildOptions {
    /// Options for a full build with defaults everywhere else
    pub fn for_target(target: BuildTarget) -> Self {
        BuildOptions {
            target,
            custom_name: "custom".to_string(),
            include: Vec::new(),
            exclude: Vec::new(),
            source_mode: false,
        }
    }
}
