//! Module declaration files
//!
//! Each discoverable module ships one JSON declaration file, identified by a
//! fixed filename suffix, listing the module's name and the directories and
//! files it contributes to a bundle.

use crate::error::{ResolveError, ResolveResult};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Filename suffix identifying a declaration file
pub const DECLARATION_SUFFIX: &str = "Dependencies.json";

/// One module's contribution to a bundle
#[derive(Debug, Clone, Deserialize)]
pub struct ModuleDeclaration {
    /// Module name, matched against include/exclude filters
    pub name: String,

    /// Directories this module contributes
    #[serde(default)]
    pub dirs: Vec<String>,

    /// Files this module contributes, in concatenation order
    #[serde(default)]
    pub files: Vec<String>,
}

impl ModuleDeclaration {
    /// Parse a declaration from a file
    pub fn from_file(path: &Path) -> ResolveResult<Self> {
        let contents = fs::read_to_string(path).map_err(|e| ResolveError::Declaration {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        serde_json::from_str(&contents).map_err(|e| ResolveError::Declaration {
            path: path.to_path_buf(),
            error: e.to_string(),
        })
    }
}

/// Discover every declaration under the given source roots
///
/// Discovery order is lexical by path. Downstream concatenation order (and so
/// build reproducibility) relies on this being the only ordering rule.
pub fn discover(project_root: &Path, source_roots: &[String]) -> ResolveResult<Vec<ModuleDeclaration>> {
    let mut paths: Vec<PathBuf> = Vec::new();

    for root in source_roots {
        let pattern = format!(
            "{}/**/*{}",
            project_root.join(root).display(),
            DECLARATION_SUFFIX
        );
        let matches =
            glob::glob(&pattern).map_err(|e| ResolveError::Pattern(e.to_string()))?;
        for entry in matches {
            match entry {
                Ok(path) => paths.push(path),
                Err(e) => {
                    return Err(ResolveError::Declaration {
                        path: e.path().to_path_buf(),
                        error: e.to_string(),
                    })
                }
            }
        }
    }

    paths.sort();
    paths.dedup();

    paths
        .iter()
        .map(|path| ModuleDeclaration::from_file(path))
        .collect()
}
