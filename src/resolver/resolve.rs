//! Target resolution over discovered module declarations
//!
//! Resolution turns the declaration set into the ordered directory and file
//! lists for one build target, honoring include/exclude filters for custom
//! bundles.

use crate::pipeline::BuildTarget;
use crate::resolver::declaration::ModuleDeclaration;
use crate::error::{ResolveError, ResolveResult};
use std::collections::HashSet;

/// Ordered directories and files making up one target's bundle
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResolvedFileSet {
    pub dirs: Vec<String>,
    pub files: Vec<String>,
}

/// Compute the file set for a target from the discovered declarations
///
/// For `All`, every declaration contributes, in discovery order. For
/// `Custom`, the include filter applies only when `include` is non-empty;
/// with it empty, a non-empty `exclude` selects every module not excluded.
/// Exclude wins when a name appears in both. An empty include and exclude
/// yields an empty set: custom bundles are explicit opt-in.
///
/// Any include or exclude name that matches no discovered declaration fails
/// with [`ResolveError::UnknownModule`] before anything else happens, since a
/// silently empty (or silently widened) custom bundle is a likely user error.
pub fn resolve(
    declarations: &[ModuleDeclaration],
    target: BuildTarget,
    include: &[String],
    exclude: &[String],
) -> ResolveResult<ResolvedFileSet> {
    match target {
        BuildTarget::All => Ok(aggregate(declarations.iter())),
        BuildTarget::Custom => {
            let known: HashSet<&str> = declarations.iter().map(|d| d.name.as_str()).collect();
            for name in include.iter().chain(exclude.iter()) {
                if !known.contains(name.as_str()) {
                    return Err(ResolveError::UnknownModule(name.clone()));
                }
            }

            if include.is_empty() && exclude.is_empty() {
                return Ok(ResolvedFileSet::default());
            }

            let included: HashSet<&str> = include.iter().map(String::as_str).collect();
            let excluded: HashSet<&str> = exclude.iter().map(String::as_str).collect();

            Ok(aggregate(declarations.iter().filter(|d| {
                let name = d.name.as_str();
                (included.is_empty() || included.contains(name)) && !excluded.contains(name)
            })))
        }
    }
}

fn aggregate<'a>(declarations: impl Iterator<Item = &'a ModuleDeclaration>) -> ResolvedFileSet {
    let mut set = ResolvedFileSet::default();
    for decl in declarations {
        set.dirs.extend(decl.dirs.iter().cloned());
        set.files.extend(decl.files.iter().cloned());
    }
    set
}
