//! Filesystem steps: clean, copy, ancillary copy

use crate::pipeline::{BuildContext, StepExecutor, StepKind};
use crate::steps::target_of;
use anyhow::Context as _;
use std::fs;
use std::path::Path;

/// Removes the staging and products areas
pub struct CleanStep;

impl StepExecutor for CleanStep {
    fn execute(&self, _step: &StepKind, ctx: &mut BuildContext) -> anyhow::Result<()> {
        for path in ["clean.build", "clean.products"] {
            let dir = ctx.get_string(path)?;
            remove_dir(&ctx.project_path(&dir))?;
        }
        Ok(())
    }
}

fn remove_dir(path: &Path) -> anyhow::Result<()> {
    match fs::remove_dir_all(path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e).with_context(|| format!("removing {}", path.display())),
    }
}

/// Copies the target's source patterns into the staging area
pub struct CopyStep;

impl StepExecutor for CopyStep {
    fn execute(&self, step: &StepKind, ctx: &mut BuildContext) -> anyhow::Result<()> {
        let target = target_of(step)?;
        let patterns = ctx.get_strings(&format!("copy.{}.src", target))?;
        copy_patterns(ctx, &patterns)
    }
}

/// Copies readme and license files into the staging root
pub struct CopyAncillaryStep;

impl StepExecutor for CopyAncillaryStep {
    fn execute(&self, _step: &StepKind, ctx: &mut BuildContext) -> anyhow::Result<()> {
        let patterns = ctx.get_strings("copy.ancillary.src")?;
        copy_patterns(ctx, &patterns)
    }
}

/// Expand each glob pattern against the project root and copy every matched
/// file into staging, preserving project-relative paths
fn copy_patterns(ctx: &BuildContext, patterns: &[String]) -> anyhow::Result<()> {
    let staging = ctx.staging_dir();
    fs::create_dir_all(&staging)
        .with_context(|| format!("creating {}", staging.display()))?;

    for pattern in patterns {
        let absolute = format!("{}/{}", ctx.project_root.display(), pattern);
        for entry in glob::glob(&absolute)? {
            let path = entry?;
            if !path.is_file() {
                continue;
            }

            let rel = path
                .strip_prefix(&ctx.project_root)
                .unwrap_or(&path)
                .to_path_buf();
            let dest = staging.join(&rel);

            if let Some(parent) = dest.parent() {
                fs::create_dir_all(parent)
                    .with_context(|| format!("creating {}", parent.display()))?;
            }
            fs::copy(&path, &dest)
                .with_context(|| format!("copying {} to {}", path.display(), dest.display()))?;

            ctx.ui.print_debug(&format!("copied {}", rel.display()));
        }
    }

    Ok(())
}
