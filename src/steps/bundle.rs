//! Bundle production steps: concatenate, minify, archive

use crate::pipeline::{BuildContext, BuildTarget, StepExecutor, StepKind};
use crate::steps::shell::run_shell;
use crate::steps::target_of;
use anyhow::Context as _;
use std::fs;
use std::path::PathBuf;

/// Shell command used to package the staging tree when the manifest does not
/// configure one
const DEFAULT_ARCHIVER: &str = "zip -qr ${output} .";

/// Joins the resolved, staged files into a readable bundle
pub struct ConcatenateStep;

impl StepExecutor for ConcatenateStep {
    fn execute(&self, step: &StepKind, ctx: &mut BuildContext) -> anyhow::Result<()> {
        let target = target_of(step)?;
        let dest = write_concatenated_bundle(ctx, target)?;
        ctx.ui
            .print_info(&format!("wrote bundle {}", dest.display()));
        Ok(())
    }
}

/// Produces the minified bundle via the manifest's minifier command, falling
/// back to plain concatenation when none is configured
pub struct MinifyStep;

impl StepExecutor for MinifyStep {
    fn execute(&self, step: &StepKind, ctx: &mut BuildContext) -> anyhow::Result<()> {
        let target = target_of(step)?;

        let minifier = match &ctx.manifest.minifier {
            Some(command) => command.clone(),
            None => {
                ctx.ui
                    .print_info("no minifier configured, falling back to concatenation");
                let dest = write_concatenated_bundle(ctx, target)?;
                ctx.ui
                    .print_info(&format!("wrote bundle {}", dest.display()));
                return Ok(());
            }
        };

        let inputs = staged_bundle_inputs(ctx, target)?;
        let dest = ctx.get_string(&format!("concat.{}.dest", target))?;

        let dest_abs = ctx.project_path(&dest);
        if let Some(parent) = dest_abs.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating {}", parent.display()))?;
        }

        let command = minifier
            .replace("${files}", &inputs.join(" "))
            .replace("${output}", &dest);
        run_shell(&command, &ctx.project_root, false)
            .with_context(|| format!("minifier command '{}'", command))?;

        // The minified bundle carries the same banner as the source bundle
        let banner = ctx.get_string("banner")?;
        let minified = fs::read_to_string(&dest_abs)
            .with_context(|| format!("reading {}", dest_abs.display()))?;
        fs::write(&dest_abs, format!("{}{}", banner, minified))
            .with_context(|| format!("writing {}", dest_abs.display()))?;

        Ok(())
    }
}

/// Packages the staging tree into the products archive
pub struct ArchiveStep;

impl StepExecutor for ArchiveStep {
    fn execute(&self, step: &StepKind, ctx: &mut BuildContext) -> anyhow::Result<()> {
        let target = target_of(step)?;
        let archive_rel = ctx.get_string(&format!("compress.{}.archive", target))?;
        let archive = ctx.project_path(&archive_rel);

        if let Some(parent) = archive.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating {}", parent.display()))?;
        }

        let archiver = ctx
            .manifest
            .archiver
            .clone()
            .unwrap_or_else(|| DEFAULT_ARCHIVER.to_string());
        let command = archiver.replace("${output}", &archive.display().to_string());

        // The archiver runs from inside staging so archive paths are
        // staging-relative
        run_shell(&command, &ctx.staging_dir(), false)
            .with_context(|| format!("archiver command '{}'", command))?;

        ctx.ui
            .print_info(&format!("wrote archive {}", archive.display()));
        Ok(())
    }
}

/// The target's bundle inputs as project-relative staged paths
///
/// Rebasing is decided by target, not by inspecting the paths: custom
/// entries arrive pre-rebased by the remap step, while full-build entries
/// are always source-relative since remapPaths:all is a no-op.
fn staged_bundle_inputs(ctx: &BuildContext, target: BuildTarget) -> anyhow::Result<Vec<String>> {
    let files = ctx.get_strings(&format!("concat.{}.src", target))?;

    match target {
        BuildTarget::Custom => Ok(files),
        BuildTarget::All => Ok(files
            .into_iter()
            .map(|f| format!("{}/{}", ctx.manifest.staging_dir, f))
            .collect()),
    }
}

/// Concatenate the staged inputs with the banner into the bundle destination
fn write_concatenated_bundle(
    ctx: &BuildContext,
    target: BuildTarget,
) -> anyhow::Result<PathBuf> {
    let inputs = staged_bundle_inputs(ctx, target)?;
    let dest_rel = ctx.get_string(&format!("concat.{}.dest", target))?;
    let banner = ctx.get_string("banner")?;

    let mut bundle = banner;
    for (i, input) in inputs.iter().enumerate() {
        let path = ctx.project_path(input);
        let body = fs::read_to_string(&path)
            .with_context(|| format!("reading {}", path.display()))?;
        if i > 0 {
            bundle.push_str(";\n");
        }
        bundle.push_str(&body);
    }

    let dest = ctx.project_path(&dest_rel);
    if let Some(parent) = dest.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("creating {}", parent.display()))?;
    }
    fs::write(&dest, bundle).with_context(|| format!("writing {}", dest.display()))?;

    Ok(dest)
}
