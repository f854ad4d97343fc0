//! Module resolution and path remapping steps

use crate::config::ConfigValue;
use crate::pipeline::{apply_map, BuildContext, BuildTarget, StepExecutor, StepKind};
use crate::resolver;
use crate::steps::target_of;

/// Discovers module declarations and writes the target's resolved file set
/// into the configuration store
pub struct ResolveModulesStep;

impl StepExecutor for ResolveModulesStep {
    fn execute(&self, step: &StepKind, ctx: &mut BuildContext) -> anyhow::Result<()> {
        let target = target_of(step)?;

        let declarations =
            resolver::discover(&ctx.project_root, &ctx.manifest.source_roots)?;
        let set = resolver::resolve(
            &declarations,
            target,
            &ctx.options.include,
            &ctx.options.exclude,
        )?;

        ctx.ui.print_info(&format!(
            "resolved {} dirs, {} files for target '{}'",
            set.dirs.len(),
            set.files.len(),
            target
        ));

        let prefix = format!("modules.{}.output", target);
        ctx.store.set(
            &format!("{}.dirs", prefix),
            ConfigValue::list(set.dirs.iter().cloned()),
        )?;
        ctx.store.set(
            &format!("{}.files", prefix),
            ConfigValue::list(set.files.iter().cloned()),
        )?;

        // Downstream steps read their inputs from copy.* and concat.*
        if target == BuildTarget::Custom {
            ctx.store.set(
                "copy.custom.src",
                ConfigValue::list(set.dirs.iter().cloned()),
            )?;
        }
        ctx.store.set(
            &format!("concat.{}.src", target),
            ConfigValue::list(set.files.iter().cloned()),
        )?;

        Ok(())
    }
}

/// Rewrites resolved path lists into the forms the copy and bundle steps
/// expect
///
/// A no-op for the full build: its copy patterns already cover the whole
/// tree, and the bundle step rebases full-build inputs itself.
pub struct RemapPathsStep;

impl StepExecutor for RemapPathsStep {
    fn execute(&self, step: &StepKind, ctx: &mut BuildContext) -> anyhow::Result<()> {
        let target = target_of(step)?;
        if target == BuildTarget::All {
            return Ok(());
        }

        // Widen contributed directories into recursive copy patterns
        apply_map(&mut ctx.store, "copy.custom.src", |dir| {
            format!("{}/**", dir)
        })?;

        // Rebase bundle inputs into the staging tree
        let staging = ctx.manifest.staging_dir.clone();
        apply_map(&mut ctx.store, "concat.custom.src", |file| {
            format!("{}/{}", staging, file)
        })?;

        Ok(())
    }
}
