//! Stylesheet compilation step
//!
//! Stylesheets are compiled by an external preprocessor before anything is
//! copied, so the staged tree carries compiled assets rather than their
//! sources. The preprocessor itself is whatever shell command the manifest
//! configures.

use crate::pipeline::{BuildContext, StepExecutor, StepKind};
use crate::steps::shell::run_shell;
use anyhow::Context as _;

/// Runs the manifest's style-compilation command, if any
pub struct CompileStylesStep;

impl StepExecutor for CompileStylesStep {
    fn execute(&self, _step: &StepKind, ctx: &mut BuildContext) -> anyhow::Result<()> {
        let command = match &ctx.manifest.styles {
            Some(command) => command.clone(),
            None => {
                ctx.ui.print_debug("no style command configured");
                return Ok(());
            }
        };

        run_shell(&command, &ctx.project_root, false)
            .with_context(|| format!("style command '{}'", command))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::parse_manifest;
    use crate::pipeline::{BuildOptions, BuildTarget};
    use crate::ui::Verbosity;
    use tempfile::TempDir;

    fn context_with(temp: &TempDir, yaml: &str) -> BuildContext {
        let manifest = parse_manifest(yaml).unwrap();
        BuildContext::new(
            temp.path().to_path_buf(),
            manifest,
            BuildOptions::for_target(BuildTarget::All),
            Verbosity::Silent,
        )
    }

    #[test]
    fn test_no_style_command_is_a_no_op() {
        let temp = TempDir::new().unwrap();
        let mut ctx = context_with(&temp, "name: infusion\nversion: 1.0.0\n");
        assert!(CompileStylesStep
            .execute(&StepKind::CompileStyles, &mut ctx)
            .is_ok());
    }

    #[test]
    fn test_style_command_runs_in_project_root() {
        let temp = TempDir::new().unwrap();
        let mut ctx = context_with(
            &temp,
            "name: infusion\nversion: 1.0.0\nstyles: \"touch compiled.css\"\n",
        );

        CompileStylesStep
            .execute(&StepKind::CompileStyles, &mut ctx)
            .unwrap();

        assert!(temp.path().join("compiled.css").exists());
    }

    #[test]
    fn test_failing_style_command_is_an_error() {
        let temp = TempDir::new().unwrap();
        let mut ctx = context_with(
            &temp,
            "name: infusion\nversion: 1.0.0\nstyles: \"false\"\n",
        );

        let result = CompileStylesStep.execute(&StepKind::CompileStyles, &mut ctx);
        assert!(result.is_err());
    }
}
