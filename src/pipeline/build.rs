//! Sequence composition and the build runner
//!
//! The sequence for one build is a pure function of the target and the
//! source-mode flag. Execution is strictly sequential and fail-fast: the
//! first failing step halts the run, and the staging area is left for the
//! next clean to reset.

use crate::error::{ExecutionError, Result};
use crate::pipeline::context::BuildContext;
use crate::pipeline::options::BuildTarget;
use crate::pipeline::step::{StepKind, StepRegistry};

/// Compose the ordered step sequence for one build invocation
///
/// The only data-dependent fork is concatenate-vs-minify, selected purely by
/// `source_mode`. Ordering is load-bearing: clean precedes every write into
/// staging, resolution precedes remapping and copy, and the bundle step reads
/// the staged tree rather than the original sources.
pub fn compose_sequence(target: BuildTarget, source_mode: bool) -> Vec<StepKind> {
    vec![
        StepKind::Clean,
        StepKind::CompileStyles,
        StepKind::ResolveModules(target),
        StepKind::RemapPaths(target),
        StepKind::Copy(target),
        StepKind::CopyAncillary,
        if source_mode {
            StepKind::Concatenate(target)
        } else {
            StepKind::Minify(target)
        },
        StepKind::Archive(target),
    ]
}

/// Runs step sequences against a registry of executors
pub struct Pipeline {
    registry: StepRegistry,
}

impl Pipeline {
    pub fn new(registry: StepRegistry) -> Self {
        Pipeline { registry }
    }

    /// A pipeline bound to the shipped default executors
    pub fn with_default_steps() -> Self {
        Pipeline::new(crate::steps::default_registry())
    }

    /// Compose and run the build sequence for the context's options
    ///
    /// Returns the executed sequence on success. On failure the error names
    /// the step and carries its cause; no later step runs.
    pub fn run_build(&self, ctx: &mut BuildContext) -> Result<Vec<StepKind>> {
        let sequence = compose_sequence(ctx.options.target, ctx.options.source_mode);

        for step in &sequence {
            self.run_step(step, ctx)?;
        }

        Ok(sequence)
    }

    /// Run a single step, dispatching to its bound executor
    pub fn run_step(&self, step: &StepKind, ctx: &mut BuildContext) -> Result<()> {
        let executor = self
            .registry
            .get(step.id())
            .ok_or_else(|| ExecutionError::UnboundStep(step.to_string()))?;

        ctx.ui.print_step(&step.to_string());

        executor.execute(step, ctx).map_err(|cause| {
            ExecutionError::Step {
                step: step.to_string(),
                cause,
            }
        })?;

        Ok(())
    }
}
