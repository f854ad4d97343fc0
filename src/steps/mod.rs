//! Shipped step executors
//!
//! One executor per step id, bound through [`default_registry`]. The
//! pipeline itself only knows the [`StepExecutor`] contract; tests substitute
//! fakes by building their own registry.

pub mod bundle;
pub mod fs;
pub mod modules;
pub mod shell;
pub mod styles;

pub use bundle::{ArchiveStep, ConcatenateStep, MinifyStep};
pub use fs::{CleanStep, CopyAncillaryStep, CopyStep};
pub use modules::{RemapPathsStep, ResolveModulesStep};
pub use styles::CompileStylesStep;

use crate::pipeline::{StepId, StepKind, StepRegistry};

/// The registry binding every step id to its shipped executor
pub fn default_registry() -> StepRegistry {
    let mut registry = StepRegistry::new();
    registry.register(StepId::Clean, Box::new(CleanStep));
    registry.register(StepId::CompileStyles, Box::new(CompileStylesStep));
    registry.register(StepId::ResolveModules, Box::new(ResolveModulesStep));
    registry.register(StepId::RemapPaths, Box::new(RemapPathsStep));
    registry.register(StepId::Copy, Box::new(CopyStep));
    registry.register(StepId::CopyAncillary, Box::new(CopyAncillaryStep));
    registry.register(StepId::Concatenate, Box::new(ConcatenateStep));
    registry.register(StepId::Minify, Box::new(MinifyStep));
    registry.register(StepId::Archive, Box::new(ArchiveStep));
    registry
}

/// The target a parameterized step was invoked with
pub(crate) fn target_of(step: &StepKind) -> anyhow::Result<crate::pipeline::BuildTarget> {
    step.target()
        .ok_or_else(|| anyhow::anyhow!("step '{}' takes no build target", step))
}
