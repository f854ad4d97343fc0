//! Pipeline steps and the executor boundary
//!
//! A build run is an ordered sequence of [`StepKind`] values. Each kind is
//! dispatched to exactly one [`StepExecutor`]; the shipped executors live in
//! [`crate::steps`], and tests substitute fakes through the registry.

use crate::pipeline::context::BuildContext;
use crate::pipeline::options::BuildTarget;
use std::collections::HashMap;
use std::fmt;

/// One concrete step in a build sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepKind {
    /// Remove the staging and products areas
    Clean,

    /// Compile stylesheets before anything is copied
    CompileStyles,

    /// Discover declarations and resolve the target's file set
    ResolveModules(BuildTarget),

    /// Rewrite resolved path lists into the forms later steps expect
    RemapPaths(BuildTarget),

    /// Copy the target's sources into the staging area
    Copy(BuildTarget),

    /// Copy readme/license files into the staging root
    CopyAncillary,

    /// Join the resolved files into a readable bundle
    Concatenate(BuildTarget),

    /// Produce a minified bundle
    Minify(BuildTarget),

    /// Package the staging area into the products archive
    Archive(BuildTarget),
}

/// Target-free step identifier, used as the registry key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StepId {
    Clean,
    CompileStyles,
    ResolveModules,
    RemapPaths,
    Copy,
    CopyAncillary,
    Concatenate,
    Minify,
    Archive,
}

impl StepKind {
    /// The registry key for this step
    pub fn id(&self) -> StepId {
        match self {
            StepKind::Clean => StepId::Clean,
            StepKind::CompileStyles => StepId::CompileStyles,
            StepKind::ResolveModules(_) => StepId::ResolveModules,
            StepKind::RemapPaths(_) => StepId::RemapPaths,
            StepKind::Copy(_) => StepId::Copy,
            StepKind::CopyAncillary => StepId::CopyAncillary,
            StepKind::Concatenate(_) => StepId::Concatenate,
            StepKind::Minify(_) => StepId::Minify,
            StepKind::Archive(_) => StepId::Archive,
        }
    }

    /// The target this step is parameterized on, if any
    pub fn target(&self) -> Option<BuildTarget> {
        match self {
            StepKind::ResolveModules(t)
            | StepKind::RemapPaths(t)
            | StepKind::Copy(t)
            | StepKind::Concatenate(t)
            | StepKind::Minify(t)
            | StepKind::Archive(t) => Some(*t),
            _ => None,
        }
    }
}

impl fmt::Display for StepKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StepKind::Clean => write!(f, "clean"),
            StepKind::CompileStyles => write!(f, "compileStyles"),
            StepKind::ResolveModules(t) => write!(f, "resolveModules:{}", t),
            StepKind::RemapPaths(t) => write!(f, "remapPaths:{}", t),
            StepKind::Copy(t) => write!(f, "copy:{}", t),
            StepKind::CopyAncillary => write!(f, "copyAncillary"),
            StepKind::Concatenate(t) => write!(f, "concatenate:{}", t),
            StepKind::Minify(t) => write!(f, "minify:{}", t),
            StepKind::Archive(t) => write!(f, "archive:{}", t),
        }
    }
}

/// An executor bound to one step kind
///
/// Executors must be idempotent with respect to re-invocation after a clean;
/// a failure is reported as an `Err` whose cause is opaque to the pipeline.
pub trait StepExecutor {
    fn execute(&self, step: &StepKind, ctx: &mut BuildContext) -> anyhow::Result<()>;
}

/// The collection of step executors a pipeline dispatches to
#[derive(Default)]
pub struct StepRegistry {
    executors: HashMap<StepId, Box<dyn StepExecutor>>,
}

impl StepRegistry {
    pub fn new() -> Self {
        StepRegistry {
            executors: HashMap::new(),
        }
    }

    /// Bind an executor to a step id, replacing any previous binding
    pub fn register(&mut self, id: StepId, executor: Box<dyn StepExecutor>) {
        self.executors.insert(id, executor);
    }

    /// Look up the executor for a step
    pub fn get(&self, id: StepId) -> Option<&dyn StepExecutor> {
        self.executors.get(&id).map(|e| e.as_ref())
    }
}
