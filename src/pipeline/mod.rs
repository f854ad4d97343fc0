//! Task-graph assembly and execution
//!
//! This module composes the ordered step sequence for a build invocation and
//! runs it against a registry of step executors, fail-fast, one step at a
//! time.

pub mod build;
pub mod context;
pub mod mapper;
pub mod options;
pub mod step;

// Re-export main types
pub use build::*;
pub use context::*;
pub use mapper::*;
pub use options::*;
pub use step::*;
