//! Module discovery and resolution
//!
//! This module discovers per-module dependency declarations and computes the
//! ordered set of directories and files belonging to a build target.

pub mod declaration;
pub mod resolve;

// Re-export main types
pub use declaration::*;
pub use resolve::*;
