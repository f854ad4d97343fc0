//! distkit - a build pipeline orchestrator for distribution bundles
//!
//! distkit assembles "full" and "custom" distribution bundles from
//! per-module dependency declaration files, driving an ordered sequence of
//! build steps (clean, style compilation, module resolution, copy,
//! concatenation or minification, archiving) over a templated configuration
//! tree.

// Public modules
pub mod cli;
pub mod config;
pub mod error;
pub mod pipeline;
pub mod resolver;
pub mod steps;
pub mod ui;

// Re-export commonly used types
pub use error::{DistkitError, Result};

/// Current version of distkit
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
