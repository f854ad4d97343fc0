//! Configuration tree, templating, and project manifest
//!
//! This module holds the in-memory configuration store the pipeline steps
//! read, the deferred-template machinery, and distkit.yml parsing.

pub mod manifest;
pub mod store;
pub mod template;
pub mod value;

// Re-export main types
pub use manifest::*;
pub use store::*;
pub use template::*;
pub use value::*;
