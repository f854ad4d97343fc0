//! Error types for distkit

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for distkit operations
pub type Result<T> = std::result::Result<T, DistkitError>;

/// Main error type for distkit
#[derive(Error, Debug)]
pub enum DistkitError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Module resolution errors
    #[error("Module resolution error: {0}")]
    Resolve(#[from] ResolveError),

    /// Template resolution errors
    #[error("Template error: {0}")]
    Template(#[from] TemplateError),

    /// Pipeline execution errors
    #[error("Execution error: {0}")]
    Execution(#[from] ExecutionError),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// YAML parsing errors
    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Manifest parsing and configuration-store errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to find manifest file (searched: {0})")]
    NotFound(String),

    #[error("Invalid manifest: {0}")]
    Invalid(String),

    #[error("Configuration path '{0}' is not defined")]
    PathNotFound(String),

    #[error("Configuration path '{path}' is not a {expected}")]
    TypeMismatch { path: String, expected: &'static str },
}

/// Module resolution errors
#[derive(Error, Debug)]
pub enum ResolveError {
    #[error("Unknown module '{0}'")]
    UnknownModule(String),

    #[error("Failed to read declaration '{path}': {error}")]
    Declaration { path: PathBuf, error: String },

    #[error("Invalid declaration pattern: {0}")]
    Pattern(String),
}

/// Template resolution errors
#[derive(Error, Debug)]
pub enum TemplateError {
    #[error("Template expression '{0}' cannot be resolved")]
    Unresolved(String),

    #[error("Recursive template expansion detected")]
    Recursive,
}

/// Pipeline execution errors
#[derive(Error, Debug)]
pub enum ExecutionError {
    /// A step executor reported failure; the pipeline halts here.
    #[error("Step '{step}' failed: {cause}")]
    Step { step: String, cause: anyhow::Error },

    #[error("No executor bound to step '{0}'")]
    UnboundStep(String),

    #[error("Command failed with exit code {0:?}")]
    CommandFailed(Option<i32>),

    #[error("No command configured for '{0}'")]
    MissingCommand(String),

    #[error("Environment error: {0}")]
    Environment(String),
}

/// Specialized result type for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Specialized result type for module resolution operations
pub type ResolveResult<T> = std::result::Result<T, ResolveError>;

/// Specialized result type for template operations
pub type TemplateResult<T> = std::result::Result<T, TemplateError>;

/// Specialized result type for execution operations
pub type ExecutionResult<T> = std::result::Result<T, ExecutionError>;
