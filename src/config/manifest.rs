//! Project manifest parsing and discovery
//!
//! The manifest (`distkit.yml`) declares the project identity, the source
//! roots to scan for module declarations, and the handful of external
//! commands the pipeline shells out to. Parsing it also seeds the
//! configuration store with the property tree the pipeline steps read.

use crate::config::store::ConfigStore;
use crate::config::value::ConfigValue;
use crate::error::{ConfigError, ConfigResult, Result};
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Default manifest file names to search for
const MANIFEST_FILE_NAMES: &[&str] = &["distkit.yml", "distkit.yaml"];

/// Parsed project manifest
#[derive(Debug, Clone, Deserialize)]
pub struct Manifest {
    /// Project name, used in bundle and archive names
    pub name: String,

    /// Project version, used in archive names and the banner
    pub version: String,

    /// Directories scanned for module declaration files
    #[serde(default = "default_source_roots")]
    pub source_roots: Vec<String>,

    /// Staging directory populated by the copy steps
    #[serde(default = "default_staging_dir")]
    pub staging_dir: String,

    /// Directory receiving the final packaged archives
    #[serde(default = "default_products_dir")]
    pub products_dir: String,

    /// Glob patterns copied into staging for the full bundle
    #[serde(default = "default_copy_all")]
    pub copy_all: Vec<String>,

    /// Files copied into the staging root for every target
    #[serde(default = "default_ancillary")]
    pub ancillary: Vec<String>,

    /// Optional shell command compiling stylesheets before copy
    #[serde(default)]
    pub styles: Option<String>,

    /// Optional shell command producing the minified bundle; when absent
    /// the minify step falls back to plain concatenation
    #[serde(default)]
    pub minifier: Option<String>,

    /// Shell command packaging the staging tree, run from the staging
    /// directory with `${output}` replaced by the archive path; defaults to
    /// the system zip tool
    #[serde(default)]
    pub archiver: Option<String>,

    /// Shell commands run by the lint operation
    #[serde(default)]
    pub lint: Vec<String>,

    /// Shell command run by the tests operation
    #[serde(default)]
    pub tests: Option<String>,
}

fn default_source_roots() -> Vec<String> {
    vec!["src".to_string()]
}

fn default_staging_dir() -> String {
    "build".to_string()
}

fn default_products_dir() -> String {
    "products".to_string()
}

fn default_copy_all() -> Vec<String> {
    vec![
        "src/**".to_string(),
        "tests/**".to_string(),
        "demos/**".to_string(),
    ]
}

fn default_ancillary() -> Vec<String> {
    vec!["README.*".to_string(), "*LICENSE*".to_string()]
}

/// Find the manifest by searching the current and parent directories
pub fn find_manifest_file() -> ConfigResult<PathBuf> {
    find_manifest_file_from(env::current_dir().map_err(|e| {
        ConfigError::Invalid(format!("Failed to get current directory: {}", e))
    })?)
}

/// Find the manifest starting from a specific directory
pub fn find_manifest_file_from(start_dir: PathBuf) -> ConfigResult<PathBuf> {
    let mut current_dir = start_dir;
    let mut searched_paths = Vec::new();

    loop {
        for file_name in MANIFEST_FILE_NAMES {
            let manifest_path = current_dir.join(file_name);
            searched_paths.push(manifest_path.display().to_string());

            if manifest_path.exists() && manifest_path.is_file() {
                return Ok(manifest_path);
            }
        }

        match current_dir.parent() {
            Some(parent) => current_dir = parent.to_path_buf(),
            None => {
                return Err(ConfigError::NotFound(searched_paths.join(", ")));
            }
        }
    }
}

/// Parse a manifest file from a path
pub fn parse_manifest_file(path: &Path) -> Result<Manifest> {
    let contents = fs::read_to_string(path)
        .map_err(|e| ConfigError::Invalid(format!("Failed to read file: {}", e)))?;
    parse_manifest(&contents)
}

/// Parse a manifest from a string
pub fn parse_manifest(yaml: &str) -> Result<Manifest> {
    let manifest: Manifest = serde_yaml::from_str(yaml)?;
    validate_manifest(&manifest)?;
    Ok(manifest)
}

/// Validate manifest invariants that serde cannot express
pub fn validate_manifest(manifest: &Manifest) -> ConfigResult<()> {
    if manifest.name.trim().is_empty() {
        return Err(ConfigError::Invalid("name must not be empty".to_string()));
    }
    if manifest.version.trim().is_empty() {
        return Err(ConfigError::Invalid(
            "version must not be empty".to_string(),
        ));
    }
    if manifest.source_roots.is_empty() {
        return Err(ConfigError::Invalid(
            "source_roots must not be empty".to_string(),
        ));
    }
    Ok(())
}

impl Manifest {
    /// Seed a configuration store with the property tree the steps read
    ///
    /// Bundle names and the banner are stored as deferred templates so that
    /// values written later in the run (git revision, resolved file lists)
    /// are visible when a step finally reads them.
    pub fn seed_store(&self, custom_name: &str) -> ConfigStore {
        let mut store = ConfigStore::new();

        // Infallible: these paths are disjoint, fresh, and non-indexed
        let mut set = |path: &str, value: ConfigValue| {
            store
                .set(path, value)
                .unwrap_or_else(|e| panic!("seeding '{}': {}", path, e));
        };

        set("pkg.name", ConfigValue::string(&self.name));
        set("pkg.version", ConfigValue::string(&self.version));

        set("allBuildName", ConfigValue::string("<%= pkg.name %>-all"));
        set(
            "customBuildName",
            ConfigValue::string(format!("<%= pkg.name %>-{}", custom_name)),
        );
        set(
            "banner",
            ConfigValue::string(
                "/*!\n <%= pkg.name %> - v<%= pkg.version %>\n \
                 branch: <%= branch %> revision: <%= revision %>*/\n",
            ),
        );

        set("clean.build", ConfigValue::string(&self.staging_dir));
        set("clean.products", ConfigValue::string(&self.products_dir));

        set(
            "copy.all.src",
            ConfigValue::list(self.copy_all.iter().cloned()),
        );
        set("copy.custom.src", ConfigValue::List(Vec::new()));
        set(
            "copy.ancillary.src",
            ConfigValue::list(self.ancillary.iter().cloned()),
        );

        set("concat.all.src", ConfigValue::List(Vec::new()));
        set(
            "concat.all.dest",
            ConfigValue::string(format!(
                "{}/<%= allBuildName %>.js",
                self.staging_dir
            )),
        );
        set("concat.custom.src", ConfigValue::List(Vec::new()));
        set(
            "concat.custom.dest",
            ConfigValue::string(format!(
                "{}/<%= customBuildName %>.js",
                self.staging_dir
            )),
        );

        set(
            "compress.all.archive",
            ConfigValue::string(format!(
                "{}/<%= allBuildName %>-<%= pkg.version %>.zip",
                self.products_dir
            )),
        );
        set(
            "compress.custom.archive",
            ConfigValue::string(format!(
                "{}/<%= customBuildName %>-<%= pkg.version %>.zip",
                self.products_dir
            )),
        );

        store
    }
}

/// Capture git branch and revision for the banner template
///
/// Both default to empty strings outside a git checkout; a missing banner
/// detail is not worth failing a build over.
pub fn git_metadata(dir: &Path) -> (String, String) {
    let branch = git_output(dir, &["rev-parse", "--abbrev-ref", "HEAD"]);
    let revision = git_output(dir, &["rev-parse", "--verify", "--short", "HEAD"]);
    (branch, revision)
}

fn git_output(dir: &Path, args: &[&str]) -> String {
    Command::new("git")
        .args(args)
        .current_dir(dir)
        .output()
        .ok()
        .filter(|out| out.status.success())
        .map(|out| String::from_utf8_lossy(&out.stdout).trim().to_string())
        .unwrap_or_default()
}
