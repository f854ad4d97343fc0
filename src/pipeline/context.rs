//! Per-run build context
//!
//! One build invocation exclusively owns its context: the configuration
//! store, the invocation options, and the template resolver all live here for
//! exactly one run. There is no ambient or global build state.

use crate::config::{git_metadata, ConfigStore, ConfigValue, ExpressionResolver, Manifest, TemplateResolver};
use crate::error::Result;
use crate::pipeline::options::BuildOptions;
use crate::ui::{Ui, Verbosity};
use std::path::{Path, PathBuf};

/// State owned by one build invocation
pub struct BuildContext {
    /// Project root (the manifest's directory)
    pub project_root: PathBuf,

    /// Parsed project manifest
    pub manifest: Manifest,

    /// Invocation options, read-only for the run
    pub options: BuildOptions,

    /// The configuration tree the steps read and write
    pub store: ConfigStore,

    /// Resolver for deferred template values
    pub resolver: Box<dyn TemplateResolver>,

    /// Terminal reporter
    pub ui: Ui,
}

impl BuildContext {
    /// Build a context for one run, seeding the store from the manifest
    ///
    /// Git branch and revision are captured here so the deferred banner
    /// template can see them at read time.
    pub fn new(
        project_root: PathBuf,
        manifest: Manifest,
        options: BuildOptions,
        verbosity: Verbosity,
    ) -> Self {
        let mut store = manifest.seed_store(&options.custom_name);

        let (branch, revision) = git_metadata(&project_root);
        // Seeded paths are fresh scalars, set cannot fail on them
        let _ = store.set("branch", ConfigValue::Literal(branch));
        let _ = store.set("revision", ConfigValue::Literal(revision));

        BuildContext {
            project_root,
            manifest,
            options,
            store,
            resolver: Box::new(ExpressionResolver::new()),
            ui: Ui::new(verbosity),
        }
    }

    /// Read a scalar from the store, expanding deferred templates
    pub fn get_string(&self, path: &str) -> Result<String> {
        self.store.get_string(path, self.resolver.as_ref())
    }

    /// Read a string list from the store, expanding deferred templates
    pub fn get_strings(&self, path: &str) -> Result<Vec<String>> {
        self.store.get_strings(path, self.resolver.as_ref())
    }

    /// The staging directory as an absolute path
    pub fn staging_dir(&self) -> PathBuf {
        self.project_root.join(&self.manifest.staging_dir)
    }

    /// The products directory as an absolute path
    pub fn products_dir(&self) -> PathBuf {
        self.project_root.join(&self.manifest.products_dir)
    }

    /// Resolve a project-relative path against the project root
    pub fn project_path(&self, rel: impl AsRef<Path>) -> PathBuf {
        self.project_root.join(rel)
    }
}
