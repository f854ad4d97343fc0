//! Common test utilities

use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// Manifest used by most fixture projects; tar stands in for zip so the
/// archive step has no dependency on a zip binary being installed.
pub const MANIFEST: &str = r#"
name: infusion
version: 1.2.3
archiver: "tar -cf ${output} ."
"#;

/// Write a file under `root`, creating parent directories
pub fn write_file(root: &Path, rel: &str, body: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, body).unwrap();
}

/// Create a fixture project with two modules (core, ui) and a manifest
pub fn create_project() -> TempDir {
    let temp = TempDir::new().unwrap();
    let root = temp.path();

    write_file(root, "distkit.yml", MANIFEST);
    write_file(root, "README.md", "# infusion\n");

    write_file(
        root,
        "src/core/coreDependencies.json",
        r#"{"name": "core", "dirs": ["src/core"], "files": ["src/core/a.js"]}"#,
    );
    write_file(root, "src/core/a.js", "var core = 1;");

    write_file(
        root,
        "src/ui/uiDependencies.json",
        r#"{"name": "ui", "dirs": ["src/ui"], "files": ["src/ui/b.js"]}"#,
    );
    write_file(root, "src/ui/b.js", "var ui = 2;");

    temp
}
