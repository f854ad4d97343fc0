//! Integration tests for declaration discovery and target resolution

mod common;

use common::{create_project, write_file};
use distkit::error::ResolveError;
use distkit::pipeline::BuildTarget;
use distkit::resolver::{discover, resolve};

fn names(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

#[test]
fn test_resolve_all_from_discovered_declarations() {
    let project = create_project();
    let declarations = discover(project.path(), &names(&["src"])).unwrap();

    let set = resolve(&declarations, BuildTarget::All, &[], &[]).unwrap();
    assert_eq!(set.dirs, vec!["src/core", "src/ui"]);
    assert_eq!(set.files, vec!["src/core/a.js", "src/ui/b.js"]);
}

#[test]
fn test_resolve_custom_include_subset() {
    let project = create_project();
    let declarations = discover(project.path(), &names(&["src"])).unwrap();

    let set = resolve(&declarations, BuildTarget::Custom, &names(&["ui"]), &[]).unwrap();
    assert_eq!(set.dirs, vec!["src/ui"]);
    assert_eq!(set.files, vec!["src/ui/b.js"]);
}

#[test]
fn test_resolve_custom_exclude_wins() {
    let project = create_project();
    let declarations = discover(project.path(), &names(&["src"])).unwrap();

    let set = resolve(
        &declarations,
        BuildTarget::Custom,
        &names(&["core", "ui"]),
        &names(&["ui"]),
    )
    .unwrap();
    assert_eq!(set.dirs, vec!["src/core"]);
    assert_eq!(set.files, vec!["src/core/a.js"]);
}

#[test]
fn test_resolve_custom_exclude_only_keeps_the_rest() {
    let project = create_project();
    let declarations = discover(project.path(), &names(&["src"])).unwrap();

    let set = resolve(&declarations, BuildTarget::Custom, &[], &names(&["ui"])).unwrap();
    assert_eq!(set.dirs, vec!["src/core"]);
    assert_eq!(set.files, vec!["src/core/a.js"]);
}

#[test]
fn test_resolve_custom_unknown_module() {
    let project = create_project();
    let declarations = discover(project.path(), &names(&["src"])).unwrap();

    let result = resolve(
        &declarations,
        BuildTarget::Custom,
        &names(&["nonexistent"]),
        &[],
    );
    match result {
        Err(ResolveError::UnknownModule(name)) => assert_eq!(name, "nonexistent"),
        other => panic!("expected UnknownModule, got {:?}", other),
    }
}

#[test]
fn test_discovery_order_is_lexical_across_new_modules() {
    let project = create_project();
    // "animation" sorts before both existing modules
    write_file(
        project.path(),
        "src/animation/animationDependencies.json",
        r#"{"name": "animation", "dirs": ["src/animation"], "files": ["src/animation/c.js"]}"#,
    );

    let declarations = discover(project.path(), &names(&["src"])).unwrap();
    let discovered: Vec<&str> = declarations.iter().map(|d| d.name.as_str()).collect();
    assert_eq!(discovered, vec!["animation", "core", "ui"]);
}

#[test]
fn test_malformed_declaration_fails_discovery() {
    let project = create_project();
    write_file(
        project.path(),
        "src/broken/brokenDependencies.json",
        "{not json",
    );

    let result = discover(project.path(), &names(&["src"]));
    assert!(matches!(result, Err(ResolveError::Declaration { .. })));
}
