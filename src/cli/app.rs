//! Main CLI application

use crate::config::{find_manifest_file, parse_manifest_file, Manifest};
use crate::error::{ExecutionError, Result};
use crate::pipeline::{BuildContext, BuildOptions, BuildTarget, Pipeline};
use crate::steps::shell::run_shell;
use crate::ui::{Ui, Verbosity};
use clap::{Arg, ArgAction, ArgMatches, Command};
use std::path::{Path, PathBuf};

/// Build the clap command tree
fn build_command() -> Command {
    Command::new("distkit")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Assembles distribution bundles from module declarations")
        .arg(
            Arg::new("file")
                .short('f')
                .long("file")
                .value_name("FILE")
                .help("Path to the distkit.yml manifest")
                .global(true),
        )
        .arg(
            Arg::new("quiet")
                .short('q')
                .long("quiet")
                .help("Only print errors")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .arg(
            Arg::new("silent")
                .short('s')
                .long("silent")
                .help("Print no output")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Print verbose output")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .subcommand(
            Command::new("build")
                .about("Build a distribution bundle")
                .arg(
                    Arg::new("target")
                        .value_name("TARGET")
                        .help("Build target: all or custom")
                        .default_value("all"),
                )
                .arg(
                    Arg::new("source")
                        .long("source")
                        .help("Produce a readable source bundle instead of a minified one")
                        .action(ArgAction::SetTrue),
                )
                .arg(
                    Arg::new("include")
                        .long("include")
                        .value_name("MODULES")
                        .value_delimiter(',')
                        .help("Comma-separated module names to include in a custom bundle"),
                )
                .arg(
                    Arg::new("exclude")
                        .long("exclude")
                        .value_name("MODULES")
                        .value_delimiter(',')
                        .help("Comma-separated module names to exclude from a custom bundle"),
                )
                .arg(
                    Arg::new("name")
                        .long("name")
                        .value_name("NAME")
                        .help("Name suffix for the custom bundle")
                        .default_value("custom"),
                ),
        )
        .subcommand(Command::new("lint").about("Run the manifest's lint commands"))
        .subcommand(Command::new("tests").about("Run the manifest's test command"))
}

/// Get verbosity level from matches
fn get_verbosity(matches: &ArgMatches) -> Verbosity {
    if matches.get_flag("silent") {
        Verbosity::Silent
    } else if matches.get_flag("quiet") {
        Verbosity::Quiet
    } else if matches.get_flag("verbose") {
        Verbosity::Verbose
    } else {
        Verbosity::Normal
    }
}

/// Build invocation options from the build subcommand's matches
fn parse_build_options(matches: &ArgMatches) -> Result<BuildOptions> {
    let target: BuildTarget = matches
        .get_one::<String>("target")
        .map(String::as_str)
        .unwrap_or("all")
        .parse()
        .map_err(crate::error::ConfigError::Invalid)?;

    let collect = |id: &str| -> Vec<String> {
        matches
            .get_many::<String>(id)
            .map(|values| values.cloned().collect())
            .unwrap_or_default()
    };

    Ok(BuildOptions {
        target,
        custom_name: matches
            .get_one::<String>("name")
            .cloned()
            .unwrap_or_else(|| "custom".to_string()),
        include: collect("include"),
        exclude: collect("exclude"),
        source_mode: matches.get_flag("source"),
    })
}

/// Locate and parse the manifest, honoring an explicit -f FILE
fn load_manifest(matches: &ArgMatches) -> Result<(Manifest, PathBuf)> {
    let path = match matches.get_one::<String>("file") {
        Some(file) => PathBuf::from(file),
        None => find_manifest_file()?,
    };
    let manifest = parse_manifest_file(&path)?;

    let project_root = path
        .parent()
        .map(|p| p.to_path_buf())
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| PathBuf::from("."));

    Ok((manifest, project_root))
}

/// Run the lint commands configured in the manifest, fail-fast
fn run_lint(manifest: &Manifest, root: &Path, ui: &Ui) -> Result<()> {
    if manifest.lint.is_empty() {
        return Err(ExecutionError::MissingCommand("lint".to_string()).into());
    }
    for command in &manifest.lint {
        ui.print_step(&format!("lint: {}", command));
        run_shell(command, root, ui.verbosity() < Verbosity::Normal)?;
    }
    Ok(())
}

/// Run the test command configured in the manifest
fn run_tests(manifest: &Manifest, root: &Path, ui: &Ui) -> Result<()> {
    let command = manifest
        .tests
        .as_ref()
        .ok_or_else(|| ExecutionError::MissingCommand("tests".to_string()))?;
    ui.print_step(&format!("tests: {}", command));
    run_shell(command, root, false)?;
    Ok(())
}

/// Run the CLI application
pub fn run() -> Result<()> {
    let mut command = build_command();
    let matches = command.clone().get_matches();
    let verbosity = get_verbosity(&matches);

    let (name, sub_matches) = match matches.subcommand() {
        Some(pair) => pair,
        None => {
            command.print_help().ok();
            println!();
            return Ok(());
        }
    };

    let (manifest, project_root) = load_manifest(&matches)?;
    let ui = Ui::new(verbosity);

    match name {
        "build" => {
            let options = parse_build_options(sub_matches)?;
            let mut ctx =
                BuildContext::new(project_root, manifest, options, verbosity);
            let sequence = Pipeline::with_default_steps().run_build(&mut ctx)?;
            ui.print_info(&format!("completed {} steps", sequence.len()));
            Ok(())
        }
        "lint" => run_lint(&manifest, &project_root, &ui),
        "tests" => run_tests(&manifest, &project_root, &ui),
        // clap rejects unknown subcommands before we get here
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_verbosity_normal() {
        let matches = build_command().get_matches_from(vec!["distkit"]);
        assert_eq!(get_verbosity(&matches), Verbosity::Normal);
    }

    #[test]
    fn test_get_verbosity_silent_wins() {
        let matches = build_command().get_matches_from(vec!["distkit", "-s", "-v"]);
        assert_eq!(get_verbosity(&matches), Verbosity::Silent);
    }

    #[test]
    fn test_build_defaults() {
        let matches = build_command().get_matches_from(vec!["distkit", "build"]);
        let (_, sub) = matches.subcommand().unwrap();
        let options = parse_build_options(sub).unwrap();
        assert_eq!(options.target, BuildTarget::All);
        assert!(!options.source_mode);
        assert!(options.include.is_empty());
        assert_eq!(options.custom_name, "custom");
    }

    #[test]
    fn test_build_custom_with_filters() {
        let matches = build_command().get_matches_from(vec![
            "distkit", "build", "custom", "--source", "--include", "core,ui", "--exclude",
            "ui", "--name", "mobile",
        ]);
        let (_, sub) = matches.subcommand().unwrap();
        let options = parse_build_options(sub).unwrap();
        assert_eq!(options.target, BuildTarget::Custom);
        assert!(options.source_mode);
        assert_eq!(options.include, vec!["core", "ui"]);
        assert_eq!(options.exclude, vec!["ui"]);
        assert_eq!(options.custom_name, "mobile");
    }

    #[test]
    fn test_unknown_target_is_an_error() {
        let matches = build_command().get_matches_from(vec!["distkit", "build", "dev"]);
        let (_, sub) = matches.subcommand().unwrap();
        assert!(parse_build_options(sub).is_err());
    }
}
