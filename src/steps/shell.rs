//! Shell invocation for externally-delegated steps
//!
//! Style compilation, minification, archiving, lint, and the test runner are
//! external tools; the pipeline invokes them through the platform shell and
//! treats each call as blocking.

use crate::error::{ExecutionError, ExecutionResult};
use std::path::Path;
use std::process::{Command, Stdio};

/// Run a shell command in `dir`, inheriting stdio
pub fn run_shell(command: &str, dir: &Path, quiet: bool) -> ExecutionResult<()> {
    let mut cmd = Command::new("sh");
    cmd.arg("-c").arg(command).current_dir(dir);

    if quiet {
        cmd.stdout(Stdio::null()).stderr(Stdio::null());
    } else {
        cmd.stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit());
    }

    let status = cmd.status().map_err(|_| ExecutionError::CommandFailed(None))?;

    if !status.success() {
        return Err(ExecutionError::CommandFailed(status.code()));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn cwd() -> PathBuf {
        std::env::current_dir().unwrap()
    }

    #[test]
    fn test_successful_command() {
        assert!(run_shell("true", &cwd(), true).is_ok());
    }

    #[test]
    fn test_failing_command_reports_exit_code() {
        let result = run_shell("exit 3", &cwd(), true);
        assert!(matches!(
            result,
            Err(ExecutionError::CommandFailed(Some(3)))
        ));
    }

    #[test]
    fn test_command_runs_in_given_dir() {
        let temp = tempfile::TempDir::new().unwrap();
        run_shell("touch marker", temp.path(), true).unwrap();
        assert!(temp.path().join("marker").exists());
    }
}
