//! External command execution.
//!
//! Every `git` and `gh` call goes through [`CommandRunner`], so the deploy
//! procedure can be driven by a scripted runner in tests.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use crate::logging::log_debug;

/// Result of one external command: exit success plus captured output.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    pub success: bool,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    /// First non-empty line of stderr, falling back to stdout.
    pub fn summary(&self) -> String {
        self.stderr
            .lines()
            .chain(self.stdout.lines())
            .map(str::trim)
            .find(|line| !line.is_empty())
            .unwrap_or("no output")
            .to_string()
    }
}

/// Capability to find and run external programs.
pub trait CommandRunner {
    /// Resolve a program through the standard executable lookup.
    fn locate(&self, program: &str) -> Option<PathBuf>;

    /// Run `program` with `args` inside `cwd`, capturing its output.
    ///
    /// Returns `Err` only when the process could not be started.
    /// A non-zero exit is reported through `CommandOutput::success`.
    fn run(&self, program: &str, args: &[&str], cwd: &Path) -> Result<CommandOutput>;
}

/// Runs real subprocesses.
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn locate(&self, program: &str) -> Option<PathBuf> {
        let found = which::which(program).ok();
        log_debug("process", &format!("locate {} -> {:?}", program, found));
        found
    }

    fn run(&self, program: &str, args: &[&str], cwd: &Path) -> Result<CommandOutput> {
        log_debug("process", &format!("run `{} {}`", program, args.join(" ")));

        let output = Command::new(program)
            .args(args)
            .current_dir(cwd)
            .stdin(Stdio::null())
            .output()
            .with_context(|| format!("Failed to execute `{}`", program))?;

        let result = CommandOutput {
            success: output.status.success(),
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        };
        log_debug(
            "process",
            &format!("`{}` exited with {}", program, output.status),
        );

        Ok(result)
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_prefers_stderr() {
        let output = CommandOutput {
            success: false,
            stdout: "ignored\n".to_string(),
            stderr: "\nfatal: not a git repository\nhint: run git init\n".to_string(),
        };
        assert_eq!(output.summary(), "fatal: not a git repository");
    }

    #[test]
    fn test_summary_falls_back_to_stdout() {
        let output = CommandOutput {
            success: false,
            stdout: "nothing to commit, working tree clean\n".to_string(),
            stderr: String::new(),
        };
        assert_eq!(output.summary(), "nothing to commit, working tree clean");
        assert_eq!(CommandOutput::default().summary(), "no output");
    }

    #[test]
    fn test_locate_unknown_program() {
        assert!(SystemRunner
            .locate("quickdeploy-no-such-tool-7f3a")
            .is_none());
    }

    #[test]
    fn test_run_unknown_program_is_error() {
        let dir = tempfile::TempDir::new().unwrap();
        let result = SystemRunner.run("quickdeploy-no-such-tool-7f3a", &[], dir.path());
        assert!(result.is_err());
    }
}
