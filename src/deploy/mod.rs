//! Deploy - publish a directory as a fresh private repository
//!
//! The procedure is strictly linear:
//!
//! 1. Preflight: `gh` installed and authenticated (otherwise abort, exit 1)
//! 2. Remove any existing `.git`
//! 3. `git init -b main`, `git add .`, `git commit`
//! 4. `gh repo create <name> --private --source=. --push`
//! 5. Report the repository URL, or its name when the URL is unavailable
//!
//! Steps 3 and 4 never stop the run. Their failures are collected in the
//! [`DeployReport`] and echoed as warnings, and the exit status stays 0.
//!
//! # Example
//!
//! ```no_run
//! use quickdeploy::config::DeployConfig;
//! use quickdeploy::deploy::Deployer;
//! use quickdeploy::process::SystemRunner;
//!
//! let config = DeployConfig::load()?;
//! let outcome = Deployer::new(&config, &SystemRunner)
//!     .run(&mut std::io::stdout(), &mut std::io::stderr())?;
//! std::process::exit(outcome.exit_code());
//! # Ok::<(), anyhow::Error>(())
//! ```

mod internal;

use anyhow::Result;
use std::fmt;
use std::io::Write;

use crate::config::DeployConfig;
use crate::preflight::PreflightFailure;
use crate::process::CommandRunner;

/// A step whose failure is tolerated
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Init,
    Stage,
    Commit,
    CreateRemote,
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Step::Init => "git init",
            Step::Stage => "git add",
            Step::Commit => "git commit",
            Step::CreateRemote => "gh repo create",
        };
        f.write_str(name)
    }
}

/// A tolerated step that did not succeed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepFailure {
    pub step: Step,
    pub message: String,
}

impl fmt::Display for StepFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} failed: {}", self.step, self.message)
    }
}

/// What happened during a run that got past preflight
#[derive(Debug, Clone, Default)]
pub struct DeployReport {
    /// An existing `.git` was removed
    pub history_reset: bool,
    pub failures: Vec<StepFailure>,
    /// URL reported by the forge, if any
    pub url: Option<String>,
}

impl DeployReport {
    /// Every step succeeded
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }

    #[cfg(test)]
    pub(crate) fn failed(&self, step: Step) -> bool {
        self.failures.iter().any(|f| f.step == step)
    }
}

/// Result of a deploy run
#[derive(Debug, Clone)]
pub enum DeployOutcome {
    /// Stopped at preflight; nothing was touched
    Aborted(PreflightFailure),
    Deployed(DeployReport),
}

impl DeployOutcome {
    pub fn exit_code(&self) -> i32 {
        match self {
            DeployOutcome::Aborted(failure) => failure.exit_code(),
            DeployOutcome::Deployed(_) => 0,
        }
    }
}

/// Runs the deploy procedure for one directory
pub struct Deployer<'a> {
    config: &'a DeployConfig,
    runner: &'a dyn CommandRunner,
}

impl<'a> Deployer<'a> {
    pub fn new(config: &'a DeployConfig, runner: &'a dyn CommandRunner) -> Self {
        Self { config, runner }
    }

    /// Run every step once, writing status to `out` and diagnostics to `err`.
    ///
    /// Returns `Err` only for failures that make continuing meaningless,
    /// such as an undeletable `.git` directory or a broken output stream.
    pub fn run(&self, out: &mut dyn Write, err: &mut dyn Write) -> Result<DeployOutcome> {
        internal::run(self.config, self.runner, out, err)
    }
}
