//! Forge write operations for repository publishing.
//!
//! "Do X": Create a repository on a forge platform and report where it lives.
//!
//! # Example
//!
//! ```ignore
//! use quickdeploy::forge::{ForgeWriter, GitHubWriter};
//! use quickdeploy::process::SystemRunner;
//!
//! let writer = GitHubWriter::new(&SystemRunner);
//! if writer.is_installed() && writer.is_authenticated()? {
//!     writer.create_repo("my-agents", true, Path::new("."))?;
//! }
//! ```

use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::path::Path;

use super::parse_repo_url;
use crate::logging::log_debug;
use crate::process::CommandRunner;

/// Write operations on a forge platform.
///
/// Each method is designed to work with the platform's CLI tool.
pub trait ForgeWriter {
    /// Check if the CLI tool is installed.
    fn is_installed(&self) -> bool;

    /// Check if authenticated to this forge.
    fn is_authenticated(&self) -> Result<bool>;

    /// Create a repository in the current user's namespace from `repo_path`
    /// and push its commits.
    fn create_repo(&self, name: &str, private: bool, repo_path: &Path) -> Result<()>;

    /// Canonical URL of the repository `repo_path` is connected to.
    ///
    /// `None` when the forge cannot tell us.
    fn repo_url(&self, repo_path: &Path) -> Result<Option<String>>;
}

#[derive(Debug, Deserialize)]
struct GhRepoView {
    #[serde(default)]
    url: String,
}

/// GitHub implementation of ForgeWriter.
///
/// Uses `gh` CLI for all operations. Authentication is handled by `gh auth login`.
pub struct GitHubWriter<'a> {
    runner: &'a dyn CommandRunner,
}

impl<'a> GitHubWriter<'a> {
    pub fn new(runner: &'a dyn CommandRunner) -> Self {
        Self { runner }
    }
}

impl ForgeWriter for GitHubWriter<'_> {
    fn is_installed(&self) -> bool {
        self.runner.locate("gh").is_some()
    }

    fn is_authenticated(&self) -> Result<bool> {
        let output = self
            .runner
            .run("gh", &["auth", "status"], Path::new("."))
            .context("Failed to run `gh auth status`. Is `gh` CLI installed?")?;

        Ok(output.success)
    }

    fn create_repo(&self, name: &str, private: bool, repo_path: &Path) -> Result<()> {
        let mut args = vec!["repo", "create", name];
        if private {
            args.push("--private");
        } else {
            args.push("--public");
        }
        args.extend(["--source=.", "--push"]);

        let output = self
            .runner
            .run("gh", &args, repo_path)
            .context("Failed to create GitHub repository")?;

        if !output.success {
            bail!("Failed to create repository: {}", output.summary());
        }

        Ok(())
    }

    fn repo_url(&self, repo_path: &Path) -> Result<Option<String>> {
        let output = self
            .runner
            .run("gh", &["repo", "view", "--json", "url"], repo_path)
            .context("Failed to run `gh repo view`")?;

        if !output.success {
            return Ok(None);
        }

        let view: GhRepoView = serde_json::from_str(output.stdout.trim())
            .context("Failed to parse `gh repo view` output")?;
        let url = view.url.trim();

        let Some(remote) = parse_repo_url(url) else {
            log_debug("forge", &format!("ignoring unusable url {:?}", url));
            return Ok(None);
        };
        log_debug(
            "forge",
            &format!("{}/{} on {}", remote.owner, remote.repo, remote.host),
        );

        Ok(Some(url.to_string()))
    }
}
