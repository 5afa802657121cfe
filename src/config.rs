use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Branch the fresh repository is initialized on.
pub const DEFAULT_BRANCH: &str = "main";

/// Message for the single initial commit.
pub const COMMIT_MESSAGE: &str = "Initial commit: Claude Code Agent Repository Framework

Complete framework including:
- Knowledge base (concepts + full versions)
- User engagement workflow (questions, profiles, tools)
- Plan generation templates
- Ready-to-deploy templates (5 templates)
- Utilities and helper scripts

This framework helps users design and build specialized Claude Code repositories.";

/// Everything a deploy run needs, resolved once up front
#[derive(Debug, Clone)]
pub struct DeployConfig {
    /// Directory being published
    pub project_root: PathBuf,
    /// Remote repository name (final component of `project_root`)
    pub repo_name: String,
    /// Create the remote as private
    pub private: bool,
    /// Initial branch name
    pub branch: String,
    pub commit_message: String,
}

impl DeployConfig {
    /// Load configuration for the current working directory
    pub fn load() -> Result<Self> {
        let project_root =
            std::env::current_dir().context("Failed to read current working directory")?;
        Self::for_dir(project_root)
    }

    /// Build configuration for an explicit directory
    pub fn for_dir(project_root: impl Into<PathBuf>) -> Result<Self> {
        let project_root = project_root.into();
        let repo_name = repo_name_for(&project_root)?;

        Ok(Self {
            project_root,
            repo_name,
            private: true,
            branch: DEFAULT_BRANCH.to_string(),
            commit_message: COMMIT_MESSAGE.to_string(),
        })
    }

    /// Human-readable visibility label
    pub fn visibility(&self) -> &'static str {
        if self.private {
            "Private"
        } else {
            "Public"
        }
    }
}

/// Derive the repository name from a directory's final path component.
///
/// The name is used verbatim; the hosting service rejects illegal names itself.
/// A name that is not valid UTF-8 cannot be passed on unchanged and is an error.
pub fn repo_name_for(dir: &Path) -> Result<String> {
    let name = dir
        .file_name()
        .filter(|name| !name.is_empty())
        .ok_or_else(|| {
            anyhow::anyhow!(
                "Cannot derive a repository name from '{}'",
                dir.display()
            )
        })?;

    name.to_str().map(str::to_string).ok_or_else(|| {
        anyhow::anyhow!(
            "Directory name '{}' is not valid UTF-8; rename it before deploying",
            name.to_string_lossy()
        )
    })
}
