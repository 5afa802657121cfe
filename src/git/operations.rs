//! Low-level git operations

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use crate::process::CommandRunner;

/// Path of the version-control metadata directory
pub fn git_dir(root: &Path) -> PathBuf {
    root.join(".git")
}

/// Delete `<root>/.git` recursively if present.
///
/// Returns whether anything was removed.
pub fn remove_git_dir(root: &Path) -> Result<bool> {
    let dir = git_dir(root);
    if !dir.exists() {
        return Ok(false);
    }

    // A `.git` file (worktree/submodule pointer) goes too
    let removed = if dir.is_dir() {
        fs::remove_dir_all(&dir)
    } else {
        fs::remove_file(&dir)
    };
    removed.with_context(|| format!("Failed to remove {}", dir.display()))?;

    Ok(true)
}

/// Initialize a repository with `branch` as its primary branch
pub fn init(runner: &dyn CommandRunner, root: &Path, branch: &str) -> Result<()> {
    let output = runner
        .run("git", &["init", "-b", branch], root)
        .context("Failed to initialize git repository")?;

    if !output.success {
        anyhow::bail!("Failed to initialize git repository: {}", output.summary());
    }

    Ok(())
}

/// Stage all files, honoring existing ignore rules
pub fn add_all(runner: &dyn CommandRunner, root: &Path) -> Result<()> {
    let output = runner
        .run("git", &["add", "."], root)
        .context("Failed to stage changes")?;

    if !output.success {
        anyhow::bail!("Failed to stage changes: {}", output.summary());
    }

    Ok(())
}

/// Create a commit
pub fn commit(runner: &dyn CommandRunner, root: &Path, message: &str) -> Result<()> {
    let output = runner
        .run("git", &["commit", "-m", message], root)
        .context("Failed to create commit")?;

    if !output.success {
        anyhow::bail!("Failed to create commit: {}", output.summary());
    }

    Ok(())
}
