//! Git repository management for quick deploy
//!
//! Handles:
//! - Removing existing history
//! - Initializing a fresh repository
//! - Staging and committing the working tree

mod operations;

pub use operations::{add_all, commit, git_dir, init, remove_git_dir};
