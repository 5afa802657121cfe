//! Forge abstraction for publishing repositories.
//!
//! "Do X": Create a remote repository on a forge platform and push to it.
//!
//! # Design
//!
//! - **ForgeWriter**: authentication, repository creation, URL lookup
//! - **GitHubWriter**: the `gh` CLI implementation
//!
//! URL parsing lives here so callers can check that a forge answer is a
//! real repository URL before showing it.

pub mod writer;

pub use writer::{ForgeWriter, GitHubWriter};

/// Repository location parsed from a remote URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteRepo {
    pub host: String, // "github.com", "codeberg.org", etc.
    pub owner: String,
    pub repo: String,
}

/// Parse a repository URL into host, owner and repo.
///
/// Parses URLs like:
/// - `git@github.com:owner/repo.git`
/// - `https://github.com/owner/repo`
pub fn parse_repo_url(url: &str) -> Option<RemoteRepo> {
    let url = url.trim();

    // SSH format: git@github.com:owner/repo.git
    if let Some(rest) = url.strip_prefix("git@") {
        let (host, path) = rest.split_once(':')?;
        return split_owner_repo(host, path);
    }

    // HTTPS format: https://github.com/owner/repo
    let without_proto = url
        .strip_prefix("https://")
        .or_else(|| url.strip_prefix("http://"))?;
    let (host, path) = without_proto.split_once('/')?;
    split_owner_repo(host, path)
}

fn split_owner_repo(host: &str, path: &str) -> Option<RemoteRepo> {
    let path = path.trim_end_matches('/').trim_end_matches(".git");
    let (owner, repo) = path.split_once('/')?;

    let valid = |s: &str| !s.is_empty() && !s.contains(char::is_whitespace);
    if host.is_empty() || !valid(owner) || !valid(repo) || repo.contains('/') {
        return None;
    }

    Some(RemoteRepo {
        host: host.to_string(),
        owner: owner.to_string(),
        repo: repo.to_string(),
    })
}
