//! End-to-end runs of the `quick-deploy` binary.
//!
//! A fake `gh` shell script stands in for the GitHub CLI; `git` is real.
//!
//! Run with: cargo test --test deploy_cli -- --nocapture

#![cfg(unix)]

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::PathBuf;
use std::process::{Command, Output};
use tempfile::TempDir;

const FAKE_GH: &str = r#"#!/bin/sh
echo "$*" >> "$FAKE_GH_LOG"
case "$1 $2" in
  "auth status") exit "${FAKE_GH_AUTH_EXIT:-0}" ;;
  "repo create") exit 0 ;;
  "repo view") printf '{"url":"https://github.com/tester/%s"}\n' "$(basename "$PWD")" ;;
  *) exit 1 ;;
esac
"#;

struct Sandbox {
    temp: TempDir,
    project: PathBuf,
    bin: PathBuf,
}

impl Sandbox {
    fn new(name: &str) -> Self {
        let temp = TempDir::new().unwrap();
        let project = temp.path().join(name);
        let bin = temp.path().join("bin");
        fs::create_dir_all(&project).unwrap();
        fs::create_dir_all(&bin).unwrap();
        fs::create_dir_all(temp.path().join("home")).unwrap();
        Self { temp, project, bin }
    }

    fn with_fake_gh(self) -> Self {
        let gh = self.bin.join("gh");
        fs::write(&gh, FAKE_GH).unwrap();
        fs::set_permissions(&gh, fs::Permissions::from_mode(0o755)).unwrap();
        self
    }

    fn write(&self, rel: &str, contents: &str) {
        let path = self.project.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, contents).unwrap();
    }

    fn gh_log(&self) -> String {
        fs::read_to_string(self.temp.path().join("gh.log")).unwrap_or_default()
    }

    /// Environment shared by the binary and direct git calls.
    fn command(&self, program: impl AsRef<std::ffi::OsStr>, path: &str) -> Command {
        let mut cmd = Command::new(program);
        cmd.current_dir(&self.project)
            .env("PATH", path)
            .env("HOME", self.temp.path().join("home"))
            .env("GIT_CONFIG_NOSYSTEM", "1")
            .env("GIT_AUTHOR_NAME", "Test Author")
            .env("GIT_AUTHOR_EMAIL", "author@example.com")
            .env("GIT_COMMITTER_NAME", "Test Author")
            .env("GIT_COMMITTER_EMAIL", "author@example.com")
            .env("FAKE_GH_LOG", self.temp.path().join("gh.log"))
            .env_remove("QUICKDEPLOY_LOG");
        cmd
    }

    fn search_path(&self) -> String {
        let system = std::env::var("PATH").unwrap_or_default();
        format!("{}:{}", self.bin.display(), system)
    }

    fn deploy(&self) -> Command {
        self.command(env!("CARGO_BIN_EXE_quick-deploy"), &self.search_path())
    }

    fn git(&self, args: &[&str]) -> Output {
        self.command("git", &self.search_path())
            .args(args)
            .output()
            .unwrap()
    }

    fn git_stdout(&self, args: &[&str]) -> String {
        let output = self.git(args);
        assert!(output.status.success(), "git {:?} failed", args);
        String::from_utf8_lossy(&output.stdout).trim().to_string()
    }
}

fn git_available() -> bool {
    if which::which("git").is_err() {
        eprintln!("git not installed, skipping");
        return false;
    }
    true
}

fn text(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).to_string()
}

#[test]
fn test_missing_gh_exits_1_without_touching_git_dir() {
    let sandbox = Sandbox::new("my-agents");
    sandbox.write("README.md", "# agents\n");
    sandbox.write(".git/marker", "old history");

    // Only the empty bin dir is searched, so gh cannot be found
    let bin_only = sandbox.bin.display().to_string();
    let output = sandbox
        .command(env!("CARGO_BIN_EXE_quick-deploy"), &bin_only)
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    let stdout = text(&output.stdout);
    assert!(stdout.contains("❌ GitHub CLI (gh) not found!"), "{}", stdout);
    assert!(stdout.trim_end().ends_with("Install from: https://cli.github.com/"));
    assert!(!stdout.contains("Deploying"));
    assert!(text(&output.stderr).is_empty());
    assert!(sandbox.project.join(".git/marker").exists());
}

#[test]
fn test_unauthenticated_exits_1_without_touching_git_dir() {
    let sandbox = Sandbox::new("my-agents").with_fake_gh();
    sandbox.write(".git/marker", "old history");

    let output = sandbox
        .deploy()
        .env("FAKE_GH_AUTH_EXIT", "1")
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    assert!(text(&output.stdout).contains("❌ Please authenticate with GitHub CLI first:"));
    assert!(text(&output.stdout).trim_end().ends_with("gh auth login"));
    assert!(!text(&output.stdout).contains("Deployed!"));
    assert!(sandbox.project.join(".git/marker").exists());
    assert_eq!(sandbox.gh_log().trim(), "auth status");
}

#[test]
fn test_full_deploy_creates_single_commit_on_main() {
    if !git_available() {
        return;
    }
    let sandbox = Sandbox::new("my-agents").with_fake_gh();
    sandbox.write("README.md", "# agents\n");
    sandbox.write("templates/basic/plan.md", "plan\n");
    sandbox.write(".gitignore", "secret.txt\n");
    sandbox.write("secret.txt", "token\n");

    let output = sandbox.deploy().output().unwrap();

    assert_eq!(output.status.code(), Some(0), "{}", text(&output.stderr));
    let stdout = text(&output.stdout);
    assert!(stdout.contains("📦 Deploying framework as: my-agents"));
    assert!(stdout.contains("✅ Deployed!"));
    assert!(stdout.contains("https://github.com/tester/my-agents"));
    assert!(!stdout.contains("Repository: my-agents"));

    assert_eq!(sandbox.git_stdout(&["rev-list", "--count", "main"]), "1");
    assert_eq!(sandbox.git_stdout(&["branch", "--show-current"]), "main");

    let files = sandbox.git_stdout(&["ls-files"]);
    let files: Vec<&str> = files.lines().collect();
    assert!(files.contains(&"README.md"));
    assert!(files.contains(&"templates/basic/plan.md"));
    assert!(files.contains(&".gitignore"));
    assert!(!files.contains(&"secret.txt"));

    let subject = sandbox.git_stdout(&["log", "-1", "--format=%s"]);
    assert_eq!(
        subject,
        "Initial commit: Claude Code Agent Repository Framework"
    );

    assert!(sandbox
        .gh_log()
        .contains("repo create my-agents --private --source=. --push"));
}

#[test]
fn test_existing_history_is_replaced() {
    if !git_available() {
        return;
    }
    let sandbox = Sandbox::new("framework").with_fake_gh();
    sandbox.write("notes.txt", "v1\n");
    assert!(sandbox.git(&["init", "-q"]).status.success());
    assert!(sandbox.git(&["add", "."]).status.success());
    assert!(sandbox
        .git(&["commit", "-q", "-m", "old work"])
        .status
        .success());
    let old_head = sandbox.git_stdout(&["rev-parse", "HEAD"]);

    let output = sandbox.deploy().output().unwrap();

    assert_eq!(output.status.code(), Some(0));
    assert!(text(&output.stdout).contains("Removing existing git history..."));
    assert_eq!(sandbox.git_stdout(&["rev-list", "--count", "--all"]), "1");
    assert!(!sandbox
        .git(&["cat-file", "-e", &old_head])
        .status
        .success());
}

#[test]
fn test_failed_commit_still_reports_success() {
    if !git_available() {
        return;
    }
    // Empty directory: nothing to commit
    let sandbox = Sandbox::new("empty-project").with_fake_gh();

    let output = sandbox.deploy().output().unwrap();

    assert_eq!(output.status.code(), Some(0));
    assert!(text(&output.stdout).contains("✅ Deployed!"));
    assert!(text(&output.stderr).contains("git commit failed"));
}

#[test]
fn test_debug_logging_goes_to_stderr() {
    let sandbox = Sandbox::new("my-agents").with_fake_gh();

    let output = sandbox
        .deploy()
        .env("QUICKDEPLOY_LOG", "1")
        .env("FAKE_GH_AUTH_EXIT", "1")
        .output()
        .unwrap();

    let stderr = text(&output.stderr);
    assert!(stderr.contains("[DEBUG process] locate gh"), "{}", stderr);
    assert!(stderr.contains("[DEBUG process] run `gh auth status`"));
    assert!(!text(&output.stdout).contains("[DEBUG"));
}
