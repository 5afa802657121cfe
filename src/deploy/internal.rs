//! Internal implementation for the deploy procedure

use anyhow::Result;
use std::io::{self, Write};

use super::{DeployOutcome, DeployReport, Step, StepFailure};
use crate::config::DeployConfig;
use crate::forge::{ForgeWriter, GitHubWriter};
use crate::git;
use crate::logging::log_debug;
use crate::preflight;
use crate::process::CommandRunner;

const RULE_WIDTH: usize = 57;

pub(super) fn run(
    config: &DeployConfig,
    runner: &dyn CommandRunner,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<DeployOutcome> {
    write_banner(out, "Quick Deploy: Agent Repository Framework")?;
    writeln!(out)?;

    let forge = GitHubWriter::new(runner);
    if let Err(failure) = preflight::check(&forge) {
        failure.write_diagnostic(out)?;
        return Ok(DeployOutcome::Aborted(failure));
    }

    let root = config.project_root.as_path();
    writeln!(out, "📦 Deploying framework as: {}", config.repo_name)?;
    writeln!(out, "   Location: {}", root.display())?;
    writeln!(out, "   Visibility: {}", config.visibility())?;
    writeln!(out)?;

    let mut report = DeployReport::default();

    if git::git_dir(root).exists() {
        writeln!(out, "Removing existing git history...")?;
        report.history_reset = git::remove_git_dir(root)?;
    }

    writeln!(out, "Initializing git repository...")?;
    let result = git::init(runner, root, &config.branch);
    record(&mut report, out, err, Step::Init, result)?;

    writeln!(out, "Adding all files...")?;
    let result = git::add_all(runner, root);
    record(&mut report, out, err, Step::Stage, result)?;

    writeln!(out, "Creating initial commit...")?;
    let result = git::commit(runner, root, &config.commit_message);
    record(&mut report, out, err, Step::Commit, result)?;

    writeln!(out, "Creating GitHub repository and pushing...")?;
    let result = forge.create_repo(&config.repo_name, config.private, root);
    record(&mut report, out, err, Step::CreateRemote, result)?;

    if !report.is_clean() {
        log_debug(
            "deploy",
            &format!("{} step(s) failed", report.failures.len()),
        );
    }

    writeln!(out)?;
    write_banner(out, "✅ Deployed!")?;
    writeln!(out)?;

    report.url = match forge.repo_url(root) {
        Ok(url) => url,
        Err(e) => {
            log_debug("deploy", &format!("url lookup failed: {:#}", e));
            None
        }
    };

    match &report.url {
        Some(url) => writeln!(out, "{}", url)?,
        None => writeln!(out, "Repository: {}", config.repo_name)?,
    }

    writeln!(out)?;
    writeln!(out, "Next: Open in Claude Code and start using!")?;
    writeln!(out)?;

    Ok(DeployOutcome::Deployed(report))
}

fn write_banner(out: &mut dyn Write, title: &str) -> io::Result<()> {
    let rule = "=".repeat(RULE_WIDTH);
    writeln!(out, "{}", rule)?;
    writeln!(out, "{}", title)?;
    writeln!(out, "{}", rule)
}

/// Keep going after a failed step, but say so on `err`.
fn record(
    report: &mut DeployReport,
    out: &mut dyn Write,
    err: &mut dyn Write,
    step: Step,
    result: Result<()>,
) -> io::Result<()> {
    match result {
        Ok(()) => log_debug("deploy", &format!("{} ok", step)),
        Err(e) => {
            let failure = StepFailure {
                step,
                message: format!("{:#}", e),
            };
            out.flush()?;
            writeln!(err, "⚠️  {} (continuing)", failure)?;
            report.failures.push(failure);
        }
    }
    Ok(())
}
