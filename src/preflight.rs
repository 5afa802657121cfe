//! Preflight checks - ensure the forge CLI is usable before touching anything.

use std::fmt;
use std::io::Write;

use crate::forge::ForgeWriter;
use crate::logging::log_debug;

/// Why a deploy cannot start.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreflightFailure {
    /// `gh` is not on PATH
    CliMissing,
    /// `gh auth status` failed
    NotAuthenticated,
}

impl PreflightFailure {
    /// Process exit status for this failure
    pub fn exit_code(self) -> i32 {
        1
    }

    /// Write the user-facing diagnostic, including how to fix it.
    pub fn write_diagnostic(self, out: &mut dyn Write) -> std::io::Result<()> {
        match self {
            PreflightFailure::CliMissing => {
                writeln!(out, "❌ GitHub CLI (gh) not found!")?;
                writeln!(out, "Install from: https://cli.github.com/")
            }
            PreflightFailure::NotAuthenticated => {
                writeln!(out, "❌ Please authenticate with GitHub CLI first:")?;
                writeln!(out, "   gh auth login")
            }
        }
    }
}

impl fmt::Display for PreflightFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PreflightFailure::CliMissing => write!(f, "GitHub CLI (gh) not found"),
            PreflightFailure::NotAuthenticated => write!(f, "GitHub CLI is not authenticated"),
        }
    }
}

/// Check that the forge CLI is installed, then that it is authenticated.
///
/// An auth check that cannot even run counts as unauthenticated.
pub fn check(forge: &dyn ForgeWriter) -> Result<(), PreflightFailure> {
    if !forge.is_installed() {
        log_debug("preflight", "forge CLI not found on PATH");
        return Err(PreflightFailure::CliMissing);
    }

    match forge.is_authenticated() {
        Ok(true) => Ok(()),
        Ok(false) => Err(PreflightFailure::NotAuthenticated),
        Err(e) => {
            log_debug("preflight", &format!("auth check failed: {:#}", e));
            Err(PreflightFailure::NotAuthenticated)
        }
    }
}
