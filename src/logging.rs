//! Opt-in debug logging.
//!
//! Status output goes straight to stdout. Set `QUICKDEPLOY_LOG` to also get
//! `[DEBUG <scope>]` lines on stderr for every external command.

/// Environment variable that enables debug logging.
pub const LOG_ENV_VAR: &str = "QUICKDEPLOY_LOG";

/// Whether debug logging is enabled for this process.
pub fn debug_enabled() -> bool {
    std::env::var_os(LOG_ENV_VAR).is_some()
}

/// Write a debug line to stderr when `QUICKDEPLOY_LOG` is set.
pub fn log_debug(scope: &str, msg: &str) {
    if debug_enabled() {
        eprintln!("[DEBUG {}] {}", scope, msg);
    }
}
