use anyhow::Result;
use clap::Parser;

mod commands;

/// Publish the current directory as a new private GitHub repository.
///
/// Removes any existing .git, commits every file on a fresh `main` branch,
/// then creates the repository with `gh` and pushes. Runs without prompts.
#[derive(Parser)]
#[command(author, version = env!("CARGO_PKG_VERSION"), about, long_about)]
struct Cli {}

fn main() -> Result<()> {
    let _cli = Cli::parse();

    let exit_code = commands::deploy::execute()?;
    if exit_code != 0 {
        std::process::exit(exit_code);
    }

    Ok(())
}
