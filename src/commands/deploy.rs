use anyhow::Result;
use quickdeploy::process::SystemRunner;
use quickdeploy::{DeployConfig, Deployer};

/// Deploy the current directory. Returns the process exit status.
pub fn execute() -> Result<i32> {
    let config = DeployConfig::load()?;

    let mut stdout = std::io::stdout();
    let mut stderr = std::io::stderr();
    let outcome = Deployer::new(&config, &SystemRunner).run(&mut stdout, &mut stderr)?;

    Ok(outcome.exit_code())
}
