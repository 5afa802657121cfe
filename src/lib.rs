pub mod config;
pub mod deploy;
pub mod forge;
pub mod git;
pub mod logging;
pub mod preflight;
pub mod process;

// Re-export commonly used types
pub use config::DeployConfig;
pub use deploy::{DeployOutcome, Deployer};
