pub mod config;
pub mod types;

pub use config::DeployServerConfig;
pub use types::*;
