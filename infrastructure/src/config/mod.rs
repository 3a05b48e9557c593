//! Configuration file loading for proposal-agent
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `PROPOSAL_*` environment variables
//! 2. `--config <path>` specified file
//! 3. Project root: `./proposal-agent.toml`
//! 4. Global: `<config dir>/proposal-agent/config.toml`
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{
    ConfigValidationError, FileAgentConfig, FileConfig, FileLlmConfig, FileLoggingConfig,
    FileSearchConfig,
};
pub use loader::{ConfigLoader, ENV_PREFIX, PROJECT_CONFIG_FILE};
