//! Configuration file loading for prompt-relay
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `--config <path>` specified file
//! 2. Environment variables prefixed with `PROMPT_RELAY_`
//! 3. Project root: `./prompt-relay.toml` or `./.prompt-relay.toml`
//! 4. Global: `$XDG_CONFIG_HOME/prompt-relay/config.toml`
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{ConfigValidationError, FileApiConfig, FileConfig, FileOutputConfig};
pub use loader::{ConfigLoader, ENV_PREFIX};
