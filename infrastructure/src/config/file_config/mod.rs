//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and use domain types where appropriate.

mod api;
mod output;

pub use api::FileApiConfig;
pub use output::FileOutputConfig;

use relay_domain::{ApiSettings, DomainError, QueueConfig};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration validation errors
#[derive(Debug, Error)]
pub enum ConfigValidationError {
    #[error("api.server_url cannot be empty")]
    EmptyServerUrl,

    #[error(transparent)]
    InvalidQueue(#[from] DomainError),
}

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Endpoint, credential and request defaults
    pub api: FileApiConfig,
    /// Admission control for generation calls
    pub queue: QueueConfig,
    /// Output settings
    pub output: FileOutputConfig,
}

impl FileConfig {
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.api.server_url.trim().is_empty() {
            return Err(ConfigValidationError::EmptyServerUrl);
        }
        self.queue.validate()?;
        Ok(())
    }

    /// Build the settings snapshot, reading the credential from the process
    /// environment when no inline key is configured
    pub fn into_settings(self) -> ApiSettings {
        self.into_settings_with(|name| std::env::var(name).ok())
    }

    pub fn into_settings_with(self, lookup: impl Fn(&str) -> Option<String>) -> ApiSettings {
        let api_key = self.api.resolve_api_key(lookup);
        ApiSettings {
            server_url: self.api.server_url.trim().to_string(),
            api_key,
            model: self.api.model,
            max_tokens: self.api.max_tokens,
            temperature: self.api.temperature,
            queue: self.queue,
        }
    }
}
