//! Endpoint settings snapshot

use super::queue_config::QueueConfig;
use crate::core::model::Model;
use serde::{Deserialize, Serialize};

/// Default OpenAI-compatible endpoint.
pub const DEFAULT_SERVER_URL: &str = "https://api.openai.com/v1";

/// Everything the API client reads from the surrounding application.
///
/// `max_tokens` and `temperature` are kept as the raw strings the user
/// typed; they are parsed at request-build time and omitted from the
/// request when empty or unparsable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiSettings {
    pub server_url: String,
    pub api_key: String,
    pub model: Model,
    pub max_tokens: String,
    pub temperature: String,
    pub queue: QueueConfig,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            server_url: DEFAULT_SERVER_URL.to_string(),
            api_key: String::new(),
            model: Model::default(),
            max_tokens: "2048".to_string(),
            temperature: "0.7".to_string(),
            queue: QueueConfig::default(),
        }
    }
}

impl ApiSettings {
    /// Whether a non-blank credential is configured
    pub fn has_credential(&self) -> bool {
        !self.api_key.trim().is_empty()
    }

    pub fn max_tokens(&self) -> Option<u32> {
        self.max_tokens.trim().parse().ok()
    }

    pub fn temperature(&self) -> Option<f32> {
        self.temperature
            .trim()
            .parse::<f32>()
            .ok()
            .filter(|t| t.is_finite())
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = api_key.into();
        self
    }

    pub fn with_server_url(mut self, server_url: impl Into<String>) -> Self {
        self.server_url = server_url.into();
        self
    }

    pub fn with_queue(mut self, queue: QueueConfig) -> Self {
        self.queue = queue;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_parameters_parse() {
        let settings = ApiSettings {
            max_tokens: " 512 ".to_string(),
            temperature: "0.2".to_string(),
            ..ApiSettings::default()
        };
        assert_eq!(settings.max_tokens(), Some(512));
        assert_eq!(settings.temperature(), Some(0.2));
    }

    #[test]
    fn test_unparsable_parameters_are_omitted() {
        let settings = ApiSettings {
            max_tokens: "lots".to_string(),
            temperature: String::new(),
            ..ApiSettings::default()
        };
        assert_eq!(settings.max_tokens(), None);
        assert_eq!(settings.temperature(), None);

        let settings = ApiSettings {
            temperature: "NaN".to_string(),
            ..ApiSettings::default()
        };
        assert_eq!(settings.temperature(), None);
    }

    #[test]
    fn test_blank_key_is_not_a_credential() {
        assert!(!ApiSettings::default().has_credential());
        assert!(!ApiSettings::default().with_api_key("   ").has_credential());
        assert!(ApiSettings::default().with_api_key("sk-test").has_credential());
    }
}
