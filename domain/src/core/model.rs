//! Model value object representing an LLM model identifier

use crate::core::error::DomainError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Substrings that mark a model id as chat-capable.
///
/// Model listings from OpenAI-compatible endpoints also contain embedding,
/// moderation, audio and image models; only ids matching one of these
/// markers are offered for generation.
pub const CHAT_MODEL_MARKERS: &[&str] = &[
    "gpt", "claude", "gemini", "llama", "mistral", "qwen", "deepseek",
];

/// Default model used when the configuration does not name one.
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

/// A model identifier (Value Object)
///
/// The endpoint owns the catalog, so any non-empty id is accepted as-is.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Model(String);

impl Model {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the string identifier for this model
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Check if this model id looks like a chat/completions model
    pub fn is_chat_capable(&self) -> bool {
        let id = self.0.to_ascii_lowercase();
        CHAT_MODEL_MARKERS.iter().any(|marker| id.contains(marker))
    }
}

impl Default for Model {
    fn default() -> Self {
        Model(DEFAULT_MODEL.to_string())
    }
}

impl std::fmt::Display for Model {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for Model {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let id = s.trim();
        if id.is_empty() {
            return Err(DomainError::InvalidModel("model id cannot be empty".to_string()));
        }
        Ok(Model(id.to_string()))
    }
}

impl Serialize for Model {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Model {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chat_capable_detection() {
        assert!(Model::new("gpt-4o").is_chat_capable());
        assert!(Model::new("Claude-3-Haiku").is_chat_capable());
        assert!(Model::new("meta-llama/Llama-3-70b").is_chat_capable());
        assert!(!Model::new("text-embedding-3-small").is_chat_capable());
        assert!(!Model::new("whisper-1").is_chat_capable());
        assert!(!Model::new("dall-e-3").is_chat_capable());
    }

    #[test]
    fn test_parse_trims_and_rejects_empty() {
        let model: Model = "  gpt-4.1 ".parse().unwrap();
        assert_eq!(model.as_str(), "gpt-4.1");
        assert!("   ".parse::<Model>().is_err());
    }

    #[test]
    fn test_serde_as_plain_string() {
        let json = serde_json::to_string(&Model::new("gpt-4o")).unwrap();
        assert_eq!(json, "\"gpt-4o\"");
        let model: Model = serde_json::from_str("\"claude-3-opus\"").unwrap();
        assert_eq!(model, Model::new("claude-3-opus"));
        assert!(serde_json::from_str::<Model>("\"\"").is_err());
    }

    #[test]
    fn test_model_default() {
        assert_eq!(Model::default().as_str(), DEFAULT_MODEL);
    }
}
