//! Endpoint configuration from TOML (`[api]` section)

use relay_domain::{Model, config::DEFAULT_SERVER_URL};
use serde::{Deserialize, Deserializer, Serialize};

/// Raw endpoint configuration from TOML
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileApiConfig {
    /// Base URL of the OpenAI-compatible API
    pub server_url: String,
    /// Direct API key (prefer `api_key_env`)
    pub api_key: Option<String>,
    /// Environment variable consulted when `api_key` is empty
    pub api_key_env: String,
    /// Model used when a call does not override it
    pub model: Model,
    /// Kept as text; unparsable values are omitted from requests
    #[serde(deserialize_with = "string_or_number")]
    pub max_tokens: String,
    #[serde(deserialize_with = "string_or_number")]
    pub temperature: String,
}

impl Default for FileApiConfig {
    fn default() -> Self {
        Self {
            server_url: DEFAULT_SERVER_URL.to_string(),
            api_key: None,
            api_key_env: "OPENAI_API_KEY".to_string(),
            model: Model::default(),
            max_tokens: "2048".to_string(),
            temperature: "0.7".to_string(),
        }
    }
}

impl FileApiConfig {
    /// Inline key if set, otherwise the value of `api_key_env` from `lookup`
    pub fn resolve_api_key(&self, lookup: impl Fn(&str) -> Option<String>) -> String {
        match self.api_key.as_deref().map(str::trim) {
            Some(key) if !key.is_empty() => key.to_string(),
            _ if self.api_key_env.trim().is_empty() => String::new(),
            _ => lookup(self.api_key_env.trim()).unwrap_or_default(),
        }
    }
}

/// Accept `max_tokens = 2048` as well as `max_tokens = "2048"`.
///
/// Environment overrides always arrive as numbers once figment has parsed
/// them, so both forms have to be accepted.
fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Int(i64),
        Float(f64),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Text(s) => s,
        Raw::Int(n) => n.to_string(),
        Raw::Float(n) => n.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(toml_str: &str) -> FileApiConfig {
        #[derive(Deserialize)]
        struct Wrapper {
            api: FileApiConfig,
        }
        toml::from_str::<Wrapper>(toml_str).unwrap().api
    }

    #[test]
    fn test_numbers_and_strings_accepted() {
        let api = parse(
            r#"
[api]
max_tokens = 4096
temperature = "0.2"
"#,
        );
        assert_eq!(api.max_tokens, "4096");
        assert_eq!(api.temperature, "0.2");

        let api = parse("[api]\ntemperature = 1.5\n");
        assert_eq!(api.temperature, "1.5");
        assert_eq!(api.max_tokens, "2048");
    }

    #[test]
    fn test_inline_key_wins_over_env() {
        let api = FileApiConfig {
            api_key: Some(" sk-inline ".to_string()),
            ..Default::default()
        };
        assert_eq!(api.resolve_api_key(|_| Some("sk-env".to_string())), "sk-inline");
    }

    #[test]
    fn test_empty_inline_key_falls_back_to_env() {
        let api = FileApiConfig {
            api_key: Some(String::new()),
            api_key_env: "MY_KEY".to_string(),
            ..Default::default()
        };
        let key = api.resolve_api_key(|name| (name == "MY_KEY").then(|| "sk-env".to_string()));
        assert_eq!(key, "sk-env");
    }

    #[test]
    fn test_no_key_anywhere() {
        let api = FileApiConfig::default();
        assert_eq!(api.resolve_api_key(|_| None), "");

        let no_env = FileApiConfig {
            api_key_env: String::new(),
            ..Default::default()
        };
        assert_eq!(no_env.resolve_api_key(|_| Some("unused".to_string())), "");
    }
}
