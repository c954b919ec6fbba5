//! Wire types for the OpenAI-compatible REST API.
//!
//! Only the fields the client reads are modelled; everything else in the
//! response body is ignored. Requests are sent as
//! [`ChatRequest`](relay_application::ChatRequest) directly, since its
//! serialized form already matches the wire format.
//!
//! # Endpoints
//!
//! - `GET /models` → [`ModelList`]
//! - `POST /chat/completions` → [`ChatCompletionResponse`]
//! - any non-2xx → optionally an [`ErrorEnvelope`]

use relay_application::{ChatCompletion, Choice, ModelInfo, TokenUsage};
use serde::Deserialize;

/// `GET /models` response
#[derive(Debug, Clone, Deserialize)]
pub struct ModelList {
    #[serde(default)]
    pub data: Vec<ModelEntry>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ModelEntry {
    pub id: String,
    #[serde(default)]
    pub owned_by: Option<String>,
}

/// `POST /chat/completions` response
#[derive(Debug, Clone, Deserialize)]
pub struct ChatCompletionResponse {
    pub choices: Vec<ChoiceEntry>,
    #[serde(default)]
    pub usage: Option<UsageEntry>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChoiceEntry {
    pub message: ChoiceMessage,
    #[serde(default)]
    pub finish_reason: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChoiceMessage {
    /// `null` for refusals and tool calls
    #[serde(default)]
    pub content: Option<String>,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct UsageEntry {
    #[serde(default)]
    pub prompt_tokens: u64,
    #[serde(default)]
    pub completion_tokens: u64,
    #[serde(default)]
    pub total_tokens: u64,
}

/// Error body: `{"error": {"message": "..."}}`
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorEnvelope {
    pub error: ErrorBody,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ErrorBody {
    pub message: String,
}

impl ErrorEnvelope {
    /// Extract a non-empty error message from a raw body, if there is one
    pub fn message_from(body: &str) -> Option<String> {
        serde_json::from_str::<ErrorEnvelope>(body)
            .ok()
            .map(|envelope| envelope.error.message)
            .filter(|message| !message.trim().is_empty())
    }
}

impl From<ModelEntry> for ModelInfo {
    fn from(entry: ModelEntry) -> Self {
        ModelInfo {
            id: entry.id,
            owned_by: entry.owned_by,
        }
    }
}

impl From<ChatCompletionResponse> for ChatCompletion {
    fn from(response: ChatCompletionResponse) -> Self {
        ChatCompletion {
            choices: response
                .choices
                .into_iter()
                .map(|choice| Choice {
                    content: choice.message.content.unwrap_or_default(),
                    finish_reason: choice.finish_reason,
                })
                .collect(),
            usage: response.usage.map(|usage| TokenUsage {
                prompt_tokens: usage.prompt_tokens,
                completion_tokens: usage.completion_tokens,
                total_tokens: usage.total_tokens,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_completion_response_parse() {
        let body = r#"{
            "id": "chatcmpl-1",
            "object": "chat.completion",
            "choices": [
                {"index": 0, "message": {"role": "assistant", "content": "Hi!"}, "finish_reason": "stop"}
            ],
            "usage": {"prompt_tokens": 9, "completion_tokens": 3, "total_tokens": 12}
        }"#;

        let completion: ChatCompletion = serde_json::from_str::<ChatCompletionResponse>(body)
            .unwrap()
            .into();

        assert_eq!(completion.choices.len(), 1);
        assert_eq!(completion.choices[0].content, "Hi!");
        assert_eq!(completion.choices[0].finish_reason.as_deref(), Some("stop"));
        assert_eq!(completion.usage.map(|u| u.total_tokens), Some(12));
    }

    #[test]
    fn test_null_content_becomes_empty() {
        let body = r#"{"choices": [{"message": {"role": "assistant", "content": null}}]}"#;
        let completion: ChatCompletion = serde_json::from_str::<ChatCompletionResponse>(body)
            .unwrap()
            .into();
        assert_eq!(completion.choices[0].content, "");
    }

    #[test]
    fn test_missing_choices_is_rejected() {
        assert!(serde_json::from_str::<ChatCompletionResponse>(r#"{"id": "x"}"#).is_err());
    }

    #[test]
    fn test_model_list_parse() {
        let body = r#"{"object": "list", "data": [{"id": "gpt-4o", "owned_by": "openai"}, {"id": "local"}]}"#;
        let list: ModelList = serde_json::from_str(body).unwrap();
        let infos: Vec<ModelInfo> = list.data.into_iter().map(Into::into).collect();
        assert_eq!(infos[0].owned_by.as_deref(), Some("openai"));
        assert_eq!(infos[1].id, "local");
        assert!(infos[1].owned_by.is_none());
    }

    #[test]
    fn test_error_message_extraction() {
        assert_eq!(
            ErrorEnvelope::message_from(
                r#"{"error": {"message": "rate limited", "type": "requests"}}"#
            ),
            Some("rate limited".to_string())
        );
        assert_eq!(ErrorEnvelope::message_from(r#"{"error": {"message": "  "}}"#), None);
        assert_eq!(ErrorEnvelope::message_from("<html>Bad Gateway</html>"), None);
    }
}
