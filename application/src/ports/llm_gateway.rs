//! LLM Gateway port
//!
//! Defines the interface for talking to an OpenAI-compatible endpoint and
//! the error taxonomy every caller of the API client sees.

use crate::queue::QueueError;
use async_trait::async_trait;
use relay_domain::{Message, Model};
use serde::Serialize;
use thiserror::Error;

/// Errors surfaced by the API client
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ApiError {
    /// Required setup is missing; never retried automatically
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The endpoint answered with a non-success HTTP status
    #[error("API request failed ({status}): {message}")]
    Transport { status: u16, message: String },

    /// The endpoint answered 2xx but the body breaks the expected contract
    #[error("Protocol error: {0}")]
    Protocol(String),

    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl ApiError {
    pub fn missing_api_key() -> Self {
        ApiError::Configuration(
            "API key is not configured. Set `api.api_key` in the config file \
             or export the variable named by `api.api_key_env`"
                .to_string(),
        )
    }

    /// Check if this error means the user has to fix their setup
    pub fn is_configuration(&self) -> bool {
        matches!(self, ApiError::Configuration(_))
    }

    /// HTTP status carried by a transport error
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Transport { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<QueueError> for ApiError {
    fn from(e: QueueError) -> Self {
        ApiError::Unknown(e.to_string())
    }
}

/// Where and as whom to send a request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    pub server_url: String,
    pub api_key: String,
}

/// Body of a chat completion request
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatRequest {
    pub model: Model,
    pub messages: Vec<Message>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
}

/// One generated alternative
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Choice {
    pub content: String,
    pub finish_reason: Option<String>,
}

/// Token accounting reported by the endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TokenUsage {
    pub prompt_tokens: u64,
    pub completion_tokens: u64,
    pub total_tokens: u64,
}

/// Successful chat completion response
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ChatCompletion {
    pub choices: Vec<Choice>,
    pub usage: Option<TokenUsage>,
}

/// An entry from the model listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelInfo {
    pub id: String,
    pub owned_by: Option<String>,
}

/// Gateway for LLM communication
///
/// Implementations perform exactly one network exchange per call and map
/// non-success statuses to [`ApiError::Transport`]. Queueing and response
/// interpretation belong to [`ApiClient`](crate::ApiClient).
#[async_trait]
pub trait LlmGateway: Send + Sync {
    /// `GET {server_url}/models`
    async fn list_models(&self, endpoint: &Endpoint) -> Result<Vec<ModelInfo>, ApiError>;

    /// `POST {server_url}/chat/completions`
    async fn chat_completion(
        &self,
        endpoint: &Endpoint,
        request: &ChatRequest,
    ) -> Result<ChatCompletion, ApiError>;
}
