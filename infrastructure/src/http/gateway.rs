//! HTTP implementation of the [`LlmGateway`] port

use super::protocol::{ChatCompletionResponse, ErrorEnvelope, ModelList};
use async_trait::async_trait;
use relay_application::{ApiError, ChatCompletion, ChatRequest, Endpoint, LlmGateway, ModelInfo};
use reqwest::{Response, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, trace, warn};

const USER_AGENT: &str = concat!("prompt-relay/", env!("CARGO_PKG_VERSION"));

/// Gateway that talks to an OpenAI-compatible REST endpoint
///
/// Holds one [`reqwest::Client`] so connections are pooled across calls.
/// The endpoint and credential arrive with every call, so a single gateway
/// serves any number of reconfigurations.
#[derive(Debug, Clone)]
pub struct HttpLlmGateway {
    client: reqwest::Client,
}

impl HttpLlmGateway {
    pub fn new() -> Result<Self, ApiError> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .connect_timeout(Duration::from_secs(10))
            .build()
            .map_err(|e| ApiError::Unknown(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self { client })
    }

    fn url(endpoint: &Endpoint, path: &str) -> String {
        format!("{}/{}", endpoint.server_url.trim_end_matches('/'), path)
    }
}

#[async_trait]
impl LlmGateway for HttpLlmGateway {
    async fn list_models(&self, endpoint: &Endpoint) -> Result<Vec<ModelInfo>, ApiError> {
        let url = Self::url(endpoint, "models");
        debug!(url = %url, "Listing models");

        let response = self
            .client
            .get(&url)
            .bearer_auth(&endpoint.api_key)
            .send()
            .await
            .map_err(send_error)?;

        let list: ModelList = read_json(response).await?;
        Ok(list.data.into_iter().map(Into::into).collect())
    }

    async fn chat_completion(
        &self,
        endpoint: &Endpoint,
        request: &ChatRequest,
    ) -> Result<ChatCompletion, ApiError> {
        let url = Self::url(endpoint, "chat/completions");
        debug!(url = %url, model = %request.model, "Sending chat completion");

        let response = self
            .client
            .post(&url)
            .bearer_auth(&endpoint.api_key)
            .json(request)
            .send()
            .await
            .map_err(send_error)?;

        let body: ChatCompletionResponse = read_json(response).await?;
        Ok(body.into())
    }
}

fn send_error(e: reqwest::Error) -> ApiError {
    warn!("Request could not be sent: {}", e);
    ApiError::Unknown(e.to_string())
}

/// Check the status, then decode the body as `T`
///
/// Error statuses never depend on the body arriving intact; an unreadable
/// body falls back to the status text.
async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        trace!(status = status.as_u16(), bytes = body.len(), "Error response received");
        return Err(transport_error(status, &body));
    }

    let body = response
        .text()
        .await
        .map_err(|e| ApiError::Unknown(format!("Failed to read response body: {}", e)))?;
    trace!(status = status.as_u16(), bytes = body.len(), "Response received");

    serde_json::from_str(&body)
        .map_err(|e| ApiError::Protocol(format!("Invalid response body: {}", e)))
}

fn transport_error(status: StatusCode, body: &str) -> ApiError {
    let message = ErrorEnvelope::message_from(body).unwrap_or_else(|| {
        status
            .canonical_reason()
            .map(str::to_string)
            .unwrap_or_else(|| format!("HTTP {}", status.as_u16()))
    });
    warn!(status = status.as_u16(), "API request failed: {}", message);
    ApiError::Transport {
        status: status.as_u16(),
        message,
    }
}
