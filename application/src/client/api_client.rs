//! Queue-mediated API client

use crate::ports::llm_gateway::{ApiError, ChatCompletion, ChatRequest, Endpoint, LlmGateway};
use crate::queue::TaskQueue;
use relay_domain::{ApiSettings, Message, Model};
use std::sync::{Arc, PoisonError, RwLock};
use tracing::{debug, info, warn};

/// Message sent by [`ApiClient::test_model`]
const TEST_PROMPT: &str = "Hello";
/// Token cap for [`ApiClient::test_model`]
const TEST_MAX_TOKENS: u32 = 5;

/// Client for an OpenAI-compatible endpoint
///
/// Holds the gateway, the shared queue, and the latest settings snapshot.
/// Settings can be replaced at any time with [`reconfigure`](Self::reconfigure);
/// every call reads the snapshot that is current when it starts.
pub struct ApiClient<G: LlmGateway + 'static> {
    gateway: Arc<G>,
    queue: TaskQueue,
    settings: RwLock<ApiSettings>,
}

impl<G: LlmGateway + 'static> ApiClient<G> {
    /// Create a client with its own queue configured from `settings.queue`
    pub fn new(gateway: Arc<G>, settings: ApiSettings) -> Self {
        let queue = TaskQueue::new(settings.queue.clone());
        Self::with_queue(gateway, queue, settings)
    }

    /// Create a client that feeds an existing queue.
    ///
    /// The queue keeps its current configuration until
    /// [`reconfigure`](Self::reconfigure) is called.
    pub fn with_queue(gateway: Arc<G>, queue: TaskQueue, settings: ApiSettings) -> Self {
        Self {
            gateway,
            queue,
            settings: RwLock::new(settings),
        }
    }

    pub fn queue(&self) -> &TaskQueue {
        &self.queue
    }

    /// Snapshot of the current settings
    pub fn settings(&self) -> ApiSettings {
        self.settings
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Replace the settings wholesale and forward the queue section
    pub fn reconfigure(&self, settings: ApiSettings) {
        info!(
            server_url = %settings.server_url,
            model = %settings.model,
            "API client reconfigured"
        );
        self.queue.reconfigure(settings.queue.clone());
        *self
            .settings
            .write()
            .unwrap_or_else(PoisonError::into_inner) = settings;
    }

    /// List chat-capable models, sorted by id.
    ///
    /// Bypasses the queue: discovery is metadata, not generation traffic.
    pub async fn list_available_models(&self) -> Result<Vec<Model>, ApiError> {
        let endpoint = Self::endpoint(&self.settings())?;
        let listed = self.gateway.list_models(&endpoint).await?;
        let total = listed.len();

        let mut models: Vec<Model> = listed
            .into_iter()
            .map(|info| Model::new(info.id))
            .filter(Model::is_chat_capable)
            .collect();
        models.sort();

        debug!(total, chat = models.len(), "Listed models");
        Ok(models)
    }

    /// Check that `model` answers a minimal completion.
    ///
    /// Never fails: any error, or a response without choices, yields `false`.
    /// Bypasses the queue.
    pub async fn test_model(&self, model: &Model) -> bool {
        let endpoint = match Self::endpoint(&self.settings()) {
            Ok(endpoint) => endpoint,
            Err(e) => {
                warn!(model = %model, "Model test skipped: {}", e);
                return false;
            }
        };

        let request = ChatRequest {
            model: model.clone(),
            messages: vec![Message::user(TEST_PROMPT)],
            max_tokens: Some(TEST_MAX_TOKENS),
            temperature: Some(0.0),
        };

        match self.gateway.chat_completion(&endpoint, &request).await {
            Ok(completion) => {
                let ok = !completion.choices.is_empty();
                debug!(model = %model, ok, "Model test finished");
                ok
            }
            Err(e) => {
                warn!(model = %model, "Model test failed: {}", e);
                false
            }
        }
    }

    /// Send `messages` through the queue and return the first choice's text.
    ///
    /// `model_override` replaces the configured model for this call only.
    pub async fn call_api(
        &self,
        messages: Vec<Message>,
        model_override: Option<&Model>,
    ) -> Result<String, ApiError> {
        let settings = self.settings();
        let endpoint = Self::endpoint(&settings)?;
        let request = ChatRequest {
            model: model_override.cloned().unwrap_or_else(|| settings.model.clone()),
            messages,
            max_tokens: settings.max_tokens(),
            temperature: settings.temperature(),
        };

        debug!(
            model = %request.model,
            messages = request.messages.len(),
            pending = self.queue.pending(),
            "Queueing chat completion"
        );

        let gateway = Arc::clone(&self.gateway);
        let completion = self
            .queue
            .enqueue(async move { gateway.chat_completion(&endpoint, &request).await })
            .await??;

        first_choice(completion)
    }

    fn endpoint(settings: &ApiSettings) -> Result<Endpoint, ApiError> {
        if !settings.has_credential() {
            return Err(ApiError::missing_api_key());
        }
        Ok(Endpoint {
            server_url: settings.server_url.clone(),
            api_key: settings.api_key.trim().to_string(),
        })
    }
}

fn first_choice(completion: ChatCompletion) -> Result<String, ApiError> {
    completion
        .choices
        .into_iter()
        .next()
        .map(|choice| choice.content)
        .ok_or_else(|| ApiError::Protocol("no content returned".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::llm_gateway::Choice;
    use crate::test_support::{MockGateway, completion};
    use relay_domain::QueueConfig;

    fn settings() -> ApiSettings {
        ApiSettings::default()
            .with_api_key("sk-test")
            .with_queue(QueueConfig::default().with_delay_ms(0))
    }

    #[tokio::test]
    async fn test_missing_credential_fails_before_any_call() {
        let gateway = Arc::new(MockGateway::replying(|_| Ok(completion("unused"))));
        let client = ApiClient::new(Arc::clone(&gateway), settings().with_api_key(""));

        let err = client
            .call_api(vec![Message::user("hi")], None)
            .await
            .unwrap_err();

        assert!(err.is_configuration());
        assert_eq!(gateway.chat_calls(), 0);
        assert!(matches!(
            client.list_available_models().await,
            Err(ApiError::Configuration(_))
        ));
        assert_eq!(gateway.list_calls(), 0);
    }

    #[tokio::test]
    async fn test_empty_choices_is_protocol_error() {
        let gateway = Arc::new(MockGateway::replying(|_| Ok(ChatCompletion::default())));
        let client = ApiClient::new(gateway, settings());

        let err = client
            .call_api(vec![Message::user("hi")], None)
            .await
            .unwrap_err();

        assert_eq!(err, ApiError::Protocol("no content returned".to_string()));
    }

    #[tokio::test]
    async fn test_request_uses_override_and_parsed_limits() {
        let gateway = Arc::new(MockGateway::replying(|_| Ok(completion("done"))));
        let client = ApiClient::new(
            Arc::clone(&gateway),
            ApiSettings {
                max_tokens: "256".to_string(),
                temperature: "not a number".to_string(),
                ..settings()
            },
        );

        let messages = vec![Message::system("sys"), Message::user("usr")];
        let reply = client
            .call_api(messages.clone(), Some(&Model::new("claude-3-haiku")))
            .await
            .unwrap();
        assert_eq!(reply, "done");

        let sent = gateway.requests();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].model, Model::new("claude-3-haiku"));
        assert_eq!(sent[0].messages, messages);
        assert_eq!(sent[0].max_tokens, Some(256));
        assert_eq!(sent[0].temperature, None);
    }

    #[tokio::test]
    async fn test_transport_error_passes_through() {
        let gateway = Arc::new(MockGateway::replying(|_| {
            Err(ApiError::Transport {
                status: 429,
                message: "rate limited".to_string(),
            })
        }));
        let client = ApiClient::new(gateway, settings());

        let err = client
            .call_api(vec![Message::user("hi")], None)
            .await
            .unwrap_err();
        assert_eq!(err.status(), Some(429));
        assert!(err.to_string().contains("rate limited"));
    }

    #[tokio::test]
    async fn test_list_models_filters_and_sorts() {
        let gateway = Arc::new(
            MockGateway::replying(|_| Ok(completion("unused"))).with_models(&[
                "text-embedding-3-small",
                "gpt-4o",
                "claude-3-opus",
                "whisper-1",
                "gpt-4.1-mini",
            ]),
        );
        let client = ApiClient::new(gateway, settings());

        let models = client.list_available_models().await.unwrap();
        let ids: Vec<_> = models.iter().map(Model::as_str).collect();
        assert_eq!(ids, vec!["claude-3-opus", "gpt-4.1-mini", "gpt-4o"]);
    }

    #[tokio::test]
    async fn test_test_model_never_fails() {
        let ok = ApiClient::new(
            Arc::new(MockGateway::replying(|_| Ok(completion("hi")))),
            settings(),
        );
        assert!(ok.test_model(&Model::new("gpt-4o")).await);

        let empty = ApiClient::new(
            Arc::new(MockGateway::replying(|_| Ok(ChatCompletion::default()))),
            settings(),
        );
        assert!(!empty.test_model(&Model::new("gpt-4o")).await);

        let failing = ApiClient::new(
            Arc::new(MockGateway::replying(|_| {
                Err(ApiError::Unknown("connection refused".to_string()))
            })),
            settings(),
        );
        assert!(!failing.test_model(&Model::new("gpt-4o")).await);
    }

    #[tokio::test]
    async fn test_test_model_sends_minimal_request_without_queueing() {
        let gateway = Arc::new(MockGateway::replying(|_| Ok(completion("hi"))));
        let client = ApiClient::new(Arc::clone(&gateway), settings());

        assert!(client.test_model(&Model::new("gpt-4o-mini")).await);
        assert_eq!(client.queue().pending(), 0);

        let sent = gateway.requests();
        assert_eq!(sent[0].max_tokens, Some(TEST_MAX_TOKENS));
        assert_eq!(sent[0].temperature, Some(0.0));
        assert_eq!(sent[0].messages, vec![Message::user(TEST_PROMPT)]);
    }

    #[tokio::test]
    async fn test_reconfigure_replaces_settings_and_queue_config() {
        let gateway = Arc::new(MockGateway::replying(|_| Ok(completion("ok"))));
        let client = ApiClient::new(gateway, settings().with_api_key(""));

        let updated = settings()
            .with_server_url("http://localhost:9999/v1")
            .with_queue(QueueConfig::disabled());
        client.reconfigure(updated.clone());

        assert_eq!(client.settings(), updated);
        assert!(!client.queue().config().enabled);
        assert_eq!(
            client.call_api(vec![Message::user("hi")], None).await,
            Ok("ok".to_string())
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_concurrent_calls_never_overlap_on_the_wire() {
        let gateway = Arc::new(
            MockGateway::replying(|_| Ok(completion("ok")))
                .with_latency(std::time::Duration::from_millis(20)),
        );
        let client = ApiClient::new(Arc::clone(&gateway), settings());

        let calls = (0..4).map(|i| client.call_api(vec![Message::user(format!("{i}"))], None));
        let results = futures::future::join_all(calls).await;

        assert!(results.iter().all(|r| r.is_ok()));
        assert_eq!(gateway.chat_calls(), 4);
        assert_eq!(gateway.max_in_flight(), 1);

        let order: Vec<_> = gateway
            .requests()
            .into_iter()
            .map(|r| r.messages[0].content.clone())
            .collect();
        assert_eq!(order, vec!["0", "1", "2", "3"]);
    }

    #[test]
    fn test_first_choice_wins() {
        let two = ChatCompletion {
            choices: vec![
                Choice {
                    content: "first".to_string(),
                    finish_reason: Some("stop".to_string()),
                },
                Choice {
                    content: "second".to_string(),
                    finish_reason: None,
                },
            ],
            usage: None,
        };
        assert_eq!(first_choice(two), Ok("first".to_string()));
    }
}
