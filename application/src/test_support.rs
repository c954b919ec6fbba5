//! In-memory gateway for unit tests

use crate::ports::llm_gateway::{
    ApiError, ChatCompletion, ChatRequest, Choice, Endpoint, LlmGateway, ModelInfo,
};
use async_trait::async_trait;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

type Reply = dyn Fn(&ChatRequest) -> Result<ChatCompletion, ApiError> + Send + Sync;

/// Gateway that answers from a closure and records what it was asked
pub struct MockGateway {
    reply: Box<Reply>,
    models: Vec<ModelInfo>,
    latency: Duration,
    requests: Mutex<Vec<ChatRequest>>,
    list_calls: AtomicUsize,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

impl MockGateway {
    pub fn replying(
        reply: impl Fn(&ChatRequest) -> Result<ChatCompletion, ApiError> + Send + Sync + 'static,
    ) -> Self {
        Self {
            reply: Box::new(reply),
            models: Vec::new(),
            latency: Duration::ZERO,
            requests: Mutex::new(Vec::new()),
            list_calls: AtomicUsize::new(0),
            in_flight: AtomicUsize::new(0),
            max_in_flight: AtomicUsize::new(0),
        }
    }

    pub fn with_models(mut self, ids: &[&str]) -> Self {
        self.models = ids
            .iter()
            .map(|id| ModelInfo {
                id: id.to_string(),
                owned_by: None,
            })
            .collect();
        self
    }

    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    pub fn requests(&self) -> Vec<ChatRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn chat_calls(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl LlmGateway for MockGateway {
    async fn list_models(&self, _endpoint: &Endpoint) -> Result<Vec<ModelInfo>, ApiError> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.models.clone())
    }

    async fn chat_completion(
        &self,
        _endpoint: &Endpoint,
        request: &ChatRequest,
    ) -> Result<ChatCompletion, ApiError> {
        self.requests.lock().unwrap().push(request.clone());
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);

        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }

        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        (self.reply)(request)
    }
}

/// Completion with a single choice
pub fn completion(text: &str) -> ChatCompletion {
    ChatCompletion {
        choices: vec![Choice {
            content: text.to_string(),
            finish_reason: Some("stop".to_string()),
        }],
        usage: None,
    }
}
