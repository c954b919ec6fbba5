//! Fan-out use case
//!
//! Translates one source text into N target languages. Every branch goes
//! through [`ApiClient::translate`] and therefore through the shared queue,
//! so branches are launched together but reach the endpoint one at a time.

use crate::client::ApiClient;
use crate::ports::llm_gateway::LlmGateway;
use crate::ports::progress::{FanOutProgress, NoProgress};
use futures::FutureExt;
use relay_domain::{FanOutResult, FanOutTarget, Language};
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use tokio::task::JoinSet;
use tracing::{debug, info, warn};

/// Input for the FanOut use case
#[derive(Debug, Clone)]
pub struct FanOutInput {
    /// Text to translate
    pub text: String,
    /// Code of the language `text` is written in
    pub source_language: String,
    /// Tone passed to the translation prompt
    pub style: String,
    /// Targets in the order results are reported
    pub targets: Vec<FanOutTarget>,
}

impl FanOutInput {
    pub fn new(
        text: impl Into<String>,
        source_language: impl Into<String>,
        targets: impl IntoIterator<Item = impl Into<FanOutTarget>>,
    ) -> Self {
        Self {
            text: text.into(),
            source_language: source_language.into(),
            style: "neutral".to_string(),
            targets: targets.into_iter().map(Into::into).collect(),
        }
    }

    pub fn with_style(mut self, style: impl Into<String>) -> Self {
        self.style = style.into();
        self
    }
}

/// Use case for translating into many languages at once
pub struct FanOutUseCase<G: LlmGateway + 'static> {
    client: Arc<ApiClient<G>>,
}

impl<G: LlmGateway + 'static> FanOutUseCase<G> {
    pub fn new(client: Arc<ApiClient<G>>) -> Self {
        Self { client }
    }

    /// Execute the use case with default (no-op) progress
    pub async fn execute(&self, input: FanOutInput) -> Vec<FanOutResult> {
        self.execute_with_progress(input, &NoProgress).await
    }

    /// Execute the use case with progress callbacks.
    ///
    /// Always returns one result per target, in input order. Failures are
    /// reported in the target's own slot and never abort the other branches.
    pub async fn execute_with_progress(
        &self,
        input: FanOutInput,
        progress: &dyn FanOutProgress,
    ) -> Vec<FanOutResult> {
        let total = input.targets.len();
        info!(targets = total, source = %input.source_language, "Starting fan-out");
        progress.on_fan_out_start(total);

        let mut slots: Vec<Option<FanOutResult>> = vec![None; total];

        let source = match Language::resolve(&FanOutTarget::new(input.source_language.as_str())) {
            Ok(source) => source,
            Err(e) => {
                warn!("Source language rejected: {}", e);
                for (slot, target) in slots.iter_mut().zip(&input.targets) {
                    progress.on_target_complete(target, false);
                    *slot = Some(FanOutResult::failure(target.clone(), e.to_string()));
                }
                progress.on_fan_out_complete();
                return settle(slots, &input.targets);
            }
        };

        let mut join_set = JoinSet::new();

        for (index, target) in input.targets.iter().enumerate() {
            let language = match Language::resolve(target) {
                Ok(language) => language,
                Err(e) => {
                    debug!(target = %target, "Skipping unsupported target");
                    progress.on_target_complete(target, false);
                    slots[index] = Some(FanOutResult::failure(target.clone(), e.to_string()));
                    continue;
                }
            };

            let client = Arc::clone(&self.client);
            let text = input.text.clone();
            let style = input.style.clone();

            join_set.spawn(async move {
                let branch = client.translate(&text, &source, &language, &style);
                let outcome = match AssertUnwindSafe(branch).catch_unwind().await {
                    Ok(Ok(content)) => Ok(content),
                    Ok(Err(e)) => Err(e.to_string()),
                    Err(_) => Err("translation task panicked".to_string()),
                };
                (index, outcome)
            });
        }

        while let Some(joined) = join_set.join_next().await {
            match joined {
                Ok((index, outcome)) => {
                    let target = input.targets[index].clone();
                    let result = match outcome {
                        Ok(content) => {
                            debug!(target = %target, "Target settled");
                            FanOutResult::success(target, content)
                        }
                        Err(message) => {
                            warn!(target = %target, "Target failed: {}", message);
                            FanOutResult::failure(target, message)
                        }
                    };
                    progress.on_target_complete(&result.target, result.is_success());
                    slots[index] = Some(result);
                }
                Err(e) => {
                    warn!("Task join error: {}", e);
                }
            }
        }

        progress.on_fan_out_complete();
        let results = settle(slots, &input.targets);
        info!(
            succeeded = results.iter().filter(|r| r.is_success()).count(),
            total,
            "Fan-out complete"
        );
        results
    }
}

/// Fill empty slots so the output always has one entry per target
fn settle(slots: Vec<Option<FanOutResult>>, targets: &[FanOutTarget]) -> Vec<FanOutResult> {
    slots
        .into_iter()
        .zip(targets)
        .map(|(slot, target)| {
            slot.unwrap_or_else(|| FanOutResult::failure(target.clone(), "task did not complete"))
        })
        .collect()
}
