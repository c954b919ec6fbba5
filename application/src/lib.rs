//! Application layer for prompt-relay
//!
//! This crate contains the request queue, the API client, use cases, and
//! port definitions. It depends only on the domain layer.

pub mod client;
pub mod ports;
pub mod queue;
pub mod use_cases;

#[cfg(test)]
mod test_support;

// Re-export commonly used types
pub use client::ApiClient;
pub use ports::{
    llm_gateway::{
        ApiError, ChatCompletion, ChatRequest, Choice, Endpoint, LlmGateway, ModelInfo, TokenUsage,
    },
    progress::{FanOutProgress, NoProgress},
};
pub use queue::{QueueError, QueueState, TaskHandle, TaskQueue};
pub use use_cases::fan_out::{FanOutInput, FanOutUseCase};
