//! OpenAI-compatible HTTP adapter
//!
//! Implements [`LlmGateway`](relay_application::LlmGateway) over `reqwest`.

mod gateway;
pub mod protocol;

pub use gateway::HttpLlmGateway;
