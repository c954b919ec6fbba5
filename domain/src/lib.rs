//! Domain layer for prompt-relay
//!
//! This crate contains the value objects shared by every other layer.
//! It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Admission control
//!
//! Every generation call against the configured endpoint passes through a
//! single FIFO queue. [`QueueConfig`] describes how that queue behaves
//! (enabled flag and inter-task pacing delay).
//!
//! ## Fan-out
//!
//! One source payload is turned into N independent results, one per
//! [`FanOutTarget`]. Each [`FanOutResult`] settles on its own: a failure for
//! one target never hides the results of the others.

pub mod config;
pub mod core;
pub mod fanout;
pub mod prompt;
pub mod session;

// Re-export commonly used types
pub use config::{ApiSettings, OutputFormat, QueueConfig};
pub use core::{error::DomainError, model::Model};
pub use fanout::{
    language::Language,
    value_objects::{FanOutResult, FanOutTarget, Settled},
};
pub use prompt::PromptTemplate;
pub use session::entities::{Message, Role};
