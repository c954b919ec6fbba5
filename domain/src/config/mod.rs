//! Configuration value objects for the domain layer
//!
//! These are domain concepts related to configuration that are
//! used across multiple layers. Loading them from files is the
//! infrastructure layer's job.

mod api_settings;
mod output_format;
mod queue_config;

pub use api_settings::{ApiSettings, DEFAULT_SERVER_URL};
pub use output_format::OutputFormat;
pub use queue_config::QueueConfig;
