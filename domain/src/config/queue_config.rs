//! Queue tuning value object

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Admission-control settings for the request queue.
///
/// `max_concurrent` is accepted for forward compatibility only: the queue
/// always runs one task at a time regardless of its value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QueueConfig {
    /// When false, tasks bypass the queue and run immediately
    pub enabled: bool,
    /// Pause between the settle of one task and the start of the next
    pub delay_ms: u64,
    /// Reserved; effective concurrency is fixed at 1
    pub max_concurrent: u32,
}

impl Default for QueueConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            delay_ms: 500,
            max_concurrent: 1,
        }
    }
}

impl QueueConfig {
    /// Queue disabled: every task runs as soon as it is submitted
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Self::default()
        }
    }

    pub fn with_delay_ms(mut self, delay_ms: u64) -> Self {
        self.delay_ms = delay_ms;
        self
    }

    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        if self.max_concurrent == 0 {
            return Err(DomainError::InvalidSetting {
                key: "queue.max_concurrent".to_string(),
                message: "must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}
