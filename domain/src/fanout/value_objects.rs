//! Fan-out value objects - per-target settled outcomes.

use serde::{Deserialize, Serialize};

/// Identifier of one fan-out target (Value Object)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FanOutTarget(String);

impl FanOutTarget {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for FanOutTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for FanOutTarget {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for FanOutTarget {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Final outcome of one fan-out branch.
///
/// Exactly one of content or error exists, so a failed branch can never
/// also carry content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Settled {
    Content(String),
    Error(String),
}

/// Result for a single fan-out target
///
/// Serializes as `{"target": "vi", "content": "..."}` on success and
/// `{"target": "xx", "error": "..."}` on failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FanOutResult {
    pub target: FanOutTarget,
    #[serde(flatten)]
    pub outcome: Settled,
}

impl FanOutResult {
    /// Creates a successful result for `target`.
    pub fn success(target: impl Into<FanOutTarget>, content: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            outcome: Settled::Content(content.into()),
        }
    }

    /// Creates a failed result carrying the error message.
    pub fn failure(target: impl Into<FanOutTarget>, error: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            outcome: Settled::Error(error.into()),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self.outcome, Settled::Content(_))
    }

    pub fn content(&self) -> Option<&str> {
        match &self.outcome {
            Settled::Content(content) => Some(content),
            Settled::Error(_) => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match &self.outcome {
            Settled::Content(_) => None,
            Settled::Error(error) => Some(error),
        }
    }
}
