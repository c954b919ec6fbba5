//! Domain error types

use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Unsupported language code: {0}")]
    UnsupportedTarget(String),

    #[error("Invalid model: {0}")]
    InvalidModel(String),

    #[error("Invalid setting `{key}`: {message}")]
    InvalidSetting { key: String, message: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unsupported_target_display() {
        let error = DomainError::UnsupportedTarget("xx".to_string());
        assert_eq!(error.to_string(), "Unsupported language code: xx");
    }
}
