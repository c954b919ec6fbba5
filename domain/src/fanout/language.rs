//! Supported translation languages

use crate::core::error::DomainError;
use crate::fanout::value_objects::FanOutTarget;

/// A language the translation fan-out can target
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Language {
    pub code: &'static str,
    pub name: &'static str,
}

const SUPPORTED: &[Language] = &[
    Language { code: "en", name: "English" },
    Language { code: "vi", name: "Vietnamese" },
    Language { code: "fr", name: "French" },
    Language { code: "de", name: "German" },
    Language { code: "es", name: "Spanish" },
    Language { code: "it", name: "Italian" },
    Language { code: "pt", name: "Portuguese" },
    Language { code: "ja", name: "Japanese" },
    Language { code: "ko", name: "Korean" },
    Language { code: "zh", name: "Chinese" },
    Language { code: "ru", name: "Russian" },
    Language { code: "ar", name: "Arabic" },
    Language { code: "hi", name: "Hindi" },
    Language { code: "th", name: "Thai" },
    Language { code: "id", name: "Indonesian" },
    Language { code: "nl", name: "Dutch" },
    Language { code: "pl", name: "Polish" },
    Language { code: "tr", name: "Turkish" },
];

impl Language {
    /// All supported languages, in display order
    pub fn all() -> &'static [Language] {
        SUPPORTED
    }

    /// Look up a language by ISO 639-1 code (case-insensitive)
    pub fn from_code(code: &str) -> Option<Language> {
        let code = code.trim();
        SUPPORTED
            .iter()
            .find(|lang| lang.code.eq_ignore_ascii_case(code))
            .copied()
    }

    /// Resolve a fan-out target into a language
    pub fn resolve(target: &FanOutTarget) -> Result<Language, DomainError> {
        Self::from_code(target.as_str())
            .ok_or_else(|| DomainError::UnsupportedTarget(target.as_str().to_string()))
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.name, self.code)
    }
}
