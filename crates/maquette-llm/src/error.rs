//! Error types for maquette-llm
//!
//! Every failure of the generative path maps onto a fixed category so
//! the export surface can show one consistent, human-readable reason
//! before falling back to local templates.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Generative export error type
#[derive(Debug, Error)]
pub enum Error {
    /// No API key configured
    #[error("gemini api key not configured")]
    NotConfigured,

    /// The configured credential was rejected
    #[error("invalid api credential")]
    InvalidCredential,

    /// The credential is valid but not allowed to use the API
    #[error("access denied: {0}")]
    AccessDenied(String),

    /// Quota exhausted or rate limit hit
    #[error("rate limit exceeded")]
    RateLimited,

    /// The requested model does not exist or is temporarily unavailable
    #[error("model unavailable: {0}")]
    ModelUnavailable(String),

    /// Transport-level failure
    #[error("network error: {0}")]
    Network(String),

    /// The response could not be parsed into the expected structure
    #[error("invalid response: {0}")]
    InvalidResponse(String),

    /// Any other API error
    #[error("api error: {0}")]
    Api(String),
}

impl Error {
    /// The fixed user-facing category for this failure
    #[must_use]
    pub fn category(&self) -> FailureCategory {
        match self {
            Self::NotConfigured | Self::InvalidCredential => FailureCategory::InvalidCredential,
            Self::AccessDenied(_) => FailureCategory::AccessDenied,
            Self::RateLimited => FailureCategory::Quota,
            Self::ModelUnavailable(_) => FailureCategory::ModelUnavailable,
            Self::Network(_) => FailureCategory::Network,
            Self::InvalidResponse(_) | Self::Api(_) => FailureCategory::Unknown,
        }
    }
}

/// The fixed set of user-facing failure reasons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureCategory {
    /// Missing or rejected credential
    InvalidCredential,
    /// Credential valid but access refused
    AccessDenied,
    /// Quota exhausted or rate limited
    Quota,
    /// Model missing or temporarily down
    ModelUnavailable,
    /// Transport failure
    Network,
    /// Anything else
    Unknown,
}

impl FailureCategory {
    /// Short category label
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::InvalidCredential => "invalid credential",
            Self::AccessDenied => "access denied",
            Self::Quota => "quota/rate-limit",
            Self::ModelUnavailable => "model unavailable",
            Self::Network => "network error",
            Self::Unknown => "unknown",
        }
    }

    /// Human-readable message shown next to the local-template fallback
    #[must_use]
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::InvalidCredential => {
                "Gemini API key is missing or invalid. Check your API key configuration."
            }
            Self::AccessDenied => "Access to the Gemini API was denied for this key.",
            Self::Quota => "Gemini API quota or rate limit exceeded. Try again later.",
            Self::ModelUnavailable => "The Gemini model is unavailable right now.",
            Self::Network => "Could not reach the Gemini API.",
            Self::Unknown => "The Gemini API returned an unexpected response.",
        }
    }
}

impl std::fmt::Display for FailureCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_categories() {
        assert_eq!(Error::NotConfigured.category(), FailureCategory::InvalidCredential);
        assert_eq!(Error::RateLimited.category(), FailureCategory::Quota);
        assert_eq!(
            Error::Network("timeout".into()).category(),
            FailureCategory::Network
        );
        assert_eq!(
            Error::InvalidResponse("no json".into()).category(),
            FailureCategory::Unknown
        );
    }

    #[test]
    fn test_quota_label() {
        assert_eq!(FailureCategory::Quota.as_str(), "quota/rate-limit");
        assert_eq!(FailureCategory::Quota.to_string(), "quota/rate-limit");
    }

    #[test]
    fn test_user_messages_never_empty() {
        for category in [
            FailureCategory::InvalidCredential,
            FailureCategory::AccessDenied,
            FailureCategory::Quota,
            FailureCategory::ModelUnavailable,
            FailureCategory::Network,
            FailureCategory::Unknown,
        ] {
            assert!(!category.user_message().is_empty());
        }
    }
}
