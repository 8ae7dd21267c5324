//! Gemini - Google Gemini API client
//!
//! Minimal `generateContent` client over reqwest. Every transport and
//! API failure is mapped onto the fixed failure taxonomy in
//! [`crate::error`], with sanitized messages.

use std::fmt;
use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::util::{mask_api_key, sanitize_api_error};

/// Default API base URL
const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Default Gemini model
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

// ============================================================================
// API Types
// ============================================================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiRequest {
    contents: Vec<GeminiContent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

#[derive(Debug, Serialize, Deserialize)]
struct GeminiContent {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<GeminiPart>,
}

#[derive(Debug, Serialize, Deserialize)]
struct GeminiPart {
    #[serde(default)]
    text: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_output_tokens: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: GeminiContent,
}

#[derive(Debug, Deserialize)]
struct GeminiError {
    error: GeminiErrorDetail,
}

#[derive(Debug, Deserialize)]
struct GeminiErrorDetail {
    #[serde(default)]
    code: i32,
    #[serde(default)]
    message: String,
    #[serde(default)]
    status: String,
}

// ============================================================================
// Configuration
// ============================================================================

/// Gemini client configuration
#[derive(Clone)]
pub struct GeminiConfig {
    /// API key
    pub api_key: String,
    /// Base URL
    pub base_url: String,
    /// Model used for code generation
    pub model: String,
    /// Request timeout
    pub timeout: Duration,
}

// Custom Debug implementation to mask the credential
impl fmt::Debug for GeminiConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeminiConfig")
            .field("api_key", &mask_api_key(&self.api_key))
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl GeminiConfig {
    /// Create a configuration with an API key
    #[must_use]
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            timeout: Duration::from_secs(60),
        }
    }

    /// Create a configuration from `GEMINI_API_KEY` / `GOOGLE_API_KEY`.
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("GEMINI_API_KEY")
            .or_else(|_| std::env::var("GOOGLE_API_KEY"))
            .map_err(|_| Error::NotConfigured)?;

        let mut config = Self::new(api_key);
        if let Ok(base_url) = std::env::var("GEMINI_BASE_URL") {
            config.base_url = base_url;
        }
        if let Ok(model) = std::env::var("GEMINI_MODEL") {
            config.model = model;
        }
        Ok(config)
    }

    /// Set the base URL
    #[must_use]
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the model
    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Set the timeout
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

// ============================================================================
// Client
// ============================================================================

/// Google Gemini client
#[derive(Debug, Clone)]
pub struct GeminiClient {
    client: Client,
    config: GeminiConfig,
}

impl GeminiClient {
    /// Create a client from a configuration
    pub fn new(config: GeminiConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| Error::Network(e.to_string()))?;
        Ok(Self { client, config })
    }

    /// The configured model
    #[must_use]
    pub fn model(&self) -> &str {
        &self.config.model
    }

    /// Send a single-turn prompt and return the response text.
    pub async fn generate(&self, prompt: &str) -> Result<String> {
        // The URL carries the API key; never log it
        debug!(model = %self.config.model, "sending Gemini generateContent request");

        let request = GeminiRequest {
            contents: vec![GeminiContent {
                role: Some("user".to_string()),
                parts: vec![GeminiPart {
                    text: prompt.to_string(),
                }],
            }],
            generation_config: Some(GenerationConfig {
                temperature: Some(0.2),
                max_output_tokens: Some(8192),
            }),
        };

        let url = format!(
            "{}/models/{}:generateContent?key={}",
            self.config.base_url, self.config.model, self.config.api_key
        );

        let response = self
            .client
            .post(&url)
            .header("content-type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| Error::Network(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| Error::Network(e.to_string()))?;

        if !status.is_success() {
            return Err(Self::map_api_error(status.as_u16(), &body));
        }

        let parsed: GeminiResponse = serde_json::from_str(&body)
            .map_err(|e| Error::InvalidResponse(e.to_string()))?;

        let text: String = parsed
            .candidates
            .first()
            .map(|candidate| {
                candidate
                    .content
                    .parts
                    .iter()
                    .map(|part| part.text.as_str())
                    .collect::<Vec<_>>()
                    .join("")
            })
            .unwrap_or_default();

        if text.is_empty() {
            return Err(Error::InvalidResponse(
                "no candidates in response".to_string(),
            ));
        }
        Ok(text)
    }

    /// Map a non-success HTTP response onto the failure taxonomy.
    fn map_api_error(status: u16, body: &str) -> Error {
        let detail = serde_json::from_str::<GeminiError>(body)
            .map(|e| e.error)
            .unwrap_or_else(|_| GeminiErrorDetail {
                code: i32::from(status),
                message: String::new(),
                status: String::new(),
            });
        warn!(
            status,
            api_status = %detail.status,
            api_code = detail.code,
            "Gemini API error response"
        );

        let message = detail.message.to_lowercase();
        match status {
            400 if message.contains("api key") => Error::InvalidCredential,
            401 => Error::InvalidCredential,
            403 => Error::AccessDenied(sanitize_api_error(&detail.message)),
            404 => Error::ModelUnavailable(sanitize_api_error(&detail.message)),
            429 => Error::RateLimited,
            500..=599 => Error::ModelUnavailable(sanitize_api_error(&detail.message)),
            _ => Error::Api(sanitize_api_error(&format!(
                "HTTP {status}: {}",
                detail.message
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FailureCategory;

    #[test]
    fn test_config_debug_masks_key() {
        let config = GeminiConfig::new("sk-super-secret-key-1234");
        let debug = format!("{config:?}");
        assert!(!debug.contains("super-secret"));
        assert!(debug.contains("..."));
    }

    #[test]
    fn test_config_builders() {
        let config = GeminiConfig::new("key-123456789")
            .with_model("gemini-2.5-pro")
            .with_base_url("http://localhost:9090")
            .with_timeout(Duration::from_secs(5));
        assert_eq!(config.model, "gemini-2.5-pro");
        assert_eq!(config.base_url, "http://localhost:9090");
        assert_eq!(config.timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_map_api_error_categories() {
        let body = r#"{"error": {"code": 429, "message": "Quota exceeded", "status": "RESOURCE_EXHAUSTED"}}"#;
        assert_eq!(
            GeminiClient::map_api_error(429, body).category(),
            FailureCategory::Quota
        );

        let body = r#"{"error": {"code": 400, "message": "API key not valid", "status": "INVALID_ARGUMENT"}}"#;
        assert_eq!(
            GeminiClient::map_api_error(400, body).category(),
            FailureCategory::InvalidCredential
        );

        assert_eq!(
            GeminiClient::map_api_error(403, "{}").category(),
            FailureCategory::AccessDenied
        );
        assert_eq!(
            GeminiClient::map_api_error(404, "{}").category(),
            FailureCategory::ModelUnavailable
        );
        assert_eq!(
            GeminiClient::map_api_error(503, "not even json").category(),
            FailureCategory::ModelUnavailable
        );
        assert_eq!(
            GeminiClient::map_api_error(418, "{}").category(),
            FailureCategory::Unknown
        );
    }

    #[test]
    fn test_error_body_is_sanitized() {
        let body = r#"{"error": {"code": 403, "message": "permission denied for key AIza-verysecret", "status": "PERMISSION_DENIED"}}"#;
        let error = GeminiClient::map_api_error(403, body);
        assert!(!error.to_string().contains("AIza-verysecret"));
    }
}
