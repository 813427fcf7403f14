//! Live OpenAI-compatible model backend.
//!
//! Works with OpenAI, OpenRouter, Ollama, vLLM, and any other endpoint
//! exposing `/chat/completions`. Each phase invocation sends the phase's
//! instruction template plus an explicit JSON-only directive as the system
//! message and the input text as the user message, at zero sampling
//! temperature.
//!
//! Malformed model output is not propagated: any response that fails to
//! parse as a JSON document is replaced with a canned "no answer" payload,
//! so downstream phases never observe non-JSON text.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, warn};
use triad_application::{BackendError, ModelBackend};
use triad_domain::util::truncate_str;
use triad_domain::{Phase, PromptTemplate};

/// Configuration for the live backend.
#[derive(Debug, Clone)]
pub struct OpenAiBackendConfig {
    /// Base URL of the OpenAI-compatible API.
    pub base_url: String,
    /// Environment variable holding the API key.
    pub api_key_env: String,
    /// Direct API key (takes precedence over the env var).
    pub api_key: Option<String>,
    /// Model identifier sent with every request.
    pub model: String,
    /// Per-call timeout; a hung call surfaces as [`BackendError::Timeout`].
    pub timeout: Duration,
    /// Max tokens per response.
    pub max_tokens: u32,
}

impl Default for OpenAiBackendConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.openai.com/v1".to_string(),
            api_key_env: "OPENAI_API_KEY".to_string(),
            api_key: None,
            model: "gpt-4o-mini".to_string(),
            timeout: Duration::from_secs(60),
            max_tokens: 1024,
        }
    }
}

/// Live model backend speaking the OpenAI chat-completions protocol.
pub struct OpenAiBackend {
    model: String,
    base_url: String,
    api_key: String,
    max_tokens: u32,
    client: reqwest::Client,
}

impl OpenAiBackend {
    /// Build the backend, resolving credentials and the HTTP client.
    pub fn new(config: OpenAiBackendConfig) -> Result<Self, BackendError> {
        let api_key = match config.api_key {
            Some(key) => key,
            None => std::env::var(&config.api_key_env).map_err(|_| {
                BackendError::MissingCredentials(format!(
                    "no API key: set {} or [backend].api_key",
                    config.api_key_env
                ))
            })?,
        };

        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| BackendError::Other(e.to_string()))?;

        Ok(Self {
            model: config.model,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key,
            max_tokens: config.max_tokens,
            client,
        })
    }

    /// Canned payload substituted for any response that is not valid JSON.
    fn fail_safe_payload() -> String {
        serde_json::json!({
            "final_answer": null,
            "explanation": "Model returned invalid JSON format.",
        })
        .to_string()
    }

    /// Trim the response and enforce the JSON-only contract.
    fn normalize(raw: &str) -> String {
        let trimmed = raw.trim();
        if serde_json::from_str::<serde_json::Value>(trimmed).is_ok() {
            trimmed.to_string()
        } else {
            warn!(
                "Model returned non-JSON output ({}); substituting no-answer payload",
                truncate_str(trimmed, 80)
            );
            Self::fail_safe_payload()
        }
    }

    fn map_transport_error(e: reqwest::Error) -> BackendError {
        if e.is_timeout() {
            BackendError::Timeout
        } else if e.is_connect() {
            BackendError::ConnectionError(e.to_string())
        } else {
            BackendError::RequestFailed(e.to_string())
        }
    }
}

#[async_trait]
impl ModelBackend for OpenAiBackend {
    async fn invoke(&self, phase: Phase, input: &str) -> Result<String, BackendError> {
        let url = format!("{}/chat/completions", self.base_url);
        let system = format!(
            "{}\n\n{}",
            PromptTemplate::system_for(phase),
            PromptTemplate::json_directive()
        );

        let body = ApiRequest {
            model: &self.model,
            messages: vec![
                ApiMessage {
                    role: "system",
                    content: system,
                },
                ApiMessage {
                    role: "user",
                    content: input.to_string(),
                },
            ],
            // Deterministic decoding requested for every phase.
            temperature: 0.0,
            max_tokens: self.max_tokens,
            stream: false,
        };

        debug!(model = %self.model, phase = %phase, "Sending completion request");

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&body)
            .send()
            .await
            .map_err(Self::map_transport_error)?;

        let status = response.status();
        if !status.is_success() {
            let body_text = response.text().await.unwrap_or_default();
            return Err(BackendError::RequestFailed(format!(
                "HTTP {}: {}",
                status,
                truncate_str(&body_text, 200)
            )));
        }

        let parsed: ApiResponse = response
            .json()
            .await
            .map_err(|e| BackendError::RequestFailed(format!("invalid response body: {e}")))?;

        let content = parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .unwrap_or_default();

        Ok(Self::normalize(&content))
    }
}

// ==================== API wire types ====================

#[derive(Serialize)]
struct ApiRequest<'a> {
    model: &'a str,
    messages: Vec<ApiMessage>,
    temperature: f32,
    max_tokens: u32,
    stream: bool,
}

#[derive(Serialize)]
struct ApiMessage {
    role: &'static str,
    content: String,
}

#[derive(Deserialize)]
struct ApiResponse {
    choices: Vec<ApiChoice>,
}

#[derive(Deserialize)]
struct ApiChoice {
    message: ApiResponseMessage,
}

#[derive(Deserialize)]
struct ApiResponseMessage {
    content: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use triad_domain::parse_execution_response;

    #[test]
    fn test_normalize_passes_valid_json_through() {
        let raw = "  {\"passed\": true, \"details\": \"Consistent.\"}\n";
        assert_eq!(
            OpenAiBackend::normalize(raw),
            "{\"passed\": true, \"details\": \"Consistent.\"}"
        );
    }

    #[test]
    fn test_normalize_substitutes_for_prose() {
        let normalized = OpenAiBackend::normalize("The answer is nine apples.");
        // The substitution is a well-formed "no answer" execution payload.
        let execution = parse_execution_response(&normalized).unwrap();
        assert!(execution.final_answer.is_none());
        assert_eq!(execution.explanation, "Model returned invalid JSON format.");
    }

    #[test]
    fn test_missing_credentials() {
        let config = OpenAiBackendConfig {
            api_key_env: "TRIAD_TEST_NO_SUCH_KEY".to_string(),
            ..Default::default()
        };
        let result = OpenAiBackend::new(config);
        assert!(matches!(result, Err(BackendError::MissingCredentials(_))));
    }

    #[test]
    fn test_base_url_is_normalized() {
        let config = OpenAiBackendConfig {
            base_url: "https://api.openai.com/v1/".to_string(),
            api_key: Some("sk-test".to_string()),
            ..Default::default()
        };
        let backend = OpenAiBackend::new(config).unwrap();
        assert_eq!(backend.base_url, "https://api.openai.com/v1");
    }
}
