use std::time::Duration;

use quorum_core::error::AppError;
use quorum_core::traits::Completer;
use reqwest::Client;
use serde::{Deserialize, Serialize};

pub const COHERE_BASE_URL: &str = "https://api.cohere.com/v1";

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(120);

/// Chat client for the Cohere API.
///
/// Cohere's chat endpoint takes a single `message` string instead of a
/// message list and returns the answer as a top-level `text` field.
#[derive(Clone)]
pub struct CohereCompleter {
    client: Client,
    base_url: String,
    api_key: String,
    timeout_secs: u64,
}

impl CohereCompleter {
    pub fn new(api_key: &str) -> Result<Self, AppError> {
        Self::with_base_url(api_key, COHERE_BASE_URL)
    }

    pub fn with_base_url(api_key: &str, base_url: &str) -> Result<Self, AppError> {
        let client = Client::builder()
            .timeout(DEFAULT_TIMEOUT)
            .build()
            .map_err(|e| AppError::NetworkError(e.to_string()))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            timeout_secs: DEFAULT_TIMEOUT.as_secs(),
        })
    }
}

// ---- wire types ----

#[derive(Serialize)]
struct ChatRequest {
    model: String,
    message: String,
}

#[derive(Deserialize)]
struct ChatResponse {
    text: Option<String>,
}

#[derive(Deserialize)]
struct ApiErrorBody {
    message: String,
}

impl Completer for CohereCompleter {
    async fn complete(&self, model: &str, prompt: &str) -> Result<String, AppError> {
        let url = format!("{}/chat", self.base_url);

        let request = ChatRequest {
            model: model.to_string(),
            message: prompt.to_string(),
        };

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    AppError::Timeout(self.timeout_secs)
                } else if e.is_connect() {
                    AppError::NetworkError(format!("Connection failed: {e}"))
                } else {
                    AppError::NetworkError(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let status_code = status.as_u16();
            let body = response.text().await.unwrap_or_default();

            let message = serde_json::from_str::<ApiErrorBody>(&body)
                .map(|e| e.message)
                .unwrap_or_else(|_| format!("HTTP {status_code}: {body}"));

            return Err(AppError::ApiError {
                message,
                status_code,
                retryable: status_code == 429 || status_code >= 500,
            });
        }

        let chat_response: ChatResponse = response
            .json()
            .await
            .map_err(|e| AppError::MalformedResponse(format!("failed to parse response: {e}")))?;

        chat_response
            .text
            .filter(|t| !t.is_empty())
            .ok_or_else(|| AppError::MalformedResponse("empty completion".into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_chat_response() {
        let body = r#"{"text":"Voici un résumé.","generation_id":"abc"}"#;
        let parsed: ChatResponse = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.text.as_deref(), Some("Voici un résumé."));
    }

    #[test]
    fn test_parses_error_body() {
        let body = r#"{"message":"invalid api token"}"#;
        let parsed: ApiErrorBody = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.message, "invalid api token");
    }
}
