//! Chat completion HTTP client
//!
//! Talks to the Groq OpenAI-compatible chat completion endpoint.

use reqwest::Client;
use tracing::{debug, info, warn};

use crate::config::LlmConfig;
use crate::error::{Error, Result};

use super::types::*;

const DEFAULT_BASE_URL: &str = "https://api.groq.com/openai/v1";

/// Chat completion client
#[derive(Clone)]
pub struct ChatClient {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl ChatClient {
    /// Create a new chat client
    pub fn new(config: &LlmConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(120))
            .build()
            .map_err(Error::Http)?;

        let base_url = config
            .base_url
            .clone()
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        Ok(Self {
            client,
            api_key: config.api_key.clone(),
            model: config.model.clone(),
            base_url,
        })
    }

    /// Create with custom base URL (for testing or custom endpoints)
    pub fn with_base_url(config: &LlmConfig, base_url: String) -> Result<Self> {
        let mut client = Self::new(config)?;
        client.base_url = base_url;
        Ok(client)
    }

    /// Send a chat completion request
    pub async fn chat(&self, request: ChatCompletionRequest) -> Result<ChatCompletionResponse> {
        let url = format!("{}/chat/completions", self.base_url);

        debug!("Sending request to chat completion API: {}", url);

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("content-type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(Error::Http)?;

        let status = response.status();
        let body = response.text().await.map_err(Error::Http)?;

        if !status.is_success() {
            warn!("Chat API error: {} - {}", status, body);
            return Err(Error::ChatApi(format!("{}: {}", status, body)));
        }

        let parsed: ChatCompletionResponse = serde_json::from_str(&body).map_err(|e| {
            Error::ChatApi(format!("Failed to parse response: {} - {}", e, body))
        })?;

        info!(
            "Chat API response: finish_reason={:?}, tokens={}",
            parsed.choices.first().map(|c| c.finish_reason.as_str()),
            parsed.usage.as_ref().map(|u| u.completion_tokens).unwrap_or(0)
        );

        Ok(parsed)
    }

    /// Send a single system + user exchange and return the reply text, trimmed.
    ///
    /// Exactly one attempt is made; failures are not retried.
    pub async fn complete(&self, system: &str, user: &str) -> Result<String> {
        let request = ChatCompletionRequest::new(
            self.model.clone(),
            vec![ChatMessage::system(system), ChatMessage::user(user)],
        );

        let response = self.chat(request).await?;

        let text = response
            .first_content()
            .ok_or_else(|| Error::ChatApi("completion contained no message content".to_string()))?;

        Ok(text.trim().to_string())
    }

    /// Get the model name
    pub fn model(&self) -> &str {
        &self.model
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_config() -> LlmConfig {
        LlmConfig {
            api_key: "gsk-test-key".to_string(),
            ..LlmConfig::default()
        }
    }

    fn completion_json(content: &str) -> serde_json::Value {
        serde_json::json!({
            "id": "chatcmpl-test",
            "object": "chat.completion",
            "created": 1700000000,
            "model": "meta-llama/llama-4-scout-17b-16e-instruct",
            "choices": [{
                "index": 0,
                "message": {"role": "assistant", "content": content},
                "finish_reason": "stop"
            }],
            "usage": {"prompt_tokens": 10, "completion_tokens": 5, "total_tokens": 15}
        })
    }

    #[tokio::test]
    async fn test_complete_sends_bearer_auth_and_trims() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .and(header("Authorization", "Bearer gsk-test-key"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(completion_json("  Stay calm. \n")),
            )
            .expect(1)
            .mount(&server)
            .await;

        let client = ChatClient::with_base_url(&test_config(), server.uri()).unwrap();
        let text = client.complete("sys", "usr").await.unwrap();

        assert_eq!(text, "Stay calm.");
    }

    #[tokio::test]
    async fn test_error_status_surfaces_body() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(500).set_body_string("upstream blew up"))
            .mount(&server)
            .await;

        let client = ChatClient::with_base_url(&test_config(), server.uri()).unwrap();
        let err = client.complete("sys", "usr").await.unwrap_err();

        match err {
            Error::ChatApi(msg) => assert!(msg.contains("upstream blew up")),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_malformed_response_is_an_error() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let client = ChatClient::with_base_url(&test_config(), server.uri()).unwrap();
        let err = client.complete("sys", "usr").await.unwrap_err();

        assert!(matches!(err, Error::ChatApi(_)));
    }

    #[tokio::test]
    async fn test_empty_choices_is_an_error() {
        let server = MockServer::start().await;

        let body = serde_json::json!({
            "id": "chatcmpl-test",
            "object": "chat.completion",
            "created": 1700000000,
            "model": "m",
            "choices": []
        });

        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(&server)
            .await;

        let client = ChatClient::with_base_url(&test_config(), server.uri()).unwrap();
        let err = client.complete("sys", "usr").await.unwrap_err();

        assert!(matches!(err, Error::ChatApi(_)));
    }
}
