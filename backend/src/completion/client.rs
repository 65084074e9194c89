//! Chat-completion HTTP client
//!
//! Calls an OpenAI-compatible `/chat/completions` endpoint with the EcoBot
//! persona prompt and returns the generated reply text.

use super::error::CompletionError;
use super::types::{ChatCompletionRequest, ChatCompletionResponse, ChatMessage};
use super::CompletionClient;
use crate::constants::{
    COMPLETION_MAX_TOKENS, COMPLETION_TEMPERATURE, DEFAULT_COMPLETION_BASE_URL,
    DEFAULT_COMPLETION_MODEL, SYSTEM_PROMPT,
};
use async_trait::async_trait;
use reqwest::StatusCode;

/// Client for an OpenAI-compatible chat-completion service
#[derive(Debug, Clone)]
pub struct OpenAiCompatibleClient {
    http: reqwest::Client,
    base_url: String,
    model: String,
}

impl OpenAiCompatibleClient {
    /// Create a client against the default endpoint and model
    ///
    /// `http` is shared so connections are pooled; its timeout bounds every call.
    pub fn new(http: reqwest::Client) -> Self {
        Self::with_base_url(http, DEFAULT_COMPLETION_BASE_URL, DEFAULT_COMPLETION_MODEL)
    }

    /// Create a client against a custom endpoint (self-hosted gateways, tests)
    pub fn with_base_url(http: reqwest::Client, base_url: &str, model: &str) -> Self {
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            model: model.to_string(),
        }
    }

    /// Model identifier sent with each request
    pub fn model(&self) -> &str {
        &self.model
    }

    fn request_body(&self, user_text: &str) -> ChatCompletionRequest {
        ChatCompletionRequest {
            model: self.model.clone(),
            messages: vec![ChatMessage::system(SYSTEM_PROMPT), ChatMessage::user(user_text)],
            temperature: COMPLETION_TEMPERATURE,
            max_tokens: COMPLETION_MAX_TOKENS,
        }
    }
}

#[async_trait]
impl CompletionClient for OpenAiCompatibleClient {
    async fn complete(&self, api_key: &str, user_text: &str) -> Result<String, CompletionError> {
        if api_key.trim().is_empty() {
            return Err(CompletionError::MissingApiKey);
        }

        let url = format!("{}/chat/completions", self.base_url);

        tracing::debug!(
            url = %url,
            model = %self.model,
            prompt_len = user_text.len(),
            "Calling completion API"
        );

        let response = self
            .http
            .post(&url)
            .bearer_auth(api_key)
            .json(&self.request_body(user_text))
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED {
            tracing::warn!("Completion API rejected the configured API key");
            return Err(CompletionError::Unauthorized);
        }
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unable to read error body".to_string());

            tracing::error!(
                status_code = status.as_u16(),
                error_body = %body,
                "Completion API returned error status"
            );

            return Err(CompletionError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let body = response.text().await?;
        let parsed: ChatCompletionResponse = serde_json::from_str(&body)
            .map_err(|e| CompletionError::InvalidResponse(format!("{} - body: {}", e, body)))?;

        let reply = parsed
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content.trim().to_string())
            .filter(|text| !text.is_empty())
            .ok_or(CompletionError::EmptyResponse)?;

        tracing::debug!(
            response_len = reply.len(),
            "Received reply from completion API"
        );

        Ok(reply)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::{Matcher, Server};
    use serde_json::json;
    use serial_test::serial;

    fn client_for(server: &Server) -> OpenAiCompatibleClient {
        OpenAiCompatibleClient::with_base_url(reqwest::Client::new(), &server.url(), "test-model")
    }

    #[tokio::test]
    async fn test_complete_empty_api_key() {
        let client = OpenAiCompatibleClient::new(reqwest::Client::new());
        let result = client.complete("  ", "oi").await;
        assert!(matches!(result, Err(CompletionError::MissingApiKey)));
    }

    #[tokio::test]
    #[serial]
    async fn test_complete_success() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/chat/completions")
            .match_header("authorization", "Bearer test-key")
            .match_header("content-type", "application/json")
            .match_body(Matcher::PartialJson(json!({
                "model": "test-model",
                "temperature": 0.7,
                "max_tokens": 500,
                "messages": [
                    {"role": "system", "content": SYSTEM_PROMPT},
                    {"role": "user", "content": "O que é pH?"}
                ]
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{
                    "choices": [{
                        "message": {"role": "assistant", "content": "  O pH mede a acidez.  "}
                    }]
                }"#,
            )
            .create_async()
            .await;

        let result = client_for(&server).complete("test-key", "O que é pH?").await;

        mock.assert_async().await;
        assert_eq!(result.unwrap(), "O pH mede a acidez.");
    }

    #[tokio::test]
    #[serial]
    async fn test_complete_unauthorized() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/chat/completions")
            .with_status(401)
            .with_body(r#"{"error": {"message": "Incorrect API key"}}"#)
            .create_async()
            .await;

        let result = client_for(&server).complete("bad-key", "oi").await;

        mock.assert_async().await;
        let err = result.unwrap_err();
        assert!(matches!(err, CompletionError::Unauthorized));
        assert!(err.is_credential_error());
    }

    #[tokio::test]
    #[serial]
    async fn test_complete_server_error() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/chat/completions")
            .with_status(503)
            .with_body("overloaded")
            .create_async()
            .await;

        let result = client_for(&server).complete("test-key", "oi").await;

        mock.assert_async().await;
        match result {
            Err(CompletionError::Api { status, body }) => {
                assert_eq!(status, 503);
                assert_eq!(body, "overloaded");
            }
            other => panic!("expected Api error, got {:?}", other),
        }
    }

    #[tokio::test]
    #[serial]
    async fn test_complete_empty_choices() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/chat/completions")
            .with_status(200)
            .with_body(r#"{"choices": []}"#)
            .create_async()
            .await;

        let result = client_for(&server).complete("test-key", "oi").await;

        mock.assert_async().await;
        assert!(matches!(result, Err(CompletionError::EmptyResponse)));
    }

    #[tokio::test]
    #[serial]
    async fn test_complete_invalid_json() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/chat/completions")
            .with_status(200)
            .with_body("This is not JSON")
            .create_async()
            .await;

        let result = client_for(&server).complete("test-key", "oi").await;

        mock.assert_async().await;
        let err = result.unwrap_err();
        assert!(err.to_string().contains("Failed to parse"));
        assert!(!err.is_credential_error());
    }

    #[tokio::test]
    async fn test_complete_unreachable_host() {
        // Port 9 (discard) on localhost is not expected to run an HTTP server.
        let client = OpenAiCompatibleClient::with_base_url(
            reqwest::Client::new(),
            "http://127.0.0.1:9",
            "test-model",
        );
        let result = client.complete("test-key", "oi").await;
        assert!(matches!(result, Err(CompletionError::Transport(_))));
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let client = OpenAiCompatibleClient::with_base_url(
            reqwest::Client::new(),
            "http://localhost:1234/v1/",
            "m",
        );
        assert_eq!(client.base_url, "http://localhost:1234/v1");
        assert_eq!(client.model(), "m");
    }
}
