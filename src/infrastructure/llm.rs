//! Chat-completions client for story generation
//!
//! Talks to an OpenAI-compatible `/chat/completions` endpoint. Every error
//! here is recoverable from the pipeline's point of view: the story service
//! logs the cause and substitutes the fallback story.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};

use crate::application::ports::outbound::{
    ChatMessage, LlmPort, LlmRequest, LlmResponse, MessageRole,
};

/// Client for an OpenAI-compatible chat-completions API
pub struct ChatCompletionsClient {
    client: Client,
    base_url: String,
    model: String,
    api_key: Option<String>,
    timeout: Duration,
}

impl ChatCompletionsClient {
    pub fn new(
        base_url: &str,
        model: &str,
        api_key: Option<String>,
        timeout: Duration,
    ) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            model: model.to_string(),
            api_key,
            timeout,
        }
    }

    async fn chat(&self, request: LlmRequest) -> Result<LlmResponse, LlmClientError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or(LlmClientError::MissingApiKey)?;

        let mut messages = Vec::with_capacity(request.messages.len() + 1);
        if let Some(system_prompt) = &request.system_prompt {
            messages.push(ChatMessage {
                role: MessageRole::System,
                content: system_prompt.clone(),
            });
        }
        messages.extend(request.messages);

        let body = ChatCompletionRequest {
            model: &self.model,
            messages,
            temperature: request.temperature,
            max_tokens: request.max_tokens,
            response_format: request
                .json_response
                .then_some(ResponseFormat { r#type: "json_object" }),
        };

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .timeout(self.timeout)
            .bearer_auth(api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!("LLM API error: {status} - {body}");
            return Err(match status {
                StatusCode::TOO_MANY_REQUESTS => LlmClientError::RateLimited,
                StatusCode::UNAUTHORIZED => LlmClientError::AuthFailed,
                _ => LlmClientError::Api {
                    status: status.as_u16(),
                    body,
                },
            });
        }

        let data: ChatCompletionResponse = response.json().await?;

        let content = data
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .unwrap_or_default();
        let content = content.trim().to_string();
        if content.is_empty() {
            return Err(LlmClientError::EmptyResponse);
        }

        Ok(LlmResponse {
            content,
            model: data.model.unwrap_or_else(|| self.model.clone()),
            tokens_used: data.usage.map(|u| u.total_tokens).unwrap_or(0),
        })
    }
}

#[async_trait]
impl LlmPort for ChatCompletionsClient {
    type Error = LlmClientError;

    async fn generate(&self, request: LlmRequest) -> Result<LlmResponse, Self::Error> {
        self.chat(request).await
    }
}

/// Errors from the chat-completions client, all recoverable via fallback
#[derive(Debug, thiserror::Error)]
pub enum LlmClientError {
    #[error("LLM API key is not configured")]
    MissingApiKey,
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("rate limit exceeded (HTTP 429)")]
    RateLimited,
    #[error("LLM API authentication failed (HTTP 401)")]
    AuthFailed,
    #[error("LLM API returned status {status}: {body}")]
    Api { status: u16, body: String },
    #[error("empty response from LLM")]
    EmptyResponse,
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_format: Option<ResponseFormat>,
}

#[derive(Debug, Serialize)]
struct ResponseFormat {
    r#type: &'static str,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<Choice>,
    model: Option<String>,
    usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: String,
}

#[derive(Debug, Deserialize)]
struct Usage {
    total_tokens: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_body_shape() {
        let body = ChatCompletionRequest {
            model: "grok-4-1-fast-non-reasoning",
            messages: vec![ChatMessage {
                role: MessageRole::User,
                content: "hello".to_string(),
            }],
            temperature: Some(0.8),
            max_tokens: Some(3000),
            response_format: Some(ResponseFormat { r#type: "json_object" }),
        };

        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["model"], "grok-4-1-fast-non-reasoning");
        assert_eq!(json["messages"][0]["role"], "user");
        assert_eq!(json["response_format"]["type"], "json_object");
    }

    #[test]
    fn test_response_body_parse() {
        let raw = r#"{
            "choices": [{"message": {"role": "assistant", "content": "{\"title\":\"T\",\"story\":\"S\"}"}}],
            "model": "grok-4-1-fast-non-reasoning",
            "usage": {"total_tokens": 412}
        }"#;

        let parsed: ChatCompletionResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(parsed.choices.len(), 1);
        assert_eq!(parsed.usage.unwrap().total_tokens, 412);
    }
}
