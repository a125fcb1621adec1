//! OpenAI-compatible chat completion client

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::core::config::ChatCompletionConfig;
use crate::core::error::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    System,
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::Assistant,
            content: content.into(),
        }
    }
}

#[derive(Debug, Error)]
pub enum ChatCompletionError {
    #[error("Chat completion is not configured")]
    NotConfigured,

    #[error("Chat completion request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Chat completion API returned {status}: {body}")]
    Api { status: u16, body: String },

    #[error("Chat completion returned no content")]
    EmptyResponse,
}

impl From<ChatCompletionError> for AppError {
    fn from(err: ChatCompletionError) -> Self {
        AppError::ExternalServiceError(err.to_string())
    }
}

#[async_trait]
pub trait ChatCompletion: Send + Sync {
    /// Send `prompts` followed by `user_message` and return the reply text
    async fn complete(
        &self,
        prompts: Vec<ChatMessage>,
        user_message: &str,
    ) -> Result<String, ChatCompletionError>;
}

#[derive(Debug, Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage>,
    temperature: f32,
}

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

pub struct OpenAiClient {
    http_client: Client,
    base_url: String,
    api_key: Option<String>,
    model: String,
}

impl OpenAiClient {
    pub fn new(config: &ChatCompletionConfig) -> Result<Self, ChatCompletionError> {
        let http_client = Client::builder().timeout(config.timeout).build()?;

        Ok(Self {
            http_client,
            base_url: config.base_url.clone(),
            api_key: config.api_key.clone(),
            model: config.model.clone(),
        })
    }

    fn build_request(&self, mut prompts: Vec<ChatMessage>, user_message: &str) -> CompletionRequest<'_> {
        prompts.push(ChatMessage::user(user_message));
        CompletionRequest {
            model: &self.model,
            messages: prompts,
            temperature: 0.3,
        }
    }
}

fn first_choice(response: CompletionResponse) -> Result<String, ChatCompletionError> {
    response
        .choices
        .into_iter()
        .next()
        .and_then(|c| c.message.content)
        .map(|c| c.trim().to_string())
        .filter(|c| !c.is_empty())
        .ok_or(ChatCompletionError::EmptyResponse)
}

#[async_trait]
impl ChatCompletion for OpenAiClient {
    async fn complete(
        &self,
        prompts: Vec<ChatMessage>,
        user_message: &str,
    ) -> Result<String, ChatCompletionError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or(ChatCompletionError::NotConfigured)?;

        let body = self.build_request(prompts, user_message);
        debug!(
            "Requesting chat completion with {} messages",
            body.messages.len()
        );

        let response = self
            .http_client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(api_key)
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(ChatCompletionError::Api { status, body });
        }

        first_choice(response.json::<CompletionResponse>().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn client(api_key: Option<&str>) -> OpenAiClient {
        OpenAiClient::new(&ChatCompletionConfig {
            base_url: "http://127.0.0.1:1/v1".to_string(),
            api_key: api_key.map(str::to_string),
            model: "gpt-4o-mini".to_string(),
            timeout: Duration::from_secs(1),
        })
        .unwrap()
    }

    #[test]
    fn test_request_appends_user_message() {
        let client = client(Some("key"));
        let request = client.build_request(
            vec![ChatMessage::system("be helpful"), ChatMessage::assistant("hi")],
            "Bagaimana cara membuat aduan?",
        );
        let json = serde_json::to_value(&request).unwrap();

        assert_eq!(json["model"], "gpt-4o-mini");
        assert_eq!(json["messages"].as_array().unwrap().len(), 3);
        assert_eq!(json["messages"][0]["role"], "system");
        assert_eq!(json["messages"][2]["role"], "user");
        assert_eq!(json["messages"][2]["content"], "Bagaimana cara membuat aduan?");
    }

    #[test]
    fn test_first_choice_parsing() {
        let response: CompletionResponse = serde_json::from_value(serde_json::json!({
            "choices": [{"message": {"role": "assistant", "content": "  Halo!  "}}]
        }))
        .unwrap();
        assert_eq!(first_choice(response).unwrap(), "Halo!");

        let empty: CompletionResponse =
            serde_json::from_value(serde_json::json!({ "choices": [] })).unwrap();
        assert!(matches!(
            first_choice(empty),
            Err(ChatCompletionError::EmptyResponse)
        ));
    }

    #[tokio::test]
    async fn test_missing_api_key_is_reported() {
        let result = client(None).complete(vec![], "halo").await;
        assert!(matches!(result, Err(ChatCompletionError::NotConfigured)));
    }
}
