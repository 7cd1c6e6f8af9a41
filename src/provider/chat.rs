use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::config::ProviderConfig;

use super::endpoint::join_endpoint;
use super::{send_json, Provider, ProviderError, SamplingOptions};

#[derive(Debug, Serialize)]
pub struct ChatMessage<'a> {
    pub role: &'static str,
    pub content: &'a str,
}

impl<'a> ChatMessage<'a> {
    pub fn user(content: &'a str) -> Self {
        Self {
            role: "user",
            content,
        }
    }
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage<'a>],
    temperature: f32,
    stream: bool,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: Option<AssistantMessage>,
}

#[derive(Debug, Deserialize)]
struct AssistantMessage {
    content: Option<String>,
}

/// Hosted chat-completion endpoint (OpenAI-compatible).
pub struct ChatCompletions {
    http_client: reqwest::Client,
    base_url: String,
    model: String,
    api_key: Option<String>,
}

impl ChatCompletions {
    pub fn new(http_client: reqwest::Client, config: &ProviderConfig) -> Self {
        Self {
            http_client,
            base_url: config.base_url.clone(),
            model: config.model_name.clone(),
            api_key: config.api_key.clone(),
        }
    }

    /// Submit a message list with streaming disabled and return the first
    /// choice's content.
    pub async fn complete(
        &self,
        messages: &[ChatMessage<'_>],
        options: &SamplingOptions,
    ) -> Result<String, ProviderError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or(ProviderError::MissingCredential)?;

        let url = join_endpoint(&self.base_url, "chat/completions")?;

        let body = ChatCompletionRequest {
            model: &self.model,
            messages,
            temperature: options.temperature,
            stream: false,
        };

        let request = self
            .http_client
            .post(url)
            .bearer_auth(api_key)
            .json(&body);

        let response: ChatCompletionResponse = send_json(request).await?;

        response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message)
            .and_then(|message| message.content)
            .ok_or_else(|| {
                ProviderError::MalformedResponse("response contained no message content".into())
            })
    }
}

#[async_trait]
impl Provider for ChatCompletions {
    fn name(&self) -> &str {
        "chat"
    }

    fn model(&self) -> &str {
        &self.model
    }

    async fn generate(
        &self,
        prompt: &str,
        options: &SamplingOptions,
    ) -> Result<String, ProviderError> {
        self.complete(&[ChatMessage::user(prompt)], options).await
    }
}
