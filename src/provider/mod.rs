pub mod chat;
pub mod endpoint;
pub mod errors;
pub mod gemini;

use std::sync::Arc;

use async_trait::async_trait;
use clap::ValueEnum;
use serde::de::DeserializeOwned;

use crate::config::ProviderConfig;

pub use chat::ChatCompletions;
pub use errors::ProviderError;
pub use gemini::GeminiModel;

/// Highest sampling temperature accepted by the supported providers.
pub const MAX_TEMPERATURE: f32 = 2.0;

/// Text-generation capability: accept a prompt, return generated text.
#[async_trait]
pub trait Provider: Send + Sync {
    /// Human-readable name for this provider.
    fn name(&self) -> &str;

    /// Model identifier requests are sent to.
    fn model(&self) -> &str;

    /// Generate text for a single prompt.
    async fn generate(
        &self,
        prompt: &str,
        options: &SamplingOptions,
    ) -> Result<String, ProviderError>;
}

/// Sampling parameters passed with every generation call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SamplingOptions {
    pub temperature: f32,
}

impl SamplingOptions {
    /// Maximum randomness; puzzles favor variety over repeatability.
    pub fn creative() -> Self {
        Self {
            temperature: MAX_TEMPERATURE,
        }
    }
}

impl Default for SamplingOptions {
    fn default() -> Self {
        Self::creative()
    }
}

/// Which adapter shape talks to the remote backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ProviderKind {
    /// Gemini `generateContent` with a per-model handle.
    Gemini,
    /// OpenAI-compatible `chat/completions`.
    Chat,
}

impl ProviderKind {
    pub fn default_base_url(self) -> &'static str {
        match self {
            Self::Gemini => "https://generativelanguage.googleapis.com/v1beta",
            Self::Chat => "https://api.openai.com/v1",
        }
    }

    pub fn default_model(self) -> &'static str {
        match self {
            Self::Gemini => "gemini-2.0-flash",
            Self::Chat => "gpt-4o-mini",
        }
    }

    /// Provider-specific variable consulted when no generic key is set.
    pub fn api_key_env(self) -> &'static str {
        match self {
            Self::Gemini => "GOOGLE_API_KEY",
            Self::Chat => "OPENAI_API_KEY",
        }
    }
}

/// Build the adapter selected by `config`.
pub fn from_config(config: &ProviderConfig, http_client: reqwest::Client) -> Arc<dyn Provider> {
    match config.kind {
        ProviderKind::Gemini => Arc::new(GeminiModel::new(http_client, config)),
        ProviderKind::Chat => Arc::new(ChatCompletions::new(http_client, config)),
    }
}

/// Send a prepared request and decode a JSON reply, mapping every failure
/// into a `ProviderError`.
async fn send_json<T: DeserializeOwned>(
    request: reqwest::RequestBuilder,
) -> Result<T, ProviderError> {
    let response = request.send().await.map_err(ProviderError::from_transport)?;

    let status = response.status();
    let body = response.text().await.map_err(ProviderError::from_transport)?;

    if !status.is_success() {
        return Err(ProviderError::from_status(status.as_u16(), &body));
    }

    serde_json::from_str(&body).map_err(|e| ProviderError::MalformedResponse(e.to_string()))
}
