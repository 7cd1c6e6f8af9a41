use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::config::ProviderConfig;

use super::endpoint::join_endpoint;
use super::{send_json, Provider, ProviderError, SamplingOptions};

const API_KEY_HEADER: &str = "x-goog-api-key";

/// Generation parameters sent alongside every Gemini prompt.
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    pub temperature: f32,
}

impl From<&SamplingOptions> for GenerationConfig {
    fn from(options: &SamplingOptions) -> Self {
        Self {
            temperature: options.temperature,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    contents: [Content<'a>; 1],
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    role: &'static str,
    parts: [Part<'a>; 1],
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    block_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<CandidateContent>,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

/// Handle for one named Gemini model, created once at startup and invoked
/// per request with a prompt and a `GenerationConfig`.
pub struct GeminiModel {
    http_client: reqwest::Client,
    base_url: String,
    model: String,
    api_key: Option<String>,
}

impl GeminiModel {
    pub fn new(http_client: reqwest::Client, config: &ProviderConfig) -> Self {
        Self {
            http_client,
            base_url: config.base_url.clone(),
            model: config.model_name.clone(),
            api_key: config.api_key.clone(),
        }
    }

    /// Call `generateContent` and return the text of the first candidate.
    pub async fn generate_content(
        &self,
        prompt: &str,
        generation_config: GenerationConfig,
    ) -> Result<String, ProviderError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or(ProviderError::MissingCredential)?;

        let url = join_endpoint(
            &self.base_url,
            &format!("models/{}:generateContent", self.model),
        )?;

        let body = GenerateContentRequest {
            contents: [Content {
                role: "user",
                parts: [Part { text: prompt }],
            }],
            generation_config,
        };

        let request = self
            .http_client
            .post(url)
            .header(API_KEY_HEADER, api_key)
            .json(&body);

        let response: GenerateContentResponse = send_json(request).await?;
        extract_text(response)
    }
}

fn extract_text(response: GenerateContentResponse) -> Result<String, ProviderError> {
    let block_reason = response
        .prompt_feedback
        .and_then(|feedback| feedback.block_reason);

    let candidate = response.candidates.into_iter().next().ok_or_else(|| {
        let message = match block_reason {
            Some(reason) => format!("response contained no candidates (block reason: {reason})"),
            None => "response contained no candidates".to_string(),
        };
        ProviderError::MalformedResponse(message)
    })?;

    let text: String = candidate
        .content
        .map(|content| content.parts)
        .unwrap_or_default()
        .into_iter()
        .filter_map(|part| part.text)
        .collect();

    if text.is_empty() {
        let reason = candidate.finish_reason.as_deref().unwrap_or("unknown");
        return Err(ProviderError::MalformedResponse(format!(
            "candidate contained no text (finish reason: {reason})"
        )));
    }

    Ok(text)
}

#[async_trait]
impl Provider for GeminiModel {
    fn name(&self) -> &str {
        "gemini"
    }

    fn model(&self) -> &str {
        &self.model
    }

    async fn generate(
        &self,
        prompt: &str,
        options: &SamplingOptions,
    ) -> Result<String, ProviderError> {
        self.generate_content(prompt, GenerationConfig::from(options))
            .await
    }
}
