//! Google Gemini `generateContent` adapter.

use crate::breakdown::ports::{ProviderError, TextGenerationProvider};
use crate::config::ProviderConfig;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

const API_KEY_HEADER: &str = "x-goog-api-key";

/// Text-generation provider backed by the Gemini REST API.
#[derive(Debug, Clone)]
pub struct GeminiProvider {
    client: reqwest::Client,
    endpoint: String,
    api_key: String,
}

impl GeminiProvider {
    /// Builds a provider from resolved configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError`] when the HTTP client cannot be constructed.
    pub fn new(config: &ProviderConfig) -> Result<Self, ProviderError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|err| ProviderError::new(format!("failed to build HTTP client: {err}")))?;
        Ok(Self {
            client,
            endpoint: generate_endpoint(config.api_base(), config.model()),
            api_key: config.api_key().to_owned(),
        })
    }

    /// Returns the `generateContent` URL this provider posts to.
    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl TextGenerationProvider for GeminiProvider {
    async fn complete(&self, prompt: &str) -> Result<String, ProviderError> {
        let response = self
            .client
            .post(&self.endpoint)
            .header(API_KEY_HEADER, &self.api_key)
            .json(&GenerateRequest::from_prompt(prompt))
            .send()
            .await
            .map_err(|err| ProviderError::new(format!("request failed: {err}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ProviderError::new(format!("HTTP {status}: {body}")));
        }

        let payload: GenerateResponse = response
            .json()
            .await
            .map_err(|err| ProviderError::new(format!("malformed provider payload: {err}")))?;
        payload.into_text()
    }
}

fn generate_endpoint(api_base: &str, model: &str) -> String {
    format!(
        "{}/models/{model}:generateContent",
        api_base.trim_end_matches('/')
    )
}

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    contents: [RequestContent<'a>; 1],
}

#[derive(Debug, Serialize)]
struct RequestContent<'a> {
    parts: [RequestPart<'a>; 1],
}

#[derive(Debug, Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

impl<'a> GenerateRequest<'a> {
    const fn from_prompt(prompt: &'a str) -> Self {
        Self {
            contents: [RequestContent {
                parts: [RequestPart { text: prompt }],
            }],
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<ResponseCandidate>,
}

#[derive(Debug, Default, Deserialize)]
struct ResponseCandidate {
    #[serde(default)]
    content: ResponseContent,
}

#[derive(Debug, Default, Deserialize)]
struct ResponseContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Default, Deserialize)]
struct ResponsePart {
    #[serde(default)]
    text: Option<String>,
}

impl GenerateResponse {
    /// Concatenates the text parts of the first candidate.
    fn into_text(self) -> Result<String, ProviderError> {
        let candidate = self
            .candidates
            .into_iter()
            .next()
            .ok_or_else(|| ProviderError::new("provider response contained no candidates"))?;
        let text: String = candidate
            .content
            .parts
            .into_iter()
            .filter_map(|part| part.text)
            .collect();
        if text.is_empty() {
            return Err(ProviderError::new("provider response contained no text"));
        }
        Ok(text)
    }
}
