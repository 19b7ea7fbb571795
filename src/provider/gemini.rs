use super::retry::retry_with_backoff;
use super::{GenerationOptions, Generator};
use crate::config::{Config, RetryConfig};
use crate::error::ProviderError;
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;
use tracing::debug;

/// Gemini REST client (`models/{model}:generateContent`).
///
/// Constructed once at process start and shared via `Arc<dyn Generator>`;
/// the underlying reqwest client pools connections across concurrent tasks.
pub struct GeminiClient {
    http: reqwest::Client,
    model: String,
    base_url: String,
    api_key: String,
    retry: RetryConfig,
}

impl GeminiClient {
    pub fn from_config(config: &Config) -> Result<Self, ProviderError> {
        let api_key = std::env::var(&config.provider.api_key_env)
            .map_err(|_| ProviderError::MissingApiKey(config.provider.api_key_env.clone()))?;

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.provider.request_timeout_sec))
            .build()?;

        Ok(Self {
            http,
            model: config.provider.model.clone(),
            base_url: config.provider.base_url.trim_end_matches('/').to_string(),
            api_key,
            retry: config.retry.clone(),
        })
    }

    async fn call_once(
        &self,
        prompt: &str,
        options: &GenerationOptions,
    ) -> Result<String, ProviderError> {
        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        );

        let mut body = json!({
            "contents": [{ "parts": [{ "text": prompt }] }],
            "generationConfig": {
                "temperature": options.temperature,
                "maxOutputTokens": options.max_output_tokens,
            },
        });
        if options.search_enabled {
            body["tools"] = json!([{ "google_search": {} }]);
        }

        let response = self
            .http
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(ProviderError::Api {
                status: status.as_u16(),
                message: truncate(&message, 500),
            });
        }

        let parsed: GenerateContentResponse = response.json().await?;
        let text = parsed.text();
        if text.is_empty() {
            return Err(ProviderError::EmptyResponse);
        }

        debug!("Gemini returned {} chars", text.len());
        Ok(text)
    }
}

#[async_trait]
impl Generator for GeminiClient {
    fn name(&self) -> &'static str {
        "gemini"
    }

    async fn generate(
        &self,
        prompt: &str,
        options: &GenerationOptions,
    ) -> Result<String, ProviderError> {
        retry_with_backoff(&self.retry, || self.call_once(prompt, options)).await
    }
}

fn truncate(s: &str, max: usize) -> String {
    if s.len() <= max {
        s.to_string()
    } else {
        let mut end = max;
        while !s.is_char_boundary(end) {
            end -= 1;
        }
        s[..end].to_string()
    }
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<Content>,
}

#[derive(Debug, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    #[serde(default)]
    text: String,
}

impl GenerateContentResponse {
    /// Concatenate the text parts of the first candidate.
    fn text(&self) -> String {
        self.candidates
            .first()
            .and_then(|c| c.content.as_ref())
            .map(|content| {
                content
                    .parts
                    .iter()
                    .map(|p| p.text.as_str())
                    .collect::<Vec<_>>()
                    .join("")
            })
            .unwrap_or_default()
    }
}
