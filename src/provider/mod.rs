mod gemini;
mod retry;

pub use gemini::GeminiClient;

use crate::config::Config;
use crate::error::ProviderError;
use async_trait::async_trait;
use std::sync::Arc;

/// Per-call generation parameters. Each pipeline stage carries its own.
#[derive(Debug, Clone)]
pub struct GenerationOptions {
    pub temperature: f32,
    pub max_output_tokens: u32,
    /// Ground the response with live web search results.
    pub search_enabled: bool,
}

/// The content-generation collaborator: prompt text in, response text out.
///
/// Transport and quota failures surface as `ProviderError`; callers running
/// under the fan-out executor convert them into per-task failures rather
/// than letting them abort the pipeline.
#[async_trait]
pub trait Generator: Send + Sync {
    #[allow(dead_code)]
    fn name(&self) -> &'static str;

    async fn generate(
        &self,
        prompt: &str,
        options: &GenerationOptions,
    ) -> Result<String, ProviderError>;
}

/// Build the provider client once at startup, from config plus the API key
/// environment variable it names. Injected everywhere it is needed; there is
/// no lazily-initialized global.
pub fn create_generator(config: &Config) -> Result<Arc<dyn Generator>, ProviderError> {
    let client = GeminiClient::from_config(config)?;
    Ok(Arc::new(client))
}
