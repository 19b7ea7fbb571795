use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::defaults::*;

#[derive(Debug, Clone, Deserialize, Serialize, JsonSchema)]
pub struct Config {
    #[serde(default = "default_version")]
    pub version: u32,

    #[serde(default = "default_report_dir")]
    pub report_dir: PathBuf,

    #[serde(default)]
    pub provider: ProviderConfig,

    #[serde(default)]
    pub retry: RetryConfig,

    #[serde(default)]
    pub scout: ScoutConfig,

    #[serde(default)]
    pub explorer: ExplorerConfig,

    #[serde(default)]
    pub edit: EditConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize, JsonSchema)]
pub struct ProviderConfig {
    #[serde(default = "default_model")]
    pub model: String,

    /// Name of the environment variable holding the API key. The key itself
    /// never lives in the config file.
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,

    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_request_timeout_sec")]
    pub request_timeout_sec: u64,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            model: default_model(),
            api_key_env: default_api_key_env(),
            base_url: default_base_url(),
            request_timeout_sec: default_request_timeout_sec(),
        }
    }
}

/// Backoff policy applied inside the provider client only. Pipeline stages
/// never retry a task themselves.
#[derive(Debug, Clone, Deserialize, Serialize, JsonSchema)]
pub struct RetryConfig {
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    #[serde(default = "default_backoff_base_ms")]
    pub backoff_base_ms: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
            backoff_base_ms: default_backoff_base_ms(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, JsonSchema)]
pub struct ScoutConfig {
    #[serde(default = "default_links_per_search")]
    pub links_per_search: usize,

    #[serde(default = "default_max_concurrent_searches")]
    pub max_concurrent_searches: usize,

    #[serde(default = "default_scout_temperature")]
    pub temperature: f32,

    #[serde(default = "default_scout_max_output_tokens")]
    pub max_output_tokens: u32,
}

impl Default for ScoutConfig {
    fn default() -> Self {
        Self {
            links_per_search: default_links_per_search(),
            max_concurrent_searches: default_max_concurrent_searches(),
            temperature: default_scout_temperature(),
            max_output_tokens: default_scout_max_output_tokens(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, JsonSchema)]
pub struct ExplorerConfig {
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,

    #[serde(default = "default_max_concurrent_batches")]
    pub max_concurrent_batches: usize,

    #[serde(default = "default_explorer_temperature")]
    pub temperature: f32,

    #[serde(default = "default_explorer_max_output_tokens")]
    pub max_output_tokens: u32,
}

impl Default for ExplorerConfig {
    fn default() -> Self {
        Self {
            batch_size: default_batch_size(),
            max_concurrent_batches: default_max_concurrent_batches(),
            temperature: default_explorer_temperature(),
            max_output_tokens: default_explorer_max_output_tokens(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, JsonSchema)]
pub struct EditConfig {
    #[serde(default = "default_edit_temperature")]
    pub temperature: f32,

    #[serde(default = "default_edit_max_output_tokens")]
    pub max_output_tokens: u32,
}

impl Default for EditConfig {
    fn default() -> Self {
        Self {
            temperature: default_edit_temperature(),
            max_output_tokens: default_edit_max_output_tokens(),
        }
    }
}
