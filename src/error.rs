use std::path::PathBuf;
use thiserror::Error;

#[allow(dead_code)]
#[derive(Error, Debug)]
pub enum WayfinderError {
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    #[error("Extraction error: {0}")]
    Extract(#[from] ExtractError),

    #[error("Edit error: {0}")]
    Edit(#[from] EditError),

    #[error("Output error: {0}")]
    Output(#[from] OutputError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    ReadFile {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("Invalid value for '{field}': {reason}")]
    InvalidValue { field: String, reason: String },
}

#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("API key environment variable '{0}' is not set")]
    MissingApiKey(String),

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Provider returned status {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Provider returned an empty response")]
    EmptyResponse,
}

/// Failure to recover a JSON object from free-form provider text.
///
/// Carries a short excerpt of the raw text so a failed search or analysis
/// task can be diagnosed from the run log alone.
#[derive(Error, Debug, Clone)]
pub enum ExtractError {
    #[error("empty provider text")]
    Empty,

    #[error("no JSON object found in provider text (starts: {excerpt:?})")]
    NoJson { excerpt: String },

    #[error("JSON payload has unexpected shape: {reason} (starts: {excerpt:?})")]
    Shape { reason: String, excerpt: String },
}

#[derive(Error, Debug)]
pub enum EditError {
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    #[error("Extraction error: {0}")]
    Extract(#[from] ExtractError),

    #[error("Failed to read activity file '{path}': {source}")]
    ReadActivity {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Activity file is not valid JSON: {0}")]
    ActivityJson(#[from] serde_json::Error),
}

#[derive(Error, Debug)]
pub enum OutputError {
    #[error("Failed to create output directory: {0}")]
    CreateDir(std::io::Error),

    #[error("Failed to write artifact: {0}")]
    WriteArtifact(std::io::Error),

    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}
