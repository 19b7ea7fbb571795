use std::path::PathBuf;

pub fn default_version() -> u32 {
    1
}

pub fn default_report_dir() -> PathBuf {
    PathBuf::from("reports")
}

pub fn default_model() -> String {
    "gemini-2.0-flash".to_string()
}

pub fn default_api_key_env() -> String {
    "GOOGLE_API_KEY".to_string()
}

pub fn default_base_url() -> String {
    "https://generativelanguage.googleapis.com".to_string()
}

pub fn default_request_timeout_sec() -> u64 {
    120
}

pub fn default_links_per_search() -> usize {
    15
}

pub fn default_max_concurrent_searches() -> usize {
    4
}

pub fn default_scout_temperature() -> f32 {
    0.2
}

pub fn default_scout_max_output_tokens() -> u32 {
    4096
}

pub fn default_batch_size() -> usize {
    5
}

pub fn default_max_concurrent_batches() -> usize {
    3
}

pub fn default_explorer_temperature() -> f32 {
    0.1
}

pub fn default_explorer_max_output_tokens() -> u32 {
    8192
}

pub fn default_edit_temperature() -> f32 {
    0.3
}

pub fn default_edit_max_output_tokens() -> u32 {
    2048
}

pub fn default_max_attempts() -> u32 {
    2
}

pub fn default_backoff_base_ms() -> u64 {
    1000
}
