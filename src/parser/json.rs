use crate::error::ExtractError;
use serde::de::DeserializeOwned;
use serde_json::Value;

/// How much raw text to keep for diagnostics when extraction fails.
const EXCERPT_LEN: usize = 200;

/// Recover a JSON object from free-form provider text.
///
/// Strategies, tried in order, first success wins:
/// 1. the whole text is valid JSON
/// 2. a fenced block labeled `json` (case-insensitive)
/// 3. the substring from the first `{` to the last `}`
///
/// Pure and deterministic: the same text always yields the same outcome.
pub fn extract_json(text: &str) -> Result<Value, ExtractError> {
    if text.trim().is_empty() {
        return Err(ExtractError::Empty);
    }

    // First try: the whole text is valid JSON
    if let Ok(value) = serde_json::from_str::<Value>(text.trim()) {
        return Ok(value);
    }

    // Second try: fenced ```json block
    if let Ok(re) = regex::Regex::new(r"(?i)```json\s*([\s\S]*?)\s*```") {
        for cap in re.captures_iter(text) {
            if let Some(inner) = cap.get(1) {
                if let Ok(value) = serde_json::from_str::<Value>(inner.as_str().trim()) {
                    return Ok(value);
                }
            }
        }
    }

    // Third try: first `{` to last `}`
    if let (Some(start), Some(end)) = (text.find('{'), text.rfind('}')) {
        if end > start {
            if let Ok(value) = serde_json::from_str::<Value>(&text[start..=end]) {
                return Ok(value);
            }
        }
    }

    Err(ExtractError::NoJson {
        excerpt: excerpt(text),
    })
}

/// Extract a JSON object and deserialize it into a typed payload.
pub fn extract_payload<T: DeserializeOwned>(text: &str) -> Result<T, ExtractError> {
    let value = extract_json(text)?;
    serde_json::from_value(value).map_err(|e| ExtractError::Shape {
        reason: e.to_string(),
        excerpt: excerpt(text),
    })
}

fn excerpt(text: &str) -> String {
    text.chars().take(EXCERPT_LEN).collect()
}
