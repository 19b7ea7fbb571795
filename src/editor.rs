//! Single-activity AI edit: one provider call, extraction through the same
//! JSON extractor the pipeline uses, and a typed result.

use crate::config::Config;
use crate::error::EditError;
use crate::parser::extract_payload;
use crate::provider::{GenerationOptions, Generator};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone)]
pub struct EditRequest {
    pub edit_request: String,
    pub current_activity: Value,
    pub city: String,
    pub day_date: NaiveDate,
    pub interests: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EditOperation {
    Replace,
    Delete,
    UpdateTime,
    UpdateDescription,
    Add,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct EditResponse {
    pub operation: EditOperation,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_activity: Option<Value>,

    /// Only present for `add`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub new_activity: Option<Value>,

    #[serde(default)]
    pub change_summary: String,
}

pub async fn process_edit(
    generator: &dyn Generator,
    config: &Config,
    request: &EditRequest,
) -> Result<EditResponse, EditError> {
    let prompt = edit_prompt(request)?;
    let options = GenerationOptions {
        temperature: config.edit.temperature,
        max_output_tokens: config.edit.max_output_tokens,
        search_enabled: false,
    };

    let text = generator.generate(&prompt, &options).await?;
    let response: EditResponse = extract_payload(&text)?;
    Ok(response)
}

fn edit_prompt(request: &EditRequest) -> Result<String, EditError> {
    let activity_json = serde_json::to_string_pretty(&request.current_activity)?;
    let interests = if request.interests.is_empty() {
        "general".to_string()
    } else {
        request.interests.join(", ")
    };
    let city = &request.city;

    Ok(format!(
        r#"You are an itinerary editing assistant. Your job is to help users modify their travel plans.

You MUST respond with ONLY valid JSON (no markdown, no backticks, no explanation).

Based on the user's request, determine the appropriate operation and provide the result.

Operations:
1. "replace" - Replace the current activity with a new one (user wants something different)
2. "delete" - Remove the activity (user doesn't want it)
3. "update_time" - Only change the timing
4. "update_description" - Only change the description
5. "add" - Add a new activity (user wants to add something nearby/after)

For "replace" or "add" operations, you must provide realistic details:
- Real place names that exist in {city}
- Realistic coordinates (latitude/longitude for {city})
- Appropriate timing based on the activity type
- Detailed description

Response format:
{{
  "operation": "replace|delete|update_time|update_description|add",
  "updated_activity": {{
    "name": "Place Name",
    "location": "Full address",
    "coordinates": {{ "lat": 0.0, "lng": 0.0 }},
    "start_time": "ISO datetime",
    "end_time": "ISO datetime",
    "description": "Description of the place",
    "tags": ["tag1", "tag2"]
  }},
  "new_activity": {{ }},
  "change_summary": "Brief description of what changed"
}}

For "delete", only include "operation" and "change_summary".
For "update_time", "updated_activity" carries only the new start_time/end_time.

City: {city}
Date: {date}
User interests: {interests}

Current activity:
{activity_json}

User's edit request: "{edit_request}"

Provide the appropriate edit response as JSON."#,
        date = request.day_date,
        edit_request = request.edit_request,
    ))
}
