/*!
 * Recovery of JSON objects from free-form model output.
 *
 * Models asked for JSON still wrap it in prose or markdown fences now and
 * then, and occasionally leave trailing commas behind.
 */

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

use crate::errors::ProviderError;

static TRAILING_COMMA: Lazy<Regex> =
    Lazy::new(|| Regex::new(r",(\s*[}\]])").expect("trailing comma pattern is valid"));

/// Locate the JSON object inside a model response
pub fn extract_json(response: &str) -> Result<String, ProviderError> {
    let trimmed = response.trim();

    if trimmed.starts_with('{') {
        return Ok(trimmed.to_string());
    }

    // Markdown code fence with language tag
    if let Some(start) = trimmed.find("```json") {
        if let Some(end) = trimmed[start + 7..].find("```") {
            return Ok(trimmed[start + 7..start + 7 + end].trim().to_string());
        }
    }

    // Markdown code fence without language tag
    if let Some(start) = trimmed.find("```") {
        if let Some(end) = trimmed[start + 3..].find("```") {
            let json = trimmed[start + 3..start + 3 + end].trim();
            if json.starts_with('{') {
                return Ok(json.to_string());
            }
        }
    }

    if let (Some(start), Some(end)) = (trimmed.find('{'), trimmed.rfind('}')) {
        if end > start {
            return Ok(trimmed[start..=end].to_string());
        }
    }

    Err(ProviderError::ParseError(
        "Could not extract JSON from response".to_string(),
    ))
}

/// Extract and parse the JSON object inside a model response
pub fn parse_json_object(response: &str) -> Result<Value, ProviderError> {
    let json = extract_json(response)?;
    let cleaned = TRAILING_COMMA.replace_all(&json, "$1");
    let value: Value = serde_json::from_str(&cleaned)?;
    if !value.is_object() {
        return Err(ProviderError::ParseError(format!(
            "Expected a JSON object, got: {}",
            value
        )));
    }
    Ok(value)
}
