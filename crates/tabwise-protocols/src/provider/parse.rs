//! Extraction of the JSON payload from free-form model output.

use crate::error::ProviderError;

use super::RawGrouping;

const FENCE_OPEN: &str = "```json";
const FENCE_CLOSE: &str = "```";

/// Locate the JSON object in `text`: a fenced ```json block wins, otherwise
/// the span from the first `{` to the last `}`.
pub fn extract_json(text: &str) -> Option<&str> {
    if let Some(start) = text.find(FENCE_OPEN) {
        let body = &text[start + FENCE_OPEN.len()..];
        if let Some(end) = body.find(FENCE_CLOSE) {
            return Some(body[..end].trim());
        }
    }

    let start = text.find('{')?;
    let end = text.rfind('}')?;
    (end > start).then(|| &text[start..=end])
}

/// Parse model text into a raw grouping object.
pub fn parse_grouping_text(text: &str) -> Result<RawGrouping, ProviderError> {
    let json = extract_json(text).ok_or_else(|| {
        ProviderError::InvalidResponse("no JSON object found in model output".to_string())
    })?;

    let value: serde_json::Value = serde_json::from_str(json)
        .map_err(|e| ProviderError::InvalidResponse(format!("failed to parse JSON: {e}")))?;

    if !value.is_object() {
        return Err(ProviderError::InvalidResponse(
            "model output is not a JSON object".to_string(),
        ));
    }
    if value.get("groups").is_none() {
        return Err(ProviderError::InvalidResponse(
            "model output has no groups field".to_string(),
        ));
    }

    Ok(value)
}

#[cfg(test)]
#[path = "parse_tests.rs"]
mod tests;
