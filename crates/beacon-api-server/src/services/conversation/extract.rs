use serde_json::Value;

use crate::utils::error::ApiError;

/// Normalize raw provider output into a parsed JSON value.
///
/// Layered, most-direct first: parse the trimmed text as-is; strip a
/// ```json fence if one wraps it and retry; finally scan for the first
/// balanced `{...}` object and parse that span. Anything else fails as
/// `MalformedResponse`. Idempotent on already-clean JSON.
pub fn extract_json(raw: &str) -> Result<Value, ApiError> {
    let trimmed = raw.trim();

    if trimmed.is_empty() {
        return Err(ApiError::MalformedResponse(
            "provider returned empty output".to_string(),
        ));
    }

    if let Ok(value) = serde_json::from_str::<Value>(trimmed) {
        return Ok(value);
    }

    if let Some(unfenced) = strip_json_fence(trimmed) {
        if let Ok(value) = serde_json::from_str::<Value>(unfenced) {
            return Ok(value);
        }
    }

    if let Some(candidate) = first_json_object(trimmed) {
        if let Ok(value) = serde_json::from_str::<Value>(candidate) {
            return Ok(value);
        }
    }

    Err(ApiError::MalformedResponse(format!(
        "no parseable JSON object in provider output ({} chars)",
        raw.len()
    )))
}

/// Strip the exact ```json opening fence and closing ``` tokens, if present.
fn strip_json_fence(text: &str) -> Option<&str> {
    let body = text.strip_prefix("```json")?;
    let body = body.strip_suffix("```").unwrap_or(body);
    Some(body.trim())
}

/// Find the first balanced JSON object substring in possibly noisy output.
/// Handles nested braces and braces inside JSON strings (with escapes).
fn first_json_object(s: &str) -> Option<&str> {
    let mut start: Option<usize> = None;
    let mut depth: i32 = 0;

    let mut in_string = false;
    let mut escaped = false;

    for (i, ch) in s.char_indices() {
        if start.is_none() {
            if ch == '{' {
                start = Some(i);
                depth = 1;
                in_string = false;
                escaped = false;
            }
            continue;
        }

        if in_string {
            if escaped {
                escaped = false;
                continue;
            }
            match ch {
                '\\' => escaped = true,
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }

        match ch {
            '"' => in_string = true,
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    let st = start?;
                    return Some(&s[st..=i]);
                }
            }
            _ => {}
        }
    }

    None
}
